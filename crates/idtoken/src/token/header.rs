use miniserde::Deserialize;

/// JWT header structure
///
/// Firebase ID tokens carry `alg` (always `RS256`), the `kid` of the Google
/// signing key, and usually `typ`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TokenHeader {
    /// Algorithm used for signing
    #[serde(rename = "alg")]
    pub algorithm: String,

    /// Key ID of the signing key
    #[serde(rename = "kid")]
    pub key_id: Option<String>,

    /// Token type, typically `JWT`
    #[serde(rename = "typ")]
    pub token_type: Option<String>,
}

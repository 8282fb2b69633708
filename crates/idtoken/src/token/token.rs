//! Token type holding a structurally parsed ID token
//!
//! Parsing splits the compact `header.payload.signature` form, decodes the
//! header and payload, and exposes the payload as [`Claims`]. The signature
//! is kept but never checked here; callers that verify signatures get the
//! signing input and signature segment from the token.

use crate::claims::Claims;
use crate::error::{Error, Result};
use crate::limits::{
    MAX_ALG_LENGTH, MAX_DECODED_HEADER_SIZE, MAX_DECODED_PAYLOAD_SIZE, MAX_KID_LENGTH,
    MAX_SIGNATURE_B64_SIZE, MAX_TOKEN_LENGTH,
};
use crate::token::TokenHeader;
use crate::utils::base64url;
use crate::utils::bounds::validate_field_size;

/// An ID token whose claims have not been validated
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    header: Option<TokenHeader>,
    claims: Claims,
    raw: Option<String>,
}

impl Token {
    /// Parse a compact token string
    ///
    /// # Example
    /// ```ignore
    /// let token = Token::parse("eyJ...")?;
    /// println!("{:?}", token.claims().subject());
    /// ```
    pub fn parse(token: &str) -> Result<Self> {
        if token.len() > MAX_TOKEN_LENGTH {
            return Err(Error::TokenTooLarge {
                size: token.len(),
                max: MAX_TOKEN_LENGTH,
            });
        }

        let mut parts = token.split('.');
        let header_b64 = parts.next().ok_or(Error::FormatInvalid)?;
        let payload_b64 = parts.next().ok_or(Error::FormatInvalid)?;
        let signature_b64 = parts.next().ok_or(Error::FormatInvalid)?;
        if parts.next().is_some() {
            return Err(Error::FormatInvalid);
        }

        if signature_b64.len() > MAX_SIGNATURE_B64_SIZE {
            return Err(Error::SignatureB64TooLarge {
                size: signature_b64.len(),
                max: MAX_SIGNATURE_B64_SIZE,
            });
        }

        let header_json = base64url::decode_string(header_b64, MAX_DECODED_HEADER_SIZE)?;
        let header: TokenHeader = miniserde::json::from_str(&header_json)
            .map_err(|e| Error::FormatInvalidJson(format!("Failed to parse header: {e}")))?;

        validate_field_size("alg", &header.algorithm, MAX_ALG_LENGTH)?;
        if let Some(kid) = &header.key_id {
            validate_field_size("kid", kid, MAX_KID_LENGTH)?;
        }

        let payload_json = base64url::decode_string(payload_b64, MAX_DECODED_PAYLOAD_SIZE)?;
        let claims = Claims::from_json(&payload_json)?;

        Ok(Self {
            header: Some(header),
            claims,
            raw: Some(token.to_string()),
        })
    }

    /// Build a token from claims that were decoded elsewhere
    pub fn from_claims(claims: Claims) -> Self {
        Self {
            header: None,
            claims,
            raw: None,
        }
    }

    /// Token header, absent for tokens built with [`Token::from_claims`]
    pub fn header(&self) -> Option<&TokenHeader> {
        self.header.as_ref()
    }

    /// All claims
    pub fn claims(&self) -> &Claims {
        &self.claims
    }

    /// Consume the token, keeping only its claims
    pub fn into_claims(self) -> Claims {
        self.claims
    }

    /// The compact string this token was parsed from
    pub fn as_str(&self) -> Option<&str> {
        self.raw.as_deref()
    }

    /// The signed portion (`header.payload`) for signature verification
    pub fn signing_input(&self) -> Option<&str> {
        self.raw
            .as_deref()
            .and_then(|raw| raw.rsplit_once('.'))
            .map(|(input, _)| input)
    }

    /// The Base64URL signature segment
    pub fn signature(&self) -> Option<&str> {
        self.raw
            .as_deref()
            .and_then(|raw| raw.rsplit_once('.'))
            .map(|(_, signature)| signature)
    }

    /// Issuer (iss claim)
    pub fn issuer(&self) -> Option<&str> {
        self.claims.issuer()
    }

    /// Audience (aud claim)
    pub fn audience(&self) -> Option<&str> {
        self.claims.audience()
    }

    /// Subject (sub claim)
    pub fn subject(&self) -> Option<&str> {
        self.claims.subject()
    }

    /// Expiration time (exp claim)
    pub fn expiration(&self) -> Option<i64> {
        self.claims.expiration()
    }

    /// Issued-at time (iat claim)
    pub fn issued_at(&self) -> Option<i64> {
        self.claims.issued_at()
    }
}

impl From<Claims> for Token {
    fn from(claims: Claims) -> Self {
        Token::from_claims(claims)
    }
}

impl std::str::FromStr for Token {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Token::parse(s)
    }
}

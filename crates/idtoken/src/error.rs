//! Errors for idtoken

use thiserror::Error;

/// Why a token's claims were rejected
///
/// Checks run in a fixed order (`exp`, `iat`, `iss`, `aud`) and the first
/// failing check decides the reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InvalidReason {
    /// The `exp` claim is absent or not a number
    MissingExp,
    /// The current time is at or past `exp`
    Expired,
    /// The `iat` claim is absent or not a number
    MissingIat,
    /// `iat` lies after the current time
    IssuedInFuture,
    /// The `iss` claim is absent
    MissingIss,
    /// `iss` is not the project's secure token issuer
    BadIssuer,
    /// The `aud` claim is absent
    MissingAud,
    /// `aud` is not the project identifier
    BadAudience,
}

impl InvalidReason {
    /// Every reason, in check order
    pub const ALL: [InvalidReason; 8] = [
        InvalidReason::MissingExp,
        InvalidReason::Expired,
        InvalidReason::MissingIat,
        InvalidReason::IssuedInFuture,
        InvalidReason::MissingIss,
        InvalidReason::BadIssuer,
        InvalidReason::MissingAud,
        InvalidReason::BadAudience,
    ];

    /// Machine-readable reason code, e.g. `issued_in_future`
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingExp => "missing_exp",
            Self::Expired => "expired",
            Self::MissingIat => "missing_iat",
            Self::IssuedInFuture => "issued_in_future",
            Self::MissingIss => "missing_iss",
            Self::BadIssuer => "bad_issuer",
            Self::MissingAud => "missing_aud",
            Self::BadAudience => "bad_audience",
        }
    }

    /// Human-readable reason, e.g. `issued in future`
    pub fn description(&self) -> &'static str {
        match self {
            Self::MissingExp => "missing exp",
            Self::Expired => "expired",
            Self::MissingIat => "missing iat",
            Self::IssuedInFuture => "issued in future",
            Self::MissingIss => "missing iss",
            Self::BadIssuer => "bad issuer",
            Self::MissingAud => "missing aud",
            Self::BadAudience => "bad audience",
        }
    }

    /// Name of the claim the failing check looked at
    pub fn claim(&self) -> &'static str {
        match self {
            Self::MissingExp | Self::Expired => "exp",
            Self::MissingIat | Self::IssuedInFuture => "iat",
            Self::MissingIss | Self::BadIssuer => "iss",
            Self::MissingAud | Self::BadAudience => "aud",
        }
    }
}

impl std::fmt::Display for InvalidReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.description())
    }
}

/// idtoken Errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    // ============================================================================
    // Claim Errors
    // ============================================================================
    #[error("Invalid ID token: {0}")]
    InvalidToken(InvalidReason),

    // ============================================================================
    // Format Errors
    // ============================================================================
    #[error("Token too large: {size} bytes (maximum: {max} bytes)")]
    TokenTooLarge { size: usize, max: usize },

    #[error("Invalid JWT format: expected three parts separated by '.'")]
    FormatInvalid,

    #[error("Base64URL decoding failed: {0}")]
    FormatInvalidBase64(String),

    #[error("JSON parsing failed: {0}")]
    FormatInvalidJson(String),

    #[error("Signature Base64URL string too large: {size} bytes (maximum: {max} bytes)")]
    SignatureB64TooLarge { size: usize, max: usize },

    #[error("Header field '{field}' too long: {length} bytes (maximum: {max} bytes)")]
    HeaderFieldTooLong {
        field: String,
        length: usize,
        max: usize,
    },

    #[error("Claim '{claim}' too long: {length} bytes (maximum: {max} bytes)")]
    ClaimStringTooLong {
        claim: String,
        length: usize,
        max: usize,
    },

    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Invalid configuration: {0}")]
    ConfigurationInvalid(String),
}

impl Error {
    /// The claim rejection reason, if this is an `InvalidToken` error
    pub fn reason(&self) -> Option<InvalidReason> {
        match self {
            Error::InvalidToken(reason) => Some(*reason),
            _ => None,
        }
    }
}

impl From<InvalidReason> for Error {
    fn from(reason: InvalidReason) -> Self {
        Error::InvalidToken(reason)
    }
}

/// Result type alias for idtoken operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reason_codes_are_distinct() {
        let mut codes: Vec<&str> = InvalidReason::ALL.iter().map(|r| r.code()).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), InvalidReason::ALL.len());
    }

    #[test]
    fn test_reason_display() {
        assert_eq!(InvalidReason::MissingExp.to_string(), "missing exp");
        assert_eq!(InvalidReason::IssuedInFuture.to_string(), "issued in future");
        assert_eq!(InvalidReason::BadAudience.code(), "bad_audience");
        assert_eq!(InvalidReason::BadIssuer.claim(), "iss");
    }

    #[test]
    fn test_error_reason() {
        let err = Error::from(InvalidReason::Expired);
        assert_eq!(err.reason(), Some(InvalidReason::Expired));
        assert_eq!(err.to_string(), "Invalid ID token: expired");
        assert_eq!(Error::FormatInvalid.reason(), None);
    }
}

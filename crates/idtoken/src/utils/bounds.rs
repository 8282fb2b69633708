//! Bounds validation utilities

use crate::error::{Error, Result};

/// Validate header field size
pub(crate) fn validate_field_size(field: &str, value: &str, max: usize) -> Result<()> {
    if value.len() > max {
        return Err(Error::HeaderFieldTooLong {
            field: field.into(),
            length: value.len(),
            max,
        });
    }
    Ok(())
}

/// Validate string claim length
pub(crate) fn validate_claim_size(claim: &str, value: &str, max: usize) -> Result<()> {
    if value.len() > max {
        return Err(Error::ClaimStringTooLong {
            claim: claim.into(),
            length: value.len(),
            max,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_size() {
        assert!(validate_field_size("alg", "RS256", 16).is_ok());
        assert_eq!(
            validate_field_size("kid", "abcd", 3),
            Err(Error::HeaderFieldTooLong {
                field: "kid".into(),
                length: 4,
                max: 3,
            })
        );
    }

    #[test]
    fn test_claim_size() {
        assert!(validate_claim_size("iss", "", 0).is_ok());
        assert!(matches!(
            validate_claim_size("aud", "project", 3),
            Err(Error::ClaimStringTooLong { length: 7, .. })
        ));
    }
}

//! Size limit constants for input validation

/// Maximum length for a compact token string (64KB)
pub(crate) const MAX_TOKEN_LENGTH: usize = 64 * 1024;

// ============================================================================
// Decoded segment size limits
// ============================================================================

/// Maximum size for decoded header JSON (8KB)
pub(crate) const MAX_DECODED_HEADER_SIZE: usize = 8 * 1024;

/// Maximum size for decoded payload JSON (64KB)
pub(crate) const MAX_DECODED_PAYLOAD_SIZE: usize = 64 * 1024;

/// Maximum size for the Base64URL-encoded signature segment (1.5KB)
/// Firebase signs with RS256, a 256 byte signature encodes to 342 characters
pub(crate) const MAX_SIGNATURE_B64_SIZE: usize = 1536;

// ============================================================================
// Header field size limits
// ============================================================================

/// Maximum length for the `alg` header field
pub(crate) const MAX_ALG_LENGTH: usize = 16;

/// Maximum length for the `kid` header field
pub(crate) const MAX_KID_LENGTH: usize = 256;

// ============================================================================
// Claim string length limits
// ============================================================================

/// Maximum length for string claims (iss, sub, aud, jti)
pub(crate) const MAX_CLAIM_STRING_LENGTH: usize = 2048;

/// Maximum size for a service account document (64KB)
pub(crate) const MAX_SERVICE_ACCOUNT_SIZE: usize = 64 * 1024;

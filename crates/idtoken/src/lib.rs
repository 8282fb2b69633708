//! Claims validation for Firebase ID tokens.
//!
//! An ID token issued by Firebase Authentication is only acceptable for a
//! project when its claims line up with that project:
//!
//! - `exp` is present and lies after the current time
//! - `iat` is present and does not lie after the current time
//! - `iss` is exactly `https://securetoken.google.com/{project_id}`
//! - `aud` is exactly `{project_id}`
//!
//! The checks run in that order and the first failure is reported as
//! [`Error::InvalidToken`] with an [`InvalidReason`]. Validation never reads
//! the clock; the current time is passed in.
//!
//! Signature verification is not done here. [`Token::parse`] only decodes
//! the compact form and keeps the signing input and signature around for a
//! verifier of your choice.
//!
//! ```ignore
//! use idtoken::{TokenValidator, TrustedIssuerConfig, unix_now};
//!
//! let validator = TokenValidator::new(TrustedIssuerConfig::from_env()?);
//! let token = validator.verify(token_str, unix_now())?;
//! println!("uid: {:?}", token.subject());
//! ```

mod error;

// Internal modules
pub(crate) mod claims;
pub(crate) mod config;
pub(crate) mod limits;
pub(crate) mod token;
pub(crate) mod utils;
pub(crate) mod validator;

// Public Interface
pub use claims::{ClaimValue, Claims};
pub use config::{CREDENTIALS_VARS, ISSUER_PREFIX, PROJECT_ID_VARS, TrustedIssuerConfig};
pub use error::{Error, InvalidReason, Result};
pub use token::{Token, TokenHeader, ValidatedToken};
pub use utils::time::unix_now;
pub use validator::TokenValidator;

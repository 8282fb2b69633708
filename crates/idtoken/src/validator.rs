use crate::claims::{AUDIENCE, Claims, EXPIRATION, ISSUED_AT, ISSUER};
use crate::config::TrustedIssuerConfig;
use crate::error::{InvalidReason, Result};
use crate::token::{Token, ValidatedToken};
use std::sync::Arc;

/// Firebase ID token validator
///
/// The validator is configured once per project and reused for any number of
/// tokens. It holds only immutable configuration and can be cloned or shared
/// across threads freely.
///
/// Checks run in a fixed order and the first failure wins:
///
/// ```text
/// Unchecked
///     │ exp present, now < exp
///     ▼
///     │ iat present, iat <= now
///     ▼
///     │ iss == https://securetoken.google.com/{project}
///     ▼
///     │ aud == {project}
///     ▼
/// Validated
/// ```
#[derive(Debug, Clone)]
pub struct TokenValidator {
    config: Arc<TrustedIssuerConfig>,
    expected_issuer: Arc<str>,
}

impl TokenValidator {
    /// Create a validator for a trusted project
    pub fn new(config: TrustedIssuerConfig) -> Self {
        let expected_issuer = config.expected_issuer().into();
        Self {
            config: Arc::new(config),
            expected_issuer,
        }
    }

    /// Create a validator directly from a project id
    pub fn for_project(project_id: impl Into<String>) -> Result<Self> {
        TrustedIssuerConfig::new(project_id).map(Self::new)
    }

    /// The trusted configuration
    pub fn config(&self) -> &TrustedIssuerConfig {
        &self.config
    }

    /// The only accepted `iss` value
    pub fn expected_issuer(&self) -> &str {
        &self.expected_issuer
    }

    /// The only accepted `aud` value
    pub fn expected_audience(&self) -> &str {
        self.config.expected_audience()
    }
}

impl TokenValidator {
    /// Validate a token's claims at time `now` (Unix seconds)
    ///
    /// On success the token is returned unchanged, marked as validated.
    pub fn validate(&self, token: Token, now: i64) -> Result<ValidatedToken> {
        self.check(token.claims(), now)?;
        Ok(ValidatedToken::new(token))
    }

    /// Parse a compact token string and validate its claims
    ///
    /// Parsing is structural only; the signature is not verified.
    pub fn verify(&self, token: &str, now: i64) -> Result<ValidatedToken> {
        let token = Token::parse(token)?;
        self.validate(token, now)
    }

    /// Run the claim checks without taking ownership of the token
    pub fn check(&self, claims: &Claims, now: i64) -> std::result::Result<(), InvalidReason> {
        let result = self.run_checks(claims, now);

        match &result {
            Ok(()) => tracing::debug!(
                iss = claims.issuer().unwrap_or_default(),
                now,
                "ID token claims valid"
            ),
            Err(reason) => tracing::debug!(
                reason = reason.code(),
                iss = claims.issuer().unwrap_or_default(),
                aud = claims.audience().unwrap_or_default(),
                now,
                "ID token claims rejected"
            ),
        }

        result
    }

    fn run_checks(&self, claims: &Claims, now: i64) -> std::result::Result<(), InvalidReason> {
        // 1. Expiry
        let exp = claims
            .timestamp(EXPIRATION)
            .ok_or(InvalidReason::MissingExp)?;
        if now >= exp {
            return Err(InvalidReason::Expired);
        }

        // 2. Issued-at
        let iat = claims
            .timestamp(ISSUED_AT)
            .ok_or(InvalidReason::MissingIat)?;
        if iat > now {
            return Err(InvalidReason::IssuedInFuture);
        }

        // 3. Issuer
        let iss = claims.get(ISSUER).ok_or(InvalidReason::MissingIss)?;
        if iss.as_str() != Some(self.expected_issuer()) {
            return Err(InvalidReason::BadIssuer);
        }

        // 4. Audience
        let aud = claims.get(AUDIENCE).ok_or(InvalidReason::MissingAud)?;
        if aud.as_str() != Some(self.expected_audience()) {
            return Err(InvalidReason::BadAudience);
        }

        Ok(())
    }
}

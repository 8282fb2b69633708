//! Trusted issuer configuration
//!
//! A Firebase project is identified by its project id. The id decides both
//! the only accepted issuer (`https://securetoken.google.com/{id}`) and the
//! only accepted audience.

use crate::error::{Error, Result};
use crate::limits::{MAX_CLAIM_STRING_LENGTH, MAX_SERVICE_ACCOUNT_SIZE};
use miniserde::Deserialize;
use std::path::Path;

/// Issuer prefix for Firebase ID tokens
pub const ISSUER_PREFIX: &str = "https://securetoken.google.com/";

/// Variables holding a project id, consulted first by [`TrustedIssuerConfig::from_env`]
pub const PROJECT_ID_VARS: [&str; 2] = ["FIREBASE_PROJECT_ID", "GOOGLE_CLOUD_PROJECT"];
/// Variables holding a service account path, consulted when no project id is set
pub const CREDENTIALS_VARS: [&str; 2] = ["FIREBASE_CREDENTIALS", "GOOGLE_APPLICATION_CREDENTIALS"];

#[derive(Deserialize)]
struct ServiceAccount {
    #[serde(rename = "type")]
    account_type: Option<String>,
    project_id: Option<String>,
}

/// The project whose tokens are trusted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrustedIssuerConfig {
    project_id: String,
}

impl TrustedIssuerConfig {
    /// Trust tokens issued for `project_id`
    ///
    /// The id must be non-empty and free of whitespace and `/`, since it is
    /// spliced into the issuer URL.
    pub fn new(project_id: impl Into<String>) -> Result<Self> {
        let project_id = project_id.into();

        if project_id.is_empty() {
            return Err(Error::ConfigurationInvalid(
                "project id must not be empty".into(),
            ));
        }
        if project_id.len() > MAX_CLAIM_STRING_LENGTH - ISSUER_PREFIX.len() {
            return Err(Error::ConfigurationInvalid(format!(
                "project id too long: {} bytes",
                project_id.len()
            )));
        }
        if project_id
            .chars()
            .any(|c| c.is_whitespace() || c == '/')
        {
            return Err(Error::ConfigurationInvalid(format!(
                "project id '{project_id}' contains whitespace or '/'"
            )));
        }

        Ok(Self { project_id })
    }

    /// Read the project id from a Google service account document
    pub fn from_service_account_json(document: &str) -> Result<Self> {
        if document.len() > MAX_SERVICE_ACCOUNT_SIZE {
            return Err(Error::ConfigurationInvalid(format!(
                "service account document too large: {} bytes",
                document.len()
            )));
        }

        let account: ServiceAccount = miniserde::json::from_str(document).map_err(|e| {
            Error::ConfigurationInvalid(format!("service account is not valid JSON: {e}"))
        })?;

        if let Some(kind) = account.account_type.as_deref() {
            if kind != "service_account" {
                return Err(Error::ConfigurationInvalid(format!(
                    "credentials of type '{kind}' are not a service account"
                )));
            }
        }

        let project_id = account.project_id.ok_or_else(|| {
            Error::ConfigurationInvalid("service account has no project_id".into())
        })?;

        Self::new(project_id)
    }

    /// Read the project id from a service account file
    pub fn from_service_account_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let document = std::fs::read_to_string(path).map_err(|e| {
            Error::ConfigurationInvalid(format!(
                "cannot read service account {}: {e}",
                path.display()
            ))
        })?;

        tracing::debug!(path = %path.display(), "loaded service account");
        Self::from_service_account_json(&document)
    }

    /// Resolve the project from the process environment
    ///
    /// See [`TrustedIssuerConfig::from_lookup`] for the resolution order.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve the project through a variable lookup
    ///
    /// Explicit project ids (`FIREBASE_PROJECT_ID`, `GOOGLE_CLOUD_PROJECT`)
    /// win over service account paths (`FIREBASE_CREDENTIALS`,
    /// `GOOGLE_APPLICATION_CREDENTIALS`). Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        for key in PROJECT_ID_VARS {
            if let Some(project_id) = lookup(key) {
                tracing::debug!(source = key, "resolved project id");
                return Self::new(project_id.trim());
            }
        }

        for key in CREDENTIALS_VARS {
            if let Some(path) = lookup(key) {
                tracing::debug!(source = key, "resolving project id from service account");
                return Self::from_service_account_file(path.trim());
            }
        }

        Err(Error::ConfigurationInvalid(format!(
            "no project configured: set one of {}",
            PROJECT_ID_VARS
                .iter()
                .chain(CREDENTIALS_VARS.iter())
                .copied()
                .collect::<Vec<_>>()
                .join(", ")
        )))
    }

    /// The trusted project id
    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    /// The only accepted `iss` value
    pub fn expected_issuer(&self) -> String {
        format!("{ISSUER_PREFIX}{}", self.project_id)
    }

    /// The only accepted `aud` value
    pub fn expected_audience(&self) -> &str {
        &self.project_id
    }
}

impl std::str::FromStr for TrustedIssuerConfig {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

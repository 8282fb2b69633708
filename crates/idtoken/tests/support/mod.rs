//! Token generation utilities for integration tests
//!
//! Builds compact ID tokens with a fluent API. Signatures are random-looking
//! filler; nothing in this crate checks them.

#![allow(dead_code)]

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use serde_json::{Map, Value, json};

pub const PROJECT_ID: &str = "proj1";
pub const ISSUER: &str = "https://securetoken.google.com/proj1";
pub const NOW: i64 = 1_700_000_000;

/// Fluent builder for compact tokens
pub struct TokenBuilder {
    header: Value,
    claims: Map<String, Value>,
}

impl TokenBuilder {
    pub fn new() -> Self {
        Self {
            header: json!({"alg": "RS256", "kid": "test-key", "typ": "JWT"}),
            claims: Map::new(),
        }
    }

    /// Claims of a token Firebase would issue for `PROJECT_ID` at `NOW`
    pub fn firebase_valid() -> Self {
        Self::new()
            .claim("exp", json!(NOW + 3600))
            .claim("iat", json!(NOW - 10))
            .claim("auth_time", json!(NOW - 10))
            .claim("iss", json!(ISSUER))
            .claim("aud", json!(PROJECT_ID))
            .claim("sub", json!("BUY08JMkhKPnOjEagHsNiAZm9K73"))
            .claim("user_id", json!("BUY08JMkhKPnOjEagHsNiAZm9K73"))
            .claim(
                "firebase",
                json!({"identities": {}, "sign_in_provider": "custom"}),
            )
    }

    pub fn header(mut self, header: Value) -> Self {
        self.header = header;
        self
    }

    pub fn claim(mut self, name: &str, value: Value) -> Self {
        self.claims.insert(name.to_string(), value);
        self
    }

    pub fn without(mut self, name: &str) -> Self {
        self.claims.remove(name);
        self
    }

    pub fn build(&self) -> String {
        let header = URL_SAFE_NO_PAD.encode(self.header.to_string());
        let payload = URL_SAFE_NO_PAD.encode(Value::Object(self.claims.clone()).to_string());
        let signature = URL_SAFE_NO_PAD.encode([0x5a_u8; 256]);
        format!("{header}.{payload}.{signature}")
    }
}

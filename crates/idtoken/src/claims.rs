//! Claim values and the claim map carried by a token
//!
//! A token payload is a JSON object. Each member becomes a [`ClaimValue`];
//! `null` members are dropped so that a `null` claim reads as absent.

use crate::error::{Error, Result};
use crate::limits::MAX_CLAIM_STRING_LENGTH;
use crate::utils::bounds::validate_claim_size;
use miniserde::json::{self, Number, Object, Value};
use std::collections::BTreeMap;

/// Expiration Time (exp)
pub const EXPIRATION: &str = "exp";
/// Issued At (iat)
pub const ISSUED_AT: &str = "iat";
/// Issuer (iss)
pub const ISSUER: &str = "iss";
/// Audience (aud)
pub const AUDIENCE: &str = "aud";
/// Subject (sub)
pub const SUBJECT: &str = "sub";
/// JWT ID (jti)
pub const JWT_ID: &str = "jti";

/// A single claim value
#[derive(Debug, Clone, PartialEq)]
pub enum ClaimValue {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    /// Arrays and objects, kept as compact JSON text
    Structured(String),
}

impl ClaimValue {
    /// The value as a string, if it is one
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ClaimValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// The value as a NumericDate in whole Unix seconds
    ///
    /// Fractional values round up, so `now >= exp` and `iat > now` give the
    /// same answer on the rounded value as on the original. Non-numbers
    /// yield `None`.
    pub fn as_timestamp(&self) -> Option<i64> {
        match self {
            ClaimValue::Integer(v) => Some(*v),
            ClaimValue::Float(v) if v.is_finite() => Some(v.ceil() as i64),
            _ => None,
        }
    }

    fn from_json(value: Value) -> Option<Self> {
        Some(match value {
            Value::Null => return None,
            Value::Bool(b) => ClaimValue::Boolean(b),
            Value::String(s) => ClaimValue::String(s),
            Value::Number(Number::I64(n)) => ClaimValue::Integer(n),
            Value::Number(Number::U64(n)) => match i64::try_from(n) {
                Ok(n) => ClaimValue::Integer(n),
                Err(_) => ClaimValue::Float(n as f64),
            },
            Value::Number(Number::F64(n)) => ClaimValue::Float(n),
            structured @ (Value::Array(_) | Value::Object(_)) => {
                ClaimValue::Structured(json::to_string(&structured))
            }
        })
    }

    fn to_json(&self) -> Value {
        match self {
            ClaimValue::String(s) => Value::String(s.clone()),
            ClaimValue::Integer(n) => Value::Number(Number::I64(*n)),
            ClaimValue::Float(n) => Value::Number(Number::F64(*n)),
            ClaimValue::Boolean(b) => Value::Bool(*b),
            ClaimValue::Structured(raw) => {
                json::from_str(raw).unwrap_or_else(|_| Value::String(raw.clone()))
            }
        }
    }
}

impl std::fmt::Display for ClaimValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClaimValue::String(s) => f.write_str(s),
            ClaimValue::Integer(n) => write!(f, "{n}"),
            ClaimValue::Float(n) => write!(f, "{n}"),
            ClaimValue::Boolean(b) => write!(f, "{b}"),
            ClaimValue::Structured(raw) => f.write_str(raw),
        }
    }
}

impl From<&str> for ClaimValue {
    fn from(value: &str) -> Self {
        ClaimValue::String(value.to_string())
    }
}

impl From<String> for ClaimValue {
    fn from(value: String) -> Self {
        ClaimValue::String(value)
    }
}

impl From<i64> for ClaimValue {
    fn from(value: i64) -> Self {
        ClaimValue::Integer(value)
    }
}

impl From<i32> for ClaimValue {
    fn from(value: i32) -> Self {
        ClaimValue::Integer(value.into())
    }
}

impl From<f64> for ClaimValue {
    fn from(value: f64) -> Self {
        ClaimValue::Float(value)
    }
}

impl From<bool> for ClaimValue {
    fn from(value: bool) -> Self {
        ClaimValue::Boolean(value)
    }
}

/// Mapping from claim name to claim value
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Claims {
    entries: BTreeMap<String, ClaimValue>,
}

impl Claims {
    /// Create an empty claim set
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a claim, builder style
    pub fn with(mut self, name: impl Into<String>, value: impl Into<ClaimValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Insert or replace a claim, returning the previous value
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        value: impl Into<ClaimValue>,
    ) -> Option<ClaimValue> {
        self.entries.insert(name.into(), value.into())
    }

    /// Remove a claim
    pub fn remove(&mut self, name: &str) -> Option<ClaimValue> {
        self.entries.remove(name)
    }

    /// Look up a claim by name
    pub fn get(&self, name: &str) -> Option<&ClaimValue> {
        self.entries.get(name)
    }

    /// Check whether a claim is present
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// A claim's value if it is a string
    pub fn string(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(ClaimValue::as_str)
    }

    /// A claim's value as a NumericDate, see [`ClaimValue::as_timestamp`]
    pub fn timestamp(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(ClaimValue::as_timestamp)
    }

    /// Issuer (iss)
    pub fn issuer(&self) -> Option<&str> {
        self.string(ISSUER)
    }

    /// Audience (aud)
    pub fn audience(&self) -> Option<&str> {
        self.string(AUDIENCE)
    }

    /// Subject (sub), the Firebase user id
    pub fn subject(&self) -> Option<&str> {
        self.string(SUBJECT)
    }

    /// Expiration Time (exp)
    pub fn expiration(&self) -> Option<i64> {
        self.timestamp(EXPIRATION)
    }

    /// Issued At (iat)
    pub fn issued_at(&self) -> Option<i64> {
        self.timestamp(ISSUED_AT)
    }

    /// Number of claims present
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the token carries no claims at all
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate claims in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ClaimValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Parse a JSON object into claims
    ///
    /// String claims that identify principals (`iss`, `sub`, `aud`, `jti`)
    /// are bounded in length.
    pub fn from_json(payload: &str) -> Result<Self> {
        let value: Value = json::from_str(payload)
            .map_err(|e| Error::FormatInvalidJson(format!("Failed to parse payload: {e}")))?;

        let Value::Object(mut object) = value else {
            return Err(Error::FormatInvalidJson(
                "Payload is not a JSON object".into(),
            ));
        };

        let mut claims = Claims::new();
        // Move values out; cloning a nested Value recurses once per level
        for (name, value) in std::mem::take(&mut *object) {
            if let Some(value) = ClaimValue::from_json(value) {
                claims.entries.insert(name, value);
            }
        }

        claims.validate_string_lengths()?;
        Ok(claims)
    }

    /// Serialize claims as a compact JSON object
    pub fn to_json(&self) -> String {
        let mut object = Object::new();
        for (name, value) in &self.entries {
            object.insert(name.clone(), value.to_json());
        }
        json::to_string(&Value::Object(object))
    }

    fn validate_string_lengths(&self) -> Result<()> {
        for name in [ISSUER, SUBJECT, AUDIENCE, JWT_ID] {
            if let Some(value) = self.string(name) {
                validate_claim_size(name, value, MAX_CLAIM_STRING_LENGTH)?;
            }
        }
        Ok(())
    }
}

impl<K, V> FromIterator<(K, V)> for Claims
where
    K: Into<String>,
    V: Into<ClaimValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut claims = Claims::new();
        for (name, value) in iter {
            claims.insert(name, value);
        }
        claims
    }
}

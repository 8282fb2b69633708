use crate::token::Token;
use std::ops::Deref;

/// A token whose `exp`, `iat`, `iss` and `aud` claims have been validated
///
/// Only [`TokenValidator`](crate::TokenValidator) creates values of this
/// type. The wrapped token is passed through unchanged; all accessors of
/// [`Token`] are available through `Deref`.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedToken {
    token: Token,
}

impl ValidatedToken {
    pub(crate) fn new(token: Token) -> Self {
        Self { token }
    }

    /// The validated token
    pub fn token(&self) -> &Token {
        &self.token
    }

    /// Drop the validation marker and return the token
    pub fn into_inner(self) -> Token {
        self.token
    }
}

impl Deref for ValidatedToken {
    type Target = Token;

    fn deref(&self) -> &Token {
        &self.token
    }
}

impl AsRef<Token> for ValidatedToken {
    fn as_ref(&self) -> &Token {
        &self.token
    }
}

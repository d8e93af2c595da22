use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::{error::DomainError, models::account::Identifier};

/// Value object representing a hashed password
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashedPassword(String);

impl HashedPassword {
    /// Create a new HashedPassword from an already hashed string
    pub fn new(hash: String) -> Self {
        Self(hash)
    }

    /// Get the hash as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Plaintext secret presented at login or registration.
///
/// Not `Serialize` or `Display`. `Debug` is redacted.
#[derive(Clone)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: String) -> Result<Self, DomainError> {
        if value.is_empty() {
            return Err(DomainError::EmptySecret);
        }
        Ok(Self(value))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Length in characters, not bytes
    pub fn char_len(&self) -> usize {
        self.0.chars().count()
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret([REDACTED])")
    }
}

/// Identifier and secret of a single verification attempt.
#[derive(Debug)]
pub struct Credential {
    identifier: Identifier,
    secret: Secret,
}

impl Credential {
    pub fn new(identifier: String, secret: String) -> Result<Self, DomainError> {
        Ok(Self {
            identifier: Identifier::new(identifier)?,
            secret: Secret::new(secret)?,
        })
    }

    pub fn identifier(&self) -> &Identifier {
        &self.identifier
    }

    pub fn secret(&self) -> &Secret {
        &self.secret
    }
}

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{error::DomainError, models::credential::HashedPassword};

pub type Authority = String;

pub const DEFAULT_AUTHORITY: &str = "USER";

/// Login identifier (an email address in practice).
///
/// Stored trimmed and lowercased so that lookups compare case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub struct Identifier(String);

impl Identifier {
    pub fn new(value: impl AsRef<str>) -> Result<Self, DomainError> {
        let normalized = value.as_ref().trim().to_lowercase();
        if normalized.is_empty() {
            return Err(DomainError::EmptyIdentifier);
        }
        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Identifier {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccountId(Uuid);

impl AccountId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for AccountId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Account as handed over by the persistence layer. Read-only for the verifier.
#[derive(Debug, Clone)]
pub struct Account {
    id: AccountId,
    identifier: Identifier,
    password_hash: HashedPassword,
    authorities: Vec<Authority>,
}

impl Account {
    pub fn new(
        id: AccountId,
        identifier: Identifier,
        password_hash: HashedPassword,
        authorities: Vec<Authority>,
    ) -> Self {
        Self {
            id,
            identifier,
            password_hash,
            authorities,
        }
    }

    pub fn id(&self) -> &AccountId {
        &self.id
    }
    pub fn identifier(&self) -> &Identifier {
        &self.identifier
    }
    pub fn password_hash(&self) -> &HashedPassword {
        &self.password_hash
    }
    pub fn authorities(&self) -> &[Authority] {
        &self.authorities
    }
}

use crate::domain::{
    error::DomainError,
    models::credential::{HashedPassword, Secret},
};

/// Service for hashing and verifying secrets.
///
/// Calls are CPU bound; callers move them off the async workers.
pub trait SecretHasher: Send + Sync + 'static {
    /// Hash a plain text secret with a fresh salt
    fn hash(&self, secret: &Secret) -> Result<HashedPassword, DomainError>;

    /// Verify a plain text secret against a stored hash.
    /// `Ok(false)` on mismatch; `Err` only when the hash cannot be processed.
    fn verify(&self, secret: &Secret, hashed_password: &HashedPassword) -> Result<bool, DomainError>;
}

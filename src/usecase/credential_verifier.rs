use std::sync::Arc;

use tokio::task;
use tracing::debug;

use crate::domain::{
    error::DomainError,
    models::{
        account::Identifier,
        credential::{HashedPassword, Secret},
        verification::{RejectionReason, VerificationResult},
    },
    repositories::account_repository::AccountLookup,
    services::password_service::SecretHasher,
};

/// Resolves an account and checks a presented secret against its stored hash.
///
/// Stateless apart from its collaborators; one instance serves all
/// concurrent requests. Hashing runs on the blocking pool.
pub struct CredentialVerifier<A: AccountLookup, P: SecretHasher> {
    account_lookup: A,
    secret_hasher: Arc<P>,
}

impl<A: AccountLookup, P: SecretHasher> CredentialVerifier<A, P> {
    pub fn new(account_lookup: A, secret_hasher: P) -> Self {
        Self {
            account_lookup,
            secret_hasher: Arc::new(secret_hasher),
        }
    }

    /// Decide whether `secret` is valid for the account named by `identifier`.
    ///
    /// A missing account is a rejection, not an error. An unreachable store
    /// surfaces as [`DomainError::LookupFailed`] and a hash the hasher cannot
    /// process as [`DomainError::HashingFailed`].
    pub async fn verify(
        &self,
        identifier: &Identifier,
        secret: &Secret,
    ) -> Result<VerificationResult, DomainError> {
        let account = self
            .account_lookup
            .find_by_identifier(identifier)
            .await
            .map_err(DomainError::LookupFailed)?;

        let Some(account) = account else {
            debug!(%identifier, "no account for identifier");
            return Ok(VerificationResult::Rejected(RejectionReason::NotFound));
        };

        let hasher = Arc::clone(&self.secret_hasher);
        let secret = secret.clone();
        let stored = account.password_hash().clone();
        let matched = task::spawn_blocking(move || hasher.verify(&secret, &stored))
            .await
            .map_err(|e| DomainError::HashingFailed(e.to_string()))??;

        if matched {
            debug!(%identifier, "secret verified");
            Ok(VerificationResult::Authenticated(account))
        } else {
            debug!(%identifier, "secret mismatch");
            Ok(VerificationResult::Rejected(RejectionReason::BadSecret))
        }
    }

    /// Produce the stored form of a new secret. Used at account creation only.
    pub async fn hash_secret(&self, secret: &Secret) -> Result<HashedPassword, DomainError> {
        let hasher = Arc::clone(&self.secret_hasher);
        let secret = secret.clone();
        task::spawn_blocking(move || hasher.hash(&secret))
            .await
            .map_err(|e| DomainError::HashingFailed(e.to_string()))?
    }
}

use async_trait::async_trait;

use crate::domain::{
    error::RepositoryError,
    models::{
        account::{Account, Authority, Identifier},
        credential::HashedPassword,
    },
};

/// Repository for account creation
#[async_trait]
pub trait AccountRegistrationRepository: Send + Sync {
    /// Persist a new account. Fails with `AlreadyExists` if the identifier is taken.
    async fn register_account(
        &self,
        identifier: &Identifier,
        password_hash: HashedPassword,
        authorities: Vec<Authority>,
    ) -> Result<Account, RepositoryError>;
}

use async_trait::async_trait;

use crate::domain::{
    error::RepositoryError,
    models::account::{Account, Identifier},
};

/// Read side of account persistence used on the login path
#[async_trait]
pub trait AccountLookup: Send + Sync {
    /// `Ok(None)` when no account matches; `Err` only when the store could not be queried
    async fn find_by_identifier(
        &self,
        identifier: &Identifier,
    ) -> Result<Option<Account>, RepositoryError>;
}

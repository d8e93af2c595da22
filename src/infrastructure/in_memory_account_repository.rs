use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::{
    error::RepositoryError,
    models::{
        account::{Account, AccountId, Authority, Identifier},
        credential::HashedPassword,
    },
    repositories::{
        account_registration_repository::AccountRegistrationRepository,
        account_repository::AccountLookup,
    },
};

/// Process-local account store. Clones share the same map.
#[derive(Clone, Default)]
pub struct InMemoryAccountRepository {
    accounts: Arc<RwLock<HashMap<Identifier, Account>>>,
}

impl InMemoryAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountLookup for InMemoryAccountRepository {
    async fn find_by_identifier(
        &self,
        identifier: &Identifier,
    ) -> Result<Option<Account>, RepositoryError> {
        Ok(self.accounts.read().await.get(identifier).cloned())
    }
}

#[async_trait]
impl AccountRegistrationRepository for InMemoryAccountRepository {
    async fn register_account(
        &self,
        identifier: &Identifier,
        password_hash: HashedPassword,
        authorities: Vec<Authority>,
    ) -> Result<Account, RepositoryError> {
        let mut accounts = self.accounts.write().await;
        if accounts.contains_key(identifier) {
            return Err(RepositoryError::AlreadyExists);
        }

        let account = Account::new(AccountId::new(), identifier.clone(), password_hash, authorities);
        accounts.insert(identifier.clone(), account.clone());
        Ok(account)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hash() -> HashedPassword {
        HashedPassword::new("$argon2id$stub".to_string())
    }

    #[tokio::test]
    async fn lookup_returns_registered_account() {
        let repository = InMemoryAccountRepository::new();
        let identifier = Identifier::new("alice@example.com").unwrap();
        let created = repository
            .register_account(&identifier, hash(), vec!["USER".to_string()])
            .await
            .unwrap();

        let found = repository.find_by_identifier(&identifier).await.unwrap().unwrap();

        assert_eq!(found.id(), created.id());
        assert_eq!(found.password_hash(), &hash());
    }

    #[tokio::test]
    async fn lookup_miss_is_none() {
        let repository = InMemoryAccountRepository::new();
        let identifier = Identifier::new("bob@example.com").unwrap();

        assert!(repository.find_by_identifier(&identifier).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn clones_share_storage() {
        let repository = InMemoryAccountRepository::new();
        let other = repository.clone();
        let identifier = Identifier::new("alice@example.com").unwrap();
        repository.register_account(&identifier, hash(), vec![]).await.unwrap();

        assert!(other.find_by_identifier(&identifier).await.unwrap().is_some());
        assert!(matches!(
            other.register_account(&identifier, hash(), vec![]).await,
            Err(RepositoryError::AlreadyExists)
        ));
    }
}

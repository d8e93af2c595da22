use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveValue::Set, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, SqlErr,
};
use tracing::warn;

use crate::{
    domain::{
        error::RepositoryError,
        models::{
            account::{Account, AccountId, Authority, Identifier},
            credential::HashedPassword,
        },
        repositories::{
            account_registration_repository::AccountRegistrationRepository,
            account_repository::AccountLookup,
        },
    },
    infrastructure::entity::accounts,
};

const AUTHORITY_SEPARATOR: &str = ",";

/// Clones share one connection pool
#[derive(Clone)]
pub struct SeaOrmAccountRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmAccountRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db: Arc::new(db) }
    }
}

fn to_domain(model: accounts::Model) -> Result<Account, RepositoryError> {
    let identifier = Identifier::new(&model.email)
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;
    let authorities = model
        .authorities
        .split(AUTHORITY_SEPARATOR)
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .map(str::to_string)
        .collect();

    Ok(Account::new(
        AccountId::from_uuid(model.id),
        identifier,
        HashedPassword::new(model.password_hash),
        authorities,
    ))
}

fn map_insert_error(err: DbErr) -> RepositoryError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => RepositoryError::AlreadyExists,
        _ => RepositoryError::DatabaseError(err.to_string()),
    }
}

#[async_trait]
impl AccountLookup for SeaOrmAccountRepository {
    async fn find_by_identifier(
        &self,
        identifier: &Identifier,
    ) -> Result<Option<Account>, RepositoryError> {
        let model = accounts::Entity::find()
            .filter(accounts::Column::Email.eq(identifier.as_str()))
            .one(self.db.as_ref())
            .await
            .map_err(|e| {
                warn!(error = %e, "account query failed");
                RepositoryError::DatabaseError(e.to_string())
            })?;

        model.map(to_domain).transpose()
    }
}

#[async_trait]
impl AccountRegistrationRepository for SeaOrmAccountRepository {
    async fn register_account(
        &self,
        identifier: &Identifier,
        password_hash: HashedPassword,
        authorities: Vec<Authority>,
    ) -> Result<Account, RepositoryError> {
        let id = AccountId::new();
        let now = Utc::now().fixed_offset();
        let model = accounts::ActiveModel {
            id: Set(*id.as_uuid()),
            email: Set(identifier.as_str().to_string()),
            password_hash: Set(password_hash.as_str().to_string()),
            authorities: Set(authorities.join(AUTHORITY_SEPARATOR)),
            created_at: Set(now),
            updated_at: Set(now),
        };

        accounts::Entity::insert(model)
            .exec_without_returning(self.db.as_ref())
            .await
            .map_err(map_insert_error)?;

        Ok(Account::new(id, identifier.clone(), password_hash, authorities))
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
    use uuid::Uuid;

    use super::*;

    fn model(email: &str, authorities: &str) -> accounts::Model {
        let now = Utc::now().fixed_offset();
        accounts::Model {
            id: Uuid::new_v4(),
            email: email.to_string(),
            password_hash: "$argon2id$stub".to_string(),
            authorities: authorities.to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    fn identifier(value: &str) -> Identifier {
        Identifier::new(value).unwrap()
    }

    #[tokio::test]
    async fn lookup_maps_row_to_account() {
        let row = model("alice@example.com", "USER, ADMIN");
        let db = MockDatabase::new(DatabaseBackend::MySql)
            .append_query_results([vec![row.clone()]])
            .into_connection();
        let repository = SeaOrmAccountRepository::new(db);

        let account = repository
            .find_by_identifier(&identifier("alice@example.com"))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(account.id().as_uuid(), &row.id);
        assert_eq!(account.identifier().as_str(), "alice@example.com");
        assert_eq!(account.password_hash().as_str(), "$argon2id$stub");
        assert_eq!(account.authorities(), ["USER".to_string(), "ADMIN".to_string()]);
    }

    #[tokio::test]
    async fn lookup_miss_is_none() {
        let db = MockDatabase::new(DatabaseBackend::MySql)
            .append_query_results([Vec::<accounts::Model>::new()])
            .into_connection();
        let repository = SeaOrmAccountRepository::new(db);

        let account = repository
            .find_by_identifier(&identifier("bob@example.com"))
            .await
            .unwrap();

        assert!(account.is_none());
    }

    #[tokio::test]
    async fn query_failure_is_database_error() {
        let db = MockDatabase::new(DatabaseBackend::MySql)
            .append_query_errors([DbErr::Custom("connection reset".to_string())])
            .into_connection();
        let repository = SeaOrmAccountRepository::new(db);

        let result = repository
            .find_by_identifier(&identifier("alice@example.com"))
            .await;

        assert!(matches!(result, Err(RepositoryError::DatabaseError(_))));
    }

    #[tokio::test]
    async fn register_inserts_row() {
        let db = MockDatabase::new(DatabaseBackend::MySql)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection();
        let repository = SeaOrmAccountRepository::new(db);

        let account = repository
            .register_account(
                &identifier("alice@example.com"),
                HashedPassword::new("$argon2id$stub".to_string()),
                vec!["USER".to_string()],
            )
            .await
            .unwrap();

        assert_eq!(account.identifier().as_str(), "alice@example.com");
        assert_eq!(account.authorities(), ["USER".to_string()]);
    }

    #[tokio::test]
    async fn register_failure_is_database_error() {
        let db = MockDatabase::new(DatabaseBackend::MySql)
            .append_exec_errors([DbErr::Custom("disk full".to_string())])
            .into_connection();
        let repository = SeaOrmAccountRepository::new(db);

        let result = repository
            .register_account(
                &identifier("alice@example.com"),
                HashedPassword::new("$argon2id$stub".to_string()),
                vec![],
            )
            .await;

        assert!(matches!(result, Err(RepositoryError::DatabaseError(_))));
    }

    #[tokio::test]
    async fn clones_share_the_connection() {
        let row = model("alice@example.com", "USER");
        let db = MockDatabase::new(DatabaseBackend::MySql)
            .append_query_results([vec![row.clone()], Vec::<accounts::Model>::new()])
            .into_connection();
        let repository = SeaOrmAccountRepository::new(db);
        let cloned = repository.clone();

        let first = cloned
            .find_by_identifier(&identifier("alice@example.com"))
            .await
            .unwrap();
        let second = repository
            .find_by_identifier(&identifier("alice@example.com"))
            .await
            .unwrap();

        // both results came off the same mock queue
        assert_eq!(first.unwrap().id().as_uuid(), &row.id);
        assert!(second.is_none());
    }
}

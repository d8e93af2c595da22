use tracing::info;

use crate::{
    domain::{
        error::DomainError,
        models::{
            account::{Authority, DEFAULT_AUTHORITY, Identifier},
            credential::Secret,
        },
        repositories::{
            account_registration_repository::AccountRegistrationRepository,
            account_repository::AccountLookup,
        },
        services::{password_service::SecretHasher, token_service::TokenGenerator},
    },
    usecase::{credential_verifier::CredentialVerifier, login_usecase::LoginResult},
};

pub struct RegisterAccountUsecase<
    A: AccountLookup,
    R: AccountRegistrationRepository,
    P: SecretHasher,
    T: TokenGenerator,
> {
    verifier: CredentialVerifier<A, P>,
    registration_repository: R,
    token_generator: T,
    min_secret_length: usize,
}

impl<A: AccountLookup, R: AccountRegistrationRepository, P: SecretHasher, T: TokenGenerator>
    RegisterAccountUsecase<A, R, P, T>
{
    pub fn new(
        verifier: CredentialVerifier<A, P>,
        registration_repository: R,
        token_generator: T,
        min_secret_length: usize,
    ) -> Self {
        Self {
            verifier,
            registration_repository,
            token_generator,
            min_secret_length,
        }
    }

    pub async fn register(
        &self,
        identifier: String,
        secret: String,
        authorities: Vec<Authority>,
    ) -> Result<LoginResult, DomainError> {
        let identifier = Identifier::new(identifier)?;
        let secret = Secret::new(secret)?;

        // Validate password strength
        if secret.char_len() < self.min_secret_length {
            return Err(DomainError::WeakPassword(self.min_secret_length));
        }

        let authorities = if authorities.is_empty() {
            vec![DEFAULT_AUTHORITY.to_string()]
        } else {
            authorities
        };

        let password_hash = self.verifier.hash_secret(&secret).await?;

        let account = self
            .registration_repository
            .register_account(&identifier, password_hash, authorities)
            .await?;
        info!(account_id = %account.id(), %identifier, "account registered");

        let token = self.token_generator.generate(&account)?;

        Ok(LoginResult { token, account })
    }
}

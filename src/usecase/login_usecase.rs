use std::time::Duration;

use tokio::time::{Instant, sleep_until};
use tracing::{error, info};

use crate::{
    domain::{
        error::DomainError,
        models::{account::Account, credential::Credential, verification::VerificationResult},
        repositories::account_repository::AccountLookup,
        services::{password_service::SecretHasher, token_service::TokenGenerator},
    },
    usecase::credential_verifier::CredentialVerifier,
};

#[derive(Debug)]
pub struct LoginResult {
    pub token: String,
    pub account: Account,
}

/// Authentication manager: verify the credential, then issue a token.
///
/// Both rejection reasons come back as [`DomainError::InvalidCredentials`],
/// and never sooner than `rejection_floor` after the attempt started.
pub struct LoginUsecase<A: AccountLookup, P: SecretHasher, T: TokenGenerator> {
    verifier: CredentialVerifier<A, P>,
    token_generator: T,
    rejection_floor: Duration,
}

impl<A: AccountLookup, P: SecretHasher, T: TokenGenerator> LoginUsecase<A, P, T> {
    pub fn new(
        verifier: CredentialVerifier<A, P>,
        token_generator: T,
        rejection_floor: Duration,
    ) -> Self {
        Self {
            verifier,
            token_generator,
            rejection_floor,
        }
    }

    pub async fn login(&self, identifier: String, secret: String) -> Result<LoginResult, DomainError> {
        let started = Instant::now();
        let credential = Credential::new(identifier, secret)?;

        let outcome = self
            .verifier
            .verify(credential.identifier(), credential.secret())
            .await
            .inspect_err(|e| {
                error!(identifier = %credential.identifier(), error = %e, "credential verification failed")
            })?;

        match outcome {
            VerificationResult::Authenticated(account) => {
                let token = self.token_generator.generate(&account)?;
                info!(account_id = %account.id(), "login succeeded");
                Ok(LoginResult { token, account })
            }
            VerificationResult::Rejected(reason) => {
                info!(identifier = %credential.identifier(), %reason, "login rejected");
                sleep_until(started + self.rejection_floor).await;
                Err(DomainError::InvalidCredentials)
            }
        }
    }
}

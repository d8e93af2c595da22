mod config;
mod domain;
mod infrastructure;
mod presentation;
mod usecase;

use std::time::Duration;

use axum::{Router, routing::get};
use sea_orm::{ConnectOptions, Database};
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    config::AppConfig,
    domain::{
        repositories::{
            account_registration_repository::AccountRegistrationRepository,
            account_repository::AccountLookup,
        },
        services::{password_service::SecretHasher, token_service::TokenGenerator},
    },
    infrastructure::{
        account_repository::SeaOrmAccountRepository, argon2_password_hasher::Argon2PasswordHasher,
        in_memory_account_repository::InMemoryAccountRepository,
        jwt_token_generator::JwtTokenGenerator,
    },
    presentation::handlers::auth_handler::create_auth_router,
    usecase::{
        credential_verifier::CredentialVerifier, login_usecase::LoginUsecase,
        register_account_usecase::RegisterAccountUsecase,
    },
};

/// Wire login and registration over one account store
fn build_api_router<S, P, T>(
    repository: S,
    password_hasher: P,
    token_generator: T,
    rejection_floor: Duration,
    min_secret_length: usize,
) -> Router
where
    S: AccountLookup + AccountRegistrationRepository + Clone + 'static,
    P: SecretHasher + Clone + 'static,
    T: TokenGenerator + Clone + 'static,
{
    let login_service = LoginUsecase::new(
        CredentialVerifier::new(repository.clone(), password_hasher.clone()),
        token_generator.clone(),
        rejection_floor,
    );
    let register_service = RegisterAccountUsecase::new(
        CredentialVerifier::new(repository.clone(), password_hasher),
        repository,
        token_generator,
        min_secret_length,
    );

    create_auth_router(login_service, register_service)
}

/// A floor at or below one verify lets bad-secret rejections outlast unknown-identifier ones
fn rejection_floor_covers(rejection_floor: Duration, verify_cost: Duration) -> bool {
    rejection_floor > verify_cost
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env()?;
    let password_hasher = Argon2PasswordHasher::new(&config.argon2)?;
    let verify_cost = password_hasher.verify_cost()?;
    if !rejection_floor_covers(config.rejection_floor, verify_cost) {
        warn!(
            ?verify_cost,
            rejection_floor = ?config.rejection_floor,
            "AUTH_REJECTION_FLOOR_MS does not exceed the argon2 verify cost"
        );
    }
    let token_generator =
        JwtTokenGenerator::with_expiration(config.jwt_secret.clone(), config.jwt_expiration_hours);

    let api = match &config.database_url {
        Some(url) => {
            let mut opt = ConnectOptions::new(url.clone());
            opt.max_connections(10)
                .min_connections(1)
                .sqlx_logging(true);

            let db = Database::connect(opt).await?;
            build_api_router(
                SeaOrmAccountRepository::new(db),
                password_hasher,
                token_generator,
                config.rejection_floor,
                config.min_secret_length,
            )
        }
        None => {
            warn!("DATABASE_URL not set, accounts are kept in memory");
            build_api_router(
                InMemoryAccountRepository::new(),
                password_hasher,
                token_generator,
                config.rejection_floor,
                config.min_secret_length,
            )
        }
    };

    let app = Router::new()
        .route("/", get(|| async { "auth service" }))
        .nest("/api", api);

    let listener = TcpListener::bind(config.bind_addr).await?;
    info!(addr = %config.bind_addr, "listening");
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}

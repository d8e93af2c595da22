use std::sync::Arc;

use crate::{
    domain::{
        error::{DomainError, RepositoryError},
        models::account::Account,
        repositories::{
            account_registration_repository::AccountRegistrationRepository,
            account_repository::AccountLookup,
        },
        services::{password_service::SecretHasher, token_service::TokenGenerator},
    },
    usecase::{
        login_usecase::{LoginResult, LoginUsecase},
        register_account_usecase::RegisterAccountUsecase,
    },
};
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};
use serde::{Deserialize, Serialize};
use tracing::error;

// Request

/// json for login request
#[derive(Serialize, Deserialize)]
pub struct LoginRequest {
    pub identifier: String,
    pub password: String,
}

/// json for register request
#[derive(Serialize, Deserialize)]
pub struct RegisterRequest {
    pub identifier: String,
    pub password: String,
}

// Response

/// json for login and register response
#[derive(Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub account: AccountInfo,
}

#[derive(Serialize, Deserialize)]
pub struct AccountInfo {
    pub id: String,
    pub identifier: String,
    pub authorities: Vec<String>,
}

impl From<Account> for AccountInfo {
    fn from(account: Account) -> Self {
        Self {
            id: account.id().to_string(),
            identifier: account.identifier().as_str().to_string(),
            authorities: account.authorities().to_vec(),
        }
    }
}

impl From<LoginResult> for LoginResponse {
    fn from(result: LoginResult) -> Self {
        Self {
            token: result.token,
            account: result.account.into(),
        }
    }
}

pub const AUTHENTICATION_FAILED: &str = "Authentication failed";
pub const SERVICE_UNAVAILABLE: &str = "Authentication service unavailable";
pub const INTERNAL_ERROR: &str = "Internal error";

/* Router Function and Handler Function */

/// function return Router object
/// Suppose to be nested by main router
pub fn create_auth_router<A, R, P, T>(
    login_service: LoginUsecase<A, P, T>,
    register_service: RegisterAccountUsecase<A, R, P, T>,
) -> Router
where
    A: AccountLookup + 'static,
    R: AccountRegistrationRepository + 'static,
    P: SecretHasher + 'static,
    T: TokenGenerator + 'static,
{
    let state = AppState {
        login_service: Arc::new(login_service),
        register_service: Arc::new(register_service),
    };

    Router::new()
        .route("/login", post(login::<A, R, P, T>))
        .route("/register", post(register::<A, R, P, T>))
        .with_state(state)
}

pub struct AppState<A, R, P, T>
where
    A: AccountLookup,
    R: AccountRegistrationRepository,
    P: SecretHasher,
    T: TokenGenerator,
{
    pub login_service: Arc<LoginUsecase<A, P, T>>,
    pub register_service: Arc<RegisterAccountUsecase<A, R, P, T>>,
}

impl<A, R, P, T> Clone for AppState<A, R, P, T>
where
    A: AccountLookup,
    R: AccountRegistrationRepository,
    P: SecretHasher,
    T: TokenGenerator,
{
    fn clone(&self) -> Self {
        Self {
            login_service: Arc::clone(&self.login_service),
            register_service: Arc::clone(&self.register_service),
        }
    }
}

// handler function

/// handler function for login
async fn login<A, R, P, T>(
    State(state): State<AppState<A, R, P, T>>,
    Json(payload): Json<LoginRequest>,
) -> Response
where
    A: AccountLookup,
    R: AccountRegistrationRepository,
    P: SecretHasher,
    T: TokenGenerator,
{
    match state
        .login_service
        .login(payload.identifier, payload.password)
        .await
    {
        Ok(result) => (StatusCode::OK, Json(LoginResponse::from(result))).into_response(),
        Err(err) => login_error_response(&err),
    }
}

/// Every rejection maps to the same status and body
fn login_error_response(err: &DomainError) -> Response {
    match err {
        DomainError::InvalidCredentials => {
            (StatusCode::UNAUTHORIZED, Json(AUTHENTICATION_FAILED)).into_response()
        }
        DomainError::EmptyIdentifier | DomainError::EmptySecret => {
            (StatusCode::BAD_REQUEST, Json(err.to_string())).into_response()
        }
        DomainError::LookupFailed(_) => {
            (StatusCode::SERVICE_UNAVAILABLE, Json(SERVICE_UNAVAILABLE)).into_response()
        }
        _ => (StatusCode::INTERNAL_SERVER_ERROR, Json(INTERNAL_ERROR)).into_response(),
    }
}

/// handler function for register
async fn register<A, R, P, T>(
    State(state): State<AppState<A, R, P, T>>,
    Json(payload): Json<RegisterRequest>,
) -> Response
where
    A: AccountLookup,
    R: AccountRegistrationRepository,
    P: SecretHasher,
    T: TokenGenerator,
{
    // authorities are never taken from the client
    match state
        .register_service
        .register(payload.identifier, payload.password, Vec::new())
        .await
    {
        Ok(result) => (StatusCode::CREATED, Json(LoginResponse::from(result))).into_response(),
        Err(err) => {
            if err.is_infrastructure() {
                error!(error = %err, "registration could not be completed");
            }
            register_error_response(&err)
        }
    }
}

fn register_error_response(err: &DomainError) -> Response {
    match err {
        DomainError::WeakPassword(_) | DomainError::EmptyIdentifier | DomainError::EmptySecret => {
            (StatusCode::BAD_REQUEST, Json(err.to_string())).into_response()
        }
        DomainError::Repository(RepositoryError::AlreadyExists) => {
            (StatusCode::CONFLICT, Json("Account already exists")).into_response()
        }
        _ => (StatusCode::INTERNAL_SERVER_ERROR, Json(INTERNAL_ERROR)).into_response(),
    }
}

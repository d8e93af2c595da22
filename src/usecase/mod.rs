pub mod credential_verifier;
pub mod login_usecase;
pub mod register_account_usecase;

use crate::domain::{error::DomainError, models::account::Account};

pub type Token = String;

pub trait TokenGenerator: Send + Sync {
    fn generate(&self, account: &Account) -> Result<Token, DomainError>;
}

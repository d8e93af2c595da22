pub mod account_registration_repository;
pub mod account_repository;

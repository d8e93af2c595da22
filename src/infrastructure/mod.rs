pub mod account_repository;
pub mod argon2_password_hasher;
pub mod entity;
pub mod in_memory_account_repository;
pub mod jwt_token_generator;

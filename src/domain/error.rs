use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("Account lookup failed: {0}")]
    LookupFailed(RepositoryError),

    #[error("Hashing failed: {0}")]
    HashingFailed(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Weak password (minimum {0} characters required)")]
    WeakPassword(usize),

    #[error("Empty identifier")]
    EmptyIdentifier,

    #[error("Empty secret")]
    EmptySecret,

    #[error("Token generation failed: {0}")]
    TokenGeneration(String),
}

impl DomainError {
    /// True for faults that need operational attention rather than a retry by the user
    pub fn is_infrastructure(&self) -> bool {
        matches!(
            self,
            DomainError::Repository(_)
                | DomainError::LookupFailed(_)
                | DomainError::HashingFailed(_)
                | DomainError::TokenGeneration(_)
        )
    }
}

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Already exists")]
    AlreadyExists,

    #[error("Database error: {0}")]
    DatabaseError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn infrastructure_errors_are_flagged() {
        assert!(DomainError::LookupFailed(RepositoryError::DatabaseError("down".into())).is_infrastructure());
        assert!(DomainError::HashingFailed("bad hash".into()).is_infrastructure());
        assert!(!DomainError::InvalidCredentials.is_infrastructure());
        assert!(!DomainError::WeakPassword(8).is_infrastructure());
    }

    #[test]
    fn lookup_failure_is_not_not_found() {
        let err = DomainError::LookupFailed(RepositoryError::DatabaseError("timeout".into()));
        assert_eq!(err.to_string(), "Account lookup failed: Database error: timeout");
        assert_ne!(err.to_string(), DomainError::InvalidCredentials.to_string());
    }
}

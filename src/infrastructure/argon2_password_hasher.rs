use std::time::{Duration, Instant};

use argon2::{
    Algorithm, Argon2, Params, PasswordHash as Argon2Hash, Version,
    password_hash::{
        self, PasswordHasher as Argon2Hasher, PasswordVerifier, SaltString, rand_core::OsRng,
    },
};

use crate::domain::{
    error::DomainError,
    models::credential::{HashedPassword, Secret},
    services::password_service::SecretHasher,
};

/// Work factor shared by every hash the process produces
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Argon2Config {
    /// Memory cost in KiB
    pub memory_kib: u32,
    /// Iterations
    pub time_cost: u32,
    pub parallelism: u32,
}

impl Default for Argon2Config {
    fn default() -> Self {
        // OWASP recommendation for Argon2id
        Self {
            memory_kib: Params::DEFAULT_M_COST,
            time_cost: Params::DEFAULT_T_COST,
            parallelism: Params::DEFAULT_P_COST,
        }
    }
}

#[derive(Clone)]
pub struct Argon2PasswordHasher {
    argon2: Argon2<'static>,
}

impl Argon2PasswordHasher {
    pub fn new(config: &Argon2Config) -> Result<Self, DomainError> {
        let params = Params::new(config.memory_kib, config.time_cost, config.parallelism, None)
            .map_err(|e| DomainError::HashingFailed(format!("invalid argon2 parameters: {}", e)))?;

        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }

    /// Wall time of one verify at the configured work factor
    pub fn verify_cost(&self) -> Result<Duration, DomainError> {
        let sample = Secret::new("work-factor-sample".to_string())?;
        let hash = self.hash(&sample)?;

        let started = Instant::now();
        self.verify(&sample, &hash)?;
        Ok(started.elapsed())
    }
}

impl SecretHasher for Argon2PasswordHasher {
    fn hash(&self, secret: &Secret) -> Result<HashedPassword, DomainError> {
        let salt = SaltString::generate(&mut OsRng);

        let hash = self
            .argon2
            .hash_password(secret.expose().as_bytes(), &salt)
            .map_err(|e| DomainError::HashingFailed(e.to_string()))?
            .to_string();

        Ok(HashedPassword::new(hash))
    }

    fn verify(&self, secret: &Secret, hashed_password: &HashedPassword) -> Result<bool, DomainError> {
        let parsed_hash = Argon2Hash::new(hashed_password.as_str())
            .map_err(|e| DomainError::HashingFailed(e.to_string()))?;

        // Cost parameters are read from the stored hash, so older work factors still verify
        match self
            .argon2
            .verify_password(secret.expose().as_bytes(), &parsed_hash)
        {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(e) => Err(DomainError::HashingFailed(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn low_cost() -> Argon2Config {
        Argon2Config {
            memory_kib: 8,
            time_cost: 1,
            parallelism: 1,
        }
    }

    fn secret(value: &str) -> Secret {
        Secret::new(value.to_string()).unwrap()
    }

    #[test]
    fn hash_is_phc_argon2id() {
        let hasher = Argon2PasswordHasher::new(&low_cost()).unwrap();
        let hash = hasher.hash(&secret("correct horse battery staple")).unwrap();

        assert!(hash.as_str().starts_with("$argon2id$v=19$m=8,t=1,p=1$"));
    }

    #[test]
    fn verify_matches_only_the_original_secret() {
        let hasher = Argon2PasswordHasher::new(&low_cost()).unwrap();
        let hash = hasher.hash(&secret("Correct1!")).unwrap();

        assert!(hasher.verify(&secret("Correct1!"), &hash).unwrap());
        assert!(!hasher.verify(&secret("correct1!"), &hash).unwrap());
    }

    #[test]
    fn hashes_of_same_secret_differ() {
        let hasher = Argon2PasswordHasher::new(&low_cost()).unwrap();

        let first = hasher.hash(&secret("Correct1!")).unwrap();
        let second = hasher.hash(&secret("Correct1!")).unwrap();

        assert_ne!(first, second);
    }

    #[test]
    fn hash_from_other_work_factor_still_verifies() {
        let old = Argon2PasswordHasher::new(&low_cost()).unwrap();
        let hash = old.hash(&secret("Correct1!")).unwrap();

        let current = Argon2PasswordHasher::new(&Argon2Config {
            memory_kib: 16,
            time_cost: 2,
            parallelism: 1,
        })
        .unwrap();

        assert!(current.verify(&secret("Correct1!"), &hash).unwrap());
    }

    #[test]
    fn malformed_hash_is_an_error() {
        let hasher = Argon2PasswordHasher::new(&low_cost()).unwrap();
        let result = hasher.verify(&secret("Correct1!"), &HashedPassword::new("garbage".into()));

        assert!(matches!(result, Err(DomainError::HashingFailed(_))));
    }

    #[test]
    fn hash_uses_configured_work_factor() {
        let hasher = Argon2PasswordHasher::new(&Argon2Config {
            memory_kib: 16,
            time_cost: 3,
            parallelism: 1,
        })
        .unwrap();

        let hash = hasher.hash(&secret("Correct1!")).unwrap();

        assert!(hash.as_str().starts_with("$argon2id$v=19$m=16,t=3,p=1$"));
    }

    #[test]
    fn verify_cost_is_measured() {
        let hasher = Argon2PasswordHasher::new(&low_cost()).unwrap();

        assert!(hasher.verify_cost().unwrap() < Duration::from_secs(5));
    }

    #[test]
    fn invalid_parameters_are_refused() {
        let result = Argon2PasswordHasher::new(&Argon2Config {
            memory_kib: 1,
            time_cost: 0,
            parallelism: 1,
        });

        assert!(result.is_err());
    }
}

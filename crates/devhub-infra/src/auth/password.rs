//! Argon2id password hashing.
//!
//! `users.password` stores the full PHC string, for example
//! `$argon2id$v=19$m=19456,t=2,p=1$<salt>$<hash>`. The string carries its own
//! algorithm, version, cost parameters and salt, so verification always uses
//! the parameters a hash was created with. Changing [`PasswordConfig`] only
//! affects passwords hashed afterwards; existing accounts keep logging in.

use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use devhub_core::ports::{AuthError, PasswordService};

/// Argon2id cost parameters for new hashes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordConfig {
    /// Memory cost in KiB.
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            memory_kib: Params::DEFAULT_M_COST,
            iterations: Params::DEFAULT_T_COST,
            parallelism: Params::DEFAULT_P_COST,
        }
    }
}

impl PasswordConfig {
    /// Read `ARGON2_MEMORY_KIB`, `ARGON2_ITERATIONS` and `ARGON2_PARALLELISM`.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let read = |key: &str, fallback: u32| {
            std::env::var(key)
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(fallback)
        };

        Self {
            memory_kib: read("ARGON2_MEMORY_KIB", defaults.memory_kib),
            iterations: read("ARGON2_ITERATIONS", defaults.iterations),
            parallelism: read("ARGON2_PARALLELISM", defaults.parallelism),
        }
    }

    fn params(&self) -> Result<Params, AuthError> {
        Params::new(self.memory_kib, self.iterations, self.parallelism, None)
            .map_err(|e| AuthError::HashingError(format!("invalid Argon2 parameters: {e}")))
    }
}

/// Password service producing Argon2id PHC strings.
#[derive(Clone)]
pub struct Argon2PasswordService {
    argon2: Argon2<'static>,
}

impl Argon2PasswordService {
    /// Fails when the cost parameters are out of Argon2's accepted range.
    pub fn new(config: &PasswordConfig) -> Result<Self, AuthError> {
        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, config.params()?);
        tracing::debug!(
            memory_kib = config.memory_kib,
            iterations = config.iterations,
            parallelism = config.parallelism,
            "Argon2 password hashing configured"
        );
        Ok(Self { argon2 })
    }
}

impl PasswordService for Argon2PasswordService {
    fn hash(&self, password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|h| h.to_string())
            .map_err(|e| AuthError::HashingError(e.to_string()))
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError> {
        let stored =
            PasswordHash::new(hash).map_err(|e| AuthError::HashingError(e.to_string()))?;

        match self.argon2.verify_password(password.as_bytes(), &stored) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(AuthError::HashingError(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cheap() -> PasswordConfig {
        PasswordConfig {
            memory_kib: 64,
            iterations: 1,
            parallelism: 1,
        }
    }

    #[test]
    fn test_hash_and_verify() {
        let service = Argon2PasswordService::new(&cheap()).unwrap();

        let hash = service.hash("secure_password_123").unwrap();
        assert!(service.verify("secure_password_123", &hash).unwrap());
        assert!(!service.verify("wrong_password", &hash).unwrap());
    }

    #[test]
    fn test_hash_is_argon2id_phc_with_configured_costs() {
        let service = Argon2PasswordService::new(&cheap()).unwrap();
        let hash = service.hash("pw").unwrap();

        assert!(hash.starts_with("$argon2id$v=19$m=64,t=1,p=1$"), "{hash}");
        assert_ne!(hash, service.hash("pw").unwrap(), "hashes must be salted");
    }

    #[test]
    fn test_old_hashes_verify_after_costs_change() {
        let before = Argon2PasswordService::new(&cheap()).unwrap();
        let hash = before.hash("kept-password").unwrap();

        let after = Argon2PasswordService::new(&PasswordConfig {
            memory_kib: 128,
            iterations: 2,
            ..cheap()
        })
        .unwrap();
        assert!(after.verify("kept-password", &hash).unwrap());
        assert!(!after.verify("other-password", &hash).unwrap());
    }

    #[test]
    fn test_out_of_range_costs_are_rejected() {
        let zero_iterations = PasswordConfig {
            iterations: 0,
            ..cheap()
        };
        assert!(matches!(
            Argon2PasswordService::new(&zero_iterations),
            Err(AuthError::HashingError(_))
        ));
    }

    #[test]
    fn test_verify_rejects_malformed_hash() {
        let service = Argon2PasswordService::new(&cheap()).unwrap();
        let result = service.verify("anything", "not-a-phc-string");
        assert!(matches!(result, Err(AuthError::HashingError(_))));
    }
}

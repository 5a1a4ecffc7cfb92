//! One-way password hashing.
//!
//! Hashes are PHC strings (`$argon2id$v=19$m=..,t=..,p=..$salt$hash`), so the
//! cost parameters travel with each hash and old hashes keep verifying after
//! the configured cost changes.

use std::sync::Arc;

use argon2::{
    password_hash::{PasswordHasher as _, PasswordVerifier as _, SaltString},
    Algorithm, Argon2, Params, PasswordHash, Version,
};
use rand::rngs::OsRng;

use super::domain::{HashedPassword, PasswordAlgorithm};
use super::errors::AuthError;
use super::system::Clock;

pub trait PasswordHasher: Send + Sync {
    /// Tag written next to hashes produced by this hasher.
    fn algorithm(&self) -> PasswordAlgorithm;

    /// Salt and hash `plain`. Fails only on internal errors.
    fn hash(&self, plain: &str) -> Result<HashedPassword, AuthError>;

    /// `false` on mismatch and on any malformed `hash`.
    fn verify(&self, plain: &str, hash: &str) -> bool;
}

/// Argon2 cost parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashCost {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl Default for HashCost {
    fn default() -> Self {
        Self {
            memory_kib: Params::DEFAULT_M_COST,
            iterations: Params::DEFAULT_T_COST,
            parallelism: Params::DEFAULT_P_COST,
        }
    }
}

impl HashCost {
    /// Smallest cost argon2 accepts. Tests and benches only.
    pub fn minimal() -> Self {
        Self { memory_kib: 8, iterations: 1, parallelism: 1 }
    }
}

pub struct Argon2PasswordHasher {
    params: Params,
    clock: Arc<dyn Clock>,
}

impl Argon2PasswordHasher {
    pub fn new(cost: HashCost, clock: Arc<dyn Clock>) -> Result<Self, AuthError> {
        let params = Params::new(cost.memory_kib, cost.iterations, cost.parallelism, None)
            .map_err(|e| AuthError::HashError(format!("invalid argon2 params: {e}")))?;
        Ok(Self { params, clock })
    }

    fn argon(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }
}

impl PasswordHasher for Argon2PasswordHasher {
    fn algorithm(&self) -> PasswordAlgorithm {
        PasswordAlgorithm::Argon2id
    }

    fn hash(&self, plain: &str) -> Result<HashedPassword, AuthError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon()
            .hash_password(plain.as_bytes(), &salt)
            .map_err(|e| AuthError::HashError(e.to_string()))?
            .to_string();
        Ok(HashedPassword { hash, algorithm: self.algorithm(), hashed_at: self.clock.now() })
    }

    fn verify(&self, plain: &str, hash: &str) -> bool {
        match PasswordHash::new(hash) {
            Ok(parsed) => self.argon().verify_password(plain.as_bytes(), &parsed).is_ok(),
            Err(_) => false,
        }
    }
}

/// Check `plain` against a bcrypt hash (`$2a$`/`$2b$`/`$2y$`), the format
/// older accounts were stored with. Malformed hashes are a mismatch.
pub fn verify_bcrypt(plain: &str, hash: &str) -> bool {
    bcrypt::verify(plain, hash).unwrap_or(false)
}

/// Verify against a stored hash according to its algorithm tag. `hasher`
/// covers its own algorithm, bcrypt is verified directly, every other tag
/// is a mismatch.
pub fn verify_tagged(hasher: &dyn PasswordHasher, algorithm: PasswordAlgorithm, plain: &str, hash: &str) -> bool {
    match algorithm {
        a if a == hasher.algorithm() => hasher.verify(plain, hash),
        PasswordAlgorithm::Bcrypt => verify_bcrypt(plain, hash),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::system::mock::FixedClock;
    use chrono::{TimeZone, Utc};

    fn hasher() -> Argon2PasswordHasher {
        let clock = Arc::new(FixedClock::new(Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap()));
        Argon2PasswordHasher::new(HashCost::minimal(), clock).unwrap()
    }

    #[test]
    fn hash_then_verify() {
        let h = hasher();
        let out = h.hash("longpassword").unwrap();
        assert!(out.hash.starts_with("$argon2id$"));
        assert!(h.verify("longpassword", &out.hash));
        assert!(!h.verify("longpassworD", &out.hash));
        assert!(!h.verify("", &out.hash));
    }

    #[test]
    fn reports_tag_and_clock_time() {
        let h = hasher();
        let out = h.hash("longpassword").unwrap();
        assert_eq!(out.algorithm, PasswordAlgorithm::Argon2id);
        assert_eq!(out.hashed_at, Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap());
    }

    #[test]
    fn salts_differ() {
        let h = hasher();
        let a = h.hash("same-password").unwrap();
        let b = h.hash("same-password").unwrap();
        assert_ne!(a.hash, b.hash);
    }

    #[test]
    fn malformed_hash_is_a_mismatch() {
        let h = hasher();
        assert!(!h.verify("pw", "not-a-hash"));
        assert!(!h.verify("pw", ""));
        assert!(!h.verify("pw", "$2b$10$abcdefghijklmnopqrstuu"));
    }

    #[test]
    fn hashes_from_other_costs_still_verify() {
        let clock: Arc<dyn Clock> = Arc::new(FixedClock::new(Utc::now()));
        let cheap = Argon2PasswordHasher::new(HashCost::minimal(), clock.clone()).unwrap();
        let other = Argon2PasswordHasher::new(HashCost { memory_kib: 64, iterations: 2, parallelism: 1 }, clock).unwrap();
        let out = other.hash("rotate-me").unwrap();
        assert!(cheap.verify("rotate-me", &out.hash));
    }

    #[test]
    fn bcrypt_hashes_verify_by_tag() {
        let h = hasher();
        let legacy = bcrypt::hash("longpassword", 4).unwrap();
        assert!(verify_bcrypt("longpassword", &legacy));
        assert!(!verify_bcrypt("wrongpassword", &legacy));
        assert!(!verify_bcrypt("longpassword", "garbage"));

        assert!(verify_tagged(&h, PasswordAlgorithm::Bcrypt, "longpassword", &legacy));
        assert!(!verify_tagged(&h, PasswordAlgorithm::Argon2id, "longpassword", &legacy));
        assert!(!verify_tagged(&h, PasswordAlgorithm::Scrypt, "longpassword", &legacy));

        let modern = h.hash("longpassword").unwrap();
        assert!(verify_tagged(&h, PasswordAlgorithm::Argon2id, "longpassword", &modern.hash));
        assert!(!verify_tagged(&h, PasswordAlgorithm::Bcrypt, "longpassword", &modern.hash));
        for tag in [PasswordAlgorithm::None, PasswordAlgorithm::External] {
            assert!(!verify_tagged(&h, tag, "longpassword", &modern.hash));
        }
    }

    #[test]
    fn rejects_impossible_cost() {
        let clock = Arc::new(FixedClock::new(Utc::now()));
        let err = Argon2PasswordHasher::new(HashCost { memory_kib: 1, iterations: 0, parallelism: 1 }, clock);
        assert!(err.is_err());
    }
}

use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;
use tracing::error;

use crate::error::ApiError;

/// Argon2id with a fresh random salt per call. The hash errors carry no
/// caller-facing detail; they surface as a plain internal error.
pub fn hash_password(plain: &str) -> Result<String, ApiError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map_err(|e| {
            error!(error = %e, "argon2 hash_password error");
            ApiError::Internal(anyhow::anyhow!("password hashing failed"))
        })?
        .to_string();
    Ok(hash)
}

/// A wrong password is `Ok(false)`; only an unparseable stored hash is an
/// error.
pub fn verify_password(plain: &str, hash: &str) -> Result<bool, ApiError> {
    let parsed = PasswordHash::new(hash).map_err(|e| {
        error!(error = %e, "argon2 parse hash error");
        ApiError::Internal(anyhow::anyhow!("stored password hash is malformed"))
    })?;
    Ok(Argon2::default()
        .verify_password(plain.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify_roundtrip() {
        let password = "abc123";
        let hash = hash_password(password).expect("hashing should succeed");
        assert_ne!(hash, password);
        assert!(verify_password(password, &hash).expect("verify should succeed"));
    }

    #[test]
    fn hashes_are_salted_per_password() {
        let first = hash_password("abc123").expect("hash");
        let second = hash_password("abc123").expect("hash");
        assert_ne!(first, second);
    }

    #[test]
    fn verify_rejects_wrong_password() {
        let hash = hash_password("abc123").expect("hashing should succeed");
        assert!(!verify_password("wrongpw1", &hash).expect("verify should not error"));
    }

    #[test]
    fn verify_errors_internally_on_malformed_hash() {
        let err = verify_password("anything", "not-a-valid-hash").unwrap_err();
        assert!(matches!(err, ApiError::Internal(_)));
    }
}

//! Password hashing
//!
//! Passwords are never stored as given: the `password` column holds an
//! argon2 hash in PHC string format.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

/// Hashing failed (argon2 internal error)
#[derive(Debug, thiserror::Error)]
#[error("password hashing failed: {reason}")]
pub struct PasswordError {
    reason: String,
}

/// Hash a plaintext password with a fresh random salt.
pub fn hash(plain: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);
    let hashed = Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map_err(|e| PasswordError {
            reason: e.to_string(),
        })?;
    Ok(hashed.to_string())
}

/// Check a plaintext password against a stored PHC hash string.
pub fn verify(plain: &str, stored: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(stored) else {
        return false;
    };
    Argon2::default()
        .verify_password(plain.as_bytes(), &parsed)
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify() {
        let hashed = hash("s3cret").expect("hash failed");
        assert!(verify("s3cret", &hashed));
        assert!(!verify("wrong", &hashed));
    }

    #[test]
    fn hashes_are_salted() {
        let a = hash("s3cret").expect("hash failed");
        let b = hash("s3cret").expect("hash failed");
        assert_ne!(a, b);
    }

    #[test]
    fn verify_rejects_garbage_hash() {
        assert!(!verify("s3cret", "not-a-phc-string"));
    }
}

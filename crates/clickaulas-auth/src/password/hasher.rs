//! Argon2id hashing for account passwords and generated credentials.

use argon2::Argon2;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{
    self, PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString,
};

use clickaulas_core::error::AppError;

/// Argon2id with the crate's default parameters and a fresh salt per hash.
#[derive(Debug, Clone, Default)]
pub struct PasswordHasher;

impl PasswordHasher {
    pub fn new() -> Self {
        Self
    }

    /// PHC string (`$argon2id$...`) for `plain`.
    pub fn hash(&self, plain: &str) -> Result<String, AppError> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(plain.as_bytes(), &salt)
            .map(|phc| phc.to_string())
            .map_err(|e| AppError::internal(format!("Cannot hash password: {e}")))
    }

    /// Whether `plain` matches the stored PHC string.
    ///
    /// A mismatch is `Ok(false)`. A stored value that is not a PHC string is
    /// an internal error, not a failed login.
    pub fn verify(&self, plain: &str, stored: &str) -> Result<bool, AppError> {
        let phc = PasswordHash::new(stored)
            .map_err(|e| AppError::internal(format!("Stored password hash is corrupt: {e}")))?;

        match Argon2::default().verify_password(plain.as_bytes(), &phc) {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(e) => Err(AppError::internal(format!("Cannot verify password: {e}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use clickaulas_core::error::ErrorKind;

    use super::*;

    #[test]
    fn test_generated_credential_round_trip() {
        let hasher = PasswordHasher::new();
        let phc = hasher.hash("aB3$xY9!").unwrap();
        assert!(phc.starts_with("$argon2id$"));
        assert!(hasher.verify("aB3$xY9!", &phc).unwrap());
        assert!(!hasher.verify("aB3$xY9?", &phc).unwrap());
    }

    #[test]
    fn test_same_password_different_salt() {
        let hasher = PasswordHasher::new();
        assert_ne!(hasher.hash("secret1").unwrap(), hasher.hash("secret1").unwrap());
    }

    #[test]
    fn test_corrupt_hash_is_internal() {
        let err = PasswordHasher::new().verify("secret1", "plaintext").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Internal);
    }
}

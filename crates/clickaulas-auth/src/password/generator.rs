//! One-time credentials handed out when staff accounts are created.

use rand::Rng;

/// Characters a generated credential is drawn from.
pub const CREDENTIAL_ALPHABET: &[u8] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!@#$%";

/// Generates fixed-length credentials from [`CREDENTIAL_ALPHABET`].
///
/// Uses the thread-local RNG. The value is shown to the creator once and
/// only its hash is stored.
#[derive(Debug, Clone)]
pub struct CredentialGenerator {
    length: usize,
}

impl CredentialGenerator {
    /// Creates a generator producing credentials of `length` characters.
    pub fn new(length: usize) -> Self {
        Self {
            length: length.max(1),
        }
    }

    /// Generates a new credential.
    pub fn generate(&self) -> String {
        let mut rng = rand::rng();
        (0..self.length)
            .map(|_| {
                let idx = rng.random_range(0..CREDENTIAL_ALPHABET.len());
                CREDENTIAL_ALPHABET[idx] as char
            })
            .collect()
    }
}

impl Default for CredentialGenerator {
    fn default() -> Self {
        Self::new(8)
    }
}

//! Session token validation.

use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use clickaulas_core::config::AuthConfig;
use clickaulas_core::error::AppError;

use super::claims::{Claims, Session};

/// Validates session tokens.
#[derive(Clone)]
pub struct JwtDecoder {
    /// HMAC secret key for verification.
    decoding_key: DecodingKey,
    /// Validation configuration.
    validation: Validation,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtDecoder {
    /// Creates a new decoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 5; // clock skew

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    /// Decodes and validates a token, checking signature and expiration.
    pub fn decode(&self, token: &str) -> Result<Claims, AppError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                JwtErrorKind::ExpiredSignature => AppError::authentication("Session expired"),
                _ => AppError::authentication("Invalid session token"),
            })
    }

    /// Resolves a token into a [`Session`].
    pub fn resolve(&self, token: &str) -> Result<Session, AppError> {
        self.decode(token).map(Session::from)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use clickaulas_core::error::ErrorKind;
    use clickaulas_entity::{User, UserRole};

    use super::*;
    use crate::jwt::JwtEncoder;

    fn user(role: UserRole) -> User {
        User {
            id: Uuid::new_v4(),
            name: "Carla".to_string(),
            email: "carla@school.org".to_string(),
            password_hash: None,
            image: None,
            role,
            institution_id: None,
            department: None,
            phone: None,
            hourly_rate: None,
            hiring_date: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn config(secret: &str) -> AuthConfig {
        AuthConfig {
            jwt_secret: secret.to_string(),
            ..AuthConfig::default()
        }
    }

    #[test]
    fn test_issue_then_resolve_carries_role() {
        let cfg = config("test-secret");
        let subject = user(UserRole::Coordinator);
        let issued = JwtEncoder::new(&cfg).issue(&subject).unwrap();

        let session = JwtDecoder::new(&cfg).resolve(&issued.token).unwrap();
        assert_eq!(session.user_id, subject.id);
        assert_eq!(session.role, UserRole::Coordinator);
        assert_eq!(session.expires_at.timestamp(), issued.expires_at.timestamp());
    }

    #[test]
    fn test_foreign_signature_is_rejected() {
        let issued = JwtEncoder::new(&config("one"))
            .issue(&user(UserRole::Admin))
            .unwrap();
        let err = JwtDecoder::new(&config("two"))
            .resolve(&issued.token)
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authentication);
    }

    #[test]
    fn test_garbage_is_rejected() {
        let err = JwtDecoder::new(&config("one")).decode("not-a-jwt").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authentication);
    }
}

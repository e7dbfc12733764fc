//! Verification of federated sign-in assertions.
//!
//! The identity broker posts an HS256-signed assertion carrying the
//! external subject, display name, email and optional avatar.

use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};

use clickaulas_core::config::FederationConfig;
use clickaulas_core::error::AppError;

/// Claims of a federated assertion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FederatedAssertion {
    /// External subject id.
    pub sub: String,
    /// Display name.
    pub name: String,
    /// Verified email.
    pub email: String,
    /// Avatar URL.
    #[serde(default)]
    pub picture: Option<String>,
    /// Issuer.
    pub iss: String,
    /// Expiration timestamp.
    pub exp: i64,
}

/// Identity attributes returned by the broker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FederatedProfile {
    /// Stable external subject id.
    pub subject: String,
    /// Display name.
    pub name: String,
    /// Email.
    pub email: String,
    /// Avatar URL.
    pub image: Option<String>,
}

/// Checks assertion signature, issuer and expiry.
#[derive(Clone)]
pub struct FederationVerifier {
    enabled: bool,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for FederationVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FederationVerifier")
            .field("enabled", &self.enabled)
            .finish()
    }
}

impl FederationVerifier {
    /// Creates a verifier from configuration.
    pub fn new(config: &FederationConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 5;
        validation.set_issuer(&[config.issuer.as_str()]);
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);

        Self {
            enabled: config.enabled,
            decoding_key: DecodingKey::from_secret(config.shared_secret.as_bytes()),
            validation,
        }
    }

    /// Whether federated sign-in is accepted.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Verifies an assertion and extracts the profile.
    pub fn verify(&self, assertion: &str) -> Result<FederatedProfile, AppError> {
        if !self.enabled {
            return Err(AppError::authentication("Federated sign-in is disabled"));
        }

        let claims = decode::<FederatedAssertion>(assertion, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                JwtErrorKind::ExpiredSignature => {
                    AppError::authentication("Federated assertion expired")
                }
                _ => AppError::authentication("Invalid federated assertion"),
            })?;

        if claims.email.trim().is_empty() {
            return Err(AppError::authentication("Federated assertion has no email"));
        }

        Ok(FederatedProfile {
            subject: claims.sub,
            name: claims.name,
            email: claims.email.trim().to_string(),
            image: claims.picture,
        })
    }
}

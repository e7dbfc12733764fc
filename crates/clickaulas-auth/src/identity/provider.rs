//! Sign-in against the user store.

use std::sync::Arc;

use tracing::info;

use clickaulas_core::config::AuthConfig;
use clickaulas_core::error::AppError;
use clickaulas_database::UserStore;
use clickaulas_entity::{CreateUser, User, UserRole};

use super::federation::FederationVerifier;
use crate::password::PasswordHasher;

const BAD_CREDENTIALS: &str = "Invalid email or password";

/// Authenticates users by password or federated assertion.
///
/// The role is decided once, when the account is first created: the
/// configured administrator email becomes ADMIN, everyone else TEACHER.
pub struct IdentityProvider {
    users: Arc<dyn UserStore>,
    hasher: Arc<PasswordHasher>,
    federation: FederationVerifier,
    config: AuthConfig,
}

impl std::fmt::Debug for IdentityProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentityProvider")
            .field("federation", &self.federation)
            .finish()
    }
}

impl IdentityProvider {
    /// Creates a new identity provider.
    pub fn new(users: Arc<dyn UserStore>, hasher: Arc<PasswordHasher>, config: AuthConfig) -> Self {
        Self {
            users,
            hasher,
            federation: FederationVerifier::new(&config.federation),
            config,
        }
    }

    /// Role granted to a new account with `email`.
    pub fn role_for_email(&self, email: &str) -> UserRole {
        if self.config.is_admin_email(email) {
            UserRole::Admin
        } else {
            UserRole::Teacher
        }
    }

    /// Whether the federated callback is enabled.
    pub fn federation_enabled(&self) -> bool {
        self.federation.is_enabled()
    }

    /// Checks an email/password pair.
    pub async fn verify_credentials(&self, email: &str, password: &str) -> Result<User, AppError> {
        let user = self
            .users
            .find_user_by_email(email)
            .await?
            .ok_or_else(|| AppError::authentication(BAD_CREDENTIALS))?;

        let Some(hash) = user.password_hash.as_deref() else {
            return Err(AppError::authentication(BAD_CREDENTIALS));
        };

        if !self.hasher.verify(password, hash)? {
            return Err(AppError::authentication(BAD_CREDENTIALS));
        }

        Ok(user)
    }

    /// Accepts a federated assertion, creating the account on first sign-in.
    pub async fn federated_sign_in(&self, assertion: &str) -> Result<User, AppError> {
        let profile = self.federation.verify(assertion)?;

        if let Some(existing) = self.users.find_user_by_email(&profile.email).await? {
            return Ok(existing);
        }

        let role = self.role_for_email(&profile.email);
        let mut account = CreateUser::account(profile.name, profile.email, role);
        account.image = profile.image;
        let user = self.users.insert_user(&account).await?;

        info!(
            user_id = %user.id,
            role = %user.role,
            subject = %profile.subject,
            "Created account on first federated sign-in"
        );
        Ok(user)
    }
}

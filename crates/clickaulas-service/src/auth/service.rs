//! Account registration and session issuance.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;
use validator::Validate;

use clickaulas_auth::identity::IdentityProvider;
use clickaulas_auth::jwt::{IssuedToken, JwtEncoder};
use clickaulas_auth::password::PasswordHasher;
use clickaulas_core::error::AppError;
use clickaulas_database::UserStore;
use clickaulas_entity::{CreateUser, User};

use crate::validation::Violations;

/// Registration payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct RegisterInput {
    #[validate(length(min = 2, message = "Name must have at least 2 characters"))]
    pub name: String,
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    pub password: String,
}

/// Credential login payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct LoginInput {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// A signed-in user and their session token.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignIn {
    pub user: User,
    #[serde(flatten)]
    pub token: IssuedToken,
}

/// Registers accounts and turns successful sign-ins into session tokens.
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserStore>,
    hasher: Arc<PasswordHasher>,
    identity: Arc<IdentityProvider>,
    encoder: Arc<JwtEncoder>,
    password_min_length: usize,
}

impl std::fmt::Debug for AuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthService")
            .field("password_min_length", &self.password_min_length)
            .finish_non_exhaustive()
    }
}

impl AuthService {
    /// Creates a new auth service.
    pub fn new(
        users: Arc<dyn UserStore>,
        hasher: Arc<PasswordHasher>,
        identity: Arc<IdentityProvider>,
        encoder: Arc<JwtEncoder>,
        password_min_length: usize,
    ) -> Self {
        Self {
            users,
            hasher,
            identity,
            encoder,
            password_min_length,
        }
    }

    /// Session lifetime in seconds.
    pub fn session_ttl_seconds(&self) -> i64 {
        self.encoder.ttl_seconds()
    }

    /// Creates a password account. The administrator email becomes ADMIN.
    pub async fn register(&self, input: RegisterInput) -> Result<User, AppError> {
        let mut violations = Violations::check(&input);
        if input.password.chars().count() < self.password_min_length {
            violations.add(
                "password",
                format!(
                    "Password must have at least {} characters",
                    self.password_min_length
                ),
            );
        }
        violations.into_result()?;

        let email = input.email.trim();
        if self.users.find_user_by_email(email).await?.is_some() {
            return Err(AppError::conflict("Email already registered"));
        }

        let role = self.identity.role_for_email(email);
        let mut account = CreateUser::account(input.name.trim(), email, role);
        account.password_hash = Some(self.hasher.hash(&input.password)?);
        let user = self.users.insert_user(&account).await?;

        info!(user_id = %user.id, role = %user.role, "Account registered");
        Ok(user)
    }

    /// Email/password sign-in.
    pub async fn login(&self, input: LoginInput) -> Result<SignIn, AppError> {
        Violations::check(&input).into_result()?;
        let user = self
            .identity
            .verify_credentials(input.email.trim(), &input.password)
            .await?;
        self.sign_in(user)
    }

    /// Federated callback sign-in.
    pub async fn federated(&self, assertion: &str) -> Result<SignIn, AppError> {
        let user = self.identity.federated_sign_in(assertion).await?;
        self.sign_in(user)
    }

    fn sign_in(&self, user: User) -> Result<SignIn, AppError> {
        let token = self.encoder.issue(&user)?;
        info!(user_id = %user.id, role = %user.role, "User signed in");
        Ok(SignIn { user, token })
    }
}

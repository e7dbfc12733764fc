//! User entity model.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::role::UserRole;

/// A person who can sign in: administrator, coordinator or teacher.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique user identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Login email, unique case-insensitively.
    pub email: String,
    /// Argon2 password hash. Absent for federated-only accounts.
    #[serde(skip_serializing, default)]
    pub password_hash: Option<String>,
    /// Avatar URL from the identity provider.
    pub image: Option<String>,
    /// Role assigned at creation.
    pub role: UserRole,
    /// Institution the user works at.
    pub institution_id: Option<Uuid>,
    /// Department or subject area.
    pub department: Option<String>,
    /// Contact phone.
    pub phone: Option<String>,
    /// Hourly rate (teachers only).
    pub hourly_rate: Option<f64>,
    /// Hiring date.
    pub hiring_date: Option<NaiveDate>,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Check if this user has admin privileges.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Whether the account can sign in with a password.
    pub fn has_password(&self) -> bool {
        self.password_hash.is_some()
    }
}

/// Data required to insert a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    /// Display name.
    pub name: String,
    /// Login email.
    pub email: String,
    /// Argon2 hash of the initial password.
    pub password_hash: Option<String>,
    /// Avatar URL.
    pub image: Option<String>,
    /// Role to assign.
    pub role: UserRole,
    /// Institution reference.
    pub institution_id: Option<Uuid>,
    /// Department.
    pub department: Option<String>,
    /// Contact phone.
    pub phone: Option<String>,
    /// Hourly rate.
    pub hourly_rate: Option<f64>,
    /// Hiring date.
    pub hiring_date: Option<NaiveDate>,
}

impl CreateUser {
    /// A bare account with only identity fields set.
    pub fn account(name: impl Into<String>, email: impl Into<String>, role: UserRole) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password_hash: None,
            image: None,
            role,
            institution_id: None,
            department: None,
            phone: None,
            hourly_rate: None,
            hiring_date: None,
        }
    }
}

/// Editable profile fields of a coordinator or teacher.
///
/// Role and password are intentionally absent: updates never touch them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateStaff {
    /// Display name.
    pub name: String,
    /// Login email.
    pub email: String,
    /// Institution reference.
    pub institution_id: Option<Uuid>,
    /// Department.
    pub department: Option<String>,
    /// Contact phone.
    pub phone: Option<String>,
    /// Hourly rate.
    pub hourly_rate: Option<f64>,
    /// Hiring date.
    pub hiring_date: Option<NaiveDate>,
}

/// A coordinator or teacher row joined with its institution name.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct StaffMember {
    /// The user record.
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub user: User,
    /// Name of the referenced institution.
    pub institution_name: Option<String>,
}

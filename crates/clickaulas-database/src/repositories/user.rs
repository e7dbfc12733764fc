//! User repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use clickaulas_core::result::AppResult;
use clickaulas_entity::{CreateUser, StaffMember, UpdateStaff, User, UserRole};

use crate::errors::{map_delete_error, map_read_error, map_write_error};
use crate::filter::{StaffFilter, like_pattern, search_term};
use crate::store::UserStore;

/// Repository for user CRUD and query operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for UserRepository {
    async fn find_user(&self, id: Uuid) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_read_error(e, "Failed to find user by id"))
    }

    async fn find_user_by_email(&self, email: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE LOWER(email) = LOWER($1)")
            .bind(email.trim())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_read_error(e, "Failed to find user by email"))
    }

    async fn insert_user(&self, user: &CreateUser) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            r#"INSERT INTO users
                (id, name, email, password_hash, image, role, institution_id,
                 department, phone, hourly_rate, hiring_date, created_at, updated_at)
               VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, NOW(), NOW())
               RETURNING *"#,
        )
        .bind(Uuid::now_v7())
        .bind(&user.name)
        .bind(user.email.trim())
        .bind(&user.password_hash)
        .bind(&user.image)
        .bind(user.role)
        .bind(user.institution_id)
        .bind(&user.department)
        .bind(&user.phone)
        .bind(user.hourly_rate)
        .bind(user.hiring_date)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "Failed to create user"))
    }

    async fn update_staff(
        &self,
        id: Uuid,
        role: UserRole,
        update: &UpdateStaff,
    ) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>(
            r#"UPDATE users
               SET name = $3, email = $4, institution_id = $5, department = $6,
                   phone = $7, hourly_rate = $8, hiring_date = $9, updated_at = NOW()
               WHERE id = $1 AND role = $2
               RETURNING *"#,
        )
        .bind(id)
        .bind(role)
        .bind(&update.name)
        .bind(update.email.trim())
        .bind(update.institution_id)
        .bind(&update.department)
        .bind(&update.phone)
        .bind(update.hourly_rate)
        .bind(update.hiring_date)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "Failed to update user"))
    }

    async fn delete_staff(&self, id: Uuid, role: UserRole) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1 AND role = $2")
            .bind(id)
            .bind(role)
            .execute(&self.pool)
            .await
            .map_err(|e| map_delete_error(e, "Failed to delete user"))?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_staff(
        &self,
        role: UserRole,
        filter: &StaffFilter,
    ) -> AppResult<Vec<StaffMember>> {
        let pattern = search_term(&filter.query).map(like_pattern);
        sqlx::query_as::<_, StaffMember>(
            r#"SELECT u.*, i.name AS institution_name
               FROM users u
               LEFT JOIN institutions i ON i.id = u.institution_id
               WHERE u.role = $1
                 AND ($2::TEXT IS NULL OR u.name ILIKE $2)
                 AND ($3::UUID IS NULL OR u.institution_id = $3)
               ORDER BY u.name ASC"#,
        )
        .bind(role)
        .bind(pattern)
        .bind(filter.institution_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_read_error(e, "Failed to list staff"))
    }

    async fn list_users(&self, role: Option<UserRole>) -> AppResult<Vec<User>> {
        sqlx::query_as::<_, User>(
            "SELECT * FROM users WHERE ($1::user_role IS NULL OR role = $1) ORDER BY name ASC",
        )
        .bind(role)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_read_error(e, "Failed to list users"))
    }

    async fn count_users(&self, role: UserRole) -> AppResult<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE role = $1")
            .bind(role)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_read_error(e, "Failed to count users by role"))
    }
}

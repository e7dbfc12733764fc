//! Institution repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use clickaulas_core::result::AppResult;
use clickaulas_entity::{Institution, NewInstitution};

use crate::errors::{map_delete_error, map_read_error, map_write_error};
use crate::store::InstitutionStore;

/// Repository for institutions.
#[derive(Debug, Clone)]
pub struct InstitutionRepository {
    pool: PgPool,
}

impl InstitutionRepository {
    /// Create a new institution repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InstitutionStore for InstitutionRepository {
    async fn list_institutions(&self) -> AppResult<Vec<Institution>> {
        sqlx::query_as::<_, Institution>("SELECT * FROM institutions ORDER BY name ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_read_error(e, "Failed to list institutions"))
    }

    async fn find_institution(&self, id: Uuid) -> AppResult<Option<Institution>> {
        sqlx::query_as::<_, Institution>("SELECT * FROM institutions WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_read_error(e, "Failed to find institution"))
    }

    async fn insert_institution(&self, data: &NewInstitution) -> AppResult<Institution> {
        sqlx::query_as::<_, Institution>(
            r#"INSERT INTO institutions (id, name, address, created_at, updated_at)
               VALUES ($1, $2, $3, NOW(), NOW())
               RETURNING *"#,
        )
        .bind(Uuid::now_v7())
        .bind(&data.name)
        .bind(&data.address)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "Failed to create institution"))
    }

    async fn update_institution(
        &self,
        id: Uuid,
        data: &NewInstitution,
    ) -> AppResult<Option<Institution>> {
        sqlx::query_as::<_, Institution>(
            r#"UPDATE institutions SET name = $2, address = $3, updated_at = NOW()
               WHERE id = $1
               RETURNING *"#,
        )
        .bind(id)
        .bind(&data.name)
        .bind(&data.address)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "Failed to update institution"))
    }

    async fn delete_institution(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM institutions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_delete_error(e, "Failed to delete institution"))?;
        Ok(result.rows_affected() > 0)
    }
}

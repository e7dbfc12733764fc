//! Room repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use clickaulas_core::result::AppResult;
use clickaulas_entity::{NewRoom, Room};

use crate::errors::{map_delete_error, map_read_error, map_write_error};
use crate::store::RoomStore;

/// Repository for rooms.
#[derive(Debug, Clone)]
pub struct RoomRepository {
    pool: PgPool,
}

impl RoomRepository {
    /// Create a new room repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RoomStore for RoomRepository {
    async fn list_rooms(&self) -> AppResult<Vec<Room>> {
        sqlx::query_as::<_, Room>("SELECT * FROM rooms ORDER BY name ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_read_error(e, "Failed to list rooms"))
    }

    async fn find_room(&self, id: Uuid) -> AppResult<Option<Room>> {
        sqlx::query_as::<_, Room>("SELECT * FROM rooms WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_read_error(e, "Failed to find room"))
    }

    async fn insert_room(&self, data: &NewRoom) -> AppResult<Room> {
        sqlx::query_as::<_, Room>(
            r#"INSERT INTO rooms (id, name, capacity, institution_id, created_at, updated_at)
               VALUES ($1, $2, $3, $4, NOW(), NOW())
               RETURNING *"#,
        )
        .bind(Uuid::now_v7())
        .bind(&data.name)
        .bind(data.capacity)
        .bind(data.institution_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "Failed to create room"))
    }

    async fn update_room(&self, id: Uuid, data: &NewRoom) -> AppResult<Option<Room>> {
        sqlx::query_as::<_, Room>(
            r#"UPDATE rooms SET name = $2, capacity = $3, institution_id = $4, updated_at = NOW()
               WHERE id = $1
               RETURNING *"#,
        )
        .bind(id)
        .bind(&data.name)
        .bind(data.capacity)
        .bind(data.institution_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "Failed to update room"))
    }

    async fn delete_room(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM rooms WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_delete_error(e, "Failed to delete room"))?;
        Ok(result.rows_affected() > 0)
    }

    async fn count_rooms(&self) -> AppResult<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM rooms")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_read_error(e, "Failed to count rooms"))
    }
}

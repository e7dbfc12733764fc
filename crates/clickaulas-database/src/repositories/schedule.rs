//! Class schedule repository implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use clickaulas_core::result::AppResult;
use clickaulas_entity::{ClassSchedule, NewClassSchedule, ScheduleDetail, TimeWindow};

use crate::errors::{map_delete_error, map_read_error, map_write_error};
use crate::filter::{ScheduleFilter, like_pattern, search_term};
use crate::store::ScheduleStore;

/// Repository for class schedules.
#[derive(Debug, Clone)]
pub struct ScheduleRepository {
    pool: PgPool,
}

impl ScheduleRepository {
    /// Create a new schedule repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ScheduleStore for ScheduleRepository {
    async fn find_schedule(&self, id: Uuid) -> AppResult<Option<ClassSchedule>> {
        sqlx::query_as::<_, ClassSchedule>("SELECT * FROM class_schedules WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_read_error(e, "Failed to find schedule"))
    }

    async fn list_schedules(&self, filter: &ScheduleFilter) -> AppResult<Vec<ScheduleDetail>> {
        let pattern = search_term(&filter.query).map(like_pattern);
        let class_name = search_term(&filter.class_name);
        sqlx::query_as::<_, ScheduleDetail>(
            r#"SELECT s.*, r.name AS room_name, u.name AS teacher_name
               FROM class_schedules s
               JOIN rooms r ON r.id = s.room_id
               JOIN users u ON u.id = s.teacher_id
               WHERE ($1::TEXT IS NULL OR s.subject ILIKE $1)
                 AND ($2::TEXT IS NULL OR s.class_name = $2)
               ORDER BY s.start_time ASC"#,
        )
        .bind(pattern)
        .bind(class_name)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_read_error(e, "Failed to list schedules"))
    }

    async fn count_room_conflicts(&self, room_id: Uuid, window: &TimeWindow) -> AppResult<i64> {
        // Same predicate as TimeWindow::conflicts_with.
        sqlx::query_scalar(
            r#"SELECT COUNT(*) FROM class_schedules
               WHERE room_id = $1
                 AND ((start_time <= $2 AND end_time >= $2)
                   OR (start_time <= $3 AND end_time >= $3))"#,
        )
        .bind(room_id)
        .bind(window.start)
        .bind(window.end)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_read_error(e, "Failed to count room conflicts"))
    }

    async fn insert_schedule(&self, data: &NewClassSchedule) -> AppResult<ClassSchedule> {
        sqlx::query_as::<_, ClassSchedule>(
            r#"INSERT INTO class_schedules
                (id, class_name, subject, room_id, teacher_id, start_time, end_time,
                 has_conflict, created_at, updated_at)
               VALUES ($1, $2, $3, $4, $5, $6, $7, $8, NOW(), NOW())
               RETURNING *"#,
        )
        .bind(Uuid::now_v7())
        .bind(&data.class_name)
        .bind(&data.subject)
        .bind(data.room_id)
        .bind(data.teacher_id)
        .bind(data.window.start)
        .bind(data.window.end)
        .bind(data.has_conflict)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "Failed to create schedule"))
    }

    async fn delete_schedule(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM class_schedules WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_delete_error(e, "Failed to delete schedule"))?;
        Ok(result.rows_affected() > 0)
    }

    async fn count_schedules(&self) -> AppResult<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM class_schedules")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_read_error(e, "Failed to count schedules"))
    }

    async fn schedule_starts(&self) -> AppResult<Vec<DateTime<Utc>>> {
        sqlx::query_scalar("SELECT start_time FROM class_schedules")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_read_error(e, "Failed to load schedule starts"))
    }
}

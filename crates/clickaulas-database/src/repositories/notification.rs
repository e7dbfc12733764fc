//! Notification repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use clickaulas_core::result::AppResult;
use clickaulas_entity::{NewNotification, Notification, NotificationDetail};

use crate::errors::{map_read_error, map_write_error};
use crate::filter::{NotificationFilter, like_pattern, search_term};
use crate::store::NotificationStore;

/// Repository for notifications.
#[derive(Debug, Clone)]
pub struct NotificationRepository {
    pool: PgPool,
}

impl NotificationRepository {
    /// Create a new notification repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const DETAIL_SELECT: &str = r#"SELECT n.*, u.name AS user_name, u.email AS user_email
    FROM notifications n
    JOIN users u ON u.id = n.user_id"#;

#[async_trait]
impl NotificationStore for NotificationRepository {
    async fn find_notification(&self, id: Uuid) -> AppResult<Option<Notification>> {
        sqlx::query_as::<_, Notification>("SELECT * FROM notifications WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_read_error(e, "Failed to find notification"))
    }

    async fn list_notifications(
        &self,
        filter: &NotificationFilter,
    ) -> AppResult<Vec<NotificationDetail>> {
        let pattern = search_term(&filter.query).map(like_pattern);
        let sql = format!(
            r#"{DETAIL_SELECT}
               WHERE ($1::TEXT IS NULL
                   OR n.message ILIKE $1
                   OR n.notification_type ILIKE $1
                   OR u.name ILIKE $1)
               ORDER BY n.created_at DESC"#
        );
        sqlx::query_as::<_, NotificationDetail>(&sql)
            .bind(pattern)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_read_error(e, "Failed to list notifications"))
    }

    async fn recent_notifications(&self, limit: i64) -> AppResult<Vec<NotificationDetail>> {
        let sql = format!("{DETAIL_SELECT} ORDER BY n.created_at DESC LIMIT $1");
        sqlx::query_as::<_, NotificationDetail>(&sql)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_read_error(e, "Failed to list recent notifications"))
    }

    async fn insert_notification(&self, data: &NewNotification) -> AppResult<Notification> {
        sqlx::query_as::<_, Notification>(
            r#"INSERT INTO notifications
                (id, user_id, notification_type, message, is_read, class_schedule_id, created_at)
               VALUES ($1, $2, $3, $4, $5, $6, NOW())
               RETURNING *"#,
        )
        .bind(Uuid::now_v7())
        .bind(data.user_id)
        .bind(&data.notification_type)
        .bind(&data.message)
        .bind(data.is_read)
        .bind(data.class_schedule_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "Failed to create notification"))
    }

    async fn mark_notification_read(&self, id: Uuid) -> AppResult<Option<Notification>> {
        sqlx::query_as::<_, Notification>(
            "UPDATE notifications SET is_read = TRUE WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "Failed to mark notification as read"))
    }
}

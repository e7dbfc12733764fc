//! Notification creation, listing and read marking.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use clickaulas_auth::rbac::Capability;
use clickaulas_core::error::AppError;
use clickaulas_database::{
    NotificationFilter, NotificationStore, ScheduleFilter, ScheduleStore, UserStore,
};
use clickaulas_entity::{NewNotification, Notification, NotificationDetail, ScheduleDetail, User};

use crate::context::RequestContext;
use crate::validation::{Violations, non_blank};

/// Notification form payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct NotificationInput {
    /// Recipient.
    #[validate(length(min = 1, message = "Recipient is required"))]
    pub user_id: String,
    #[serde(rename = "type")]
    #[validate(length(min = 1, message = "Type is required"))]
    pub notification_type: String,
    #[validate(length(min = 1, message = "Message is required"))]
    pub message: String,
    /// Related schedule. `"none"` or blank means no schedule.
    pub class_schedule_id: Option<String>,
    pub is_read: bool,
}

impl NotificationInput {
    fn into_record(self) -> Result<NewNotification, AppError> {
        let mut violations = Violations::check(&self);

        let user_id = if violations.has("userId") {
            None
        } else {
            let parsed = Uuid::parse_str(self.user_id.trim()).ok();
            if parsed.is_none() {
                violations.add("userId", "Invalid recipient");
            }
            parsed
        };

        let class_schedule_id = match non_blank(self.class_schedule_id)
            .filter(|raw| !raw.eq_ignore_ascii_case("none"))
        {
            Some(raw) => {
                let parsed = Uuid::parse_str(&raw).ok();
                if parsed.is_none() {
                    violations.add("classScheduleId", "Invalid schedule");
                }
                parsed
            }
            None => None,
        };

        violations.into_result()?;
        let user_id =
            user_id.ok_or_else(|| AppError::invalid_field("userId", "Invalid recipient"))?;

        Ok(NewNotification {
            user_id,
            notification_type: self.notification_type.trim().to_string(),
            message: self.message.trim().to_string(),
            is_read: self.is_read,
            class_schedule_id,
        })
    }
}

/// Choices offered by the notification form.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationOptions {
    pub users: Vec<User>,
    pub schedules: Vec<ScheduleDetail>,
}

/// Manages notifications.
#[derive(Clone)]
pub struct NotificationService {
    notifications: Arc<dyn NotificationStore>,
    users: Arc<dyn UserStore>,
    schedules: Arc<dyn ScheduleStore>,
}

impl std::fmt::Debug for NotificationService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationService").finish_non_exhaustive()
    }
}

impl NotificationService {
    /// Creates a new notification service.
    pub fn new(
        notifications: Arc<dyn NotificationStore>,
        users: Arc<dyn UserStore>,
        schedules: Arc<dyn ScheduleStore>,
    ) -> Self {
        Self {
            notifications,
            users,
            schedules,
        }
    }

    /// Lists notifications newest first.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        filter: &NotificationFilter,
    ) -> Result<Vec<NotificationDetail>, AppError> {
        ctx.require(Capability::NotificationRead)?;
        self.notifications.list_notifications(filter).await
    }

    /// Users and schedules for the notification form.
    pub async fn options(&self, ctx: &RequestContext) -> Result<NotificationOptions, AppError> {
        ctx.require(Capability::NotificationCreate)?;
        Ok(NotificationOptions {
            users: self.users.list_users(None).await?,
            schedules: self.schedules.list_schedules(&ScheduleFilter::default()).await?,
        })
    }

    /// Creates a notification for a recipient.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        input: NotificationInput,
    ) -> Result<Notification, AppError> {
        ctx.require(Capability::NotificationCreate)?;
        let record = input.into_record()?;
        let notification = self.notifications.insert_notification(&record).await?;

        info!(
            actor_id = %ctx.user_id,
            notification_id = %notification.id,
            recipient_id = %notification.user_id,
            "Notification created"
        );
        Ok(notification)
    }

    /// Marks one of the caller's own notifications as read.
    pub async fn mark_read(
        &self,
        ctx: &RequestContext,
        id: Uuid,
    ) -> Result<Notification, AppError> {
        let existing = self
            .notifications
            .find_notification(id)
            .await?
            .ok_or_else(|| AppError::not_found("Notification not found"))?;

        if existing.user_id != ctx.user_id {
            return Err(AppError::authorization(
                "Access denied: only the recipient can mark a notification as read",
            ));
        }

        self.notifications
            .mark_notification_read(id)
            .await?
            .ok_or_else(|| AppError::not_found("Notification not found"))
    }
}

#[cfg(test)]
mod tests {
    use clickaulas_core::error::ErrorKind;
    use clickaulas_database::Stores;
    use clickaulas_entity::{CreateUser, UserRole};

    use super::*;
    use crate::context::testing::{context, context_for};

    fn service(stores: &Stores) -> NotificationService {
        NotificationService::new(
            stores.notifications.clone(),
            stores.users.clone(),
            stores.schedules.clone(),
        )
    }

    async fn recipient(stores: &Stores) -> User {
        stores
            .users
            .insert_user(&CreateUser::account("Lia", "lia@school.org", UserRole::Teacher))
            .await
            .unwrap()
    }

    fn input(user_id: Uuid, schedule: Option<&str>) -> NotificationInput {
        NotificationInput {
            user_id: user_id.to_string(),
            notification_type: "REMINDER".to_string(),
            message: "Bring the lab reports".to_string(),
            class_schedule_id: schedule.map(str::to_string),
            is_read: false,
        }
    }

    #[tokio::test]
    async fn test_none_schedule_reference_is_absent() {
        let stores = Stores::memory();
        let notifications = service(&stores);
        let lia = recipient(&stores).await;

        for raw in [Some("none"), Some(""), None] {
            let created = notifications
                .create(&context(UserRole::Teacher), input(lia.id, raw))
                .await
                .unwrap();
            assert_eq!(created.class_schedule_id, None);
        }

        let err = notifications
            .create(&context(UserRole::Teacher), input(lia.id, Some("abc")))
            .await
            .unwrap_err();
        assert!(err.fields.unwrap().contains_key("classScheduleId"));
    }

    #[tokio::test]
    async fn test_unknown_recipient_is_field_error() {
        let stores = Stores::memory();
        let err = service(&stores)
            .create(&context(UserRole::Admin), input(Uuid::new_v4(), None))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert!(err.fields.unwrap().contains_key("userId"));
    }

    #[tokio::test]
    async fn test_only_recipient_marks_read() {
        let stores = Stores::memory();
        let notifications = service(&stores);
        let lia = recipient(&stores).await;
        let created = notifications
            .create(&context(UserRole::Admin), input(lia.id, None))
            .await
            .unwrap();
        assert!(!created.is_read);

        let err = notifications
            .mark_read(&context(UserRole::Admin), created.id)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authorization);

        let read = notifications
            .mark_read(&context_for(lia.id, UserRole::Teacher), created.id)
            .await
            .unwrap();
        assert!(read.is_read);

        let err = notifications
            .mark_read(&context_for(lia.id, UserRole::Teacher), Uuid::new_v4())
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_list_searches_recipient_name() {
        let stores = Stores::memory();
        let notifications = service(&stores);
        let lia = recipient(&stores).await;
        notifications
            .create(&context(UserRole::Admin), input(lia.id, None))
            .await
            .unwrap();

        let filter = NotificationFilter {
            query: Some("LIA".to_string()),
        };
        let found = notifications
            .list(&context(UserRole::Teacher), &filter)
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].user_email, "lia@school.org");

        let filter = NotificationFilter {
            query: Some("exam".to_string()),
        };
        assert!(notifications
            .list(&context(UserRole::Teacher), &filter)
            .await
            .unwrap()
            .is_empty());
    }
}

//! Dashboard data: counts, weekly load and recent notifications.

use std::sync::Arc;

use chrono::{DateTime, Datelike, Utc, Weekday};
use serde::{Deserialize, Serialize};

use clickaulas_auth::rbac::Capability;
use clickaulas_core::error::AppError;
use clickaulas_database::{NotificationStore, RoomStore, ScheduleStore, UserStore};
use clickaulas_entity::{NotificationDetail, UserRole};

use crate::context::RequestContext;

/// Number of notifications shown on the dashboard.
pub const RECENT_NOTIFICATIONS: i64 = 5;

/// Weekdays the school operates, in display order.
const SCHOOL_DAYS: [(Weekday, &str); 6] = [
    (Weekday::Mon, "Mon"),
    (Weekday::Tue, "Tue"),
    (Weekday::Wed, "Wed"),
    (Weekday::Thu, "Thu"),
    (Weekday::Fri, "Fri"),
    (Weekday::Sat, "Sat"),
];

/// Record counts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub schedules: i64,
    pub teachers: i64,
    pub coordinators: i64,
    pub rooms: i64,
}

/// Schedules starting on one weekday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekdayCount {
    pub day: String,
    pub total: i64,
}

/// Everything the dashboard page shows.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub greeting: String,
    pub stats: DashboardStats,
    pub weekly: Vec<WeekdayCount>,
    pub recent_notifications: Vec<NotificationDetail>,
}

/// Builds the dashboard summary.
#[derive(Clone)]
pub struct DashboardService {
    users: Arc<dyn UserStore>,
    rooms: Arc<dyn RoomStore>,
    schedules: Arc<dyn ScheduleStore>,
    notifications: Arc<dyn NotificationStore>,
}

impl std::fmt::Debug for DashboardService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DashboardService").finish_non_exhaustive()
    }
}

impl DashboardService {
    /// Creates a new dashboard service.
    pub fn new(
        users: Arc<dyn UserStore>,
        rooms: Arc<dyn RoomStore>,
        schedules: Arc<dyn ScheduleStore>,
        notifications: Arc<dyn NotificationStore>,
    ) -> Self {
        Self {
            users,
            rooms,
            schedules,
            notifications,
        }
    }

    /// Summary for the caller.
    pub async fn summary(&self, ctx: &RequestContext) -> Result<Dashboard, AppError> {
        ctx.require(Capability::DashboardRead)?;

        let stats = DashboardStats {
            schedules: self.schedules.count_schedules().await?,
            teachers: self.users.count_users(UserRole::Teacher).await?,
            coordinators: self.users.count_users(UserRole::Coordinator).await?,
            rooms: self.rooms.count_rooms().await?,
        };
        let starts = self.schedules.schedule_starts().await?;
        let recent_notifications = self
            .notifications
            .recent_notifications(RECENT_NOTIFICATIONS)
            .await?;

        Ok(Dashboard {
            greeting: ctx.name.clone(),
            stats,
            weekly: weekly_load(&starts),
            recent_notifications,
        })
    }
}

/// Buckets start instants by UTC weekday, Monday to Saturday.
pub fn weekly_load(starts: &[DateTime<Utc>]) -> Vec<WeekdayCount> {
    SCHOOL_DAYS
        .iter()
        .map(|(weekday, label)| WeekdayCount {
            day: (*label).to_string(),
            total: starts.iter().filter(|s| s.weekday() == *weekday).count() as i64,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use clickaulas_database::Stores;
    use clickaulas_entity::{CreateUser, NewNotification, NewRoom};

    use super::*;
    use crate::context::testing::context;

    #[test]
    fn test_weekly_load_skips_sunday() {
        let starts = vec![
            Utc.with_ymd_and_hms(2025, 3, 10, 9, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2025, 3, 17, 9, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2025, 3, 15, 9, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2025, 3, 16, 9, 0, 0).unwrap(),
        ];
        let load = weekly_load(&starts);
        assert_eq!(load.len(), 6);
        assert_eq!(load[0], WeekdayCount { day: "Mon".to_string(), total: 2 });
        assert_eq!(load[5], WeekdayCount { day: "Sat".to_string(), total: 1 });
        assert_eq!(load.iter().map(|d| d.total).sum::<i64>(), 3);
    }

    #[tokio::test]
    async fn test_summary_counts_and_recent() {
        let stores = Stores::memory();
        let dashboard = DashboardService::new(
            stores.users.clone(),
            stores.rooms.clone(),
            stores.schedules.clone(),
            stores.notifications.clone(),
        );
        let teacher = stores
            .users
            .insert_user(&CreateUser::account("Bia", "bia@school.org", UserRole::Teacher))
            .await
            .unwrap();
        stores
            .users
            .insert_user(&CreateUser::account("Leo", "leo@school.org", UserRole::Coordinator))
            .await
            .unwrap();
        stores
            .rooms
            .insert_room(&NewRoom {
                name: "Lab".to_string(),
                capacity: None,
                institution_id: None,
            })
            .await
            .unwrap();
        for i in 0..7 {
            stores
                .notifications
                .insert_notification(&NewNotification {
                    user_id: teacher.id,
                    notification_type: "INFO".to_string(),
                    message: format!("Message {i}"),
                    is_read: false,
                    class_schedule_id: None,
                })
                .await
                .unwrap();
        }

        let summary = dashboard.summary(&context(UserRole::Teacher)).await.unwrap();
        assert_eq!(summary.greeting, "Tester");
        assert_eq!(
            summary.stats,
            DashboardStats {
                schedules: 0,
                teachers: 1,
                coordinators: 1,
                rooms: 1,
            }
        );
        assert_eq!(summary.recent_notifications.len(), 5);
        assert!(summary.weekly.iter().all(|d| d.total == 0));
    }
}

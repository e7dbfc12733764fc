//! Store traits consumed by the service layer.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use clickaulas_core::config::DatabaseConfig;
use clickaulas_core::result::AppResult;
use clickaulas_entity::{
    ClassSchedule, CreateUser, Institution, NewClassSchedule, NewInstitution, NewNotification,
    NewRoom, Notification, NotificationDetail, Room, ScheduleDetail, StaffMember, TimeWindow,
    UpdateStaff, User, UserRole,
};

use crate::connection::DatabasePool;
use crate::filter::{NotificationFilter, ScheduleFilter, StaffFilter};
use crate::memory::MemoryDatabase;
use crate::migration::run_migrations;
use crate::repositories::{
    InstitutionRepository, NotificationRepository, RoomRepository, ScheduleRepository,
    UserRepository,
};

/// Users of every role.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Find a user by primary key.
    async fn find_user(&self, id: Uuid) -> AppResult<Option<User>>;
    /// Find a user by email, case-insensitively.
    async fn find_user_by_email(&self, email: &str) -> AppResult<Option<User>>;
    /// Insert a user. Fails with a conflict on a duplicate email.
    async fn insert_user(&self, user: &CreateUser) -> AppResult<User>;
    /// Update the profile of a user holding `role`. `None` when no such user.
    async fn update_staff(
        &self,
        id: Uuid,
        role: UserRole,
        update: &UpdateStaff,
    ) -> AppResult<Option<User>>;
    /// Delete a user holding `role`. Fails with in-use while schedules reference it.
    async fn delete_staff(&self, id: Uuid, role: UserRole) -> AppResult<bool>;
    /// List users of `role` with their institution, ordered by name.
    async fn list_staff(&self, role: UserRole, filter: &StaffFilter) -> AppResult<Vec<StaffMember>>;
    /// List users, optionally restricted to one role, ordered by name.
    async fn list_users(&self, role: Option<UserRole>) -> AppResult<Vec<User>>;
    /// Count users holding `role`.
    async fn count_users(&self, role: UserRole) -> AppResult<i64>;
}

/// Institutions.
#[async_trait]
pub trait InstitutionStore: Send + Sync {
    /// List institutions ordered by name.
    async fn list_institutions(&self) -> AppResult<Vec<Institution>>;
    /// Find an institution by primary key.
    async fn find_institution(&self, id: Uuid) -> AppResult<Option<Institution>>;
    /// Insert an institution.
    async fn insert_institution(&self, data: &NewInstitution) -> AppResult<Institution>;
    /// Update an institution. `None` when it does not exist.
    async fn update_institution(
        &self,
        id: Uuid,
        data: &NewInstitution,
    ) -> AppResult<Option<Institution>>;
    /// Delete an institution. Fails with in-use while users or rooms reference it.
    async fn delete_institution(&self, id: Uuid) -> AppResult<bool>;
}

/// Rooms.
#[async_trait]
pub trait RoomStore: Send + Sync {
    /// List rooms ordered by name.
    async fn list_rooms(&self) -> AppResult<Vec<Room>>;
    /// Find a room by primary key.
    async fn find_room(&self, id: Uuid) -> AppResult<Option<Room>>;
    /// Insert a room.
    async fn insert_room(&self, data: &NewRoom) -> AppResult<Room>;
    /// Update a room. `None` when it does not exist.
    async fn update_room(&self, id: Uuid, data: &NewRoom) -> AppResult<Option<Room>>;
    /// Delete a room. Fails with in-use while schedules reference it.
    async fn delete_room(&self, id: Uuid) -> AppResult<bool>;
    /// Count all rooms.
    async fn count_rooms(&self) -> AppResult<i64>;
}

/// Class schedules.
#[async_trait]
pub trait ScheduleStore: Send + Sync {
    /// Find a schedule by primary key.
    async fn find_schedule(&self, id: Uuid) -> AppResult<Option<ClassSchedule>>;
    /// List schedules with room and teacher names, ordered by start.
    async fn list_schedules(&self, filter: &ScheduleFilter) -> AppResult<Vec<ScheduleDetail>>;
    /// Count bookings of `room_id` that conflict with `window`
    /// (see [`TimeWindow::conflicts_with`]).
    async fn count_room_conflicts(&self, room_id: Uuid, window: &TimeWindow) -> AppResult<i64>;
    /// Insert a schedule with its precomputed conflict flag.
    async fn insert_schedule(&self, data: &NewClassSchedule) -> AppResult<ClassSchedule>;
    /// Delete a schedule. Referencing notifications lose the reference.
    async fn delete_schedule(&self, id: Uuid) -> AppResult<bool>;
    /// Count all schedules.
    async fn count_schedules(&self) -> AppResult<i64>;
    /// Start instants of every schedule.
    async fn schedule_starts(&self) -> AppResult<Vec<DateTime<Utc>>>;
}

/// Notifications.
#[async_trait]
pub trait NotificationStore: Send + Sync {
    /// Find a notification by primary key.
    async fn find_notification(&self, id: Uuid) -> AppResult<Option<Notification>>;
    /// List notifications with recipients, newest first.
    async fn list_notifications(
        &self,
        filter: &NotificationFilter,
    ) -> AppResult<Vec<NotificationDetail>>;
    /// The `limit` newest notifications.
    async fn recent_notifications(&self, limit: i64) -> AppResult<Vec<NotificationDetail>>;
    /// Insert a notification.
    async fn insert_notification(&self, data: &NewNotification) -> AppResult<Notification>;
    /// Set the read flag. `None` when it does not exist.
    async fn mark_notification_read(&self, id: Uuid) -> AppResult<Option<Notification>>;
}

/// One handle per store concern, all backed by the same backend.
#[derive(Clone)]
pub struct Stores {
    /// User store.
    pub users: Arc<dyn UserStore>,
    /// Institution store.
    pub institutions: Arc<dyn InstitutionStore>,
    /// Room store.
    pub rooms: Arc<dyn RoomStore>,
    /// Schedule store.
    pub schedules: Arc<dyn ScheduleStore>,
    /// Notification store.
    pub notifications: Arc<dyn NotificationStore>,
    /// Backend name reported by the health check.
    pub backend: &'static str,
}

impl Stores {
    /// PostgreSQL repositories sharing one pool.
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            users: Arc::new(UserRepository::new(pool.clone())),
            institutions: Arc::new(InstitutionRepository::new(pool.clone())),
            rooms: Arc::new(RoomRepository::new(pool.clone())),
            schedules: Arc::new(ScheduleRepository::new(pool.clone())),
            notifications: Arc::new(NotificationRepository::new(pool)),
            backend: "postgres",
        }
    }

    /// Opens the backend named by `config.url`.
    ///
    /// `memory://` selects the in-process store. Anything else connects to
    /// PostgreSQL and applies pending migrations when configured to.
    pub async fn open(config: &DatabaseConfig) -> AppResult<Self> {
        if config.is_memory() {
            info!("Using in-memory store; data is lost on shutdown");
            return Ok(Self::memory());
        }

        let pool = DatabasePool::connect(config).await?.into_pool();
        if config.run_migrations {
            run_migrations(&pool).await?;
        }
        Ok(Self::postgres(pool))
    }

    /// A fresh in-process store.
    pub fn memory() -> Self {
        Self::from_memory(Arc::new(MemoryDatabase::new()))
    }

    /// Views over an existing in-process store.
    pub fn from_memory(db: Arc<MemoryDatabase>) -> Self {
        Self {
            users: db.clone(),
            institutions: db.clone(),
            rooms: db.clone(),
            schedules: db.clone(),
            notifications: db,
            backend: "memory",
        }
    }
}

impl std::fmt::Debug for Stores {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stores")
            .field("backend", &self.backend)
            .finish()
    }
}

//! In-process store backed by concurrent maps.
//!
//! Mirrors the PostgreSQL schema rules: unique emails, RESTRICT on
//! institution, room and teacher references, CASCADE from users to their
//! notifications and SET NULL from schedules to notifications. Writes are
//! serialized by a single lock, the way one database transaction at a time
//! would see them.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use tokio::sync::Mutex;
use uuid::Uuid;

use clickaulas_core::error::AppError;
use clickaulas_core::result::AppResult;
use clickaulas_entity::{
    ClassSchedule, CreateUser, Institution, NewClassSchedule, NewInstitution, NewNotification,
    NewRoom, Notification, NotificationDetail, Room, ScheduleDetail, StaffMember, TimeWindow,
    UpdateStaff, User, UserRole,
};

use crate::errors::{EMAIL_TAKEN, STILL_REFERENCED};
use crate::filter::{
    NotificationFilter, ScheduleFilter, StaffFilter, contains_ignore_case, search_term,
};
use crate::store::{InstitutionStore, NotificationStore, RoomStore, ScheduleStore, UserStore};

const MISSING_REFERENCE: &str = "Referenced record does not exist";

/// Store holding every table in memory.
#[derive(Debug, Default)]
pub struct MemoryDatabase {
    users: DashMap<Uuid, User>,
    institutions: DashMap<Uuid, Institution>,
    rooms: DashMap<Uuid, Room>,
    schedules: DashMap<Uuid, ClassSchedule>,
    notifications: DashMap<Uuid, Notification>,
    write_lock: Mutex<()>,
}

impl MemoryDatabase {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn email_taken(&self, email: &str, except: Option<Uuid>) -> bool {
        let email = email.trim();
        self.users
            .iter()
            .any(|u| Some(u.id) != except && u.email.eq_ignore_ascii_case(email))
    }

    fn check_institution(&self, id: Option<Uuid>) -> AppResult<()> {
        match id {
            Some(id) if !self.institutions.contains_key(&id) => {
                Err(AppError::invalid_field("institutionId", MISSING_REFERENCE))
            }
            _ => Ok(()),
        }
    }

    fn notification_detail(&self, notification: &Notification) -> Option<NotificationDetail> {
        let user = self.users.get(&notification.user_id)?;
        Some(NotificationDetail {
            notification: notification.clone(),
            user_name: user.name.clone(),
            user_email: user.email.clone(),
        })
    }

    fn sorted_notifications(&self) -> Vec<NotificationDetail> {
        let mut rows: Vec<Notification> =
            self.notifications.iter().map(|n| n.value().clone()).collect();
        rows.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        rows.iter()
            .filter_map(|n| self.notification_detail(n))
            .collect()
    }
}

#[async_trait]
impl UserStore for MemoryDatabase {
    async fn find_user(&self, id: Uuid) -> AppResult<Option<User>> {
        Ok(self.users.get(&id).map(|u| u.value().clone()))
    }

    async fn find_user_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let email = email.trim();
        Ok(self
            .users
            .iter()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .map(|u| u.value().clone()))
    }

    async fn insert_user(&self, user: &CreateUser) -> AppResult<User> {
        let _guard = self.write_lock.lock().await;
        if self.email_taken(&user.email, None) {
            return Err(AppError::conflict(EMAIL_TAKEN));
        }
        self.check_institution(user.institution_id)?;

        let now = Utc::now();
        let row = User {
            id: Uuid::now_v7(),
            name: user.name.clone(),
            email: user.email.trim().to_string(),
            password_hash: user.password_hash.clone(),
            image: user.image.clone(),
            role: user.role,
            institution_id: user.institution_id,
            department: user.department.clone(),
            phone: user.phone.clone(),
            hourly_rate: user.hourly_rate,
            hiring_date: user.hiring_date,
            created_at: now,
            updated_at: now,
        };
        self.users.insert(row.id, row.clone());
        Ok(row)
    }

    async fn update_staff(
        &self,
        id: Uuid,
        role: UserRole,
        update: &UpdateStaff,
    ) -> AppResult<Option<User>> {
        let _guard = self.write_lock.lock().await;
        if !self.users.get(&id).is_some_and(|u| u.role == role) {
            return Ok(None);
        }
        if self.email_taken(&update.email, Some(id)) {
            return Err(AppError::conflict(EMAIL_TAKEN));
        }
        self.check_institution(update.institution_id)?;

        let Some(mut user) = self.users.get_mut(&id) else {
            return Ok(None);
        };
        user.name = update.name.clone();
        user.email = update.email.trim().to_string();
        user.institution_id = update.institution_id;
        user.department = update.department.clone();
        user.phone = update.phone.clone();
        user.hourly_rate = update.hourly_rate;
        user.hiring_date = update.hiring_date;
        user.updated_at = Utc::now();
        Ok(Some(user.clone()))
    }

    async fn delete_staff(&self, id: Uuid, role: UserRole) -> AppResult<bool> {
        let _guard = self.write_lock.lock().await;
        if !self.users.get(&id).is_some_and(|u| u.role == role) {
            return Ok(false);
        }
        if self.schedules.iter().any(|s| s.teacher_id == id) {
            return Err(AppError::in_use(STILL_REFERENCED));
        }
        self.users.remove(&id);
        self.notifications.retain(|_, n| n.user_id != id);
        Ok(true)
    }

    async fn list_staff(
        &self,
        role: UserRole,
        filter: &StaffFilter,
    ) -> AppResult<Vec<StaffMember>> {
        let query = search_term(&filter.query);
        let mut rows: Vec<StaffMember> = self
            .users
            .iter()
            .filter(|u| u.role == role)
            .filter(|u| query.is_none_or(|q| contains_ignore_case(&u.name, q)))
            .filter(|u| filter.institution_id.is_none_or(|i| u.institution_id == Some(i)))
            .map(|u| StaffMember {
                user: u.value().clone(),
                institution_name: u
                    .institution_id
                    .and_then(|i| self.institutions.get(&i).map(|inst| inst.name.clone())),
            })
            .collect();
        rows.sort_by(|a, b| a.user.name.cmp(&b.user.name));
        Ok(rows)
    }

    async fn list_users(&self, role: Option<UserRole>) -> AppResult<Vec<User>> {
        let mut rows: Vec<User> = self
            .users
            .iter()
            .filter(|u| role.is_none_or(|r| u.role == r))
            .map(|u| u.value().clone())
            .collect();
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(rows)
    }

    async fn count_users(&self, role: UserRole) -> AppResult<i64> {
        Ok(self.users.iter().filter(|u| u.role == role).count() as i64)
    }
}

#[async_trait]
impl InstitutionStore for MemoryDatabase {
    async fn list_institutions(&self) -> AppResult<Vec<Institution>> {
        let mut rows: Vec<Institution> =
            self.institutions.iter().map(|i| i.value().clone()).collect();
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(rows)
    }

    async fn find_institution(&self, id: Uuid) -> AppResult<Option<Institution>> {
        Ok(self.institutions.get(&id).map(|i| i.value().clone()))
    }

    async fn insert_institution(&self, data: &NewInstitution) -> AppResult<Institution> {
        let _guard = self.write_lock.lock().await;
        let now = Utc::now();
        let row = Institution {
            id: Uuid::now_v7(),
            name: data.name.clone(),
            address: data.address.clone(),
            created_at: now,
            updated_at: now,
        };
        self.institutions.insert(row.id, row.clone());
        Ok(row)
    }

    async fn update_institution(
        &self,
        id: Uuid,
        data: &NewInstitution,
    ) -> AppResult<Option<Institution>> {
        let _guard = self.write_lock.lock().await;
        Ok(self.institutions.get_mut(&id).map(|mut row| {
            row.name = data.name.clone();
            row.address = data.address.clone();
            row.updated_at = Utc::now();
            row.clone()
        }))
    }

    async fn delete_institution(&self, id: Uuid) -> AppResult<bool> {
        let _guard = self.write_lock.lock().await;
        if !self.institutions.contains_key(&id) {
            return Ok(false);
        }
        let referenced = self.users.iter().any(|u| u.institution_id == Some(id))
            || self.rooms.iter().any(|r| r.institution_id == Some(id));
        if referenced {
            return Err(AppError::in_use(STILL_REFERENCED));
        }
        Ok(self.institutions.remove(&id).is_some())
    }
}

#[async_trait]
impl RoomStore for MemoryDatabase {
    async fn list_rooms(&self) -> AppResult<Vec<Room>> {
        let mut rows: Vec<Room> = self.rooms.iter().map(|r| r.value().clone()).collect();
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(rows)
    }

    async fn find_room(&self, id: Uuid) -> AppResult<Option<Room>> {
        Ok(self.rooms.get(&id).map(|r| r.value().clone()))
    }

    async fn insert_room(&self, data: &NewRoom) -> AppResult<Room> {
        let _guard = self.write_lock.lock().await;
        self.check_institution(data.institution_id)?;
        let now = Utc::now();
        let row = Room {
            id: Uuid::now_v7(),
            name: data.name.clone(),
            capacity: data.capacity,
            institution_id: data.institution_id,
            created_at: now,
            updated_at: now,
        };
        self.rooms.insert(row.id, row.clone());
        Ok(row)
    }

    async fn update_room(&self, id: Uuid, data: &NewRoom) -> AppResult<Option<Room>> {
        let _guard = self.write_lock.lock().await;
        self.check_institution(data.institution_id)?;
        Ok(self.rooms.get_mut(&id).map(|mut row| {
            row.name = data.name.clone();
            row.capacity = data.capacity;
            row.institution_id = data.institution_id;
            row.updated_at = Utc::now();
            row.clone()
        }))
    }

    async fn delete_room(&self, id: Uuid) -> AppResult<bool> {
        let _guard = self.write_lock.lock().await;
        if !self.rooms.contains_key(&id) {
            return Ok(false);
        }
        if self.schedules.iter().any(|s| s.room_id == id) {
            return Err(AppError::in_use(STILL_REFERENCED));
        }
        Ok(self.rooms.remove(&id).is_some())
    }

    async fn count_rooms(&self) -> AppResult<i64> {
        Ok(self.rooms.len() as i64)
    }
}

#[async_trait]
impl ScheduleStore for MemoryDatabase {
    async fn find_schedule(&self, id: Uuid) -> AppResult<Option<ClassSchedule>> {
        Ok(self.schedules.get(&id).map(|s| s.value().clone()))
    }

    async fn list_schedules(&self, filter: &ScheduleFilter) -> AppResult<Vec<ScheduleDetail>> {
        let query = search_term(&filter.query);
        let class_name = search_term(&filter.class_name);
        let mut rows: Vec<ScheduleDetail> = self
            .schedules
            .iter()
            .filter(|s| query.is_none_or(|q| contains_ignore_case(&s.subject, q)))
            .filter(|s| class_name.is_none_or(|c| s.class_name == c))
            .filter_map(|s| {
                let room_name = self.rooms.get(&s.room_id)?.name.clone();
                let teacher_name = self.users.get(&s.teacher_id)?.name.clone();
                Some(ScheduleDetail {
                    schedule: s.value().clone(),
                    room_name,
                    teacher_name,
                })
            })
            .collect();
        rows.sort_by(|a, b| a.schedule.start_time.cmp(&b.schedule.start_time));
        Ok(rows)
    }

    async fn count_room_conflicts(&self, room_id: Uuid, window: &TimeWindow) -> AppResult<i64> {
        Ok(self
            .schedules
            .iter()
            .filter(|s| s.room_id == room_id && s.window().conflicts_with(window))
            .count() as i64)
    }

    async fn insert_schedule(&self, data: &NewClassSchedule) -> AppResult<ClassSchedule> {
        let _guard = self.write_lock.lock().await;
        if !self.rooms.contains_key(&data.room_id) {
            return Err(AppError::invalid_field("roomId", MISSING_REFERENCE));
        }
        if !self.users.contains_key(&data.teacher_id) {
            return Err(AppError::invalid_field("teacherId", MISSING_REFERENCE));
        }
        let now = Utc::now();
        let row = ClassSchedule {
            id: Uuid::now_v7(),
            class_name: data.class_name.clone(),
            subject: data.subject.clone(),
            room_id: data.room_id,
            teacher_id: data.teacher_id,
            start_time: data.window.start,
            end_time: data.window.end,
            has_conflict: data.has_conflict,
            created_at: now,
            updated_at: now,
        };
        self.schedules.insert(row.id, row.clone());
        Ok(row)
    }

    async fn delete_schedule(&self, id: Uuid) -> AppResult<bool> {
        let _guard = self.write_lock.lock().await;
        if self.schedules.remove(&id).is_none() {
            return Ok(false);
        }
        for mut notification in self.notifications.iter_mut() {
            if notification.class_schedule_id == Some(id) {
                notification.class_schedule_id = None;
            }
        }
        Ok(true)
    }

    async fn count_schedules(&self) -> AppResult<i64> {
        Ok(self.schedules.len() as i64)
    }

    async fn schedule_starts(&self) -> AppResult<Vec<DateTime<Utc>>> {
        Ok(self.schedules.iter().map(|s| s.start_time).collect())
    }
}

#[async_trait]
impl NotificationStore for MemoryDatabase {
    async fn find_notification(&self, id: Uuid) -> AppResult<Option<Notification>> {
        Ok(self.notifications.get(&id).map(|n| n.value().clone()))
    }

    async fn list_notifications(
        &self,
        filter: &NotificationFilter,
    ) -> AppResult<Vec<NotificationDetail>> {
        let query = search_term(&filter.query);
        Ok(self
            .sorted_notifications()
            .into_iter()
            .filter(|d| {
                query.is_none_or(|q| {
                    contains_ignore_case(&d.notification.message, q)
                        || contains_ignore_case(&d.notification.notification_type, q)
                        || contains_ignore_case(&d.user_name, q)
                })
            })
            .collect())
    }

    async fn recent_notifications(&self, limit: i64) -> AppResult<Vec<NotificationDetail>> {
        let limit = usize::try_from(limit).unwrap_or(0);
        Ok(self
            .sorted_notifications()
            .into_iter()
            .take(limit)
            .collect())
    }

    async fn insert_notification(&self, data: &NewNotification) -> AppResult<Notification> {
        let _guard = self.write_lock.lock().await;
        if !self.users.contains_key(&data.user_id) {
            return Err(AppError::invalid_field("userId", MISSING_REFERENCE));
        }
        if let Some(schedule_id) = data.class_schedule_id {
            if !self.schedules.contains_key(&schedule_id) {
                return Err(AppError::invalid_field("classScheduleId", MISSING_REFERENCE));
            }
        }
        let row = Notification {
            id: Uuid::now_v7(),
            user_id: data.user_id,
            notification_type: data.notification_type.clone(),
            message: data.message.clone(),
            is_read: data.is_read,
            class_schedule_id: data.class_schedule_id,
            created_at: Utc::now(),
        };
        self.notifications.insert(row.id, row.clone());
        Ok(row)
    }

    async fn mark_notification_read(&self, id: Uuid) -> AppResult<Option<Notification>> {
        let _guard = self.write_lock.lock().await;
        Ok(self.notifications.get_mut(&id).map(|mut row| {
            row.is_read = true;
            row.clone()
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use clickaulas_core::error::ErrorKind;

    fn window(start_hour: u32, end_hour: u32) -> TimeWindow {
        TimeWindow::new(
            Utc.with_ymd_and_hms(2025, 3, 10, start_hour, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2025, 3, 10, end_hour, 0, 0).unwrap(),
        )
        .unwrap()
    }

    async fn seed_teacher(db: &MemoryDatabase, email: &str) -> User {
        db.insert_user(&CreateUser::account("Ana", email, UserRole::Teacher))
            .await
            .unwrap()
    }

    async fn seed_room(db: &MemoryDatabase, name: &str) -> Room {
        db.insert_room(&NewRoom {
            name: name.to_string(),
            capacity: Some(30),
            institution_id: None,
        })
        .await
        .unwrap()
    }

    async fn seed_schedule(db: &MemoryDatabase, room: &Room, teacher: &User) -> ClassSchedule {
        db.insert_schedule(&NewClassSchedule {
            class_name: "3A".to_string(),
            subject: "Math".to_string(),
            room_id: room.id,
            teacher_id: teacher.id,
            window: window(9, 10),
            has_conflict: false,
        })
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_duplicate_email_is_conflict() {
        let db = MemoryDatabase::new();
        seed_teacher(&db, "ana@school.org").await;
        let err = db
            .insert_user(&CreateUser::account("Other", "ANA@school.org", UserRole::Teacher))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
    }

    #[tokio::test]
    async fn test_unknown_institution_is_field_error() {
        let db = MemoryDatabase::new();
        let mut user = CreateUser::account("Ana", "ana@school.org", UserRole::Teacher);
        user.institution_id = Some(Uuid::new_v4());
        let err = db.insert_user(&user).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert!(err.fields.unwrap().contains_key("institutionId"));
    }

    #[tokio::test]
    async fn test_referenced_room_cannot_be_deleted() {
        let db = MemoryDatabase::new();
        let teacher = seed_teacher(&db, "ana@school.org").await;
        let room = seed_room(&db, "101").await;
        seed_schedule(&db, &room, &teacher).await;

        let err = db.delete_room(room.id).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::InUse);
        assert!(db.find_room(room.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_referenced_institution_cannot_be_deleted() {
        let db = MemoryDatabase::new();
        let institution = db
            .insert_institution(&NewInstitution {
                name: "Central".to_string(),
                address: None,
            })
            .await
            .unwrap();
        db.insert_room(&NewRoom {
            name: "101".to_string(),
            capacity: None,
            institution_id: Some(institution.id),
        })
        .await
        .unwrap();

        let err = db.delete_institution(institution.id).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::InUse);
        assert_eq!(db.list_institutions().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_conflict_count_uses_inclusive_boundaries() {
        let db = MemoryDatabase::new();
        let teacher = seed_teacher(&db, "ana@school.org").await;
        let room = seed_room(&db, "101").await;
        let other_room = seed_room(&db, "102").await;
        seed_schedule(&db, &room, &teacher).await;

        assert_eq!(db.count_room_conflicts(room.id, &window(10, 11)).await.unwrap(), 1);
        assert_eq!(db.count_room_conflicts(room.id, &window(11, 12)).await.unwrap(), 0);
        assert_eq!(
            db.count_room_conflicts(other_room.id, &window(9, 10)).await.unwrap(),
            0
        );
    }

    #[tokio::test]
    async fn test_schedule_delete_clears_notification_reference() {
        let db = MemoryDatabase::new();
        let teacher = seed_teacher(&db, "ana@school.org").await;
        let room = seed_room(&db, "101").await;
        let schedule = seed_schedule(&db, &room, &teacher).await;
        let notification = db
            .insert_notification(&NewNotification {
                user_id: teacher.id,
                notification_type: "REMINDER".to_string(),
                message: "Bring the projector".to_string(),
                is_read: false,
                class_schedule_id: Some(schedule.id),
            })
            .await
            .unwrap();

        assert!(db.delete_schedule(schedule.id).await.unwrap());
        let stored = db.find_notification(notification.id).await.unwrap().unwrap();
        assert_eq!(stored.class_schedule_id, None);
    }

    #[tokio::test]
    async fn test_staff_delete_is_scoped_to_role_and_cascades_notifications() {
        let db = MemoryDatabase::new();
        let teacher = seed_teacher(&db, "ana@school.org").await;
        db.insert_notification(&NewNotification {
            user_id: teacher.id,
            notification_type: "INFO".to_string(),
            message: "Welcome".to_string(),
            is_read: false,
            class_schedule_id: None,
        })
        .await
        .unwrap();

        assert!(!db.delete_staff(teacher.id, UserRole::Coordinator).await.unwrap());
        assert!(db.delete_staff(teacher.id, UserRole::Teacher).await.unwrap());
        assert!(db.recent_notifications(5).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_staff_filters_by_name() {
        let db = MemoryDatabase::new();
        seed_teacher(&db, "ana@school.org").await;
        db.insert_user(&CreateUser::account("Bruno", "bruno@school.org", UserRole::Teacher))
            .await
            .unwrap();

        let filter = StaffFilter {
            query: Some("bru".to_string()),
            institution_id: None,
        };
        let rows = db.list_staff(UserRole::Teacher, &filter).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].user.name, "Bruno");
    }
}

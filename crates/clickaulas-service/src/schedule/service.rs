//! Scheduling action: validates a submission and stamps its conflict flag.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use clickaulas_auth::rbac::Capability;
use clickaulas_core::error::AppError;
use clickaulas_database::{RoomStore, ScheduleFilter, ScheduleStore, UserStore};
use clickaulas_entity::{ClassSchedule, NewClassSchedule, Room, ScheduleDetail, User, UserRole};

use super::input::ScheduleInput;
use crate::context::RequestContext;

/// Choices offered by the schedule form.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleOptions {
    pub teachers: Vec<User>,
    pub rooms: Vec<Room>,
}

/// Creates, lists and deletes class schedules.
#[derive(Clone)]
pub struct ScheduleService {
    schedules: Arc<dyn ScheduleStore>,
    rooms: Arc<dyn RoomStore>,
    users: Arc<dyn UserStore>,
}

impl std::fmt::Debug for ScheduleService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScheduleService").finish_non_exhaustive()
    }
}

impl ScheduleService {
    /// Creates a new schedule service.
    pub fn new(
        schedules: Arc<dyn ScheduleStore>,
        rooms: Arc<dyn RoomStore>,
        users: Arc<dyn UserStore>,
    ) -> Self {
        Self {
            schedules,
            rooms,
            users,
        }
    }

    /// Lists schedules ordered by start.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        filter: &ScheduleFilter,
    ) -> Result<Vec<ScheduleDetail>, AppError> {
        ctx.require(Capability::ScheduleRead)?;
        self.schedules.list_schedules(filter).await
    }

    /// Teachers and rooms for the schedule form.
    pub async fn options(&self, ctx: &RequestContext) -> Result<ScheduleOptions, AppError> {
        ctx.require(Capability::ScheduleCreate)?;
        Ok(ScheduleOptions {
            teachers: self.users.list_users(Some(UserRole::Teacher)).await?,
            rooms: self.rooms.list_rooms().await?,
        })
    }

    /// Creates a schedule.
    ///
    /// A booking of the same room whose closed interval contains either
    /// endpoint of the new one marks the new schedule as conflicting. The
    /// schedule is stored either way. Existing schedules keep their flags.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        input: ScheduleInput,
    ) -> Result<ClassSchedule, AppError> {
        ctx.require(Capability::ScheduleCreate)?;

        let parsed = input.parse()?;
        let window = parsed
            .window()
            .ok_or_else(|| AppError::domain("End time must be after start time"))?;

        if self.rooms.find_room(parsed.room_id).await?.is_none() {
            return Err(AppError::invalid_field("roomId", "Room not found"));
        }

        match self.users.find_user(parsed.teacher_id).await? {
            Some(user) if user.role == UserRole::Teacher => {}
            _ => return Err(AppError::invalid_field("teacherId", "Teacher not found")),
        }

        let conflicts = self
            .schedules
            .count_room_conflicts(parsed.room_id, &window)
            .await?;

        let schedule = self
            .schedules
            .insert_schedule(&NewClassSchedule {
                class_name: parsed.class_name,
                subject: parsed.subject,
                room_id: parsed.room_id,
                teacher_id: parsed.teacher_id,
                window,
                has_conflict: conflicts > 0,
            })
            .await?;

        if schedule.has_conflict {
            warn!(
                schedule_id = %schedule.id,
                room_id = %schedule.room_id,
                conflicts,
                "Schedule overlaps existing bookings"
            );
        }
        info!(
            actor_id = %ctx.user_id,
            schedule_id = %schedule.id,
            has_conflict = schedule.has_conflict,
            "Schedule created"
        );
        Ok(schedule)
    }

    /// Deletes a schedule. Other schedules' flags are left as they are.
    pub async fn delete(&self, ctx: &RequestContext, id: Uuid) -> Result<(), AppError> {
        ctx.require(Capability::ScheduleManage)?;
        if !self.schedules.delete_schedule(id).await? {
            return Err(AppError::not_found("Schedule not found"));
        }
        info!(actor_id = %ctx.user_id, schedule_id = %id, "Schedule deleted");
        Ok(())
    }
}

//! Translation of store constraint violations into application errors.
//!
//! Both backends report the same outcomes: a duplicate email becomes a
//! conflict, a dangling reference on insert becomes a field error, and a
//! reference blocking a delete becomes an in-use error.

use clickaulas_core::error::{AppError, ErrorKind};

/// Message used for duplicate login emails.
pub const EMAIL_TAKEN: &str = "Email already registered";

/// Message used when a delete is blocked by referencing records.
pub const STILL_REFERENCED: &str = "Cannot delete: the record is still in use";

/// Client field a foreign-key constraint guards.
pub fn constraint_field(constraint: &str) -> Option<&'static str> {
    match constraint {
        "users_institution_id_fkey" | "rooms_institution_id_fkey" => Some("institutionId"),
        "class_schedules_room_id_fkey" => Some("roomId"),
        "class_schedules_teacher_id_fkey" => Some("teacherId"),
        "notifications_user_id_fkey" => Some("userId"),
        "notifications_class_schedule_id_fkey" => Some("classScheduleId"),
        _ => None,
    }
}

/// Map a failed insert or update.
pub(crate) fn map_write_error(err: sqlx::Error, context: &'static str) -> AppError {
    if let sqlx::Error::Database(db_err) = &err {
        let constraint = db_err.constraint().unwrap_or_default();
        match db_err.kind() {
            sqlx::error::ErrorKind::UniqueViolation if constraint == "users_email_key" => {
                return AppError::conflict(EMAIL_TAKEN);
            }
            sqlx::error::ErrorKind::ForeignKeyViolation => {
                if let Some(field) = constraint_field(constraint) {
                    return AppError::invalid_field(field, "Referenced record does not exist");
                }
            }
            _ => {}
        }
    }
    AppError::with_source(ErrorKind::Database, context, err)
}

/// Map a failed delete.
pub(crate) fn map_delete_error(err: sqlx::Error, context: &'static str) -> AppError {
    if let sqlx::Error::Database(db_err) = &err {
        if matches!(db_err.kind(), sqlx::error::ErrorKind::ForeignKeyViolation) {
            return AppError::in_use(STILL_REFERENCED);
        }
    }
    AppError::with_source(ErrorKind::Database, context, err)
}

/// Map a failed read.
pub(crate) fn map_read_error(err: sqlx::Error, context: &'static str) -> AppError {
    AppError::with_source(ErrorKind::Database, context, err)
}

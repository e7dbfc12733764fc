//! PostgreSQL implementations of the store traits.

pub mod institution;
pub mod notification;
pub mod room;
pub mod schedule;
pub mod user;

pub use institution::InstitutionRepository;
pub use notification::NotificationRepository;
pub use room::RoomRepository;
pub use schedule::ScheduleRepository;
pub use user::UserRepository;

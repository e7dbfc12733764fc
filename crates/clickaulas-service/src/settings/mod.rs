//! Institution and room settings.

pub mod input;
pub mod service;

pub use input::{InstitutionInput, RoomInput};
pub use service::SettingsService;

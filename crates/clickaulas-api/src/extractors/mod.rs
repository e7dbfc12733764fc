//! Custom Axum extractors.

pub mod auth;
pub mod path;
pub mod payload;

pub use auth::AuthUser;
pub use path::parse_id;
pub use payload::Payload;

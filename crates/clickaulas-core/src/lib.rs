//! # clickaulas-core
//!
//! Core crate for ClickAulas. Contains the configuration schema and loader,
//! the unified error system and the result alias used by every other crate.
//!
//! This crate has **no** internal dependencies on other ClickAulas crates.

pub mod config;
pub mod error;
pub mod result;

pub use error::{AppError, ErrorKind, FieldErrors};
pub use result::AppResult;

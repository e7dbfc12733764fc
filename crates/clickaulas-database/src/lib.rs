//! # clickaulas-database
//!
//! Persistence layer for ClickAulas.
//!
//! Services talk to the store through the async traits in [`store`]. Two
//! backends implement them: the PostgreSQL repositories in [`repositories`]
//! and the in-process [`memory::MemoryDatabase`], which enforces the same
//! uniqueness and referential rules.

pub mod connection;
pub mod errors;
pub mod filter;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use filter::{NotificationFilter, ScheduleFilter, StaffFilter};
pub use memory::MemoryDatabase;
pub use store::{InstitutionStore, NotificationStore, RoomStore, ScheduleStore, Stores, UserStore};

//! Password hashing and one-time credential generation.

pub mod generator;
pub mod hasher;

pub use generator::CredentialGenerator;
pub use hasher::PasswordHasher;

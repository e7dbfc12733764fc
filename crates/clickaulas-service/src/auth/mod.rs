//! Registration and sign-in.

pub mod service;

pub use service::{AuthService, LoginInput, RegisterInput, SignIn};

//! Session JWT issuance and validation.

pub mod claims;
pub mod decoder;
pub mod encoder;

pub use claims::{Claims, Session};
pub use decoder::JwtDecoder;
pub use encoder::{IssuedToken, JwtEncoder};

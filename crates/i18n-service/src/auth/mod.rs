//! Authentication primitives: claims structures and bearer token
//! verification.

pub mod claims;
pub mod token;

pub use claims::{Claims, EmployeeClaims, LoginSystem};
pub use token::{TokenError, TokenVerifier};

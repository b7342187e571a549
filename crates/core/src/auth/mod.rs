//! Authentication and password hashing.
//!
//! This module provides:
//! - Password hashing with Argon2id
//! - The user account record
//! - Login, signup and session token verification

mod error;
mod password;
mod service;
mod types;

pub use error::AuthError;
pub use password::{PasswordError, hash_password, verify_password};
pub use service::AuthService;
pub use tracker_shared::auth::UserRole;
pub use types::User;

//! Shared types, errors, and configuration for Tracker.
//!
//! This crate provides common types used across all other crates:
//! - Typed IDs for type-safe entity references
//! - Application-wide error taxonomy
//! - Configuration management
//! - JWT issuing and validation
//! - Auth request/response payloads and token claims

pub mod auth;
pub mod config;
pub mod error;
pub mod jwt;
pub mod types;
pub mod validation;

pub use auth::{Claims, UserRole};
pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use jwt::{JwtConfig, JwtError, JwtService};

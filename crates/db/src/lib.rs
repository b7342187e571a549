//! Database layer with `SeaORM` entities and repositories.
//!
//! This crate provides:
//! - `SeaORM` entity definitions
//! - Repositories implementing the core store ports
//! - Database migrations

pub mod entities;
pub mod migration;
pub mod repositories;

pub use repositories::{BranchRepository, ExpenseRepository, UserRepository};

use std::sync::Arc;
use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use tracker_core::Stores;
use tracker_shared::config::DatabaseConfig;

/// Establishes a connection pool to the database.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(config.url.clone());
    options
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .connect_timeout(Duration::from_secs(10))
        .sqlx_logging(false);
    Database::connect(options).await
}

/// Wires every repository over one connection pool.
#[must_use]
pub fn stores(db: &DatabaseConnection) -> Stores {
    Stores {
        users: Arc::new(UserRepository::new(db.clone())),
        branches: Arc::new(BranchRepository::new(db.clone())),
        expenses: Arc::new(ExpenseRepository::new(db.clone())),
    }
}

//! User repository for database operations.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use tracker_core::auth::User;
use tracker_core::store::{StoreError, UserStore};
use tracker_shared::types::UserId;

use super::store_err;
use crate::entities::users;

/// User repository backed by the `users` table.
#[derive(Debug, Clone)]
pub struct UserRepository {
    db: DatabaseConnection,
}

impl UserRepository {
    /// Creates a new user repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn find_one(&self, column: users::Column, value: &str) -> Result<Option<User>, StoreError> {
        users::Entity::find()
            .filter(column.eq(value))
            .one(&self.db)
            .await
            .map(|model| model.map(to_domain))
            .map_err(store_err)
    }
}

#[async_trait]
impl UserStore for UserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        self.find_one(users::Column::Username, username).await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        self.find_one(users::Column::Email, &email.to_lowercase()).await
    }

    async fn find_by_employee_id(&self, employee_id: &str) -> Result<Option<User>, StoreError> {
        self.find_one(users::Column::EmployeeId, employee_id).await
    }

    async fn insert(&self, user: &User) -> Result<(), StoreError> {
        users::Entity::insert(to_active(user))
            .exec(&self.db)
            .await
            .map_err(store_err)?;
        Ok(())
    }
}

fn to_domain(model: users::Model) -> User {
    User {
        id: UserId::from_uuid(model.id),
        username: model.username,
        email: model.email,
        password_hash: model.password_hash,
        full_name: model.full_name,
        employee_id: model.employee_id,
        department: model.department,
        role: model.role.into(),
        is_active: model.is_active,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    }
}

fn to_active(user: &User) -> users::ActiveModel {
    users::ActiveModel {
        id: Set(user.id.into_inner()),
        username: Set(user.username.clone()),
        email: Set(user.email.clone()),
        password_hash: Set(user.password_hash.clone()),
        full_name: Set(user.full_name.clone()),
        employee_id: Set(user.employee_id.clone()),
        department: Set(user.department.clone()),
        role: Set(user.role.into()),
        is_active: Set(user.is_active),
        created_at: Set(user.created_at.into()),
        updated_at: Set(user.updated_at.into()),
    }
}

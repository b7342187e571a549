//! Branch repository for database operations.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder,
};
use tracker_core::branch::Branch;
use tracker_core::store::{BranchStore, StoreError};
use tracker_shared::types::BranchId;

use super::store_err;
use crate::entities::branches;

/// Branch repository backed by the `branches` table.
#[derive(Debug, Clone)]
pub struct BranchRepository {
    db: DatabaseConnection,
}

impl BranchRepository {
    /// Creates a new branch repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl BranchStore for BranchRepository {
    async fn list(&self) -> Result<Vec<Branch>, StoreError> {
        let models = branches::Entity::find()
            .order_by_desc(branches::Column::CreatedAt)
            .order_by_desc(branches::Column::Id)
            .all(&self.db)
            .await
            .map_err(store_err)?;
        Ok(models.into_iter().map(to_domain).collect())
    }

    async fn find_by_id(&self, id: BranchId) -> Result<Option<Branch>, StoreError> {
        branches::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await
            .map(|model| model.map(to_domain))
            .map_err(store_err)
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Branch>, StoreError> {
        branches::Entity::find()
            .filter(
                Expr::expr(Func::lower(Expr::col(branches::Column::BranchName)))
                    .eq(name.trim().to_lowercase()),
            )
            .one(&self.db)
            .await
            .map(|model| model.map(to_domain))
            .map_err(store_err)
    }

    async fn insert(&self, branch: &Branch) -> Result<(), StoreError> {
        let model = branches::ActiveModel {
            id: Set(branch.id.into_inner()),
            branch_name: Set(branch.branch_name.clone()),
            location: Set(branch.location.clone()),
            contact_person: Set(branch.contact_person.clone()),
            created_at: Set(branch.created_at.into()),
            updated_at: Set(branch.updated_at.into()),
        };
        branches::Entity::insert(model)
            .exec(&self.db)
            .await
            .map_err(store_err)?;
        Ok(())
    }

    async fn update(&self, branch: &Branch) -> Result<bool, StoreError> {
        let changes = branches::ActiveModel {
            branch_name: Set(branch.branch_name.clone()),
            location: Set(branch.location.clone()),
            contact_person: Set(branch.contact_person.clone()),
            updated_at: Set(branch.updated_at.into()),
            ..Default::default()
        };
        let result = branches::Entity::update_many()
            .set(changes)
            .filter(branches::Column::Id.eq(branch.id.into_inner()))
            .exec(&self.db)
            .await
            .map_err(store_err)?;
        Ok(result.rows_affected == 1)
    }

    async fn delete(&self, id: BranchId) -> Result<bool, StoreError> {
        let result = branches::Entity::delete_by_id(id.into_inner())
            .exec(&self.db)
            .await
            .map_err(store_err)?;
        Ok(result.rows_affected == 1)
    }

    async fn count(&self) -> Result<u64, StoreError> {
        branches::Entity::find()
            .count(&self.db)
            .await
            .map_err(store_err)
    }
}

fn to_domain(model: branches::Model) -> Branch {
    Branch {
        id: BranchId::from_uuid(model.id),
        branch_name: model.branch_name,
        location: model.location,
        contact_person: model.contact_person,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    }
}

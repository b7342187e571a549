//! Branch registry operations.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;
use tracker_shared::types::BranchId;
use tracker_shared::validation::describe_errors;
use validator::Validate;

use super::error::BranchError;
use super::types::{Branch, BranchInput};
use crate::store::BranchStore;

/// Creates, edits and removes branches.
#[derive(Clone)]
pub struct BranchService {
    branches: Arc<dyn BranchStore>,
}

impl BranchService {
    /// Creates a new branch service.
    #[must_use]
    pub fn new(branches: Arc<dyn BranchStore>) -> Self {
        Self { branches }
    }

    /// Lists all branches, newest first.
    pub async fn list(&self) -> Result<Vec<Branch>, BranchError> {
        Ok(self.branches.list().await?)
    }

    /// Fetches one branch.
    pub async fn get(&self, id: BranchId) -> Result<Branch, BranchError> {
        self.branches
            .find_by_id(id)
            .await?
            .ok_or(BranchError::NotFound(id))
    }

    /// Registers a branch with a name no other branch uses.
    pub async fn create(&self, input: BranchInput) -> Result<Branch, BranchError> {
        let input = validated(input)?;

        if self.branches.find_by_name(&input.branch_name).await?.is_some() {
            return Err(BranchError::DuplicateName(input.branch_name));
        }

        let now = Utc::now();
        let branch = Branch {
            id: BranchId::new(),
            branch_name: input.branch_name,
            location: input.location,
            contact_person: input.contact_person,
            created_at: now,
            updated_at: now,
        };
        self.branches.insert(&branch).await?;

        info!(branch_id = %branch.id, name = %branch.branch_name, "Branch created");
        Ok(branch)
    }

    /// Replaces every field of a branch.
    pub async fn update(&self, id: BranchId, input: BranchInput) -> Result<Branch, BranchError> {
        let input = validated(input)?;
        let current = self.get(id).await?;

        if let Some(other) = self.branches.find_by_name(&input.branch_name).await?
            && other.id != id
        {
            return Err(BranchError::DuplicateName(input.branch_name));
        }

        let branch = Branch {
            branch_name: input.branch_name,
            location: input.location,
            contact_person: input.contact_person,
            updated_at: Utc::now(),
            ..current
        };
        if !self.branches.update(&branch).await? {
            return Err(BranchError::NotFound(id));
        }

        info!(branch_id = %id, "Branch updated");
        Ok(branch)
    }

    /// Removes a branch.
    pub async fn delete(&self, id: BranchId) -> Result<(), BranchError> {
        if !self.branches.delete(id).await? {
            return Err(BranchError::NotFound(id));
        }
        info!(branch_id = %id, "Branch deleted");
        Ok(())
    }
}

impl std::fmt::Debug for BranchService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BranchService").finish_non_exhaustive()
    }
}

fn validated(input: BranchInput) -> Result<BranchInput, BranchError> {
    let input = input.trimmed();
    input
        .validate()
        .map_err(|e| BranchError::Validation(describe_errors(&e)))?;
    Ok(input)
}

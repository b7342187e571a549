//! Branch types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracker_shared::types::BranchId;
use tracker_shared::validation::non_blank;
use validator::Validate;

/// An organizational branch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Branch {
    /// Branch ID.
    pub id: BranchId,
    /// Unique name, compared case-insensitively.
    pub branch_name: String,
    /// City or address.
    pub location: String,
    /// Person responsible for the branch.
    pub contact_person: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Payload for creating or replacing a branch.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct BranchInput {
    /// Branch name.
    #[validate(
        custom(function = "non_blank", message = "Branch name is required"),
        length(max = 255, message = "Branch name must be at most 255 characters")
    )]
    pub branch_name: String,
    /// City or address.
    #[validate(
        custom(function = "non_blank", message = "Location is required"),
        length(max = 255, message = "Location must be at most 255 characters")
    )]
    pub location: String,
    /// Person responsible for the branch.
    #[validate(
        custom(function = "non_blank", message = "Contact person is required"),
        length(max = 255, message = "Contact person must be at most 255 characters")
    )]
    pub contact_person: String,
}

impl BranchInput {
    /// Returns the input with surrounding whitespace removed.
    #[must_use]
    pub fn trimmed(self) -> Self {
        Self {
            branch_name: self.branch_name.trim().to_string(),
            location: self.location.trim().to_string(),
            contact_person: self.contact_person.trim().to_string(),
        }
    }
}

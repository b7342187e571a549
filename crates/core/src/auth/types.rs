//! User account record.

use chrono::{DateTime, Utc};
use tracker_shared::auth::{UserProfile, UserRole};
use tracker_shared::types::UserId;

/// A stored user account.
///
/// Never serialized directly: the password hash stays on the server and
/// clients only ever see [`UserProfile`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// User ID.
    pub id: UserId,
    /// Unique login name.
    pub username: String,
    /// Unique email, lower-case.
    pub email: String,
    /// Argon2id PHC string.
    pub password_hash: String,
    /// Display name.
    pub full_name: String,
    /// Unique employee identifier.
    pub employee_id: String,
    /// Department name.
    pub department: String,
    /// Account role.
    pub role: UserRole,
    /// Inactive accounts cannot log in.
    pub is_active: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Returns the client-facing view of this account.
    #[must_use]
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id,
            username: self.username.clone(),
            email: self.email.clone(),
            full_name: self.full_name.clone(),
            role: self.role,
            department: self.department.clone(),
            employee_id: self.employee_id.clone(),
        }
    }
}

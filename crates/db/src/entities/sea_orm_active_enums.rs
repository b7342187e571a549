//! `SeaORM` active enums mapped to `PostgreSQL` enum types.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "user_role")]
pub enum UserRole {
    #[sea_orm(string_value = "employee")]
    Employee,
    #[sea_orm(string_value = "manager")]
    Manager,
    #[sea_orm(string_value = "admin")]
    Admin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "expense_status")]
pub enum ExpenseStatus {
    #[sea_orm(string_value = "draft")]
    Draft,
    #[sea_orm(string_value = "submitted")]
    Submitted,
    #[sea_orm(string_value = "approved")]
    Approved,
    #[sea_orm(string_value = "rejected")]
    Rejected,
}

impl From<tracker_shared::UserRole> for UserRole {
    fn from(role: tracker_shared::UserRole) -> Self {
        match role {
            tracker_shared::UserRole::Employee => Self::Employee,
            tracker_shared::UserRole::Manager => Self::Manager,
            tracker_shared::UserRole::Admin => Self::Admin,
        }
    }
}

impl From<UserRole> for tracker_shared::UserRole {
    fn from(role: UserRole) -> Self {
        match role {
            UserRole::Employee => Self::Employee,
            UserRole::Manager => Self::Manager,
            UserRole::Admin => Self::Admin,
        }
    }
}

impl From<tracker_core::expense::ExpenseStatus> for ExpenseStatus {
    fn from(status: tracker_core::expense::ExpenseStatus) -> Self {
        use tracker_core::expense::ExpenseStatus as Core;
        match status {
            Core::Draft => Self::Draft,
            Core::Submitted => Self::Submitted,
            Core::Approved => Self::Approved,
            Core::Rejected => Self::Rejected,
        }
    }
}

impl From<ExpenseStatus> for tracker_core::expense::ExpenseStatus {
    fn from(status: ExpenseStatus) -> Self {
        match status {
            ExpenseStatus::Draft => Self::Draft,
            ExpenseStatus::Submitted => Self::Submitted,
            ExpenseStatus::Approved => Self::Approved,
            ExpenseStatus::Rejected => Self::Rejected,
        }
    }
}

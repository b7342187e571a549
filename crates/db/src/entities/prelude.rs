//! Entity prelude.

pub use super::branches::Entity as Branches;
pub use super::expenses::Entity as Expenses;
pub use super::users::Entity as Users;

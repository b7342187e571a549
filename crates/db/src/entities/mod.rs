//! `SeaORM` entities.

pub mod prelude;

pub mod branches;
pub mod expenses;
pub mod sea_orm_active_enums;
pub mod users;

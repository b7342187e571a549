//! Branch registry.

mod error;
mod service;
mod types;

pub use error::BranchError;
pub use service::BranchService;
pub use types::{Branch, BranchInput};

//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument.

pub mod commit_repo;
pub mod project_config_repo;
pub mod project_repo;

pub use commit_repo::{CommitInsert, CommitRepo};
pub use project_config_repo::ProjectConfigRepo;
pub use project_repo::ProjectRepo;

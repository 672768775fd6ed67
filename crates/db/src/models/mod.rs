//! Row structs and insert DTOs.
//!
//! Each submodule pairs a `FromRow` + `Serialize` entity matching the table
//! with a plain insert DTO built by the commit coordinator.

pub mod project;
pub mod project_config;

//! Domain core for the sitesmith configuration service.
//!
//! Everything in this crate is pure: no I/O, no async, no clocks (callers
//! pass `now` explicitly). The API and store crates build on these types;
//! this crate depends on neither.

pub mod brand;
pub mod canonical;
pub mod config;
pub mod draft;
pub mod error;
pub mod generator;
pub mod industry;
pub mod preview;
pub mod slug;
pub mod templates;
pub mod types;

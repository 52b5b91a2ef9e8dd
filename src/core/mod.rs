//! Record-keeping core: models, persistence, and the registry that ties them together

pub mod auth;
pub mod error;
pub mod models;
pub mod registry;
pub mod report;
pub mod sample;
pub mod stats;
pub mod storage;

/// Returns the current version of the `CheckMyGrade` crate
#[must_use]
pub const fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

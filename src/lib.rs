//! Shared library for `CheckMyGrade`
//! Contains the record core, configuration and logging used by the CLI

pub mod config;
pub mod core;
pub mod logger;

pub use crate::core::error::{ModelError, RegistryError, StorageError};
pub use crate::core::get_version;
pub use crate::core::registry::Registry;

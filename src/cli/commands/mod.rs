//! CLI command handlers for `CheckMyGrade`.
//!
//! Each command is implemented in its own submodule.

pub mod config;
pub mod generate;
pub mod menu;

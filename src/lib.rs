//! dirsort - sort a folder's files into category subfolders by extension
//!
//! This library provides extension-based classification, a collision-safe
//! move engine with dry-run support, an append-only move log, and TOML
//! configuration for the category table and entry filters.

pub mod cli;
pub mod config;
pub mod file_category;
pub mod file_organizer;
pub mod move_log;
pub mod output;

pub use config::{CompiledFilters, Config, ConfigError};
pub use file_category::{ExtensionTable, FALLBACK_CATEGORY};
pub use file_organizer::{FileOrganizer, MoveRecord, OrganizeError, OrganizeReport};
pub use move_log::MoveLog;

pub use cli::{Cli, RunOutcome, run};

//! Generations Store - YAML files and templates on disk
//!
//! Provides:
//! - Person database reading (strict, duplicate merging) and write-back
//! - Render configuration with per-tree options and level themes
//! - A template engine reading its templates from files

pub mod config;
pub mod database;
pub mod errors;
pub mod templates;
pub mod themes;

// Re-export key types
pub use config::{RenderConfig, TreeConfig};
pub use database::{load_databases, read_database_file, write_database_file};
pub use errors::Result;
pub use templates::{FileTemplates, TemplatePaths};

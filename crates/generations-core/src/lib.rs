//! Generations Core - genealogy model and family tree renderer
//!
//! This crate provides:
//! - Person records with names, life events, parents and partnerships
//! - An in-memory person database with duplicate merging, ID generation and
//!   anonymization
//! - Relationship derivation (children, co-parents, partners)
//! - The recursive parent/child tree traversal producing genealogytree text
//!   through a pluggable template engine
//! - Level styling relative to the proband

pub mod errors;
pub mod level;
pub mod logging_facility;
pub mod model;
pub mod ops;
pub mod queries;
pub mod render;

// Re-export commonly used types
pub use errors::{ExError, ExErrorKind, GenealogyError, Result};
pub use level::{Level, LevelConfig};
pub use model::{DatePlace, Gender, Name, Partnership, Person, Reference, Source};
pub use ops::{Database, DatabaseFile, IdStrategy};
pub use queries::PersonRef;
pub use render::{render_tree, RenderPersonOptions, RenderTreeOptions, StringTemplates};

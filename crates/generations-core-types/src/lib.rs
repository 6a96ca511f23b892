//! Core types shared across the generations crates
//!
//! This crate provides foundational types used by the error and logging
//! facilities of the tree renderer:
//!
//! - **Correlation types**: RunId for tying all events of one render together
//! - **Sensitive data**: Sensitive<T> marker for redacting personal data
//! - **Schema constants**: Canonical field keys and event names

pub mod correlation;
pub mod schema;
pub mod sensitive;

pub use correlation::RunId;
pub use sensitive::Sensitive;

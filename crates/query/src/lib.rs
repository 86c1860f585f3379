//! Recollect Query - relational trimming across collections.
//!
//! This crate provides:
//!
//! - `QualifiedAttribute`: a parsed `collection.attribute` reference
//! - `Relation`: a left/right pair of references
//! - `join`: filters and trims a set of named collections, returning
//!   duplicates and leaving the inputs untouched

mod join;
mod relation;

pub use join::join;
pub use relation::{QualifiedAttribute, Relation};

// Collection maps are keyed by name.
pub use hashbrown::HashMap;

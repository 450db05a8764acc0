//! Core types for redmap
//!
//! Leaf crate of the workspace: record identity and key construction,
//! field bindings, scalar values and their stored representation, the
//! index score function, and the shared error type.
//!
//! Nothing here touches a store; the `redmap-store` and `redmap-mapper`
//! crates build on these types.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod score;
pub mod types;
pub mod value;

// Re-exports
pub use error::{RedmapError, Result};
pub use score::{score_str, score_value};
pub use types::{
    container_counter, container_id, index_key, FieldBinding, FieldKind, RecordId,
};
pub use value::Value;

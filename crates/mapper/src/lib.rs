//! Mapping engine for redmap
//!
//! Persists schema-bound objects as hash records in a store, maintains
//! per-field secondary indexes for equality search, and reconstitutes
//! objects from stored records:
//! - [`Entity`]: the statically declared per-type schema and accessors
//! - `Member`: per-field adapters (scalar / reference / list)
//! - [`Mapper`]: batched save/load/delete orchestration per record
//! - [`SearchCriteria`] / [`Finder`]: equality search by index
//!   intersection
//!
//! The engine consumes the store through the `redmap-store` contract
//! only; it never talks to a concrete backend directly.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod criteria;
pub mod entity;
pub mod finder;
pub mod mapper;
mod member;

// Re-exports
pub use criteria::{Qualifier, SearchCriteria};
pub use entity::Entity;
pub use finder::Finder;
pub use mapper::Mapper;

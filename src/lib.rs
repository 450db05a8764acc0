//! redmap: object-to-store mapping with per-field secondary indexes.
//!
//! A schema-bound object persists as a hash record under
//! `"<Type>:<serial>"`; every scalar and reference field also lands in
//! a per-(type, field) sorted-set index keyed by a deterministic score,
//! so equality search is an index range query plus an intersection.
//!
//! ```ignore
//! use redmap::{Finder, Mapper, MemoryStore, Pool};
//! use std::sync::Arc;
//!
//! let pool = Pool::with_defaults(Arc::new(MemoryStore::new()));
//!
//! let mut customer = Customer::named("tom", "silva");
//! let mut mapper = Mapper::new(&customer, &pool)?;
//! let id = mapper.save(&mut customer)?;
//!
//! let mut fresh = Customer::default();
//! let mut mapper = Mapper::with_id(&fresh, &pool, id)?;
//! mapper.load(&mut fresh)?;
//!
//! let criteria = mapper.criteria(&fresh);
//! let matches = Finder::new(criteria, Customer::default, pool.clone()).find()?;
//! ```
//!
//! The store behind the [`Pool`] is anything implementing [`Store`];
//! [`MemoryStore`] is the embedded backend.

// ============================================================================
// Public API types
// ============================================================================

// Core value and identity types
pub use redmap_core::{score_str, score_value, FieldBinding, FieldKind, RecordId, Value};

// Errors
pub use redmap_core::{RedmapError, Result};

// Store contract, embedded backend, pooling
pub use redmap_store::{Batch, Command, Conn, MemoryStore, Pool, PoolConfig, Reply, Store};

// Mapping engine
pub use redmap_mapper::{Entity, Finder, Mapper, Qualifier, SearchCriteria};

//! Store layer for redmap
//!
//! This crate carries the client contract the mapping engine consumes:
//! atomic counters, hash/list/sorted-set primitives, and pipelined
//! batch submission. It also ships:
//! - `MemoryStore`: the embedded in-memory backend (DashMap-sharded)
//! - `Pool`: a bounded connection pool handing out `Conn` guards
//!
//! The mapping engine depends only on the [`Store`] trait; any client
//! for a real remote store slots in behind the same contract.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod batch;
pub mod command;
pub mod memory;
pub mod pool;
pub mod sorted;
pub mod store;

// Re-exports
pub use batch::Batch;
pub use command::{Command, Reply};
pub use memory::MemoryStore;
pub use pool::{Conn, Pool, PoolConfig};
pub use sorted::SortedSet;
pub use store::Store;

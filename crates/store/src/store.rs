//! The store client contract.

use redmap_core::Result;

use crate::batch::Batch;
use crate::command::Reply;

/// Client contract for the remote store.
///
/// The mapping engine consumes a pre-existing store client as a black
/// box offering atomic counters, hash/list/sorted-set primitives, and
/// pipelined batch submission. Mutations travel through [`Batch`]es;
/// the direct methods cover id allocation and the reads that cannot be
/// answered from a pending batch (list contents, index range queries,
/// container pointer resolution before a delete).
///
/// Within one batch, commands are applied in enqueue order without
/// interleaving from the same batch. Batches from different callers
/// are not mutually isolated; no cross-batch atomicity exists.
pub trait Store: Send + Sync {
    /// Atomically increment the named counter and return the new value.
    fn incr(&self, counter: &str) -> Result<u64>;

    /// Read one hash attribute directly.
    fn hget(&self, key: &str, attr: &str) -> Result<Option<String>>;

    /// Read the whole list at `key`; a missing key reads as empty.
    fn lrange(&self, key: &str) -> Result<Vec<String>>;

    /// Members of the sorted set at `key` whose score lies in the
    /// closed range `[min, max]`, in score order. A missing key reads
    /// as empty.
    fn zrange_by_score(&self, key: &str, min: f64, max: f64) -> Result<Vec<String>>;

    /// Submit a batch; one reply per command, in enqueue order.
    fn execute(&self, batch: Batch) -> Result<Vec<Reply>>;
}

//! In-memory store backend.
//!
//! DashMap-sharded keyspace holding hash, list, and sorted-set entries
//! plus a counter map. Reads go through lock-free shard guards; a write
//! locks only the touched key's shard. Commands within one batch apply
//! in enqueue order; batches from different callers may interleave,
//! exactly the isolation the client contract promises (none).
//!
//! Counter keys (bare type names, `<Type>:<attr>` for containers) live
//! in their own map and never collide with record keys, which always
//! carry a serial segment.

use dashmap::mapref::entry::Entry as MapEntry;
use dashmap::DashMap;
use redmap_core::{RedmapError, Result};
use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use crate::batch::Batch;
use crate::command::{Command, Reply};
use crate::sorted::SortedSet;
use crate::store::Store;

/// One keyspace entry.
#[derive(Debug, Clone)]
enum Entry {
    Hash(FxHashMap<String, String>),
    List(Vec<String>),
    Sorted(SortedSet),
}

/// In-memory implementation of the [`Store`] contract.
///
/// Serves as the embedded backend and the test double for the mapping
/// engine. Addressing a key with a command family of the wrong kind
/// (e.g. `rpush` against a hash) is a [`RedmapError::WrongType`] error,
/// as a remote store would refuse it.
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: DashMap<String, Entry>,
    counters: DashMap<String, u64>,
}

impl MemoryStore {
    /// Empty store.
    pub fn new() -> Self {
        MemoryStore::default()
    }

    /// Number of keyspace entries (counters excluded).
    pub fn entry_count(&self) -> usize {
        self.data.len()
    }

    /// Whether the keyspace holds an entry at `key`.
    pub fn contains_key(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }

    fn apply(&self, command: Command) -> Result<Reply> {
        trace!(?command, "applying command");
        match command {
            Command::HSet { key, attr, value } => {
                match self.data.entry(key) {
                    MapEntry::Occupied(mut occupied) => match occupied.get_mut() {
                        Entry::Hash(hash) => {
                            hash.insert(attr, value);
                        }
                        _ => return Err(RedmapError::wrong_type(occupied.key().as_str())),
                    },
                    MapEntry::Vacant(vacant) => {
                        let mut hash = FxHashMap::default();
                        hash.insert(attr, value);
                        vacant.insert(Entry::Hash(hash));
                    }
                }
                Ok(Reply::Unit)
            }
            Command::HGet { key, attr } => match self.data.get(&key) {
                Some(entry) => match entry.value() {
                    Entry::Hash(hash) => Ok(Reply::Field(hash.get(&attr).cloned())),
                    _ => Err(RedmapError::wrong_type(key)),
                },
                None => Ok(Reply::Field(None)),
            },
            Command::HDel { key, attr } => {
                if let MapEntry::Occupied(mut occupied) = self.data.entry(key) {
                    match occupied.get_mut() {
                        Entry::Hash(hash) => {
                            hash.remove(&attr);
                            if hash.is_empty() {
                                occupied.remove();
                            }
                        }
                        _ => return Err(RedmapError::wrong_type(occupied.key().as_str())),
                    }
                }
                Ok(Reply::Unit)
            }
            Command::ZAdd { key, member, score } => {
                match self.data.entry(key) {
                    MapEntry::Occupied(mut occupied) => match occupied.get_mut() {
                        Entry::Sorted(set) => set.add(score, &member),
                        _ => return Err(RedmapError::wrong_type(occupied.key().as_str())),
                    },
                    MapEntry::Vacant(vacant) => {
                        let mut set = SortedSet::new();
                        set.add(score, &member);
                        vacant.insert(Entry::Sorted(set));
                    }
                }
                Ok(Reply::Unit)
            }
            Command::ZRem { key, member } => {
                if let MapEntry::Occupied(mut occupied) = self.data.entry(key) {
                    match occupied.get_mut() {
                        Entry::Sorted(set) => {
                            set.remove_member(&member);
                            if set.is_empty() {
                                occupied.remove();
                            }
                        }
                        _ => return Err(RedmapError::wrong_type(occupied.key().as_str())),
                    }
                }
                Ok(Reply::Unit)
            }
            Command::RPush { key, value } => {
                match self.data.entry(key) {
                    MapEntry::Occupied(mut occupied) => match occupied.get_mut() {
                        Entry::List(list) => list.push(value),
                        _ => return Err(RedmapError::wrong_type(occupied.key().as_str())),
                    },
                    MapEntry::Vacant(vacant) => {
                        vacant.insert(Entry::List(vec![value]));
                    }
                }
                Ok(Reply::Unit)
            }
            Command::Del { key } => {
                self.data.remove(&key);
                Ok(Reply::Unit)
            }
        }
    }
}

impl Store for MemoryStore {
    fn incr(&self, counter: &str) -> Result<u64> {
        let mut entry = self.counters.entry(counter.to_string()).or_insert(0);
        *entry += 1;
        Ok(*entry)
    }

    fn hget(&self, key: &str, attr: &str) -> Result<Option<String>> {
        match self.data.get(key) {
            Some(entry) => match entry.value() {
                Entry::Hash(hash) => Ok(hash.get(attr).cloned()),
                _ => Err(RedmapError::wrong_type(key)),
            },
            None => Ok(None),
        }
    }

    fn lrange(&self, key: &str) -> Result<Vec<String>> {
        match self.data.get(key) {
            Some(entry) => match entry.value() {
                Entry::List(list) => Ok(list.clone()),
                _ => Err(RedmapError::wrong_type(key)),
            },
            None => Ok(Vec::new()),
        }
    }

    fn zrange_by_score(&self, key: &str, min: f64, max: f64) -> Result<Vec<String>> {
        match self.data.get(key) {
            Some(entry) => match entry.value() {
                Entry::Sorted(set) => Ok(set.range(min, max)),
                _ => Err(RedmapError::wrong_type(key)),
            },
            None => Ok(Vec::new()),
        }
    }

    fn execute(&self, batch: Batch) -> Result<Vec<Reply>> {
        debug!(commands = batch.len(), "executing batch");
        let mut replies = Vec::with_capacity(batch.len());
        for command in batch.into_commands() {
            replies.push(self.apply(command)?);
        }
        Ok(replies)
    }
}

//! Store commands and their deferred replies.

use redmap_core::{RedmapError, Result};

/// One store operation, buffered into a [`crate::Batch`].
///
/// The command set mirrors the store primitives the mapping engine
/// needs: hash field writes/reads/removals, sorted-set pair upkeep,
/// list appends, and whole-entry deletion.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Set one attribute of the hash at `key`.
    HSet {
        /// Hash key.
        key: String,
        /// Attribute name.
        attr: String,
        /// Formatted value text.
        value: String,
    },
    /// Read one attribute of the hash at `key`.
    HGet {
        /// Hash key.
        key: String,
        /// Attribute name.
        attr: String,
    },
    /// Remove one attribute of the hash at `key`.
    HDel {
        /// Hash key.
        key: String,
        /// Attribute name.
        attr: String,
    },
    /// Insert a (member, score) pair into the sorted set at `key`.
    ZAdd {
        /// Sorted-set key.
        key: String,
        /// Member, typically a record id.
        member: String,
        /// Score of the pair.
        score: f64,
    },
    /// Remove every pair for `member` from the sorted set at `key`.
    ZRem {
        /// Sorted-set key.
        key: String,
        /// Member whose pairs are removed.
        member: String,
    },
    /// Append a value to the list at `key`, creating it if absent.
    RPush {
        /// List key.
        key: String,
        /// Formatted element text.
        value: String,
    },
    /// Remove the whole entry at `key`, whatever its kind.
    Del {
        /// Key to remove.
        key: String,
    },
}

impl Command {
    /// The key this command addresses.
    pub fn key(&self) -> &str {
        match self {
            Command::HSet { key, .. }
            | Command::HGet { key, .. }
            | Command::HDel { key, .. }
            | Command::ZAdd { key, .. }
            | Command::ZRem { key, .. }
            | Command::RPush { key, .. }
            | Command::Del { key } => key,
        }
    }
}

/// Deferred result of one batched command, available once the owning
/// batch commits.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    /// Command completed with nothing to return.
    Unit,
    /// Result of an [`Command::HGet`]: the attribute value, if present.
    Field(Option<String>),
}

impl Reply {
    /// View an `HGet` reply's field value.
    pub fn as_field(&self) -> Result<Option<&str>> {
        match self {
            Reply::Field(value) => Ok(value.as_deref()),
            Reply::Unit => Err(RedmapError::unexpected_reply("hash field")),
        }
    }
}

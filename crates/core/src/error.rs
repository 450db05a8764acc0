//! Error types shared across the redmap crates.

use thiserror::Error;

use crate::types::FieldKind;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, RedmapError>;

/// Unified error type for store and mapping operations.
///
/// Field-level conditions that the mapping layer handles by skipping
/// (absent values, kind mismatches, unparseable stored text) are not
/// fatal; the variants here are the ones that abort an operation or
/// surface through the value-layer API.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RedmapError {
    /// Malformed caller input (bad key, bad config text, ...).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A store key already holds an entry of a different kind.
    #[error("key '{key}' holds an entry of a different kind")]
    WrongType {
        /// The key that was addressed with the wrong command family.
        key: String,
    },

    /// A stored representation could not be converted back to its
    /// declared kind.
    #[error("cannot parse '{value}' as {kind} for attribute '{attr}'")]
    Parse {
        /// Attribute the value was stored under.
        attr: String,
        /// Declared kind of the field binding.
        kind: FieldKind,
        /// The offending stored text.
        value: String,
    },

    /// The connection pool had no free handle within the configured wait.
    #[error("connection pool exhausted after {waited_ms}ms")]
    PoolTimeout {
        /// How long the caller waited before giving up.
        waited_ms: u64,
    },

    /// `load` or `delete` was called on a mapper with no bound id.
    #[error("no id bound for record type '{type_name}'")]
    MissingId {
        /// Type name of the mapper's record.
        type_name: &'static str,
    },

    /// The store answered a batched command with an unexpected reply shape.
    #[error("unexpected reply from store, expected {expected}")]
    UnexpectedReply {
        /// What the caller was expecting to unwrap.
        expected: &'static str,
    },
}

impl RedmapError {
    /// Convenience constructor for [`RedmapError::InvalidInput`].
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        RedmapError::InvalidInput(msg.into())
    }

    /// Convenience constructor for [`RedmapError::WrongType`].
    pub fn wrong_type(key: impl Into<String>) -> Self {
        RedmapError::WrongType { key: key.into() }
    }

    /// Convenience constructor for [`RedmapError::UnexpectedReply`].
    pub fn unexpected_reply(expected: &'static str) -> Self {
        RedmapError::UnexpectedReply { expected }
    }
}

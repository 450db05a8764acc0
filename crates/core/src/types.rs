//! Record identity, field bindings, and key construction.
//!
//! Every persisted key follows one of three fixed layouts:
//! - record hash: `<Type>:<serial>`
//! - secondary index: `index:<Type>:<attr>`
//! - list container: `<Type>:<attr>:<serial>`
//!
//! The layouts are a compatibility surface and must be reproduced
//! bit-for-bit; helpers here are the only place they are spelled out.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Separator between key segments.
const SEP: char = ':';

/// Prefix of every secondary index key.
const INDEX_PREFIX: &str = "index";

// =============================================================================
// RecordId
// =============================================================================

/// Identity of a persisted record: `"<Type>:<serial>"`.
///
/// Assigned at most once, either supplied by the caller or generated
/// on first save from the store's counter for the type name, and never
/// changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecordId(String);

impl RecordId {
    /// Build an id from a type name and a counter serial.
    pub fn new(type_name: &str, serial: u64) -> Self {
        RecordId(format!("{type_name}{SEP}{serial}"))
    }

    /// Wrap an id string as stored, e.g. a pointer attribute's value.
    pub fn from_string(id: String) -> Self {
        RecordId(id)
    }

    /// The id as stored.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Type-name segment of the id.
    pub fn type_name(&self) -> &str {
        self.0.split(SEP).next().unwrap_or("")
    }

    /// Consume the id, yielding the stored string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// Field bindings
// =============================================================================

/// Value kind of one persisted field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldKind {
    /// UTF-8 string scalar.
    Str,
    /// Signed integer scalar.
    Int,
    /// Boolean scalar, stored as `"1"` / `"0"`.
    Bool,
    /// Reference to a nested record; the attribute stores the child id.
    Ref,
    /// List of string scalars held in a separate container entry.
    StrList,
}

impl FieldKind {
    /// Whether this kind is a plain scalar (string, int, bool).
    pub fn is_scalar(self) -> bool {
        matches!(self, FieldKind::Str | FieldKind::Int | FieldKind::Bool)
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FieldKind::Str => "string",
            FieldKind::Int => "int",
            FieldKind::Bool => "bool",
            FieldKind::Ref => "reference",
            FieldKind::StrList => "string list",
        };
        f.write_str(name)
    }
}

/// Static description of one persisted field: remote attribute name
/// plus value kind. Immutable, declared once per type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldBinding {
    /// Attribute name in the record hash.
    pub attr: &'static str,
    /// Declared value kind.
    pub kind: FieldKind,
}

impl FieldBinding {
    /// Build a binding of an arbitrary kind.
    pub const fn new(attr: &'static str, kind: FieldKind) -> Self {
        FieldBinding { attr, kind }
    }

    /// String field binding.
    pub const fn str(attr: &'static str) -> Self {
        Self::new(attr, FieldKind::Str)
    }

    /// Integer field binding.
    pub const fn int(attr: &'static str) -> Self {
        Self::new(attr, FieldKind::Int)
    }

    /// Boolean field binding.
    pub const fn bool(attr: &'static str) -> Self {
        Self::new(attr, FieldKind::Bool)
    }

    /// Reference field binding.
    pub const fn reference(attr: &'static str) -> Self {
        Self::new(attr, FieldKind::Ref)
    }

    /// String-list field binding.
    pub const fn str_list(attr: &'static str) -> Self {
        Self::new(attr, FieldKind::StrList)
    }
}

// =============================================================================
// Key construction
// =============================================================================

/// Secondary index key for a (type, attribute) pair: `index:<Type>:<attr>`.
pub fn index_key(type_name: &str, attr: &str) -> String {
    format!("{INDEX_PREFIX}{SEP}{type_name}{SEP}{attr}")
}

/// Synthetic id of a list container: `<Type>:<attr>:<serial>`.
pub fn container_id(type_name: &str, attr: &str, serial: u64) -> String {
    format!("{type_name}{SEP}{attr}{SEP}{serial}")
}

/// Counter key used to allocate container serials: `<Type>:<attr>`.
pub fn container_counter(type_name: &str, attr: &str) -> String {
    format!("{type_name}{SEP}{attr}")
}

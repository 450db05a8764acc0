//! Schema-bound entity access.

use redmap_core::{FieldBinding, Value};

/// A type persistable through the mapping layer.
///
/// Implementations declare a static schema (one [`FieldBinding`] per
/// persisted field, built once per type) and answer typed accessors by
/// attribute name. This replaces runtime field discovery: the mapper
/// never inspects the type beyond what the schema declares.
///
/// An absent value is `None`; every member operation treats absence as
/// a no-op, never an error. The list and child accessors default to
/// absent so scalar-only types implement just the scalar pair.
pub trait Entity {
    /// Remote type name; the first segment of every record id.
    fn type_name(&self) -> &'static str;

    /// Declared field bindings for this type.
    fn bindings(&self) -> &'static [FieldBinding];

    /// Current value of a scalar field.
    fn get(&self, attr: &str) -> Option<Value>;

    /// Assign a scalar field loaded from the store.
    fn set(&mut self, attr: &str, value: Value);

    /// Current elements of a list field.
    fn get_list(&self, _attr: &str) -> Option<Vec<Value>> {
        None
    }

    /// Assign a list field loaded from the store.
    fn set_list(&mut self, _attr: &str, _values: Vec<Value>) {}

    /// Nested entity behind a reference field, if populated.
    fn child(&self, _attr: &str) -> Option<&dyn Entity> {
        None
    }

    /// Mutable access to the nested entity behind a reference field.
    fn child_mut(&mut self, _attr: &str) -> Option<&mut dyn Entity> {
        None
    }
}

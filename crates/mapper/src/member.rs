//! Per-field member adapters.
//!
//! A `Member` translates between one entity field and its remote shape.
//! The variant set is closed (scalar, reference, list) and chosen at
//! schema-build time from the field's declared kind; dispatch is a
//! plain match, no runtime type inspection.
//!
//! Every operation takes the active batch (or connection) as an
//! explicit parameter, so nested mapper calls stay side-effect
//! transparent. An absent field value makes the operation a no-op; a
//! value whose kind disagrees with the binding is logged and skipped,
//! never fatal to the other members.

use redmap_core::{
    container_counter, container_id, index_key, score_str, score_value, FieldBinding, FieldKind,
    RecordId, Result, Value,
};
use redmap_store::{Batch, Command, Conn, Reply};
use tracing::warn;

use crate::criteria::SearchCriteria;
use crate::entity::Entity;
use crate::mapper::Mapper;

/// Per-field adapter between an entity field and its remote
/// representation.
pub(crate) enum Member {
    Scalar(ScalarMember),
    Reference(ReferenceMember),
    List(ListMember),
}

impl Member {
    /// Enqueue this field's save work. References cascade their nested
    /// mapper's save (own batch, own connection) before contributing
    /// the pointer write to `batch`.
    pub(crate) fn save(
        &mut self,
        entity: &mut dyn Entity,
        type_name: &str,
        id: &RecordId,
        conn: &Conn,
        batch: &mut Batch,
    ) -> Result<()> {
        match self {
            Member::Scalar(member) => {
                member.save(&*entity, type_name, id, batch);
                Ok(())
            }
            Member::Reference(member) => member.save(entity, type_name, id, batch),
            Member::List(member) => member.save(&*entity, type_name, id, conn, batch),
        }
    }

    /// Enqueue this field's read, answering the reply slot to sync
    /// from, or `None` when the member has nothing to read.
    pub(crate) fn enqueue_load(&self, id: &RecordId, batch: &mut Batch) -> Option<usize> {
        match self {
            Member::Scalar(member) => Some(member.enqueue_load(id, batch)),
            Member::Reference(member) => member.enqueue_load(id, batch),
            Member::List(member) => Some(member.enqueue_load(id, batch)),
        }
    }

    /// Parse the committed read result back into the field. References
    /// and lists take their second round trip here.
    pub(crate) fn sync(
        &mut self,
        entity: &mut dyn Entity,
        reply: &Reply,
        conn: &Conn,
    ) -> Result<()> {
        match self {
            Member::Scalar(member) => member.sync(entity, reply),
            Member::Reference(member) => member.sync(entity, reply),
            Member::List(member) => member.sync(entity, reply, conn),
        }
    }

    /// Resolve state a delete needs that only the store knows: the
    /// container pointer of a list field that was never saved or
    /// loaded through this mapper.
    pub(crate) fn resolve_for_delete(&mut self, id: &RecordId, conn: &Conn) -> Result<()> {
        match self {
            Member::List(member) => member.resolve_container(id, conn),
            Member::Scalar(_) | Member::Reference(_) => Ok(()),
        }
    }

    /// Enqueue this field's delete work: attribute removal plus index
    /// removal (plus container removal for lists). Unconditional: a
    /// record being deleted sheds every declared attribute.
    pub(crate) fn delete(&self, type_name: &str, id: &RecordId, batch: &mut Batch) {
        match self {
            Member::Scalar(member) => member.delete(type_name, id, batch),
            Member::Reference(member) => member.delete(type_name, id, batch),
            Member::List(member) => member.delete(type_name, id, batch),
        }
    }

    /// Cascade a reference field's delete into its nested record. Runs
    /// after the parent batch commits, so the parent's pointer is gone
    /// before the child record is.
    pub(crate) fn cascade_delete(&mut self, entity: &mut dyn Entity) -> Result<()> {
        match self {
            Member::Reference(member) => member.cascade_delete(entity),
            Member::Scalar(_) | Member::List(_) => Ok(()),
        }
    }

    /// Append this field's qualifiers to `criteria`, reflecting the
    /// entity's current values. References contribute nothing.
    pub(crate) fn contribute_criteria(
        &self,
        entity: &dyn Entity,
        type_name: &str,
        criteria: &mut SearchCriteria,
    ) {
        match self {
            Member::Scalar(member) => member.contribute_criteria(entity, type_name, criteria),
            Member::Reference(_) => {}
            Member::List(member) => member.contribute_criteria(entity, type_name, criteria),
        }
    }
}

// =============================================================================
// Scalar
// =============================================================================

/// String/int/bool field stored as one hash attribute plus one index
/// pair.
pub(crate) struct ScalarMember {
    binding: FieldBinding,
}

impl ScalarMember {
    pub(crate) fn new(binding: FieldBinding) -> Self {
        ScalarMember { binding }
    }

    /// Current value, if present and of the declared kind.
    fn value(&self, entity: &dyn Entity) -> Option<Value> {
        let value = entity.get(self.binding.attr)?;
        if value.kind() != self.binding.kind {
            warn!(
                attr = self.binding.attr,
                expected = %self.binding.kind,
                found = %value.kind(),
                "field value disagrees with its binding, skipping"
            );
            return None;
        }
        Some(value)
    }

    fn save(&self, entity: &dyn Entity, type_name: &str, id: &RecordId, batch: &mut Batch) {
        let Some(value) = self.value(entity) else {
            return;
        };
        let index = index_key(type_name, self.binding.attr);
        batch.enqueue(Command::HSet {
            key: id.as_str().to_string(),
            attr: self.binding.attr.to_string(),
            value: value.format(),
        });
        // clear any pair left by a previous value before re-indexing;
        // the index pair and the attribute land in the same commit
        batch.enqueue(Command::ZRem {
            key: index.clone(),
            member: id.as_str().to_string(),
        });
        batch.enqueue(Command::ZAdd {
            key: index,
            member: id.as_str().to_string(),
            score: score_value(&value),
        });
    }

    fn enqueue_load(&self, id: &RecordId, batch: &mut Batch) -> usize {
        batch.enqueue(Command::HGet {
            key: id.as_str().to_string(),
            attr: self.binding.attr.to_string(),
        })
    }

    fn sync(&self, entity: &mut dyn Entity, reply: &Reply) -> Result<()> {
        let Some(text) = reply.as_field()? else {
            return Ok(());
        };
        match Value::parse(self.binding.kind, self.binding.attr, text) {
            Ok(value) => entity.set(self.binding.attr, value),
            Err(err) => warn!(%err, "skipping unparseable stored value"),
        }
        Ok(())
    }

    fn delete(&self, type_name: &str, id: &RecordId, batch: &mut Batch) {
        batch.enqueue(Command::HDel {
            key: id.as_str().to_string(),
            attr: self.binding.attr.to_string(),
        });
        batch.enqueue(Command::ZRem {
            key: index_key(type_name, self.binding.attr),
            member: id.as_str().to_string(),
        });
    }

    fn contribute_criteria(
        &self,
        entity: &dyn Entity,
        type_name: &str,
        criteria: &mut SearchCriteria,
    ) {
        if let Some(value) = self.value(entity) {
            criteria.add(index_key(type_name, self.binding.attr), score_value(&value));
        }
    }
}

// =============================================================================
// Reference
// =============================================================================

/// Field holding a nested record; the attribute stores the child id and
/// the index scores that id as a string.
pub(crate) struct ReferenceMember {
    binding: FieldBinding,
    /// Inner mapper for the nested record, built once at member-build
    /// time iff the field was populated.
    mapper: Option<Box<Mapper>>,
}

impl ReferenceMember {
    pub(crate) fn new(binding: FieldBinding, mapper: Option<Box<Mapper>>) -> Self {
        ReferenceMember { binding, mapper }
    }

    fn save(
        &mut self,
        entity: &mut dyn Entity,
        type_name: &str,
        id: &RecordId,
        batch: &mut Batch,
    ) -> Result<()> {
        let Some(mapper) = self.mapper.as_mut() else {
            return Ok(());
        };
        let Some(child) = entity.child_mut(self.binding.attr) else {
            warn!(
                attr = self.binding.attr,
                "reference field emptied since mapper construction, skipping"
            );
            return Ok(());
        };
        // child before parent: the pointer value must exist to be written
        let child_id = mapper.save(child)?;
        let index = index_key(type_name, self.binding.attr);
        batch.enqueue(Command::HSet {
            key: id.as_str().to_string(),
            attr: self.binding.attr.to_string(),
            value: child_id.as_str().to_string(),
        });
        batch.enqueue(Command::ZRem {
            key: index.clone(),
            member: id.as_str().to_string(),
        });
        batch.enqueue(Command::ZAdd {
            key: index,
            member: id.as_str().to_string(),
            score: score_str(child_id.as_str()),
        });
        Ok(())
    }

    fn enqueue_load(&self, id: &RecordId, batch: &mut Batch) -> Option<usize> {
        self.mapper.as_ref()?;
        Some(batch.enqueue(Command::HGet {
            key: id.as_str().to_string(),
            attr: self.binding.attr.to_string(),
        }))
    }

    fn sync(&mut self, entity: &mut dyn Entity, reply: &Reply) -> Result<()> {
        let Some(mapper) = self.mapper.as_mut() else {
            return Ok(());
        };
        let Some(pointer) = reply.as_field()? else {
            return Ok(());
        };
        let Some(child) = entity.child_mut(self.binding.attr) else {
            return Ok(());
        };
        // the nested load is its own round trip, one per nesting level
        mapper.load_id(child, RecordId::from_string(pointer.to_string()))
    }

    fn delete(&self, type_name: &str, id: &RecordId, batch: &mut Batch) {
        batch.enqueue(Command::HDel {
            key: id.as_str().to_string(),
            attr: self.binding.attr.to_string(),
        });
        batch.enqueue(Command::ZRem {
            key: index_key(type_name, self.binding.attr),
            member: id.as_str().to_string(),
        });
    }

    fn cascade_delete(&mut self, entity: &mut dyn Entity) -> Result<()> {
        let Some(mapper) = self.mapper.as_mut() else {
            return Ok(());
        };
        if mapper.id().is_none() {
            // nested record was never saved or loaded, nothing to remove
            return Ok(());
        }
        let Some(child) = entity.child_mut(self.binding.attr) else {
            return Ok(());
        };
        mapper.delete(child)
    }
}

// =============================================================================
// List
// =============================================================================

/// String-list field held in a separate container entry; the hash
/// attribute stores the synthetic container id, the index carries one
/// pair per element.
pub(crate) struct ListMember {
    binding: FieldBinding,
    /// Synthetic container id, known after the first save or a load.
    container: Option<String>,
}

impl ListMember {
    pub(crate) fn new(binding: FieldBinding) -> Self {
        ListMember {
            binding,
            container: None,
        }
    }

    /// Current elements of the declared element kind; off-kind elements
    /// are logged and dropped so the pushed values and the index pairs
    /// always agree.
    fn elements(&self, entity: &dyn Entity) -> Option<Vec<Value>> {
        let values = entity.get_list(self.binding.attr)?;
        let kept: Vec<Value> = values
            .into_iter()
            .filter(|value| {
                if value.kind() == FieldKind::Str {
                    true
                } else {
                    warn!(
                        attr = self.binding.attr,
                        found = %value.kind(),
                        "non-string element in string list, skipping"
                    );
                    false
                }
            })
            .collect();
        Some(kept)
    }

    fn save(
        &mut self,
        entity: &dyn Entity,
        type_name: &str,
        id: &RecordId,
        conn: &Conn,
        batch: &mut Batch,
    ) -> Result<()> {
        let Some(elements) = self.elements(entity) else {
            return Ok(());
        };
        let index = index_key(type_name, self.binding.attr);
        // replace on write: prior container and every index pair for
        // this id go before the new elements, in the same commit
        batch.enqueue(Command::ZRem {
            key: index.clone(),
            member: id.as_str().to_string(),
        });
        let container = match self.container.clone() {
            Some(old) => {
                batch.enqueue(Command::Del { key: old.clone() });
                old
            }
            None => {
                let serial = conn.incr(&container_counter(type_name, self.binding.attr))?;
                let fresh = container_id(type_name, self.binding.attr, serial);
                self.container = Some(fresh.clone());
                fresh
            }
        };
        batch.enqueue(Command::HSet {
            key: id.as_str().to_string(),
            attr: self.binding.attr.to_string(),
            value: container.clone(),
        });
        for element in &elements {
            batch.enqueue(Command::RPush {
                key: container.clone(),
                value: element.format(),
            });
            batch.enqueue(Command::ZAdd {
                key: index.clone(),
                member: id.as_str().to_string(),
                score: score_value(element),
            });
        }
        Ok(())
    }

    fn enqueue_load(&self, id: &RecordId, batch: &mut Batch) -> usize {
        batch.enqueue(Command::HGet {
            key: id.as_str().to_string(),
            attr: self.binding.attr.to_string(),
        })
    }

    fn sync(&mut self, entity: &mut dyn Entity, reply: &Reply, conn: &Conn) -> Result<()> {
        let Some(pointer) = reply.as_field()? else {
            return Ok(());
        };
        self.container = Some(pointer.to_string());
        // container contents come in a second, synchronous round trip
        let raw = conn.lrange(pointer)?;
        let values = raw.into_iter().map(Value::Str).collect();
        entity.set_list(self.binding.attr, values);
        Ok(())
    }

    fn resolve_container(&mut self, id: &RecordId, conn: &Conn) -> Result<()> {
        if self.container.is_none() {
            self.container = conn.hget(id.as_str(), self.binding.attr)?;
        }
        Ok(())
    }

    fn delete(&self, type_name: &str, id: &RecordId, batch: &mut Batch) {
        batch.enqueue(Command::HDel {
            key: id.as_str().to_string(),
            attr: self.binding.attr.to_string(),
        });
        if let Some(container) = &self.container {
            batch.enqueue(Command::Del {
                key: container.clone(),
            });
        }
        batch.enqueue(Command::ZRem {
            key: index_key(type_name, self.binding.attr),
            member: id.as_str().to_string(),
        });
    }

    fn contribute_criteria(
        &self,
        entity: &dyn Entity,
        type_name: &str,
        criteria: &mut SearchCriteria,
    ) {
        let Some(elements) = self.elements(entity) else {
            return;
        };
        for element in &elements {
            criteria.add(index_key(type_name, self.binding.attr), score_value(element));
        }
    }
}

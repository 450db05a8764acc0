//! Mapper orchestration.

use redmap_core::{FieldKind, RecordId, RedmapError, Result};
use redmap_store::{Batch, Conn, Pool};
use tracing::debug;

use crate::criteria::SearchCriteria;
use crate::entity::Entity;
use crate::member::{ListMember, Member, ReferenceMember, ScalarMember};

/// Orchestrates one record's persistence: builds one member per
/// declared field binding and drives batched save/load/delete plus
/// criteria collection.
///
/// A mapper checks one store handle out of the injected [`Pool`] at
/// construction and holds it for its lifetime; the handle's permit
/// returns when the mapper drops. Between calls the mapper carries only
/// the bound id and per-member state (nested mappers, container ids);
/// each save/load/delete opens its own batch.
///
/// Nested mappers for populated reference fields are built during
/// construction, each with its own pooled handle, so pool capacity must
/// cover the deepest reference nesting in use.
pub struct Mapper {
    type_name: &'static str,
    id: Option<RecordId>,
    members: Vec<Member>,
    conn: Conn,
}

impl Mapper {
    /// Build a mapper around `entity`'s declared schema.
    pub fn new(entity: &dyn Entity, pool: &Pool) -> Result<Self> {
        let conn = pool.acquire()?;
        let mut members = Vec::with_capacity(entity.bindings().len());
        for binding in entity.bindings() {
            let member = match binding.kind {
                FieldKind::Str | FieldKind::Int | FieldKind::Bool => {
                    Member::Scalar(ScalarMember::new(*binding))
                }
                FieldKind::Ref => {
                    let mapper = match entity.child(binding.attr) {
                        Some(child) => Some(Box::new(Mapper::new(child, pool)?)),
                        None => None,
                    };
                    Member::Reference(ReferenceMember::new(*binding, mapper))
                }
                FieldKind::StrList => Member::List(ListMember::new(*binding)),
            };
            members.push(member);
        }
        Ok(Mapper {
            type_name: entity.type_name(),
            id: None,
            members,
            conn,
        })
    }

    /// Build a mapper with a known id bound up front.
    pub fn with_id(entity: &dyn Entity, pool: &Pool, id: RecordId) -> Result<Self> {
        let mut mapper = Self::new(entity, pool)?;
        mapper.bind(id);
        Ok(mapper)
    }

    /// The bound id, if any. Set by the constructor, [`Mapper::bind`],
    /// or the first save.
    pub fn id(&self) -> Option<&RecordId> {
        self.id.as_ref()
    }

    /// Bind an id, e.g. before a load.
    pub fn bind(&mut self, id: RecordId) {
        self.id = Some(id);
    }

    /// Persist the entity's current field values.
    ///
    /// Allocates the record id on first save via the store counter for
    /// the type name, then commits one batch carrying every member's
    /// writes. Reference members cascade their nested save depth-first
    /// on their own batch before the parent batch commits. No rollback:
    /// the commit is a pipelined submission, not a transaction.
    ///
    /// Returns the record's id.
    pub fn save(&mut self, entity: &mut dyn Entity) -> Result<RecordId> {
        let id = match &self.id {
            Some(id) => id.clone(),
            None => {
                let serial = self.conn.incr(self.type_name)?;
                let id = RecordId::new(self.type_name, serial);
                debug!(%id, "allocated record id");
                self.id = Some(id.clone());
                id
            }
        };
        let mut batch = Batch::new();
        for member in &mut self.members {
            member.save(entity, self.type_name, &id, &self.conn, &mut batch)?;
        }
        debug!(%id, commands = batch.len(), "committing save batch");
        self.conn.execute(batch)?;
        Ok(id)
    }

    /// Reconstitute the entity's fields from the bound record.
    ///
    /// Two phases: every member enqueues its read into one batch, the
    /// batch commits, then every member syncs from its reply slot.
    /// Reference and list members take one extra round trip each during
    /// sync. A field with no stored value keeps its prior state;
    /// unparseable stored text is logged and skipped.
    pub fn load(&mut self, entity: &mut dyn Entity) -> Result<()> {
        let id = self.require_id()?;
        let mut batch = Batch::new();
        let mut pending = Vec::with_capacity(self.members.len());
        for (at, member) in self.members.iter().enumerate() {
            if let Some(slot) = member.enqueue_load(&id, &mut batch) {
                pending.push((at, slot));
            }
        }
        debug!(%id, reads = pending.len(), "committing load batch");
        let replies = self.conn.execute(batch)?;
        for (at, slot) in pending {
            let reply = replies
                .get(slot)
                .ok_or(RedmapError::unexpected_reply("reply for every enqueued read"))?;
            self.members[at].sync(entity, reply, &self.conn)?;
        }
        Ok(())
    }

    /// Bind `id`, then [`Mapper::load`].
    pub fn load_id(&mut self, entity: &mut dyn Entity, id: RecordId) -> Result<()> {
        self.bind(id);
        self.load(entity)
    }

    /// Remove the bound record: every attribute, its index pairs, and
    /// list containers, in one batch. Reference members cascade into
    /// their nested record after the batch commits, so the parent's
    /// pointer is gone before the child record is.
    pub fn delete(&mut self, entity: &mut dyn Entity) -> Result<()> {
        let id = self.require_id()?;
        // a fresh mapper may not know its list containers yet
        for member in &mut self.members {
            member.resolve_for_delete(&id, &self.conn)?;
        }
        let mut batch = Batch::new();
        for member in &self.members {
            member.delete(self.type_name, &id, &mut batch);
        }
        debug!(%id, commands = batch.len(), "committing delete batch");
        self.conn.execute(batch)?;
        for member in &mut self.members {
            member.cascade_delete(entity)?;
        }
        Ok(())
    }

    /// Express the entity's current field values as index predicates.
    pub fn criteria(&self, entity: &dyn Entity) -> SearchCriteria {
        let mut criteria = SearchCriteria::new();
        for member in &self.members {
            member.contribute_criteria(entity, self.type_name, &mut criteria);
        }
        criteria
    }

    fn require_id(&self) -> Result<RecordId> {
        self.id.clone().ok_or(RedmapError::MissingId {
            type_name: self.type_name,
        })
    }
}

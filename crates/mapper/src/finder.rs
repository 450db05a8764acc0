//! Multi-criteria search over the secondary indexes.

use redmap_core::{RecordId, Result};
use redmap_store::Pool;
use rustc_hash::FxHashSet;
use tracing::debug;

use crate::criteria::SearchCriteria;
use crate::entity::Entity;
use crate::mapper::Mapper;

/// Resolves [`SearchCriteria`] into rehydrated records.
///
/// Each qualifier is answered by an equality range query against its
/// index (a range with equal bounds); an id survives only if every
/// qualifier matched it, a logical AND. Survivors are rehydrated through
/// a factory instance and a fresh [`Mapper`] load each. No ordering
/// guarantee, no pagination; empty criteria match nothing.
pub struct Finder<T, F>
where
    T: Entity,
    F: Fn() -> T,
{
    criteria: SearchCriteria,
    factory: F,
    pool: Pool,
}

impl<T, F> Finder<T, F>
where
    T: Entity,
    F: Fn() -> T,
{
    /// Build a finder over `criteria`, with `factory` producing the
    /// blank instances to load matches into.
    pub fn new(criteria: SearchCriteria, factory: F, pool: Pool) -> Self {
        Finder {
            criteria,
            factory,
            pool,
        }
    }

    /// Run the search and rehydrate every matching record.
    pub fn find(&self) -> Result<Vec<T>> {
        if self.criteria.is_empty() {
            return Ok(Vec::new());
        }
        let ids = self.matching_ids()?;
        debug!(matches = ids.len(), "rehydrating finder matches");
        let mut found = Vec::with_capacity(ids.len());
        for id in ids {
            let mut entity = (self.factory)();
            let mut mapper = Mapper::with_id(&entity, &self.pool, RecordId::from_string(id))?;
            mapper.load(&mut entity)?;
            found.push(entity);
        }
        Ok(found)
    }

    /// Ids present in every qualifier's equality result.
    fn matching_ids(&self) -> Result<FxHashSet<String>> {
        let conn = self.pool.acquire()?;
        let mut surviving: Option<FxHashSet<String>> = None;
        for qualifier in self.criteria.qualifiers() {
            let matched: FxHashSet<String> = conn
                .zrange_by_score(&qualifier.index_key, qualifier.score, qualifier.score)?
                .into_iter()
                .collect();
            surviving = Some(match surviving {
                None => matched,
                Some(previous) => previous.intersection(&matched).cloned().collect(),
            });
            if surviving.as_ref().is_some_and(|ids| ids.is_empty()) {
                break;
            }
        }
        Ok(surviving.unwrap_or_default())
    }
}

//! Generic thread-safe entity table with monotonically assigned string ids.

use crate::error::StoreError;
use crate::store::pagination::{paginate, Page, PageRequest};
use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// A record that can live in an [`EntityTable`].
pub trait Entity: Clone + Send + Sync + 'static {
    /// Collection name (e.g. "buildings"). Used as resource type and in errors.
    const KIND: &'static str;

    fn id(&self) -> &str;

    fn set_id(&mut self, id: String);
}

struct Rows<T> {
    by_key: BTreeMap<u64, T>,
    next_id: u64,
}

impl<T> Rows<T> {
    fn get(&self, id: &str) -> Option<&T> {
        parse_key(id).and_then(|key| self.by_key.get(&key))
    }
}

/// Keyed storage for one entity type. Every read hands out clones; ids start at 1
/// and are never reused, even after deletion.
pub struct EntityTable<T> {
    rows: RwLock<Rows<T>>,
}

impl<T: Entity> Default for EntityTable<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Entity> EntityTable<T> {
    pub fn new() -> Self {
        EntityTable {
            rows: RwLock::new(Rows {
                by_key: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }

    /// Stores `entity` under the next id and returns that id.
    pub fn insert(&self, mut entity: T) -> String {
        let mut rows = self.write();
        let key = rows.next_id;
        let id = key.to_string();
        entity.set_id(id.clone());
        rows.by_key.insert(key, entity);
        rows.next_id += 1;
        tracing::debug!(kind = T::KIND, id = %id, "inserted");
        id
    }

    pub fn get_one(&self, id: &str) -> Result<T, StoreError> {
        self.read()
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::not_found(T::KIND, id))
    }

    /// All entities in ascending id order.
    pub fn get_all(&self) -> Vec<T> {
        self.read().by_key.values().cloned().collect()
    }

    /// Looks up `ids` in the given order, skipping the ones that do not exist.
    pub fn get_many(&self, ids: &[String]) -> Vec<T> {
        let rows = self.read();
        ids.iter().filter_map(|id| rows.get(id).cloned()).collect()
    }

    /// Listing and window are taken under one read lock, so `total` matches `items`.
    pub fn paginated_find(&self, request: Option<&PageRequest>) -> Page<T> {
        let rows = self.read();
        paginate(rows.by_key.values().cloned(), request)
    }

    /// Replaces the stored entity with the same id wholesale.
    pub fn update(&self, entity: T) -> Result<(), StoreError> {
        let mut rows = self.write();
        let slot = parse_key(entity.id())
            .and_then(|key| rows.by_key.get_mut(&key))
            .ok_or_else(|| StoreError::not_found(T::KIND, entity.id()))?;
        tracing::debug!(kind = T::KIND, id = %entity.id(), "updated");
        *slot = entity;
        Ok(())
    }

    pub fn delete(&self, id: &str) -> Result<(), StoreError> {
        let mut rows = self.write();
        parse_key(id)
            .and_then(|key| rows.by_key.remove(&key))
            .ok_or_else(|| StoreError::not_found(T::KIND, id))?;
        tracing::debug!(kind = T::KIND, id = %id, "deleted");
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.read().by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // A panic can only happen outside the guarded mutation, so poisoned data is intact.
    fn read(&self) -> RwLockReadGuard<'_, Rows<T>> {
        self.rows.read().unwrap_or_else(|poisoned| {
            tracing::warn!(kind = T::KIND, "table lock poisoned, recovering");
            PoisonError::into_inner(poisoned)
        })
    }

    fn write(&self) -> RwLockWriteGuard<'_, Rows<T>> {
        self.rows.write().unwrap_or_else(|poisoned| {
            tracing::warn!(kind = T::KIND, "table lock poisoned, recovering");
            PoisonError::into_inner(poisoned)
        })
    }
}

/// Only canonical decimal ids can exist: "01", "+1" or "-1" never match.
fn parse_key(id: &str) -> Option<u64> {
    if id.is_empty() || !id.bytes().all(|b| b.is_ascii_digit()) || (id.len() > 1 && id.starts_with('0')) {
        return None;
    }
    id.parse().ok()
}

use chrono::{DateTime, Utc};
use dashmap::DashMap;

/// Contract every stored entity satisfies: a stable string id and a
/// creation timestamp used for newest-first listings.
pub trait Entity: Clone {
    fn id(&self) -> &str;
    fn created_at(&self) -> DateTime<Utc>;
}

/// A concurrent in-memory entity store keyed by id.
///
/// Entries are shared across request handlers via `Arc`; all interior
/// mutability lives in the `DashMap`, so handlers never hold an explicit
/// lock across an await point.
pub struct MemoryStore<T: Entity> {
    entries: DashMap<String, T>,
}

impl<T: Entity> MemoryStore<T> {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    pub fn insert(&self, entity: T) {
        self.entries.insert(entity.id().to_string(), entity);
    }

    pub fn get(&self, id: &str) -> Option<T> {
        self.entries.get(id).map(|entry| entry.value().clone())
    }

    pub fn remove(&self, id: &str) -> Option<T> {
        self.entries.remove(id).map(|(_, entity)| entity)
    }

    /// Applies `mutate` to the entry if present, returning the updated
    /// entity. Runs under the map's shard lock, so the update is atomic.
    pub fn update(&self, id: &str, mutate: impl FnOnce(&mut T)) -> Option<T> {
        self.entries.get_mut(id).map(|mut entry| {
            mutate(entry.value_mut());
            entry.value().clone()
        })
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Every entity, newest first. Ties break on id so listings stay
    /// deterministic.
    pub fn all(&self) -> Vec<T> {
        let mut entities: Vec<T> = self
            .entries
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        entities.sort_by(|a, b| {
            b.created_at()
                .cmp(&a.created_at())
                .then_with(|| a.id().cmp(b.id()))
        });
        entities
    }
}

impl<T: Entity> Default for MemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

use super::{EnemyStore, StoreError};
use crate::core::types::{EnemyId, Region};
use crate::entity::Enemy;
use ahash::AHashMap;
use std::sync::RwLock;

#[derive(Debug, Default)]
struct Records {
    by_id: AHashMap<EnemyId, Enemy>,
    /// Insertion order, so lookups are deterministic
    order: Vec<EnemyId>,
}

impl Records {
    fn ordered(&self) -> impl Iterator<Item = &Enemy> {
        self.order.iter().filter_map(move |id| self.by_id.get(id))
    }
}

/// Process-local store
#[derive(Debug, Default)]
pub struct InMemoryEnemyStore {
    records: RwLock<Records>,
}

impl InMemoryEnemyStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store holding `enemies`, saved in order
    pub fn with_enemies(enemies: impl IntoIterator<Item = Enemy>) -> Result<Self, StoreError> {
        let store = Self::new();
        for enemy in enemies {
            store.save(enemy)?;
        }
        Ok(store)
    }

    pub fn len(&self) -> usize {
        self.records.read().map(|r| r.order.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn matching(&self, keep: impl Fn(&Enemy) -> bool) -> Result<Vec<Enemy>, StoreError> {
        let records = self.records.read().map_err(|_| StoreError::Poisoned)?;
        Ok(records.ordered().filter(|e| keep(e)).cloned().collect())
    }
}

impl EnemyStore for InMemoryEnemyStore {
    fn find_by_region(&self, region: Region) -> Result<Vec<Enemy>, StoreError> {
        self.matching(|e| e.region == region)
    }

    fn find_all(&self) -> Result<Vec<Enemy>, StoreError> {
        self.matching(|_| true)
    }

    fn find_by_name(&self, name: &str) -> Result<Vec<Enemy>, StoreError> {
        self.matching(|e| e.name_matches(name))
    }

    fn save(&self, mut enemy: Enemy) -> Result<EnemyId, StoreError> {
        let mut records = self.records.write().map_err(|_| StoreError::Poisoned)?;
        let id = *enemy.id.get_or_insert_with(EnemyId::new);
        if records.by_id.insert(id, enemy).is_none() {
            records.order.push(id);
        }
        Ok(id)
    }

    fn exists_by_id(&self, id: EnemyId) -> Result<bool, StoreError> {
        let records = self.records.read().map_err(|_| StoreError::Poisoned)?;
        Ok(records.by_id.contains_key(&id))
    }

    fn delete_by_id(&self, id: EnemyId) -> Result<bool, StoreError> {
        let mut records = self.records.write().map_err(|_| StoreError::Poisoned)?;
        if records.by_id.remove(&id).is_none() {
            return Ok(false);
        }
        records.order.retain(|other| *other != id);
        Ok(true)
    }
}

/// A store that fails every call, for exercising degraded paths
#[derive(Debug, Clone)]
pub struct UnavailableStore {
    reason: String,
}

impl UnavailableStore {
    pub fn new(reason: impl Into<String>) -> Self {
        Self { reason: reason.into() }
    }

    fn fail<T>(&self) -> Result<T, StoreError> {
        Err(StoreError::Unavailable(self.reason.clone()))
    }
}

impl EnemyStore for UnavailableStore {
    fn find_by_region(&self, _: Region) -> Result<Vec<Enemy>, StoreError> {
        self.fail()
    }

    fn find_all(&self) -> Result<Vec<Enemy>, StoreError> {
        self.fail()
    }

    fn find_by_name(&self, _: &str) -> Result<Vec<Enemy>, StoreError> {
        self.fail()
    }

    fn save(&self, _: Enemy) -> Result<EnemyId, StoreError> {
        self.fail()
    }

    fn exists_by_id(&self, _: EnemyId) -> Result<bool, StoreError> {
        self.fail()
    }

    fn delete_by_id(&self, _: EnemyId) -> Result<bool, StoreError> {
        self.fail()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Archetype;

    #[test]
    fn test_save_assigns_id_and_keeps_order() {
        let store = InMemoryEnemyStore::new();
        let a = store.save(Enemy::new("Castle Guard", Archetype::Regular, Region::Castle)).unwrap();
        store.save(Enemy::new("Swamp Goblin", Archetype::Regular, Region::Swamp)).unwrap();
        store.save(Enemy::new("Iron Lord", Archetype::Boss, Region::Castle)).unwrap();

        let castle: Vec<_> = store.find_by_region(Region::Castle).unwrap().into_iter().map(|e| e.name).collect();
        assert_eq!(castle, vec!["Castle Guard", "Iron Lord"]);
        assert!(store.exists_by_id(a).unwrap());
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_save_with_existing_id_replaces() {
        let store = InMemoryEnemyStore::new();
        let id = store.save(Enemy::new("Imp", Archetype::Regular, Region::Volcano)).unwrap();
        let mut updated = store.find_all().unwrap().remove(0);
        updated.hp = 10.0;
        assert_eq!(store.save(updated).unwrap(), id);

        assert_eq!(store.len(), 1);
        assert_eq!(store.find_all().unwrap()[0].hp, 10.0);
    }

    #[test]
    fn test_returned_records_are_copies() {
        let store = InMemoryEnemyStore::with_enemies([Enemy::new("Imp", Archetype::Regular, Region::Volcano)]).unwrap();
        let mut copy = store.find_by_name("imp").unwrap().remove(0);
        copy.hp = 1.0;
        assert_eq!(store.find_by_name("IMP").unwrap()[0].hp, 1000.0);
    }

    #[test]
    fn test_delete() {
        let store = InMemoryEnemyStore::new();
        let id = store.save(Enemy::new("Imp", Archetype::Regular, Region::Volcano)).unwrap();
        assert!(store.delete_by_id(id).unwrap());
        assert!(!store.delete_by_id(id).unwrap());
        assert!(store.is_empty());
    }

    #[test]
    fn test_unavailable_store_fails() {
        let store = UnavailableStore::new("offline");
        assert_eq!(
            store.find_all(),
            Err(StoreError::Unavailable("offline".into()))
        );
    }
}

//! Enemy persistence boundary
//!
//! The engine only ever reads copies out of a store. Implementations must be
//! shareable across threads so one store can back concurrent resolutions.

mod memory;

pub use memory::{InMemoryEnemyStore, UnavailableStore};

use crate::core::types::{EnemyId, Region};
use crate::entity::Enemy;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    #[error("enemy store unavailable: {0}")]
    Unavailable(String),
    #[error("enemy store lock poisoned")]
    Poisoned,
}

pub trait EnemyStore: Send + Sync {
    /// Enemies whose region equals `region`, in insertion order
    fn find_by_region(&self, region: Region) -> Result<Vec<Enemy>, StoreError>;

    fn find_all(&self) -> Result<Vec<Enemy>, StoreError>;

    /// Case-insensitive name lookup across all regions
    fn find_by_name(&self, name: &str) -> Result<Vec<Enemy>, StoreError>;

    /// Insert or replace (by id) an enemy, assigning an id when missing
    fn save(&self, enemy: Enemy) -> Result<EnemyId, StoreError>;

    fn exists_by_id(&self, id: EnemyId) -> Result<bool, StoreError>;

    /// Returns whether anything was removed
    fn delete_by_id(&self, id: EnemyId) -> Result<bool, StoreError>;
}

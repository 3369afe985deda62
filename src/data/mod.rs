//! Seed roster loading
//!
//! Seed files are TOML with one `[[enemy]]` table per persisted enemy. The
//! default roster is compiled into the binary.

use crate::core::types::Region;
use crate::entity::Enemy;
use crate::store::{EnemyStore, StoreError};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Default roster shipped with the crate
pub const DEFAULT_SEED: &str = include_str!("../../data/seed_enemies.toml");

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("failed to read seed file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse seed file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid seed enemy '{name}': {reason}")]
    Invalid { name: String, reason: String },
    #[error("failed to store seed enemy: {0}")]
    Store(#[from] StoreError),
}

#[derive(Debug, Default, Deserialize)]
struct SeedFile {
    #[serde(default, rename = "enemy")]
    enemies: Vec<Enemy>,
}

/// Loads seed rosters and writes them into a store
#[derive(Debug, Clone, Copy, Default)]
pub struct BootstrapLoader;

impl BootstrapLoader {
    pub fn parse(content: &str) -> Result<Vec<Enemy>, SeedError> {
        let file: SeedFile = toml::from_str(content)?;
        for enemy in &file.enemies {
            validate(enemy)?;
        }
        Ok(file.enemies)
    }

    pub fn load_file(path: &Path) -> Result<Vec<Enemy>, SeedError> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn default_roster() -> Result<Vec<Enemy>, SeedError> {
        Self::parse(DEFAULT_SEED)
    }

    /// Save every enemy not already stored under the same name and region.
    /// Returns how many were saved.
    pub fn seed(store: &dyn EnemyStore, enemies: Vec<Enemy>) -> Result<usize, SeedError> {
        let mut saved = 0;
        for enemy in enemies {
            let exists = store
                .find_by_name(&enemy.name)?
                .iter()
                .any(|e| e.region == enemy.region);
            if exists {
                tracing::debug!(enemy = %enemy.name, region = %enemy.region, "Seed enemy already stored");
                continue;
            }
            store.save(enemy)?;
            saved += 1;
        }
        tracing::info!(saved, "Seeded enemy store");
        Ok(saved)
    }
}

fn validate(enemy: &Enemy) -> Result<(), SeedError> {
    let invalid = |reason: &str| SeedError::Invalid {
        name: enemy.name.clone(),
        reason: reason.to_string(),
    };
    if enemy.name.trim().is_empty() {
        return Err(invalid("name is empty"));
    }
    if enemy.region == Region::Unknown {
        return Err(invalid("unknown region"));
    }
    if !(enemy.hp > 0.0 && enemy.damage > 0.0) {
        return Err(invalid("hp and damage must be positive"));
    }
    Ok(())
}

use thiserror::Error;

use crate::core::types::{EnemyId, Region};
use crate::store::StoreError;

#[derive(Error, Debug)]
pub enum ForgeError {
    #[error("Enemy not found: {0}")]
    EnemyNotFound(EnemyId),

    #[error("Invalid enemy: {0}")]
    InvalidEnemy(String),

    #[error("Enemy '{name}' already exists in region {region}")]
    Conflict { name: String, region: Region },

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Config error: {0}")]
    Config(#[from] crate::core::config::ConfigError),

    #[error("Seed error: {0}")]
    Seed(#[from] crate::data::SeedError),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ForgeError>;

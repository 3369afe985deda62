pub mod config;
pub mod error;
pub mod hierarchy;
pub mod types;

pub use config::{ConfigError, EngineConfig};
pub use error::{ForgeError, Result};
pub use hierarchy::{RegionHierarchy, RegionLink};
pub use types::{Archetype, Difficulty, EnemyId, PlayerClass, Region, TimeOfDay, WeaponType, Weather};

//! Gateway-facing entry points
//!
//! `generate_forward` and `resolve_backward` always return an enemy. The
//! administrative calls return [`ForgeError`] on bad input or store trouble.

use crate::backward::{BackwardQuery, BackwardResolver, ResultResolver};
use crate::core::config::EngineConfig;
use crate::core::error::{ForgeError, Result};
use crate::core::types::{Archetype, EnemyId, Region};
use crate::data::BootstrapLoader;
use crate::entity::{Enemy, GameContext, SpawnRequirements};
use crate::forward::ForwardPipeline;
use crate::store::{EnemyStore, InMemoryEnemyStore};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Input for creating a persisted enemy; unset fields take defaults
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EnemyDraft {
    pub name: String,
    pub region: Option<Region>,
    #[serde(rename = "type")]
    pub archetype: Option<Archetype>,
    pub hp: Option<f64>,
    pub damage: Option<f64>,
    pub defense: Option<f64>,
    pub score: Option<f64>,
    pub behaviour: Option<String>,
    pub abilities: Vec<String>,
    pub resistances: Vec<String>,
    pub status_effects: Vec<String>,
    pub weaknesses: Vec<String>,
    pub requirements: SpawnRequirements,
}

impl EnemyDraft {
    pub const DEFAULT_SCORE: f64 = 100.0;

    pub fn new(name: impl Into<String>, region: Region) -> Self {
        Self {
            name: name.into(),
            region: Some(region),
            ..Self::default()
        }
    }

    fn into_enemy(self) -> Result<Enemy> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(ForgeError::InvalidEnemy("name is required".into()));
        }
        let region = match self.region {
            Some(region) if region != Region::Unknown => region,
            _ => return Err(ForgeError::InvalidEnemy(format!("region is required for '{}'", name))),
        };

        // Out-of-range stats fall back to the defaults instead of failing
        let mut enemy = Enemy::new(name, self.archetype.unwrap_or(Archetype::Regular), region);
        enemy.hp = self.hp.filter(|hp| hp.is_finite() && *hp > 0.0).unwrap_or(enemy.hp);
        enemy.damage = self.damage.filter(|d| d.is_finite() && *d > 0.0).unwrap_or(enemy.damage);
        enemy.defense = self.defense.filter(|d| d.is_finite() && *d >= 0.0).unwrap_or(enemy.defense);
        enemy.score = self
            .score
            .filter(|s| s.is_finite() && *s >= 0.0)
            .unwrap_or(Self::DEFAULT_SCORE);
        if let Some(behaviour) = self.behaviour {
            enemy.behaviour = behaviour;
        }
        enemy.abilities.extend(self.abilities);
        enemy.resistances.extend(self.resistances);
        enemy.status_effects.extend(self.status_effects);
        enemy.weaknesses.extend(self.weaknesses);
        enemy.requirements = self.requirements;

        Ok(enemy)
    }
}

pub struct EnemyDirector {
    store: Arc<dyn EnemyStore>,
    pipeline: ForwardPipeline,
    resolver: BackwardResolver,
}

impl EnemyDirector {
    pub fn new(config: EngineConfig, store: Arc<dyn EnemyStore>) -> Self {
        Self {
            store,
            pipeline: ForwardPipeline::new(config.clone()),
            resolver: BackwardResolver::new(config),
        }
    }

    /// Director over an in-memory store seeded with the default roster
    pub fn with_default_roster(config: EngineConfig) -> Result<Self> {
        let store = InMemoryEnemyStore::new();
        BootstrapLoader::seed(&store, BootstrapLoader::default_roster()?)?;
        Ok(Self::new(config, Arc::new(store)))
    }

    pub fn config(&self) -> &EngineConfig {
        self.pipeline.config()
    }

    pub fn store(&self) -> &dyn EnemyStore {
        self.store.as_ref()
    }

    pub fn pipeline_mut(&mut self) -> &mut ForwardPipeline {
        &mut self.pipeline
    }

    pub fn generate_forward(&self, context: &GameContext) -> Enemy {
        let mut enemy = self.pipeline.run(context, self.store.as_ref());
        if self.config().persist_results {
            self.persist(&mut enemy);
        }
        enemy
    }

    /// Stored enemies are only ever read; a result that already has an id
    /// is a copy of a stored record and is not written back.
    fn persist(&self, enemy: &mut Enemy) {
        if enemy.id.is_some() {
            return;
        }
        match self.store.save(enemy.clone()) {
            Ok(id) => {
                enemy.id = Some(id);
                tracing::debug!(enemy = %enemy.name, %id, "Persisted generated enemy");
            }
            Err(e) => tracing::warn!(enemy = %enemy.name, error = %e, "Failed to persist generated enemy"),
        }
    }

    pub fn resolve_backward(&self, query: &mut BackwardQuery) -> Enemy {
        let pool = match self.store.find_all() {
            Ok(pool) => pool,
            Err(e) => {
                tracing::warn!(wanted = %query.target_enemy, error = %e, "Enemy store unavailable, generating forward");
                let enemy = self.generate_forward(&query.context);
                query.processed = true;
                query.conditions_met = false;
                query.fallback_enemy = Some(enemy.name.clone());
                return enemy;
            }
        };

        let resolution = self.resolver.resolve_query(query, &pool);
        let enemy = ResultResolver::new(self.config()).resolve(&resolution, &pool, &query.context);
        tracing::info!(
            wanted = %query.target_enemy,
            region = %query.context.region,
            conditions_met = query.conditions_met,
            enemy = %enemy.name,
            "Backward resolution complete"
        );
        enemy
    }

    // === Administration ===

    pub fn create_enemy(&self, draft: EnemyDraft) -> Result<Enemy> {
        let mut enemy = draft.into_enemy()?;
        let duplicate = self
            .store
            .find_by_name(&enemy.name)?
            .iter()
            .any(|e| e.region == enemy.region);
        if duplicate {
            return Err(ForgeError::Conflict {
                name: enemy.name,
                region: enemy.region,
            });
        }

        let id = self.store.save(enemy.clone())?;
        enemy.id = Some(id);
        tracing::info!(enemy = %enemy.name, region = %enemy.region, %id, "Created enemy");
        Ok(enemy)
    }

    pub fn list_enemies(&self) -> Result<Vec<Enemy>> {
        Ok(self.store.find_all()?)
    }

    pub fn list_region(&self, region: Region) -> Result<Vec<Enemy>> {
        Ok(self.store.find_by_region(region)?)
    }

    pub fn delete_enemy(&self, id: EnemyId) -> Result<()> {
        if !self.store.exists_by_id(id)? {
            return Err(ForgeError::EnemyNotFound(id));
        }
        self.store.delete_by_id(id)?;
        tracing::info!(%id, "Deleted enemy");
        Ok(())
    }
}

impl std::fmt::Debug for EnemyDirector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnemyDirector")
            .field("pipeline", &self.pipeline)
            .field("resolver", &self.resolver)
            .finish_non_exhaustive()
    }
}

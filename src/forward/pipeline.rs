//! Forward generation: seven phases over a fresh working memory

use crate::core::config::EngineConfig;
use crate::entity::{Enemy, GameContext};
use crate::forward::memory::{CandidateOrigin, WorkingMemory};
use crate::forward::selector::CandidateSelector;
use crate::rules::{PhaseRegistry, PhaseReport};
use crate::store::EnemyStore;

/// Result of one forward pass, with the pool it was chosen from
#[derive(Debug, Clone)]
pub struct ForwardOutcome {
    pub enemy: Enemy,
    /// Every candidate after the last phase, in insertion order
    pub pool: Vec<Enemy>,
    pub reports: Vec<PhaseReport>,
    /// Phases that failed and were rolled back
    pub skipped: Vec<&'static str>,
}

#[derive(Debug, Clone)]
pub struct ForwardPipeline {
    config: EngineConfig,
    registry: PhaseRegistry,
}

impl ForwardPipeline {
    pub fn new(config: EngineConfig) -> Self {
        Self::with_registry(config, PhaseRegistry::standard())
    }

    pub fn with_registry(config: EngineConfig, registry: PhaseRegistry) -> Self {
        Self { config, registry }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn registry(&self) -> &PhaseRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut PhaseRegistry {
        &mut self.registry
    }

    /// Never fails: store errors degrade to template-only generation
    pub fn run(&self, context: &GameContext, store: &dyn EnemyStore) -> Enemy {
        self.run_detailed(context, store).enemy
    }

    pub fn run_detailed(&self, context: &GameContext, store: &dyn EnemyStore) -> ForwardOutcome {
        let persisted = match store.find_by_region(context.region) {
            Ok(enemies) => enemies,
            Err(e) => {
                tracing::warn!(region = %context.region, error = %e, "Enemy store unavailable, using templates only");
                Vec::new()
            }
        };
        self.run_with_pool(context, persisted)
    }

    /// Run the phases over copies of `persisted`
    pub fn run_with_pool(&self, context: &GameContext, persisted: Vec<Enemy>) -> ForwardOutcome {
        let mut memory = WorkingMemory::new(context.clone());
        for enemy in persisted {
            memory.insert_candidate(enemy, CandidateOrigin::Persisted);
        }

        let mut reports = Vec::with_capacity(self.registry.phases().len());
        let mut skipped = Vec::new();

        for phase in self.registry.phases() {
            let snapshot = memory.clone();
            match phase.run(&mut memory, &self.config) {
                Ok(report) => {
                    tracing::debug!(
                        phase = report.phase,
                        fired = report.fired,
                        failed = report.failed_rules,
                        candidates = memory.candidate_count(),
                        "Phase complete"
                    );
                    reports.push(report);
                }
                Err(e) => {
                    tracing::warn!(phase = phase.name(), error = %e, "Phase failed, skipping");
                    memory = snapshot;
                    skipped.push(phase.name());
                }
            }
        }

        let enemy = CandidateSelector::new(&self.config).select(&memory);
        tracing::info!(
            region = %context.region,
            difficulty = %context.difficulty,
            enemy = %enemy.name,
            score = enemy.score,
            "Forward generation complete"
        );

        ForwardOutcome {
            enemy,
            pool: memory.into_candidates(),
            reports,
            skipped,
        }
    }
}

impl Default for ForwardPipeline {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

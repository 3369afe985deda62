//! Reducing a candidate pool to a single enemy

use crate::core::config::EngineConfig;
use crate::entity::{Enemy, GameContext};
use crate::forward::memory::WorkingMemory;
use ordered_float::OrderedFloat;

/// Highest-scoring item; on ties the earliest one wins
pub fn first_max_by_score<'a, K>(items: impl IntoIterator<Item = (K, &'a Enemy)>) -> Option<(K, &'a Enemy)> {
    let mut best: Option<(K, &'a Enemy)> = None;
    for (key, enemy) in items {
        let better = best
            .as_ref()
            .map_or(true, |(_, b)| OrderedFloat(enemy.score) > OrderedFloat(b.score));
        if better {
            best = Some((key, enemy));
        }
    }
    best
}

/// Best-scoring enemy of a slice
pub fn best_enemy(enemies: &[Enemy]) -> Option<&Enemy> {
    first_max_by_score(enemies.iter().enumerate()).map(|(_, e)| e)
}

/// Default enemy for a context: scaled by difficulty and player level only
pub fn synthesize(context: &GameContext, config: &EngineConfig) -> Enemy {
    let mut enemy = Enemy::synthesized(context.region, &config.fallback);
    if let Some((hp, damage)) = config.difficulty_modifier(context.difficulty) {
        enemy.scale(hp, damage);
    }
    let (hp, damage) = config.level_modifier(context.player_level());
    enemy.scale(hp, damage);
    enemy.ensure_viable(&config.fallback);
    enemy
}

/// Resolves forward pipeline output to one enemy
#[derive(Debug, Clone, Copy)]
pub struct CandidateSelector<'a> {
    config: &'a EngineConfig,
}

impl<'a> CandidateSelector<'a> {
    pub fn new(config: &'a EngineConfig) -> Self {
        Self { config }
    }

    /// Selected slot, else best score, else a synthesized default
    pub fn select(&self, memory: &WorkingMemory) -> Enemy {
        let chosen = memory
            .selected_enemy()
            .or_else(|| first_max_by_score(memory.candidates().map(|(id, c)| (id, &c.enemy))).map(|(_, e)| e));

        let mut enemy = match chosen {
            Some(enemy) => enemy.clone(),
            None => {
                tracing::debug!(region = %memory.context().region, "No candidates, synthesizing default enemy");
                synthesize(memory.context(), self.config)
            }
        };
        enemy.ensure_viable(&self.config.fallback);
        enemy
    }
}

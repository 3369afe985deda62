//! Turning a resolution into exactly one enemy

use crate::backward::resolver::Resolution;
use crate::backward::tree::{self, TreeLevel};
use crate::core::config::EngineConfig;
use crate::entity::{Enemy, GameContext};
use crate::forward::selector::{first_max_by_score, synthesize};

/// Which step of the chain produced the enemy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultSource {
    Selected,
    MetFallback,
    Fallback,
    BestInPool,
    Synthesized,
}

#[derive(Debug, Clone, Copy)]
pub struct ResultResolver<'a> {
    config: &'a EngineConfig,
}

impl<'a> ResultResolver<'a> {
    pub fn new(config: &'a EngineConfig) -> Self {
        Self { config }
    }

    pub fn resolve(&self, resolution: &Resolution, pool: &[Enemy], context: &GameContext) -> Enemy {
        self.resolve_with_source(resolution, pool, context).0
    }

    /// First match wins:
    /// 1. conditions met and the selected enemy is in the pool
    /// 2. conditions met and the fallback is in the pool
    /// 3. any fallback that is in the pool
    /// 4. best score in the context region, else in the whole pool; after a
    ///    level 2/3 failure only obtainable enemies of the region count
    /// 5. a synthesized default
    pub fn resolve_with_source(&self, resolution: &Resolution, pool: &[Enemy], context: &GameContext) -> (Enemy, ResultSource) {
        let selected = resolution.selected.as_ref().and_then(|e| find_in_pool(e, pool));
        let fallback = resolution.fallback.as_ref().and_then(|e| find_in_pool(e, pool));

        let (found, source) = match (resolution.conditions_met, selected, fallback) {
            (true, Some(e), _) => (Some(e), ResultSource::Selected),
            (true, None, Some(e)) => (Some(e), ResultSource::MetFallback),
            (_, _, Some(e)) => (Some(e), ResultSource::Fallback),
            _ => (best_in_pool(pool, context, resolution.failed_level), ResultSource::BestInPool),
        };

        let (mut enemy, source) = match found {
            Some(e) => (e.clone(), source),
            None => (synthesize(context, self.config), ResultSource::Synthesized),
        };
        enemy.ensure_viable(&self.config.fallback);
        (enemy, source)
    }
}

/// Pool entry for a resolved enemy: same record first, then same name
fn find_in_pool<'p>(enemy: &Enemy, pool: &'p [Enemy]) -> Option<&'p Enemy> {
    pool.iter()
        .find(|p| p.name_matches(&enemy.name) && p.region == enemy.region)
        .or_else(|| pool.iter().find(|p| p.name_matches(&enemy.name)))
}

fn best_in_pool<'p>(pool: &'p [Enemy], context: &GameContext, failed_level: Option<TreeLevel>) -> Option<&'p Enemy> {
    let gated = matches!(failed_level, Some(TreeLevel::Progression | TreeLevel::Matchup));
    let best = |regional: bool| {
        first_max_by_score(
            pool.iter()
                .enumerate()
                .filter(|(_, e)| !regional || e.region == context.region)
                .filter(|(_, e)| !gated || tree::obtainable(e, context)),
        )
        .map(|(_, e)| e)
    };
    if gated {
        best(true)
    } else {
        best(true).or_else(|| best(false))
    }
}

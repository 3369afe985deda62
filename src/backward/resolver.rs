//! Backward resolution of a named target, or of a class of targets

use crate::backward::query::{BackwardQuery, CandidateChain};
use crate::backward::target::TargetSpec;
use crate::backward::tree::{self, TreeLevel};
use crate::core::config::EngineConfig;
use crate::core::hierarchy::RegionHierarchy;
use crate::rules::counter::counter_score;
use crate::entity::{Enemy, GameContext};
use ordered_float::OrderedFloat;
use std::cmp::{Ordering, Reverse};

/// Outcome of walking the condition tree
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Resolution {
    pub conditions_met: bool,
    pub selected: Option<Enemy>,
    pub fallback: Option<Enemy>,
    pub failed_level: Option<TreeLevel>,
    /// Names tried for a class target, in order
    pub candidates: Vec<String>,
    /// Index into `candidates` of the enemy that passed the tree, or
    /// `candidates.len()` once the list was exhausted without a pass
    pub cursor: usize,
}

impl Resolution {
    fn failed(level: TreeLevel, fallback: Option<Enemy>) -> Self {
        Self {
            failed_level: Some(level),
            fallback,
            ..Self::default()
        }
    }

    fn met(target: &Enemy) -> Self {
        Self {
            conditions_met: true,
            selected: Some(target.clone()),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone)]
pub struct BackwardResolver {
    config: EngineConfig,
    hierarchy: RegionHierarchy,
}

impl BackwardResolver {
    pub fn new(config: EngineConfig) -> Self {
        let hierarchy = config.hierarchy();
        Self { config, hierarchy }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Resolve `target` against `context` using `pool` (every persisted enemy)
    pub fn resolve(&self, target: &str, context: &GameContext, pool: &[Enemy]) -> Resolution {
        let spec = TargetSpec::parse(target);
        let resolution = match &spec {
            TargetSpec::Named(name) => self.resolve_named(name, context, pool),
            _ => self.resolve_class(&spec, context, pool),
        };

        tracing::debug!(
            wanted = %spec,
            region = %context.region,
            conditions_met = resolution.conditions_met,
            failed_level = ?resolution.failed_level,
            selected = ?resolution.selected.as_ref().map(|e| &e.name),
            fallback = ?resolution.fallback.as_ref().map(|e| &e.name),
            "Backward resolution"
        );
        resolution
    }

    /// Resolve and record the outcome on the query
    pub fn resolve_query(&self, query: &mut BackwardQuery, pool: &[Enemy]) -> Resolution {
        let resolution = self.resolve(&query.target_enemy, &query.context, pool);
        query.processed = true;
        query.conditions_met = resolution.conditions_met;
        query.selected_enemy = resolution.selected.as_ref().map(|e| e.name.clone());
        query.fallback_enemy = resolution.fallback.as_ref().map(|e| e.name.clone());
        query.failed_level = resolution.failed_level;
        query.candidates = resolution.candidates.clone();
        query.cursor = resolution.cursor;
        resolution
    }

    fn resolve_named(&self, name: &str, context: &GameContext, pool: &[Enemy]) -> Resolution {
        let Some(target) = find_target(name, context, pool) else {
            return Resolution::failed(TreeLevel::Region, self.substitute(None, context, pool));
        };

        match tree::evaluate(target, context, &self.hierarchy) {
            Ok(()) => Resolution::met(target),
            Err(TreeLevel::Region) => Resolution::failed(TreeLevel::Region, regional_fallback(target, context, pool)),
            Err(level) => Resolution::failed(level, self.substitute(Some(target), context, pool)),
        }
    }

    /// Walk the ordered regional candidates until one passes the whole tree
    fn resolve_class(&self, spec: &TargetSpec, context: &GameContext, pool: &[Enemy]) -> Resolution {
        let ranked = self.rank_candidates(spec, context, pool);
        let names: Vec<String> = ranked.iter().map(|e| e.name.clone()).collect();

        let mut first_region_pass: Option<&Enemy> = None;
        let mut chain = CandidateChain::new(&names, context);
        let mut outcome = None;

        for link in chain.by_ref() {
            let Some(candidate) = ranked.iter().copied().find(|e| e.name == link.current) else {
                continue;
            };
            match tree::evaluate(candidate, &link.snapshot, &self.hierarchy) {
                Ok(()) => {
                    outcome = Some(Resolution::met(candidate));
                    break;
                }
                Err(level) => {
                    if level != TreeLevel::Region && first_region_pass.is_none() {
                        first_region_pass = Some(candidate);
                    }
                    tracing::trace!(candidate = %link.current, %level, next = ?link.next, "Candidate rejected");
                }
            }
        }

        let mut resolution = match (outcome, first_region_pass) {
            (Some(met), _) => met,
            (None, Some(fallback)) => Resolution {
                fallback: Some(fallback.clone()),
                failed_level: tree::evaluate(fallback, context, &self.hierarchy).err(),
                ..Resolution::default()
            },
            (None, None) => Resolution::failed(TreeLevel::Region, None),
        };
        // The chain has advanced past the winning link
        resolution.cursor = if resolution.conditions_met {
            chain.position().saturating_sub(1)
        } else {
            chain.position()
        };
        resolution.candidates = names;
        resolution
    }

    /// Region-filtered candidates for a class target, best first.
    /// `AUTO_COUNTER` only considers enemies that counter the build at all.
    fn rank_candidates<'p>(&self, spec: &TargetSpec, context: &GameContext, pool: &'p [Enemy]) -> Vec<&'p Enemy> {
        let class = context.player.as_ref().map(|p| p.player_class).unwrap_or_default();
        let mut ranked: Vec<(f64, &Enemy)> = pool
            .iter()
            .filter(|e| e.region == context.region)
            .filter_map(|e| match spec {
                TargetSpec::CounterOf => {
                    let score = counter_score(e, class, &self.config);
                    (score > 0.0).then_some((score, e))
                }
                TargetSpec::BestOf(archetype) if e.archetype == *archetype => Some((e.score, e)),
                _ => None,
            })
            .collect();

        ranked.sort_by_key(|(key, e)| (Reverse(OrderedFloat(*key)), Reverse(OrderedFloat(e.score)), e.name.clone()));
        ranked.into_iter().map(|(_, e)| e).collect()
    }

    /// Level-appropriate stand-in from the context region.
    ///
    /// Only enemies passing levels 2 and 3 qualify. Against a target the
    /// strongest one weaker than it wins; without a target the weakest one.
    /// `None` when nothing in the region qualifies.
    fn substitute(&self, target: Option<&Enemy>, context: &GameContext, pool: &[Enemy]) -> Option<Enemy> {
        let obtainable = pool
            .iter()
            .filter(|e| e.region == context.region)
            .filter(|e| target.map_or(true, |t| !same_record(e, t)))
            .filter(|e| tree::obtainable(e, context));

        let chosen = match target {
            Some(t) => obtainable
                .filter(|e| e.hp < t.hp)
                .max_by(|a, b| by_hp(a, b).then_with(|| b.name.cmp(&a.name))),
            None => obtainable.min_by(|a, b| by_hp(a, b).then_with(|| a.name.cmp(&b.name))),
        };
        chosen.cloned()
    }
}

impl Default for BackwardResolver {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

/// Named lookup, preferring the copy stored in the context region
fn find_target<'p>(name: &str, context: &GameContext, pool: &'p [Enemy]) -> Option<&'p Enemy> {
    let mut matches = pool.iter().filter(|e| e.name_matches(name));
    let first = matches.next()?;
    if first.region == context.region {
        return Some(first);
    }
    Some(matches.find(|e| e.region == context.region).unwrap_or(first))
}

/// Nearest-hp enemy of the context region, same archetype first
fn regional_fallback(target: &Enemy, context: &GameContext, pool: &[Enemy]) -> Option<Enemy> {
    let nearest = |same_archetype: bool| {
        pool.iter()
            .filter(|e| e.region == context.region)
            .filter(|e| !same_archetype || e.archetype == target.archetype)
            .min_by(|a, b| {
                let da = OrderedFloat((a.hp - target.hp).abs());
                let db = OrderedFloat((b.hp - target.hp).abs());
                da.cmp(&db).then_with(|| a.name.cmp(&b.name))
            })
    };
    nearest(true).or_else(|| nearest(false)).cloned()
}

fn same_record(a: &Enemy, b: &Enemy) -> bool {
    match (a.id, b.id) {
        (Some(x), Some(y)) => x == y,
        _ => a.name_matches(&b.name) && a.region == b.region,
    }
}

fn by_hp(a: &Enemy, b: &Enemy) -> Ordering {
    OrderedFloat(a.hp).cmp(&OrderedFloat(b.hp))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::TraitKind;
    use crate::core::types::{Archetype, Difficulty, PlayerClass, Region, TimeOfDay, WeaponType, Weather};
    use crate::entity::Player;

    fn enemy(name: &str, archetype: Archetype, region: Region, hp: f64, min_level: u32) -> Enemy {
        let mut e = Enemy::new(name, archetype, region);
        e.hp = hp;
        e.requirements.min_level = min_level;
        e
    }

    fn pool() -> Vec<Enemy> {
        let mut wizard = enemy("Court Wizard", Archetype::Elite, Region::Castle, 1100.0, 15);
        wizard.grant(TraitKind::Resistance, "magic");
        wizard.add_ability("spell_reflect");
        let mut knight = enemy("Iron Knight", Archetype::Elite, Region::Castle, 1400.0, 25);
        knight.grant(TraitKind::Resistance, "magic_ward");
        vec![
            enemy("Iron Lord", Archetype::Boss, Region::Castle, 3000.0, 40),
            enemy("Castle Guard", Archetype::Regular, Region::Castle, 900.0, 0),
            wizard,
            knight,
            enemy("Swamp Goblin", Archetype::Regular, Region::Swamp, 600.0, 0),
            enemy("Mountain Harpy", Archetype::Regular, Region::Mountain, 850.0, 5),
            enemy("Mountain Tyrant", Archetype::Boss, Region::Mountain, 2800.0, 30),
        ]
    }

    fn ctx(region: Region, level: u32, class: PlayerClass) -> GameContext {
        GameContext::new(
            region,
            Difficulty::Hard,
            Weather::Clear,
            TimeOfDay::Day,
            Some(Player::new("p", level, class, WeaponType::Greatsword)),
        )
    }

    #[test]
    fn test_named_target_passes() {
        let r = BackwardResolver::default().resolve("iron lord", &ctx(Region::Castle, 45, PlayerClass::Strength), &pool());
        assert!(r.conditions_met);
        assert_eq!(r.selected.map(|e| e.name), Some("Iron Lord".to_string()));
        assert!(r.fallback.is_none());
    }

    #[test]
    fn test_progression_failure_picks_weaker_substitute() {
        let r = BackwardResolver::default().resolve("Iron Lord", &ctx(Region::Castle, 5, PlayerClass::Strength), &pool());
        assert!(!r.conditions_met);
        assert_eq!(r.failed_level, Some(TreeLevel::Progression));
        assert!(r.selected.is_none());
        assert_eq!(r.fallback.map(|e| e.name), Some("Castle Guard".to_string()));
    }

    #[test]
    fn test_substitute_is_strongest_weaker_obtainable() {
        let r = BackwardResolver::default().resolve("Iron Lord", &ctx(Region::Castle, 30, PlayerClass::Strength), &pool());
        assert_eq!(r.fallback.map(|e| e.name), Some("Iron Knight".to_string()));
    }

    #[test]
    fn test_no_substitute_when_nothing_weaker_is_obtainable() {
        // Neither mountain enemy is open to a level 3 player
        let r = BackwardResolver::default().resolve("Mountain Harpy", &ctx(Region::Mountain, 3, PlayerClass::Dex), &pool());
        assert!(!r.conditions_met);
        assert_eq!(r.failed_level, Some(TreeLevel::Progression));
        assert!(r.fallback.is_none());
    }

    #[test]
    fn test_substitute_never_stronger_than_target() {
        // Castle Guard is the weakest castle enemy; the others are out of reach or stronger
        let mut guard_pool = pool();
        guard_pool[1].requirements.min_level = 20;
        let r = BackwardResolver::default().resolve("Castle Guard", &ctx(Region::Castle, 16, PlayerClass::Strength), &guard_pool);
        assert_eq!(r.failed_level, Some(TreeLevel::Progression));
        assert!(r.fallback.is_none());
    }

    #[test]
    fn test_region_failure_uses_same_archetype_in_context_region() {
        let r = BackwardResolver::default().resolve("Mountain Tyrant", &ctx(Region::Castle, 45, PlayerClass::Strength), &pool());
        assert_eq!(r.failed_level, Some(TreeLevel::Region));
        let fallback = r.fallback.unwrap();
        assert_eq!(fallback.name, "Iron Lord");
        assert_eq!(fallback.region, Region::Castle);
    }

    #[test]
    fn test_related_region_passes_level_one() {
        // swamp sits inside castle in the default hierarchy
        let r = BackwardResolver::default().resolve("Swamp Goblin", &ctx(Region::Castle, 10, PlayerClass::Dex), &pool());
        assert!(r.conditions_met);
    }

    #[test]
    fn test_unknown_target_fails_region_level() {
        let r = BackwardResolver::default().resolve("Nobody", &ctx(Region::Castle, 5, PlayerClass::Dex), &pool());
        assert_eq!(r.failed_level, Some(TreeLevel::Region));
        assert_eq!(r.fallback.map(|e| e.name), Some("Castle Guard".to_string()));
    }

    #[test]
    fn test_auto_counter_picks_best_counter() {
        let r = BackwardResolver::default().resolve("AUTO_COUNTER", &ctx(Region::Castle, 20, PlayerClass::Mage), &pool());
        assert!(r.conditions_met);
        assert_eq!(r.selected.map(|e| e.name), Some("Court Wizard".to_string()));
        assert_eq!(r.candidates[0], "Court Wizard");
        assert_eq!(r.cursor, 0);
    }

    #[test]
    fn test_auto_counter_skips_unobtainable_candidates() {
        // Court Wizard scores 60, Iron Knight (magic_ward) 40; level 10 passes neither
        let r = BackwardResolver::default().resolve("AUTO_COUNTER", &ctx(Region::Castle, 10, PlayerClass::Mage), &pool());
        assert!(!r.conditions_met);
        assert_eq!(r.fallback.map(|e| e.name), Some("Court Wizard".to_string()));
        assert_eq!(r.cursor, r.candidates.len());
    }

    #[test]
    fn test_auto_boss_in_empty_region() {
        let r = BackwardResolver::default().resolve("AUTO_BOSS", &ctx(Region::Desert, 60, PlayerClass::Strength), &pool());
        assert!(!r.conditions_met);
        assert!(r.fallback.is_none());
        assert!(r.candidates.is_empty());
    }

    #[test]
    fn test_resolve_query_records_outcome() {
        let mut query = BackwardQuery::new("Iron Lord", ctx(Region::Castle, 5, PlayerClass::Strength));
        BackwardResolver::default().resolve_query(&mut query, &pool());
        assert!(query.processed);
        assert!(!query.conditions_met);
        assert_eq!(query.fallback_enemy.as_deref(), Some("Castle Guard"));
        assert_eq!(query.failed_level, Some(TreeLevel::Progression));
    }
}

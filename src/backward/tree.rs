//! The three-level condition tree
//!
//! Each level is a pure predicate. [`evaluate`] checks them top-down and
//! stops at the first failure, so deeper levels never run after an earlier
//! level has failed.

use crate::core::hierarchy::RegionHierarchy;
use crate::entity::{Enemy, GameContext, Player};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TreeLevel {
    /// Level 1 (OR): same region, or parent/child region
    Region,
    /// Level 2 (AND): minimum difficulty and minimum level
    Progression,
    /// Level 3 (AND): the build is threatened and the weapon is no hard counter
    Matchup,
}

impl fmt::Display for TreeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Region => "region",
            Self::Progression => "progression",
            Self::Matchup => "matchup",
        };
        f.write_str(name)
    }
}

pub fn region_level(target: &Enemy, context: &GameContext, hierarchy: &RegionHierarchy) -> bool {
    target.region == context.region || hierarchy.is_related(target.region, context.region)
}

/// A missing player counts as level 0
pub fn progression_level(target: &Enemy, context: &GameContext, player: Option<&Player>) -> bool {
    let level = player.map_or(0, |p| p.level);
    context.difficulty.meets(target.requirements.min_difficulty) && level >= target.requirements.min_level
}

/// A missing player cannot be trivially immune or hard-countering
pub fn matchup_level(target: &Enemy, _context: &GameContext, player: Option<&Player>) -> bool {
    let Some(player) = player else {
        return true;
    };
    let reqs = &target.requirements;
    !reqs.harmless_to.contains(&player.player_class) && !reqs.hard_counters.contains(&player.weapon_type)
}

/// Ok when every level holds, else the first failing level
pub fn evaluate(target: &Enemy, context: &GameContext, hierarchy: &RegionHierarchy) -> Result<(), TreeLevel> {
    let player = context.player.as_ref();
    if !region_level(target, context, hierarchy) {
        return Err(TreeLevel::Region);
    }
    if !progression_level(target, context, player) {
        return Err(TreeLevel::Progression);
    }
    if !matchup_level(target, context, player) {
        return Err(TreeLevel::Matchup);
    }
    Ok(())
}

/// Levels 2 and 3 only, used when picking substitutes inside the region
pub fn obtainable(target: &Enemy, context: &GameContext) -> bool {
    let player = context.player.as_ref();
    progression_level(target, context, player) && matchup_level(target, context, player)
}

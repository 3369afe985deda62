//! Enemy records and the per-pass candidate copies made from them

use crate::core::config::{ArchetypeProfile, FallbackStats, TemplateSpec, TraitKind};
use crate::core::types::{Archetype, Difficulty, EnemyId, PlayerClass, Region, WeaponType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Gate checked by the backward resolver before a named enemy may spawn
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SpawnRequirements {
    pub min_level: u32,
    pub min_difficulty: Difficulty,
    /// Builds the enemy cannot meaningfully threaten
    pub harmless_to: Vec<PlayerClass>,
    /// Weapons that trivialize the fight
    pub hard_counters: Vec<WeaponType>,
}

/// An adversary, either persisted or a candidate inside one resolution pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Enemy {
    pub id: Option<EnemyId>,
    pub name: String,
    #[serde(rename = "type")]
    pub archetype: Archetype,
    pub hp: f64,
    pub damage: f64,
    pub defense: f64,
    pub behaviour: String,
    pub abilities: BTreeSet<String>,
    pub resistances: BTreeSet<String>,
    pub status_effects: BTreeSet<String>,
    pub weaknesses: BTreeSet<String>,
    pub region: Region,
    /// Ranking value, only meaningful within a single pass
    pub score: f64,
    pub experience_reward: u32,
    pub critical_chance: f64,
    pub dodge_chance: f64,
    pub requirements: SpawnRequirements,
}

impl Default for Enemy {
    fn default() -> Self {
        Self {
            id: None,
            name: String::new(),
            archetype: Archetype::Regular,
            hp: 1000.0,
            damage: 100.0,
            defense: 50.0,
            behaviour: "aggressive".into(),
            abilities: BTreeSet::new(),
            resistances: BTreeSet::new(),
            status_effects: BTreeSet::new(),
            weaknesses: BTreeSet::new(),
            region: Region::Unknown,
            score: 0.0,
            experience_reward: 0,
            critical_chance: 0.05,
            dodge_chance: 0.05,
            requirements: SpawnRequirements::default(),
        }
    }
}

impl Enemy {
    pub fn new(name: impl Into<String>, archetype: Archetype, region: Region) -> Self {
        Self {
            name: name.into(),
            archetype,
            region,
            ..Self::default()
        }
    }

    /// Build a generated candidate from a region roster entry
    pub fn from_template(spec: &TemplateSpec, profile: &ArchetypeProfile, region: Region) -> Self {
        let collect = |v: &[String]| v.iter().cloned().collect::<BTreeSet<_>>();
        Self {
            id: None,
            name: spec.name.clone(),
            archetype: spec.archetype,
            hp: profile.hp,
            damage: profile.damage,
            defense: profile.defense,
            behaviour: spec.behaviour.clone(),
            abilities: collect(&spec.abilities),
            resistances: collect(&spec.resistances),
            status_effects: collect(&spec.status_effects),
            weaknesses: collect(&spec.weaknesses),
            region,
            score: profile.base_score,
            experience_reward: 0,
            critical_chance: profile.critical_chance,
            dodge_chance: profile.dodge_chance,
            requirements: SpawnRequirements::default(),
        }
    }

    /// Default creature used when neither store nor pipeline yielded anything
    pub fn synthesized(region: Region, stats: &FallbackStats) -> Self {
        Self {
            name: format!("Fallback {} Creature", region.title()),
            archetype: Archetype::Creature,
            hp: stats.hp,
            damage: stats.damage,
            defense: stats.defense,
            score: stats.score,
            region,
            ..Self::default()
        }
    }

    pub fn scale(&mut self, hp: f64, damage: f64) {
        self.hp *= hp;
        self.damage *= damage;
    }

    pub fn add_ability(&mut self, ability: impl Into<String>) -> bool {
        self.abilities.insert(ability.into())
    }

    pub fn add_resistance(&mut self, resistance: impl Into<String>) -> bool {
        self.resistances.insert(resistance.into())
    }

    pub fn add_status_effect(&mut self, effect: impl Into<String>) -> bool {
        self.status_effects.insert(effect.into())
    }

    /// Substring match over abilities, status effects and behaviour
    pub fn has_tag(&self, tag: &str) -> bool {
        self.abilities.iter().any(|a| a.contains(tag))
            || self.status_effects.iter().any(|s| s.contains(tag))
            || self.behaviour.contains(tag)
    }

    pub fn resists(&self, tag: &str) -> bool {
        self.resistances.iter().any(|r| r.contains(tag))
    }

    pub fn is_weak_to(&self, tag: &str) -> bool {
        self.weaknesses.iter().any(|w| w == tag)
    }

    /// Whether the enemy carries `tag` in the collection named by `kind`
    pub fn carries(&self, kind: TraitKind, tag: &str) -> bool {
        match kind {
            TraitKind::Ability => self.abilities.iter().any(|a| a.contains(tag)),
            TraitKind::Resistance => self.resists(tag),
            TraitKind::StatusEffect => self.status_effects.iter().any(|s| s.contains(tag)),
            TraitKind::Any => self.has_tag(tag),
        }
    }

    /// Add `tag` to the collection named by `kind`; `Any` grants an ability
    pub fn grant(&mut self, kind: TraitKind, tag: &str) -> bool {
        match kind {
            TraitKind::Ability | TraitKind::Any => self.add_ability(tag),
            TraitKind::Resistance => self.add_resistance(tag),
            TraitKind::StatusEffect => self.add_status_effect(tag),
        }
    }

    pub fn name_matches(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name.trim())
    }

    /// Replace non-positive or non-finite combat stats with fallback values
    pub fn ensure_viable(&mut self, stats: &FallbackStats) {
        if !(self.hp.is_finite() && self.hp > 0.0) {
            self.hp = stats.hp;
        }
        if !(self.damage.is_finite() && self.damage > 0.0) {
            self.damage = stats.damage;
        }
        if !(self.defense.is_finite() && self.defense >= 0.0) {
            self.defense = stats.defense;
        }
        self.critical_chance = self.critical_chance.clamp(0.0, 1.0);
        self.dodge_chance = self.dodge_chance.clamp(0.0, 1.0);
    }
}

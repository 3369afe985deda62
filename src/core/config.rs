//! Engine configuration with documented constants
//!
//! All balance numbers are collected here. None of them are engine
//! invariants: changing them changes which enemy a player meets, never
//! whether the engine terminates or returns a usable enemy.
//!
//! The whole structure can be overridden from TOML. Missing sections fall
//! back to the defaults below, so a file only needs the values it changes.

use crate::core::hierarchy::{RegionHierarchy, RegionLink};
use crate::core::types::{Archetype, Difficulty, PlayerClass, Region, TimeOfDay, Weather};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors raised while loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid config TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Inconsistent config: {0}")]
    Invalid(String),
}

/// Multiplicative hp/damage scaling for one difficulty tier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DifficultyModifier {
    pub tier: Difficulty,
    pub hp: f64,
    pub damage: f64,
}

/// Multiplicative scaling for a band of player levels (inclusive bounds)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelBand {
    pub min_level: u32,
    pub max_level: Option<u32>,
    pub hp: f64,
    pub damage: f64,
}

impl LevelBand {
    pub fn contains(&self, level: u32) -> bool {
        level >= self.min_level && self.max_level.map_or(true, |max| level <= max)
    }
}

/// Baseline numbers for an archetype
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchetypeProfile {
    pub archetype: Archetype,
    /// Initial candidate score assigned during template generation
    pub base_score: f64,
    pub hp: f64,
    pub damage: f64,
    pub defense: f64,
    /// Multiplier applied to the stat-derived experience reward
    pub experience_multiplier: f64,
    pub critical_chance: f64,
    pub dodge_chance: f64,
}

/// A generated enemy blueprint belonging to a region roster
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateSpec {
    pub name: String,
    pub archetype: Archetype,
    pub behaviour: String,
    #[serde(default)]
    pub abilities: Vec<String>,
    #[serde(default)]
    pub resistances: Vec<String>,
    #[serde(default)]
    pub status_effects: Vec<String>,
    #[serde(default)]
    pub weaknesses: Vec<String>,
}

/// Generated roster for one region
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionProfile {
    pub region: Region,
    pub roster: Vec<TemplateSpec>,
}

/// Which trait collection of an enemy a bias inspects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraitKind {
    Ability,
    Resistance,
    StatusEffect,
    /// Abilities, status effects or behaviour
    Any,
}

/// Score weight for enemies carrying a tag that counters a player build
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CounterBias {
    pub class: PlayerClass,
    pub kind: TraitKind,
    pub tag: String,
    pub weight: f64,
}

/// Trait granted to strong candidates so they can answer a player build
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CounterGrant {
    pub class: PlayerClass,
    pub kind: TraitKind,
    pub tag: String,
}

/// Weather bias: candidates carrying `favoured` gain `bonus` and `grant`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherBias {
    pub weather: Weather,
    /// Region restriction; `None` applies everywhere
    pub region: Option<Region>,
    pub favoured: String,
    pub bonus: f64,
    pub grant: Option<String>,
}

/// Time-of-day bias
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeBias {
    pub time: TimeOfDay,
    pub favoured: String,
    pub bonus: f64,
    #[serde(default)]
    pub dodge_bonus: f64,
    #[serde(default = "unit_multiplier")]
    pub damage_multiplier: f64,
}

fn unit_multiplier() -> f64 {
    1.0
}

/// Numbers for the synthesized enemy used when nothing else is available
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FallbackStats {
    pub hp: f64,
    pub damage: f64,
    pub defense: f64,
    pub score: f64,
}

/// Score nudges applied by the adjustment phases
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Added to elites and bosses on hard difficulty
    pub hard_elite_bonus: f64,
    /// Added to regulars on easy difficulty
    pub easy_regular_bonus: f64,
    /// Players at or below this level count as novices
    pub novice_level: u32,
    /// Subtracted from bosses when the player is a novice
    pub novice_boss_penalty: f64,
    /// Added to regulars when the player is a novice
    pub novice_regular_bonus: f64,
    /// From this level on, a hard-difficulty pass pins the best regional boss
    pub boss_pin_level: u32,
    /// Subtracted when a candidate is weak to the player's school
    pub weakness_penalty: f64,
}

/// Configuration for the forward pipeline and the backward resolver
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Maximum rule firings per phase
    ///
    /// Only guards against rule sets that keep creating new activations
    /// (for example a rule inserting candidates that trigger it again).
    pub firing_cap: usize,

    /// Save the forward-pipeline result back to the store
    pub persist_results: bool,

    pub difficulty: Vec<DifficultyModifier>,
    pub level_bands: Vec<LevelBand>,
    pub archetypes: Vec<ArchetypeProfile>,
    pub regions: Vec<RegionProfile>,
    pub counters: Vec<CounterBias>,
    pub counter_grants: Vec<CounterGrant>,
    pub weather: Vec<WeatherBias>,
    pub time_of_day: Vec<TimeBias>,
    pub region_links: Vec<RegionLink>,
    pub fallback: FallbackStats,
    pub scoring: ScoringConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            firing_cap: 1000,
            persist_results: false,

            // Monotonic in tier: easy < medium < medium-hard < hard
            difficulty: vec![
                difficulty(Difficulty::Easy, 0.7, 0.7),
                difficulty(Difficulty::Medium, 1.0, 1.0),
                difficulty(Difficulty::MediumHard, 1.2, 1.15),
                difficulty(Difficulty::Hard, 1.5, 1.4),
            ],

            level_bands: vec![
                LevelBand { min_level: 0, max_level: Some(10), hp: 0.7, damage: 0.8 },
                LevelBand { min_level: 11, max_level: Some(49), hp: 1.0, damage: 1.0 },
                LevelBand { min_level: 50, max_level: None, hp: 1.5, damage: 1.3 },
            ],

            archetypes: vec![
                archetype(Archetype::Regular, 50.0, 800.0, 80.0, 40.0, 1.0, 0.05, 0.05),
                archetype(Archetype::Elite, 70.0, 1200.0, 120.0, 60.0, 1.5, 0.10, 0.08),
                archetype(Archetype::Boss, 90.0, 2500.0, 200.0, 100.0, 3.0, 0.15, 0.05),
                archetype(Archetype::Creature, 40.0, 1000.0, 100.0, 50.0, 0.8, 0.05, 0.05),
            ],

            regions: default_regions(),

            counters: vec![
                counter(PlayerClass::Strength, TraitKind::Ability, "ranged", 30.0),
                counter(PlayerClass::Strength, TraitKind::Ability, "magic", 25.0),
                counter(PlayerClass::Dex, TraitKind::Ability, "stealth", 30.0),
                counter(PlayerClass::Dex, TraitKind::Any, "poison", 25.0),
                counter(PlayerClass::Mage, TraitKind::Resistance, "magic", 40.0),
                counter(PlayerClass::Mage, TraitKind::Ability, "spell_reflect", 20.0),
            ],

            counter_grants: vec![
                grant(PlayerClass::Strength, TraitKind::Ability, "ranged_volley"),
                grant(PlayerClass::Dex, TraitKind::Ability, "poison_blade"),
                grant(PlayerClass::Mage, TraitKind::Resistance, "magic"),
            ],

            weather: vec![
                weather(Weather::Fog, None, "stealth", 20.0, Some("ambush")),
                weather(Weather::Fog, None, "ambush", 15.0, None),
                weather(Weather::Rain, Some(Region::Swamp), "poison", 10.0, None),
                weather(Weather::Rain, None, "lightning", 10.0, None),
                weather(Weather::Snow, Some(Region::Mountain), "frost", 15.0, Some("frost_aura")),
                weather(Weather::Snow, None, "frost", 10.0, None),
                weather(Weather::Sandstorm, Some(Region::Desert), "burrow", 20.0, Some("sand_veil")),
                weather(Weather::Wind, Some(Region::Mountain), "flying", 20.0, Some("gale_dive")),
                weather(Weather::Clear, None, "ranged", 5.0, None),
            ],

            time_of_day: vec![
                TimeBias {
                    time: TimeOfDay::Night,
                    favoured: "stealth".into(),
                    bonus: 15.0,
                    dodge_bonus: 0.05,
                    damage_multiplier: 1.0,
                },
                TimeBias {
                    time: TimeOfDay::Night,
                    favoured: "nocturnal".into(),
                    bonus: 15.0,
                    dodge_bonus: 0.0,
                    damage_multiplier: 1.1,
                },
                TimeBias {
                    time: TimeOfDay::Day,
                    favoured: "ranged".into(),
                    bonus: 10.0,
                    dodge_bonus: 0.0,
                    damage_multiplier: 1.0,
                },
                TimeBias {
                    time: TimeOfDay::Day,
                    favoured: "holy".into(),
                    bonus: 10.0,
                    dodge_bonus: 0.0,
                    damage_multiplier: 1.0,
                },
            ],

            region_links: vec![
                RegionLink::new(Region::Volcano, Region::Mountain),
                RegionLink::new(Region::Swamp, Region::Castle),
            ],

            fallback: FallbackStats { hp: 1000.0, damage: 100.0, defense: 50.0, score: 50.0 },

            scoring: ScoringConfig {
                hard_elite_bonus: 15.0,
                easy_regular_bonus: 10.0,
                novice_level: 10,
                novice_boss_penalty: 30.0,
                novice_regular_bonus: 20.0,
                boss_pin_level: 50,
                weakness_penalty: 20.0,
            },
        }
    }
}

impl EngineConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a (possibly partial) TOML override and validate it
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML config file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.firing_cap == 0 {
            return Err(ConfigError::Invalid("firing_cap must be at least 1".into()));
        }

        for m in &self.difficulty {
            if m.hp <= 0.0 || m.damage <= 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "difficulty {} multipliers must be positive",
                    m.tier
                )));
            }
        }

        // Scaling must not decrease as the tier goes up
        let mut ranked: Vec<_> = self
            .difficulty
            .iter()
            .filter_map(|m| m.tier.rank().map(|r| (r, m)))
            .collect();
        ranked.sort_by_key(|(r, _)| *r);
        for pair in ranked.windows(2) {
            let (lo, hi) = (pair[0].1, pair[1].1);
            if hi.hp < lo.hp || hi.damage < lo.damage {
                return Err(ConfigError::Invalid(format!(
                    "difficulty {} scales below {}",
                    hi.tier, lo.tier
                )));
            }
        }

        for band in &self.level_bands {
            if band.hp <= 0.0 || band.damage <= 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "level band starting at {} must have positive multipliers",
                    band.min_level
                )));
            }
            if band.max_level.is_some_and(|max| max < band.min_level) {
                return Err(ConfigError::Invalid(format!(
                    "level band starting at {} ends before it starts",
                    band.min_level
                )));
            }
        }

        for profile in &self.archetypes {
            if profile.hp <= 0.0 || profile.damage <= 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "archetype {} must have positive hp and damage",
                    profile.archetype
                )));
            }
            let chances = [profile.critical_chance, profile.dodge_chance];
            if chances.iter().any(|c| !(0.0..=1.0).contains(c)) {
                return Err(ConfigError::Invalid(format!(
                    "archetype {} chances must lie in [0, 1]",
                    profile.archetype
                )));
            }
        }

        for bias in &self.time_of_day {
            if bias.damage_multiplier <= 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "time bias '{}' must keep damage positive",
                    bias.favoured
                )));
            }
        }

        if self.fallback.hp <= 0.0 || self.fallback.damage <= 0.0 {
            return Err(ConfigError::Invalid("fallback hp and damage must be positive".into()));
        }

        Ok(())
    }

    /// Multipliers for a difficulty tier; `None` means no modifier applies
    pub fn difficulty_modifier(&self, tier: Difficulty) -> Option<(f64, f64)> {
        self.difficulty
            .iter()
            .find(|m| m.tier == tier)
            .map(|m| (m.hp, m.damage))
    }

    /// Multipliers for a player level; levels outside every band are unscaled
    pub fn level_modifier(&self, level: u32) -> (f64, f64) {
        self.level_bands
            .iter()
            .find(|b| b.contains(level))
            .map(|b| (b.hp, b.damage))
            .unwrap_or((1.0, 1.0))
    }

    /// Profile for an archetype, falling back to the synthesized-enemy numbers
    pub fn archetype(&self, archetype: Archetype) -> ArchetypeProfile {
        self.archetypes
            .iter()
            .find(|p| p.archetype == archetype)
            .cloned()
            .unwrap_or_else(|| ArchetypeProfile {
                archetype,
                base_score: self.fallback.score,
                hp: self.fallback.hp,
                damage: self.fallback.damage,
                defense: self.fallback.defense,
                experience_multiplier: 1.0,
                critical_chance: 0.05,
                dodge_chance: 0.05,
            })
    }

    pub fn region_profile(&self, region: Region) -> Option<&RegionProfile> {
        self.regions.iter().find(|p| p.region == region)
    }

    pub fn counters_for(&self, class: PlayerClass) -> impl Iterator<Item = &CounterBias> {
        self.counters.iter().filter(move |c| c.class == class)
    }

    pub fn grants_for(&self, class: PlayerClass) -> impl Iterator<Item = &CounterGrant> {
        self.counter_grants.iter().filter(move |g| g.class == class)
    }

    /// Weather biases matching the weather, region-specific entries included
    pub fn weather_biases(&self, weather: Weather, region: Region) -> impl Iterator<Item = &WeatherBias> {
        self.weather
            .iter()
            .filter(move |b| b.weather == weather && b.region.map_or(true, |r| r == region))
    }

    pub fn time_biases(&self, time: TimeOfDay) -> impl Iterator<Item = &TimeBias> {
        self.time_of_day.iter().filter(move |b| b.time == time)
    }

    pub fn hierarchy(&self) -> RegionHierarchy {
        RegionHierarchy::new(&self.region_links)
    }
}

fn difficulty(tier: Difficulty, hp: f64, damage: f64) -> DifficultyModifier {
    DifficultyModifier { tier, hp, damage }
}

#[allow(clippy::too_many_arguments)]
fn archetype(
    archetype: Archetype,
    base_score: f64,
    hp: f64,
    damage: f64,
    defense: f64,
    experience_multiplier: f64,
    critical_chance: f64,
    dodge_chance: f64,
) -> ArchetypeProfile {
    ArchetypeProfile {
        archetype,
        base_score,
        hp,
        damage,
        defense,
        experience_multiplier,
        critical_chance,
        dodge_chance,
    }
}

fn counter(class: PlayerClass, kind: TraitKind, tag: &str, weight: f64) -> CounterBias {
    CounterBias { class, kind, tag: tag.into(), weight }
}

fn grant(class: PlayerClass, kind: TraitKind, tag: &str) -> CounterGrant {
    CounterGrant { class, kind, tag: tag.into() }
}

fn weather(
    weather: Weather,
    region: Option<Region>,
    favoured: &str,
    bonus: f64,
    grant: Option<&str>,
) -> WeatherBias {
    WeatherBias {
        weather,
        region,
        favoured: favoured.into(),
        bonus,
        grant: grant.map(Into::into),
    }
}

fn template(
    name: &str,
    archetype: Archetype,
    behaviour: &str,
    abilities: &[&str],
    resistances: &[&str],
    status_effects: &[&str],
    weaknesses: &[&str],
) -> TemplateSpec {
    let owned = |v: &[&str]| v.iter().map(|s| s.to_string()).collect();
    TemplateSpec {
        name: name.into(),
        archetype,
        behaviour: behaviour.into(),
        abilities: owned(abilities),
        resistances: owned(resistances),
        status_effects: owned(status_effects),
        weaknesses: owned(weaknesses),
    }
}

fn default_regions() -> Vec<RegionProfile> {
    use Archetype::{Elite, Regular};

    vec![
        RegionProfile {
            region: Region::Swamp,
            roster: vec![
                template("Bog Lurker", Regular, "ambusher", &["poison_spit", "submerge"], &["poison"], &["poison"], &["fire"]),
                template("Mire Hag", Elite, "caster", &["hex", "poison_cloud"], &["poison", "magic"], &["curse"], &["strength"]),
            ],
        },
        RegionProfile {
            region: Region::Castle,
            roster: vec![
                template("Hollow Sentry", Regular, "defensive", &["shield_bash"], &["physical"], &[], &["magic"]),
                template("Gargoyle Warden", Elite, "aggressive", &["flying", "stone_skin"], &["magic", "slash"], &[], &["strength"]),
            ],
        },
        RegionProfile {
            region: Region::Mountain,
            roster: vec![
                template("Crag Wolf", Regular, "aggressive", &["pack_hunt", "frost_bite"], &["frost"], &["bleed"], &["fire"]),
                template("Storm Roc", Elite, "ranged", &["flying", "lightning_dive"], &["lightning"], &[], &["dex"]),
            ],
        },
        RegionProfile {
            region: Region::Desert,
            roster: vec![
                template("Dune Stalker", Regular, "ambusher", &["burrow", "stealth"], &["fire"], &["bleed"], &["frost"]),
                template("Sand Djinn", Elite, "caster", &["magic", "sand_veil"], &["magic", "fire"], &[], &["strength"]),
            ],
        },
        RegionProfile {
            region: Region::Volcano,
            roster: vec![
                template("Cinder Imp", Regular, "aggressive", &["fire_bolt", "ranged"], &["fire"], &["burn"], &["frost"]),
                template("Magma Brute", Elite, "aggressive", &["lava_slam", "fire_aura"], &["fire", "physical"], &["burn"], &["magic"]),
            ],
        },
    ]
}

//! Core type definitions used throughout the codebase
//!
//! Every value that arrives from the outside world as a string (region,
//! difficulty, weather, ...) is parsed into one of the closed enumerations
//! below. Unrecognized input lands on the `Unknown` variant, which every
//! modifier table treats as "no modifier applies".

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Persisted identity of a stored enemy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EnemyId(pub Uuid);

impl EnemyId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EnemyId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EnemyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// World region an encounter takes place in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    Swamp,
    Castle,
    Mountain,
    Desert,
    Volcano,
    #[serde(other)]
    Unknown,
}

impl Region {
    pub const ALL: [Region; 5] = [
        Region::Swamp,
        Region::Castle,
        Region::Mountain,
        Region::Desert,
        Region::Volcano,
    ];

    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "swamp" => Self::Swamp,
            "castle" => Self::Castle,
            "mountain" => Self::Mountain,
            "desert" => Self::Desert,
            "volcano" => Self::Volcano,
            _ => Self::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Swamp => "swamp",
            Self::Castle => "castle",
            Self::Mountain => "mountain",
            Self::Desert => "desert",
            Self::Volcano => "volcano",
            Self::Unknown => "unknown",
        }
    }

    /// Human-readable name used when synthesizing enemies
    pub fn title(&self) -> &'static str {
        match self {
            Self::Swamp => "Swamp",
            Self::Castle => "Castle",
            Self::Mountain => "Mountain",
            Self::Desert => "Desert",
            Self::Volcano => "Volcano",
            Self::Unknown => "Wandering",
        }
    }
}

impl Default for Region {
    fn default() -> Self {
        Self::Unknown
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Difficulty tier selected by the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Difficulty {
    Easy,
    Medium,
    MediumHard,
    Hard,
    #[serde(other)]
    Unknown,
}

impl Difficulty {
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Self::Easy,
            "medium" => Self::Medium,
            "medium-hard" | "medium_hard" => Self::MediumHard,
            "hard" => Self::Hard,
            _ => Self::Unknown,
        }
    }

    /// Position in the tier ordering, `None` for unrecognized tiers
    pub fn rank(&self) -> Option<u8> {
        match self {
            Self::Easy => Some(0),
            Self::Medium => Some(1),
            Self::MediumHard => Some(2),
            Self::Hard => Some(3),
            Self::Unknown => None,
        }
    }

    /// Whether this tier satisfies a minimum tier requirement.
    ///
    /// An unknown tier only satisfies the lowest requirement.
    pub fn meets(&self, minimum: Difficulty) -> bool {
        match (self.rank(), minimum.rank()) {
            (_, None) | (_, Some(0)) => true,
            (Some(have), Some(need)) => have >= need,
            (None, Some(_)) => false,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::MediumHard => "medium-hard",
            Self::Hard => "hard",
            Self::Unknown => "unknown",
        }
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::Easy
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Current weather condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weather {
    Clear,
    Rain,
    Fog,
    Snow,
    Sandstorm,
    Wind,
    #[serde(other)]
    Unknown,
}

impl Weather {
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "clear" => Self::Clear,
            "rain" => Self::Rain,
            "fog" => Self::Fog,
            "snow" => Self::Snow,
            "sandstorm" => Self::Sandstorm,
            "wind" => Self::Wind,
            _ => Self::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Clear => "clear",
            Self::Rain => "rain",
            Self::Fog => "fog",
            Self::Snow => "snow",
            Self::Sandstorm => "sandstorm",
            Self::Wind => "wind",
            Self::Unknown => "unknown",
        }
    }
}

impl Default for Weather {
    fn default() -> Self {
        Self::Clear
    }
}

impl fmt::Display for Weather {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Time of day; dawn and dusk carry no modifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeOfDay {
    Day,
    Night,
    #[serde(other)]
    Unknown,
}

impl TimeOfDay {
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "day" => Self::Day,
            "night" => Self::Night,
            _ => Self::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Night => "night",
            Self::Unknown => "unknown",
        }
    }
}

impl Default for TimeOfDay {
    fn default() -> Self {
        Self::Day
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Character build of the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlayerClass {
    Strength,
    Dex,
    Mage,
    Balanced,
    #[serde(other)]
    Unknown,
}

impl PlayerClass {
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_uppercase().as_str() {
            "STRENGTH" => Self::Strength,
            "DEX" => Self::Dex,
            "MAGE" => Self::Mage,
            "BALANCED" => Self::Balanced,
            _ => Self::Unknown,
        }
    }

    /// Damage school the build relies on, matched against enemy weaknesses
    pub fn school(&self) -> Option<&'static str> {
        match self {
            Self::Strength => Some("strength"),
            Self::Dex => Some("dex"),
            Self::Mage => Some("magic"),
            Self::Balanced | Self::Unknown => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Strength => "STRENGTH",
            Self::Dex => "DEX",
            Self::Mage => "MAGE",
            Self::Balanced => "BALANCED",
            Self::Unknown => "UNKNOWN",
        }
    }
}

impl Default for PlayerClass {
    fn default() -> Self {
        Self::Balanced
    }
}

impl fmt::Display for PlayerClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Weapon carried by the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeaponType {
    Katana,
    Bow,
    Daggers,
    Rapier,
    Greatsword,
    Hammer,
    Axe,
    Mace,
    Sword,
    Staff,
    Wand,
    Catalyst,
    Talisman,
    #[serde(other)]
    Unknown,
}

impl WeaponType {
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "katana" => Self::Katana,
            "bow" => Self::Bow,
            "daggers" | "dagger" => Self::Daggers,
            "rapier" => Self::Rapier,
            "greatsword" => Self::Greatsword,
            "hammer" => Self::Hammer,
            "axe" => Self::Axe,
            "mace" => Self::Mace,
            "sword" => Self::Sword,
            "staff" => Self::Staff,
            "wand" => Self::Wand,
            "catalyst" => Self::Catalyst,
            "talisman" => Self::Talisman,
            _ => Self::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Katana => "katana",
            Self::Bow => "bow",
            Self::Daggers => "daggers",
            Self::Rapier => "rapier",
            Self::Greatsword => "greatsword",
            Self::Hammer => "hammer",
            Self::Axe => "axe",
            Self::Mace => "mace",
            Self::Sword => "sword",
            Self::Staff => "staff",
            Self::Wand => "wand",
            Self::Catalyst => "catalyst",
            Self::Talisman => "talisman",
            Self::Unknown => "unknown",
        }
    }
}

impl Default for WeaponType {
    fn default() -> Self {
        Self::Unknown
    }
}

impl fmt::Display for WeaponType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Enemy archetype (the persisted "type" of an enemy)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Archetype {
    Regular,
    Elite,
    Boss,
    Creature,
    #[serde(other)]
    Unknown,
}

impl Archetype {
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "regular" => Self::Regular,
            "elite" => Self::Elite,
            "boss" => Self::Boss,
            "creature" => Self::Creature,
            _ => Self::Unknown,
        }
    }

    /// Elites and bosses are the "strong" half of a roster
    pub fn is_strong(&self) -> bool {
        matches!(self, Self::Elite | Self::Boss)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Regular => "regular",
            Self::Elite => "elite",
            Self::Boss => "boss",
            Self::Creature => "creature",
            Self::Unknown => "unknown",
        }
    }
}

impl Default for Archetype {
    fn default() -> Self {
        Self::Regular
    }
}

impl fmt::Display for Archetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_values_parse_to_catch_all() {
        assert_eq!(Region::parse("atlantis"), Region::Unknown);
        assert_eq!(Difficulty::parse("nightmare"), Difficulty::Unknown);
        assert_eq!(Weather::parse("hail"), Weather::Unknown);
        assert_eq!(TimeOfDay::parse("dusk"), TimeOfDay::Unknown);
        assert_eq!(PlayerClass::parse("bard"), PlayerClass::Unknown);
        assert_eq!(WeaponType::parse("whip"), WeaponType::Unknown);
    }

    #[test]
    fn test_wire_names_round_through_serde() {
        let d: Difficulty = serde_json::from_str("\"medium-hard\"").unwrap();
        assert_eq!(d, Difficulty::MediumHard);
        let c: PlayerClass = serde_json::from_str("\"DEX\"").unwrap();
        assert_eq!(c, PlayerClass::Dex);
        let w: Weather = serde_json::from_str("\"blizzard\"").unwrap();
        assert_eq!(w, Weather::Unknown);
        assert_eq!(serde_json::to_string(&Region::Volcano).unwrap(), "\"volcano\"");
    }

    #[test]
    fn test_difficulty_ordering() {
        assert!(Difficulty::Hard.meets(Difficulty::MediumHard));
        assert!(Difficulty::Medium.meets(Difficulty::Easy));
        assert!(!Difficulty::Easy.meets(Difficulty::Hard));
        assert!(Difficulty::Unknown.meets(Difficulty::Easy));
        assert!(!Difficulty::Unknown.meets(Difficulty::Medium));
    }

    #[test]
    fn test_class_schools() {
        assert_eq!(PlayerClass::Mage.school(), Some("magic"));
        assert_eq!(PlayerClass::Balanced.school(), None);
    }
}

//! The player facing the encounter

use crate::core::types::{PlayerClass, WeaponType};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    #[serde(default)]
    pub name: String,
    pub level: u32,
    #[serde(default)]
    pub player_class: PlayerClass,
    #[serde(default)]
    pub weapon_type: WeaponType,
}

impl Player {
    pub fn new(name: impl Into<String>, level: u32, class: PlayerClass, weapon: WeaponType) -> Self {
        Self {
            name: name.into(),
            level,
            player_class: class,
            weapon_type: weapon,
        }
    }

    pub fn hp(&self) -> f64 {
        100.0 + self.level as f64 * 20.0
    }

    pub fn damage(&self) -> f64 {
        50.0 + self.level as f64 * 5.0
    }

    pub fn defense(&self) -> f64 {
        30.0 + self.level as f64 * 3.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derived_stats() {
        let player = Player::new("BossHunter", 45, PlayerClass::Strength, WeaponType::Greatsword);
        assert_eq!(player.hp(), 1000.0);
        assert_eq!(player.damage(), 275.0);
        assert_eq!(player.defense(), 165.0);
    }

    #[test]
    fn test_deserialize_gateway_shape() {
        let json = r#"{"name":"SwampRanger","level":25,"playerClass":"DEX","weaponType":"bow"}"#;
        let player: Player = serde_json::from_str(json).unwrap();
        assert_eq!(player.player_class, PlayerClass::Dex);
        assert_eq!(player.weapon_type, WeaponType::Bow);
    }
}

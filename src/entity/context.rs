//! Play context an enemy is requested for

use crate::core::types::{Difficulty, Region, TimeOfDay, Weather};
use crate::entity::player::Player;
use serde::{Deserialize, Serialize};

/// Situation of one request. Immutable for the duration of a pass.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GameContext {
    pub region: Region,
    pub difficulty: Difficulty,
    pub weather: Weather,
    pub time_of_day: TimeOfDay,
    pub player: Option<Player>,
}

impl GameContext {
    pub fn new(
        region: Region,
        difficulty: Difficulty,
        weather: Weather,
        time_of_day: TimeOfDay,
        player: Option<Player>,
    ) -> Self {
        Self {
            region,
            difficulty,
            weather,
            time_of_day,
            player,
        }
    }

    /// Player level, 0 when no player is attached
    pub fn player_level(&self) -> u32 {
        self.player.as_ref().map_or(0, |p| p.level)
    }
}

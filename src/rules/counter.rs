//! Class counter mapping shared by the build-counter phase and `AUTO_COUNTER`

use crate::core::config::EngineConfig;
use crate::core::types::PlayerClass;
use crate::entity::Enemy;

/// How well an enemy answers a player build, summed from the counter table
///
/// STRENGTH is answered by ranged and magic users, DEX by stealth and
/// poison, MAGE by magic resistance. BALANCED has no dedicated counter.
pub fn counter_score(enemy: &Enemy, class: PlayerClass, config: &EngineConfig) -> f64 {
    config
        .counters_for(class)
        .filter(|bias| enemy.carries(bias.kind, &bias.tag))
        .map(|bias| bias.weight)
        .sum()
}

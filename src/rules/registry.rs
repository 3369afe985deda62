//! Phase registry for the forward pipeline
//!
//! Phases run in the fixed order of [`PHASE_ORDER`]. New rules can be
//! registered into an existing phase without touching the others.

use crate::rules::phase::Phase;
use crate::rules::rule::Rule;
use crate::rules::standard;

pub const TEMPLATE_GENERATION: &str = "template-generation";
pub const DIFFICULTY_ADJUSTMENT: &str = "difficulty-adjustment";
pub const PLAYER_LEVEL_ADJUSTMENT: &str = "player-level-adjustment";
pub const PLAYER_BUILD_COUNTER: &str = "player-build-counter";
pub const WEATHER_EFFECTS: &str = "weather-effects";
pub const TIME_OF_DAY_EFFECTS: &str = "time-of-day-effects";
pub const FINAL_SELECTION: &str = "final-selection";

pub const PHASE_ORDER: [&str; 7] = [
    TEMPLATE_GENERATION,
    DIFFICULTY_ADJUSTMENT,
    PLAYER_LEVEL_ADJUSTMENT,
    PLAYER_BUILD_COUNTER,
    WEATHER_EFFECTS,
    TIME_OF_DAY_EFFECTS,
    FINAL_SELECTION,
];

/// Ordered set of phases making up one forward pass
#[derive(Debug, Clone)]
pub struct PhaseRegistry {
    phases: Vec<Phase>,
}

impl PhaseRegistry {
    /// All seven phases with the built-in rules
    pub fn standard() -> Self {
        Self {
            phases: vec![
                standard::template_generation(),
                standard::difficulty_adjustment(),
                standard::player_level_adjustment(),
                standard::player_build_counter(),
                standard::weather_effects(),
                standard::time_of_day_effects(),
                standard::final_selection(),
            ],
        }
    }

    /// All seven phases with no rules; the player requirement is kept
    pub fn empty() -> Self {
        let phases = Self::standard()
            .phases
            .into_iter()
            .map(|p| {
                let bare = Phase::new(p.name());
                if p.requires_player() {
                    bare.requiring_player()
                } else {
                    bare
                }
            })
            .collect();
        Self { phases }
    }

    pub fn phase(&self, name: &str) -> Option<&Phase> {
        self.phases.iter().find(|p| p.name() == name)
    }

    /// Add a rule to a named phase. Returns false if no such phase exists.
    pub fn register(&mut self, phase: &str, rule: Rule) -> bool {
        match self.phases.iter_mut().find(|p| p.name() == phase) {
            Some(p) => {
                p.add_rule(rule);
                true
            }
            None => false,
        }
    }

    pub fn phases(&self) -> &[Phase] {
        &self.phases
    }
}

impl Default for PhaseRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

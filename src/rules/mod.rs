//! Forward rule engine: rules, phases and the built-in rule set

pub mod counter;
pub mod phase;
pub mod registry;
pub mod rule;
pub mod standard;

pub use counter::counter_score;
pub use phase::{Phase, PhaseError, PhaseReport};
pub use registry::{PhaseRegistry, PHASE_ORDER};
pub use rule::{Action, Condition, FactRef, Rule, RuleError, Scope};

//! Enemy Forge - encounter selection for a play context
//!
//! Forward generation builds a fitting enemy through seven rule phases.
//! Backward resolution checks whether a requested enemy is obtainable and
//! picks a stand-in when it is not.

pub mod backward;
pub mod core;
pub mod data;
pub mod director;
pub mod entity;
pub mod forward;
pub mod rules;
pub mod store;

pub use director::{EnemyDirector, EnemyDraft};

//! Backward query record and the lazy candidate chain used for class targets

use crate::backward::tree::TreeLevel;
use crate::entity::GameContext;
use serde::{Deserialize, Serialize};

/// A request to obtain a specific enemy (or a class of enemies)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BackwardQuery {
    pub target_enemy: String,
    pub context: GameContext,
    pub processed: bool,
    pub conditions_met: bool,
    pub selected_enemy: Option<String>,
    pub fallback_enemy: Option<String>,
    /// Ordered names tried for a class target
    pub candidates: Vec<String>,
    /// Index of the candidate that ended the search
    pub cursor: usize,
    /// First tree level that failed, if any
    pub failed_level: Option<TreeLevel>,
}

impl BackwardQuery {
    pub fn new(target: impl Into<String>, context: GameContext) -> Self {
        Self {
            target_enemy: target.into(),
            context,
            ..Self::default()
        }
    }
}

/// "If `current` is not valid, try `next`"
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateSequence {
    pub current: String,
    pub next: Option<String>,
    pub snapshot: GameContext,
}

/// Lazy walk over candidate names
#[derive(Debug, Clone)]
pub struct CandidateChain<'a> {
    names: &'a [String],
    position: usize,
    context: &'a GameContext,
}

impl<'a> CandidateChain<'a> {
    pub fn new(names: &'a [String], context: &'a GameContext) -> Self {
        Self {
            names,
            position: 0,
            context,
        }
    }

    /// Index of the next candidate to be yielded
    pub fn position(&self) -> usize {
        self.position
    }
}

impl Iterator for CandidateChain<'_> {
    type Item = CandidateSequence;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.names.get(self.position)?.clone();
        self.position += 1;
        Some(CandidateSequence {
            current,
            next: self.names.get(self.position).cloned(),
            snapshot: self.context.clone(),
        })
    }
}

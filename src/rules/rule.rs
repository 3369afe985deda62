//! Rule definitions: a salience, a condition and an action

use crate::core::config::EngineConfig;
use crate::forward::memory::{CandidateId, WorkingMemory};
use crate::entity::Enemy;
use thiserror::Error;

/// The fact an activation is bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FactRef {
    /// Whole memory (context, player, selection slot)
    Memory,
    /// One candidate enemy
    Candidate(CandidateId),
}

/// How a rule turns working memory into activations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// One activation per pass, bound to [`FactRef::Memory`]
    Memory,
    /// One activation per candidate present when the agenda is scanned
    EachCandidate,
}

/// Failure of a single rule action
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RuleError {
    #[error("candidate {0} is not in working memory")]
    UnknownCandidate(CandidateId),
    #[error("rule requires a {0} fact")]
    MissingFact(&'static str),
    #[error("rule would leave '{name}' with invalid {stat}")]
    InvalidStat { name: String, stat: &'static str },
    #[error("{0}")]
    Failed(String),
}

pub type Condition = fn(&WorkingMemory, FactRef, &EngineConfig) -> bool;
pub type Action = fn(&mut WorkingMemory, FactRef, &EngineConfig) -> Result<(), RuleError>;

/// A named condition/action pair inside a phase
#[derive(Clone)]
pub struct Rule {
    pub name: &'static str,
    /// Higher fires first; ties fire in declaration order
    pub salience: i32,
    pub scope: Scope,
    pub when: Condition,
    pub then: Action,
}

impl Rule {
    pub fn new(name: &'static str, salience: i32, scope: Scope, when: Condition, then: Action) -> Self {
        Self {
            name,
            salience,
            scope,
            when,
            then,
        }
    }

    /// Facts this rule could currently fire on, in insertion order
    pub fn activations(&self, memory: &WorkingMemory) -> Vec<FactRef> {
        match self.scope {
            Scope::Memory => vec![FactRef::Memory],
            Scope::EachCandidate => memory.candidate_ids().map(FactRef::Candidate).collect(),
        }
    }
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule")
            .field("name", &self.name)
            .field("salience", &self.salience)
            .field("scope", &self.scope)
            .finish()
    }
}

/// Candidate an activation is bound to
pub fn candidate(memory: &WorkingMemory, fact: FactRef) -> Option<&Enemy> {
    match fact {
        FactRef::Candidate(id) => memory.candidate(id),
        FactRef::Memory => None,
    }
}

/// Mutable candidate an activation is bound to
pub fn candidate_mut(memory: &mut WorkingMemory, fact: FactRef) -> Result<&mut Enemy, RuleError> {
    match fact {
        FactRef::Candidate(id) => memory.candidate_mut(id).ok_or(RuleError::UnknownCandidate(id)),
        FactRef::Memory => Err(RuleError::MissingFact("candidate")),
    }
}

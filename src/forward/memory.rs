//! Per-pass fact store
//!
//! A `WorkingMemory` is created for one resolution pass, handed by mutable
//! reference through every phase and dropped afterwards. Mutating a fact
//! never re-triggers rules on its own; each phase scans the agenda itself.

use crate::entity::{Enemy, GameContext, Player};

/// Stable index of a candidate; candidates are never removed during a pass
pub type CandidateId = usize;

/// Where a candidate came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateOrigin {
    /// Copy of a stored enemy
    Persisted,
    /// Built from a region roster during template generation
    Generated,
}

#[derive(Debug, Clone)]
pub struct Candidate {
    pub enemy: Enemy,
    pub origin: CandidateOrigin,
}

/// Fact kinds held in memory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FactKind {
    Context,
    Player,
    Candidate,
    Selection,
}

#[derive(Debug, Clone)]
pub struct WorkingMemory {
    context: GameContext,
    candidates: Vec<Candidate>,
    pinned: Option<CandidateId>,
    selected: Option<CandidateId>,
}

impl WorkingMemory {
    pub fn new(context: GameContext) -> Self {
        Self {
            context,
            candidates: Vec::new(),
            pinned: None,
            selected: None,
        }
    }

    pub fn context(&self) -> &GameContext {
        &self.context
    }

    pub fn player(&self) -> Option<&Player> {
        self.context.player.as_ref()
    }

    /// Insert a candidate fact and return its id
    pub fn insert_candidate(&mut self, enemy: Enemy, origin: CandidateOrigin) -> CandidateId {
        self.candidates.push(Candidate { enemy, origin });
        self.candidates.len() - 1
    }

    pub fn candidate(&self, id: CandidateId) -> Option<&Enemy> {
        self.candidates.get(id).map(|c| &c.enemy)
    }

    /// Mutate an inserted candidate in place
    pub fn candidate_mut(&mut self, id: CandidateId) -> Option<&mut Enemy> {
        self.candidates.get_mut(id).map(|c| &mut c.enemy)
    }

    pub fn candidate_ids(&self) -> impl Iterator<Item = CandidateId> {
        0..self.candidates.len()
    }

    /// All candidate facts in insertion order
    pub fn candidates(&self) -> impl Iterator<Item = (CandidateId, &Candidate)> {
        self.candidates.iter().enumerate()
    }

    pub fn candidate_count(&self) -> usize {
        self.candidates.len()
    }

    pub fn has_generated(&self) -> bool {
        self.candidates
            .iter()
            .any(|c| c.origin == CandidateOrigin::Generated)
    }

    /// Number of facts of a kind currently present
    pub fn count(&self, kind: FactKind) -> usize {
        match kind {
            FactKind::Context => 1,
            FactKind::Player => usize::from(self.context.player.is_some()),
            FactKind::Candidate => self.candidates.len(),
            FactKind::Selection => usize::from(self.selected.is_some()),
        }
    }

    /// Mark a candidate to be committed by final selection regardless of score
    pub fn pin(&mut self, id: CandidateId) -> bool {
        if id < self.candidates.len() {
            self.pinned = Some(id);
            true
        } else {
            false
        }
    }

    pub fn pinned(&self) -> Option<CandidateId> {
        self.pinned
    }

    pub fn select(&mut self, id: CandidateId) -> bool {
        if id < self.candidates.len() {
            self.selected = Some(id);
            true
        } else {
            false
        }
    }

    pub fn selected(&self) -> Option<CandidateId> {
        self.selected
    }

    pub fn selected_enemy(&self) -> Option<&Enemy> {
        self.selected.and_then(|id| self.candidate(id))
    }

    /// Consume the memory, returning every candidate enemy
    pub fn into_candidates(self) -> Vec<Enemy> {
        self.candidates.into_iter().map(|c| c.enemy).collect()
    }
}

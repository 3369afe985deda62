//! Forward generation: working memory, the phase pipeline and selection

pub mod memory;
pub mod pipeline;
pub mod selector;

pub use memory::{Candidate, CandidateId, CandidateOrigin, FactKind, WorkingMemory};
pub use pipeline::{ForwardOutcome, ForwardPipeline};
pub use selector::{best_enemy, first_max_by_score, synthesize, CandidateSelector};

//! Backward resolution: is a requested enemy obtainable here, and if not,
//! what stands in for it

pub mod query;
pub mod resolver;
pub mod result;
pub mod target;
pub mod tree;

pub use query::{BackwardQuery, CandidateChain, CandidateSequence};
pub use resolver::{BackwardResolver, Resolution};
pub use result::{ResultResolver, ResultSource};
pub use target::TargetSpec;
pub use tree::TreeLevel;

pub mod context;
pub mod enemy;
pub mod player;

pub use context::GameContext;
pub use enemy::{Enemy, SpawnRequirements};
pub use player::Player;

pub mod engine;
pub mod policy;
pub mod summary;

pub use engine::{Game, GameEvent, Phase};
pub use policy::{Policy, PolicyContext};
pub use summary::RoundSummary;

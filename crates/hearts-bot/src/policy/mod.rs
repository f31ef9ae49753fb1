mod heuristic;

pub use heuristic::{Decision, HeuristicPolicy};
pub use hearts_core::game::{Policy, PolicyContext};

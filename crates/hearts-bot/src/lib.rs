pub mod bot;
pub mod policy;

pub use bot::{CardPicker, others_hold_higher, others_hold_lower};
pub use policy::{Decision, HeuristicPolicy, Policy, PolicyContext};

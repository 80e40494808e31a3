//! Test support for the ectester crates: a simulated card and fixture sets
pub mod card;
pub mod fixtures;

pub use card::SimulatedCard;

//! Enemies and the turn-based combat resolver.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;

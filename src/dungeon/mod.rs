//! Procedural floors: tile grid, generator and map queries.

pub mod generation;
pub mod logic;
pub mod types;

pub use generation::*;
pub use types::*;

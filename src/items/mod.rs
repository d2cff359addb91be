//! Item system: types, equipment, generation, and scoring.

pub mod drops;
pub mod equipment;
pub mod generation;
pub mod names;
pub mod scoring;
pub mod types;

pub use drops::*;
pub use equipment::*;
pub use generation::*;
pub use scoring::*;
pub use types::*;

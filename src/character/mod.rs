//! Hero stats, equipment ownership, meta-progression, and persistence.

pub mod attributes;
pub mod class;
pub mod derived_stats;
pub mod hero;
pub mod meta;
pub mod save;

pub use attributes::*;
pub use class::*;
pub use derived_stats::*;
pub use hero::*;
pub use meta::*;

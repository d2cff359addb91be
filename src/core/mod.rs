//! Constants, configuration, the session record and the run orchestrator.

pub mod config;
pub mod constants;
pub mod game_state;
pub mod run;

pub use config::*;
pub use game_state::*;
pub use run::*;

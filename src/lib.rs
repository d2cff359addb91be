//! Dungeon Raid - turn-based dungeon crawler core
//!
//! This module exposes the game logic for testing and for the binaries.

pub mod character;
pub mod combat;
pub mod core;
pub mod dungeon;
pub mod items;

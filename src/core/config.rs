//! Run configuration loaded from environment variables.

use super::constants::*;
use std::env;
use std::path::PathBuf;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameConfig {
    pub map_width: usize,
    pub map_height: usize,
    /// Fixed run seed; `None` draws from OS entropy.
    pub seed: Option<u64>,
    /// Chance per step, in percent, of a random encounter.
    pub encounter_percent: u32,
    /// Steps between clearing the last map enemy and the boss appearing.
    pub boss_countdown: u32,
    pub save_dir: Option<PathBuf>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            map_width: DEFAULT_MAP_WIDTH,
            map_height: DEFAULT_MAP_HEIGHT,
            seed: None,
            encounter_percent: DEFAULT_ENCOUNTER_PERCENT,
            boss_countdown: DEFAULT_BOSS_COUNTDOWN,
            save_dir: None,
        }
    }
}

impl GameConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `DXR_MAP_WIDTH` / `DXR_MAP_HEIGHT` - floor size (default: 80x28, minimum 20x12)
    /// - `DXR_SEED` - fixed run seed (default: random)
    /// - `DXR_ENCOUNTER_PERCENT` - random encounter chance per step (default: 2)
    /// - `DXR_BOSS_COUNTDOWN` - steps until the boss spawns (default: 25)
    /// - `DXR_SAVE_DIR` - save directory (default: platform data dir)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(width) = parse::<usize>(lookup("DXR_MAP_WIDTH")) {
            config.map_width = width.clamp(MIN_MAP_WIDTH, MAX_MAP_WIDTH);
        }
        if let Some(height) = parse::<usize>(lookup("DXR_MAP_HEIGHT")) {
            config.map_height = height.clamp(MIN_MAP_HEIGHT, MAX_MAP_HEIGHT);
        }
        config.seed = parse(lookup("DXR_SEED"));
        if let Some(percent) = parse::<u32>(lookup("DXR_ENCOUNTER_PERCENT")) {
            config.encounter_percent = percent.min(100);
        }
        if let Some(steps) = parse(lookup("DXR_BOSS_COUNTDOWN")) {
            config.boss_countdown = steps;
        }
        config.save_dir = lookup("DXR_SAVE_DIR")
            .filter(|dir| !dir.trim().is_empty())
            .map(PathBuf::from);

        config
    }
}

fn parse<T>(value: Option<String>) -> Option<T>
where
    T: std::str::FromStr,
{
    value?.trim().parse().ok()
}

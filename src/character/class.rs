use super::attributes::StatBlock;
use serde::{Deserialize, Serialize};

/// Hero archetypes. Each owns a fixed starting stat block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HeroClass {
    Warrior,
    Mage,
    Rogue,
    Monk,
}

/// Class defaults, indexed by `HeroClass as usize`.
const CLASS_BASE_STATS: [StatBlock; 4] = [
    StatBlock::new(4, 1, 0, 3, 1), // Warrior
    StatBlock::new(0, 1, 5, 2, 0), // Mage
    StatBlock::new(2, 4, 1, 2, 1), // Rogue
    StatBlock::new(3, 3, 1, 3, 2), // Monk
];

impl HeroClass {
    pub fn all() -> [HeroClass; 4] {
        [
            HeroClass::Warrior,
            HeroClass::Mage,
            HeroClass::Rogue,
            HeroClass::Monk,
        ]
    }

    pub fn base_stats(&self) -> StatBlock {
        CLASS_BASE_STATS[*self as usize]
    }

    pub fn name(&self) -> &'static str {
        match self {
            HeroClass::Warrior => "Warrior",
            HeroClass::Mage => "Mage",
            HeroClass::Rogue => "Rogue",
            HeroClass::Monk => "Monk",
        }
    }

    /// Parses a class name, case-insensitively.
    pub fn from_name(name: &str) -> Option<HeroClass> {
        Self::all()
            .into_iter()
            .find(|class| class.name().eq_ignore_ascii_case(name.trim()))
    }
}

use serde::{Deserialize, Serialize};
use std::iter::Sum;
use std::ops::{Add, AddAssign};

/// The five purchasable base attributes. Flat HP bonus is not a stat type;
/// it only ever comes from items.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum StatType {
    Strength,
    Dexterity,
    Intellect,
    Vitality,
    Defense,
}

impl StatType {
    pub fn all() -> [StatType; 5] {
        [
            StatType::Strength,
            StatType::Dexterity,
            StatType::Intellect,
            StatType::Vitality,
            StatType::Defense,
        ]
    }

    pub fn abbrev(&self) -> &'static str {
        match self {
            StatType::Strength => "STR",
            StatType::Dexterity => "DEX",
            StatType::Intellect => "INT",
            StatType::Vitality => "VIT",
            StatType::Defense => "DEF",
        }
    }
}

/// Additive stat bundle shared by class bases, item bonuses and meta upgrades.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct StatBlock {
    pub str: u32,
    pub dex: u32,
    pub int: u32,
    pub vit: u32,
    pub def: u32,
    #[serde(default)]
    pub hp_bonus: u32,
}

impl StatBlock {
    pub const ZERO: StatBlock = StatBlock::new(0, 0, 0, 0, 0);

    pub const fn new(str: u32, dex: u32, int: u32, vit: u32, def: u32) -> Self {
        Self {
            str,
            dex,
            int,
            vit,
            def,
            hp_bonus: 0,
        }
    }

    pub const fn with_hp_bonus(mut self, hp_bonus: u32) -> Self {
        self.hp_bonus = hp_bonus;
        self
    }

    pub fn get(&self, stat: StatType) -> u32 {
        match stat {
            StatType::Strength => self.str,
            StatType::Dexterity => self.dex,
            StatType::Intellect => self.int,
            StatType::Vitality => self.vit,
            StatType::Defense => self.def,
        }
    }

    pub fn get_mut(&mut self, stat: StatType) -> &mut u32 {
        match stat {
            StatType::Strength => &mut self.str,
            StatType::Dexterity => &mut self.dex,
            StatType::Intellect => &mut self.int,
            StatType::Vitality => &mut self.vit,
            StatType::Defense => &mut self.def,
        }
    }

    /// Lists the non-zero fields as `STR+2`-style fragments.
    pub fn bonus_fragments(&self) -> Vec<String> {
        let mut parts: Vec<String> = StatType::all()
            .into_iter()
            .filter(|&stat| self.get(stat) != 0)
            .map(|stat| format!("{}+{}", stat.abbrev(), self.get(stat)))
            .collect();
        if self.hp_bonus != 0 {
            parts.push(format!("HP+{}", self.hp_bonus));
        }
        parts
    }
}

impl Add for StatBlock {
    type Output = StatBlock;

    fn add(self, other: StatBlock) -> StatBlock {
        StatBlock {
            str: self.str.saturating_add(other.str),
            dex: self.dex.saturating_add(other.dex),
            int: self.int.saturating_add(other.int),
            vit: self.vit.saturating_add(other.vit),
            def: self.def.saturating_add(other.def),
            hp_bonus: self.hp_bonus.saturating_add(other.hp_bonus),
        }
    }
}

impl AddAssign for StatBlock {
    fn add_assign(&mut self, other: StatBlock) {
        *self = *self + other;
    }
}

impl Sum for StatBlock {
    fn sum<I: Iterator<Item = StatBlock>>(iter: I) -> StatBlock {
        iter.fold(StatBlock::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a StatBlock> for StatBlock {
    fn sum<I: Iterator<Item = &'a StatBlock>>(iter: I) -> StatBlock {
        iter.copied().sum()
    }
}

use crate::character::attributes::StatBlock;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EquipmentSlot {
    Weapon,
    Armor,
    Trinket,
}

impl EquipmentSlot {
    pub fn all() -> [EquipmentSlot; 3] {
        [
            EquipmentSlot::Weapon,
            EquipmentSlot::Armor,
            EquipmentSlot::Trinket,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            EquipmentSlot::Weapon => "Weapon",
            EquipmentSlot::Armor => "Armor",
            EquipmentSlot::Trinket => "Trinket",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rarity {
    Common = 0,
    Rare = 1,
    Epic = 2,
    Legendary = 3,
}

impl Rarity {
    pub fn all() -> [Rarity; 4] {
        [Rarity::Common, Rarity::Rare, Rarity::Epic, Rarity::Legendary]
    }

    /// Returns the display name for this rarity tier.
    pub fn name(&self) -> &'static str {
        match self {
            Rarity::Common => "Common",
            Rarity::Rare => "Rare",
            Rarity::Epic => "Epic",
            Rarity::Legendary => "Legendary",
        }
    }

    /// Bonus range multiplier: Common 1 through Legendary 4.
    pub fn multiplier(&self) -> u32 {
        *self as u32 + 1
    }
}

/// A generated piece of gear. Never mutated after generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    pub rarity: Rarity,
    pub slot: EquipmentSlot,
    pub bonus: StatBlock,
    /// Comparison metric for auto-equip only.
    pub power: u32,
}

impl Item {
    /// One-line summary, e.g. `Iron Sword [+7] (STR+2,DEX+1)`.
    pub fn summary(&self) -> String {
        let parts = self.bonus.bonus_fragments();
        let bonus = if parts.is_empty() {
            "-".to_string()
        } else {
            parts.join(",")
        };
        format!("{} [+{}] ({})", self.name, self.power, bonus)
    }
}

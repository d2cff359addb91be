use super::types::{EquipmentSlot, Item};
use crate::character::attributes::StatBlock;
use serde::{Deserialize, Serialize};

/// Position of an item in its owner's inventory. Inventories only grow,
/// so a reference stays valid for the life of the character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemRef(pub usize);

/// One optional occupant per slot. Slots hold inventory references; the
/// inventory owns the items.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Equipment {
    pub weapon: Option<ItemRef>,
    pub armor: Option<ItemRef>,
    pub trinket: Option<ItemRef>,
}

impl Equipment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, slot: EquipmentSlot) -> Option<ItemRef> {
        match slot {
            EquipmentSlot::Weapon => self.weapon,
            EquipmentSlot::Armor => self.armor,
            EquipmentSlot::Trinket => self.trinket,
        }
    }

    pub fn set(&mut self, slot: EquipmentSlot, item: Option<ItemRef>) {
        match slot {
            EquipmentSlot::Weapon => self.weapon = item,
            EquipmentSlot::Armor => self.armor = item,
            EquipmentSlot::Trinket => self.trinket = item,
        }
    }

    pub fn iter_refs(&self) -> impl Iterator<Item = ItemRef> {
        [self.weapon, self.armor, self.trinket].into_iter().flatten()
    }

    /// Resolves every occupied slot against `inventory`. Dangling references
    /// (only possible in a hand-edited save) are skipped.
    pub fn iter_equipped<'a>(&self, inventory: &'a [Item]) -> impl Iterator<Item = &'a Item> {
        self.iter_refs()
            .filter_map(move |ItemRef(index)| inventory.get(index))
    }

    /// Folds the bonuses of every equipped item. Empty slots contribute zero.
    pub fn sum_bonuses(&self, inventory: &[Item]) -> StatBlock {
        self.iter_equipped(inventory).map(|item| item.bonus).sum()
    }
}

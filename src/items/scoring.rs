use super::types::{EquipmentSlot, Rarity};
use crate::character::attributes::StatBlock;

/// Deterministic power rating for a rolled bonus. Used only to decide
/// whether a drop replaces the equipped item in its slot.
pub fn score_item(slot: EquipmentSlot, rarity: Rarity, bonus: &StatBlock) -> u32 {
    let m = rarity.multiplier();
    match slot {
        EquipmentSlot::Weapon => 3 * bonus.str + bonus.dex + bonus.int + 2 * m,
        EquipmentSlot::Armor => 3 * bonus.def + 2 * bonus.vit + bonus.hp_bonus / 2 + 2 * m,
        EquipmentSlot::Trinket => {
            2 * (bonus.dex + bonus.int + bonus.vit) + bonus.hp_bonus / 2 + 2 * m
        }
    }
}

use super::attributes::StatBlock;
use super::class::HeroClass;
use super::derived_stats::{rescale_hp, DerivedStats, HpPolicy};
use crate::items::{EquipmentSlot, Equipment, Item, ItemRef};
use serde::{Deserialize, Serialize};

/// Outcome of offering an inventory item to its slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutoEquipResult {
    pub equipped: bool,
    /// Previous occupant, now unequipped but still in the inventory.
    pub replaced: Option<ItemRef>,
}

/// The player's hero.
///
/// HP fields are private so that `0 <= hp <= max_hp` always holds and
/// `max_hp` always matches the current total stats.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub name: String,
    pub class: HeroClass,
    pub level: u32,
    pub gold: u32,
    base: StatBlock,
    pub equipment: Equipment,
    /// Every item ever picked up, in pickup order. Never shrinks.
    inventory: Vec<Item>,
    hp: u32,
    max_hp: u32,
}

impl Character {
    /// Creates a level 1 hero with class defaults at full HP.
    pub fn new(name: impl Into<String>, class: HeroClass) -> Self {
        let mut hero = Self {
            name: name.into(),
            class,
            level: 1,
            gold: 0,
            base: class.base_stats(),
            equipment: Equipment::new(),
            inventory: Vec::new(),
            hp: 0,
            max_hp: 0,
        };
        hero.recalculate_derived(HpPolicy::FullHeal);
        hero
    }

    pub fn base(&self) -> StatBlock {
        self.base
    }

    pub fn hp(&self) -> u32 {
        self.hp
    }

    pub fn max_hp(&self) -> u32 {
        self.max_hp
    }

    pub fn inventory(&self) -> &[Item] {
        &self.inventory
    }

    pub fn is_defeated(&self) -> bool {
        self.hp == 0
    }

    /// Base stats plus every equipped item's bonus.
    pub fn total_stats(&self) -> StatBlock {
        self.derived().total
    }

    /// Totals, max HP and the defense target enemies roll against.
    pub fn derived(&self) -> DerivedStats {
        DerivedStats::calculate_derived_stats(
            &self.base,
            &self.equipment.sum_bonuses(&self.inventory),
        )
    }

    /// Recomputes max HP from total stats and adjusts current HP per `policy`.
    pub fn recalculate_derived(&mut self, policy: HpPolicy) {
        let new_max = self.derived().max_hp;
        self.hp = rescale_hp(self.hp, self.max_hp, new_max, policy);
        self.max_hp = new_max;
    }

    /// Applies combat damage. HP floors at 0.
    pub fn take_damage(&mut self, amount: u32) {
        self.hp = self.hp.saturating_sub(amount);
        self.recalculate_derived(HpPolicy::Proportional);
    }

    /// Full heal, used when a defeated hero starts a fresh run.
    pub fn revive(&mut self) {
        self.recalculate_derived(HpPolicy::FullHeal);
    }

    pub fn add_gold(&mut self, amount: u32) {
        self.gold = self.gold.saturating_add(amount);
    }

    /// Adds a permanent bonus to base stats, then fully heals.
    pub fn add_permanent_bonus(&mut self, delta: StatBlock) {
        self.base += delta;
        self.recalculate_derived(HpPolicy::FullHeal);
    }

    pub fn item(&self, item_ref: ItemRef) -> Option<&Item> {
        self.inventory.get(item_ref.0)
    }

    pub fn equipped(&self, slot: EquipmentSlot) -> Option<&Item> {
        self.equipment.get(slot).and_then(|r| self.item(r))
    }

    pub fn add_to_inventory(&mut self, item: Item) -> ItemRef {
        self.inventory.push(item);
        ItemRef(self.inventory.len() - 1)
    }

    /// Equips the referenced inventory item if its power strictly beats the
    /// current occupant of its slot. Ties keep the incumbent; an empty slot
    /// always accepts. On a swap, HP is rescaled proportionally.
    pub fn try_auto_equip(&mut self, item_ref: ItemRef) -> AutoEquipResult {
        let rejected = AutoEquipResult {
            equipped: false,
            replaced: None,
        };
        let Some(candidate) = self.item(item_ref) else {
            tracing::warn!(index = item_ref.0, "auto-equip of item outside inventory");
            return rejected;
        };
        let slot = candidate.slot;
        let current = self.equipment.get(slot);
        if current == Some(item_ref) {
            return rejected;
        }

        let better = match current.and_then(|r| self.item(r)) {
            Some(incumbent) => candidate.power > incumbent.power,
            None => true,
        };
        if !better {
            return rejected;
        }

        self.equipment.set(slot, Some(item_ref));
        self.recalculate_derived(HpPolicy::Proportional);
        AutoEquipResult {
            equipped: true,
            replaced: current,
        }
    }

    /// Adds `item` to the inventory and offers it to its slot.
    pub fn pick_up(&mut self, item: Item) -> (ItemRef, AutoEquipResult) {
        let item_ref = self.add_to_inventory(item);
        (item_ref, self.try_auto_equip(item_ref))
    }

    /// Re-establishes the HP invariants after deserialization.
    pub(crate) fn normalize(&mut self) {
        let new_max = self.derived().max_hp;
        if self.max_hp != new_max || self.hp > self.max_hp {
            self.recalculate_derived(HpPolicy::Proportional);
        }
    }
}

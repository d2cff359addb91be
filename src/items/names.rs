use super::types::{EquipmentSlot, Rarity};
use rand::Rng;

/// Flavor name pool for a slot × rarity pair.
pub fn name_pool(slot: EquipmentSlot, rarity: Rarity) -> &'static [&'static str] {
    match (slot, rarity) {
        (EquipmentSlot::Weapon, Rarity::Common) => {
            &["Rusty Sword", "Wooden Club", "Chipped Axe", "Bent Dagger"]
        }
        (EquipmentSlot::Weapon, Rarity::Rare) => {
            &["Iron Longsword", "Steel Mace", "Hunter's Spear", "Keen Dagger"]
        }
        (EquipmentSlot::Weapon, Rarity::Epic) => {
            &["Runed Greatsword", "Stormcleaver", "Nightfang", "Emberbrand"]
        }
        (EquipmentSlot::Weapon, Rarity::Legendary) => {
            &["Kingsbane", "Dawnbreaker", "Voidreaver"]
        }
        (EquipmentSlot::Armor, Rarity::Common) => {
            &["Padded Vest", "Torn Leathers", "Patchwork Mail"]
        }
        (EquipmentSlot::Armor, Rarity::Rare) => &["Chain Hauberk", "Studded Leather", "Scale Coat"],
        (EquipmentSlot::Armor, Rarity::Epic) => {
            &["Warden's Plate", "Shadowweave Robe", "Drakescale Mail"]
        }
        (EquipmentSlot::Armor, Rarity::Legendary) => &["Aegis of the Deep", "Titanforged Plate"],
        (EquipmentSlot::Trinket, Rarity::Common) => &["Bone Charm", "Copper Ring", "Lucky Pebble"],
        (EquipmentSlot::Trinket, Rarity::Rare) => {
            &["Silver Pendant", "Owl Feather Amulet", "Jade Band"]
        }
        (EquipmentSlot::Trinket, Rarity::Epic) => &["Starlit Locket", "Ring of Embers"],
        (EquipmentSlot::Trinket, Rarity::Legendary) => {
            &["Heart of the Mountain", "Eye of Azrak"]
        }
    }
}

/// Picks a flavor name uniformly from the pool.
pub fn generate_display_name(slot: EquipmentSlot, rarity: Rarity, rng: &mut impl Rng) -> String {
    let pool = name_pool(slot, rarity);
    pool[rng.gen_range(0..pool.len())].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_every_pool_is_populated() {
        for slot in EquipmentSlot::all() {
            for rarity in Rarity::all() {
                assert!(
                    !name_pool(slot, rarity).is_empty(),
                    "{slot:?}/{rarity:?} has no names"
                );
            }
        }
    }

    #[test]
    fn test_generated_name_comes_from_pool() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..50 {
            let name = generate_display_name(EquipmentSlot::Armor, Rarity::Epic, &mut rng);
            assert!(name_pool(EquipmentSlot::Armor, Rarity::Epic).contains(&name.as_str()));
        }
    }
}

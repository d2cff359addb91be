use super::generation::roll_item;
use super::types::Item;
use crate::core::constants::COMBAT_DROP_PERCENT;
use rand::Rng;

/// Rolls the post-victory drop: `COMBAT_DROP_PERCENT`% chance of a loot item.
pub fn try_drop_item(rng: &mut impl Rng) -> Option<Item> {
    if rng.gen_range(0..100) < COMBAT_DROP_PERCENT {
        Some(roll_item(rng))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_drop_rate_near_thirty_percent() {
        let mut rng = ChaCha8Rng::seed_from_u64(2024);
        let trials = 20_000;
        let drops = (0..trials).filter(|_| try_drop_item(&mut rng).is_some()).count();
        let rate = drops as f64 / trials as f64;
        assert!(
            (rate - 0.30).abs() < 0.02,
            "Expected ~30% drops, got {drops}/{trials}"
        );
    }
}

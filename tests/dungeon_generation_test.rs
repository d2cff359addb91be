//! Integration test: floor generation and chest looting
//!
//! Generates floors across many seeds and checks that every walkable tile is
//! reachable from every other, that chest counts stay inside their bounds,
//! and that opening every chest leaves none behind.

use dungeon_raid::core::constants::{MAX_CHESTS, MIN_CHESTS};
use dungeon_raid::dungeon::{chest_target, generate_map, Tile};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

#[test]
fn test_default_floors_are_connected() {
    for seed in 0..200 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let map = generate_map(80, 28, &mut rng);

        let walkable: Vec<_> = map
            .positions_of(Tile::Floor)
            .chain(map.positions_of(Tile::Chest))
            .collect();
        assert!(!walkable.is_empty(), "seed {seed} produced no floor");

        let reached = map.reachable_from(walkable[0]);
        assert_eq!(
            reached.len(),
            walkable.len(),
            "seed {seed}: {} of {} walkable tiles reachable",
            reached.len(),
            walkable.len()
        );
    }
}

#[test]
fn test_border_is_always_wall() {
    for seed in 0..50 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let map = generate_map(60, 20, &mut rng);
        for x in 0..map.width() {
            assert_eq!(map.get(x, 0), Tile::Wall);
            assert_eq!(map.get(x, map.height() - 1), Tile::Wall);
        }
        for y in 0..map.height() {
            assert_eq!(map.get(0, y), Tile::Wall);
            assert_eq!(map.get(map.width() - 1, y), Tile::Wall);
        }
    }
}

#[test]
fn test_chest_count_within_bounds() {
    for (width, height) in [(80, 28), (20, 12), (120, 40)] {
        let target = chest_target(width, height);
        for seed in 0..50 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let map = generate_map(width, height, &mut rng);
            let chests = map.count(Tile::Chest);
            assert!(
                chests <= target && chests <= MAX_CHESTS,
                "{width}x{height} seed {seed}: {chests} chests, target {target}"
            );
            if (width, height) == (80, 28) {
                assert!(chests >= 1, "seed {seed}: no chests on a default floor");
            }
        }
    }
    assert_eq!(chest_target(80, 28), MIN_CHESTS);
}

#[test]
fn test_undersized_request_is_raised_to_minimum() {
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let map = generate_map(5, 5, &mut rng);
    assert_eq!(map.width(), 20);
    assert_eq!(map.height(), 12);
}

#[test]
fn test_opening_every_chest_clears_the_floor() {
    let mut rng = ChaCha8Rng::seed_from_u64(11);
    let mut map = generate_map(80, 28, &mut rng);
    let chests: Vec<_> = map.positions_of(Tile::Chest).collect();
    assert!(!chests.is_empty());

    for &(x, y) in &chests {
        assert!(map.try_open_chest(x, y, &mut rng).is_some());
        assert!(map.try_open_chest(x, y, &mut rng).is_none());
        assert_eq!(map.get(x, y), Tile::Floor);
    }
    assert_eq!(map.count(Tile::Chest), 0);
}

#[test]
fn test_same_seed_same_floor() {
    let a = generate_map(80, 28, &mut ChaCha8Rng::seed_from_u64(99));
    let b = generate_map(80, 28, &mut ChaCha8Rng::seed_from_u64(99));
    assert_eq!(a, b);
}

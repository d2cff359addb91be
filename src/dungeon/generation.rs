//! Room-and-corridor floor generation.

use super::types::{DungeonMap, Tile};
use crate::core::constants::{
    AREA_PER_CHEST, AREA_PER_ROOM, CHEST_TRIES_PER_CHEST, MAX_CHESTS, MAX_MAP_HEIGHT,
    MAX_MAP_WIDTH, MAX_ROOMS, MIN_CHESTS, MIN_MAP_HEIGHT, MIN_MAP_WIDTH, MIN_ROOMS,
    ROOM_HEIGHT_RANGE, ROOM_WIDTH_RANGE,
};
use rand::Rng;

/// Axis-aligned rectangle carved out of the wall fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Room {
    x: usize,
    y: usize,
    w: usize,
    h: usize,
}

impl Room {
    fn center(&self) -> (usize, usize) {
        (self.x + self.w / 2, self.y + self.h / 2)
    }
}

pub fn room_count(width: usize, height: usize) -> usize {
    (width * height / AREA_PER_ROOM).clamp(MIN_ROOMS, MAX_ROOMS)
}

pub fn chest_target(width: usize, height: usize) -> usize {
    (width * height / AREA_PER_CHEST).clamp(MIN_CHESTS, MAX_CHESTS)
}

/// Generates a connected floor.
///
/// Each room is joined to the previous one by an L-shaped corridor, so every
/// room reaches the first room and therefore every other room. Dimensions
/// are clamped to the supported range.
pub fn generate_map(width: usize, height: usize, rng: &mut impl Rng) -> DungeonMap {
    let width = width.clamp(MIN_MAP_WIDTH, MAX_MAP_WIDTH);
    let height = height.clamp(MIN_MAP_HEIGHT, MAX_MAP_HEIGHT);
    let mut map = DungeonMap::filled(width, height, Tile::Wall);

    let rooms = room_count(width, height);
    let mut previous: Option<Room> = None;
    for _ in 0..rooms {
        let w = rng.gen_range(ROOM_WIDTH_RANGE.0..ROOM_WIDTH_RANGE.1);
        let h = rng.gen_range(ROOM_HEIGHT_RANGE.0..ROOM_HEIGHT_RANGE.1);
        let room = Room {
            x: rng.gen_range(1..width - w - 1),
            y: rng.gen_range(1..height - h - 1),
            w,
            h,
        };
        carve_room(&mut map, &room);

        if let Some(prev) = previous {
            let (px, py) = prev.center();
            let (cx, cy) = room.center();
            if rng.gen_range(0..2) == 0 {
                carve_h_corridor(&mut map, px, cx, py);
                carve_v_corridor(&mut map, py, cy, cx);
            } else {
                carve_v_corridor(&mut map, py, cy, px);
                carve_h_corridor(&mut map, px, cx, cy);
            }
        }
        previous = Some(room);
    }

    let placed = place_chests(&mut map, rng);
    tracing::debug!(width, height, rooms, chests = placed, "floor generated");
    map
}

/// Rejection-samples chest spots whose four neighbours are open, so a chest
/// never plugs a one-wide corridor. Gives up after a bounded number of tries.
fn place_chests(map: &mut DungeonMap, rng: &mut impl Rng) -> usize {
    let (width, height) = (map.width(), map.height());
    let target = chest_target(width, height);
    let mut remaining = target;
    let mut tries = target * CHEST_TRIES_PER_CHEST;

    while remaining > 0 && tries > 0 {
        tries -= 1;
        let x = rng.gen_range(2..width - 2);
        let y = rng.gen_range(2..height - 2);

        let open_neighbours = map.get(x, y - 1) != Tile::Wall
            && map.get(x, y + 1) != Tile::Wall
            && map.get(x - 1, y) != Tile::Wall
            && map.get(x + 1, y) != Tile::Wall;
        if map.get(x, y) == Tile::Floor && open_neighbours {
            map.set(x, y, Tile::Chest);
            remaining -= 1;
        }
    }

    if remaining > 0 {
        tracing::warn!(
            target,
            placed = target - remaining,
            "chest placement budget exhausted"
        );
    }
    target - remaining
}

/// Carves the room interior, never touching the 1-tile border.
fn carve_room(map: &mut DungeonMap, room: &Room) {
    for y in room.y..room.y + room.h {
        for x in room.x..room.x + room.w {
            carve(map, x, y);
        }
    }
}

fn carve_h_corridor(map: &mut DungeonMap, x1: usize, x2: usize, y: usize) {
    for x in x1.min(x2)..=x1.max(x2) {
        carve(map, x, y);
    }
}

fn carve_v_corridor(map: &mut DungeonMap, y1: usize, y2: usize, x: usize) {
    for y in y1.min(y2)..=y1.max(y2) {
        carve(map, x, y);
    }
}

fn carve(map: &mut DungeonMap, x: usize, y: usize) {
    if x > 0 && y > 0 && x < map.width() - 1 && y < map.height() - 1 {
        map.set(x, y, Tile::Floor);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_room_count_clamped() {
        assert_eq!(room_count(80, 28), 12);
        assert_eq!(room_count(20, 12), MIN_ROOMS);
        assert_eq!(room_count(400, 400), MAX_ROOMS);
    }

    #[test]
    fn test_chest_target_clamped() {
        assert_eq!(chest_target(80, 28), MIN_CHESTS);
        assert_eq!(chest_target(120, 60), 8);
        assert_eq!(chest_target(400, 400), MAX_CHESTS);
    }

    #[test]
    fn test_border_stays_wall() {
        let map = generate_map(80, 28, &mut ChaCha8Rng::seed_from_u64(1));
        for x in 0..map.width() {
            assert_eq!(map.get(x, 0), Tile::Wall);
            assert_eq!(map.get(x, map.height() - 1), Tile::Wall);
        }
        for y in 0..map.height() {
            assert_eq!(map.get(0, y), Tile::Wall);
            assert_eq!(map.get(map.width() - 1, y), Tile::Wall);
        }
    }

    #[test]
    fn test_small_dimensions_are_raised() {
        let map = generate_map(3, 3, &mut ChaCha8Rng::seed_from_u64(5));
        assert_eq!(map.width(), MIN_MAP_WIDTH);
        assert_eq!(map.height(), MIN_MAP_HEIGHT);
        assert!(map.count(Tile::Floor) > 0);
    }

    #[test]
    fn test_large_dimensions_are_capped() {
        let map = generate_map(usize::MAX, 5000, &mut ChaCha8Rng::seed_from_u64(6));
        assert_eq!(map.width(), MAX_MAP_WIDTH);
        assert_eq!(map.height(), MAX_MAP_HEIGHT);
    }

    #[test]
    fn test_chests_have_open_neighbours() {
        for seed in 0..10 {
            let map = generate_map(80, 28, &mut ChaCha8Rng::seed_from_u64(seed));
            for (x, y) in map.positions_of(Tile::Chest) {
                assert!(map.is_walkable(x, y - 1));
                assert!(map.is_walkable(x, y + 1));
                assert!(map.is_walkable(x - 1, y));
                assert!(map.is_walkable(x + 1, y));
            }
        }
    }

    #[test]
    fn test_same_seed_same_map() {
        let a = generate_map(80, 28, &mut ChaCha8Rng::seed_from_u64(77));
        let b = generate_map(80, 28, &mut ChaCha8Rng::seed_from_u64(77));
        assert_eq!(a, b);
    }
}

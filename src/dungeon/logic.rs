//! Queries and mutations on a generated floor.

use super::types::{Direction, DungeonMap, Tile};
use crate::core::constants::{FALLBACK_FLOOR, RANDOM_FLOOR_ATTEMPTS};
use crate::items::{roll_item, Item};
use rand::Rng;
use std::collections::{HashMap, HashSet, VecDeque};

impl DungeonMap {
    /// Random interior non-chest floor tile.
    ///
    /// Uniform rejection sampling for a bounded number of attempts. When that
    /// runs dry, the first Floor tile in row-major order is used instead, and
    /// only a map without any Floor returns `FALLBACK_FLOOR`.
    pub fn random_floor(&self, rng: &mut impl Rng) -> (usize, usize) {
        if self.width() > 2 && self.height() > 2 {
            for _ in 0..RANDOM_FLOOR_ATTEMPTS {
                let x = rng.gen_range(1..self.width() - 1);
                let y = rng.gen_range(1..self.height() - 1);
                if self.get(x, y) == Tile::Floor {
                    return (x, y);
                }
            }
        }

        let fallback = self.positions_of(Tile::Floor).next();
        tracing::warn!(?fallback, "random floor sampling exhausted");
        fallback.unwrap_or(FALLBACK_FLOOR)
    }

    /// Opens the chest at (x, y): rolls loot and turns the tile into Floor.
    /// Returns `None` when there is no chest, so a tile can't pay out twice.
    pub fn try_open_chest(&mut self, x: usize, y: usize, rng: &mut impl Rng) -> Option<Item> {
        if !self.is_chest(x, y) {
            return None;
        }
        let loot = roll_item(rng);
        self.set(x, y, Tile::Floor);
        Some(loot)
    }

    /// Every walkable tile reachable from `start` by 4-directional moves.
    pub fn reachable_from(&self, start: (usize, usize)) -> HashSet<(usize, usize)> {
        let mut seen = HashSet::new();
        if !self.is_walkable(start.0, start.1) {
            return seen;
        }
        let mut queue = VecDeque::from([start]);
        seen.insert(start);
        while let Some(pos) = queue.pop_front() {
            for next in self.walkable_neighbours(pos) {
                if seen.insert(next) {
                    queue.push_back(next);
                }
            }
        }
        seen
    }

    /// Shortest walkable path from `from` to `to`, excluding `from` itself.
    pub fn find_path(
        &self,
        from: (usize, usize),
        to: (usize, usize),
    ) -> Option<Vec<(usize, usize)>> {
        if from == to {
            return Some(Vec::new());
        }
        let mut came_from: HashMap<(usize, usize), (usize, usize)> = HashMap::new();
        let mut queue = VecDeque::from([from]);
        came_from.insert(from, from);

        while let Some(pos) = queue.pop_front() {
            if pos == to {
                let mut path = vec![to];
                let mut current = to;
                while let Some(&prev) = came_from.get(&current) {
                    if prev == from {
                        break;
                    }
                    path.push(prev);
                    current = prev;
                }
                path.reverse();
                return Some(path);
            }
            for next in self.walkable_neighbours(pos) {
                if let std::collections::hash_map::Entry::Vacant(e) = came_from.entry(next) {
                    e.insert(pos);
                    queue.push_back(next);
                }
            }
        }
        None
    }

    fn walkable_neighbours(
        &self,
        pos: (usize, usize),
    ) -> impl Iterator<Item = (usize, usize)> + '_ {
        Direction::all()
            .into_iter()
            .filter_map(move |dir| dir.step(pos))
            .filter(move |&(x, y)| self.is_walkable(x, y))
    }
}

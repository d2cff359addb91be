//! Tile map data structures.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tile {
    Wall,
    Floor,
    /// One-shot loot; becomes Floor once opened.
    Chest,
}

impl Tile {
    /// Returns the display character for this tile.
    pub fn glyph(&self) -> char {
        match self {
            Tile::Wall => '#',
            Tile::Floor => '.',
            Tile::Chest => 'C',
        }
    }
}

/// Movement directions, 4-connected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn all() -> [Direction; 4] {
        [Direction::Up, Direction::Right, Direction::Down, Direction::Left]
    }

    /// (dx, dy) offset.
    pub fn offset(&self) -> (i64, i64) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// Neighbour of `pos`, or `None` when it would leave the positive quadrant.
    pub fn step(&self, (x, y): (usize, usize)) -> Option<(usize, usize)> {
        let (dx, dy) = self.offset();
        let nx = usize::try_from(x as i64 + dx).ok()?;
        let ny = usize::try_from(y as i64 + dy).ok()?;
        Some((nx, ny))
    }
}

/// A fixed-size floor, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DungeonMap {
    width: usize,
    height: usize,
    tiles: Vec<Tile>,
}

impl DungeonMap {
    /// A map with every cell set to `tile`.
    pub fn filled(width: usize, height: usize, tile: Tile) -> Self {
        Self {
            width,
            height,
            tiles: vec![tile; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn in_bounds(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    /// Out-of-bounds reads as Wall.
    pub fn get(&self, x: usize, y: usize) -> Tile {
        if self.in_bounds(x, y) {
            self.tiles[y * self.width + x]
        } else {
            Tile::Wall
        }
    }

    pub(crate) fn set(&mut self, x: usize, y: usize, tile: Tile) {
        if self.in_bounds(x, y) {
            self.tiles[y * self.width + x] = tile;
        }
    }

    /// True for any in-bounds tile that is not Wall; chests are walkable.
    pub fn is_walkable(&self, x: usize, y: usize) -> bool {
        self.get(x, y) != Tile::Wall
    }

    pub fn is_chest(&self, x: usize, y: usize) -> bool {
        self.get(x, y) == Tile::Chest
    }

    pub fn count(&self, tile: Tile) -> usize {
        self.tiles.iter().filter(|&&t| t == tile).count()
    }

    /// Every position holding `tile`, row-major.
    pub fn positions_of(&self, tile: Tile) -> impl Iterator<Item = (usize, usize)> + '_ {
        let width = self.width;
        self.tiles
            .iter()
            .enumerate()
            .filter(move |&(_, &t)| t == tile)
            .map(move |(i, _)| (i % width, i / width))
    }
}

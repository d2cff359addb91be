// Hit points
pub const BASE_HP: i64 = 20;
pub const HP_PER_VITALITY: i64 = 5;

// Floor layout
pub const DEFAULT_MAP_WIDTH: usize = 80;
pub const DEFAULT_MAP_HEIGHT: usize = 28;
pub const MIN_MAP_WIDTH: usize = 20;
pub const MIN_MAP_HEIGHT: usize = 12;
pub const MAX_MAP_WIDTH: usize = 200;
pub const MAX_MAP_HEIGHT: usize = 100;
pub const AREA_PER_ROOM: usize = 180;
pub const MIN_ROOMS: usize = 10;
pub const MAX_ROOMS: usize = 22;
pub const ROOM_WIDTH_RANGE: (usize, usize) = (5, 10); // [min, max)
pub const ROOM_HEIGHT_RANGE: (usize, usize) = (4, 8); // [min, max)
pub const AREA_PER_CHEST: usize = 900;
pub const MIN_CHESTS: usize = 3;
pub const MAX_CHESTS: usize = 12;
pub const CHEST_TRIES_PER_CHEST: usize = 20;
pub const RANDOM_FLOOR_ATTEMPTS: usize = 2000;
pub const FALLBACK_FLOOR: (usize, usize) = (1, 1);

// Loot tables (weights out of 100)
pub const RARITY_WEIGHTS: [u32; 4] = [60, 25, 12, 3];
pub const SLOT_WEAPON_PERCENT: u32 = 45;
pub const SLOT_ARMOR_PERCENT: u32 = 35;
pub const COMBAT_DROP_PERCENT: u32 = 30;

// Combat
pub const HERO_ATTACK_DIE: u32 = 20;
pub const DAMAGE_DIE: u32 = 6;
pub const HERO_BASE_DEFENSE: u32 = 10;
pub const FLEE_SUCCESS_PERCENT: u32 = 50;
pub const COMBAT_LOG_LINES: usize = 9;
pub const MAX_AUTO_HALF_TURNS: u32 = 2000;

// Enemy scaling per hero level above 1
pub const ENEMY_HP_PER_LEVEL: u32 = 4;
pub const ENEMY_ATTACK_PER_LEVEL: u32 = 1;
pub const ENEMY_DEFENSE_PER_LEVEL: u32 = 1;
pub const ENEMY_GOLD_PER_LEVEL: u32 = 2;

// Map mobs and boss, ranges are [min, max)
pub const MAP_ENEMY_HP_RANGE: (u32, u32) = (16, 24);
pub const MAP_ENEMY_ATTACK_RANGE: (u32, u32) = (3, 6);
pub const MAP_ENEMY_DEFENSE_RANGE: (u32, u32) = (9, 12);
pub const MAP_ENEMY_GOLD_RANGE: (u32, u32) = (6, 12);
pub const BOSS_HP: u32 = 80;
pub const BOSS_ATTACK: u32 = 10;
pub const BOSS_DEFENSE: u32 = 12;
pub const BOSS_GOLD: u32 = 50;

// Map population
pub const AREA_PER_MAP_ENEMY: usize = 800;
pub const MIN_MAP_ENEMIES: usize = 6;
pub const MAX_MAP_ENEMIES: usize = 14;
pub const ENEMY_PLACEMENT_ATTEMPTS: usize = 50;
pub const DEFAULT_ENCOUNTER_PERCENT: u32 = 2;
pub const DEFAULT_BOSS_COUNTDOWN: u32 = 25;
pub const MESSAGE_LOG_LINES: usize = 6;

// Meta progression costs: base + per_level * purchased
pub const META_COST_STR: (u32, u32) = (20, 10);
pub const META_COST_DEX: (u32, u32) = (20, 10);
pub const META_COST_INT: (u32, u32) = (20, 10);
pub const META_COST_VIT: (u32, u32) = (30, 15);
pub const META_COST_DEF: (u32, u32) = (25, 12);

// Names
pub const MAX_NAME_LENGTH: usize = 16;
pub const DEFAULT_HERO_NAME: &str = "DefaultHero";

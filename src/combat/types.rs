use rand::Rng;

use crate::core::constants::*;

/// A combat participant on the monster side. Never persisted with a save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enemy {
    pub name: String,
    pub max_hp: u32,
    pub hp: u32,
    /// Added to the enemy's d20 roll and half of it to its damage.
    pub attack: u32,
    /// Score the hero's attack roll has to reach.
    pub defense: u32,
    pub gold_reward: u32,
    pub glyph: char,
    pub is_boss: bool,
}

impl Enemy {
    pub fn new(
        name: impl Into<String>,
        max_hp: u32,
        attack: u32,
        defense: u32,
        gold_reward: u32,
        glyph: char,
    ) -> Self {
        Self {
            name: name.into(),
            max_hp,
            hp: max_hp,
            attack,
            defense,
            gold_reward,
            glyph,
            is_boss: false,
        }
    }

    /// Applies the per-level bonus for a hero of `level`. Full heal included.
    pub fn scaled(mut self, level: u32) -> Self {
        let bonus = level_bonus(level);
        self.max_hp = self.max_hp.saturating_add(ENEMY_HP_PER_LEVEL * bonus);
        self.hp = self.max_hp;
        self.attack = self.attack.saturating_add(ENEMY_ATTACK_PER_LEVEL * bonus);
        self.defense = self.defense.saturating_add(ENEMY_DEFENSE_PER_LEVEL * bonus);
        self.gold_reward = self
            .gold_reward
            .saturating_add(ENEMY_GOLD_PER_LEVEL * bonus);
        self
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    pub fn take_damage(&mut self, amount: u32) {
        self.hp = self.hp.saturating_sub(amount);
    }
}

/// Scaling steps above level 1.
pub fn level_bonus(level: u32) -> u32 {
    level.saturating_sub(1)
}

/// Unscaled stats for a random-encounter enemy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnemyTemplate {
    pub name: &'static str,
    pub hp: u32,
    pub attack: u32,
    pub defense: u32,
    pub gold: u32,
    pub glyph: char,
}

impl EnemyTemplate {
    pub fn instantiate(&self, level: u32) -> Enemy {
        Enemy::new(
            self.name,
            self.hp,
            self.attack,
            self.defense,
            self.gold,
            self.glyph,
        )
        .scaled(level)
    }
}

pub const ENCOUNTER_POOL: [EnemyTemplate; 4] = [
    EnemyTemplate {
        name: "Goblin",
        hp: 14,
        attack: 3,
        defense: 9,
        gold: 6,
        glyph: 'g',
    },
    EnemyTemplate {
        name: "Cave Bat",
        hp: 10,
        attack: 2,
        defense: 8,
        gold: 4,
        glyph: 'b',
    },
    EnemyTemplate {
        name: "Dire Wolf",
        hp: 18,
        attack: 4,
        defense: 10,
        gold: 8,
        glyph: 'w',
    },
    EnemyTemplate {
        name: "Skeleton",
        hp: 20,
        attack: 4,
        defense: 11,
        gold: 9,
        glyph: 's',
    },
];

/// Random encounter: uniform pick from the pool, scaled to the hero.
pub fn spawn_for_level(level: u32, rng: &mut impl Rng) -> Enemy {
    let template = &ENCOUNTER_POOL[rng.gen_range(0..ENCOUNTER_POOL.len())];
    template.instantiate(level)
}

/// A pre-placed floor mob with rolled stats.
pub fn roll_map_enemy(level: u32, rng: &mut impl Rng) -> Enemy {
    let hp = rng.gen_range(MAP_ENEMY_HP_RANGE.0..MAP_ENEMY_HP_RANGE.1);
    let attack = rng.gen_range(MAP_ENEMY_ATTACK_RANGE.0..MAP_ENEMY_ATTACK_RANGE.1);
    let defense = rng.gen_range(MAP_ENEMY_DEFENSE_RANGE.0..MAP_ENEMY_DEFENSE_RANGE.1);
    let gold = rng.gen_range(MAP_ENEMY_GOLD_RANGE.0..MAP_ENEMY_GOLD_RANGE.1);
    Enemy::new("Dungeon Mob", hp, attack, defense, gold, 'e').scaled(level)
}

pub fn boss_for_level(level: u32) -> Enemy {
    let mut boss = Enemy::new(
        "Warden of the Deep",
        BOSS_HP,
        BOSS_ATTACK,
        BOSS_DEFENSE,
        BOSS_GOLD,
        'B',
    )
    .scaled(level);
    boss.is_boss = true;
    boss
}

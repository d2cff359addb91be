//! One run through a generated floor: exploration, chests, encounters and the boss.
//!
//! The frontend feeds [`Action`]s into [`Run::step`] and renders the returned
//! [`RunEvent`]s plus the [`RunView`] snapshot. The hero is borrowed per step
//! so the owning `GameSession` can be saved as soon as the run ends.

use super::config::GameConfig;
use super::constants::*;
use crate::character::{Character, HeroClass, StatBlock, StatType};
use crate::combat::{
    boss_for_level, roll_map_enemy, spawn_for_level, Combat, CombatEvent, CombatPhase, Enemy,
};
use crate::dungeon::{generate_map, Direction, DungeonMap, Tile};
use crate::items::{EquipmentSlot, Item};
use rand::Rng;
use std::collections::VecDeque;

/// Player input, already decoded from keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Move(Direction),
    Confirm,
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunEnd {
    Exit,
    HeroDied,
}

/// An enemy standing on the floor until it is beaten.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapEnemy {
    pub pos: (usize, usize),
    pub enemy: Enemy,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RunEvent {
    Moved {
        to: (usize, usize),
    },
    Blocked,
    ChestOpened {
        item: Item,
        equipped: bool,
        replaced: Option<Item>,
        /// Change in total stats and max HP, e.g. `STR+2, HP+5`.
        delta: String,
    },
    CombatStarted {
        enemy: String,
        from_map: bool,
        boss: bool,
    },
    Combat(CombatEvent),
    /// Last scripted enemy beaten; the boss appears after `steps` more moves.
    BossCountdownStarted {
        steps: u32,
    },
    BossSpawned {
        pos: (usize, usize),
    },
    FloorCleared,
    Ended(RunEnd),
}

#[derive(Debug, Clone)]
struct Encounter {
    combat: Combat,
    /// Index into the map enemy list; `None` for a random encounter.
    map_index: Option<usize>,
}

/// Hero stats as shown in the status panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeroSnapshot {
    pub name: String,
    pub class: HeroClass,
    pub level: u32,
    pub gold: u32,
    pub hp: u32,
    pub max_hp: u32,
    pub base: StatBlock,
    pub total: StatBlock,
    pub equipped: Vec<(EquipmentSlot, Option<String>)>,
    pub inventory_len: usize,
}

impl HeroSnapshot {
    pub fn of(hero: &Character) -> Self {
        Self {
            name: hero.name.clone(),
            class: hero.class,
            level: hero.level,
            gold: hero.gold,
            hp: hero.hp(),
            max_hp: hero.max_hp(),
            base: hero.base(),
            total: hero.total_stats(),
            equipped: EquipmentSlot::all()
                .into_iter()
                .map(|slot| (slot, hero.equipped(slot).map(format_item_line)))
                .collect(),
            inventory_len: hero.inventory().len(),
        }
    }
}

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone)]
pub struct RunView<'a> {
    pub map: &'a DungeonMap,
    pub hero_pos: (usize, usize),
    pub enemies: &'a [MapEnemy],
    pub combat: Option<&'a Combat>,
    pub hero: HeroSnapshot,
    pub messages: Vec<&'a str>,
    pub boss_countdown: Option<u32>,
    pub steps: u32,
}

impl RunView<'_> {
    /// Glyph at (x, y) with the hero and enemies drawn over the tiles.
    pub fn glyph_at(&self, x: usize, y: usize) -> char {
        if (x, y) == self.hero_pos {
            return '@';
        }
        if let Some(e) = self.enemies.iter().find(|e| e.pos == (x, y)) {
            return e.enemy.glyph;
        }
        self.map.get(x, y).glyph()
    }
}

/// Item line for status panels.
pub fn format_item_line(item: &Item) -> String {
    format!("{} <{}>", item.summary(), item.rarity.name())
}

/// Per-stat change between two totals, e.g. `STR+2, DEF-1, HP+5`.
pub fn stat_delta(
    before: &StatBlock,
    after: &StatBlock,
    max_hp_before: u32,
    max_hp_after: u32,
) -> String {
    let mut parts = Vec::new();
    for stat in StatType::all() {
        let diff = i64::from(after.get(stat)) - i64::from(before.get(stat));
        if diff != 0 {
            parts.push(format!("{}{:+}", stat.abbrev(), diff));
        }
    }
    let hp_diff = i64::from(max_hp_after) - i64::from(max_hp_before);
    if hp_diff != 0 {
        parts.push(format!("HP{hp_diff:+}"));
    }
    if parts.is_empty() {
        "no change".to_string()
    } else {
        parts.join(", ")
    }
}

pub fn map_enemy_count(width: usize, height: usize) -> usize {
    (width * height / AREA_PER_MAP_ENEMY).clamp(MIN_MAP_ENEMIES, MAX_MAP_ENEMIES)
}

pub struct Run<R: Rng> {
    rng: R,
    map: DungeonMap,
    /// Level the floor's enemies are scaled to.
    hero_level: u32,
    hero_pos: (usize, usize),
    enemies: Vec<MapEnemy>,
    encounter: Option<Encounter>,
    encounter_percent: u32,
    boss_delay: u32,
    boss_countdown: Option<u32>,
    boss_spawned: bool,
    floor_cleared: bool,
    steps: u32,
    chests_opened: u32,
    messages: VecDeque<String>,
    ended: Option<RunEnd>,
}

impl<R: Rng> Run<R> {
    /// Generates a floor, places the hero and populates the map enemies.
    /// A defeated hero is revived first.
    pub fn new(config: &GameConfig, hero: &mut Character, mut rng: R) -> Self {
        let map = generate_map(config.map_width, config.map_height, &mut rng);
        let hero_pos = map.random_floor(&mut rng);
        let mut run = Self::with_layout(config, hero, map, hero_pos, Vec::new(), rng);

        let wanted = map_enemy_count(run.map.width(), run.map.height());
        for _ in 0..wanted {
            let Some(pos) = run.free_floor() else {
                tracing::warn!(wanted, placed = run.enemies.len(), "ran out of enemy spots");
                break;
            };
            let enemy = roll_map_enemy(hero.level, &mut run.rng);
            run.enemies.push(MapEnemy { pos, enemy });
        }
        tracing::info!(
            hero = %hero.name,
            enemies = run.enemies.len(),
            chests = run.map.count(Tile::Chest),
            "run started"
        );
        run
    }

    /// Builds a run on a prepared floor.
    pub fn with_layout(
        config: &GameConfig,
        hero: &mut Character,
        map: DungeonMap,
        hero_pos: (usize, usize),
        enemies: Vec<MapEnemy>,
        rng: R,
    ) -> Self {
        if hero.is_defeated() {
            hero.revive();
            tracing::info!(hero = %hero.name, "defeated hero revived for a new run");
        }
        let mut run = Self {
            rng,
            map,
            hero_level: hero.level,
            hero_pos,
            enemies,
            encounter: None,
            encounter_percent: config.encounter_percent,
            boss_delay: config.boss_countdown,
            boss_countdown: None,
            boss_spawned: false,
            floor_cleared: false,
            steps: 0,
            chests_opened: 0,
            messages: VecDeque::with_capacity(MESSAGE_LOG_LINES),
            ended: None,
        };
        run.message(format!("{} enters the dungeon.", hero.name));
        run
    }

    pub fn map(&self) -> &DungeonMap {
        &self.map
    }

    pub fn hero_pos(&self) -> (usize, usize) {
        self.hero_pos
    }

    pub fn enemies(&self) -> &[MapEnemy] {
        &self.enemies
    }

    pub fn combat(&self) -> Option<&Combat> {
        self.encounter.as_ref().map(|e| &e.combat)
    }

    pub fn in_combat(&self) -> bool {
        self.encounter.is_some()
    }

    pub fn ended(&self) -> Option<RunEnd> {
        self.ended
    }

    pub fn steps(&self) -> u32 {
        self.steps
    }

    pub fn chests_opened(&self) -> u32 {
        self.chests_opened
    }

    pub fn boss_countdown(&self) -> Option<u32> {
        self.boss_countdown
    }

    pub fn boss_spawned(&self) -> bool {
        self.boss_spawned
    }

    pub fn floor_cleared(&self) -> bool {
        self.floor_cleared
    }

    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.messages.iter().map(String::as_str)
    }

    pub fn view(&self, hero: &Character) -> RunView<'_> {
        RunView {
            map: &self.map,
            hero_pos: self.hero_pos,
            enemies: &self.enemies,
            combat: self.combat(),
            hero: HeroSnapshot::of(hero),
            messages: self.messages().collect(),
            boss_countdown: self.boss_countdown,
            steps: self.steps,
        }
    }

    /// Applies one player action. Does nothing once the run has ended.
    pub fn step(&mut self, hero: &mut Character, action: Action) -> Vec<RunEvent> {
        if self.ended.is_some() {
            return Vec::new();
        }
        if self.encounter.is_some() {
            return self.step_combat(hero, action);
        }
        match action {
            Action::Move(dir) => self.step_move(hero, dir),
            Action::Cancel => vec![self.end(RunEnd::Exit)],
            Action::Confirm => Vec::new(),
        }
    }

    fn step_move(&mut self, hero: &mut Character, dir: Direction) -> Vec<RunEvent> {
        let Some(to) = dir
            .step(self.hero_pos)
            .filter(|&(x, y)| self.map.is_walkable(x, y))
        else {
            return vec![RunEvent::Blocked];
        };
        self.hero_pos = to;
        self.steps += 1;
        let mut events = vec![RunEvent::Moved { to }];

        if let Some(event) = self.open_chest(hero) {
            events.push(event);
        }

        if let Some(index) = self.enemies.iter().position(|e| e.pos == to) {
            let enemy = self.enemies[index].enemy.clone();
            events.push(self.start_combat(enemy, Some(index)));
        } else if self.rng.gen_range(0..100) < self.encounter_percent {
            let enemy = spawn_for_level(hero.level, &mut self.rng);
            events.push(self.start_combat(enemy, None));
        }

        self.tick_boss_countdown(&mut events);
        events
    }

    fn open_chest(&mut self, hero: &mut Character) -> Option<RunEvent> {
        let (x, y) = self.hero_pos;
        let item = self.map.try_open_chest(x, y, &mut self.rng)?;
        self.chests_opened += 1;

        let before = hero.total_stats();
        let max_hp_before = hero.max_hp();
        let (_, result) = hero.pick_up(item.clone());
        let replaced = result.replaced.and_then(|r| hero.item(r)).cloned();
        let delta = stat_delta(&before, &hero.total_stats(), max_hp_before, hero.max_hp());

        if result.equipped {
            self.message(format!("Chest: {} equipped ({delta})", item.name));
        } else {
            self.message(format!("Chest: {} stowed", item.name));
        }
        tracing::info!(item = %item.name, power = item.power, equipped = result.equipped, "chest opened");
        Some(RunEvent::ChestOpened {
            item,
            equipped: result.equipped,
            replaced,
            delta,
        })
    }

    fn start_combat(&mut self, enemy: Enemy, map_index: Option<usize>) -> RunEvent {
        let event = RunEvent::CombatStarted {
            enemy: enemy.name.clone(),
            from_map: map_index.is_some(),
            boss: enemy.is_boss,
        };
        self.message(format!("A {} attacks!", enemy.name));
        tracing::debug!(enemy = %enemy.name, from_map = map_index.is_some(), "combat started");
        self.encounter = Some(Encounter {
            combat: Combat::new(enemy),
            map_index,
        });
        event
    }

    fn step_combat(&mut self, hero: &mut Character, action: Action) -> Vec<RunEvent> {
        let Some(encounter) = self.encounter.as_mut() else {
            return Vec::new();
        };
        let result = match action {
            Action::Confirm => encounter.combat.advance(hero, &mut self.rng),
            Action::Cancel => encounter.combat.attempt_flee(&mut self.rng).map(|e| vec![e]),
            Action::Move(_) => return Vec::new(),
        };
        let mut events: Vec<RunEvent> = match result {
            Ok(combat_events) => combat_events.into_iter().map(RunEvent::Combat).collect(),
            Err(e) => {
                tracing::warn!(error = %e, "combat action rejected");
                Vec::new()
            }
        };

        if encounter.combat.is_over() {
            if let Some(finished) = self.encounter.take() {
                self.finish_encounter(finished, &mut events);
            }
        }
        events
    }

    fn finish_encounter(&mut self, encounter: Encounter, events: &mut Vec<RunEvent>) {
        let enemy = encounter.combat.enemy();
        match encounter.combat.phase() {
            CombatPhase::Victory => {
                self.message(format!("{} defeated.", enemy.name));
                let Some(index) = encounter.map_index else {
                    return;
                };
                let beaten = self.enemies.remove(index);
                if beaten.enemy.is_boss {
                    self.floor_cleared = true;
                    self.message("The floor is cleared!".to_string());
                    tracing::info!(steps = self.steps, "floor cleared");
                    events.push(RunEvent::FloorCleared);
                } else if self.enemies.is_empty() && !self.boss_spawned {
                    self.boss_countdown = Some(self.boss_delay);
                    self.message("All foes defeated. The boss senses your presence...".to_string());
                    events.push(RunEvent::BossCountdownStarted {
                        steps: self.boss_delay,
                    });
                    if self.boss_delay == 0 {
                        self.spawn_boss(events);
                    }
                }
            }
            CombatPhase::Fled => {
                self.message(format!("You escaped from {}.", enemy.name));
                if let Some(map_enemy) = encounter.map_index.and_then(|i| self.enemies.get_mut(i)) {
                    map_enemy.enemy = enemy.clone();
                }
            }
            CombatPhase::Defeat => {
                self.message(format!("Slain by {}.", enemy.name));
                events.push(self.end(RunEnd::HeroDied));
            }
            CombatPhase::AwaitHeroAction | CombatPhase::AwaitEnemyAction => {}
        }
    }

    fn tick_boss_countdown(&mut self, events: &mut Vec<RunEvent>) {
        let Some(remaining) = self.boss_countdown else {
            return;
        };
        let remaining = remaining.saturating_sub(1);
        if remaining == 0 {
            self.spawn_boss(events);
        } else {
            self.boss_countdown = Some(remaining);
        }
    }

    fn spawn_boss(&mut self, events: &mut Vec<RunEvent>) {
        self.boss_countdown = None;
        self.boss_spawned = true;
        let boss = boss_for_level(self.hero_level);
        let Some(pos) = self.free_floor() else {
            tracing::warn!(pos = ?self.hero_pos, "no free tile for the boss, fighting in place");
            self.enemies.push(MapEnemy {
                pos: self.hero_pos,
                enemy: boss.clone(),
            });
            self.message("The boss erupts beneath you!".to_string());
            events.push(RunEvent::BossSpawned { pos: self.hero_pos });
            if self.encounter.is_none() {
                let index = self.enemies.len() - 1;
                events.push(self.start_combat(boss, Some(index)));
            }
            return;
        };
        self.enemies.push(MapEnemy { pos, enemy: boss });
        self.message("A dark rumble... The boss has appeared!".to_string());
        tracing::info!(?pos, "boss spawned");
        events.push(RunEvent::BossSpawned { pos });
    }

    fn is_free(&self, pos: (usize, usize)) -> bool {
        pos != self.hero_pos && !self.enemies.iter().any(|e| e.pos == pos)
    }

    /// A floor tile not under the hero or another enemy. Random picks come
    /// first, then a row-major scan.
    fn free_floor(&mut self) -> Option<(usize, usize)> {
        for _ in 0..ENEMY_PLACEMENT_ATTEMPTS {
            let pos = self.map.random_floor(&mut self.rng);
            if self.is_free(pos) {
                return Some(pos);
            }
        }
        self.map.positions_of(Tile::Floor).find(|&pos| self.is_free(pos))
    }

    fn end(&mut self, end: RunEnd) -> RunEvent {
        self.ended = Some(end);
        tracing::info!(?end, steps = self.steps, chests = self.chests_opened, "run ended");
        RunEvent::Ended(end)
    }

    fn message(&mut self, line: String) {
        if self.messages.len() >= MESSAGE_LOG_LINES {
            self.messages.pop_front();
        }
        self.messages.push_back(line);
    }
}

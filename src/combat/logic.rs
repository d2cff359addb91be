//! Turn-based combat between the hero and a single enemy.
//!
//! The caller drives the fight one half-turn at a time through [`Combat::advance`]
//! (or offers a flee with [`Combat::attempt_flee`]) and renders the returned events.

use super::types::Enemy;
use crate::character::hero::Character;
use crate::core::constants::*;
use crate::items::{try_drop_item, Item};
use rand::Rng;
use std::collections::VecDeque;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombatPhase {
    AwaitHeroAction,
    AwaitEnemyAction,
    Victory,
    Defeat,
    Fled,
}

impl CombatPhase {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            CombatPhase::Victory | CombatPhase::Defeat | CombatPhase::Fled
        )
    }
}

/// Events emitted by combat for the frontend to display.
#[derive(Debug, Clone, PartialEq)]
pub enum CombatEvent {
    HeroAttack {
        roll: u32,
        score: u32,
        hit: bool,
        damage: u32,
    },
    EnemyAttack {
        roll: u32,
        score: u32,
        target: u32,
        hit: bool,
        damage: u32,
    },
    FleeFailed,
    Fled,
    /// Enemy defeated; gold is already credited and the drop, if any, is in
    /// the inventory.
    Victory {
        gold: u32,
        drop: Option<Item>,
        equipped: bool,
    },
    HeroDied,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CombatError {
    #[error("combat already ended ({0:?})")]
    Finished(CombatPhase),

    #[error("expected {expected:?}, combat is in {actual:?}")]
    OutOfTurn {
        expected: CombatPhase,
        actual: CombatPhase,
    },
}

pub type Result<T> = std::result::Result<T, CombatError>;

/// Summary of a finished fight.
#[derive(Debug, Clone, PartialEq)]
pub struct CombatOutcome {
    pub phase: CombatPhase,
    pub gold_gained: u32,
    pub drop: Option<Item>,
}

impl CombatOutcome {
    pub fn won(&self) -> bool {
        self.phase == CombatPhase::Victory
    }

    pub fn hero_died(&self) -> bool {
        self.phase == CombatPhase::Defeat
    }
}

#[derive(Debug, Clone)]
pub struct Combat {
    enemy: Enemy,
    phase: CombatPhase,
    log: VecDeque<String>,
    rounds: u32,
    gold_gained: u32,
    drop: Option<Item>,
}

impl Combat {
    pub fn new(enemy: Enemy) -> Self {
        let mut combat = Self {
            enemy,
            phase: CombatPhase::AwaitHeroAction,
            log: VecDeque::with_capacity(COMBAT_LOG_LINES),
            rounds: 0,
            gold_gained: 0,
            drop: None,
        };
        combat.push_log(format!("A {} appears!", combat.enemy.name));
        combat
    }

    pub fn enemy(&self) -> &Enemy {
        &self.enemy
    }

    pub fn phase(&self) -> CombatPhase {
        self.phase
    }

    pub fn is_over(&self) -> bool {
        self.phase.is_terminal()
    }

    /// Completed hero+enemy exchanges.
    pub fn rounds(&self) -> u32 {
        self.rounds
    }

    /// Most recent log lines, oldest first.
    pub fn log(&self) -> impl Iterator<Item = &str> {
        self.log.iter().map(String::as_str)
    }

    pub fn outcome(&self) -> Option<CombatOutcome> {
        self.is_over().then(|| CombatOutcome {
            phase: self.phase,
            gold_gained: self.gold_gained,
            drop: self.drop.clone(),
        })
    }

    /// Resolves whichever half-turn is due.
    pub fn advance(&mut self, hero: &mut Character, rng: &mut impl Rng) -> Result<Vec<CombatEvent>> {
        match self.phase {
            CombatPhase::AwaitHeroAction => self.hero_attack(hero, rng),
            CombatPhase::AwaitEnemyAction => self.enemy_attack(hero, rng),
            phase => Err(CombatError::Finished(phase)),
        }
    }

    /// d20 + STR against the enemy's defense; a hit deals max(1, d6 + STR).
    pub fn hero_attack(
        &mut self,
        hero: &mut Character,
        rng: &mut impl Rng,
    ) -> Result<Vec<CombatEvent>> {
        self.expect_phase(CombatPhase::AwaitHeroAction)?;
        if hero.is_defeated() {
            return Ok(vec![self.defeat()]);
        }

        let strength = hero.derived().total.str;
        let roll = rng.gen_range(1..=HERO_ATTACK_DIE);
        let score = roll.saturating_add(strength);
        let hit = score >= self.enemy.defense;
        let damage = if hit {
            rng.gen_range(1..=DAMAGE_DIE).saturating_add(strength).max(1)
        } else {
            0
        };
        self.enemy.take_damage(damage);

        if hit {
            self.push_log(format!(
                "Hit! (d20 {roll} + STR {strength} >= {}) -> {damage} damage",
                self.enemy.defense
            ));
        } else {
            self.push_log(format!(
                "Miss. (d20 {roll} + STR {strength} < {})",
                self.enemy.defense
            ));
        }
        tracing::debug!(roll, score, hit, damage, enemy_hp = self.enemy.hp, "hero attack");

        let mut events = vec![CombatEvent::HeroAttack {
            roll,
            score,
            hit,
            damage,
        }];
        if self.enemy.is_alive() {
            self.phase = CombatPhase::AwaitEnemyAction;
        } else {
            events.push(self.victory(hero, rng));
        }
        Ok(events)
    }

    /// d20 + ATK against 10 + hero DEF; a hit deals max(1, d6 + ATK/2).
    pub fn enemy_attack(
        &mut self,
        hero: &mut Character,
        rng: &mut impl Rng,
    ) -> Result<Vec<CombatEvent>> {
        self.expect_phase(CombatPhase::AwaitEnemyAction)?;
        if hero.is_defeated() {
            return Ok(vec![self.defeat()]);
        }

        let target = hero.derived().defense_target;
        let roll = rng.gen_range(1..=HERO_ATTACK_DIE);
        let score = roll.saturating_add(self.enemy.attack);
        let hit = score >= target;
        let damage = if hit {
            rng.gen_range(1..=DAMAGE_DIE)
                .saturating_add(self.enemy.attack / 2)
                .max(1)
        } else {
            0
        };
        if hit {
            hero.take_damage(damage);
            self.push_log(format!(
                "{} hits! (d20 {roll} + ATK {} >= {target}) -> {damage} damage",
                self.enemy.name, self.enemy.attack
            ));
        } else {
            self.push_log(format!(
                "{} misses. (d20 {roll} + ATK {} < {target})",
                self.enemy.name, self.enemy.attack
            ));
        }
        tracing::debug!(roll, score, target, hit, damage, hero_hp = hero.hp(), "enemy attack");

        let mut events = vec![CombatEvent::EnemyAttack {
            roll,
            score,
            target,
            hit,
            damage,
        }];
        self.rounds += 1;
        if hero.is_defeated() {
            events.push(self.defeat());
        } else {
            self.phase = CombatPhase::AwaitHeroAction;
        }
        Ok(events)
    }

    /// Tries to escape in place of the next half-turn. On failure the hero's
    /// turn is spent and the enemy acts next.
    pub fn attempt_flee(&mut self, rng: &mut impl Rng) -> Result<CombatEvent> {
        if self.is_over() {
            return Err(CombatError::Finished(self.phase));
        }
        if rng.gen_range(0..100) < FLEE_SUCCESS_PERCENT {
            self.phase = CombatPhase::Fled;
            self.push_log("You got away!".to_string());
            tracing::info!(enemy = %self.enemy.name, "hero fled");
            Ok(CombatEvent::Fled)
        } else {
            self.phase = CombatPhase::AwaitEnemyAction;
            self.push_log("Escape failed!".to_string());
            Ok(CombatEvent::FleeFailed)
        }
    }

    /// Always attacks until the fight ends. A fight where neither side can
    /// ever land a hit is abandoned as fled after a bounded number of turns.
    pub fn resolve_to_end(&mut self, hero: &mut Character, rng: &mut impl Rng) -> CombatOutcome {
        let mut half_turns = 0;
        while !self.is_over() && half_turns < MAX_AUTO_HALF_TURNS {
            if self.advance(hero, rng).is_err() {
                break;
            }
            half_turns += 1;
        }
        if !self.is_over() {
            tracing::warn!(enemy = %self.enemy.name, half_turns, "stalemate, abandoning fight");
            self.phase = CombatPhase::Fled;
        }
        CombatOutcome {
            phase: self.phase,
            gold_gained: self.gold_gained,
            drop: self.drop.clone(),
        }
    }

    fn victory(&mut self, hero: &mut Character, rng: &mut impl Rng) -> CombatEvent {
        self.phase = CombatPhase::Victory;
        let gold = self.enemy.gold_reward;
        hero.add_gold(gold);
        self.gold_gained = gold;
        self.push_log(format!("Victory over {}! +{gold} gold", self.enemy.name));

        let mut equipped = false;
        if let Some(item) = try_drop_item(rng) {
            self.push_log(format!("Drop: {}", item.summary()));
            let (_, result) = hero.pick_up(item.clone());
            equipped = result.equipped;
            self.drop = Some(item);
        }
        tracing::info!(
            enemy = %self.enemy.name,
            gold,
            drop = self.drop.is_some(),
            rounds = self.rounds,
            "enemy defeated"
        );
        CombatEvent::Victory {
            gold,
            drop: self.drop.clone(),
            equipped,
        }
    }

    fn defeat(&mut self) -> CombatEvent {
        self.phase = CombatPhase::Defeat;
        self.push_log(format!("You were defeated by {}...", self.enemy.name));
        tracing::info!(enemy = %self.enemy.name, rounds = self.rounds, "hero defeated");
        CombatEvent::HeroDied
    }

    fn expect_phase(&self, expected: CombatPhase) -> Result<()> {
        if self.phase == expected {
            Ok(())
        } else if self.is_over() {
            Err(CombatError::Finished(self.phase))
        } else {
            Err(CombatError::OutOfTurn {
                expected,
                actual: self.phase,
            })
        }
    }

    fn push_log(&mut self, line: String) {
        if self.log.len() >= COMBAT_LOG_LINES {
            self.log.pop_front();
        }
        self.log.push_back(line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::{HeroClass, StatBlock};
    use crate::items::{EquipmentSlot, Rarity};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn hero_with(bonus: StatBlock) -> Character {
        let mut hero = Character::new("Tester", HeroClass::Warrior);
        hero.add_permanent_bonus(bonus);
        hero
    }

    fn training_dummy() -> Enemy {
        Enemy::new("Dummy", 30, 2, 10, 5, 'd')
    }

    #[test]
    fn test_new_combat_awaits_hero() {
        let combat = Combat::new(training_dummy());
        assert_eq!(combat.phase(), CombatPhase::AwaitHeroAction);
        assert!(!combat.is_over());
        assert!(combat.outcome().is_none());
        assert_eq!(combat.log().count(), 1);
    }

    #[test]
    fn test_guaranteed_hit_always_damages() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        // STR 4 + 20 means even a natural 1 reaches DEF 10.
        let mut hero = hero_with(StatBlock::new(20, 0, 0, 0, 0));
        for _ in 0..200 {
            let mut combat = Combat::new(training_dummy());
            let events = combat.hero_attack(&mut hero, &mut rng).expect("hero turn");
            match &events[0] {
                CombatEvent::HeroAttack { hit, damage, .. } => {
                    assert!(hit);
                    assert!(*damage >= 1);
                }
                other => panic!("unexpected event {other:?}"),
            }
        }
    }

    #[test]
    fn test_hit_damage_is_d6_plus_strength() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let mut hero = hero_with(StatBlock::new(20, 0, 0, 0, 0)); // STR 24
        let mut combat = Combat::new(Enemy::new("Wall", 1000, 0, 1, 0, 'w'));
        let events = combat.hero_attack(&mut hero, &mut rng).expect("hero turn");
        let CombatEvent::HeroAttack { damage, .. } = events[0] else {
            panic!("expected hero attack");
        };
        assert!((25..=30).contains(&damage));
        assert_eq!(combat.enemy().hp, 1000 - damage);
    }

    #[test]
    fn test_impossible_hit_never_damages_enemy() {
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        let mut hero = Character::new("Weakling", HeroClass::Mage); // STR 0
        hero.add_permanent_bonus(StatBlock::new(0, 0, 0, 0, 100));
        let mut combat = Combat::new(Enemy::new("Fortress", 10, 0, 21, 0, 'f'));
        for _ in 0..50 {
            combat.hero_attack(&mut hero, &mut rng).expect("hero turn");
            assert_eq!(combat.enemy().hp, 10);
            combat.enemy_attack(&mut hero, &mut rng).expect("enemy turn");
        }
    }

    #[test]
    fn test_enemy_damage_has_floor_of_one() {
        let mut rng = ChaCha8Rng::seed_from_u64(21);
        let mut hero = Character::new("Target", HeroClass::Warrior); // DEF 1, target 11
        let mut combat = Combat::new(Enemy::new("Swarm", 1000, 20, 100, 0, 's'));
        for _ in 0..10 {
            combat.hero_attack(&mut hero, &mut rng).expect("hero turn");
            let before = hero.hp();
            let events = combat.enemy_attack(&mut hero, &mut rng).expect("enemy turn");
            let CombatEvent::EnemyAttack { hit, damage, .. } = events[0] else {
                panic!("expected enemy attack");
            };
            // ATK 20 always reaches 11.
            assert!(hit);
            assert!((11..=16).contains(&damage));
            assert_eq!(hero.hp(), before.saturating_sub(damage).min(hero.max_hp()));
            if combat.is_over() {
                break;
            }
        }
    }

    #[test]
    fn test_enemy_rolls_against_equipped_defense() {
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        let mut hero = Character::new("Guard", HeroClass::Warrior);
        hero.pick_up(Item {
            name: "Tower Shield".to_string(),
            rarity: Rarity::Rare,
            slot: EquipmentSlot::Armor,
            bonus: StatBlock::new(0, 0, 0, 0, 3),
            power: 3,
        });
        let derived = hero.derived();
        assert_eq!(derived.total.def, 4);
        assert_eq!(derived.defense_target, HERO_BASE_DEFENSE + 4);

        let mut combat = Combat::new(training_dummy());
        combat.hero_attack(&mut hero, &mut rng).expect("hero turn");
        if combat.is_over() {
            return;
        }
        let events = combat.enemy_attack(&mut hero, &mut rng).expect("enemy turn");
        let CombatEvent::EnemyAttack { target, .. } = events[0] else {
            panic!("expected enemy attack");
        };
        assert_eq!(target, derived.defense_target);
    }

    #[test]
    fn test_out_of_turn_is_rejected() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut hero = hero_with(StatBlock::ZERO);
        let mut combat = Combat::new(training_dummy());
        assert_eq!(
            combat.enemy_attack(&mut hero, &mut rng),
            Err(CombatError::OutOfTurn {
                expected: CombatPhase::AwaitEnemyAction,
                actual: CombatPhase::AwaitHeroAction,
            })
        );
    }

    #[test]
    fn test_acting_after_victory_is_rejected() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut hero = hero_with(StatBlock::new(50, 0, 0, 0, 0));
        let mut combat = Combat::new(Enemy::new("Twig", 1, 0, 1, 3, 't'));
        let events = combat.advance(&mut hero, &mut rng).expect("hero turn");
        assert!(matches!(events.last(), Some(CombatEvent::Victory { gold: 3, .. })));
        assert_eq!(combat.phase(), CombatPhase::Victory);
        assert_eq!(
            combat.advance(&mut hero, &mut rng),
            Err(CombatError::Finished(CombatPhase::Victory))
        );
        assert_eq!(
            combat.attempt_flee(&mut rng),
            Err(CombatError::Finished(CombatPhase::Victory))
        );
    }

    #[test]
    fn test_victory_pays_gold_and_keeps_drop_in_inventory() {
        let mut rng = ChaCha8Rng::seed_from_u64(6);
        let mut hero = hero_with(StatBlock::new(50, 0, 0, 0, 50));
        for _ in 0..50 {
            let gold_before = hero.gold;
            let items_before = hero.inventory().len();
            let mut combat = Combat::new(Enemy::new("Rat", 5, 1, 1, 4, 'r'));
            let outcome = combat.resolve_to_end(&mut hero, &mut rng);
            assert!(outcome.won());
            assert_eq!(hero.gold, gold_before + 4);
            let expected = items_before + usize::from(outcome.drop.is_some());
            assert_eq!(hero.inventory().len(), expected);
        }
    }

    #[test]
    fn test_defeat_pays_nothing() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut hero = Character::new("Doomed", HeroClass::Mage);
        let mut combat = Combat::new(Enemy::new("Dragon", 10_000, 30, 50, 500, 'D'));
        let outcome = combat.resolve_to_end(&mut hero, &mut rng);
        assert!(outcome.hero_died());
        assert_eq!(hero.hp(), 0);
        assert_eq!(hero.gold, 0);
        assert!(hero.inventory().is_empty());
        assert_eq!(outcome.gold_gained, 0);
    }

    #[test]
    fn test_hp_never_exceeds_bounds_over_many_fights() {
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        for level in 1..6 {
            let mut hero = Character::new("Sim", HeroClass::Rogue);
            hero.level = level;
            let mut combat = Combat::new(crate::combat::spawn_for_level(level, &mut rng));
            while !combat.is_over() {
                combat.advance(&mut hero, &mut rng).expect("turn");
                assert!(hero.hp() <= hero.max_hp());
                assert!(combat.enemy().hp <= combat.enemy().max_hp);
            }
        }
    }

    #[test]
    fn test_flee_rate_near_half() {
        let mut rng = ChaCha8Rng::seed_from_u64(12);
        let trials = 10_000;
        let fled = (0..trials)
            .filter(|_| {
                let mut combat = Combat::new(training_dummy());
                combat.attempt_flee(&mut rng) == Ok(CombatEvent::Fled)
            })
            .count();
        let rate = fled as f64 / trials as f64;
        assert!((rate - 0.5).abs() < 0.03, "flee rate {rate}");
    }

    #[test]
    fn test_failed_flee_hands_turn_to_enemy() {
        let mut rng = ChaCha8Rng::seed_from_u64(13);
        loop {
            let mut combat = Combat::new(training_dummy());
            if combat.attempt_flee(&mut rng) == Ok(CombatEvent::FleeFailed) {
                assert_eq!(combat.phase(), CombatPhase::AwaitEnemyAction);
                break;
            }
            assert_eq!(combat.phase(), CombatPhase::Fled);
            assert_eq!(combat.outcome().map(|o| o.gold_gained), Some(0));
        }
    }

    #[test]
    fn test_stalemate_is_abandoned() {
        let mut rng = ChaCha8Rng::seed_from_u64(14);
        let mut hero = hero_with(StatBlock::new(0, 0, 0, 0, 100));
        let mut combat = Combat::new(Enemy::new("Ghost", 10, 0, 100, 1, 'G'));
        let outcome = combat.resolve_to_end(&mut hero, &mut rng);
        assert_eq!(outcome.phase, CombatPhase::Fled);
        assert_eq!(hero.hp(), hero.max_hp());
    }

    #[test]
    fn test_log_keeps_last_lines() {
        let mut rng = ChaCha8Rng::seed_from_u64(15);
        let mut hero = hero_with(StatBlock::new(0, 0, 0, 0, 100));
        let mut combat = Combat::new(Enemy::new("Ghost", 10, 0, 100, 1, 'G'));
        for _ in 0..20 {
            combat.advance(&mut hero, &mut rng).expect("turn");
        }
        assert_eq!(combat.log().count(), COMBAT_LOG_LINES);
        assert_eq!(combat.rounds(), 10);
    }

    #[test]
    fn test_defeated_hero_cannot_fight() {
        let mut rng = ChaCha8Rng::seed_from_u64(16);
        let mut hero = Character::new("Fallen", HeroClass::Monk);
        hero.take_damage(u32::MAX);
        let mut combat = Combat::new(training_dummy());
        let events = combat.advance(&mut hero, &mut rng).expect("turn");
        assert_eq!(events, vec![CombatEvent::HeroDied]);
        assert_eq!(combat.phase(), CombatPhase::Defeat);
    }
}

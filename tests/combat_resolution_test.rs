//! Integration test: turn-by-turn combat resolution
//!
//! Plays many seeded fights for every class against encounter and map
//! enemies, checking the dice bookkeeping of every half-turn and the
//! rewards or penalties applied when a fight ends.

use dungeon_raid::character::{Character, HeroClass};
use dungeon_raid::combat::{
    boss_for_level, roll_map_enemy, spawn_for_level, Combat, CombatError, CombatEvent,
    CombatPhase, Enemy,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Steps a fight with `advance` until it ends, checking every event.
/// Caps at 10_000 half-turns.
fn fight(hero: &mut Character, enemy: Enemy, rng: &mut ChaCha8Rng) -> (Combat, Vec<CombatEvent>) {
    let mut combat = Combat::new(enemy);
    let mut all_events = Vec::new();

    for _ in 0..10_000 {
        if combat.is_over() {
            break;
        }
        let strength = hero.total_stats().str;
        let target = 10 + hero.total_stats().def;
        let enemy_attack = combat.enemy().attack;
        let events = combat.advance(hero, rng).expect("fight in progress");

        for event in &events {
            match *event {
                CombatEvent::HeroAttack {
                    roll,
                    score,
                    hit,
                    damage,
                } => {
                    assert!((1..=20).contains(&roll));
                    assert_eq!(score, roll + strength);
                    assert_eq!(hit, damage > 0, "hits always deal damage, misses never");
                }
                CombatEvent::EnemyAttack {
                    roll,
                    score,
                    target: t,
                    hit,
                    damage,
                } => {
                    assert!((1..=20).contains(&roll));
                    assert_eq!(score, roll + enemy_attack);
                    assert_eq!(t, target);
                    assert_eq!(hit, score >= target);
                    assert_eq!(hit, damage > 0);
                }
                _ => {}
            }
        }
        assert!(hero.hp() <= hero.max_hp());
        all_events.extend(events);
    }
    (combat, all_events)
}

#[test]
fn test_fights_end_with_consistent_rewards() {
    for class in HeroClass::all() {
        for seed in 0..100 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let mut hero = Character::new("Tester", class);
            let enemy = spawn_for_level(1, &mut rng);
            let gold_reward = enemy.gold_reward;

            let (combat, events) = fight(&mut hero, enemy, &mut rng);
            assert!(combat.is_over(), "{class:?} seed {seed} never finished");

            let outcome = combat.outcome().expect("finished fight has an outcome");
            match combat.phase() {
                CombatPhase::Victory => {
                    assert!(outcome.won());
                    assert_eq!(hero.gold, gold_reward);
                    assert_eq!(outcome.gold_gained, gold_reward);
                    assert_eq!(hero.inventory().len(), usize::from(outcome.drop.is_some()));
                    assert!(!combat.enemy().is_alive());
                    assert!(matches!(events.last(), Some(CombatEvent::Victory { .. })));
                }
                CombatPhase::Defeat => {
                    assert!(outcome.hero_died());
                    assert_eq!(hero.hp(), 0);
                    assert_eq!(hero.gold, 0);
                    assert_eq!(events.last(), Some(&CombatEvent::HeroDied));
                }
                other => panic!("unexpected terminal phase {other:?}"),
            }
        }
    }
}

#[test]
fn test_finished_fight_rejects_further_actions() {
    let mut rng = ChaCha8Rng::seed_from_u64(5);
    let mut hero = Character::new("Tester", HeroClass::Warrior);
    let (mut combat, _) = fight(&mut hero, roll_map_enemy(1, &mut rng), &mut rng);
    let phase = combat.phase();

    assert_eq!(
        combat.advance(&mut hero, &mut rng),
        Err(CombatError::Finished(phase))
    );
    assert_eq!(combat.attempt_flee(&mut rng), Err(CombatError::Finished(phase)));
}

#[test]
fn test_enemy_cannot_act_out_of_turn() {
    let mut rng = ChaCha8Rng::seed_from_u64(8);
    let mut hero = Character::new("Tester", HeroClass::Rogue);
    let mut combat = Combat::new(boss_for_level(1));

    assert_eq!(
        combat.enemy_attack(&mut hero, &mut rng),
        Err(CombatError::OutOfTurn {
            expected: CombatPhase::AwaitEnemyAction,
            actual: CombatPhase::AwaitHeroAction,
        })
    );
    assert_eq!(hero.hp(), hero.max_hp());
}

#[test]
fn test_boss_usually_beats_a_fresh_mage() {
    let mut losses = 0;
    for seed in 0..200 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut hero = Character::new("Tester", HeroClass::Mage);
        let mut combat = Combat::new(boss_for_level(1));
        if combat.resolve_to_end(&mut hero, &mut rng).hero_died() {
            losses += 1;
        }
    }
    assert!(losses > 150, "boss only won {losses}/200");
}

#[test]
fn test_flee_rate_near_half() {
    let mut rng = ChaCha8Rng::seed_from_u64(77);
    let trials = 10_000;
    let fled = (0..trials)
        .filter(|_| {
            let mut combat = Combat::new(spawn_for_level(1, &mut rng));
            combat.attempt_flee(&mut rng) == Ok(CombatEvent::Fled)
        })
        .count();
    let rate = fled as f64 / trials as f64;
    assert!((rate - 0.5).abs() < 0.03, "flee rate {rate}");
}

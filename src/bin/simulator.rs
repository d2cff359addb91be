//! Dungeon Raid Headless Simulator
//!
//! Plays seeded runs without a terminal using the same `Run::step` the game
//! uses. The hero walks to the nearest enemy or chest, always attacks, and
//! leaves once the floor is cleared or nothing reachable is left.
//!
//! Usage:
//!   cargo run --bin simulator -- [OPTIONS]
//!
//! Options:
//!   --runs N        Number of runs with incrementing seeds (default: 10)
//!   --seed N        First RNG seed (default: DXR_SEED or 42)
//!   --class NAME    Warrior, Mage, Rogue or Monk (default: Warrior)
//!   --max-steps N   Actions per run before giving up (default: 5000)
//!   --quiet         Only the final summary line

use dungeon_raid::character::{Character, HeroClass};
use dungeon_raid::core::{Action, GameConfig, Run, RunEnd, RunEvent};
use dungeon_raid::dungeon::{Direction, Tile};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

// ── CLI Configuration ────────────────────────────────────────────────

struct SimConfig {
    runs: u32,
    seed: u64,
    class: HeroClass,
    max_steps: u32,
    quiet: bool,
}

fn parse_args(game: &GameConfig) -> Result<SimConfig, String> {
    let args: Vec<String> = std::env::args().collect();
    let mut config = SimConfig {
        runs: 10,
        seed: game.seed.unwrap_or(42),
        class: HeroClass::Warrior,
        max_steps: 5000,
        quiet: false,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--runs" => config.runs = number_arg(&args, &mut i)?,
            "--seed" => config.seed = number_arg(&args, &mut i)?,
            "--max-steps" => config.max_steps = number_arg(&args, &mut i)?,
            "--class" => {
                i += 1;
                let wanted = args.get(i).ok_or("--class requires a name")?;
                config.class = HeroClass::from_name(wanted)
                    .ok_or_else(|| format!("unknown class: {wanted}"))?;
            }
            "--quiet" => config.quiet = true,
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            other => return Err(format!("Unknown argument: {other}")),
        }
        i += 1;
    }
    Ok(config)
}

fn number_arg<T: std::str::FromStr>(args: &[String], i: &mut usize) -> Result<T, String> {
    let flag = &args[*i];
    *i += 1;
    args.get(*i)
        .and_then(|v| v.parse().ok())
        .ok_or_else(|| format!("{flag} requires a number"))
}

fn print_usage() {
    eprintln!(
        "Dungeon Raid Headless Simulator\n\
         \n\
         Usage: simulator [OPTIONS]\n\
         \n\
         Options:\n\
         \x20 --runs N        Number of runs with incrementing seeds (default: 10)\n\
         \x20 --seed N        First RNG seed (default: DXR_SEED or 42)\n\
         \x20 --class NAME    Warrior, Mage, Rogue or Monk (default: Warrior)\n\
         \x20 --max-steps N   Actions per run before giving up (default: 5000)\n\
         \x20 --quiet         Only the final summary line\n\
         \x20 --help, -h      Show this help"
    );
}

// ── Simulation ───────────────────────────────────────────────────────

#[derive(Debug, Default, Clone)]
struct RunStats {
    survived: bool,
    boss_killed: bool,
    gold: u32,
    chests: u32,
    steps: u32,
    kills: u32,
}

/// Next move toward the closest enemy or chest, by path length.
fn next_move<R: Rng>(run: &Run<R>) -> Option<Direction> {
    let map = run.map();
    let from = run.hero_pos();
    let targets = run
        .enemies()
        .iter()
        .map(|e| e.pos)
        .chain(map.positions_of(Tile::Chest));

    let first_step = targets
        .filter_map(|to| map.find_path(from, to))
        .filter(|path| !path.is_empty())
        .min_by_key(Vec::len)
        .map(|path| path[0])?;

    Direction::all()
        .into_iter()
        .find(|d| d.step(from) == Some(first_step))
}

/// Any open neighbour; used to pass time while the boss countdown runs.
fn wander<R: Rng>(run: &Run<R>, rng: &mut impl Rng) -> Option<Direction> {
    let from = run.hero_pos();
    let open: Vec<Direction> = Direction::all()
        .into_iter()
        .filter(|d| {
            d.step(from)
                .is_some_and(|(x, y)| run.map().is_walkable(x, y))
        })
        .collect();
    if open.is_empty() {
        None
    } else {
        Some(open[rng.gen_range(0..open.len())])
    }
}

fn simulate(config: &SimConfig, game: &GameConfig, seed: u64) -> RunStats {
    let mut hero = Character::new(format!("Sim{seed}"), config.class);
    let mut policy_rng = ChaCha8Rng::seed_from_u64(seed ^ 0x5EED);
    let mut run = Run::new(game, &mut hero, ChaCha8Rng::seed_from_u64(seed));
    let mut stats = RunStats::default();

    for _ in 0..config.max_steps {
        if run.ended().is_some() {
            break;
        }
        let action = if run.in_combat() {
            Action::Confirm
        } else if run.floor_cleared() {
            Action::Cancel
        } else if let Some(dir) = next_move(&run) {
            Action::Move(dir)
        } else if run.boss_countdown().is_some() {
            match wander(&run, &mut policy_rng) {
                Some(dir) => Action::Move(dir),
                None => Action::Cancel,
            }
        } else {
            Action::Cancel
        };

        for event in run.step(&mut hero, action) {
            match event {
                RunEvent::Combat(dungeon_raid::combat::CombatEvent::Victory { .. }) => {
                    stats.kills += 1
                }
                RunEvent::FloorCleared => stats.boss_killed = true,
                RunEvent::Ended(end) => stats.survived = end == RunEnd::Exit,
                _ => {}
            }
        }
    }
    if run.ended().is_none() {
        tracing::warn!(seed, steps = run.steps(), "step cap reached");
        stats.survived = !hero.is_defeated();
    }

    stats.gold = hero.gold;
    stats.chests = run.chests_opened();
    stats.steps = run.steps();
    stats
}

// ── Main ─────────────────────────────────────────────────────────────

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let game = GameConfig::from_env();
    let config = match parse_args(&game) {
        Ok(config) => config,
        Err(message) => {
            eprintln!("{message}");
            print_usage();
            std::process::exit(1);
        }
    };

    let mut all = Vec::with_capacity(config.runs as usize);
    for n in 0..config.runs {
        let seed = config.seed.wrapping_add(u64::from(n));
        let stats = simulate(&config, &game, seed);
        if !config.quiet {
            println!(
                "seed {:>6}  {:<5}  boss {:<3}  kills {:>3}  gold {:>5}  chests {:>2}  steps {:>5}",
                seed,
                if stats.survived { "WIN" } else { "LOSS" },
                if stats.boss_killed { "yes" } else { "no" },
                stats.kills,
                stats.gold,
                stats.chests,
                stats.steps
            );
        }
        all.push(stats);
    }

    if all.is_empty() {
        return;
    }
    let runs = all.len() as f64;
    let wins = all.iter().filter(|s| s.survived).count();
    let bosses = all.iter().filter(|s| s.boss_killed).count();
    let avg = |f: fn(&RunStats) -> u32| all.iter().map(|s| f(s) as f64).sum::<f64>() / runs;
    println!(
        "{} {}: {}/{} survived, {} bosses, avg gold {:.1}, avg chests {:.1}, avg steps {:.1}",
        all.len(),
        config.class.name(),
        wins,
        all.len(),
        bosses,
        avg(|s| s.gold),
        avg(|s| s.chests),
        avg(|s| s.steps)
    );
}

mod ui;

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use dungeon_raid::character::save::{SaveManager, SessionStore};
use dungeon_raid::character::{Character, MetaStore};
use dungeon_raid::core::{GameConfig, GameSession, Run, RunEnd};
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::fs::File;
use std::io::{self, Stdout};
use std::path::Path;
use std::sync::Mutex;
use ui::character_creation::CharacterCreationScreen;
use ui::character_select::CharacterSelectScreen;
use ui::meta_shop::MetaShopScreen;
use ui::run_scene::draw_run;

enum Screen {
    CharacterSelect,
    CharacterCreation,
    MetaShop,
    Game(GameSession),
}

fn main() -> io::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() > 1 {
        match args[1].as_str() {
            "--version" | "-v" => {
                println!("dungeon-raid {}", env!("CARGO_PKG_VERSION"));
                return Ok(());
            }
            "--help" | "-h" => {
                println!("Dungeon Raid - turn-based terminal dungeon crawler\n");
                println!("Usage: dungeon-raid\n");
                println!("Environment:");
                println!("  DXR_MAP_WIDTH, DXR_MAP_HEIGHT  floor size (default 80x28)");
                println!("  DXR_SEED                       fixed run seed");
                println!("  DXR_ENCOUNTER_PERCENT          random encounter chance per step");
                println!("  DXR_BOSS_COUNTDOWN             steps until the boss appears");
                println!("  DXR_SAVE_DIR                   save directory");
                println!("  RUST_LOG                       log filter (default info)");
                return Ok(());
            }
            other => {
                eprintln!("Unknown argument: {other}");
                eprintln!("Run 'dungeon-raid --help' for usage.");
                std::process::exit(1);
            }
        }
    }

    let config = GameConfig::from_env();
    let save_manager = match &config.save_dir {
        Some(dir) => SaveManager::with_dir(dir),
        None => SaveManager::new(),
    }
    .map_err(io::Error::other)?;
    let data_dir = save_manager
        .save_dir()
        .parent()
        .unwrap_or(save_manager.save_dir())
        .to_path_buf();
    init_logging(&data_dir)?;
    let meta_store = MetaStore::new(&data_dir);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let result = run_app(&mut terminal, &config, &save_manager, &meta_store);

    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    result
}

/// Logs go to a file so they never corrupt the alternate screen.
fn init_logging(data_dir: &Path) -> io::Result<()> {
    std::fs::create_dir_all(data_dir)?;
    let log_file = File::create(data_dir.join("dungeon-raid.log"))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(log_file))
        .with_ansi(false)
        .init();
    tracing::info!(dir = %data_dir.display(), "logging initialized");
    Ok(())
}

/// Blocks until the next key press.
fn next_key() -> io::Result<KeyCode> {
    loop {
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                return Ok(key.code);
            }
        }
    }
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    config: &GameConfig,
    save_manager: &SaveManager,
    meta_store: &MetaStore,
) -> io::Result<()> {
    let mut select_screen = CharacterSelectScreen::new();
    let mut creation_screen = CharacterCreationScreen::new();
    let mut shop_screen = MetaShopScreen::new();

    let mut current_screen = if save_manager.list_saves().map_err(io::Error::other)?.is_empty() {
        Screen::CharacterCreation
    } else {
        Screen::CharacterSelect
    };

    loop {
        current_screen = match current_screen {
            Screen::CharacterCreation => {
                terminal.draw(|f| {
                    let area = f.size();
                    creation_screen.draw(f, area);
                })?;

                match next_key()? {
                    KeyCode::Char(c) => {
                        creation_screen.handle_char_input(c);
                        Screen::CharacterCreation
                    }
                    KeyCode::Backspace => {
                        creation_screen.handle_backspace();
                        Screen::CharacterCreation
                    }
                    KeyCode::Tab => {
                        creation_screen.next_class();
                        Screen::CharacterCreation
                    }
                    KeyCode::Enter if creation_screen.is_valid() => {
                        match create_hero(&creation_screen, save_manager, meta_store) {
                            Ok(()) => {
                                creation_screen = CharacterCreationScreen::new();
                                select_screen = CharacterSelectScreen::new();
                                Screen::CharacterSelect
                            }
                            Err(message) => {
                                creation_screen.validation_error = Some(message);
                                Screen::CharacterCreation
                            }
                        }
                    }
                    KeyCode::Esc => {
                        creation_screen = CharacterCreationScreen::new();
                        Screen::CharacterSelect
                    }
                    _ => Screen::CharacterCreation,
                }
            }

            Screen::CharacterSelect => {
                let saves = save_manager.list_saves().map_err(io::Error::other)?;
                if saves.is_empty() {
                    current_screen = Screen::CharacterCreation;
                    continue;
                }
                select_screen.clamp(saves.len());
                terminal.draw(|f| {
                    let area = f.size();
                    select_screen.draw(f, area, &saves);
                })?;

                let selected = saves.get(select_screen.selected_index);
                match next_key()? {
                    KeyCode::Up => {
                        select_screen.move_up();
                        Screen::CharacterSelect
                    }
                    KeyCode::Down => {
                        select_screen.move_down(saves.len());
                        Screen::CharacterSelect
                    }
                    KeyCode::Enter => match selected.and_then(|info| save_manager.load(&info.save_name)) {
                        Some(session) => Screen::Game(session),
                        None => {
                            select_screen.status = Some("Could not load that hero".to_string());
                            Screen::CharacterSelect
                        }
                    },
                    KeyCode::Char('n') | KeyCode::Char('N') => Screen::CharacterCreation,
                    KeyCode::Char('d') | KeyCode::Char('D') => {
                        if let Some(info) = selected {
                            select_screen.status = Some(match save_manager.delete(&info.save_name) {
                                Ok(_) => format!("Deleted {}", info.save_name),
                                Err(e) => format!("Delete failed: {e}"),
                            });
                        }
                        Screen::CharacterSelect
                    }
                    KeyCode::Char('m') | KeyCode::Char('M') => {
                        shop_screen = MetaShopScreen::new();
                        Screen::MetaShop
                    }
                    KeyCode::Char('q') | KeyCode::Char('Q') => break,
                    _ => Screen::CharacterSelect,
                }
            }

            Screen::MetaShop => {
                let mut progress = meta_store.load();
                let saves = save_manager.list_saves().map_err(io::Error::other)?;
                let selected = saves
                    .get(select_screen.selected_index)
                    .and_then(|info| save_manager.load(&info.save_name));
                terminal.draw(|f| {
                    let area = f.size();
                    shop_screen.draw(f, area, &progress, selected.as_ref().map(|s| s.hero.gold));
                })?;

                match next_key()? {
                    KeyCode::Up => shop_screen.move_up(),
                    KeyCode::Down => shop_screen.move_down(),
                    KeyCode::Enter => {
                        if shop_screen.purchase(&mut progress) {
                            meta_store.save(&progress).map_err(io::Error::other)?;
                        }
                    }
                    KeyCode::Char('b') | KeyCode::Char('B') => {
                        if let Some(mut session) = selected {
                            let gold = std::mem::take(&mut session.hero.gold);
                            progress.deposit(gold);
                            meta_store.save(&progress).map_err(io::Error::other)?;
                            save_manager.save(&session).map_err(io::Error::other)?;
                            shop_screen.status = Some(format!("Banked {gold} gold"));
                        }
                    }
                    KeyCode::Esc => {
                        current_screen = Screen::CharacterSelect;
                        continue;
                    }
                    _ => {}
                }
                Screen::MetaShop
            }

            Screen::Game(mut session) => {
                let (end, saved) = session
                    .play_and_finish(save_manager, |s| play_run(terminal, config, s))?;
                let name = session.hero.name.clone();
                select_screen.status = Some(match saved {
                    Ok(()) => match end {
                        RunEnd::Exit => format!("{name} left the dungeon. Progress saved."),
                        RunEnd::HeroDied => format!("{name} was slain. Progress saved."),
                    },
                    Err(e) => {
                        tracing::error!(error = %e, "saving after run failed");
                        format!("Save failed: {e}")
                    }
                });
                Screen::CharacterSelect
            }
        };
    }

    Ok(())
}

/// Creates and saves a hero with the purchased meta upgrades applied.
fn create_hero(
    screen: &CharacterCreationScreen,
    save_manager: &SaveManager,
    meta_store: &MetaStore,
) -> Result<(), String> {
    let name = screen.get_name();
    if save_manager.load(&name).is_some() {
        return Err("A hero with that name already exists".to_string());
    }
    let mut hero = Character::new(name, screen.get_class());
    meta_store.load().apply_to(&mut hero);
    let session = GameSession::new(hero);
    save_manager
        .save(&session)
        .map_err(|e| format!("Save failed: {e}"))?;
    tracing::info!(save = %session.save_name, class = session.hero.class.name(), "hero created");
    Ok(())
}

fn play_run(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    config: &GameConfig,
    session: &mut GameSession,
) -> io::Result<RunEnd> {
    let rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut run = Run::new(config, &mut session.hero, rng);

    loop {
        terminal.draw(|f| {
            let view = run.view(&session.hero);
            draw_run(f, &view);
        })?;

        if let Some(end) = run.ended() {
            return Ok(end);
        }
        if let Some(action) = ui::key_to_action(next_key()?) {
            run.step(&mut session.hero, action);
        }
    }
}

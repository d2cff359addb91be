//! JSON save files, one per session, keyed by the sanitized save name.

use crate::core::constants::MAX_NAME_LENGTH;
use crate::core::game_state::GameSession;
use chrono::{DateTime, Utc};
use directories::ProjectDirs;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("could not determine the data directory")]
    NoDataDir,

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid save name: {0}")]
    InvalidName(String),
}

pub type Result<T> = std::result::Result<T, SaveError>;

/// Persistence seam used by the run orchestrator.
pub trait SessionStore {
    fn save(&self, session: &GameSession) -> Result<()>;

    /// Returns `None` for missing or unreadable records instead of failing.
    fn load(&self, save_name: &str) -> Option<GameSession>;
}

/// Summary row for save menus.
#[derive(Debug, Clone, PartialEq)]
pub struct SaveInfo {
    pub save_name: String,
    pub filename: String,
    pub hero_name: String,
    pub class_name: &'static str,
    pub level: u32,
    pub last_played: DateTime<Utc>,
}

impl SaveInfo {
    pub fn display(&self) -> String {
        format!(
            "{}  -  {}  -  {}",
            self.save_name,
            self.class_name,
            self.last_played.format("%Y-%m-%d %H:%M")
        )
    }
}

pub struct SaveManager {
    save_dir: PathBuf,
}

impl SaveManager {
    /// Uses `<platform data dir>/saves`.
    pub fn new() -> Result<Self> {
        let project_dirs =
            ProjectDirs::from("", "", "dungeon-raid").ok_or(SaveError::NoDataDir)?;
        Self::with_dir(project_dirs.data_dir().join("saves"))
    }

    pub fn with_dir(save_dir: impl Into<PathBuf>) -> Result<Self> {
        let save_dir = save_dir.into();
        fs::create_dir_all(&save_dir)?;
        Ok(Self { save_dir })
    }

    pub fn save_dir(&self) -> &Path {
        &self.save_dir
    }

    fn path_for(&self, save_name: &str) -> Result<PathBuf> {
        let stem = sanitize_name(save_name);
        if stem.is_empty() {
            return Err(SaveError::InvalidName(save_name.to_string()));
        }
        Ok(self.save_dir.join(format!("{stem}.json")))
    }

    fn read_file(path: &Path) -> Option<GameSession> {
        let json = fs::read_to_string(path).ok()?;
        match serde_json::from_str::<GameSession>(&json) {
            Ok(mut session) => {
                session.hero.normalize();
                Some(session)
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "skipping corrupt save");
                None
            }
        }
    }

    /// Lists readable saves, most recently played first. Corrupt files are skipped.
    pub fn list_saves(&self) -> Result<Vec<SaveInfo>> {
        let mut saves = Vec::new();
        for entry in fs::read_dir(&self.save_dir)? {
            let path = entry?.path();
            if path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }
            let Some(session) = Self::read_file(&path) else {
                continue;
            };
            saves.push(SaveInfo {
                filename: path
                    .file_name()
                    .and_then(|s| s.to_str())
                    .unwrap_or("")
                    .to_string(),
                save_name: session.save_name,
                hero_name: session.hero.name.clone(),
                class_name: session.hero.class.name(),
                level: session.hero.level,
                last_played: session.last_played,
            });
        }
        saves.sort_by(|a, b| b.last_played.cmp(&a.last_played));
        Ok(saves)
    }

    /// Removes a save. Returns false when there was nothing to delete.
    pub fn delete(&self, save_name: &str) -> Result<bool> {
        let path = self.path_for(save_name)?;
        if !path.exists() {
            return Ok(false);
        }
        fs::remove_file(path)?;
        tracing::info!(save = save_name, "save deleted");
        Ok(true)
    }

    /// Most recently played save, or a fresh default Warrior session.
    pub fn load_last_or_default(&self) -> GameSession {
        let newest = self
            .list_saves()
            .ok()
            .and_then(|saves| saves.into_iter().next())
            .and_then(|info| self.load(&info.save_name));
        newest.unwrap_or_else(|| {
            tracing::info!("no save available, creating default session");
            GameSession::default_session()
        })
    }
}

impl SessionStore for SaveManager {
    fn save(&self, session: &GameSession) -> Result<()> {
        let path = self.path_for(&session.save_name)?;
        let json = serde_json::to_string_pretty(session)?;
        fs::write(path, json)?;
        Ok(())
    }

    fn load(&self, save_name: &str) -> Option<GameSession> {
        let path = self.path_for(save_name).ok()?;
        let session = Self::read_file(&path)?;
        tracing::info!(save = save_name, "session loaded");
        Some(session)
    }
}

pub fn validate_name(name: &str) -> std::result::Result<(), String> {
    let trimmed = name.trim();

    if trimmed.is_empty() {
        return Err("Name cannot be empty".to_string());
    }

    if trimmed.chars().count() > MAX_NAME_LENGTH {
        return Err(format!("Name must be {MAX_NAME_LENGTH} characters or less"));
    }

    let valid_chars = trimmed
        .chars()
        .all(|c| c.is_alphanumeric() || c == ' ' || c == '-' || c == '_');

    if !valid_chars {
        return Err(
            "Name can only contain letters, numbers, spaces, hyphens, and underscores".to_string(),
        );
    }

    Ok(())
}

pub fn sanitize_name(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .replace(' ', "_")
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || *c == '-')
        .collect()
}

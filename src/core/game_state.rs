use crate::character::class::HeroClass;
use crate::character::hero::Character;
use crate::character::save::{self, SessionStore};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One save record: a hero plus bookkeeping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSession {
    pub id: String,
    pub save_name: String,
    pub hero: Character,
    pub created: DateTime<Utc>,
    pub last_played: DateTime<Utc>,
}

impl GameSession {
    /// Wraps a freshly created hero; the save name defaults to the hero's name.
    pub fn new(hero: Character) -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().simple().to_string(),
            save_name: hero.name.clone(),
            hero,
            created: now,
            last_played: now,
        }
    }

    /// Session used when no save can be loaded.
    pub fn default_session() -> Self {
        Self::new(Character::new(
            crate::core::constants::DEFAULT_HERO_NAME,
            HeroClass::Warrior,
        ))
    }

    pub fn touch(&mut self) {
        self.last_played = Utc::now();
    }

    /// Stamps the session and hands it to the store. Called whenever a run
    /// ends, whether by exit or by the hero's death.
    pub fn finish_run(&mut self, store: &impl SessionStore) -> save::Result<()> {
        self.touch();
        store.save(self)?;
        tracing::info!(save = %self.save_name, gold = self.hero.gold, "session saved");
        Ok(())
    }

    /// Plays a run through `play` and saves afterwards even when `play`
    /// fails. On failure the save result is only logged and `play`'s error
    /// is returned; on success the caller gets both results.
    pub fn play_and_finish<T, E>(
        &mut self,
        store: &impl SessionStore,
        play: impl FnOnce(&mut Self) -> std::result::Result<T, E>,
    ) -> std::result::Result<(T, save::Result<()>), E> {
        match play(self) {
            Ok(end) => Ok((end, self.finish_run(store))),
            Err(e) => {
                if let Err(save_err) = self.finish_run(store) {
                    tracing::error!(save = %self.save_name, error = %save_err, "saving after a failed run");
                }
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct RecordingStore {
        saved: RefCell<Vec<GameSession>>,
    }

    impl SessionStore for RecordingStore {
        fn save(&self, session: &GameSession) -> save::Result<()> {
            self.saved.borrow_mut().push(session.clone());
            Ok(())
        }

        fn load(&self, save_name: &str) -> Option<GameSession> {
            self.saved
                .borrow()
                .iter()
                .rev()
                .find(|s| s.save_name == save_name)
                .cloned()
        }
    }

    #[test]
    fn test_failed_run_still_saves_progress() {
        let store = RecordingStore::default();
        let mut session = GameSession::new(Character::new("Ayla", HeroClass::Monk));

        let result: std::result::Result<((), save::Result<()>), &str> =
            session.play_and_finish(&store, |s| {
                s.hero.gold = 42;
                s.hero.take_damage(5);
                Err("terminal went away")
            });

        assert_eq!(result.err(), Some("terminal went away"));
        let saved = store.load("Ayla").expect("session saved");
        assert_eq!(saved.hero.gold, 42);
        assert_eq!(saved.hero.hp(), session.hero.hp());
    }

    #[test]
    fn test_successful_run_reports_save_result() {
        let store = RecordingStore::default();
        let mut session = GameSession::default_session();

        let (end, saved) = session
            .play_and_finish(&store, |s| {
                s.hero.gold = 7;
                Ok::<_, String>("exit")
            })
            .expect("run ok");

        assert_eq!(end, "exit");
        assert!(saved.is_ok());
        assert_eq!(store.saved.borrow().len(), 1);
        assert_eq!(store.saved.borrow()[0].hero.gold, 7);
    }

    #[test]
    fn test_new_session_uses_hero_name() {
        let session = GameSession::new(Character::new("Ayla", HeroClass::Monk));
        assert_eq!(session.save_name, "Ayla");
        assert_eq!(session.id.len(), 32);
        assert!(session.last_played >= session.created);
    }

    #[test]
    fn test_default_session_is_warrior() {
        let session = GameSession::default_session();
        assert_eq!(session.hero.class, HeroClass::Warrior);
        assert_eq!(session.hero.hp(), 35);
    }

    #[test]
    fn test_sessions_get_unique_ids() {
        let a = GameSession::default_session();
        let b = GameSession::default_session();
        assert_ne!(a.id, b.id);
    }
}

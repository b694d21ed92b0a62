use std::cell::Cell;

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::backend::{KeyValueBackend, MemoryBackend};
use super::error::{Result, StorageError};
use super::records::{HighScore, ModeProgress, Settings};
use crate::catalog::CATALOG_SIZE;
use crate::config::{
    HIGH_SCORE_CAP, KEY_HIGH_SCORES, KEY_PROGRESS_PREFIX, KEY_SCHEMA_VERSION, KEY_SETTINGS,
    STORAGE_SCHEMA_VERSION,
};
use crate::model::GameMode;
use crate::util::now_ms;

/// Whole-record access to saved game data.
///
/// Every read and write fails with [`StorageError::NotReady`] until
/// [`GameStorage::initialize`] has succeeded once.
pub struct GameStorage {
    backend: Box<dyn KeyValueBackend>,
    ready: Cell<bool>,
}

impl GameStorage {
    pub fn new(backend: impl KeyValueBackend + 'static) -> Self {
        Self {
            backend: Box::new(backend),
            ready: Cell::new(false),
        }
    }

    /// Initialized in-memory store, used when the browser refuses storage.
    pub fn in_memory() -> Self {
        let storage = Self::new(MemoryBackend::new());
        storage.ready.set(true);
        storage
    }

    /// Idempotent. Stamps the schema version on first use.
    pub fn initialize(&self) -> Result<()> {
        if self.ready.get() {
            return Ok(());
        }
        let stored = self
            .backend
            .get(KEY_SCHEMA_VERSION)?
            .and_then(|v| v.parse::<u32>().ok());
        if stored != Some(STORAGE_SCHEMA_VERSION) {
            self.backend
                .set(KEY_SCHEMA_VERSION, &STORAGE_SCHEMA_VERSION.to_string())?;
        }
        self.ready.set(true);
        Ok(())
    }

    /// `initialize` with a bounded number of attempts; returns the last error.
    pub fn initialize_with_retry(&self, attempts: u32) -> Result<()> {
        let mut last = StorageError::NotReady;
        for _ in 0..attempts.max(1) {
            match self.initialize() {
                Ok(()) => return Ok(()),
                Err(e) => last = e,
            }
        }
        Err(last)
    }

    #[cfg(test)]
    pub fn is_ready(&self) -> bool {
        self.ready.get()
    }

    fn ensure_ready(&self) -> Result<()> {
        if self.ready.get() {
            Ok(())
        } else {
            Err(StorageError::NotReady)
        }
    }

    fn read<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        self.ensure_ready()?;
        match self.backend.get(key)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    fn write<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        self.ensure_ready()?;
        let raw = serde_json::to_string(value)?;
        self.backend.set(key, &raw)
    }

    fn progress_key(mode: GameMode) -> String {
        format!("{}{}", KEY_PROGRESS_PREFIX, mode.key())
    }

    pub fn get_progress(&self, mode: GameMode) -> Result<Option<ModeProgress>> {
        self.read(&Self::progress_key(mode))
    }

    pub fn put_progress(&self, progress: &ModeProgress) -> Result<()> {
        let stamped = ModeProgress {
            last_played: now_ms(),
            ..progress.clone()
        };
        self.write(&Self::progress_key(progress.mode), &stamped)
    }

    pub fn get_settings(&self) -> Result<Option<Settings>> {
        self.read(KEY_SETTINGS)
    }

    pub fn put_settings(&self, settings: &Settings) -> Result<()> {
        self.write(KEY_SETTINGS, settings)
    }

    /// Best scores for a mode, highest first.
    pub fn high_scores(&self, mode: GameMode) -> Result<Vec<HighScore>> {
        let all: Vec<HighScore> = self.read(KEY_HIGH_SCORES)?.unwrap_or_default();
        Ok(all.into_iter().filter(|h| h.mode == mode).collect())
    }

    /// Insert a finished game's score. Returns its rank within the mode, or
    /// `None` when it did not make the cut.
    pub fn record_high_score(&self, entry: HighScore) -> Result<Option<usize>> {
        let mut all: Vec<HighScore> = self.read(KEY_HIGH_SCORES)?.unwrap_or_default();
        let entry = HighScore {
            recorded_at: now_ms(),
            ..entry
        };
        let mode = entry.mode;
        all.push(entry.clone());
        // stable: equal scores keep the older entry first
        all.sort_by(|a, b| b.score.cmp(&a.score));
        let mut kept = 0usize;
        all.retain(|h| {
            if h.mode != mode {
                return true;
            }
            kept += 1;
            kept <= HIGH_SCORE_CAP
        });
        self.write(KEY_HIGH_SCORES, &all)?;
        Ok(all.iter().filter(|h| h.mode == mode).position(|h| *h == entry))
    }

    /// Share of the catalog completed in a mode, 0..=100.
    pub fn completion_percentage(&self, mode: GameMode) -> Result<u32> {
        Ok(self
            .get_progress(mode)?
            .map(|p| (p.completed.len().min(CATALOG_SIZE) * 100 / CATALOG_SIZE) as u32)
            .unwrap_or(0))
    }

    /// Wipe progress, settings and scores. The store stays initialized.
    pub fn clear_all(&self) -> Result<()> {
        self.ensure_ready()?;
        for mode in GameMode::ALL {
            self.backend.remove(&Self::progress_key(mode))?;
        }
        self.backend.remove(KEY_SETTINGS)?;
        self.backend.remove(KEY_HIGH_SCORES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TimerMode;
    use crate::storage::TimerPreferences;

    fn ready(backend: &MemoryBackend) -> GameStorage {
        let storage = GameStorage::new(backend.clone());
        storage.initialize().unwrap();
        storage
    }

    /// Backend whose every call fails.
    struct Broken;

    impl KeyValueBackend for Broken {
        fn get(&self, _key: &str) -> Result<Option<String>> {
            Err(StorageError::Backend("denied".into()))
        }
        fn set(&self, _key: &str, _value: &str) -> Result<()> {
            Err(StorageError::Backend("denied".into()))
        }
        fn remove(&self, _key: &str) -> Result<()> {
            Err(StorageError::Backend("denied".into()))
        }
    }

    #[test]
    fn reads_before_initialize_are_not_ready() {
        let storage = GameStorage::new(MemoryBackend::new());
        let err = storage.get_progress(GameMode::Easy).unwrap_err();
        assert!(err.is_not_ready());
        assert!(storage.get_settings().unwrap_err().is_not_ready());
        assert!(storage.put_settings(&Settings::default()).unwrap_err().is_not_ready());
    }

    #[test]
    fn initialize_is_idempotent() {
        let backend = MemoryBackend::new();
        let storage = ready(&backend);
        storage.initialize().unwrap();
        assert!(storage.is_ready());
        assert_eq!(
            backend.get(KEY_SCHEMA_VERSION).unwrap().as_deref(),
            Some("1")
        );
    }

    #[test]
    fn empty_store_returns_none() {
        let storage = ready(&MemoryBackend::new());
        assert_eq!(storage.get_progress(GameMode::Hard).unwrap(), None);
        assert_eq!(storage.get_settings().unwrap(), None);
        assert!(storage.high_scores(GameMode::Easy).unwrap().is_empty());
        assert_eq!(storage.completion_percentage(GameMode::Easy).unwrap(), 0);
    }

    #[test]
    fn progress_round_trips_per_mode() {
        let storage = ready(&MemoryBackend::new());
        let easy = ModeProgress::new(
            GameMode::Easy,
            vec!["Texas".into(), "Utah".into()],
            TimerMode::Countdown,
            Some(120),
        );
        let hard = ModeProgress::new(GameMode::Hard, vec![], TimerMode::None, None);
        storage.put_progress(&easy).unwrap();
        storage.put_progress(&hard).unwrap();

        let loaded = storage.get_progress(GameMode::Easy).unwrap().unwrap();
        assert!(loaded.same_progress(&easy));
        assert!(loaded.last_played > 0.0);
        let loaded = storage.get_progress(GameMode::Hard).unwrap().unwrap();
        assert!(loaded.same_progress(&hard));
    }

    #[test]
    fn last_write_wins() {
        let storage = ready(&MemoryBackend::new());
        let first = ModeProgress::new(GameMode::Easy, vec!["Ohio".into()], TimerMode::None, None);
        let second = ModeProgress::new(GameMode::Easy, vec![], TimerMode::Stopwatch, None);
        storage.put_progress(&first).unwrap();
        storage.put_progress(&second).unwrap();
        let loaded = storage.get_progress(GameMode::Easy).unwrap().unwrap();
        assert!(loaded.same_progress(&second));
    }

    #[test]
    fn settings_tolerate_missing_fields() {
        let backend = MemoryBackend::new();
        let storage = ready(&backend);
        backend
            .set(KEY_SETTINGS, r#"{"last_game_mode":"hard"}"#)
            .unwrap();
        let settings = storage.get_settings().unwrap().unwrap();
        assert_eq!(settings.last_game_mode, GameMode::Hard);
        assert_eq!(settings.timer_preferences, TimerPreferences::default());
        assert!(!settings.dark_mode);
    }

    #[test]
    fn corrupt_records_surface_as_serialization_errors() {
        let backend = MemoryBackend::new();
        let storage = ready(&backend);
        backend.set("usq_progress_easy", "{not json").unwrap();
        assert!(matches!(
            storage.get_progress(GameMode::Easy),
            Err(StorageError::Serialization(_))
        ));
    }

    #[test]
    fn high_scores_are_ranked_and_capped_per_mode() {
        let storage = ready(&MemoryBackend::new());
        let score = |mode, score| HighScore {
            mode,
            score,
            timer_mode: TimerMode::None,
            recorded_at: 0.0,
        };
        storage.record_high_score(score(GameMode::Hard, 999)).unwrap();
        for s in 1..=HIGH_SCORE_CAP as u32 {
            storage.record_high_score(score(GameMode::Easy, s * 10)).unwrap();
        }
        assert_eq!(storage.record_high_score(score(GameMode::Easy, 5)).unwrap(), None);
        assert_eq!(
            storage.record_high_score(score(GameMode::Easy, 1000)).unwrap(),
            Some(0)
        );
        let easy = storage.high_scores(GameMode::Easy).unwrap();
        assert_eq!(easy.len(), HIGH_SCORE_CAP);
        assert_eq!(easy[0].score, 1000);
        assert_eq!(easy.last().map(|h| h.score), Some(20));
        assert_eq!(storage.high_scores(GameMode::Hard).unwrap().len(), 1);
    }

    #[test]
    fn completion_percentage_uses_catalog_size() {
        let storage = ready(&MemoryBackend::new());
        let names: Vec<String> = crate::catalog::REGIONS
            .iter()
            .take(17)
            .map(|r| r.name.to_string())
            .collect();
        storage
            .put_progress(&ModeProgress::new(GameMode::Easy, names, TimerMode::None, None))
            .unwrap();
        assert_eq!(storage.completion_percentage(GameMode::Easy).unwrap(), 33);
    }

    #[test]
    fn clear_all_keeps_store_usable() {
        let backend = MemoryBackend::new();
        let storage = ready(&backend);
        storage
            .put_progress(&ModeProgress::new(GameMode::Easy, vec!["Ohio".into()], TimerMode::None, None))
            .unwrap();
        storage.put_settings(&Settings::default()).unwrap();
        storage.clear_all().unwrap();
        assert_eq!(storage.get_progress(GameMode::Easy).unwrap(), None);
        assert_eq!(storage.get_settings().unwrap(), None);
        assert!(backend.get(KEY_SCHEMA_VERSION).unwrap().is_some());
        assert_eq!(backend.get(KEY_HIGH_SCORES).unwrap(), None);
        assert!(storage.is_ready());
    }

    #[test]
    fn failing_backend_never_becomes_ready() {
        let storage = GameStorage::new(Broken);
        assert!(matches!(
            storage.initialize_with_retry(3),
            Err(StorageError::Backend(_))
        ));
        assert!(!storage.is_ready());
    }
}

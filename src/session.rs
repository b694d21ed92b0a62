//! The live game session: one `GameState` plus the storage it writes through.
//!
//! `GameSession` is the `Reducible` behind the app, so every gesture and
//! every timer tick is applied one at a time through `dispatch`. Storage
//! failures are logged and never undo in-memory play.

use std::rc::Rc;

use yew::Reducible;

use crate::model::{GameEvent, GameMode, GameState, Greeting, Status, TimerMode};
use crate::storage::{
    GameStorage, HighScore, LocalStorageBackend, ModeProgress, Settings, StorageError,
};
use crate::util::{clog, cwarn};

const INIT_ATTEMPTS: u32 = 3;

#[derive(Clone, Debug, PartialEq)]
pub enum SessionAction {
    Game(GameEvent),
    SetDarkMode(bool),
    /// Wipe every saved record and start over in easy mode.
    ClearAllData,
    /// Write unsaved progress; sent on page hide and unmount.
    Flush,
}

#[derive(Clone)]
pub struct GameSession {
    pub game: GameState,
    pub settings: Settings,
    /// Bumped whenever the game is reseeded, so the ticker restarts cleanly.
    pub epoch: u32,
    /// False when play fell back to memory only.
    pub persistent: bool,
    pub best_score: Option<u32>,
    /// Saved completion of the mode not being played, read once per reseed.
    other_completion: u32,
    storage: Rc<GameStorage>,
    dirty: bool,
}

impl GameSession {
    /// Session backed by the browser's `localStorage`.
    pub fn open_browser() -> Self {
        match LocalStorageBackend::open() {
            Ok(backend) => Self::boot(GameStorage::new(backend)),
            Err(e) => Self::degraded(e),
        }
    }

    /// Initialize storage and resume the last played mode.
    pub fn boot(storage: GameStorage) -> Self {
        if let Err(e) = storage.initialize_with_retry(INIT_ATTEMPTS) {
            return Self::degraded(e);
        }
        clog("storage ready");
        let mut session = Self::with_storage(Rc::new(storage), true);
        let mode = session.settings.last_game_mode;
        session.game = session.seed(mode, Greeting::Resume);
        session.best_score = session.load_best(mode);
        session.other_completion = session.load_completion(mode.other());
        session
    }

    fn degraded(err: StorageError) -> Self {
        cwarn(&format!("storage unavailable, playing without saving: {}", err));
        let mut session = Self::with_storage(Rc::new(GameStorage::in_memory()), false);
        session.game.status =
            Status::info("Progress can't be saved in this browser. Playing without saving.");
        session
    }

    fn with_storage(storage: Rc<GameStorage>, persistent: bool) -> Self {
        let settings = match storage.get_settings() {
            Ok(s) => s.unwrap_or_default(),
            Err(e) => {
                Self::log_read_error("settings", &e);
                Settings::default()
            }
        };
        Self {
            game: GameState::new(settings.last_game_mode, TimerMode::None),
            settings,
            epoch: 0,
            persistent,
            best_score: None,
            other_completion: 0,
            storage,
            dirty: false,
        }
    }

    #[cfg(test)]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Share of the catalog done in a mode, 0..=100.
    pub fn mode_completion(&self, mode: GameMode) -> u32 {
        if mode == self.game.mode {
            self.game.completion_percent()
        } else {
            self.other_completion
        }
    }

    pub fn handle(&mut self, action: SessionAction) {
        match action {
            SessionAction::Game(GameEvent::SwitchMode(mode)) => self.switch_mode(mode),
            SessionAction::Game(GameEvent::SetTimerMode(mode)) => self.set_timer_mode(mode),
            SessionAction::Game(GameEvent::Reset) => self.reset(),
            SessionAction::Game(event) => self.play(event),
            SessionAction::SetDarkMode(on) => {
                self.settings.dark_mode = on;
                self.save_settings();
            }
            SessionAction::ClearAllData => self.clear_all(),
            SessionAction::Flush => {
                if self.dirty {
                    self.save_progress();
                }
            }
        }
    }

    fn play(&mut self, event: GameEvent) {
        let before = self.game.completed.len();
        let secs = self.game.timer.secs;
        self.game.apply(event);
        // a running countdown is progress too; flushed on page hide
        if self.game.timer.mode == TimerMode::Countdown && self.game.timer.secs != secs {
            self.dirty = true;
        }
        if self.game.completed.len() > before {
            self.dirty = true;
            self.save_progress();
            if self.game.is_complete() {
                self.record_completion();
            }
        }
    }

    fn switch_mode(&mut self, mode: GameMode) {
        if self.dirty || !self.game.completed.is_empty() {
            self.save_progress();
        }
        self.settings.last_game_mode = mode;
        self.save_settings();
        self.game = self.seed(mode, Greeting::Switched);
        self.best_score = self.load_best(mode);
        self.other_completion = self.load_completion(mode.other());
        self.epoch = self.epoch.wrapping_add(1);
        clog(&format!("switched to {} mode", mode.key()));
    }

    fn set_timer_mode(&mut self, timer: TimerMode) {
        self.game.apply(GameEvent::SetTimerMode(timer));
        self.settings.timer_preferences.set(self.game.mode, timer);
        self.save_settings();
        self.epoch = self.epoch.wrapping_add(1);
    }

    fn reset(&mut self) {
        self.game.apply(GameEvent::Reset);
        self.dirty = true;
        self.save_progress();
        self.epoch = self.epoch.wrapping_add(1);
    }

    fn clear_all(&mut self) {
        if let Err(e) = self.storage.clear_all() {
            cwarn(&format!("failed to clear saved data: {}", e));
        }
        self.settings = Settings::default();
        self.game = GameState::new(self.settings.last_game_mode, TimerMode::None);
        self.game.status = Status::info("All saved data cleared. Select a state to begin!");
        self.best_score = None;
        self.other_completion = 0;
        self.dirty = false;
        self.epoch = self.epoch.wrapping_add(1);
    }

    fn seed(&self, mode: GameMode, greeting: Greeting) -> GameState {
        let timer = self.settings.timer_preferences.get(mode);
        let saved = self.load_progress(mode);
        GameState::seeded(
            mode,
            timer,
            saved
                .as_ref()
                .map(|p| (p.completed.as_slice(), p.remaining_time)),
            greeting,
        )
    }

    fn load_progress(&self, mode: GameMode) -> Option<ModeProgress> {
        match self.storage.get_progress(mode) {
            Ok(p) => p,
            Err(e) => {
                Self::log_read_error("progress", &e);
                None
            }
        }
    }

    fn load_completion(&self, mode: GameMode) -> u32 {
        match self.storage.completion_percentage(mode) {
            Ok(p) => p,
            Err(e) => {
                Self::log_read_error("progress", &e);
                0
            }
        }
    }

    fn load_best(&self, mode: GameMode) -> Option<u32> {
        match self.storage.high_scores(mode) {
            Ok(scores) => scores.first().map(|h| h.score),
            Err(e) => {
                Self::log_read_error("high scores", &e);
                None
            }
        }
    }

    fn save_progress(&mut self) {
        match self.storage.put_progress(&ModeProgress::from_state(&self.game)) {
            Ok(()) => self.dirty = false,
            Err(e) => cwarn(&format!("failed to save progress: {}", e)),
        }
    }

    fn save_settings(&self) {
        if let Err(e) = self.storage.put_settings(&self.settings) {
            cwarn(&format!("failed to save settings: {}", e));
        }
    }

    fn record_completion(&mut self) {
        clog(&format!(
            "{} mode complete, score {}",
            self.game.mode.key(),
            self.game.score
        ));
        let entry = HighScore {
            mode: self.game.mode,
            score: self.game.score,
            timer_mode: self.game.timer.mode,
            recorded_at: 0.0,
        };
        if let Err(e) = self.storage.record_high_score(entry) {
            cwarn(&format!("failed to record high score: {}", e));
        }
        self.best_score = Some(self.best_score.unwrap_or(0).max(self.game.score));
    }

    fn log_read_error(what: &str, err: &StorageError) {
        // not-ready reads just mean nothing is saved yet
        if !err.is_not_ready() {
            cwarn(&format!("failed to load {}: {}", what, err));
        }
    }
}

impl Reducible for GameSession {
    type Action = SessionAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        if action == SessionAction::Game(GameEvent::Tick) && !self.game.timer.is_running() {
            return self;
        }
        let mut next = (*self).clone();
        next.handle(action);
        Rc::new(next)
    }
}

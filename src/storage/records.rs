use serde::{Deserialize, Serialize};

use crate::model::{GameMode, GameState, TimerMode};

/// Saved progress for one mode. One record per mode, last write wins.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModeProgress {
    pub mode: GameMode,
    pub completed: Vec<String>,
    pub timer_mode: TimerMode,
    #[serde(default)]
    pub remaining_time: Option<u32>,
    /// Stamped by the gateway on every write (ms since epoch).
    #[serde(default)]
    pub last_played: f64,
}

impl ModeProgress {
    pub fn new(
        mode: GameMode,
        completed: Vec<String>,
        timer_mode: TimerMode,
        remaining_time: Option<u32>,
    ) -> Self {
        Self {
            mode,
            completed,
            timer_mode,
            remaining_time,
            last_played: 0.0,
        }
    }

    pub fn from_state(state: &GameState) -> Self {
        let remaining = match state.timer.mode {
            TimerMode::Countdown => Some(state.timer.secs),
            _ => None,
        };
        Self::new(
            state.mode,
            state.completed.clone(),
            state.timer.mode,
            remaining,
        )
    }

    /// Equality ignoring the write timestamp.
    #[cfg(test)]
    pub fn same_progress(&self, other: &ModeProgress) -> bool {
        self.mode == other.mode
            && self.completed == other.completed
            && self.timer_mode == other.timer_mode
            && self.remaining_time == other.remaining_time
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimerPreferences {
    pub easy: TimerMode,
    pub hard: TimerMode,
}

impl TimerPreferences {
    pub fn get(&self, mode: GameMode) -> TimerMode {
        match mode {
            GameMode::Easy => self.easy,
            GameMode::Hard => self.hard,
        }
    }

    pub fn set(&mut self, mode: GameMode, timer: TimerMode) {
        match mode {
            GameMode::Easy => self.easy = timer,
            GameMode::Hard => self.hard = timer,
        }
    }
}

/// Singleton user settings. Missing fields load as defaults.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub last_game_mode: GameMode,
    pub timer_preferences: TimerPreferences,
    pub dark_mode: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HighScore {
    pub mode: GameMode,
    pub score: u32,
    pub timer_mode: TimerMode,
    #[serde(default)]
    pub recorded_at: f64,
}

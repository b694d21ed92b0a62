// Gameplay and storage constants.

/// Base points for every correct match.
pub const POINTS_PER_MATCH: u32 = 10;
/// Countdown bonus is `remaining_secs / BONUS_DIVISOR`.
pub const BONUS_DIVISOR: u32 = 10;
/// Starting budget for the countdown timer, in seconds.
pub const COUNTDOWN_SECS: u32 = 300;
/// Timer driver period.
pub const TICK_PERIOD_MS: i32 = 1000;
/// Best scores kept per mode.
pub const HIGH_SCORE_CAP: usize = 10;

pub const STORAGE_SCHEMA_VERSION: u32 = 1;
pub const KEY_SCHEMA_VERSION: &str = "usq_schema_version";
pub const KEY_SETTINGS: &str = "usq_settings";
pub const KEY_HIGH_SCORES: &str = "usq_high_scores";
/// Progress records live under `usq_progress_<mode>`.
pub const KEY_PROGRESS_PREFIX: &str = "usq_progress_";

//! Core data model and transition rules for the quiz.
//! `GameState::apply` is the reducer: total over `GameEvent`, never fails,
//! and performs no I/O. Persistence is layered on top by `session`.

use serde::{Deserialize, Serialize};

use crate::catalog::{self, CATALOG_SIZE, REGIONS};
use crate::config::{BONUS_DIVISOR, COUNTDOWN_SECS, POINTS_PER_MATCH};
use crate::util::format_time;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    #[default]
    Easy,
    Hard,
}

impl GameMode {
    pub const ALL: [GameMode; 2] = [GameMode::Easy, GameMode::Hard];

    pub fn key(self) -> &'static str {
        match self {
            GameMode::Easy => "easy",
            GameMode::Hard => "hard",
        }
    }

    pub fn other(self) -> GameMode {
        match self {
            GameMode::Easy => GameMode::Hard,
            GameMode::Hard => GameMode::Easy,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            GameMode::Easy => "Easy",
            GameMode::Hard => "Hard",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerMode {
    #[default]
    None,
    Countdown,
    Stopwatch,
}

impl TimerMode {
    /// Starting value of the clock when this mode is (re)selected.
    pub fn default_secs(self) -> u32 {
        match self {
            TimerMode::Countdown => COUNTDOWN_SECS,
            TimerMode::None | TimerMode::Stopwatch => 0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimerState {
    pub mode: TimerMode,
    /// Remaining seconds for a countdown, elapsed seconds for a stopwatch.
    pub secs: u32,
    /// Ticks only advance the clock while armed.
    pub armed: bool,
}

impl TimerState {
    pub fn new(mode: TimerMode) -> Self {
        Self {
            mode,
            secs: mode.default_secs(),
            armed: false,
        }
    }

    pub fn is_running(&self) -> bool {
        self.armed && self.mode != TimerMode::None
    }

    /// A countdown that has hit zero. Locks out further answers.
    pub fn is_expired(&self) -> bool {
        self.mode == TimerMode::Countdown && self.secs == 0
    }

    pub fn display(&self) -> String {
        format_time(self.secs)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenPos {
    pub x: i32,
    pub y: i32,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    pub from_list: Option<String>,
    pub from_map: Option<String>,
}

impl Selection {
    fn clear(&mut self) {
        self.from_list = None;
        self.from_map = None;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Status {
    pub message: String,
    pub severity: Severity,
}

impl Status {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Info,
        }
    }
    fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Success,
        }
    }
    fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Error,
        }
    }
}

/// How the map should paint a region.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Highlight {
    Default,
    Hovered,
    Selected,
    Completed,
    CompletedHovered,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameEvent {
    SelectFromList(String),
    SelectFromMap { region: String, pos: ScreenPos },
    /// Keystrokes into the hard-mode answer box.
    UpdateTypedInput(String),
    SubmitTypedAnswer(String),
    CloseTypedInput,
    SwitchMode(GameMode),
    SetTimerMode(TimerMode),
    Tick,
    Reset,
}

/// Which greeting a freshly seeded state shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Greeting {
    Resume,
    Switched,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    pub mode: GameMode,
    pub timer: TimerState,
    pub score: u32,
    /// Completion order, no duplicates, always a subset of the catalog.
    pub completed: Vec<String>,
    pub selection: Selection,
    pub status: Status,
    pub typed_input: String,
    /// Where the last map click landed; anchors the answer popup.
    pub last_click: Option<ScreenPos>,
}

impl GameState {
    pub fn new(mode: GameMode, timer_mode: TimerMode) -> Self {
        Self {
            mode,
            timer: TimerState::new(timer_mode),
            score: 0,
            completed: Vec::new(),
            selection: Selection::default(),
            status: Status::info("Select a state to begin!"),
            typed_input: String::new(),
            last_click: None,
        }
    }

    /// Seed a state from previously saved progress. Unknown or repeated
    /// names are dropped; a missing or spent countdown gets the full budget.
    pub fn seeded(
        mode: GameMode,
        timer_mode: TimerMode,
        saved: Option<(&[String], Option<u32>)>,
        greeting: Greeting,
    ) -> Self {
        let mut state = Self::new(mode, timer_mode);
        if let Some((names, remaining)) = saved {
            for name in names {
                if catalog::is_region(name) && !state.is_completed(name) {
                    state.completed.push(name.clone());
                }
            }
            if timer_mode == TimerMode::Countdown {
                if let Some(secs) = remaining.filter(|s| *s > 0) {
                    state.timer.secs = secs;
                }
            }
        }
        let done = state.completed.len();
        state.status = match (greeting, saved.is_some()) {
            (Greeting::Resume, true) => Status::info(format!(
                "Welcome back! You've completed {} states in {} mode.",
                done,
                mode.key()
            )),
            (Greeting::Switched, true) => Status::info(format!(
                "Switched to {} mode. You've completed {} states.",
                mode.key(),
                done
            )),
            (Greeting::Switched, false) => {
                Status::info(format!("Switched to {} mode. Good luck!", mode.key()))
            }
            _ => Status::info("Select a state to begin!"),
        };
        state
    }

    pub fn apply(&mut self, event: GameEvent) {
        use GameEvent::*;
        match event {
            SelectFromList(region) => self.select_from_list(region),
            SelectFromMap { region, pos } => self.select_from_map(region, pos),
            UpdateTypedInput(text) => {
                if self.mode == GameMode::Hard && self.selection.from_map.is_some() {
                    self.typed_input = text;
                }
            }
            SubmitTypedAnswer(text) => self.submit_typed_answer(&text),
            CloseTypedInput => {
                self.selection.from_map = None;
                self.typed_input.clear();
            }
            SwitchMode(mode) => *self = Self::seeded(mode, TimerMode::None, None, Greeting::Switched),
            SetTimerMode(mode) => {
                self.timer = TimerState::new(mode);
            }
            Tick => self.tick(),
            Reset => *self = Self::new(self.mode, self.timer.mode),
        }
    }

    fn select_from_list(&mut self, region: String) {
        if self.mode != GameMode::Easy || !self.accepts_selection(&region) {
            return;
        }
        self.arm_timer();
        match self.selection.from_map.clone() {
            Some(pending) if pending == region => self.correct_match(&region),
            Some(_) => self.incorrect_match(),
            None => self.selection.from_list = Some(region),
        }
    }

    fn select_from_map(&mut self, region: String, pos: ScreenPos) {
        if !self.accepts_selection(&region) {
            return;
        }
        self.last_click = Some(pos);
        self.arm_timer();
        match self.mode {
            GameMode::Easy => match self.selection.from_list.clone() {
                Some(pending) if pending == region => self.correct_match(&region),
                Some(_) => self.incorrect_match(),
                None => self.selection.from_map = Some(region),
            },
            GameMode::Hard => {
                if self.selection.from_map.as_deref() != Some(region.as_str()) {
                    self.typed_input.clear();
                }
                self.selection.from_map = Some(region);
            }
        }
    }

    fn submit_typed_answer(&mut self, text: &str) {
        if self.mode != GameMode::Hard || self.timer.is_expired() {
            return;
        }
        let Some(pending) = self.selection.from_map.clone() else {
            return;
        };
        self.arm_timer();
        if normalize(&pending) == normalize(text) {
            self.correct_match(&pending);
        } else {
            self.typed_input.clear();
            self.status = Status::error("Incorrect state name. Try again!");
        }
    }

    /// Award a match. Crediting an already completed region changes nothing.
    pub(crate) fn correct_match(&mut self, region: &str) {
        if self.is_completed(region) || !catalog::is_region(region) {
            return;
        }
        let points = self.points_for_match();
        self.score = self.score.saturating_add(points);
        self.completed.push(region.to_string());
        self.selection.clear();
        self.typed_input.clear();
        if self.is_complete() {
            self.timer.armed = false;
            self.status = Status::success(format!("Game Complete! Final Score: {}", self.score));
        } else {
            self.status = Status::success(format!("Correct! +{} points", points));
        }
    }

    fn incorrect_match(&mut self) {
        self.selection.clear();
        self.status = Status::error("Try again! Selections don't match.");
    }

    fn tick(&mut self) {
        if !self.timer.is_running() {
            return;
        }
        match self.timer.mode {
            TimerMode::Countdown => {
                self.timer.secs = self.timer.secs.saturating_sub(1);
                if self.timer.secs == 0 {
                    self.timer.armed = false;
                    self.status = Status::info("Time's up! Game Over");
                }
            }
            TimerMode::Stopwatch => self.timer.secs = self.timer.secs.saturating_add(1),
            TimerMode::None => {}
        }
    }

    fn arm_timer(&mut self) {
        if !self.timer.armed && self.timer.mode != TimerMode::None {
            self.timer.armed = true;
        }
    }

    fn accepts_selection(&self, region: &str) -> bool {
        catalog::is_region(region) && !self.is_completed(region) && !self.timer.is_expired()
    }

    pub fn points_for_match(&self) -> u32 {
        let bonus = match self.timer.mode {
            TimerMode::Countdown => self.timer.secs / BONUS_DIVISOR,
            _ => 0,
        };
        POINTS_PER_MATCH + bonus
    }

    pub fn is_completed(&self, region: &str) -> bool {
        self.completed.iter().any(|c| c == region)
    }

    pub fn is_complete(&self) -> bool {
        self.completed.len() == CATALOG_SIZE
    }

    pub fn is_time_up(&self) -> bool {
        self.timer.is_expired()
    }

    /// Regions still to find, in catalog order.
    pub fn remaining(&self) -> Vec<&'static str> {
        REGIONS
            .iter()
            .map(|r| r.name)
            .filter(|name| !self.is_completed(name))
            .collect()
    }

    pub fn completion_percent(&self) -> u32 {
        (self.completed.len() * 100 / CATALOG_SIZE) as u32
    }

    pub fn highlight(&self, region: &str, hovered: Option<&str>) -> Highlight {
        let completed = self.is_completed(region);
        let hovered = hovered == Some(region);
        let selected = self.selection.from_list.as_deref() == Some(region)
            || self.selection.from_map.as_deref() == Some(region);
        match (completed, hovered) {
            (false, _) if selected => Highlight::Selected,
            (true, true) => Highlight::CompletedHovered,
            (true, false) => Highlight::Completed,
            (false, true) => Highlight::Hovered,
            (false, false) => Highlight::Default,
        }
    }
}

fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn map_click(region: &str) -> GameEvent {
        GameEvent::SelectFromMap {
            region: region.to_string(),
            pos: ScreenPos { x: 10, y: 20 },
        }
    }

    fn hard_with_countdown(secs: u32) -> GameState {
        let mut s = GameState::new(GameMode::Hard, TimerMode::Countdown);
        s.timer.secs = secs;
        s
    }

    #[test]
    fn easy_list_then_map_scores_ten() {
        let mut s = GameState::new(GameMode::Easy, TimerMode::None);
        s.apply(GameEvent::SelectFromList("Texas".into()));
        assert_eq!(s.selection.from_list.as_deref(), Some("Texas"));
        assert_eq!(s.status.message, "Select a state to begin!");
        s.apply(map_click("Texas"));
        assert_eq!(s.completed, vec!["Texas".to_string()]);
        assert_eq!(s.score, 10);
        assert_eq!(s.status.severity, Severity::Success);
        assert_eq!(s.selection, Selection::default());
        assert_eq!(s.last_click, Some(ScreenPos { x: 10, y: 20 }));
    }

    #[test]
    fn easy_map_then_list_also_matches() {
        let mut s = GameState::new(GameMode::Easy, TimerMode::None);
        s.apply(map_click("Ohio"));
        s.apply(GameEvent::SelectFromList("Ohio".into()));
        assert_eq!(s.score, 10);
    }

    #[test]
    fn easy_mismatch_clears_both_selections() {
        let mut s = GameState::new(GameMode::Easy, TimerMode::None);
        s.apply(GameEvent::SelectFromList("Iowa".into()));
        s.apply(map_click("Idaho"));
        assert_eq!(s.selection, Selection::default());
        assert_eq!(s.status.severity, Severity::Error);
        assert!(s.completed.is_empty());
        assert_eq!(s.score, 0);
    }

    #[test]
    fn hard_typed_answer_gets_countdown_bonus() {
        let mut s = hard_with_countdown(53);
        s.apply(GameEvent::SelectFromMap {
            region: "Utah".into(),
            pos: ScreenPos { x: 0, y: 0 },
        });
        assert_eq!(s.score, 0);
        s.apply(GameEvent::SubmitTypedAnswer("utah".into()));
        assert_eq!(s.score, 15);
        assert!(s.is_completed("Utah"));
    }

    #[test]
    fn typed_answers_ignore_case_and_outer_whitespace() {
        let mut s = GameState::new(GameMode::Hard, TimerMode::None);
        s.apply(map_click("Ohio"));
        s.apply(GameEvent::SubmitTypedAnswer("  oHIo ".into()));
        assert!(s.is_completed("Ohio"));

        s.apply(map_click("New York"));
        s.apply(GameEvent::SubmitTypedAnswer("new  york".into()));
        assert!(!s.is_completed("New York"));
    }

    #[test]
    fn wrong_typed_answer_keeps_pending_region() {
        let mut s = GameState::new(GameMode::Hard, TimerMode::None);
        s.apply(map_click("Ohio"));
        s.apply(GameEvent::UpdateTypedInput("Ohioo".into()));
        assert_eq!(s.typed_input, "Ohioo");
        s.apply(GameEvent::SubmitTypedAnswer("Ohioo".into()));
        assert_eq!(s.selection.from_map.as_deref(), Some("Ohio"));
        assert!(s.typed_input.is_empty());
        assert_eq!(s.status.severity, Severity::Error);
        assert_eq!(s.score, 0);
    }

    #[test]
    fn close_clears_pending_without_scoring() {
        let mut s = GameState::new(GameMode::Hard, TimerMode::None);
        s.apply(map_click("Maine"));
        s.apply(GameEvent::UpdateTypedInput("Mai".into()));
        let status = s.status.clone();
        s.apply(GameEvent::CloseTypedInput);
        assert_eq!(s.selection.from_map, None);
        assert!(s.typed_input.is_empty());
        assert_eq!(s.status, status);
        assert_eq!(s.score, 0);
    }

    #[test]
    fn malformed_events_are_ignored() {
        let mut s = GameState::new(GameMode::Hard, TimerMode::Stopwatch);
        let before = s.clone();
        s.apply(GameEvent::SubmitTypedAnswer("Ohio".into()));
        s.apply(GameEvent::SelectFromList("Ohio".into()));
        s.apply(map_click("Atlantis"));
        s.apply(map_click("ohio"));
        s.apply(GameEvent::UpdateTypedInput("x".into()));
        assert_eq!(s, before);
    }

    #[test]
    fn crediting_a_completed_region_changes_nothing() {
        let mut s = GameState::new(GameMode::Easy, TimerMode::None);
        s.apply(GameEvent::SelectFromList("Texas".into()));
        s.apply(map_click("Texas"));
        let before = s.clone();
        s.correct_match("Texas");
        assert_eq!(s, before);
        s.apply(GameEvent::SelectFromList("Texas".into()));
        assert_eq!(s, before);
    }

    #[test]
    fn first_selection_arms_the_timer() {
        let mut s = GameState::new(GameMode::Easy, TimerMode::Stopwatch);
        s.apply(GameEvent::Tick);
        assert_eq!(s.timer.secs, 0);
        s.apply(GameEvent::SelectFromList("Texas".into()));
        assert!(s.timer.armed);
        s.apply(GameEvent::Tick);
        s.apply(GameEvent::Tick);
        assert_eq!(s.timer.secs, 2);
    }

    #[test]
    fn no_timer_never_arms() {
        let mut s = GameState::new(GameMode::Easy, TimerMode::None);
        s.apply(GameEvent::SelectFromList("Texas".into()));
        assert!(!s.timer.armed);
        assert!(!s.timer.is_running());
    }

    #[test]
    fn countdown_expires_and_locks_answers() {
        let mut s = hard_with_countdown(1);
        s.timer.armed = true;
        s.apply(GameEvent::Tick);
        assert_eq!(s.timer.secs, 0);
        assert!(!s.timer.armed);
        assert_eq!(s.status.message, "Time's up! Game Over");
        let after = s.clone();
        s.apply(GameEvent::Tick);
        s.apply(map_click("Utah"));
        s.apply(GameEvent::SubmitTypedAnswer("utah".into()));
        assert_eq!(s, after);
    }

    #[test]
    fn timer_mode_change_resets_clock_and_unlocks() {
        let mut s = hard_with_countdown(0);
        s.apply(GameEvent::SetTimerMode(TimerMode::Countdown));
        assert_eq!(s.timer.secs, COUNTDOWN_SECS);
        assert!(!s.timer.armed);
        s.apply(GameEvent::SetTimerMode(TimerMode::Stopwatch));
        assert_eq!(s.timer.secs, 0);
        s.apply(map_click("Utah"));
        assert_eq!(s.selection.from_map.as_deref(), Some("Utah"));
    }

    #[test]
    fn reset_keeps_timer_mode_only() {
        let mut s = GameState::new(GameMode::Easy, TimerMode::Countdown);
        s.apply(GameEvent::SelectFromList("Texas".into()));
        s.apply(map_click("Texas"));
        s.apply(GameEvent::Tick);
        s.apply(GameEvent::Reset);
        assert_eq!(s, GameState::new(GameMode::Easy, TimerMode::Countdown));
    }

    #[test]
    fn finishing_the_catalog_disarms_and_reports_final_score() {
        let mut s = GameState::new(GameMode::Easy, TimerMode::Stopwatch);
        for r in REGIONS.iter().take(CATALOG_SIZE - 1) {
            s.apply(GameEvent::SelectFromList(r.name.into()));
            s.apply(map_click(r.name));
        }
        assert!(s.timer.armed);
        assert!(s.status.message.starts_with("Correct!"));
        let last = REGIONS[CATALOG_SIZE - 1].name;
        s.apply(GameEvent::SelectFromList(last.into()));
        s.apply(map_click(last));
        assert!(s.is_complete());
        assert!(!s.timer.armed);
        assert_eq!(s.status.message, "Game Complete! Final Score: 510");
        assert_eq!(s.completion_percent(), 100);
        assert!(s.remaining().is_empty());
    }

    #[test]
    fn seeding_filters_bad_names_and_spent_countdowns() {
        let names = vec!["Ohio".to_string(), "Ohio".to_string(), "Gondor".to_string()];
        let s = GameState::seeded(
            GameMode::Hard,
            TimerMode::Countdown,
            Some((names.as_slice(), Some(0))),
            Greeting::Resume,
        );
        assert_eq!(s.completed, vec!["Ohio".to_string()]);
        assert_eq!(s.timer.secs, COUNTDOWN_SECS);
        assert_eq!(
            s.status.message,
            "Welcome back! You've completed 1 states in hard mode."
        );

        let s = GameState::seeded(
            GameMode::Easy,
            TimerMode::Countdown,
            Some((names.as_slice(), Some(42))),
            Greeting::Switched,
        );
        assert_eq!(s.timer.secs, 42);
        assert_eq!(s.score, 0);
    }

    #[test]
    fn highlight_classification() {
        let mut s = GameState::new(GameMode::Easy, TimerMode::None);
        s.apply(GameEvent::SelectFromList("Texas".into()));
        s.apply(map_click("Texas"));
        s.apply(GameEvent::SelectFromList("Utah".into()));
        assert_eq!(s.highlight("Utah", Some("Utah")), Highlight::Selected);
        assert_eq!(s.highlight("Texas", None), Highlight::Completed);
        assert_eq!(s.highlight("Texas", Some("Texas")), Highlight::CompletedHovered);
        assert_eq!(s.highlight("Ohio", Some("Ohio")), Highlight::Hovered);
        assert_eq!(s.highlight("Ohio", Some("Utah")), Highlight::Default);
    }

    fn arb_event() -> impl Strategy<Value = GameEvent> {
        let region = prop::sample::select(vec!["Texas", "Utah", "Ohio", "Maine", "Iowa"]);
        prop_oneof![
            region.clone().prop_map(|r| GameEvent::SelectFromList(r.to_string())),
            region.clone().prop_map(|r| GameEvent::SelectFromMap {
                region: r.to_string(),
                pos: ScreenPos::default()
            }),
            region.prop_map(|r| GameEvent::SubmitTypedAnswer(format!(" {} ", r.to_uppercase()))),
            Just(GameEvent::CloseTypedInput),
            Just(GameEvent::Tick),
            prop::sample::select(vec![TimerMode::None, TimerMode::Countdown, TimerMode::Stopwatch])
                .prop_map(GameEvent::SetTimerMode),
        ]
    }

    proptest! {
        #[test]
        fn score_tracks_awards_and_completion_stays_clean(
            hard in any::<bool>(),
            events in prop::collection::vec(arb_event(), 0..80),
        ) {
            let mode = if hard { GameMode::Hard } else { GameMode::Easy };
            let mut s = GameState::new(mode, TimerMode::Countdown);
            let mut awarded = 0u32;
            for ev in events {
                let before = s.clone();
                s.apply(ev);
                prop_assert!(s.score >= before.score);
                if s.completed.len() > before.completed.len() {
                    prop_assert_eq!(s.completed.len(), before.completed.len() + 1);
                    awarded += before.points_for_match();
                } else {
                    prop_assert_eq!(s.score, before.score);
                }
                prop_assert_eq!(s.score, awarded);
                let mut seen = std::collections::HashSet::new();
                for name in &s.completed {
                    prop_assert!(catalog::is_region(name));
                    prop_assert!(seen.insert(name.clone()));
                }
                prop_assert!(s.completed.len() <= CATALOG_SIZE);
            }
        }
    }
}

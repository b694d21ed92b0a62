//! One-second tick source for the game clock.

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;

use crate::model::TimerState;

/// Whether a ticker should exist for this clock at all.
pub fn wants_ticks(timer: &TimerState) -> bool {
    timer.is_running()
}

/// A live `setInterval`. Dropping it clears the interval, so holding at most
/// one `Ticker` per session means at most one tick source.
pub struct Ticker {
    window: web_sys::Window,
    id: i32,
    _tick: Closure<dyn FnMut()>,
}

impl Ticker {
    pub fn start(period_ms: i32, on_tick: impl FnMut() + 'static) -> Option<Self> {
        let window = web_sys::window()?;
        let tick = Closure::wrap(Box::new(on_tick) as Box<dyn FnMut()>);
        let id = window
            .set_interval_with_callback_and_timeout_and_arguments_0(
                tick.as_ref().unchecked_ref(),
                period_ms,
            )
            .ok()?;
        Some(Self {
            window,
            id,
            _tick: tick,
        })
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.window.clear_interval_with_handle(self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TimerMode;

    #[test]
    fn only_armed_timed_clocks_tick() {
        let mut t = TimerState::new(TimerMode::Countdown);
        assert!(!wants_ticks(&t));
        t.armed = true;
        assert!(wants_ticks(&t));
        let mut none = TimerState::new(TimerMode::None);
        none.armed = true;
        assert!(!wants_ticks(&none));
    }
}

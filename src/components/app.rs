use super::{
    answer_popup::AnswerPopup, game_over_overlay::GameOverOverlay, mode_controls::ModeControls,
    settings_modal::SettingsModal, states_list::StatesList, states_map::StatesMap,
    status_panel::StatusPanel, timer_controls::TimerControls,
};
use crate::catalog::CATALOG_SIZE;
use crate::config::TICK_PERIOD_MS;
use crate::model::{GameEvent, GameMode, TimerMode};
use crate::session::{GameSession, SessionAction};
use crate::timer::{Ticker, wants_ticks};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use yew::prelude::*;

#[function_component(App)]
pub fn app() -> Html {
    let session = use_reducer(GameSession::open_browser);
    // hover is view-only and never saved
    let hovered = use_state(|| None::<String>);
    let show_settings = use_state(|| false);

    // Game clock: at most one ticker, rebuilt whenever the clock starts/stops
    // or the game is reseeded.
    {
        let running = wants_ticks(&session.game.timer);
        let epoch = session.epoch;
        let session = session.clone();
        use_effect_with((running, epoch), move |&(running, _)| {
            let ticker = if running {
                Ticker::start(TICK_PERIOD_MS, move || {
                    session.dispatch(SessionAction::Game(GameEvent::Tick));
                })
            } else {
                None
            };
            move || drop(ticker)
        });
    }

    // Flush unsaved progress when the page is hidden or the app unmounts.
    {
        let session = session.clone();
        use_effect_with((), move |_| {
            let window = web_sys::window();
            let on_hide = {
                let session = session.clone();
                Closure::wrap(Box::new(move |_e: web_sys::Event| {
                    session.dispatch(SessionAction::Flush);
                }) as Box<dyn FnMut(_)>)
            };
            if let Some(win) = &window {
                let _ = win
                    .add_event_listener_with_callback("pagehide", on_hide.as_ref().unchecked_ref());
            }
            move || {
                if let Some(win) = &window {
                    let _ = win.remove_event_listener_with_callback(
                        "pagehide",
                        on_hide.as_ref().unchecked_ref(),
                    );
                }
                session.dispatch(SessionAction::Flush);
                drop(on_hide);
            }
        });
    }

    let on_event = {
        let session = session.clone();
        Callback::from(move |ev: GameEvent| session.dispatch(SessionAction::Game(ev)))
    };
    let on_switch_mode = {
        let on_event = on_event.clone();
        let hovered = hovered.clone();
        Callback::from(move |mode: GameMode| {
            hovered.set(None);
            on_event.emit(GameEvent::SwitchMode(mode));
        })
    };
    let on_set_timer = {
        let on_event = on_event.clone();
        Callback::from(move |mode: TimerMode| on_event.emit(GameEvent::SetTimerMode(mode)))
    };
    let on_reset = {
        let on_event = on_event.clone();
        let hovered = hovered.clone();
        Callback::from(move |_| {
            hovered.set(None);
            on_event.emit(GameEvent::Reset);
        })
    };
    let on_select_list = {
        let on_event = on_event.clone();
        Callback::from(move |name: String| on_event.emit(GameEvent::SelectFromList(name)))
    };
    let on_hover = {
        let hovered = hovered.clone();
        Callback::from(move |name: Option<String>| hovered.set(name))
    };
    let open_settings = {
        let show_settings = show_settings.clone();
        Callback::from(move |_| show_settings.set(true))
    };
    let close_settings = {
        let show_settings = show_settings.clone();
        Callback::from(move |_| show_settings.set(false))
    };
    let toggle_dark = {
        let session = session.clone();
        let dark = session.settings.dark_mode;
        Callback::from(move |_| session.dispatch(SessionAction::SetDarkMode(!dark)))
    };
    let hard_reset = {
        let session = session.clone();
        let show_settings = show_settings.clone();
        Callback::from(move |_| {
            session.dispatch(SessionAction::ClearAllData);
            show_settings.set(false);
        })
    };

    let game = &session.game;
    let (bg, fg, border) = if session.settings.dark_mode {
        ("#0e1116", "#e6edf3", "#30363d")
    } else {
        ("#ffffff", "#111827", "#e5e7eb")
    };
    let popup = match (game.mode, &game.selection.from_map, game.last_click) {
        (GameMode::Hard, Some(_), Some(pos)) if !game.is_time_up() => html! {
            <AnswerPopup value={game.typed_input.clone()} position={pos} on_event={on_event.clone()} />
        },
        _ => html! {},
    };
    let list = if game.mode == GameMode::Easy {
        html! { <StatesList remaining={game.remaining()} selected={game.selection.from_list.clone()} on_select={on_select_list} /> }
    } else {
        html! {}
    };

    html! {
        <div style={format!("width:100%; height:100vh; display:flex; flex-direction:column; overflow:hidden; background:{}; color:{};", bg, fg)}>
            <div style={format!("position:sticky; top:0; z-index:10; border-bottom:1px solid {}; padding:16px 24px; display:flex; flex-direction:column; gap:16px;", border)}>
                <div style="display:flex; justify-content:space-between; align-items:center; gap:16px; flex-wrap:wrap;">
                    <h1 style="font-size:24px; font-weight:bold; margin:0;">{"US States Learning Game"}</h1>
                    <div style="display:flex; gap:16px; align-items:center;">
                        <ModeControls mode={game.mode} completion={GameMode::ALL.map(|m| session.mode_completion(m))} on_switch_mode={on_switch_mode.clone()} on_reset={on_reset.clone()} on_open_settings={open_settings} />
                        <TimerControls timer={game.timer} {on_set_timer} />
                    </div>
                </div>
                <StatusPanel
                    score={game.score}
                    status={game.status.clone()}
                    completed={game.completed.len()}
                    total={CATALOG_SIZE}
                    percent={game.completion_percent()}
                    best_score={session.best_score}
                />
            </div>
            <div style="flex:1; min-height:0; padding:16px; display:flex; gap:16px; overflow:hidden;">
                { list }
                <StatesMap game={game.clone()} hovered={(*hovered).clone()} on_event={on_event.clone()} {on_hover} />
            </div>
            { popup }
            <GameOverOverlay
                show={game.is_complete() || game.is_time_up()}
                won={game.is_complete()}
                score={game.score}
                completed={game.completed.len()}
                mode={game.mode}
                restart={on_reset}
                switch_mode={on_switch_mode}
            />
            <SettingsModal
                show={*show_settings}
                on_close={close_settings}
                dark_mode={session.settings.dark_mode}
                on_toggle_dark_mode={toggle_dark}
                persistent={session.persistent}
                on_hard_reset={hard_reset}
            />
        </div>
    }
}

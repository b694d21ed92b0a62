use crate::model::{TimerMode, TimerState};
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct TimerControlsProps {
    pub timer: TimerState,
    pub on_set_timer: Callback<TimerMode>,
}

#[function_component]
pub fn TimerControls(props: &TimerControlsProps) -> Html {
    let current = props.timer.mode;
    // clicking the active mode turns the timer off
    let toggle = |mode: TimerMode, label: &'static str| {
        let cb = props.on_set_timer.clone();
        let next = if current == mode { TimerMode::None } else { mode };
        let onclick = Callback::from(move |_| cb.emit(next));
        let style = if current == mode {
            "padding:4px 10px; font-size:12px; background:#3b82f6; color:#fff; border:1px solid #3b82f6; border-radius:6px;"
        } else {
            "padding:4px 10px; font-size:12px; border-radius:6px;"
        };
        html! { <button {onclick} {style}>{ label }</button> }
    };
    let label = match current {
        TimerMode::Countdown => Some("Time remaining"),
        TimerMode::Stopwatch => Some("Time elapsed"),
        TimerMode::None => None,
    };
    html! {<div style="display:flex; flex-direction:column; align-items:center; gap:6px;">
        <div style="display:flex; gap:6px;">
            { toggle(TimerMode::Countdown, "Countdown") }
            { toggle(TimerMode::Stopwatch, "Stopwatch") }
        </div>
        { if let Some(l) = label {
            html!{ <div style="font-size:16px; font-weight:600; font-variant-numeric:tabular-nums;">{ format!("{}: {}", l, props.timer.display()) }</div> }
        } else { html!{} } }
    </div>}
}

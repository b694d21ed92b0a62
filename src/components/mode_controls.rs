use crate::model::GameMode;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct ModeControlsProps {
    pub mode: GameMode,
    /// Completion percentage per mode, in `GameMode::ALL` order.
    pub completion: [u32; 2],
    pub on_switch_mode: Callback<GameMode>,
    pub on_reset: Callback<()>,
    pub on_open_settings: Callback<()>,
}

#[function_component]
pub fn ModeControls(props: &ModeControlsProps) -> Html {
    let mode_button = |(mode, percent): (GameMode, u32)| {
        let cb = props.on_switch_mode.clone();
        let onclick = Callback::from(move |_| cb.emit(mode));
        let style = if props.mode == mode {
            "padding:6px 14px; border-radius:6px; background:#3b82f6; color:#fff; border:1px solid #3b82f6;"
        } else {
            "padding:6px 14px; border-radius:6px; background:transparent; color:inherit; border:1px solid #d1d5db;"
        };
        html! { <button {onclick} {style}>{ format!("{} Mode · {}%", mode.label(), percent) }</button> }
    };
    let reset_cb = {
        let cb = props.on_reset.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let settings_cb = {
        let cb = props.on_open_settings.clone();
        Callback::from(move |_| cb.emit(()))
    };
    html! {<div style="display:flex; gap:8px; align-items:center;">
        { for GameMode::ALL.into_iter().zip(props.completion).map(mode_button) }
        <button onclick={reset_cb} style="padding:6px 14px; border-radius:6px;">{"Reset Game"}</button>
        <button onclick={settings_cb} style="padding:6px 14px; border-radius:6px;">{"Settings"}</button>
    </div>}
}

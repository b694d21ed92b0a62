use crate::model::GameMode;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct GameOverOverlayProps {
    pub show: bool,
    /// True for a full map, false for an expired countdown.
    pub won: bool,
    pub score: u32,
    pub completed: usize,
    pub mode: GameMode,
    pub restart: Callback<()>,
    pub switch_mode: Callback<GameMode>,
}

#[function_component]
pub fn GameOverOverlay(props: &GameOverOverlayProps) -> Html {
    if !props.show {
        return html! {};
    }
    let restart_cb = props.restart.clone();
    let restart_btn = Callback::from(move |_| restart_cb.emit(()));
    let other = props.mode.other();
    let switch_btn = {
        let cb = props.switch_mode.clone();
        Callback::from(move |_| cb.emit(other))
    };
    let (title, color) = if props.won {
        ("Game Complete!", "#16a34a")
    } else {
        ("Time's Up!", "#dc2626")
    };
    html! {
        <div style="position:fixed; top:50%; left:50%; transform:translate(-50%, -50%); background:rgba(17,24,39,0.92); color:#f9fafb; border:2px solid #374151; padding:24px 32px; border-radius:12px; text-align:center; min-width:320px; z-index:45;">
            <h2 style={format!("margin:0 0 12px 0; color:{};", color)}>{ title }</h2>
            <p style="margin:4px 0;">{ format!("Final Score: {}", props.score) }</p>
            <p style="margin:4px 0;">{ format!("States Found: {}", props.completed) }</p>
            <div style="margin-top:16px; display:flex; gap:12px; justify-content:center;">
                <button onclick={restart_btn}>{"Play Again"}</button>
                <button onclick={switch_btn}>{ format!("Try {} Mode", other.label()) }</button>
            </div>
        </div>
    }
}

use crate::model::{Severity, Status};
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct StatusPanelProps {
    pub score: u32,
    pub status: Status,
    pub completed: usize,
    pub total: usize,
    pub percent: u32,
    pub best_score: Option<u32>,
}

#[function_component]
pub fn StatusPanel(props: &StatusPanelProps) -> Html {
    let message_color = match props.status.severity {
        Severity::Success => "#16a34a",
        Severity::Error => "#dc2626",
        Severity::Info => "#6b7280",
    };
    let value_style = "font-variant-numeric:tabular-nums; font-weight:600;";
    html! {
        <div style="display:flex; align-items:center; justify-content:space-between; gap:16px; font-size:14px;">
            <div style="display:flex; gap:18px; align-items:center;">
                <span style={format!("{} font-size:18px;", value_style)}>{ format!("🏆 {} points", props.score) }</span>
                <span style={value_style}>{ format!("{} / {} states ({}%)", props.completed, props.total, props.percent) }</span>
                { if let Some(best) = props.best_score {
                    html!{ <span style="opacity:0.75;">{ format!("Best: {}", best) }</span> }
                } else { html!{} } }
            </div>
            <div style={format!("color:{}; font-weight:500; text-align:center; flex:1;", message_color)}>{ props.status.message.clone() }</div>
        </div>
    }
}

use crate::model::{GameEvent, ScreenPos};
use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct AnswerPopupProps {
    pub value: String,
    pub position: ScreenPos,
    pub on_event: Callback<GameEvent>,
}

/// Hard-mode answer box, anchored next to the last map click.
#[function_component]
pub fn AnswerPopup(props: &AnswerPopupProps) -> Html {
    let input_ref = use_node_ref();
    {
        let input_ref = input_ref.clone();
        use_effect_with(props.position, move |_| {
            if let Some(input) = input_ref.cast::<HtmlInputElement>() {
                let _ = input.focus();
            }
            || ()
        });
    }
    let oninput = {
        let cb = props.on_event.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            cb.emit(GameEvent::UpdateTypedInput(input.value()));
        })
    };
    let onkeydown = {
        let cb = props.on_event.clone();
        let value = props.value.clone();
        Callback::from(move |e: KeyboardEvent| match e.key().as_str() {
            "Enter" => cb.emit(GameEvent::SubmitTypedAnswer(value.clone())),
            "Escape" => cb.emit(GameEvent::CloseTypedInput),
            _ => {}
        })
    };
    let submit_cb = {
        let cb = props.on_event.clone();
        let value = props.value.clone();
        Callback::from(move |_| cb.emit(GameEvent::SubmitTypedAnswer(value.clone())))
    };
    let close_cb = {
        let cb = props.on_event.clone();
        Callback::from(move |_| cb.emit(GameEvent::CloseTypedInput))
    };
    let style = format!(
        "position:fixed; left:{}px; top:{}px; transform:translate(-50%, 12px); background:#fff; color:#111827; border:1px solid #d1d5db; border-radius:8px; padding:8px; display:flex; gap:6px; box-shadow:0 4px 12px rgba(0,0,0,0.15); z-index:40;",
        props.position.x, props.position.y
    );
    html! {<div {style}>
        <input ref={input_ref} value={props.value.clone()} {oninput} {onkeydown}
            placeholder="Type state name..." style="padding:4px 8px; border:1px solid #d1d5db; border-radius:4px;" />
        <button onclick={submit_cb} style="padding:4px 10px;">{"Submit"}</button>
        <button onclick={close_cb} style="padding:4px 8px;">{"✕"}</button>
    </div>}
}

use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct StatesListProps {
    /// Names still to find, in catalog order.
    pub remaining: Vec<&'static str>,
    pub selected: Option<String>,
    pub on_select: Callback<String>,
}

#[function_component]
pub fn StatesList(props: &StatesListProps) -> Html {
    let row = |name: &'static str| {
        let cb = props.on_select.clone();
        let onclick = Callback::from(move |_| cb.emit(name.to_string()));
        let selected = props.selected.as_deref() == Some(name);
        let style = if selected {
            "text-align:left; padding:6px 10px; border-radius:6px; background:#3b82f6; color:#fff; border:1px solid #3b82f6; cursor:pointer;"
        } else {
            "text-align:left; padding:6px 10px; border-radius:6px; background:transparent; color:inherit; border:1px solid #d1d5db; cursor:pointer;"
        };
        html! { <button key={name} {onclick} {style}>{ name }</button> }
    };
    html! {
        <div style="min-width:200px; max-height:calc(100vh - 200px); overflow-y:auto; display:flex; flex-direction:column; gap:4px; padding-right:6px;">
            { for props.remaining.iter().copied().map(row) }
        </div>
    }
}

use countdown_core::{Surface, format_unit};
use yew::prelude::*;

#[derive(Properties, PartialEq, Eq, Clone)]
pub struct Props {
    pub surface: Surface,
    pub label: AttrValue,
}

/// One card of the countdown. The number is written by the sink, not by yew.
#[function_component(TimeUnit)]
pub fn time_unit(props: &Props) -> Html {
    html! {
        <div class="time-unit">
            <span class="number" id={props.surface.element_id()}>{ format_unit(0) }</span>
            <span class="label">{ props.label.clone() }</span>
        </div>
    }
}

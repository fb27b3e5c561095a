use yew::prelude::*;

use crate::boot;
use crate::components::page::CountdownPage;

#[function_component(App)]
pub fn app() -> Html {
    use_effect_with((), |_| {
        let _countdown = boot::launch(boot::local_config());
        || {}
    });
    html! { <CountdownPage /> }
}

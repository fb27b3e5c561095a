use countdown_core::Surface;
use yew::prelude::*;

use crate::components::time_unit::TimeUnit;

#[derive(Properties, PartialEq, Eq, Clone)]
pub struct Props {
    #[prop_or(AttrValue::from("Countdown"))]
    pub title: AttrValue,
}

impl Default for Props {
    fn default() -> Self {
        Self {
            title: AttrValue::from("Countdown"),
        }
    }
}

/// Static shell holding every surface the countdown writes to.
#[function_component(CountdownPage)]
pub fn countdown_page(props: &Props) -> Html {
    html! {
        <main class="container">
            <h1 class="title">{ props.title.clone() }</h1>
            <section class="countdown">
                <TimeUnit surface={Surface::Days} label="Days" />
                <TimeUnit surface={Surface::Hours} label="Hours" />
                <TimeUnit surface={Surface::Minutes} label="Minutes" />
                <TimeUnit surface={Surface::Seconds} label="Seconds" />
            </section>
            <div class="progress-bar">
                <div class="progress-fill" id={Surface::Progress.element_id()}></div>
            </div>
            <p class="message" id={Surface::Message.element_id()}></p>
            <div class="fireworks" id={Surface::Particles.element_id()}></div>
        </main>
    }
}

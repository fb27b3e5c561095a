//! Click-to-pulse on the time-unit cards. Purely cosmetic.

use countdown_core::Scheduler;
use countdown_core::constants::PULSE_RESTART_MS;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::HtmlElement;

use crate::dom;

pub const TIME_UNIT_SELECTOR: &str = ".time-unit";
pub const PULSE_ANIMATION: &str = "pulse 2s ease-in-out infinite";

/// Attach the restart handler to every time-unit card on the page and
/// return how many were found.
pub fn install_pulse_restart<R>(scheduler: &R) -> u32
where
    R: Scheduler + Clone + 'static,
{
    let Some(document) = dom::document() else {
        return 0;
    };
    let nodes = match document.query_selector_all(TIME_UNIT_SELECTOR) {
        Ok(nodes) => nodes,
        Err(err) => {
            dom::console_error(&format!(
                "Failed to find time units: {}",
                dom::js_error_message(&err)
            ));
            return 0;
        }
    };

    let mut installed = 0;
    for index in 0..nodes.length() {
        let Some(unit) = nodes
            .item(index)
            .and_then(|node| node.dyn_into::<HtmlElement>().ok())
        else {
            continue;
        };
        let target = unit.clone();
        let scheduler = scheduler.clone();
        let on_click = Closure::wrap(Box::new(move |_event: web_sys::Event| {
            restart_pulse(&target, &scheduler);
        }) as Box<dyn FnMut(web_sys::Event)>);
        match unit.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref()) {
            Ok(()) => installed += 1,
            Err(err) => dom::console_error(&format!(
                "Failed to attach pulse handler: {}",
                dom::js_error_message(&err)
            )),
        }
        on_click.forget();
    }
    log::debug!("pulse restart attached to {installed} time units");
    installed
}

fn restart_pulse<R: Scheduler>(unit: &HtmlElement, scheduler: &R) {
    set_animation(unit, "none");
    let unit = unit.clone();
    scheduler.schedule(
        PULSE_RESTART_MS,
        Box::new(move || set_animation(&unit, PULSE_ANIMATION)),
    );
}

fn set_animation(unit: &HtmlElement, value: &str) {
    if let Err(err) = unit.style().set_property("animation", value) {
        log::debug!(
            "skipping pulse animation {value:?}: {}",
            dom::js_error_message(&err)
        );
    }
}

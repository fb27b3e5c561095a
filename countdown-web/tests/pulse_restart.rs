#![cfg(target_arch = "wasm32")]

use std::cell::RefCell;
use std::rc::Rc;

use countdown_core::Scheduler;
use countdown_core::constants::PULSE_RESTART_MS;
use countdown_web::dom;
use countdown_web::interactions::install_pulse_restart;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

type Deferred = Vec<(u32, Box<dyn FnOnce()>)>;

/// Holds one-shot tasks until the test runs them.
#[derive(Clone, Default)]
struct HeldScheduler {
    deferred: Rc<RefCell<Deferred>>,
}

impl HeldScheduler {
    fn run_deferred(&self) -> Vec<u32> {
        let tasks: Deferred = self.deferred.borrow_mut().drain(..).collect();
        tasks
            .into_iter()
            .map(|(delay, task)| {
                task();
                delay
            })
            .collect()
    }
}

impl Scheduler for HeldScheduler {
    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) {
        self.deferred.borrow_mut().push((delay_ms, task));
    }

    fn repeat(&self, _period_ms: u32, _task: Box<dyn FnMut()>) {}
}

fn mount_time_units(count: usize) -> Vec<web_sys::HtmlElement> {
    let document = dom::document().unwrap();
    let stale = document.query_selector_all(".time-unit").unwrap();
    for index in 0..stale.length() {
        if let Some(node) = stale.item(index) {
            if let Some(parent) = node.parent_node() {
                parent.remove_child(&node).unwrap();
            }
        }
    }
    let body = document.body().unwrap();
    (0..count)
        .map(|i| {
            let element = document.create_element("div").unwrap();
            element.set_id(&format!("unit-{i}"));
            element.set_class_name("time-unit");
            body.append_child(&element).unwrap();
            dom::html_element_by_id(&format!("unit-{i}")).unwrap()
        })
        .collect()
}

fn animation(unit: &web_sys::HtmlElement) -> String {
    unit.style().get_property_value("animation").unwrap()
}

#[wasm_bindgen_test]
fn click_clears_then_restores_the_pulse() {
    let units = mount_time_units(2);
    let scheduler = HeldScheduler::default();
    assert_eq!(install_pulse_restart(&scheduler), 2);

    units[1].click();
    assert_eq!(animation(&units[1]), "none");
    assert_eq!(animation(&units[0]), "");

    assert_eq!(scheduler.run_deferred(), vec![PULSE_RESTART_MS]);
    assert!(animation(&units[1]).contains("pulse"));
    assert!(animation(&units[1]).contains("infinite"));
}

#[wasm_bindgen_test]
fn no_time_units_installs_nothing() {
    mount_time_units(0);
    assert_eq!(install_pulse_restart(&HeldScheduler::default()), 0);
}

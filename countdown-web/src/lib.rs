#![forbid(unsafe_code)]
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

pub mod app;
pub mod boot;
pub mod components;
pub mod dom;
pub mod interactions;
pub mod scheduler;
pub mod sink;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    if let Err(err) = console_log::init_with_level(log::Level::Info) {
        dom::console_error(&format!("Failed to install console logger: {err}"));
    }
    yew::Renderer::<app::App>::new().render();
}

use js_sys::Date;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlElement, Window};

/// Retrieve the global `window` object, if running in a browser.
#[must_use]
pub fn window() -> Option<Window> {
    web_sys::window()
}

/// Retrieve the document object for DOM interactions.
#[must_use]
pub fn document() -> Option<Document> {
    window().and_then(|w| w.document())
}

/// Look up an element by id as an `HtmlElement`.
#[must_use]
pub fn html_element_by_id(id: &str) -> Option<HtmlElement> {
    document()?
        .get_element_by_id(id)?
        .dyn_into::<HtmlElement>()
        .ok()
}

/// Convert a JavaScript value into a readable string for error reporting.
#[must_use]
pub fn js_error_message(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            value
                .dyn_ref::<js_sys::Error>()
                .map(|err| err.message().into())
        })
        .unwrap_or_else(|| format!("{value:?}"))
}

/// Log an error message to the browser console.
pub fn console_error(message: &str) {
    web_sys::console::error_1(&JsValue::from(message));
}

/// Epoch milliseconds of local midnight on the given date.
#[must_use]
pub fn local_midnight_ms(year: i32, month: u32, day: u32) -> i64 {
    let date = Date::new_with_year_month_day(
        u32::try_from(year).unwrap_or(1970),
        i32::try_from(month).unwrap_or(1) - 1,
        i32::try_from(day).unwrap_or(1),
    );
    f64_to_ms(date.get_time())
}

/// Current time in epoch milliseconds.
#[must_use]
pub fn now_ms() -> i64 {
    f64_to_ms(Date::now())
}

#[allow(clippy::cast_possible_truncation)] // JS timestamps are integral and well inside i64.
fn f64_to_ms(value: f64) -> i64 {
    if value.is_finite() { value as i64 } else { 0 }
}

/// Run `f` once after `delay_ms`.
///
/// # Errors
/// Returns an error if no window is available or the timer cannot be scheduled.
pub fn set_timeout(delay_ms: u32, f: impl FnOnce() + 'static) -> Result<(), JsValue> {
    let win = window().ok_or_else(|| JsValue::from_str("window unavailable"))?;
    let closure = Closure::once(f);
    win.set_timeout_with_callback_and_timeout_and_arguments_0(
        closure.as_ref().unchecked_ref(),
        i32::try_from(delay_ms).unwrap_or(i32::MAX),
    )?;
    closure.forget();
    Ok(())
}

/// Run `f` every `period_ms` for the lifetime of the page.
///
/// # Errors
/// Returns an error if no window is available or the interval cannot be registered.
pub fn set_interval(period_ms: u32, f: Box<dyn FnMut()>) -> Result<(), JsValue> {
    let win = window().ok_or_else(|| JsValue::from_str("window unavailable"))?;
    let closure = Closure::wrap(f);
    win.set_interval_with_callback_and_timeout_and_arguments_0(
        closure.as_ref().unchecked_ref(),
        i32::try_from(period_ms).unwrap_or(i32::MAX),
    )?;
    closure.forget();
    Ok(())
}

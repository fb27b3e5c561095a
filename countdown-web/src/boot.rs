//! Wiring the core countdown to the browser.

use countdown_core::constants::{START_DATE, TARGET_DATE};
use countdown_core::{CalendarDate, Countdown, CountdownConfig};

use crate::dom;
use crate::interactions;
use crate::scheduler::{BrowserClock, BrowserScheduler};
use crate::sink::DomSink;

pub type BrowserCountdown = Countdown<DomSink, BrowserClock, BrowserScheduler>;

fn local_instant(date: CalendarDate) -> i64 {
    dom::local_midnight_ms(date.year, date.month, date.day)
}

/// Default configuration with the start and target resolved in the host's
/// local time zone and a fresh particle seed.
#[must_use]
pub fn local_config() -> CountdownConfig {
    CountdownConfig {
        rng_seed: Some(js_sys::Math::random().to_bits()),
        ..CountdownConfig::with_instants(local_instant(START_DATE), local_instant(TARGET_DATE))
    }
}

/// Start ticking against the page's surfaces and hook up the time-unit
/// interactions. The countdown keeps itself alive through its interval.
pub fn launch(config: CountdownConfig) -> BrowserCountdown {
    if let Err(err) = config.validate() {
        log::error!("countdown config rejected, continuing anyway: {err}");
    }
    let countdown = Countdown::new(config, DomSink::new(), BrowserClock, BrowserScheduler);
    countdown.start();
    interactions::install_pulse_restart(&BrowserScheduler);
    countdown
}

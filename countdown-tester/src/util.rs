use anyhow::{Result, bail};
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};

const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Parse an instant given on the command line into epoch milliseconds.
///
/// Accepts RFC 3339, `YYYY-MM-DD HH:MM:SS` / `YYYY-MM-DDTHH:MM:SS` in local
/// time, or a bare `YYYY-MM-DD` meaning local midnight.
pub fn parse_instant(input: &str) -> Result<i64> {
    let s = input.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.timestamp_millis());
    }
    for format in DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return local_ms(&naive, input);
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d")
        && let Some(naive) = date.and_hms_opt(0, 0, 0)
    {
        return local_ms(&naive, input);
    }
    bail!("unrecognised instant `{input}` (expected RFC 3339 or YYYY-MM-DD[ HH:MM:SS])")
}

fn local_ms(naive: &NaiveDateTime, input: &str) -> Result<i64> {
    match Local.from_local_datetime(naive).earliest() {
        Some(dt) => Ok(dt.timestamp_millis()),
        None => bail!("`{input}` does not exist in the local time zone"),
    }
}

/// Local midnight of a calendar date, in epoch milliseconds.
pub fn local_midnight_ms(year: i32, month: u32, day: u32) -> Result<i64> {
    let Some(naive) = NaiveDate::from_ymd_opt(year, month, day).and_then(|d| d.and_hms_opt(0, 0, 0))
    else {
        bail!("invalid calendar date {year}-{month:02}-{day:02}");
    };
    local_ms(&naive, &naive.to_string())
}

/// Render epoch milliseconds as a local timestamp.
pub fn format_instant(ms: i64) -> String {
    Utc.timestamp_millis_opt(ms)
        .single()
        .map_or_else(
            || format!("{ms} ms"),
            |dt| {
                dt.with_timezone(&Local)
                    .format("%Y-%m-%d %H:%M:%S%.3f %Z")
                    .to_string()
            },
        )
}

/// Current wall-clock time in epoch milliseconds.
pub fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

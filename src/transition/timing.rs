//! Measuring CSS transition time.
//!
//! The enter and leave phases wait for the element's own CSS transition
//! before removing their classes. The wait is read from the computed
//! `transition-duration` and `transition-delay`, which are comma-separated
//! lists (one entry per transitioned property) of `s` or `ms` values. The
//! longest duration plus the longest delay is how long the phase lasts.

use std::time::Duration;

use crate::dom::Dom;

/// Parses a computed CSS time list and returns its longest entry.
///
/// Unparseable, negative or out-of-range entries count as zero; an empty
/// list is zero.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use headless_ui::transition::timing::longest_time;
///
/// assert_eq!(longest_time("0.15s, 75ms"), Duration::from_millis(150));
/// assert_eq!(longest_time(""), Duration::ZERO);
/// ```
#[must_use]
pub fn longest_time(value: &str) -> Duration {
    value
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(parse_time)
        .max()
        .unwrap_or(Duration::ZERO)
}

fn parse_time(entry: &str) -> Duration {
    let millis = if let Some(ms) = entry.strip_suffix("ms") {
        ms.trim().parse::<f64>().ok()
    } else if let Some(s) = entry.strip_suffix('s') {
        s.trim().parse::<f64>().ok().map(|secs| secs * 1000.0)
    } else {
        None
    };
    match millis {
        Some(ms) if ms.is_finite() && ms > 0.0 => {
            Duration::try_from_secs_f64(ms / 1000.0).unwrap_or(Duration::ZERO)
        }
        _ => Duration::ZERO,
    }
}

/// Total time the element's CSS transition takes: longest duration plus longest delay.
pub fn transition_time(dom: &dyn Dom, id: &str) -> Duration {
    let read = |property: &str| {
        dom.computed_style(id, property)
            .map_or(Duration::ZERO, |value| longest_time(&value))
    };
    read("transition-duration").saturating_add(read("transition-delay"))
}

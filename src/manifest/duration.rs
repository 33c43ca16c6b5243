//! Compose duration strings.

use std::time::Duration;

/// Format a duration the way compose files spell them: "500ms", "5s", "2m".
///
/// Whole minutes use `m`, whole seconds use `s`, anything finer falls back
/// to milliseconds.
pub fn format_duration(duration: Duration) -> String {
    let millis = duration.as_millis();
    if millis % 1000 != 0 {
        return format!("{}ms", millis);
    }

    let secs = duration.as_secs();
    if secs != 0 && secs % 60 == 0 {
        format!("{}m", secs / 60)
    } else {
        format!("{}s", secs)
    }
}

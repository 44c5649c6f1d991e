//! Human-readable formatting for sizes and durations

use std::time::Duration;

/// Formats a byte count with binary units, e.g. `1.50MB`
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
    const THRESHOLD: f64 = 1024.0;

    if bytes == 0 {
        return "0B".to_string();
    }

    let mut size = bytes as f64;
    let mut unit_index = 0;

    while size >= THRESHOLD && unit_index < UNITS.len() - 1 {
        size /= THRESHOLD;
        unit_index += 1;
    }

    if unit_index == 0 {
        format!("{:.0}{}", size, UNITS[unit_index])
    } else if size >= 10.0 {
        format!("{:.1}{}", size, UNITS[unit_index])
    } else {
        format!("{:.2}{}", size, UNITS[unit_index])
    }
}

/// Formats an elapsed duration, e.g. `850ms`, `2.35s`, `1m 05s`
pub fn format_duration(elapsed: Duration) -> String {
    let millis = elapsed.as_millis() as u64;

    if millis < 1000 {
        format!("{}ms", millis)
    } else if millis < 60_000 {
        format!("{:.2}s", millis as f64 / 1000.0)
    } else {
        let total_seconds = millis / 1000;
        format!("{}m {:02}s", total_seconds / 60, total_seconds % 60)
    }
}

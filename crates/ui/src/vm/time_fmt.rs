/// Remaining seconds with one decimal, as shown on the HUD timer.
#[must_use]
pub fn format_secs(secs: f64) -> String {
    format!("{:.1}s", secs.max(0.0))
}

/// Elapsed round time with two decimals, as shown in records.
#[must_use]
pub fn format_elapsed(secs: f64) -> String {
    format!("{:.2}s", secs.max(0.0))
}

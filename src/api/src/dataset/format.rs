//! Lap-time display formatting.

/// Render a duration in milliseconds as `M:SS.mmm`.
///
/// Minutes are not padded and may exceed 59.
pub fn format_ms(ms: u64) -> String {
    let minutes = ms / 60_000;
    let seconds = (ms % 60_000) / 1_000;
    let millis = ms % 1_000;
    format!("{}:{:02}.{:03}", minutes, seconds, millis)
}

//! Progress formatting for the player's time labels

const SECONDS_PER_HOUR: u64 = 60 * 60;

/// Render whole seconds as `HH:MM:SS`
///
/// Each unit is zero-padded to two digits; hours keep growing past 99.
pub fn format_duration(seconds: u64) -> String {
    let hours = seconds / SECONDS_PER_HOUR;
    let minutes = (seconds % SECONDS_PER_HOUR) / 60;
    let seconds = seconds % 60;

    format!("{hours:02}:{minutes:02}:{seconds:02}")
}

//! Human-readable duration fields attached to language entries.

/// Derived display fields for a number of tracked seconds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DurationParts {
    /// Coarsest non-zero unit: "1h 5m", "12m" or "40s"
    pub text: String,
    pub hours: u64,
    /// Minutes within the hour
    pub minutes: u64,
    /// Zero-padded "HH:MM:SS"
    pub digital: String,
}

/// Splits `seconds` into hours, minutes and seconds and renders both the
/// short text form and the digital clock form.
///
/// Fractional seconds are truncated. Negative or non-finite input is treated
/// as zero.
pub fn format_duration(seconds: f64) -> DurationParts {
    let total = if seconds.is_finite() {
        seconds.max(0.0).floor() as u64
    } else {
        0
    };

    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;

    let text = if hours > 0 {
        format!("{}h {}m", hours, minutes)
    } else if minutes > 0 {
        format!("{}m", minutes)
    } else {
        format!("{}s", secs)
    };

    DurationParts {
        text,
        hours,
        minutes,
        digital: format!("{:02}:{:02}:{:02}", hours, minutes, secs),
    }
}

//! Validation modules

use crate::error::AppError;

/// Parse a `"[[H:]M:]S"` duration string into whole seconds.
///
/// Accepts `"90"`, `"1:30"`, and `"1:02:03"` forms. Anything else is a
/// validation error surfaced to the caller as a user-facing message.
pub fn duration_to_seconds(text: &str) -> Result<u32, AppError> {
    let parts: Vec<&str> = text.trim().split(':').collect();
    if parts.is_empty() || parts.len() > 3 || parts.iter().any(|p| p.is_empty()) {
        return Err(bad_duration());
    }
    let mut seconds: u32 = 0;
    for part in parts {
        let value: u32 = part.parse().map_err(|_| bad_duration())?;
        seconds = seconds
            .checked_mul(60)
            .and_then(|s| s.checked_add(value))
            .ok_or_else(bad_duration)?;
    }
    Ok(seconds)
}

/// Format whole seconds as `"H:MM:SS"`, or `"M:SS"` under an hour.
pub fn duration_from_seconds(seconds: u32) -> String {
    let (hours, rest) = (seconds / 3600, seconds % 3600);
    let (minutes, secs) = (rest / 60, rest % 60);
    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{}:{:02}", minutes, secs)
    }
}

fn bad_duration() -> AppError {
    AppError::Validation("Bad duration formatting, use Hour:Min:Sec".to_string())
}

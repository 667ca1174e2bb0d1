/// Strips byte-order marks and zero-width spaces, then collapses interior whitespace.
pub(crate) fn normalize_code(value: &str) -> String {
    let cleaned = value.replace(['\u{feff}', '\u{200b}'], "");
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Non-negative integer cell; anything unparseable reads as 0.
pub(crate) fn parse_count(value: &str) -> u32 {
    let trimmed = value.trim();
    if let Ok(count) = trimmed.parse::<u32>() {
        return count;
    }

    match trimmed.parse::<f64>() {
        Ok(number) if number.is_finite() && number > 0.0 => {
            number.floor().min(f64::from(u32::MAX)) as u32
        }
        _ => 0,
    }
}

pub(crate) fn parse_hours(value: &str) -> f64 {
    match value.trim().parse::<f64>() {
        Ok(hours) if hours.is_finite() && hours > 0.0 => hours,
        _ => 0.0,
    }
}

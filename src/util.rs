/// Round to two decimal places. All percentages and averages are stored
/// and displayed at this precision.
pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// Truncate `s` to at most `max` characters, appending `...` when cut.
pub fn truncate_message(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let cut: String = s.chars().take(max.saturating_sub(3)).collect();
    format!("{cut}...")
}

#[cfg(test)]
#[path = "util_test.rs"]
mod tests;

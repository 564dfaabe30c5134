/// Format an integer count with thousands separators.
///
/// # Examples
///
/// ```
/// use trending_core::formatting::format_count;
///
/// assert_eq!(format_count(0), "0");
/// assert_eq!(format_count(999), "999");
/// assert_eq!(format_count(1_234_567), "1,234,567");
/// ```
pub fn format_count(value: u64) -> String {
    group_thousands(&value.to_string())
}

/// Format a large number compactly with a `K` / `M` / `B` suffix and one
/// decimal place, as used on chart axes.
///
/// # Examples
///
/// ```
/// use trending_core::formatting::format_compact;
///
/// assert_eq!(format_compact(950.0), "950");
/// assert_eq!(format_compact(1_500.0), "1.5K");
/// assert_eq!(format_compact(2_340_000.0), "2.3M");
/// assert_eq!(format_compact(1_000_000_000.0), "1.0B");
/// ```
pub fn format_compact(value: f64) -> String {
    let abs = value.abs();
    let (scaled, suffix) = if abs >= 1e9 {
        (value / 1e9, "B")
    } else if abs >= 1e6 {
        (value / 1e6, "M")
    } else if abs >= 1e3 {
        (value / 1e3, "K")
    } else {
        return format!("{:.0}", value);
    };
    format!("{:.1}{}", scaled, suffix)
}

/// Format a fraction (e.g. an engagement ratio) as a percentage string.
///
/// # Examples
///
/// ```
/// use trending_core::formatting::format_ratio_percent;
///
/// assert_eq!(format_ratio_percent(0.1), "10.00%");
/// assert_eq!(format_ratio_percent(0.0), "0.00%");
/// ```
pub fn format_ratio_percent(ratio: f64) -> String {
    format!("{:.2}%", ratio * 100.0)
}

/// Calculate `(part / whole) * 100`, rounded to `decimal_places`.
///
/// Returns `0.0` if `whole` is zero to avoid division by zero.
pub fn percentage(part: f64, whole: f64, decimal_places: u32) -> f64 {
    if whole == 0.0 {
        return 0.0;
    }
    let raw = (part / whole) * 100.0;
    let factor = 10_f64.powi(decimal_places as i32);
    (raw * factor).round() / factor
}

/// Shorten `text` to at most `max_chars` characters, appending `…` when cut.
pub fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    if max_chars == 0 {
        return String::new();
    }
    let mut out: String = text.chars().take(max_chars - 1).collect();
    out.push('…');
    out
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Insert commas every three digits from the right of an integer string.
fn group_thousands(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + s.len() / 3);
    for (i, ch) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(ch);
    }
    result.chars().rev().collect()
}

// ── Tests ──────────────────────────────────────────────────────────────────────

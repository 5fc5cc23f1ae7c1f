//! Engineering units and SI prefix handling.

use crate::error::{Error, Result};

/// Parse a SPICE-style value with optional SI suffix.
///
/// Supported suffixes:
/// - T (tera, 1e12)
/// - G (giga, 1e9)
/// - MEG (mega, 1e6)
/// - K (kilo, 1e3)
/// - M (milli, 1e-3)
/// - MIL (25.4e-6)
/// - U (micro, 1e-6)
/// - N (nano, 1e-9)
/// - P (pico, 1e-12)
/// - F (femto, 1e-15)
///
/// Letters after the scale factor are unit decoration and are ignored, so
/// `10pF`, `2.5uM` and `300K` all parse. A lone unit that does not start with
/// a scale letter (`5V`, `1Ohm`) also parses as the bare number.
pub fn parse_value(s: &str) -> Option<f64> {
    let s = s.trim().to_ascii_uppercase();

    if let Ok(v) = s.parse::<f64>() {
        return Some(v);
    }

    let num_end = numeric_prefix_len(&s);
    if num_end == 0 {
        return None;
    }

    let (num_str, suffix) = s.split_at(num_end);
    let value: f64 = num_str.parse().ok()?;

    if !suffix.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }

    let multiplier = if suffix.starts_with("MEG") {
        1e6
    } else if suffix.starts_with("MIL") {
        25.4e-6
    } else {
        match suffix.chars().next() {
            Some('T') => 1e12,
            Some('G') => 1e9,
            Some('K') => 1e3,
            Some('M') => 1e-3,
            Some('U') => 1e-6,
            Some('N') => 1e-9,
            Some('P') => 1e-12,
            Some('F') => 1e-15,
            _ => 1.0,
        }
    };

    Some(value * multiplier)
}

/// Like [`parse_value`], reporting the offending text on failure.
pub fn parse_value_strict(s: &str) -> Result<f64> {
    parse_value(s).ok_or_else(|| Error::InvalidValue(s.trim().to_string()))
}

/// Length of the leading floating-point literal in `s`.
///
/// An exponent marker only counts when digits follow it, so `1F` stays a
/// femto suffix while `1E-3` is an exponent.
fn numeric_prefix_len(s: &str) -> usize {
    let bytes = s.as_bytes();
    let mut i = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        i += 1;
    }
    let mantissa_start = i;
    while i < bytes.len() && (bytes[i].is_ascii_digit() || bytes[i] == b'.') {
        i += 1;
    }
    if i == mantissa_start {
        return 0;
    }
    if i < bytes.len() && bytes[i] == b'E' {
        let mut j = i + 1;
        if matches!(bytes.get(j), Some(b'+' | b'-')) {
            j += 1;
        }
        if bytes.get(j).is_some_and(|b| b.is_ascii_digit()) {
            while j < bytes.len() && bytes[j].is_ascii_digit() {
                j += 1;
            }
            i = j;
        }
    }
    i
}

//! String to scalar conversions used by the typed lookups.
//!
//! Every function returns `None` instead of an error; callers fall back to
//! their default.

/// Parse a boolean literal, case-insensitively.
///
/// Accepts `1/0`, `t/f`, `true/false`, `y/n`, `yes/no` and `on/off`.
pub fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "t" | "true" | "y" | "yes" | "on" => Some(true),
        "0" | "f" | "false" | "n" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Parse a signed 64-bit integer.
///
/// Accepts an optional sign followed by decimal digits, a `0x`, `0o` or `0b`
/// prefixed literal, or a leading-zero octal literal (`010` is 8). Single
/// underscores may separate digits (`1_000`), or follow a prefix.
pub fn parse_int(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    let (negative, body) = match raw.as_bytes().first()? {
        b'-' => (true, &raw[1..]),
        b'+' => (false, &raw[1..]),
        _ => (false, raw),
    };

    let (radix, digits, prefixed) = match body.get(..2).map(str::to_ascii_lowercase).as_deref() {
        Some("0x") => (16, &body[2..], true),
        Some("0o") => (8, &body[2..], true),
        Some("0b") => (2, &body[2..], true),
        _ if body.len() > 1 && body.starts_with('0') => (8, &body[1..], true),
        _ => (10, body, false),
    };

    if (digits.starts_with('_') && !prefixed) || digits.ends_with('_') || digits.contains("__") {
        return None;
    }
    let digits: String = digits.chars().filter(|&c| c != '_').collect();

    // from_str_radix would otherwise accept a second sign after the prefix
    if digits.is_empty() || digits.starts_with(['+', '-']) {
        return None;
    }

    let magnitude = u64::from_str_radix(&digits, radix).ok()?;
    if negative {
        0i64.checked_sub_unsigned(magnitude)
    } else {
        i64::try_from(magnitude).ok()
    }
}

/// Parse a decimal floating-point number.
pub fn parse_float(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok()
}

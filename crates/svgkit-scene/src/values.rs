//! Attribute value parsers.
//!
//! All of these are total: bad input gives `None` or an empty list and the
//! caller falls back to the property default.

use svgkit_path::parse_numbers;

pub type Point = (f32, f32);

/// Parse a number.
pub fn parse_number(value: &str) -> Option<f32> {
    value.trim().parse::<f32>().ok().filter(|v| v.is_finite())
}

/// Parse a length, stripping any unit suffix (`px`, `pt`, `em`, `%`, ...).
///
/// Units are removed, not converted: `50%` is `50.0`.
pub fn parse_length(value: &str) -> Option<f32> {
    let value = value.trim();
    let number = value.trim_end_matches(|c: char| c.is_ascii_alphabetic() || c == '%');
    parse_number(number)
}

/// Parse an opacity: a number or a percentage, clamped to [0, 1].
pub fn parse_opacity(value: &str) -> Option<f32> {
    let value = value.trim();
    let v = match value.strip_suffix('%') {
        Some(pct) => parse_number(pct)? / 100.0,
        None => parse_number(value)?,
    };
    Some(v.clamp(0.0, 1.0))
}

/// Parse a number or percentage as a fraction (`50%` and `0.5` are equal).
pub fn parse_fraction(value: &str) -> Option<f32> {
    let value = value.trim();
    match value.strip_suffix('%') {
        Some(pct) => Some(parse_number(pct)? / 100.0),
        None => parse_number(value),
    }
}

/// Split a space/comma separated list.
pub fn split_list(value: &str) -> impl Iterator<Item = &str> {
    value
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
}

/// Parse a dash array. `none`, empty, or any bad entry gives `None`.
pub fn parse_dasharray(value: &str) -> Option<Vec<f32>> {
    let value = value.trim();
    if value.is_empty() || value.eq_ignore_ascii_case("none") {
        return None;
    }
    let dashes = split_list(value)
        .map(parse_length)
        .collect::<Option<Vec<f32>>>()?;
    (!dashes.is_empty() && dashes.iter().all(|d| *d >= 0.0)).then_some(dashes)
}

/// Parse a points list. A trailing odd number is dropped.
pub fn parse_points(value: &str) -> Vec<Point> {
    parse_numbers(value)
        .chunks_exact(2)
        .map(|pair| (pair[0], pair[1]))
        .collect()
}

/// Parse a clock value to whole milliseconds.
///
/// Accepts `ms`, `s`, `min` and `h` suffixes; a bare number is milliseconds.
/// Negative or malformed values give `None`.
pub fn parse_duration_ms(value: &str) -> Option<u64> {
    let value = value.trim();
    let (number, scale) = if let Some(n) = value.strip_suffix("ms") {
        (n, 1.0)
    } else if let Some(n) = value.strip_suffix("min") {
        (n, 60_000.0)
    } else if let Some(n) = value.strip_suffix('s') {
        (n, 1000.0)
    } else if let Some(n) = value.strip_suffix('h') {
        (n, 3_600_000.0)
    } else {
        (value, 1.0)
    };
    let ms = parse_number(number)? * scale;
    (ms >= 0.0).then(|| ms.round() as u64)
}

/// The id inside `url(#id)`, with optional quotes.
pub fn parse_url_ref(value: &str) -> Option<&str> {
    let inner = value.trim().strip_prefix("url(")?.strip_suffix(')')?;
    let inner = inner.trim().trim_matches(|c| c == '"' || c == '\'');
    parse_href(inner)
}

/// The id of a local `#id` reference.
pub fn parse_href(value: &str) -> Option<&str> {
    let id = value.trim().strip_prefix('#')?;
    (!id.is_empty()).then_some(id)
}

use once_cell::sync::Lazy;
use regex::Regex;

// Computed-style lengths come back as "24px", "0px" or keywords like "normal".
static CSS_PX_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(-?\d+(?:\.\d+)?|-?\.\d+)(?:px)?\s*$").unwrap());

/// Parse a computed CSS length in pixels.
///
/// Supported formats:
/// - With unit: "24px", "1.5px"
/// - Bare number: "24"
///
/// Keywords (`normal`), empty strings and other units yield `None`.
///
/// # Examples
/// ```
/// use ecom_domination::utils::parse_css_px;
/// assert_eq!(parse_css_px("24px"), Some(24.0));
/// assert_eq!(parse_css_px("normal"), None);
/// ```
pub fn parse_css_px(input: &str) -> Option<f64> {
    let captures = CSS_PX_REGEX.captures(input)?;
    let value: f64 = captures[1].parse().ok()?;
    value.is_finite().then_some(value)
}

/// Like [`parse_css_px`] but falls back to `default` for unusable values.
pub fn css_px_or(input: &str, default: f64) -> f64 {
    parse_css_px(input).unwrap_or(default)
}

/// Pick the wheel axis the user actually moved along.
pub fn dominant_wheel_delta(delta_x: f64, delta_y: f64) -> f64 {
    if delta_x.abs() > delta_y.abs() {
        delta_x
    } else {
        delta_y
    }
}

/// The items followed by a second copy, for CSS marquees that loop by
/// translating exactly half their width.
pub fn doubled<T: Clone>(items: &[T]) -> Vec<T> {
    items.iter().chain(items.iter()).cloned().collect()
}

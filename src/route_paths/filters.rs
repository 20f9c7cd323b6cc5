use regex::Regex;
use thiserror::Error;

fn segment_pattern() -> &'static Regex {
    use std::sync::OnceLock;

    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[^/\s?#]+$").expect("invalid segment regex"))
}

/// Reasons a `urlPath` value cannot be used as a single path segment.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SegmentError {
    /// Nothing remained after trimming slashes.
    #[error("url segment is empty")]
    Empty,
    /// The value spans several segments.
    #[error("url segment `{0}` contains `/`")]
    Nested(String),
    /// Whitespace, `?` or `#` would break the resolved URL.
    #[error("url segment `{0}` contains whitespace, `?` or `#`")]
    InvalidCharacters(String),
}

/// Validate a raw `urlPath` value and return the trimmed segment.
///
/// Surrounding slashes are tolerated since authors occasionally write `/html/` for `html`.
pub fn validate_segment(raw: &str) -> Result<String, SegmentError> {
    let trimmed = raw.trim_matches('/');
    if trimmed.is_empty() {
        return Err(SegmentError::Empty);
    }
    if trimmed.contains('/') {
        return Err(SegmentError::Nested(trimmed.to_string()));
    }
    if !segment_pattern().is_match(trimmed) {
        return Err(SegmentError::InvalidCharacters(trimmed.to_string()));
    }
    Ok(trimmed.to_string())
}

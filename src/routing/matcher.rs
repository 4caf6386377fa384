//! Path pattern matching.
//!
//! # Responsibilities
//! - Parse route patterns into literal and `:name` parameter segments
//! - Match request paths segment by segment (case-sensitive)
//! - Capture parameter values into a per-request map
//!
//! # Design Decisions
//! - Segment counts must be equal; a trailing slash is a different path
//! - Parameter segments only match non-empty values
//! - No wildcard or catch-all segments

use std::collections::HashMap;

/// Parameter values captured from a matched path, keyed by parameter name.
pub type PathParams = HashMap<String, String>;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Param(String),
}

/// A compiled path pattern such as `/protected/users/:id`.
#[derive(Debug, Clone)]
pub struct PathPattern {
    raw: String,
    segments: Vec<Segment>,
}

impl PathPattern {
    /// Parse a pattern. Segments prefixed with `:` become named parameters.
    pub fn parse(pattern: &str) -> Self {
        let segments = pattern
            .split('/')
            .map(|segment| match segment.strip_prefix(':') {
                Some(name) => Segment::Param(name.to_string()),
                None => Segment::Literal(segment.to_string()),
            })
            .collect();

        Self {
            raw: pattern.to_string(),
            segments,
        }
    }

    /// Match a request path against this pattern, capturing parameters.
    ///
    /// Returns `None` unless every literal segment compares equal and every
    /// parameter segment lines up with a non-empty path segment.
    pub fn matches(&self, path: &str) -> Option<PathParams> {
        let parts: Vec<&str> = path.split('/').collect();
        if parts.len() != self.segments.len() {
            return None;
        }

        let mut params = PathParams::new();
        for (segment, part) in self.segments.iter().zip(&parts) {
            match segment {
                Segment::Literal(literal) => {
                    if literal != part {
                        return None;
                    }
                }
                Segment::Param(name) => {
                    if part.is_empty() {
                        return None;
                    }
                    params.insert(name.clone(), (*part).to_string());
                }
            }
        }

        Some(params)
    }

    /// The pattern with parameter names erased, e.g. `/protected/users/:`.
    ///
    /// Two patterns with the same shape match exactly the same paths, so
    /// shape equality is what route registration must reject.
    pub fn shape(&self) -> String {
        self.segments
            .iter()
            .map(|segment| match segment {
                Segment::Literal(literal) => literal.as_str(),
                Segment::Param(_) => ":",
            })
            .collect::<Vec<_>>()
            .join("/")
    }

    /// The pattern as registered.
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_match() {
        let pattern = PathPattern::parse("/request-info");
        assert!(pattern.matches("/request-info").is_some());
        assert!(pattern.matches("/request-info/extra").is_none());
        assert!(pattern.matches("/other").is_none());
    }

    #[test]
    fn test_root_match() {
        let pattern = PathPattern::parse("/");
        assert!(pattern.matches("/").is_some());
        assert!(pattern.matches("/echo").is_none());
    }

    #[test]
    fn test_literal_match_is_case_sensitive() {
        let pattern = PathPattern::parse("/echo");
        assert!(pattern.matches("/Echo").is_none());
    }

    #[test]
    fn test_trailing_slash_is_not_normalized() {
        let pattern = PathPattern::parse("/echo");
        assert!(pattern.matches("/echo/").is_none());
    }

    #[test]
    fn test_param_capture() {
        let pattern = PathPattern::parse("/protected/users/:id");
        let params = pattern.matches("/protected/users/admin").unwrap();
        assert_eq!(params.get("id").map(String::as_str), Some("admin"));
    }

    #[test]
    fn test_param_requires_non_empty_segment() {
        let pattern = PathPattern::parse("/status/:code");
        assert!(pattern.matches("/status/").is_none());
        assert!(pattern.matches("/status").is_none());
    }

    #[test]
    fn test_multiple_params() {
        let pattern = PathPattern::parse("/a/:first/b/:second");
        let params = pattern.matches("/a/1/b/2").unwrap();
        assert_eq!(params.get("first").map(String::as_str), Some("1"));
        assert_eq!(params.get("second").map(String::as_str), Some("2"));
    }

    #[test]
    fn test_shape_erases_param_names() {
        let a = PathPattern::parse("/protected/users/:id");
        let b = PathPattern::parse("/protected/users/:name");
        assert_eq!(a.shape(), b.shape());

        let c = PathPattern::parse("/protected/users");
        assert_ne!(a.shape(), c.shape());
    }
}

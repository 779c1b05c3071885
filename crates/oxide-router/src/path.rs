//! Path pattern matching.

use regex::Regex;

use crate::error::{Result, RouterError};
use crate::request::Params;

/// A segment in a path pattern.
#[derive(Debug, Clone)]
pub enum PathSegment {
    /// A literal string segment.
    Literal(String),
    /// A parameter segment (e.g., {id}).
    Param(String),
    /// A wildcard segment (matches remainder of path).
    Wildcard(String),
}

/// A compiled path pattern for matching URLs.
#[derive(Debug, Clone)]
pub struct PathPattern {
    /// The original pattern string.
    pattern: String,
    /// Parsed segments.
    segments: Vec<PathSegment>,
    /// Compiled regex for matching.
    regex: Regex,
    /// Parameter names in order.
    param_names: Vec<String>,
}

impl PathPattern {
    /// Parses a path pattern string.
    ///
    /// Pattern syntax:
    /// - `/products` - Literal path
    /// - `/products/{id}` - Path with parameter
    /// - `/files/{*path}` - Wildcard parameter (matches rest of path)
    ///
    /// # Example
    ///
    /// ```
    /// use oxide_router::PathPattern;
    ///
    /// let pattern = PathPattern::parse("/posts/{id}/comments/{comment_id}").unwrap();
    /// let params = pattern.match_path("/posts/123/comments/456").unwrap();
    /// assert_eq!(params.get("id"), Some("123"));
    /// assert_eq!(params.get("comment_id"), Some("456"));
    /// ```
    pub fn parse(pattern: &str) -> Result<Self> {
        let mut segments = Vec::new();
        let mut param_names = Vec::new();
        let mut regex_str = String::from("^");

        for part in pattern.split('/').filter(|s| !s.is_empty()) {
            regex_str.push('/');

            if let Some(param) = part.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
                let (name, wildcard) = param
                    .strip_prefix('*')
                    .map_or((param, false), |name| (name, true));
                if name.is_empty() {
                    return Err(RouterError::InvalidPattern(format!(
                        "empty parameter name in {pattern}"
                    )));
                }
                param_names.push(name.to_string());
                if wildcard {
                    segments.push(PathSegment::Wildcard(name.to_string()));
                    regex_str.push_str("(.+)");
                } else {
                    segments.push(PathSegment::Param(name.to_string()));
                    regex_str.push_str("([^/]+)");
                }
            } else {
                segments.push(PathSegment::Literal(part.to_string()));
                regex_str.push_str(&regex::escape(part));
            }
        }

        regex_str.push_str("/?$");

        let regex = Regex::new(&regex_str)
            .map_err(|e| RouterError::InvalidPattern(format!("{pattern}: {e}")))?;

        Ok(Self {
            pattern: pattern.to_string(),
            segments,
            regex,
            param_names,
        })
    }

    /// Attempts to match a path against this pattern.
    ///
    /// Returns extracted parameters if the path matches.
    #[must_use]
    pub fn match_path(&self, path: &str) -> Option<Params> {
        let caps = self.regex.captures(path)?;

        let mut params = Params::new();

        for (i, name) in self.param_names.iter().enumerate() {
            if let Some(value) = caps.get(i + 1) {
                params.insert(name.clone(), value.as_str());
            }
        }

        Some(params)
    }

    /// Returns the original pattern string.
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Returns the parameter names.
    #[must_use]
    pub fn param_names(&self) -> &[String] {
        &self.param_names
    }

    /// Generates a path from parameters.
    ///
    /// On failure returns the name of the first parameter that was missing.
    pub fn reverse(&self, params: &Params) -> std::result::Result<String, &str> {
        let mut path = String::new();

        for segment in &self.segments {
            path.push('/');
            match segment {
                PathSegment::Literal(s) => path.push_str(s),
                PathSegment::Param(name) | PathSegment::Wildcard(name) => {
                    path.push_str(params.get(name).ok_or(name.as_str())?);
                }
            }
        }

        if path.is_empty() {
            path.push('/');
        }

        Ok(path)
    }
}

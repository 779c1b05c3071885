//! Request environment and parameter sets.

use std::collections::HashMap;

/// Parameters recognized from a path or supplied for URL generation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    params: HashMap<String, String>,
}

impl Params {
    /// Creates new empty params.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a parameter, replacing any previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.params.insert(key.into(), value.into());
    }

    /// Builder variant of [`Params::insert`].
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Gets a parameter value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// Removes a parameter and returns its value.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.params.remove(key)
    }

    /// Returns whether the parameter is present.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.params.contains_key(key)
    }

    /// Parses a parameter as a specific type.
    #[must_use]
    pub fn parse<T: std::str::FromStr>(&self, key: &str) -> Option<T> {
        self.get(key).and_then(|v| v.parse().ok())
    }

    /// Merges `other` into `self`. Values from `other` win on conflict.
    pub fn merge(&mut self, other: &Self) {
        for (k, v) in &other.params {
            self.params.insert(k.clone(), v.clone());
        }
    }

    /// Returns the number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Returns whether there are no parameters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            params: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// The request environment handed to the router for recognition.
///
/// Only `path` takes part in routing. Filters may inspect the rest, but they
/// never receive it mutably.
#[derive(Debug, Clone, Default)]
pub struct Request {
    /// Request path, without scheme or host.
    pub path: String,
    /// Query string parameters.
    pub query: HashMap<String, String>,
    /// Request headers.
    pub headers: HashMap<String, String>,
}

impl Request {
    /// Creates a new request for a path.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    /// Sets a header.
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Sets a query parameter.
    #[must_use]
    pub fn query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    /// Gets a header value (case-insensitive).
    #[must_use]
    pub fn get_header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }
}

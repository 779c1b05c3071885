//! Ordered composition of filters around recognition and generation.

use std::fmt;
use std::sync::Arc;

use crate::error::Result;
use crate::filter::{Filter, GenerateNext, Generated, RecognizeNext};
use crate::request::{Params, Request};

/// An ordered sequence of filters.
///
/// Filters run in registration order on the way in and in reverse order on
/// the way out. The chain is immutable once built, so a single instance can
/// serve concurrent requests. Failures from filters or the terminal operation
/// propagate unchanged.
#[derive(Clone, Default)]
pub struct FilterChain {
    filters: Vec<Arc<dyn Filter>>,
}

impl FilterChain {
    /// Creates an empty chain.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a filter.
    #[must_use]
    pub fn filter(self, filter: impl Filter + 'static) -> Self {
        self.shared_filter(Arc::new(filter))
    }

    /// Appends a filter that is shared with other owners.
    #[must_use]
    pub fn shared_filter(mut self, filter: Arc<dyn Filter>) -> Self {
        self.filters.push(filter);
        self
    }

    /// Returns the number of filters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    /// Returns whether the chain has no filters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Returns the filter names in registration order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.filters.iter().map(|f| f.name()).collect()
    }

    /// Runs `around_recognize` of every filter around `terminal`.
    ///
    /// `terminal` receives the path as left by the innermost filter.
    pub fn run_recognize<F>(&self, path: String, request: &Request, terminal: F) -> Result<Params>
    where
        F: Fn(&str, &Request) -> Result<Params>,
    {
        RecognizeNext::new(&self.filters, request, &terminal).run(path)
    }

    /// Runs `around_generate` of every filter around `terminal`.
    ///
    /// `terminal` receives the options as left by the innermost filter.
    pub fn run_generate<F>(&self, options: Params, terminal: F) -> Result<Generated>
    where
        F: Fn(Params) -> Result<Generated>,
    {
        GenerateNext::new(&self.filters, &terminal).run(options)
    }
}

impl<F: Filter + 'static> FromIterator<F> for FilterChain {
    fn from_iter<I: IntoIterator<Item = F>>(iter: I) -> Self {
        Self {
            filters: iter
                .into_iter()
                .map(|f| Arc::new(f) as Arc<dyn Filter>)
                .collect(),
        }
    }
}

impl fmt::Debug for FilterChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterChain")
            .field("filters", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::error::RouterError;

    /// Tags the path on the way in and the URL on the way out.
    struct Tag(&'static str);

    impl Filter for Tag {
        fn name(&self) -> &str {
            self.0
        }

        fn around_recognize(
            &self,
            path: String,
            _request: &Request,
            next: RecognizeNext<'_>,
        ) -> Result<Params> {
            let mut params = next.run(format!("{path}>{}", self.0))?;
            let seen = params.get("trail").unwrap_or_default().to_string();
            params.insert("trail", format!("{seen}<{}", self.0));
            Ok(params)
        }

        fn around_generate(&self, options: Params, next: GenerateNext<'_>) -> Result<Generated> {
            let generated = next.run(options)?;
            Ok(generated.map_url(|url| format!("{url}+{}", self.0)))
        }
    }

    struct ShortCircuit;

    impl Filter for ShortCircuit {
        fn name(&self) -> &str {
            "short"
        }

        fn around_recognize(
            &self,
            _path: String,
            _request: &Request,
            _next: RecognizeNext<'_>,
        ) -> Result<Params> {
            Ok(Params::new().with("short", "yes"))
        }
    }

    struct Twice;

    impl Filter for Twice {
        fn name(&self) -> &str {
            "twice"
        }

        fn around_generate(&self, options: Params, next: GenerateNext<'_>) -> Result<Generated> {
            next.run(options.clone())?;
            next.run(options)
        }
    }

    struct Failing;

    impl Filter for Failing {
        fn name(&self) -> &str {
            "failing"
        }

        fn around_recognize(
            &self,
            _path: String,
            _request: &Request,
            _next: RecognizeNext<'_>,
        ) -> Result<Params> {
            Err(RouterError::Filter {
                filter: "failing".into(),
                message: "boom".into(),
            })
        }
    }

    fn echo_path(path: &str, _request: &Request) -> Result<Params> {
        Ok(Params::new().with("path", path))
    }

    #[test]
    fn test_empty_chain_calls_terminal() {
        let chain = FilterChain::new();
        let request = Request::new("/products");
        let params = chain
            .run_recognize(request.path.clone(), &request, echo_path)
            .unwrap();
        assert_eq!(params.get("path"), Some("/products"));
        assert!(chain.is_empty());
    }

    #[test]
    fn test_recognize_order() {
        let chain = FilterChain::new().filter(Tag("a")).filter(Tag("b"));
        let request = Request::new("/p");
        let params = chain
            .run_recognize(request.path.clone(), &request, echo_path)
            .unwrap();
        // a sees the raw path first, b sees it last before the router.
        assert_eq!(params.get("path"), Some("/p>a>b"));
        // On the way out b finishes before a.
        assert_eq!(params.get("trail"), Some("<b<a"));
    }

    #[test]
    fn test_generate_order() {
        let chain: FilterChain = [Tag("a"), Tag("b")].into_iter().collect();
        let generated = chain
            .run_generate(Params::new(), |_| Ok(Generated::Url("/p".into())))
            .unwrap();
        assert_eq!(generated.url(), "/p+b+a");
        assert_eq!(chain.names(), vec!["a", "b"]);
    }

    #[test]
    fn test_short_circuit_skips_terminal() {
        let chain = FilterChain::new().filter(ShortCircuit).filter(Tag("b"));
        let calls = AtomicUsize::new(0);
        let request = Request::new("/p");
        let params = chain
            .run_recognize(request.path.clone(), &request, |path, _| {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(Params::new().with("path", path))
            })
            .unwrap();
        assert_eq!(params.get("short"), Some("yes"));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_continuation_may_run_twice() {
        let chain = FilterChain::new().filter(Twice);
        let calls = AtomicUsize::new(0);
        let generated = chain
            .run_generate(Params::new(), |_| {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(Generated::Url("/p".into()))
            })
            .unwrap();
        assert_eq!(generated.url(), "/p");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_errors_propagate_unchanged() {
        let chain = FilterChain::new().filter(Tag("a")).filter(Failing);
        let request = Request::new("/p");
        let err = chain
            .run_recognize(request.path.clone(), &request, echo_path)
            .unwrap_err();
        assert!(matches!(
            err,
            RouterError::Filter { ref filter, .. } if filter == "failing"
        ));

        let err = FilterChain::new()
            .filter(Tag("a"))
            .run_generate(Params::new(), |_| {
                Err(RouterError::RouteNotFound("x".into()))
            })
            .unwrap_err();
        assert!(matches!(err, RouterError::RouteNotFound(_)));
    }

    #[test]
    fn test_chain_debug_lists_names() {
        let chain = FilterChain::new().filter(Tag("a")).filter(Twice);
        assert_eq!(
            format!("{chain:?}"),
            r#"FilterChain { filters: ["a", "twice"] }"#
        );
    }
}

//! Main router implementation.

use std::cell::RefCell;
use std::collections::HashMap;

use tracing::debug;

use crate::chain::FilterChain;
use crate::error::{Result, RouterError};
use crate::filter::{Filter, Generated};
use crate::path::PathPattern;
use crate::request::{Params, Request};

/// A single route definition.
#[derive(Debug, Clone)]
pub struct Route {
    /// Optional route name for reverse URL lookup.
    pub name: Option<String>,
    /// Path pattern.
    pub pattern: PathPattern,
}

impl Route {
    /// Creates a new route.
    pub fn new(pattern: &str) -> Result<Self> {
        Ok(Self {
            name: None,
            pattern: PathPattern::parse(pattern)?,
        })
    }

    /// Sets the route name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// A route that matched a recognized path.
#[derive(Debug, Clone)]
pub struct RouteMatch<'r> {
    /// The matched route.
    pub route: &'r Route,
    /// Parameters from the path pattern merged with those found by filters.
    pub params: Params,
}

/// Routes paths to route definitions and generates paths for named routes.
///
/// Recognition and generation both run through the router's [`FilterChain`],
/// so filters can rewrite paths without the router knowing about them.
#[derive(Debug, Default)]
pub struct Router {
    /// Registered routes, in match order.
    routes: Vec<Route>,
    /// Named routes for reverse URL lookup, as indexes into `routes`.
    named_routes: HashMap<String, usize>,
    /// Filters wrapping recognition and generation.
    filters: FilterChain,
    /// Scheme and host prepended by [`Router::url_for`].
    base_url: Option<String>,
}

impl Router {
    /// Creates a new empty router.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a router that runs `filters` around every call.
    #[must_use]
    pub fn with_filters(filters: FilterChain) -> Self {
        Self {
            filters,
            ..Self::default()
        }
    }

    /// Appends a filter to the router's chain.
    #[must_use]
    pub fn filter(mut self, filter: impl Filter + 'static) -> Self {
        self.filters = self.filters.filter(filter);
        self
    }

    /// Sets the scheme and host used by [`Router::url_for`].
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        self.base_url = Some(base_url.trim_end_matches('/').to_string());
        self
    }

    /// Adds an anonymous route.
    pub fn route(mut self, pattern: &str) -> Result<Self> {
        self.routes.push(Route::new(pattern)?);
        Ok(self)
    }

    /// Adds a named route.
    pub fn named_route(mut self, name: &str, pattern: &str) -> Result<Self> {
        let route = Route::new(pattern)?.name(name);
        let index = self.routes.len();
        self.named_routes.insert(name.to_string(), index);
        self.routes.push(route);
        Ok(self)
    }

    /// Returns the filter chain.
    #[must_use]
    pub fn filter_chain(&self) -> &FilterChain {
        &self.filters
    }

    /// Returns the registered routes.
    #[must_use]
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Recognizes the request path and returns every matching route.
    ///
    /// Filters see the path first; routes are matched against the path the
    /// innermost filter handed on. Parameters found by filters are merged into
    /// each match and win on conflict. `request.path` is only replaced while
    /// routes are matched and is restored before returning.
    ///
    /// The chain's terminal only records the filtered path. Matching runs after
    /// the chain returns, so a filter never sees route matches through its
    /// continuation.
    pub fn recognize(&self, request: &mut Request) -> Result<Vec<RouteMatch<'_>>> {
        let filtered = RefCell::new(None);

        let terminal = |path: &str, _: &Request| -> Result<Params> {
            *filtered.borrow_mut() = Some(path.to_string());
            Ok(Params::new())
        };
        let filter_params = self
            .filters
            .run_recognize(request.path.clone(), request, terminal)?;

        let filtered = filtered.into_inner().unwrap_or_else(|| request.path.clone());
        let original = std::mem::replace(&mut request.path, filtered);
        let matches = self.find_routes(&request.path, &filter_params);
        debug!(
            path = %original,
            filtered = %request.path,
            matches = matches.len(),
            "recognized path"
        );
        request.path = original;

        Ok(matches)
    }

    /// Recognizes `path` and returns the first matching route.
    pub fn recognize_path(&self, path: &str) -> Result<RouteMatch<'_>> {
        let mut request = Request::new(path);
        self.recognize(&mut request)?
            .into_iter()
            .next()
            .ok_or_else(|| RouterError::NotFound {
                path: path.to_string(),
            })
    }

    /// Generates a path for a named route.
    ///
    /// Filters may consume options (such as `locale`) before the route's
    /// pattern is filled and rewrite the result afterwards. Options the
    /// pattern does not use are returned alongside the path.
    pub fn generate(&self, name: &str, options: Params) -> Result<Generated> {
        self.generate_with_base(name, options, None)
    }

    /// Generates a path for a named route and drops any leftover options.
    pub fn path_for(&self, name: &str, options: Params) -> Result<String> {
        self.generate(name, options).map(Generated::into_url)
    }

    /// Generates a URL for a named route, absolute when a base URL is set.
    pub fn url_for(&self, name: &str, options: Params) -> Result<String> {
        self.generate_with_base(name, options, self.base_url.as_deref())
            .map(Generated::into_url)
    }

    fn generate_with_base(
        &self,
        name: &str,
        options: Params,
        base_url: Option<&str>,
    ) -> Result<Generated> {
        let route = self
            .named_routes
            .get(name)
            .map(|&i| &self.routes[i])
            .ok_or_else(|| RouterError::RouteNotFound(name.to_string()))?;

        self.filters.run_generate(options, |mut options| {
            let missing = |param: &str| RouterError::MissingParameter {
                route: name.to_string(),
                param: param.to_string(),
            };
            let path = route.pattern.reverse(&options).map_err(missing)?;
            for param in route.pattern.param_names() {
                options.remove(param);
            }
            let url = match base_url {
                Some(base) => format!("{base}{path}"),
                None => path,
            };
            Ok(Generated::WithExtra(url, options))
        })
    }

    /// Finds all routes matching `path`.
    fn find_routes(&self, path: &str, filter_params: &Params) -> Vec<RouteMatch<'_>> {
        let path = if path.is_empty() { "/" } else { path };

        self.routes
            .iter()
            .filter_map(|route| {
                route.pattern.match_path(path).map(|mut params| {
                    params.merge(filter_params);
                    RouteMatch { route, params }
                })
            })
            .collect()
    }
}

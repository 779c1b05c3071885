#![allow(dead_code)]

use std::sync::Arc;

use oxide_router::{FilterChain, Params, Router};
use oxide_routing_filter::{
    LocaleConfig, LocaleFilter, PaginationConfig, PaginationFilter, StaticCatalog,
};

/// Routes shared by the integration tests.
pub fn with_routes(router: Router) -> Router {
    router
        .named_route("root", "/")
        .and_then(|r| r.named_route("products", "/products"))
        .and_then(|r| r.named_route("product", "/products/{id}"))
        .unwrap_or_else(|e| panic!("Failed to build routes: {e}"))
}

/// Catalog with `en` (default) and `de`.
pub fn catalog() -> Arc<StaticCatalog> {
    Arc::new(StaticCatalog::new(["en", "de"], "en"))
}

/// A locale-filtered router plus handles to reconfigure it.
pub struct Fixture {
    pub router: Router,
    pub locale: Arc<LocaleFilter>,
    pub catalog: Arc<StaticCatalog>,
}

pub fn locale_fixture(config: &LocaleConfig) -> Fixture {
    let catalog = catalog();
    let locale = LocaleFilter::new(config, catalog.clone())
        .unwrap_or_else(|e| panic!("Failed to build locale filter: {e}"));
    let locale = Arc::new(locale);
    let chain = FilterChain::new().shared_filter(locale.clone());
    let router = with_routes(Router::with_filters(chain));
    Fixture {
        router,
        locale,
        catalog,
    }
}

pub fn pagination() -> PaginationFilter {
    PaginationFilter::new(&PaginationConfig::default())
        .unwrap_or_else(|e| panic!("Failed to build pagination filter: {e}"))
}

pub fn params(pairs: &[(&str, &str)]) -> Params {
    pairs.iter().copied().collect()
}

/// Generates a path for the named route, failing the test on error.
pub fn path_for(router: &Router, name: &str, pairs: &[(&str, &str)]) -> String {
    router
        .path_for(name, params(pairs))
        .unwrap_or_else(|e| panic!("Failed to generate {name}: {e}"))
}

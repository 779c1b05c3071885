//! # oxide-routing-filter
//!
//! Filters for [`oxide_router`] that move parameters in and out of the path.
//!
//! - [`LocaleFilter`]: `/de/products` is routed as `/products` with `locale = "de"`,
//!   and generated URLs get the requested locale as their first segment.
//! - [`PaginationFilter`]: `/products/page/2` is routed as `/products` with
//!   `page = "2"`, and generated URLs get `/page/<n>` appended.
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use oxide_router::{Params, Router};
//! use oxide_routing_filter::{build_chain, RoutingConfig, StaticCatalog};
//!
//! let catalog = Arc::new(StaticCatalog::new(["en", "de"], "en"));
//! let config = RoutingConfig::from_json(r#"{ "filters": ["locale", "pagination"] }"#)?;
//! let router = Router::with_filters(build_chain(&config, catalog)?)
//!     .named_route("product", "/products/{id}")?;
//!
//! let matched = router.recognize_path("/de/products/1")?;
//! assert_eq!(matched.params.get("locale"), Some("de"));
//! assert_eq!(matched.params.get("id"), Some("1"));
//!
//! let path = router.path_for("product", Params::new().with("id", "1").with("locale", "de"))?;
//! assert_eq!(path, "/de/products/1");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod catalog;
mod config;
mod error;
mod locale;
mod pagination;

pub use catalog::{LocaleCatalog, StaticCatalog};
pub use config::{build_chain, LocaleConfig, PaginationConfig, RoutingConfig};
pub use error::{FilterError, Result};
pub use locale::{LocaleFilter, LOCALE_PARAM};
pub use pagination::PaginationFilter;

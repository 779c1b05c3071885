//! # oxide-router
//!
//! A lightweight URL router whose recognition and generation run through a
//! chain of filters.
//!
//! This crate provides:
//! - Path pattern matching with parameters
//! - Named routes for reverse URL lookup
//! - The [`Filter`] protocol and the ordered [`FilterChain`]
//!
//! ## Quick Start
//!
//! ```
//! use oxide_router::{Params, Router};
//!
//! let router = Router::new()
//!     .named_route("product", "/products/{id}")?
//!     .named_route("products", "/products")?;
//!
//! let matched = router.recognize_path("/products/123")?;
//! assert_eq!(matched.params.get("id"), Some("123"));
//!
//! let path = router.path_for("product", Params::new().with("id", "123"))?;
//! assert_eq!(path, "/products/123");
//! # Ok::<(), oxide_router::RouterError>(())
//! ```
//!
//! ## Filters
//!
//! A filter wraps both directions. On recognition it receives the path and a
//! continuation, and may hand a rewritten path on and add parameters to the
//! result. On generation it receives the options, and may consume some of
//! them and rewrite the generated URL.
//!
//! ```ignore
//! let router = Router::with_filters(FilterChain::new().filter(locale).filter(pagination))
//!     .named_route("products", "/products")?;
//! ```
//!
//! Filters registered first see the raw path first on recognition and see the
//! generated URL last on generation.

mod chain;
mod error;
mod filter;
mod path;
mod request;
mod router;

pub use chain::FilterChain;
pub use error::{Result, RouterError};
pub use filter::{
    Filter, GenerateNext, GenerateTerminal, Generated, Hook, RecognizeNext, RecognizeTerminal,
};
pub use path::{PathPattern, PathSegment};
pub use request::{Params, Request};
pub use router::{Route, RouteMatch, Router};

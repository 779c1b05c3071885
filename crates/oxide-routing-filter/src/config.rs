//! Filter configuration.
//!
//! A [`RoutingConfig`] names the active filters in order and carries one
//! section per filter. It is read once at startup:
//!
//! ```json
//! {
//!     "filters": ["locale", "pagination"],
//!     "locale": { "include_default_locale": false, "locales": ["en", "de"] },
//!     "pagination": { "segment": "seite" }
//! }
//! ```

use std::sync::Arc;

use serde::Deserialize;

use oxide_router::FilterChain;

use crate::catalog::LocaleCatalog;
use crate::error::{FilterError, Result};
use crate::locale::LocaleFilter;
use crate::pagination::PaginationFilter;

/// Configuration for the whole filter chain.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RoutingConfig {
    /// Active filter names, in registration order.
    pub filters: Vec<String>,
    /// Settings for the `locale` filter.
    pub locale: LocaleConfig,
    /// Settings for the `pagination` filter.
    pub pagination: PaginationConfig,
}

impl RoutingConfig {
    /// Parses a JSON configuration document.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Appends a filter name.
    #[must_use]
    pub fn filter(mut self, name: impl Into<String>) -> Self {
        self.filters.push(name.into());
        self
    }

    /// Sets the locale section.
    #[must_use]
    pub fn locale(mut self, locale: LocaleConfig) -> Self {
        self.locale = locale;
        self
    }

    /// Sets the pagination section.
    #[must_use]
    pub fn pagination(mut self, pagination: PaginationConfig) -> Self {
        self.pagination = pagination;
        self
    }
}

/// Configuration for [`LocaleFilter`].
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LocaleConfig {
    /// Prefix generated URLs with the default locale too.
    pub include_default_locale: bool,
    /// Recognized locales. `None` uses the catalog's available locales.
    pub locales: Option<Vec<String>>,
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            include_default_locale: true,
            locales: None,
        }
    }
}

impl LocaleConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether the default locale is prefixed.
    #[must_use]
    pub fn include_default_locale(mut self, include: bool) -> Self {
        self.include_default_locale = include;
        self
    }

    /// Restricts the recognized locales.
    #[must_use]
    pub fn locales<I, S>(mut self, locales: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.locales = Some(locales.into_iter().map(Into::into).collect());
        self
    }
}

/// Configuration for [`PaginationFilter`].
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PaginationConfig {
    /// Parameter the page number is exposed as.
    pub param: String,
    /// Path segment preceding the page number.
    pub segment: String,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            param: "page".to_string(),
            segment: "page".to_string(),
        }
    }
}

/// Builds the filter chain named by `config`.
///
/// Filter names resolve to filters in the order they are listed.
pub fn build_chain(config: &RoutingConfig, catalog: Arc<dyn LocaleCatalog>) -> Result<FilterChain> {
    let mut chain = FilterChain::new();

    for name in &config.filters {
        chain = match name.as_str() {
            LocaleFilter::NAME => {
                let locale = LocaleFilter::new(&config.locale, Arc::clone(&catalog))?;
                chain.filter(locale)
            }
            PaginationFilter::NAME => chain.filter(PaginationFilter::new(&config.pagination)?),
            other => return Err(FilterError::UnknownFilter(other.to_string())),
        };
    }

    Ok(chain)
}

//! Locale filter.
//!
//! Recognizes a leading locale segment and exposes it as the `locale`
//! parameter, and prefixes generated URLs with the requested locale.
//!
//! ```text
//! incoming path:  /de/products/1
//! routed path:    /products/1
//! params:         locale = "de", id = "1"
//! ```
//!
//! On generation the `locale` option is consumed. When it is absent the
//! catalog's current locale is used. Locales outside the configured set are
//! ignored and the URL is left unprefixed.

use std::sync::{Arc, PoisonError, RwLock};

use regex::{Captures, Regex};
use tracing::debug;

use oxide_router::{Filter, GenerateNext, Generated, Params, RecognizeNext, Request};

use crate::catalog::LocaleCatalog;
use crate::config::LocaleConfig;
use crate::error::{FilterError, Result};

/// Parameter the recognized locale is exposed as, and the option read on generation.
pub const LOCALE_PARAM: &str = "locale";

/// Settings derived from a [`LocaleConfig`]. Replaced as a whole on reconfiguration.
#[derive(Debug, Clone)]
struct LocaleSettings {
    locales: Vec<String>,
    pattern: Regex,
    include_default_locale: bool,
}

impl LocaleSettings {
    fn build(config: &LocaleConfig, catalog: &dyn LocaleCatalog) -> Result<Self> {
        let locales = config
            .locales
            .clone()
            .unwrap_or_else(|| catalog.available_locales());

        if locales.is_empty() {
            return Err(FilterError::EmptyLocaleSet);
        }
        if let Some(bad) = locales.iter().find(|l| l.is_empty() || l.contains('/')) {
            return Err(FilterError::InvalidLocale(bad.clone()));
        }

        let alternatives = locales
            .iter()
            .map(|l| regex::escape(l))
            .collect::<Vec<_>>()
            .join("|");
        let pattern = Regex::new(&format!("^/({alternatives})(?:/|$)"))?;

        Ok(Self {
            locales,
            pattern,
            include_default_locale: config.include_default_locale,
        })
    }

    /// Splits a leading locale segment off `path`.
    fn extract<'p>(&self, path: &'p str) -> Option<(&'p str, &'p str)> {
        let locale = self.pattern.captures(path)?.get(1)?;
        Some((locale.as_str(), &path[locale.end()..]))
    }

    fn is_valid(&self, locale: &str) -> bool {
        self.locales.iter().any(|l| l == locale)
    }
}

/// Filter that maps `/<locale>/...` paths to a `locale` parameter and back.
///
/// Configuration is fixed at construction. [`LocaleFilter::reconfigure`] swaps
/// it atomically; calls in flight keep the settings they started with.
pub struct LocaleFilter {
    catalog: Arc<dyn LocaleCatalog>,
    settings: RwLock<Arc<LocaleSettings>>,
    url_pattern: Regex,
}

impl LocaleFilter {
    /// Name the filter is registered under.
    pub const NAME: &'static str = "locale";

    /// Creates a locale filter.
    ///
    /// Fails when the locale set is empty or contains identifiers that
    /// cannot form a path segment.
    pub fn new(config: &LocaleConfig, catalog: Arc<dyn LocaleCatalog>) -> Result<Self> {
        let settings = LocaleSettings::build(config, catalog.as_ref())?;
        debug!(
            locales = ?settings.locales,
            include_default_locale = settings.include_default_locale,
            "locale filter configured"
        );

        Ok(Self {
            catalog,
            settings: RwLock::new(Arc::new(settings)),
            url_pattern: Regex::new(r"(?s)^(https?://[^/]*)?(.*)$")?,
        })
    }

    /// Creates a locale filter with the default configuration.
    pub fn from_catalog(catalog: Arc<dyn LocaleCatalog>) -> Result<Self> {
        Self::new(&LocaleConfig::default(), catalog)
    }

    /// Replaces the configuration.
    ///
    /// On error the previous configuration stays in place.
    pub fn reconfigure(&self, config: &LocaleConfig) -> Result<()> {
        let settings = LocaleSettings::build(config, self.catalog.as_ref())?;
        debug!(
            locales = ?settings.locales,
            include_default_locale = settings.include_default_locale,
            "locale filter reconfigured"
        );
        *self.settings.write().unwrap_or_else(PoisonError::into_inner) = Arc::new(settings);
        Ok(())
    }

    /// Sets whether the default locale is prefixed on generation.
    pub fn set_include_default_locale(&self, include: bool) {
        let mut guard = self.settings.write().unwrap_or_else(PoisonError::into_inner);
        let mut settings = LocaleSettings::clone(&guard);
        settings.include_default_locale = include;
        *guard = Arc::new(settings);
    }

    /// Returns whether the default locale is prefixed on generation.
    #[must_use]
    pub fn include_default_locale(&self) -> bool {
        self.settings().include_default_locale
    }

    /// Returns the recognized locales.
    #[must_use]
    pub fn locales(&self) -> Vec<String> {
        self.settings().locales.clone()
    }

    fn settings(&self) -> Arc<LocaleSettings> {
        Arc::clone(&self.settings.read().unwrap_or_else(PoisonError::into_inner))
    }

    fn should_prepend(&self, settings: &LocaleSettings, locale: &str) -> bool {
        settings.include_default_locale || locale != self.catalog.default_locale()
    }

    /// Inserts `/<locale>` after the scheme and host, or at the start of a bare path.
    fn prepend_locale(&self, url: &str, locale: &str) -> String {
        self.url_pattern
            .replace(url, |caps: &Captures<'_>| {
                let host = caps.get(1).map_or("", |m| m.as_str());
                format!("{host}/{locale}{}", &caps[2])
            })
            .into_owned()
    }
}

impl Filter for LocaleFilter {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn around_recognize(
        &self,
        path: String,
        _request: &Request,
        next: RecognizeNext<'_>,
    ) -> oxide_router::Result<Params> {
        let settings = self.settings();
        let Some((locale, rest)) = settings.extract(&path) else {
            return next.run(path);
        };

        let rest = if rest.is_empty() { "/" } else { rest };
        debug!(%locale, path = %rest, "extracted locale");

        let mut params = next.run(rest.to_string())?;
        params.insert(LOCALE_PARAM, locale);
        Ok(params)
    }

    fn around_generate(
        &self,
        mut options: Params,
        next: GenerateNext<'_>,
    ) -> oxide_router::Result<Generated> {
        let settings = self.settings();
        let requested = options
            .remove(LOCALE_PARAM)
            .unwrap_or_else(|| self.catalog.current_locale());

        let locale = if settings.is_valid(&requested) {
            Some(requested)
        } else {
            debug!(locale = %requested, "ignoring unknown locale");
            None
        };

        let generated = next.run(options)?;

        Ok(match locale {
            Some(locale) if self.should_prepend(&settings, &locale) => {
                generated.map_url(|url| self.prepend_locale(&url, &locale))
            }
            _ => generated,
        })
    }
}

impl std::fmt::Debug for LocaleFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let settings = self.settings();
        f.debug_struct("LocaleFilter")
            .field("locales", &settings.locales)
            .field("include_default_locale", &settings.include_default_locale)
            .finish_non_exhaustive()
    }
}

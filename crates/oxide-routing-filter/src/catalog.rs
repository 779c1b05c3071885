//! Locale catalogs: where the locale filter learns which locales exist.

use std::sync::{PoisonError, RwLock};

/// Source of locale identifiers.
///
/// The locale filter reads the available locales once when it is built, and
/// the default and current locale on every generation.
pub trait LocaleCatalog: Send + Sync {
    /// Every locale the application can serve.
    fn available_locales(&self) -> Vec<String>;

    /// The locale used when nothing else is selected.
    fn default_locale(&self) -> String;

    /// The locale currently in effect.
    fn current_locale(&self) -> String;
}

/// An in-memory catalog.
#[derive(Debug)]
pub struct StaticCatalog {
    available: Vec<String>,
    default: String,
    current: RwLock<Option<String>>,
}

impl StaticCatalog {
    /// Creates a catalog with the given locales and default.
    pub fn new<I, S>(available: I, default: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            available: available.into_iter().map(Into::into).collect(),
            default: default.into(),
            current: RwLock::new(None),
        }
    }

    /// Switches the current locale.
    pub fn set_current_locale(&self, locale: impl Into<String>) {
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = Some(locale.into());
    }

    /// Falls back to the default locale again.
    pub fn reset_current_locale(&self) {
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

impl LocaleCatalog for StaticCatalog {
    fn available_locales(&self) -> Vec<String> {
        self.available.clone()
    }

    fn default_locale(&self) -> String {
        self.default.clone()
    }

    fn current_locale(&self) -> String {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .unwrap_or_else(|| self.default.clone())
    }
}

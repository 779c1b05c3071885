//! The filter protocol: hooks that wrap recognition and generation.

use std::fmt;
use std::sync::Arc;

use tracing::trace;

use crate::error::Result;
use crate::request::{Params, Request};

/// The innermost recognition step: real route matching on the filtered path.
pub type RecognizeTerminal<'a> = dyn Fn(&str, &Request) -> Result<Params> + 'a;

/// The innermost generation step: real URL construction from the remaining options.
pub type GenerateTerminal<'a> = dyn Fn(Params) -> Result<Generated> + 'a;

/// The two operations a filter can wrap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hook {
    /// Path to parameters.
    AroundRecognize,
    /// Parameters to path.
    AroundGenerate,
}

impl Hook {
    /// Returns the hook name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AroundRecognize => "around_recognize",
            Self::AroundGenerate => "around_generate",
        }
    }
}

impl fmt::Display for Hook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output of URL generation.
///
/// Generators either return a bare URL or a URL together with the options
/// they did not consume. Filters rewrite the URL and keep the shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Generated {
    /// A bare URL.
    Url(String),
    /// A URL plus the leftover options.
    WithExtra(String, Params),
}

impl Generated {
    /// Returns the URL.
    #[must_use]
    pub fn url(&self) -> &str {
        match self {
            Self::Url(url) | Self::WithExtra(url, _) => url,
        }
    }

    /// Returns the URL for in-place rewriting.
    pub fn url_mut(&mut self) -> &mut String {
        match self {
            Self::Url(url) | Self::WithExtra(url, _) => url,
        }
    }

    /// Consumes the result and returns the URL.
    #[must_use]
    pub fn into_url(self) -> String {
        match self {
            Self::Url(url) | Self::WithExtra(url, _) => url,
        }
    }

    /// Rewrites the URL, keeping the shape.
    #[must_use]
    pub fn map_url(self, f: impl FnOnce(String) -> String) -> Self {
        match self {
            Self::Url(url) => Self::Url(f(url)),
            Self::WithExtra(url, extra) => Self::WithExtra(f(url), extra),
        }
    }
}

/// A unit that wraps recognition and/or generation.
///
/// Each hook receives its input and a continuation. A filter may rewrite the
/// input before calling the continuation, rewrite the output after it,
/// skip it entirely, or call it more than once.
///
/// # Example
///
/// ```
/// use oxide_router::{Filter, Params, RecognizeNext, Request, Result};
///
/// struct Trailing;
///
/// impl Filter for Trailing {
///     fn name(&self) -> &str {
///         "trailing"
///     }
///
///     fn around_recognize(
///         &self,
///         path: String,
///         _request: &Request,
///         next: RecognizeNext<'_>,
///     ) -> Result<Params> {
///         let trimmed = path.trim_end_matches('/');
///         next.run(if trimmed.is_empty() { "/".into() } else { trimmed.into() })
///     }
/// }
/// ```
pub trait Filter: Send + Sync {
    /// Name the filter is registered and logged under.
    fn name(&self) -> &str;

    /// Wraps recognition of `path`.
    fn around_recognize(
        &self,
        path: String,
        request: &Request,
        next: RecognizeNext<'_>,
    ) -> Result<Params> {
        let _ = request;
        next.run(path)
    }

    /// Wraps generation from `options`.
    fn around_generate(&self, options: Params, next: GenerateNext<'_>) -> Result<Generated> {
        next.run(options)
    }
}

/// Continuation for [`Filter::around_recognize`]: the remaining filters, then the terminal.
#[derive(Clone, Copy)]
pub struct RecognizeNext<'a> {
    filters: &'a [Arc<dyn Filter>],
    request: &'a Request,
    terminal: &'a RecognizeTerminal<'a>,
}

impl<'a> RecognizeNext<'a> {
    pub(crate) fn new(
        filters: &'a [Arc<dyn Filter>],
        request: &'a Request,
        terminal: &'a RecognizeTerminal<'a>,
    ) -> Self {
        Self {
            filters,
            request,
            terminal,
        }
    }

    /// Hands `path` to the next filter, or to the router if none is left.
    pub fn run(&self, path: String) -> Result<Params> {
        match self.filters.split_first() {
            Some((filter, rest)) => {
                trace!(
                    filter = filter.name(),
                    hook = %Hook::AroundRecognize,
                    %path,
                    "entering filter"
                );
                filter.around_recognize(
                    path,
                    self.request,
                    Self::new(rest, self.request, self.terminal),
                )
            }
            None => (self.terminal)(&path, self.request),
        }
    }
}

/// Continuation for [`Filter::around_generate`]: the remaining filters, then the terminal.
#[derive(Clone, Copy)]
pub struct GenerateNext<'a> {
    filters: &'a [Arc<dyn Filter>],
    terminal: &'a GenerateTerminal<'a>,
}

impl<'a> GenerateNext<'a> {
    pub(crate) fn new(filters: &'a [Arc<dyn Filter>], terminal: &'a GenerateTerminal<'a>) -> Self {
        Self { filters, terminal }
    }

    /// Hands `options` to the next filter, or to the generator if none is left.
    pub fn run(&self, options: Params) -> Result<Generated> {
        match self.filters.split_first() {
            Some((filter, rest)) => {
                trace!(
                    filter = filter.name(),
                    hook = %Hook::AroundGenerate,
                    "entering filter"
                );
                filter.around_generate(options, Self::new(rest, self.terminal))
            }
            None => (self.terminal)(options),
        }
    }
}

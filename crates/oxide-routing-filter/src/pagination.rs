//! Pagination filter.
//!
//! ```text
//! incoming path:  /products/page/2
//! routed path:    /products
//! params:         page = "2"
//! ```
//!
//! On generation a `page` option other than `1` appends `/page/<n>` to the
//! URL, ahead of any query string.

use regex::Regex;
use tracing::debug;

use oxide_router::{Filter, GenerateNext, Generated, Params, RecognizeNext, Request};

use crate::config::PaginationConfig;
use crate::error::{FilterError, Result};

/// Filter that maps a trailing `/page/<n>` segment to a page parameter and back.
#[derive(Debug, Clone)]
pub struct PaginationFilter {
    param: String,
    segment: String,
    pattern: Regex,
}

impl PaginationFilter {
    /// Name the filter is registered under.
    pub const NAME: &'static str = "pagination";

    /// Creates a pagination filter.
    pub fn new(config: &PaginationConfig) -> Result<Self> {
        let segment = config.segment.trim_matches('/');
        if segment.is_empty() || segment.contains('/') {
            return Err(FilterError::InvalidSegment(config.segment.clone()));
        }

        Ok(Self {
            param: config.param.clone(),
            segment: segment.to_string(),
            pattern: Regex::new(&format!(r"/{}/(\d+)/?$", regex::escape(segment)))?,
        })
    }

    fn append_page(&self, url: &str, page: u64) -> String {
        let (path, query) = url.find('?').map_or((url, ""), |i| url.split_at(i));
        let path = path.trim_end_matches('/');
        format!("{path}/{}/{page}{query}", self.segment)
    }
}

impl Filter for PaginationFilter {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn around_recognize(
        &self,
        path: String,
        _request: &Request,
        next: RecognizeNext<'_>,
    ) -> oxide_router::Result<Params> {
        let Some(caps) = self.pattern.captures(&path) else {
            return next.run(path);
        };

        let page = caps[1].to_string();
        let rest = match &path[..caps.get(0).map_or(path.len(), |m| m.start())] {
            "" => "/",
            rest => rest,
        };
        debug!(%page, path = %rest, "extracted page");

        let mut params = next.run(rest.to_string())?;
        params.insert(self.param.as_str(), page);
        Ok(params)
    }

    fn around_generate(
        &self,
        mut options: Params,
        next: GenerateNext<'_>,
    ) -> oxide_router::Result<Generated> {
        let page = options.remove(&self.param);
        let generated = next.run(options)?;

        let Some(page) = page else {
            return Ok(generated);
        };
        match page.parse::<u64>() {
            Ok(1) => Ok(generated),
            Ok(n) => Ok(generated.map_url(|url| self.append_page(&url, n))),
            Err(_) => {
                debug!(%page, "ignoring non-numeric page");
                Ok(generated)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter() -> PaginationFilter {
        PaginationFilter::new(&PaginationConfig::default()).unwrap()
    }

    #[test]
    fn test_append_page() {
        let pagination = filter();
        assert_eq!(pagination.append_page("/products", 2), "/products/page/2");
        assert_eq!(pagination.append_page("/", 3), "/page/3");
        assert_eq!(
            pagination.append_page("/products?sort=name", 2),
            "/products/page/2?sort=name"
        );
    }

    #[test]
    fn test_custom_segment() {
        let pagination = PaginationFilter::new(&PaginationConfig {
            param: "p".into(),
            segment: "/seite/".into(),
        })
        .unwrap();
        assert_eq!(pagination.append_page("/produkte", 4), "/produkte/seite/4");
        assert!(pagination.pattern.is_match("/produkte/seite/4"));
        assert!(!pagination.pattern.is_match("/produkte/page/4"));
    }

    #[test]
    fn test_invalid_segment() {
        let config = PaginationConfig {
            segment: "a/b".into(),
            ..PaginationConfig::default()
        };
        assert!(matches!(
            PaginationFilter::new(&config),
            Err(FilterError::InvalidSegment(_))
        ));
    }
}

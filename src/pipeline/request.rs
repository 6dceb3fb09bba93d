//! Validated operator input for one crawl.

use crate::error::{AppError, Result};
use crate::models::CrawlerConfig;
use crate::services::{GlyphPattern, StopPolicy};

/// Everything the operator chose, checked before any network activity.
#[derive(Debug, Clone)]
pub struct CrawlRequest {
    /// Class name searched for in the landing page links
    pub keyword: String,
    pub policy: StopPolicy,
    pub glyphs: GlyphPattern,
    /// Keep per-date marked counts
    pub bucket_by_date: bool,
}

impl CrawlRequest {
    /// Build a request; the keyword must not be blank.
    pub fn new(keyword: &str, policy: StopPolicy, glyphs: GlyphPattern) -> Result<Self> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return Err(AppError::validation("keyword is empty"));
        }
        Ok(Self {
            keyword: keyword.to_string(),
            policy,
            glyphs,
            bucket_by_date: false,
        })
    }

    pub fn with_date_buckets(mut self, enabled: bool) -> Self {
        self.bucket_by_date = enabled;
        self
    }

    /// Check the request against the crawler limits.
    pub fn validate(&self, crawler: &CrawlerConfig) -> Result<()> {
        if let StopPolicy::Pages(pages) = self.policy {
            if pages > crawler.max_pages {
                return Err(AppError::validation(format!(
                    "{pages} pages requested but crawler.max_pages is {}",
                    crawler.max_pages
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_keyword_rejected() {
        let result = CrawlRequest::new("   ", StopPolicy::Pages(1), GlyphPattern::blocks().unwrap());
        assert!(result.is_err());
    }

    #[test]
    fn test_keyword_is_trimmed() {
        let request =
            CrawlRequest::new(" 버서커 ", StopPolicy::Pages(1), GlyphPattern::blocks().unwrap()).unwrap();
        assert_eq!(request.keyword, "버서커");
        assert!(!request.bucket_by_date);
    }

    #[test]
    fn test_page_count_above_cap_rejected() {
        let crawler = CrawlerConfig {
            max_pages: 10,
            ..CrawlerConfig::default()
        };
        let ok = CrawlRequest::new("a", StopPolicy::Pages(10), GlyphPattern::bars().unwrap()).unwrap();
        let too_many = CrawlRequest::new("a", StopPolicy::Pages(11), GlyphPattern::bars().unwrap()).unwrap();

        assert!(ok.validate(&crawler).is_ok());
        assert!(too_many.validate(&crawler).is_err());
    }
}

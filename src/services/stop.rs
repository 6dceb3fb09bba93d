//! Stop-condition evaluation for the page loop.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::{PostRecord, StopSignal};
use crate::services::ExtractedPage;

/// When the crawl should end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopPolicy {
    /// Stop at the first row posted before this date
    Since(NaiveDate),
    /// Stop after this many pages
    Pages(u32),
}

impl StopPolicy {
    /// Parse a `YYYY-MM-DD` threshold.
    pub fn parse_since(raw: &str) -> Result<Self> {
        NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
            .map(StopPolicy::Since)
            .map_err(|e| AppError::validation(format!("date '{raw}' is not YYYY-MM-DD: {e}")))
    }

    /// Parse a positive page count.
    pub fn parse_pages(raw: &str) -> Result<Self> {
        match raw.trim().parse::<u32>() {
            Ok(0) => Err(AppError::validation("page count must be at least 1")),
            Ok(pages) => Ok(StopPolicy::Pages(pages)),
            Err(e) => Err(AppError::validation(format!(
                "page count '{raw}' is not a positive integer: {e}"
            ))),
        }
    }

    /// Checked right after a page is extracted, before any row.
    ///
    /// Under the date policy an empty page (or a missing listing table) ends
    /// the crawl. The page policy never stops on content.
    pub fn on_page(&self, page: &ExtractedPage, skip_notices: bool) -> StopSignal {
        match self {
            StopPolicy::Since(_) if page.is_empty(skip_notices) => StopSignal::EmptyPage,
            _ => StopSignal::Continue,
        }
    }

    /// Checked for each countable row, in page order, before it is counted.
    pub fn on_row(&self, post: &PostRecord) -> StopSignal {
        match (self, post.date()) {
            (StopPolicy::Since(threshold), Some(date)) if date < *threshold => {
                StopSignal::DateReached
            }
            _ => StopSignal::Continue,
        }
    }

    /// Checked once page `page` (1-based) has been fully processed.
    pub fn after_page(&self, page: u32) -> StopSignal {
        match self {
            StopPolicy::Pages(limit) if page >= *limit => StopSignal::PageLimitReached,
            _ => StopSignal::Continue,
        }
    }
}

impl fmt::Display for StopPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopPolicy::Since(date) => write!(f, "since {}", date.format("%Y-%m-%d")),
            StopPolicy::Pages(pages) => write!(f, "{pages} page(s)"),
        }
    }
}

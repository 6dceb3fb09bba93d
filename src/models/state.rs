//! Running totals and the loop's stop outcome.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::PostRecord;

/// Why the page loop ended, or that it should keep going.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StopSignal {
    Continue,
    /// A row older than the threshold date was reached
    DateReached,
    /// The page had no countable rows or no listing table
    EmptyPage,
    /// The requested number of pages was processed
    PageLimitReached,
    /// The configured hard page cap was hit
    PageCapReached,
}

impl StopSignal {
    pub fn is_stop(&self) -> bool {
        !matches!(self, StopSignal::Continue)
    }
}

/// Totals accumulated over one crawl.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrawlState {
    /// Non-notice rows with a resolvable title
    pub total_count: usize,

    /// Counted rows whose title carries a marker glyph
    pub marked_count: usize,

    /// Marked rows per posting date, only when bucketing was requested
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marked_by_date: Option<BTreeMap<NaiveDate, usize>>,
}

impl CrawlState {
    /// Empty state; `bucket_by_date` enables the per-date map.
    pub fn new(bucket_by_date: bool) -> Self {
        Self {
            total_count: 0,
            marked_count: 0,
            marked_by_date: bucket_by_date.then(BTreeMap::new),
        }
    }

    /// Count one row that reached the filter.
    pub fn record(&mut self, post: &PostRecord, marked: bool) {
        self.total_count += 1;
        if !marked {
            return;
        }
        self.marked_count += 1;

        if let (Some(buckets), Some(date)) = (self.marked_by_date.as_mut(), post.date()) {
            *buckets.entry(date).or_insert(0) += 1;
        }
    }

    /// Marked count for one date, zero when not bucketed or absent.
    pub fn marked_on(&self, date: NaiveDate) -> usize {
        self.marked_by_date
            .as_ref()
            .and_then(|b| b.get(&date).copied())
            .unwrap_or(0)
    }
}

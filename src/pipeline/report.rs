//! Progress reporting and the crawl summary.

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{CrawlState, StopSignal};
use crate::services::StopPolicy;

/// Result of a crawl that reached Done.
#[derive(Debug, Clone, Serialize)]
pub struct CrawlSummary {
    pub keyword: String,
    pub board_url: String,
    pub policy: StopPolicy,
    pub glyphs: String,
    /// Day the crawl ran; `MM-DD` and `HH:MM` dates were read against it
    pub run_date: NaiveDate,
    pub pages_fetched: u32,
    /// Rows dropped for an unreadable date
    pub skipped_rows: usize,
    pub stop: StopSignal,
    #[serde(flatten)]
    pub state: CrawlState,
}

/// Receives the crawl's progress log.
///
/// Lines arrive in page order. `finish` is called exactly once, after the
/// loop is done, and never when the crawl fails.
pub trait Reporter {
    fn append(&mut self, line: &str);

    fn finish(&mut self, _summary: &CrawlSummary) {}
}

/// Append-only result log.
#[derive(Debug, Default)]
pub struct ResultLog {
    lines: Vec<String>,
    echo: bool,
    summary: Option<CrawlSummary>,
}

impl ResultLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// A log that also prints every line to stdout.
    pub fn echoing() -> Self {
        Self {
            echo: true,
            ..Self::default()
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// The whole log as one text block.
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    pub fn summary(&self) -> Option<&CrawlSummary> {
        self.summary.as_ref()
    }

    /// Empty the log.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.summary = None;
    }
}

impl Reporter for ResultLog {
    fn append(&mut self, line: &str) {
        if self.echo {
            println!("{line}");
        }
        self.lines.push(line.to_string());
    }

    fn finish(&mut self, summary: &CrawlSummary) {
        self.summary = Some(summary.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_keeps_order() {
        let mut log = ResultLog::new();
        log.append("first");
        log.append("second\nline");

        assert_eq!(log.lines(), ["first", "second\nline"]);
        assert_eq!(log.text(), "first\nsecond\nline");
        assert!(log.summary().is_none());
    }

    #[test]
    fn test_clear_resets_log() {
        let mut log = ResultLog::new();
        log.append("line");
        log.clear();
        assert!(log.lines().is_empty());
    }
}

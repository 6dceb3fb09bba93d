//! Result export.
//!
//! A finished [`ResultLog`] can be saved in three shapes:
//! - Text: the progress log as shown to the operator
//! - Xlsx: a date/count sheet with a column chart (feature `xlsx`)
//! - Json: the serialized [`CrawlSummary`]

mod json;
pub mod local;
mod text;
#[cfg(feature = "xlsx")]
mod xlsx;

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::error::{AppError, Result};
use crate::models::OutputConfig;
use crate::pipeline::{CrawlSummary, ResultLog};

pub use json::JsonExporter;
pub use local::LocalStorage;
pub use text::TextExporter;
#[cfg(feature = "xlsx")]
pub use xlsx::XlsxExporter;

/// Supported export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Xlsx,
    Json,
}

impl FromStr for OutputFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "xlsx" | "excel" => Ok(OutputFormat::Xlsx),
            "json" => Ok(OutputFormat::Json),
            other => Err(AppError::validation(format!(
                "unknown output format '{other}' (expected text, xlsx or json)"
            ))),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OutputFormat::Text => "text",
            OutputFormat::Xlsx => "xlsx",
            OutputFormat::Json => "json",
        })
    }
}

/// Trait for result export backends.
#[async_trait]
pub trait ResultExporter: Send + Sync {
    /// Persist the log (and its summary, where the format needs one).
    async fn export(&self, log: &ResultLog) -> Result<PathBuf>;
}

/// Build the exporter for `format`.
pub fn exporter(format: OutputFormat, output: &OutputConfig) -> Result<Box<dyn ResultExporter>> {
    let storage = LocalStorage::new(&output.dir);
    match format {
        OutputFormat::Text => Ok(Box::new(TextExporter::new(storage, &output.text_file))),
        OutputFormat::Json => Ok(Box::new(JsonExporter::new(storage))),
        #[cfg(feature = "xlsx")]
        OutputFormat::Xlsx => Ok(Box::new(XlsxExporter::new(storage))),
        #[cfg(not(feature = "xlsx"))]
        OutputFormat::Xlsx => Err(AppError::config(
            "spreadsheet export needs the `xlsx` feature",
        )),
    }
}

/// `{keyword}_{YYYY-MM-DD}.{extension}`, with path-hostile characters replaced.
pub fn export_file_name(keyword: &str, date: NaiveDate, extension: &str) -> String {
    let safe: String = keyword
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_whitespace() => '_',
            c => c,
        })
        .collect();
    format!("{safe}_{}.{extension}", date.format("%Y-%m-%d"))
}

/// The summary of a finished crawl, or an error if the log has none yet.
fn finished_summary(log: &ResultLog) -> Result<&CrawlSummary> {
    log.summary()
        .ok_or_else(|| AppError::validation("no finished crawl to export"))
}

#[cfg(test)]
pub(crate) mod fixtures {
    use std::collections::BTreeMap;

    use chrono::NaiveDate;

    use crate::models::{CrawlState, StopSignal};
    use crate::pipeline::{CrawlSummary, Reporter, ResultLog};
    use crate::services::StopPolicy;

    /// A finished log with two marked dates.
    pub fn finished_log() -> ResultLog {
        let day = |d| NaiveDate::from_ymd_opt(2024, 10, d).unwrap();
        let mut buckets = BTreeMap::new();
        buckets.insert(day(17), 1);
        buckets.insert(day(18), 2);

        let summary = CrawlSummary {
            keyword: "버서커".to_string(),
            board_url: "https://www.inven.co.kr/board/lostark/5339".to_string(),
            policy: StopPolicy::Since(day(17)),
            glyphs: "▅▇█".to_string(),
            run_date: day(18),
            pages_fetched: 2,
            skipped_rows: 0,
            stop: StopSignal::DateReached,
            state: CrawlState {
                total_count: 12,
                marked_count: 3,
                marked_by_date: Some(buckets),
            },
        };

        let mut log = ResultLog::new();
        log.append("-----1 페이지 크롤링 중 -----");
        log.append("전체 글 제목의 개수: 12");
        log.finish(&summary);
        log
    }
}

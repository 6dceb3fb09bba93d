//! Spreadsheet export with a column chart.

use std::path::PathBuf;

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_xlsxwriter::{Chart, ChartType, Format, Workbook};

use crate::error::Result;
use crate::pipeline::{CrawlSummary, ResultLog};
use crate::storage::{LocalStorage, ResultExporter, export_file_name, finished_summary};

const SHEET_NAME: &str = "Summary";

/// Writes a date/count table and charts it.
pub struct XlsxExporter {
    storage: LocalStorage,
}

impl XlsxExporter {
    pub fn new(storage: LocalStorage) -> Self {
        Self { storage }
    }
}

/// Table rows in ascending date order.
///
/// Without buckets (or with no marked post at all) this is a single row for
/// the run date carrying the total.
fn chart_rows(summary: &CrawlSummary) -> Vec<(NaiveDate, usize)> {
    match &summary.state.marked_by_date {
        Some(buckets) if !buckets.is_empty() => {
            buckets.iter().map(|(date, count)| (*date, *count)).collect()
        }
        _ => vec![(summary.run_date, summary.state.marked_count)],
    }
}

fn build_workbook(summary: &CrawlSummary) -> Result<Vec<u8>> {
    let rows = chart_rows(summary);
    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();

    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;
    sheet.write_string_with_format(0, 0, "Date", &bold)?;
    sheet.write_string_with_format(0, 1, "Count", &bold)?;
    sheet.set_column_width(0, 14)?;

    for (i, (date, count)) in rows.iter().enumerate() {
        let row = i as u32 + 1;
        sheet.write_string(row, 0, date.format("%Y-%m-%d").to_string())?;
        sheet.write_number(row, 1, *count as f64)?;
    }

    let last = rows.len() as u32;
    let mut chart = Chart::new(ChartType::Column);
    chart
        .add_series()
        .set_name(summary.keyword.as_str())
        .set_categories((SHEET_NAME, 1, 0, last, 0))
        .set_values((SHEET_NAME, 1, 1, last, 1));
    chart.title().set_name(&format!("{} ({})", summary.keyword, summary.glyphs));
    chart.x_axis().set_name("Date");
    chart.y_axis().set_name("Count");
    sheet.insert_chart(1, 3, &chart)?;

    Ok(workbook.save_to_buffer()?)
}

#[async_trait]
impl ResultExporter for XlsxExporter {
    async fn export(&self, log: &ResultLog) -> Result<PathBuf> {
        let summary = finished_summary(log)?;
        let bytes = build_workbook(summary)?;
        let key = export_file_name(&summary.keyword, summary.run_date, "xlsx");
        self.storage.write_bytes(&key, &bytes).await
    }
}

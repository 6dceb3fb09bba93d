//! JSON summary export.

use std::path::PathBuf;

use async_trait::async_trait;

use crate::error::Result;
use crate::pipeline::ResultLog;
use crate::storage::{LocalStorage, ResultExporter, export_file_name, finished_summary};

/// Writes the crawl summary as pretty JSON.
pub struct JsonExporter {
    storage: LocalStorage,
}

impl JsonExporter {
    pub fn new(storage: LocalStorage) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl ResultExporter for JsonExporter {
    async fn export(&self, log: &ResultLog) -> Result<PathBuf> {
        let summary = finished_summary(log)?;
        let bytes = serde_json::to_vec_pretty(summary)?;
        let key = export_file_name(&summary.keyword, summary.run_date, "json");
        self.storage.write_bytes(&key, &bytes).await
    }
}

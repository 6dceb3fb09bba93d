//! Plain-text dump of the result log.

use std::path::PathBuf;

use async_trait::async_trait;

use crate::error::Result;
use crate::pipeline::ResultLog;
use crate::storage::{LocalStorage, ResultExporter};

/// Writes the log lines, one per line, to a fixed file name.
pub struct TextExporter {
    storage: LocalStorage,
    file_name: String,
}

impl TextExporter {
    pub fn new(storage: LocalStorage, file_name: impl Into<String>) -> Self {
        Self {
            storage,
            file_name: file_name.into(),
        }
    }
}

#[async_trait]
impl ResultExporter for TextExporter {
    async fn export(&self, log: &ResultLog) -> Result<PathBuf> {
        self.storage
            .write_bytes(&self.file_name, log.text().as_bytes())
            .await
    }
}

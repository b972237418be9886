//! Data sources the selector reads from

use std::path::{Path, PathBuf};

use polars::prelude::DataFrame;
use tracing::debug;

use super::Dataset;
use crate::error::Result;

/// Supplies a fresh [`Dataset`] on every call
pub trait DataSource: Send + Sync {
    fn load(&self) -> Result<Dataset>;

    /// Human-readable location, used in logs and reports
    fn describe(&self) -> String;
}

/// CSV file on disk, re-read on every load
#[derive(Debug, Clone)]
pub struct CsvSource {
    path: PathBuf,
}

impl CsvSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DataSource for CsvSource {
    fn load(&self) -> Result<Dataset> {
        let dataset = Dataset::from_csv(&self.path)?;
        debug!(
            path = %self.path.display(),
            rows = dataset.len(),
            columns = dataset.width(),
            "Loaded predictions CSV"
        );
        Ok(dataset)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// In-memory frame, handy for tests and embedding
#[derive(Debug, Clone)]
pub struct FrameSource {
    frame: DataFrame,
}

impl FrameSource {
    pub fn new(frame: DataFrame) -> Self {
        Self { frame }
    }
}

impl DataSource for FrameSource {
    fn load(&self) -> Result<Dataset> {
        Ok(Dataset::new(self.frame.clone()))
    }

    fn describe(&self) -> String {
        format!("<in-memory frame: {} rows>", self.frame.height())
    }
}

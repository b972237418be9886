//! Application state shared across handlers

use std::sync::Arc;

use parking_lot::Mutex;
use rand_chacha::ChaCha8Rng;

use crate::dataset::{CsvSource, DataSource};
use crate::error::Result;
use crate::selector::{RngSource, RowSelector, SelectionResult};

use super::ServerConfig;

/// Application state shared across handlers
pub struct AppState {
    pub source: Arc<dyn DataSource>,
    pub selector: RowSelector,
    seeded_rng: Option<Mutex<RngSource<ChaCha8Rng>>>,
}

impl AppState {
    /// State reading the CSV configured in `config`
    pub fn new(config: ServerConfig) -> Self {
        let source = Arc::new(CsvSource::new(config.data_path()));
        Self::with_source(&config, source)
    }

    /// State over any data source; only the sampling seed is taken from `config`
    pub fn with_source(config: &ServerConfig, source: Arc<dyn DataSource>) -> Self {
        let seeded_rng = config.seed.map(|seed| Mutex::new(RngSource::seeded(seed)));
        Self {
            source,
            selector: RowSelector::default(),
            seeded_rng,
        }
    }

    pub fn with_selector(mut self, selector: RowSelector) -> Self {
        self.selector = selector;
        self
    }

    /// Reload the dataset and select one row, avoiding `excluded`.
    /// Blocking: reads from storage.
    pub fn select(&self, excluded: Option<usize>) -> Result<SelectionResult> {
        let dataset = self.source.load()?;
        match &self.seeded_rng {
            Some(rng) => self.selector.select(&dataset, excluded, &mut *rng.lock()),
            None => self.selector.select(&dataset, excluded, &mut RngSource::thread()),
        }
    }
}

//! Bankruptcy Explorer - browse precomputed bankruptcy predictions
//!
//! Each page view loads the predictions CSV, picks one company at random
//! (never the one shown just before) and displays fifteen financial ratios
//! next to the true and predicted bankruptcy labels.
//!
//! # Modules
//!
//! - [`dataset`] - CSV-backed datasets and the [`dataset::DataSource`] seam
//! - [`selector`] - random row selection with bounded retry
//! - [`server`] - axum web server and JSON API
//! - [`cli`] - command-line interface

pub mod error;

pub mod dataset;
pub mod selector;

pub mod server;
pub mod cli;

pub use error::{ExplorerError, Result};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::dataset::{CsvSource, DataSource, Dataset, FrameSource, Label};
    pub use crate::error::{ExplorerError, Result};
    pub use crate::selector::{
        select, FeatureValue, RandomSource, RngSource, RowSelector, ScriptedSource, SelectionOutcome,
        SelectionResult, FEATURES,
    };
}

//! Random row selection with exclusion of the previously shown row
//!
//! The selector draws a row uniformly at random, redraws while the draw
//! matches the excluded index, and projects the chosen row onto the feature
//! list and the two label columns. Redraws are bounded: after
//! [`RowSelector::attempt_limit`] misses the next row after the excluded one
//! is taken, and a one-row dataset returns its only row.

mod random;

pub use random::{RandomSource, RngSource, ScriptedSource};

use serde::Serialize;
use tracing::{debug, warn};

use crate::dataset::{Dataset, Label};
use crate::error::{ExplorerError, Result};

/// Financial-ratio columns surfaced to the user, in display order
pub const FEATURES: [&str; 15] = [
    "ROA(C) before interest and depreciation before interest",
    "ROA(A) before interest and % after tax",
    "ROA(B) before interest and depreciation after tax",
    "Persistent EPS in the Last Four Seasons",
    "Per Share Net profit before tax (Yuan ¥)",
    "Debt ratio %",
    "Net worth/Assets",
    "Borrowing dependency",
    "Net profit before tax/Paid-in capital",
    "Working Capital to Total Assets",
    "Current Liability to Assets",
    "Retained Earnings to Total Assets",
    "Current Liability to Current Assets",
    "Liability-Assets Flag",
    "Gross Profit to Sales",
];

pub const TRUE_LABEL: &str = "y_true";
pub const PREDICTED_LABEL: &str = "y_pred";

/// Lower bound on draws before falling back
const MIN_ATTEMPTS: usize = 8;

/// How the chosen row was reached
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SelectionOutcome {
    /// A random draw satisfied the exclusion
    Fresh { attempts: usize },
    /// Draws were exhausted; the row after the excluded one was taken
    Fallback { attempts: usize },
    /// Single-row dataset whose only row was excluded
    Repeated,
}

/// One feature of the chosen row, rounded to 2 decimals
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureValue {
    pub name: String,
    pub value: f64,
}

/// Result of a single selection
#[derive(Debug, Clone, Serialize)]
pub struct SelectionResult {
    pub index: usize,
    pub features: Vec<FeatureValue>,
    pub y_true: Label,
    pub y_pred: Label,
    pub outcome: SelectionOutcome,
}

impl SelectionResult {
    /// Whether the prediction matches the true label. Numeric labels compare
    /// by value, so `1` and `1.0` agree.
    pub fn prediction_matches(&self) -> bool {
        match (self.y_true.as_f64(), self.y_pred.as_f64()) {
            (Some(t), Some(p)) => t == p,
            _ => self.y_true == self.y_pred,
        }
    }
}

/// Selects rows and projects them onto a fixed column set
#[derive(Debug, Clone)]
pub struct RowSelector {
    features: Vec<String>,
    true_label: String,
    predicted_label: String,
}

impl Default for RowSelector {
    fn default() -> Self {
        Self::with_features(FEATURES.iter().map(|s| s.to_string()).collect())
    }
}

impl RowSelector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Selector over a custom feature list with the standard label columns
    pub fn with_features(features: Vec<String>) -> Self {
        Self {
            features,
            true_label: TRUE_LABEL.to_string(),
            predicted_label: PREDICTED_LABEL.to_string(),
        }
    }

    /// Every column the projection reads
    pub fn required_columns(&self) -> Vec<&str> {
        self.features
            .iter()
            .map(String::as_str)
            .chain([self.true_label.as_str(), self.predicted_label.as_str()])
            .collect()
    }

    /// Maximum number of random draws for a dataset of `rows` rows
    pub fn attempt_limit(rows: usize) -> usize {
        rows.max(MIN_ATTEMPTS)
    }

    /// Pick a row whose index differs from `excluded` and project it
    pub fn select<R>(&self, dataset: &Dataset, excluded: Option<usize>, rng: &mut R) -> Result<SelectionResult>
    where
        R: RandomSource + ?Sized,
    {
        if dataset.is_empty() {
            return Err(ExplorerError::EmptyDataset);
        }
        dataset.require_columns(&self.required_columns())?;

        let rows = dataset.len();
        let (index, outcome) = draw(rows, excluded, rng);

        match outcome {
            SelectionOutcome::Fresh { attempts } => {
                debug!(index, excluded = ?excluded, attempts, rows, "Selected row");
            }
            SelectionOutcome::Fallback { attempts } => {
                warn!(index, excluded = ?excluded, attempts, rows, "Random draws exhausted, took next row");
            }
            SelectionOutcome::Repeated => {
                warn!(index, rows, "Only one row available, repeating the excluded row");
            }
        }

        self.project(dataset, index, outcome)
    }

    fn project(&self, dataset: &Dataset, index: usize, outcome: SelectionOutcome) -> Result<SelectionResult> {
        let features = self
            .features
            .iter()
            .map(|name| {
                Ok(FeatureValue {
                    name: name.clone(),
                    value: round2(dataset.float_at(name, index)?),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(SelectionResult {
            index,
            features,
            y_true: dataset.label_at(&self.true_label, index)?,
            y_pred: dataset.label_at(&self.predicted_label, index)?,
            outcome,
        })
    }
}

/// Select with the default feature list and the thread RNG
pub fn select(dataset: &Dataset, excluded: Option<usize>) -> Result<SelectionResult> {
    RowSelector::default().select(dataset, excluded, &mut RngSource::thread())
}

fn draw<R>(rows: usize, excluded: Option<usize>, rng: &mut R) -> (usize, SelectionOutcome)
where
    R: RandomSource + ?Sized,
{
    let Some(excluded) = excluded else {
        return (rng.next_index(rows), SelectionOutcome::Fresh { attempts: 1 });
    };

    if rows == 1 && excluded == 0 {
        return (0, SelectionOutcome::Repeated);
    }

    let limit = RowSelector::attempt_limit(rows);
    for attempt in 1..=limit {
        let index = rng.next_index(rows);
        if index != excluded {
            return (index, SelectionOutcome::Fresh { attempts: attempt });
        }
    }

    ((excluded + 1) % rows, SelectionOutcome::Fallback { attempts: limit })
}

/// Round half to even at 2 decimals
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

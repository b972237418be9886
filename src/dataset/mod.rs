//! Dataset access for precomputed predictions
//!
//! A [`Dataset`] wraps a polars `DataFrame` loaded from storage and exposes the
//! handful of typed lookups the selector needs. Rows are identified by their
//! zero-based position, matching how the predictions CSV is written (no
//! explicit index column).

mod source;

pub use source::{CsvSource, DataSource, FrameSource};

use std::fmt;
use std::fs::File;
use std::path::Path;

use polars::prelude::*;
use serde::Serialize;

use crate::error::{ExplorerError, Result};

/// Raw value of a label column (`y_true` / `y_pred`), kept in its source type
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Label {
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Text(String),
    Missing,
}

impl Label {
    fn from_any(value: AnyValue<'_>) -> Self {
        match value {
            AnyValue::Null => Label::Missing,
            AnyValue::Boolean(v) => Label::Boolean(v),
            AnyValue::Int8(v) => Label::Integer(v as i64),
            AnyValue::Int16(v) => Label::Integer(v as i64),
            AnyValue::Int32(v) => Label::Integer(v as i64),
            AnyValue::Int64(v) => Label::Integer(v),
            AnyValue::UInt8(v) => Label::Integer(v as i64),
            AnyValue::UInt16(v) => Label::Integer(v as i64),
            AnyValue::UInt32(v) => Label::Integer(v as i64),
            AnyValue::UInt64(v) => Label::Integer(v as i64),
            AnyValue::Float32(v) => Label::Float(v as f64),
            AnyValue::Float64(v) => Label::Float(v),
            AnyValue::String(v) => Label::Text(v.to_string()),
            AnyValue::StringOwned(v) => Label::Text(v.to_string()),
            other => Label::Text(other.to_string()),
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Label::Integer(v) => Some(*v as f64),
            Label::Float(v) => Some(*v),
            _ => None,
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Integer(v) => write!(f, "{}", v),
            Label::Float(v) => write!(f, "{:?}", v),
            Label::Boolean(v) => write!(f, "{}", v),
            Label::Text(v) => f.write_str(v),
            Label::Missing => f.write_str("n/a"),
        }
    }
}

/// Read-only tabular dataset
#[derive(Debug, Clone)]
pub struct Dataset {
    frame: DataFrame,
}

impl Dataset {
    pub fn new(frame: DataFrame) -> Self {
        Self { frame }
    }

    /// Load a CSV file with a header row, inferring the schema
    pub fn from_csv(path: &Path) -> Result<Self> {
        let file = File::open(path)?;

        let frame = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(Some(1000))
            .into_reader_with_file_handle(file)
            .finish()?;

        Ok(Self::new(frame))
    }

    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.frame.height()
    }

    pub fn is_empty(&self) -> bool {
        self.frame.height() == 0
    }

    pub fn width(&self) -> usize {
        self.frame.width()
    }

    /// Required columns absent from the schema, in the order given
    pub fn missing_columns<'a>(&self, required: &[&'a str]) -> Vec<&'a str> {
        required
            .iter()
            .copied()
            .filter(|name| self.frame.column(name).is_err())
            .collect()
    }

    /// Fail with [`ExplorerError::MissingColumn`] on the first absent column
    pub fn require_columns(&self, required: &[&str]) -> Result<()> {
        match self.missing_columns(required).first() {
            Some(name) => Err(ExplorerError::MissingColumn(name.to_string())),
            None => Ok(()),
        }
    }

    /// Numeric value at `row`; nulls read as NaN
    pub fn float_at(&self, column: &str, row: usize) -> Result<f64> {
        let value = self.value_at(column, row)?;
        if value.is_null() {
            return Ok(f64::NAN);
        }
        value.extract::<f64>().ok_or_else(|| {
            ExplorerError::Data(format!("column '{}' holds a non-numeric value at row {}", column, row))
        })
    }

    /// Raw label value at `row`
    pub fn label_at(&self, column: &str, row: usize) -> Result<Label> {
        Ok(Label::from_any(self.value_at(column, row)?))
    }

    fn value_at(&self, column: &str, row: usize) -> Result<AnyValue<'_>> {
        let col = self
            .frame
            .column(column)
            .map_err(|_| ExplorerError::MissingColumn(column.to_string()))?;
        Ok(col.get(row)?)
    }
}

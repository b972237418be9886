//! Shared fixtures for integration tests

#![allow(dead_code)]

use bankruptcy_explorer::selector::FEATURES;
use std::path::Path;

/// Feature value written for `row`, column `col`
pub fn feature_value(row: usize, col: usize) -> f64 {
    row as f64 * 0.1 + col as f64 * 0.001 + 0.0049
}

/// Predictions CSV with every required column and `rows` rows
pub fn predictions_csv(rows: usize) -> String {
    let mut csv = FEATURES
        .iter()
        .map(|name| format!("\"{}\"", name))
        .collect::<Vec<_>>()
        .join(",");
    csv.push_str(",y_true,y_pred\n");

    for row in 0..rows {
        let values: Vec<String> = (0..FEATURES.len())
            .map(|col| feature_value(row, col).to_string())
            .collect();
        csv.push_str(&values.join(","));
        csv.push_str(&format!(",{},{}\n", row % 2, usize::from(row % 3 == 0)));
    }
    csv
}

/// Base directory laid out as `<base>/data/predictions.csv`
pub fn base_dir_with(csv: &str) -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    write_data_file(dir.path(), csv);
    dir
}

pub fn write_data_file(base: &Path, csv: &str) {
    let data_dir = base.join("data");
    std::fs::create_dir_all(&data_dir).unwrap();
    std::fs::write(data_dir.join("predictions.csv"), csv).unwrap();
}

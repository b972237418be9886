//! Integration test: selection invariants over generated datasets

mod common;

use bankruptcy_explorer::prelude::*;
use bankruptcy_explorer::selector::round2;
use polars::prelude::*;
use std::io::Write;

fn f1_dataset(values: &[f64]) -> Dataset {
    let y: Vec<i64> = (0..values.len() as i64).map(|i| i % 2).collect();
    Dataset::new(
        df!(
            "f1" => values,
            "y_true" => &y,
            "y_pred" => &y
        )
        .unwrap(),
    )
}

fn f1_selector() -> RowSelector {
    RowSelector::with_features(vec!["f1".to_string()])
}

#[test]
fn test_two_row_scenario() {
    let ds = Dataset::new(
        df!(
            "f1" => &[1.005, 2.004],
            "y_true" => &[1i64, 0],
            "y_pred" => &[1i64, 0]
        )
        .unwrap(),
    );

    for seed in 0..50 {
        let result = f1_selector().select(&ds, Some(0), &mut RngSource::seeded(seed)).unwrap();
        assert_eq!(result.index, 1);
        assert_eq!(result.features[0].value, 2.0);
        assert_eq!(result.y_true, Label::Integer(0));
        assert_eq!(result.y_pred, Label::Integer(0));
    }
}

#[test]
fn test_exclusion_holds_for_every_size() {
    for rows in 2..=12usize {
        let values: Vec<f64> = (0..rows).map(|i| i as f64 * 1.2345).collect();
        let ds = f1_dataset(&values);
        for seed in 0..40u64 {
            let excluded = seed as usize % rows;
            let result = f1_selector().select(&ds, Some(excluded), &mut RngSource::seeded(seed)).unwrap();
            assert_ne!(result.index, excluded, "rows={} seed={}", rows, seed);
            assert!(result.index < rows);
            assert!(!matches!(result.outcome, SelectionOutcome::Repeated));
        }
    }
}

#[test]
fn test_exclusion_holds_when_draws_always_hit() {
    let ds = f1_dataset(&[0.0, 1.0, 2.0, 3.0]);
    let mut rng = ScriptedSource::new(vec![3]);
    let result = f1_selector().select(&ds, Some(3), &mut rng).unwrap();
    assert_eq!(result.index, 0);
    assert!(matches!(result.outcome, SelectionOutcome::Fallback { .. }));
}

#[test]
fn test_first_request_has_no_exclusion() {
    let values: Vec<f64> = (0..100).map(|i| i as f64).collect();
    let ds = f1_dataset(&values);
    let mut seen = std::collections::HashSet::new();
    for seed in 0..200 {
        let result = f1_selector().select(&ds, None, &mut RngSource::seeded(seed)).unwrap();
        assert!(result.index < 100);
        assert_eq!(result.outcome, SelectionOutcome::Fresh { attempts: 1 });
        seen.insert(result.index);
    }
    assert!(seen.len() > 50, "sampling looks far from uniform: {} distinct rows", seen.len());
}

#[test]
fn test_values_are_rounded_source_values() {
    let values = [0.12345, -3.25917, 2.675, 100.0, 0.005];
    let ds = f1_dataset(&values);
    for seed in 0..30 {
        let result = f1_selector().select(&ds, None, &mut RngSource::seeded(seed)).unwrap();
        assert_eq!(result.features[0].value, round2(values[result.index]));
    }
}

#[test]
fn test_repeated_calls_satisfy_invariants() {
    let ds = f1_dataset(&[1.111, 2.222, 3.333]);
    let selector = f1_selector();
    let mut rng = RngSource::seeded(3);
    for _ in 0..50 {
        let result = selector.select(&ds, Some(2), &mut rng).unwrap();
        assert_ne!(result.index, 2);
        assert_eq!(result.features.len(), 1);
    }
}

#[test]
fn test_full_feature_list_from_csv() {
    let tmp = tempfile::NamedTempFile::with_suffix(".csv").unwrap();
    write!(tmp.as_file(), "{}", common::predictions_csv(5)).unwrap();
    tmp.as_file().flush().unwrap();

    let ds = CsvSource::new(tmp.path()).load().unwrap();
    let result = select(&ds, Some(2)).unwrap();

    assert_ne!(result.index, 2);
    assert_eq!(result.features.len(), 15);
    for (col, (feature, name)) in result.features.iter().zip(FEATURES).enumerate() {
        assert_eq!(feature.name, name);
        assert_eq!(feature.value, round2(common::feature_value(result.index, col)));
    }
}

#[test]
fn test_frame_source_feeds_selector() {
    let source = FrameSource::new(df!("f1" => &[5.555], "y_true" => &[1i64], "y_pred" => &[1i64]).unwrap());
    let ds = source.load().unwrap();
    let result = f1_selector().select(&ds, Some(0), &mut RngSource::thread()).unwrap();
    assert_eq!(result.index, 0);
    assert_eq!(result.outcome, SelectionOutcome::Repeated);
    assert!(result.prediction_matches());
}

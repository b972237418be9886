//! HTTP request handlers

use std::sync::Arc;

use axum::{
    extract::{Form, Query, State},
    response::Html,
    Json,
};
use serde::Deserialize;
use tracing::{debug, info};

use crate::selector::SelectionResult;

use super::error::{Result, ServerError};
use super::page::render_selection;
use super::state::AppState;

/// Form / query carrying the previously shown row index
#[derive(Debug, Default, Deserialize)]
pub struct IndexForm {
    #[serde(default)]
    pub index: Option<String>,
}

impl IndexForm {
    /// Excluded row index; empty or unparsable values mean "none"
    pub fn excluded(&self) -> Option<usize> {
        parse_index(self.index.as_deref())
    }
}

pub fn parse_index(raw: Option<&str>) -> Option<usize> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return None;
    }
    match raw.parse::<usize>() {
        Ok(index) => Some(index),
        Err(_) => {
            debug!(value = %raw, "Ignoring unparsable index field");
            None
        }
    }
}

/// Load and select on the blocking pool
async fn run_selection(state: Arc<AppState>, excluded: Option<usize>) -> Result<SelectionResult> {
    let result = tokio::task::spawn_blocking(move || state.select(excluded))
        .await
        .map_err(|e| ServerError::Internal(format!("Selection task failed: {}", e)))??;
    Ok(result)
}

// ============================================================================
// Page Handlers
// ============================================================================

/// First visit: any row
pub async fn show_page(State(state): State<Arc<AppState>>) -> Result<Html<String>> {
    let result = run_selection(state, None).await?;
    info!(index = result.index, "Rendered company page");
    Ok(Html(render_selection(&result)))
}

/// "Show another company": any row except the one posted back
pub async fn next_page(
    State(state): State<Arc<AppState>>,
    Form(form): Form<IndexForm>,
) -> Result<Html<String>> {
    let excluded = form.excluded();
    let result = run_selection(state, excluded).await?;
    info!(index = result.index, excluded = ?excluded, "Rendered company page");
    Ok(Html(render_selection(&result)))
}

// ============================================================================
// API Handlers
// ============================================================================

pub async fn sample_json(
    State(state): State<Arc<AppState>>,
    Query(query): Query<IndexForm>,
) -> Result<Json<SelectionResult>> {
    let result = run_selection(state, query.excluded()).await?;
    Ok(Json(result))
}

/// Schema report for the configured data source
pub async fn dataset_report(State(state): State<Arc<AppState>>) -> Result<Json<serde_json::Value>> {
    let source = Arc::clone(&state.source);
    let dataset = tokio::task::spawn_blocking(move || source.load())
        .await
        .map_err(|e| ServerError::Internal(format!("Dataset task failed: {}", e)))??;

    let missing: Vec<&str> = dataset.missing_columns(&state.selector.required_columns());

    Ok(Json(serde_json::json!({
        "path": state.source.describe(),
        "rows": dataset.len(),
        "columns": dataset.width(),
        "missing_columns": missing,
        "ready": missing.is_empty() && !dataset.is_empty(),
    })))
}

pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_index() {
        assert_eq!(parse_index(Some("12")), Some(12));
        assert_eq!(parse_index(Some(" 3 ")), Some(3));
        assert_eq!(parse_index(Some("")), None);
        assert_eq!(parse_index(Some("abc")), None);
        assert_eq!(parse_index(Some("-1")), None);
        assert_eq!(parse_index(None), None);
    }
}

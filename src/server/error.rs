//! Error types for the server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::error::ExplorerError;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Internal error: {0}")]
    Internal(String),

    #[error(transparent)]
    Explorer(#[from] ExplorerError),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ServerError::Internal(msg) => {
                tracing::error!(detail = %msg, "Internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, "An internal error occurred".to_string())
            }
            ServerError::Explorer(e) => {
                tracing::error!(detail = %e, "Dataset error");
                let message = match e {
                    ExplorerError::EmptyDataset => "The predictions dataset is empty".to_string(),
                    ExplorerError::MissingColumn(_) => {
                        "The predictions dataset does not have the expected columns".to_string()
                    }
                    ExplorerError::Data(_) | ExplorerError::Io(_) => {
                        "The predictions dataset could not be read".to_string()
                    }
                };
                (StatusCode::INTERNAL_SERVER_ERROR, message)
            }
        };

        let body = Json(json!({
            "error": true,
            "message": message,
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, ServerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dataset_errors_map_to_500() {
        let response = ServerError::from(ExplorerError::EmptyDataset).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let response = ServerError::from(ExplorerError::MissingColumn("y_true".into())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_internal_error_hides_detail() {
        let response = ServerError::Internal("join failed".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}

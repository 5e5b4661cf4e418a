use axum::{
    Json,
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::constants::QIG_STATUS_HEADER;
use crate::phrase::{InvalidPhrase, ValidationError};
use crate::search::SearchError;
use crate::targets::TargetError;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Target(#[from] TargetError),

    #[error(transparent)]
    Search(SearchError),

    #[error("internal error: {0}")]
    InternalError(String),
}

impl From<SearchError> for GatewayError {
    fn from(err: SearchError) -> Self {
        match err {
            SearchError::Validation(e) => GatewayError::Validation(e),
            other => GatewayError::Search(other),
        }
    }
}

#[derive(serde::Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
    /// Offending batch entries, when a batch failed structural validation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invalid: Option<Vec<InvalidPhrase>>,
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let (status, qig_status) = match &self {
            GatewayError::InvalidRequest(_) => (StatusCode::BAD_REQUEST, "invalid_request"),
            GatewayError::Validation(_) => (StatusCode::BAD_REQUEST, "invalid_phrase"),
            GatewayError::Target(TargetError::InvalidAddress { .. }) => {
                (StatusCode::BAD_REQUEST, "invalid_target")
            }
            GatewayError::Target(TargetError::Duplicate { .. }) => {
                (StatusCode::CONFLICT, "duplicate_target")
            }
            GatewayError::Target(TargetError::NotFound { .. }) => {
                (StatusCode::NOT_FOUND, "target_not_found")
            }
            GatewayError::Search(SearchError::AlreadyRunning) => {
                (StatusCode::CONFLICT, "already_running")
            }
            GatewayError::Search(SearchError::Timeout { .. }) => {
                (StatusCode::GATEWAY_TIMEOUT, "timeout")
            }
            GatewayError::Search(SearchError::Derivation(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "derivation_error")
            }
            GatewayError::Search(_) | GatewayError::InternalError(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error")
            }
        };

        let invalid = match &self {
            GatewayError::Validation(ValidationError::InvalidBatch { invalid, .. }) => {
                Some(invalid.clone())
            }
            _ => None,
        };

        let mut headers = HeaderMap::new();
        headers.insert(QIG_STATUS_HEADER, HeaderValue::from_static(qig_status));

        let body = Json(ErrorResponse {
            error: self.to_string(),
            code: status.as_u16(),
            invalid,
        });

        (status, headers, body).into_response()
    }
}

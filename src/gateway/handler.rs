use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::constants::QIG_STATUS_HEADER;
use crate::derive::AddressDeriver;
use crate::export::{CSV_CONTENT_TYPE, CSV_FILENAME, candidates_to_csv};
use crate::gateway::error::GatewayError;
use crate::gateway::state::AppState;
use crate::phrase::{Phrase, ValidationError, validate_batch, validate_single};
use crate::scoring::QigScore;
use crate::search::{SearchState, SearchStrategy};
use crate::store::Candidate;

#[derive(Debug, Deserialize)]
pub struct TestPhraseRequest {
    pub phrase: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TestPhraseResponse {
    pub phrase: String,
    pub address: String,
    #[serde(rename = "match")]
    pub is_match: bool,
    pub score: f64,
    pub qig_score: QigScore,
}

#[derive(Debug, Deserialize)]
pub struct BatchTestRequest {
    pub phrases: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum BatchTestResponse {
    Found {
        found: bool,
        phrase: String,
        address: String,
        score: f64,
    },
    #[serde(rename_all = "camelCase")]
    Exhausted {
        tested: u64,
        high_phi_candidates: u64,
        failed: u64,
        candidates: Vec<Candidate>,
    },
}

#[derive(Debug, Serialize)]
pub struct KnownPhrasesResponse {
    pub phrases: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct AddTargetRequest {
    pub address: String,
    #[serde(default)]
    pub label: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct StartSearchRequest {
    pub strategy: SearchStrategy,
    #[serde(default)]
    pub phrase: Option<String>,
    #[serde(default)]
    pub phrases: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
pub struct StartSearchResponse {
    pub state: SearchState,
    pub strategy: SearchStrategy,
    pub total: usize,
}

#[derive(Debug, Serialize)]
pub struct StopSearchResponse {
    pub stopped: bool,
    pub state: SearchState,
}

#[derive(Debug, Serialize)]
pub struct ClearCandidatesResponse {
    pub cleared: usize,
}

/// Deserializes a JSON body, turning schema errors into a 400.
fn parse_body<T: serde::de::DeserializeOwned>(body: serde_json::Value) -> Result<T, GatewayError> {
    serde_json::from_value(body)
        .map_err(|e| GatewayError::InvalidRequest(format!("Invalid request schema: {}", e)))
}

fn with_status(status: StatusCode, qig_status: &'static str, body: impl IntoResponse) -> Response {
    let mut headers = HeaderMap::new();
    headers.insert(QIG_STATUS_HEADER, HeaderValue::from_static(qig_status));
    (status, headers, body).into_response()
}

#[instrument(skip(state))]
pub async fn verify_crypto_handler<D>(State(state): State<AppState<D>>) -> Result<Response, GatewayError>
where
    D: AddressDeriver + 'static,
{
    let deriver = Arc::clone(state.evaluator().deriver());
    let report = tokio::task::spawn_blocking(move || deriver.self_test())
        .await
        .map_err(|e| GatewayError::InternalError(e.to_string()))?;

    if report.success {
        Ok(with_status(StatusCode::OK, "verified", Json(report)))
    } else {
        warn!(error = ?report.error, "Deriver self-test failed");
        Ok(with_status(
            StatusCode::INTERNAL_SERVER_ERROR,
            "self_test_failed",
            Json(report),
        ))
    }
}

#[instrument(skip(state, body))]
pub async fn test_phrase_handler<D>(
    State(state): State<AppState<D>>,
    Json(body): Json<serde_json::Value>,
) -> Result<Response, GatewayError>
where
    D: AddressDeriver + 'static,
{
    let request: TestPhraseRequest = parse_body(body)?;
    let phrase = validate_single(&request.phrase)?;

    let unit = state.evaluator().evaluate(&phrase).await?;
    let qig_status = if unit.is_match() { "match" } else { "tested" };

    Ok(with_status(
        StatusCode::OK,
        qig_status,
        Json(TestPhraseResponse {
            is_match: unit.is_match(),
            score: unit.score.total_score,
            qig_score: unit.score,
            phrase: unit.phrase,
            address: unit.address,
        }),
    ))
}

#[instrument(skip(state, body))]
pub async fn batch_test_handler<D>(
    State(state): State<AppState<D>>,
    Json(body): Json<serde_json::Value>,
) -> Result<Response, GatewayError>
where
    D: AddressDeriver + 'static,
{
    let request: BatchTestRequest = parse_body(body)?;
    let phrases = validate_batch(&request.phrases).into_phrases()?;
    debug!(count = phrases.len(), "Batch validated");

    let report = state.evaluator().evaluate_batch(&phrases).await;

    if let Some(found) = report.found {
        return Ok(with_status(
            StatusCode::OK,
            "match",
            Json(BatchTestResponse::Found {
                found: true,
                phrase: found.phrase,
                address: found.address,
                score: found.score.total_score,
            }),
        ));
    }

    Ok(with_status(
        StatusCode::OK,
        "tested",
        Json(BatchTestResponse::Exhausted {
            tested: report.tested,
            high_phi_candidates: report.high_phi_candidates,
            failed: report.failed,
            candidates: report.candidates,
        }),
    ))
}

#[instrument(skip(state))]
pub async fn known_phrases_handler<D>(State(state): State<AppState<D>>) -> Json<KnownPhrasesResponse>
where
    D: AddressDeriver + 'static,
{
    Json(KnownPhrasesResponse {
        phrases: state
            .known_phrases
            .iter()
            .map(|p| p.as_str().to_string())
            .collect(),
    })
}

#[instrument(skip(state))]
pub async fn list_candidates_handler<D>(State(state): State<AppState<D>>) -> Json<Vec<Candidate>>
where
    D: AddressDeriver + 'static,
{
    Json(state.store().list())
}

#[instrument(skip(state))]
pub async fn clear_candidates_handler<D>(
    State(state): State<AppState<D>>,
) -> Json<ClearCandidatesResponse>
where
    D: AddressDeriver + 'static,
{
    let cleared = state.store().len();
    state.store().clear();
    info!(cleared, "Candidate store cleared");
    Json(ClearCandidatesResponse { cleared })
}

#[instrument(skip(state))]
pub async fn export_candidates_handler<D>(State(state): State<AppState<D>>) -> Response
where
    D: AddressDeriver + 'static,
{
    let csv = candidates_to_csv(&state.store().list());

    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(CSV_CONTENT_TYPE));
    if let Ok(value) = HeaderValue::from_str(&format!("attachment; filename=\"{CSV_FILENAME}\"")) {
        headers.insert(header::CONTENT_DISPOSITION, value);
    }

    (StatusCode::OK, headers, csv).into_response()
}

#[instrument(skip(state))]
pub async fn list_targets_handler<D>(State(state): State<AppState<D>>) -> Response
where
    D: AddressDeriver + 'static,
{
    Json(state.targets().list()).into_response()
}

#[instrument(skip(state, body))]
pub async fn add_target_handler<D>(
    State(state): State<AppState<D>>,
    Json(body): Json<serde_json::Value>,
) -> Result<Response, GatewayError>
where
    D: AddressDeriver + 'static,
{
    let request: AddTargetRequest = parse_body(body)?;
    let target = state.targets().add(&request.address, request.label)?;
    info!(id = %target.id, address = %target.address, "Target added");
    Ok(with_status(StatusCode::CREATED, "created", Json(target)))
}

#[instrument(skip(state))]
pub async fn remove_target_handler<D>(
    State(state): State<AppState<D>>,
    Path(id): Path<Uuid>,
) -> Result<Response, GatewayError>
where
    D: AddressDeriver + 'static,
{
    let target = state.targets().remove(id)?;
    info!(id = %target.id, "Target removed");
    Ok(with_status(StatusCode::OK, "removed", Json(target)))
}

/// Resolves the phrases a session should run, validating caller input up front.
fn session_phrases<D>(
    state: &AppState<D>,
    request: StartSearchRequest,
) -> Result<Vec<Phrase>, GatewayError>
where
    D: AddressDeriver + 'static,
{
    match request.strategy {
        SearchStrategy::Custom => {
            let text = request.phrase.ok_or_else(|| {
                GatewayError::InvalidRequest("custom strategy requires 'phrase'".to_string())
            })?;
            Ok(vec![validate_single(&text)?])
        }
        SearchStrategy::Known => {
            if state.known_phrases.is_empty() {
                return Err(ValidationError::EmptyBatch.into());
            }
            Ok(state.known_phrases.as_ref().clone())
        }
        SearchStrategy::Batch => {
            let texts = request.phrases.ok_or_else(|| {
                GatewayError::InvalidRequest("batch strategy requires 'phrases'".to_string())
            })?;
            Ok(validate_batch(texts.as_slice()).into_phrases()?)
        }
    }
}

#[instrument(skip(state, body))]
pub async fn start_search_handler<D>(
    State(state): State<AppState<D>>,
    Json(body): Json<serde_json::Value>,
) -> Result<Response, GatewayError>
where
    D: AddressDeriver + 'static,
{
    let request: StartSearchRequest = parse_body(body)?;
    let strategy = request.strategy;
    let phrases = session_phrases(&state, request)?;
    let total = phrases.len();

    let ticket = state.controller.start(strategy)?;
    let controller = Arc::clone(&state.controller);
    tokio::spawn(async move {
        controller.run(ticket, phrases).await;
    });

    info!(strategy = %strategy, total, "Search session started");
    Ok(with_status(
        StatusCode::ACCEPTED,
        "running",
        Json(StartSearchResponse {
            state: SearchState::Running,
            strategy,
            total,
        }),
    ))
}

#[instrument(skip(state))]
pub async fn stop_search_handler<D>(State(state): State<AppState<D>>) -> Json<StopSearchResponse>
where
    D: AddressDeriver + 'static,
{
    let stopped = state.controller.stop();
    Json(StopSearchResponse {
        stopped,
        state: state.controller.state(),
    })
}

#[instrument(skip(state))]
pub async fn search_status_handler<D>(State(state): State<AppState<D>>) -> Response
where
    D: AddressDeriver + 'static,
{
    let status = state.controller.status();
    let qig_status = match status.state {
        SearchState::Idle => "idle",
        SearchState::Running => "running",
        SearchState::Stopped => "stopped",
        SearchState::Found => "found",
        SearchState::Completed => "completed",
    };
    with_status(StatusCode::OK, qig_status, Json(status))
}

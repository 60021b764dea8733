use crate::infra::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use intro_rubric::error::AppError;
use intro_rubric::validation::{ScoreRequest, ValidationError};
use intro_rubric::ScoreResult;
use serde_json::{json, Value};
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) fn scoring_router(state: AppState) -> Router {
    Router::new()
        .route("/score", post(score_endpoint))
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .with_state(state)
}

pub(crate) async fn healthcheck() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn score_endpoint(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<ScoreResult>, AppError> {
    let Json(payload) =
        payload.map_err(|rejection| ValidationError::MalformedBody(rejection.body_text()))?;
    let ScoreRequest {
        transcript,
        duration_sec,
    } = ScoreRequest::from_payload(&payload, state.scoring.default_duration_sec)?;

    let engine = Arc::clone(&state.engine);
    let result = tokio::task::spawn_blocking(move || engine.score(&transcript, duration_sec))
        .await
        .map_err(|err| AppError::Internal(err.to_string()))?;

    info!(
        final_score = result.final_score,
        word_count = result.total_word_count,
        duration_sec,
        "transcript scored"
    );

    Ok(Json(result))
}

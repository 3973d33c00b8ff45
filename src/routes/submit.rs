use std::net::SocketAddr;

use axum::body::Bytes;
use axum::extract::{ConnectInfo, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::error::{AppError, MSG_SUBMITTED};
use crate::form::FormStep;
use crate::state::SharedState;
use crate::submission::envelope::RecordEnvelope;
use crate::submission::{metadata, pipeline};

pub async fn submit_step_one(
    State(state): State<SharedState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, AppError> {
    submit(&state, FormStep::One, addr, &headers, &body).await
}

pub async fn submit_step_two(
    State(state): State<SharedState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, AppError> {
    submit(&state, FormStep::Two, addr, &headers, &body).await
}

async fn submit(
    state: &SharedState,
    step: FormStep,
    addr: SocketAddr,
    headers: &HeaderMap,
    body: &[u8],
) -> Result<Response, AppError> {
    // Missing credentials win over any other problem with the request.
    pipeline::ensure_configured(state)?;

    // Unreadable bodies get the same opaque answer as any other failure.
    let envelope = RecordEnvelope::from_slice(body)
        .map_err(|e| AppError::Internal(format!("unreadable {step} body: {e}")))?;

    let client = metadata::extract(headers, Some(addr.ip()), &state.config.trusted_proxies);
    let result = pipeline::run(state, step, &client, envelope).await?;

    tracing::debug!("Submission {} acknowledged", result.reference);

    Ok((StatusCode::OK, Json(json!({ "message": MSG_SUBMITTED }))).into_response())
}

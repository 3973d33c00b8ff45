use uuid::Uuid;

use crate::error::{AppError, MSG_DUPLICATE};
use crate::form::FormStep;
use crate::rate_limit::IdempotencyGuard;
use crate::state::SharedState;

use super::envelope::RecordEnvelope;
use super::metadata::ClientInfo;

#[derive(Debug)]
pub struct PipelineResult {
    pub reference: Uuid,
    pub record_ids: Vec<String>,
}

/// Fails before anything else when the store credentials are absent.
pub fn ensure_configured(state: &SharedState) -> Result<(), AppError> {
    if state.config.airtable.credentials().is_none() {
        return Err(AppError::Configuration(
            "AIRTABLE_PAT and AIRTABLE_BASE_ID must both be set".to_string(),
        ));
    }
    Ok(())
}

/// Deliver one submission: configuration check, rate limit, duplicate check, one create call.
pub async fn run(
    state: &SharedState,
    step: FormStep,
    client: &ClientInfo,
    envelope: RecordEnvelope,
) -> Result<PipelineResult, AppError> {
    ensure_configured(state)?;

    let limits = &state.config.limits;
    state
        .submission_limiter
        .check(step, client.ip, limits.rate_limit, limits.rate_window_secs)
        .map_err(AppError::RateLimited)?;

    let reservation = match envelope.email() {
        Some(email) => {
            let key = IdempotencyGuard::key(step, email);
            let reservation = state.idempotency.reserve(key);
            if reservation.is_none() {
                tracing::info!("Duplicate {step} submission rejected from {}", client.ip);
                return Err(AppError::Conflict(MSG_DUPLICATE.to_string()));
            }
            reservation
        }
        None => None,
    };

    let reference = Uuid::now_v7();
    tracing::debug!(
        "Delivering {step} submission {reference} ({} record(s)) to {} for {} [{}]",
        envelope.records.len(),
        state.sink.name(),
        client.ip,
        client.user_agent
    );

    let record_ids = state
        .sink
        .create_records(&state.config.airtable.table, &envelope.records)
        .await?;

    if let Some(reservation) = reservation {
        reservation.commit();
    }

    tracing::info!("Submission {reference} ({step}) stored as {record_ids:?}");

    Ok(PipelineResult {
        reference,
        record_ids,
    })
}

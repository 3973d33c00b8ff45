use std::sync::Arc;

use crate::config::Config;
use crate::rate_limit::{IdempotencyGuard, SubmissionRateLimiter};
use crate::sink::RecordSink;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub config: Config,
    pub sink: Arc<dyn RecordSink>,
    pub submission_limiter: SubmissionRateLimiter,
    pub idempotency: IdempotencyGuard,
}

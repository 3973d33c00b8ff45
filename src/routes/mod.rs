pub mod submit;

use axum::routing::post;
use axum::Router;

use crate::form::FormStep;
use crate::state::SharedState;

pub fn api_routes() -> Router<SharedState> {
    Router::new()
        .route(FormStep::One.endpoint(), post(submit::submit_step_one))
        .route(FormStep::Two.endpoint(), post(submit::submit_step_two))
}

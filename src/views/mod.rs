pub mod form;

use axum::response::Redirect;
use axum::routing::get;
use axum::Router;

use crate::state::SharedState;

pub fn view_routes() -> Router<SharedState> {
    Router::new()
        .route("/", get(|| async { Redirect::to("/inscricao/etapa-1") }))
        .route("/inscricao/{slug}", get(form::form_page).post(form::submit_page))
}

pub mod submit;

use axum::routing::post;
use axum::Router;

use crate::state::SharedState;

pub const SUBMIT_FORM_PATH: &str = "/api/submit-form";

pub fn relay_routes() -> Router<SharedState> {
    Router::new().route(SUBMIT_FORM_PATH, post(submit::submit_form))
}

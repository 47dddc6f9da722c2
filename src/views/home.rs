use askama::Template;
use axum::extract::State;
use axum::response::Html;

use crate::error::AppError;
use crate::profile::Profile;
use crate::routes::SUBMIT_FORM_PATH;
use crate::state::SharedState;

#[derive(Template)]
#[template(path = "home.html")]
struct HomeTemplate<'a> {
    profile: &'a Profile,
    form_action: &'a str,
}

pub async fn index(State(state): State<SharedState>) -> Result<Html<String>, AppError> {
    let template = HomeTemplate {
        profile: &state.profile,
        form_action: SUBMIT_FORM_PATH,
    };
    Ok(Html(template.render()?))
}

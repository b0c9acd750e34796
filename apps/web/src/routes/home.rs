use axum::{extract::State, response::Html};
use serde::Serialize;

use crate::{error::AppError, state::AppState, templates};

#[derive(Serialize)]
struct HomePage {}

#[tracing::instrument(name = "GET /", skip(state))]
pub async fn home(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    templates::render(&state.templates, "home.html", &HomePage {})
}

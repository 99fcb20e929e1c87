//! ML risk assessment handlers

use axum::{extract::State, response::Html, Form};
use serde::Deserialize;

use crate::{predictor, render, AppError, AppResult, AppState};

#[derive(Debug, Deserialize)]
pub struct MlForm {
    pub community_ml: String,
}

/// GET /ml - show the prediction form
pub async fn show(State(state): State<AppState>) -> Html<String> {
    Html(render::ml_page(&state.dataset.communities(), None, None))
}

/// POST /ml - run the model and report the prediction or failure message
pub async fn submit(
    State(state): State<AppState>,
    Form(form): Form<MlForm>,
) -> AppResult<Html<String>> {
    let dataset = state.dataset.clone();
    let model_path = state.config.model_path.clone();
    let community = form.community_ml.clone();

    // Model load and inference are blocking; keep them off the runtime
    let outcome = tokio::task::spawn_blocking(move || {
        predictor::predict(&dataset, &community, &model_path)
    })
    .await
    .map_err(|e| AppError::InternalError(e.to_string()))?;

    let message = outcome.message(&form.community_ml);
    tracing::debug!(community = %form.community_ml, %message, "ml prediction");

    Ok(Html(render::ml_page(
        &state.dataset.communities(),
        Some(&form.community_ml),
        Some(&message),
    )))
}

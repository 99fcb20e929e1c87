//! Risk assessment handlers

use axum::{extract::State, response::Html, Form};
use serde::Deserialize;

use crate::{plot, render, risk, AppResult, AppState};

#[derive(Debug, Deserialize)]
pub struct RiskForm {
    pub property_type: String,
    pub community: String,
}

/// GET /risk - show the assessment form
pub async fn show(State(state): State<AppState>) -> Html<String> {
    Html(render::risk_page(
        &risk::property_types(),
        &state.dataset.communities(),
        None,
    ))
}

/// POST /risk - compute the score and embed the scatter plot
pub async fn submit(
    State(state): State<AppState>,
    Form(form): Form<RiskForm>,
) -> AppResult<Html<String>> {
    let score = risk::score(&state.dataset, &form.property_type, &form.community);

    tracing::debug!(
        property_type = %form.property_type,
        community = %form.community,
        likelihood = score.likelihood,
        consequence = score.consequence,
        "risk score computed"
    );

    let plot_uri = plot::risk_scatter(score)?;

    Ok(Html(render::risk_page(
        &risk::property_types(),
        &state.dataset.communities(),
        Some((score, plot_uri.as_str())),
    )))
}

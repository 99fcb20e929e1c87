//! Community Equity Index view

use axum::{extract::State, response::Html};

use crate::{render, AppState};

/// Source columns paired with their display headers. Columns missing from
/// the dataset are dropped from the view rather than erroring.
const DISPLAY_COLUMNS: [(&str, &str); 5] = [
    ("Community", "Community"),
    ("total_weighted_CEI_Score", "Total Equity Score"),
    (
        "community_belonging_and_safety_domain_score",
        "Community Belonging and Safety Domain Score",
    ),
    (
        "economic_opportunity_domain_score",
        "Economic Opportunity Domain Score",
    ),
    ("adult_litp", "Low Income Transit Pass (Adult) (%)"),
];

/// GET /cei
pub async fn table(State(state): State<AppState>) -> Html<String> {
    let view = state.dataset.table(&DISPLAY_COLUMNS);
    Html(render::table_page("CEI Data", "/cei", &view))
}

//! Employment data view

use axum::{extract::State, response::Html};

use crate::{render, AppState};

const DISPLAY_COLUMNS: [(&str, &str); 7] = [
    ("Community", "Community"),
    ("EMPLOYED", "EMPLOYED"),
    ("UNEMPLOYED", "UNEMPLOYED"),
    ("TOTAL_POP_OVER_15_HOUSEHOLD", "TOTAL_POP_OVER_15_HOUSEHOLD"),
    ("IN_LABOUR_FORCE", "IN_LABOUR_FORCE"),
    ("SELF_EMPLOYED", "SELF_EMPLOYED"),
    ("NOT_IN_LABOUR_FORCE", "NOT_IN_LABOUR_FORCE"),
];

/// GET /employment
pub async fn table(State(state): State<AppState>) -> Html<String> {
    let view = state.dataset.table(&DISPLAY_COLUMNS);
    Html(render::table_page("Employment Data", "/employment", &view))
}

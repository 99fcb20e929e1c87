//! Home page handler

use axum::response::Html;

use crate::render;

pub async fn index() -> Html<String> {
    Html(render::home_page())
}

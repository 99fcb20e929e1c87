//! Community Risk & Equity Portal
//!
//! Reporting server over a pre-computed community indicator dataset.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                COMMUNITY RISK PORTAL                     │
//! ├──────────────────────────────────────────────────────────┤
//! │  ┌──────────┐  ┌──────────┐  ┌──────────┐  ┌──────────┐  │
//! │  │  Views   │  │  Risk    │  │  Model   │  │  Static  │  │
//! │  │  (Axum)  │  │  Scorer  │  │Predictor │  │  Assets  │  │
//! │  └────┬─────┘  └────┬─────┘  └────┬─────┘  └──────────┘  │
//! │       └─────────────┼─────────────┘                      │
//! │                     ▼                                    │
//! │            ┌────────────────┐     ┌────────────────┐     │
//! │            │ Dataset (CSV,  │     │ Model artifact │     │
//! │            │ read-only)     │     │ (ONNX, on disk)│     │
//! │            └────────────────┘     └────────────────┘     │
//! └──────────────────────────────────────────────────────────┘
//! ```

mod config;
mod dataset;
mod error;
mod handlers;
mod plot;
mod predictor;
mod render;
mod risk;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    http::{header, HeaderValue},
    routing::get,
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer, services::ServeDir, set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub use error::{AppError, AppResult};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "community_risk_portal=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::from_env();

    tracing::info!("Community Risk Portal starting ({})", config.environment);

    // Load the dataset once; it is read-only for the process lifetime
    let dataset = dataset::Dataset::load(&config.dataset_path)
        .with_context(|| format!("loading dataset from {}", config.dataset_path.display()))?;
    tracing::info!(
        "Dataset loaded: {} rows, {} columns",
        dataset.len(),
        dataset.columns().len()
    );

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));

    let state = AppState {
        dataset: Arc::new(dataset),
        config,
    };
    let app = create_router(state);

    tracing::info!("Server listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub dataset: Arc<dataset::Dataset>,
    pub config: config::Config,
}

/// Create the main router with all routes
fn create_router(state: AppState) -> Router {
    // Static assets carry a fixed 24-hour freshness window
    let static_service = ServiceBuilder::new()
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("public, max-age=86400"),
        ))
        .service(ServeDir::new(state.config.static_dir.clone()));

    Router::new()
        .route("/", get(handlers::home::index))
        .route("/health", get(handlers::health::check))
        .route(
            "/risk",
            get(handlers::risk::show).post(handlers::risk::submit),
        )
        .route("/cei", get(handlers::cei::table))
        .route("/employment", get(handlers::employment::table))
        .route("/ml", get(handlers::ml::show).post(handlers::ml::submit))
        .nest_service("/static", static_service)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{Cell, Dataset};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn fixture_state() -> AppState {
        let columns = vec![
            "Community".to_string(),
            "Crime Count".to_string(),
            "total_weighted_CEI_Score".to_string(),
            "EMPLOYED".to_string(),
        ];
        let rows = vec![
            vec![
                Cell::Text("Alpha".into()),
                Cell::Number(500.0),
                Cell::Number(0.81),
                Cell::Number(1200.0),
            ],
            vec![
                Cell::Text("Beta".into()),
                Cell::Number(40.0),
                Cell::Number(0.62),
                Cell::Number(900.0),
            ],
        ];
        let dataset = Dataset::from_records(columns, rows).unwrap();

        AppState {
            dataset: Arc::new(dataset),
            config: config::Config {
                port: 0,
                dataset_path: "unused.csv".into(),
                model_path: "/nonexistent/risk_model.onnx".into(),
                static_dir: "static".into(),
                environment: "test".into(),
            },
        }
    }

    async fn body_text(request: Request<Body>) -> (StatusCode, String) {
        let response = create_router(fixture_state()).oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    fn form_post(uri: &str, body: &'static str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn home_page_renders() {
        let (status, body) = body_text(Request::get("/").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Community Risk"));
    }

    #[tokio::test]
    async fn risk_form_lists_communities() {
        let (status, body) = body_text(Request::get("/risk").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Alpha"));
        assert!(body.contains("Bank"));
    }

    #[tokio::test]
    async fn risk_post_embeds_plot_and_scores() {
        let (status, body) =
            body_text(form_post("/risk", "property_type=Bank&community=Alpha")).await;
        assert_eq!(status, StatusCode::OK);
        // base_freq 3 + 500/50 = 13; severity 9 * 10 = 90
        assert!(body.contains("13.00"));
        assert!(body.contains("90.00"));
        assert!(body.contains("data:image/png;base64,"));
    }

    #[tokio::test]
    async fn risk_post_for_missing_community_scores_zero() {
        let (status, body) =
            body_text(form_post("/risk", "property_type=Bank&community=Nowhere")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("0.00"));
    }

    #[tokio::test]
    async fn cei_table_renders_present_columns() {
        let (status, body) = body_text(Request::get("/cei").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Total Equity Score"));
        assert!(body.contains("0.81"));
        // Columns absent from the dataset are silently dropped
        assert!(!body.contains("Economic Opportunity Domain Score"));
    }

    #[tokio::test]
    async fn employment_table_renders() {
        let (status, body) =
            body_text(Request::get("/employment").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("EMPLOYED"));
        assert!(body.contains("1200"));
    }

    #[tokio::test]
    async fn ml_post_unknown_community_reports_not_found() {
        let (status, body) = body_text(form_post("/ml", "community_ml=Nowhere")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Community data not found."));
    }

    #[tokio::test]
    async fn ml_post_missing_artifact_reports_load_error() {
        let (status, body) = body_text(form_post("/ml", "community_ml=Alpha")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Error loading model:"));
    }

    #[tokio::test]
    async fn ml_post_is_idempotent() {
        let (_, first) = body_text(form_post("/ml", "community_ml=Alpha")).await;
        let (_, second) = body_text(form_post("/ml", "community_ml=Alpha")).await;
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn health_reports_dataset_size() {
        let (status, body) = body_text(Request::get("/health").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("\"dataset_rows\":2"));
    }
}

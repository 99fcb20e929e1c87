//! Model predictor - ONNX Runtime integration
//!
//! Loads the serialized risk regression model fresh on every predicting
//! request, reconciles the community's feature row against the schema the
//! model was trained on, and returns a scalar prediction. Every failure
//! mode degrades to a user-visible message; nothing here is fatal.

use std::path::Path;

use ndarray::Array2;
use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::value::Value;

use crate::dataset::Dataset;

/// Column excluded from the feature set (case-insensitive)
const TARGET_COLUMN: &str = "risk_score";

/// Outcome of a prediction request
#[derive(Debug, Clone, PartialEq)]
pub enum Prediction {
    Score(f32),
    CommunityNotFound,
    ModelLoadFailed(String),
    InferenceFailed(String),
}

impl Prediction {
    /// User-facing message shown on the ML page
    pub fn message(&self, community: &str) -> String {
        match self {
            Prediction::Score(value) => {
                format!("Predicted ML Risk Score for {community}: {value:.2}")
            }
            Prediction::CommunityNotFound => "Community data not found.".to_string(),
            Prediction::ModelLoadFailed(reason) => format!("Error loading model: {reason}"),
            Prediction::InferenceFailed(reason) => format!("ML prediction failed: {reason}"),
        }
    }
}

/// Reindex available (name, value) features to an expected ordering,
/// zero-filling names the dataset does not carry. Pure; reconciles schema
/// drift between the dataset and the artifact the model was trained on.
pub fn align_features(available: &[(String, f64)], expected: &[String]) -> Vec<f32> {
    expected
        .iter()
        .map(|name| {
            available
                .iter()
                .find(|(col, _)| col == name)
                .map_or(0.0, |(_, value)| *value as f32)
        })
        .collect()
}

/// Mean feature row for a community: numeric columns excluding the target,
/// empty cells counted as 0, multiple rows collapsed column-wise.
fn feature_row(dataset: &Dataset, community: &str) -> Option<Vec<(String, f64)>> {
    let rows = dataset.rows_for(community);
    if rows.is_empty() {
        return None;
    }

    let features = dataset
        .numeric_columns()
        .into_iter()
        .filter(|&idx| !dataset.columns()[idx].eq_ignore_ascii_case(TARGET_COLUMN))
        .map(|idx| {
            let sum: f64 = rows
                .iter()
                .map(|row| row[idx].as_number().unwrap_or(0.0))
                .sum();
            (dataset.columns()[idx].clone(), sum / rows.len() as f64)
        })
        .collect();

    Some(features)
}

/// Ordered feature names the artifact expects, from the sidecar JSON next
/// to the model file. `None` when the artifact exposes no schema.
fn expected_schema(model_path: &Path) -> Result<Option<Vec<String>>, String> {
    let sidecar = model_path.with_extension("features.json");
    if !sidecar.exists() {
        return Ok(None);
    }

    let raw = std::fs::read_to_string(&sidecar)
        .map_err(|e| format!("failed to read feature schema: {e}"))?;
    let names: Vec<String> =
        serde_json::from_str(&raw).map_err(|e| format!("invalid feature schema: {e}"))?;
    Ok(Some(names))
}

fn load_session(model_path: &Path) -> Result<Session, String> {
    if !model_path.exists() {
        return Err(format!("model not found: {}", model_path.display()));
    }

    Session::builder()
        .map_err(|e| format!("failed to create session builder: {e}"))?
        .with_optimization_level(GraphOptimizationLevel::Level3)
        .map_err(|e| format!("failed to set optimization: {e}"))?
        .commit_from_file(model_path)
        .map_err(|e| format!("failed to load model: {e}"))
}

fn run_inference(session: &mut Session, features: &[f32]) -> Result<f32, String> {
    let input_array = Array2::<f32>::from_shape_vec((1, features.len()), features.to_vec())
        .map_err(|e| format!("array error: {e}"))?;

    let output_name = session
        .outputs
        .first()
        .map(|o| o.name.clone())
        .ok_or_else(|| "no output defined".to_string())?;

    let input_tensor =
        Value::from_array(input_array).map_err(|e| format!("tensor error: {e}"))?;

    let outputs = session
        .run(ort::inputs![input_tensor])
        .map_err(|e| format!("inference failed: {e}"))?;

    let output = outputs
        .get(&output_name)
        .ok_or_else(|| "no output".to_string())?;

    let output_tensor = output
        .try_extract_tensor::<f32>()
        .map_err(|e| format!("extract error: {e}"))?;

    output_tensor
        .1
        .first()
        .copied()
        .ok_or_else(|| "empty prediction".to_string())
}

/// Predict the ML risk score for a community.
///
/// The model is loaded from disk on every call; concurrent requests do not
/// share a session.
pub fn predict(dataset: &Dataset, community: &str, model_path: &Path) -> Prediction {
    let Some(features) = feature_row(dataset, community) else {
        return Prediction::CommunityNotFound;
    };

    let mut session = match load_session(model_path) {
        Ok(session) => session,
        Err(reason) => return Prediction::ModelLoadFailed(reason),
    };

    let aligned: Vec<f32> = match expected_schema(model_path) {
        Ok(Some(expected)) => align_features(&features, &expected),
        Ok(None) => features.iter().map(|(_, value)| *value as f32).collect(),
        Err(reason) => return Prediction::ModelLoadFailed(reason),
    };

    tracing::debug!(
        community,
        features = aligned.len(),
        "running risk model inference"
    );

    match run_inference(&mut session, &aligned) {
        Ok(value) => Prediction::Score(value),
        Err(reason) => Prediction::InferenceFailed(reason),
    }
}

use anyhow::anyhow;
use axum::{extract::State, Json};
use serde_json::Value;

use crate::error::AppError;
use crate::models::FeatureRecord;
use crate::services::predictor::Prediction;
use crate::startup::AppState;

/// POST /predict — classify one customer record into a coverage tier.
pub async fn predict(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<Prediction>, AppError> {
    let record = match body {
        Value::Object(fields) => FeatureRecord::new(fields),
        other => {
            return Err(AppError::BadRequest(anyhow!(
                "expected a JSON object, got {}",
                json_type_name(&other)
            )))
        }
    };

    let prediction = state.predictor.predict(&record)?;
    tracing::debug!(coverage_level = %prediction.coverage_level, "prediction served");
    Ok(Json(prediction))
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

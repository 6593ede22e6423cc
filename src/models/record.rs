//! Customer feature record consumed by the prediction pipeline.

use anyhow::anyhow;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::AppError;

/// Categorical feature fields, in the fixed encoding order the training job
/// used for its column transformer.
pub const CATEGORICAL_FIELDS: [&str; 7] = [
    "gender",
    "smoker",
    "region",
    "medical_history",
    "family_medical_history",
    "exercise_frequency",
    "occupation",
];

/// Numeric feature fields, in fixed encoding order.
pub const NUMERICAL_FIELDS: [&str; 4] = ["age", "bmi", "children", "charges"];

/// Every field a record must carry, in schema order. Missing-field errors
/// report names in this order.
pub const REQUIRED_FIELDS: [&str; 11] = [
    "age",
    "bmi",
    "children",
    "gender",
    "smoker",
    "region",
    "medical_history",
    "family_medical_history",
    "exercise_frequency",
    "occupation",
    "charges",
];

/// Fill value the training imputer substitutes for absent categorical values.
const CATEGORICAL_FILL: &str = "missing";

/// One customer record as received over the wire. Keys beyond the required
/// schema are tolerated and ignored.
#[derive(Debug, Clone)]
pub struct FeatureRecord(Map<String, Value>);

impl FeatureRecord {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Read a numeric field. `None` means absent or null, which the caller
    /// imputes with the training mean. Anything that is not a JSON number
    /// cannot be coerced and is an inference failure.
    pub fn numeric(&self, field: &str) -> Result<Option<f64>, AppError> {
        match self.0.get(field) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Number(n)) => n.as_f64().map(Some).ok_or_else(|| {
                AppError::InferenceError(anyhow!(
                    "Value of field '{}' is out of numeric range",
                    field
                ))
            }),
            Some(other) => Err(AppError::InferenceError(anyhow!(
                "Could not convert value {} of field '{}' to a number",
                other,
                field
            ))),
        }
    }

    /// Read a categorical field as an opaque string. Absent/null values take
    /// the imputer fill value; scalar non-strings are stringified and, if
    /// unseen at training time, encode to an all-zero indicator downstream.
    pub fn categorical(&self, field: &str) -> Result<String, AppError> {
        match self.0.get(field) {
            None | Some(Value::Null) => Ok(CATEGORICAL_FILL.to_string()),
            Some(Value::String(s)) => Ok(s.clone()),
            Some(Value::Number(n)) => Ok(n.to_string()),
            Some(Value::Bool(b)) => Ok(b.to_string()),
            Some(other) => Err(AppError::InferenceError(anyhow!(
                "Could not use value {} of field '{}' as a category",
                other,
                field
            ))),
        }
    }
}

/// Coverage tiers with their training-time class codes. The serving-side
/// default table; the authoritative copy travels inside the model artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CoverageLevel {
    Basic,
    Premium,
    Standard,
}

impl CoverageLevel {
    pub const fn code(self) -> usize {
        match self {
            CoverageLevel::Basic => 0,
            CoverageLevel::Premium => 1,
            CoverageLevel::Standard => 2,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            CoverageLevel::Basic => "Basic",
            CoverageLevel::Premium => "Premium",
            CoverageLevel::Standard => "Standard",
        }
    }

    /// All tiers in class-code order.
    pub const fn all() -> [CoverageLevel; 3] {
        [
            CoverageLevel::Basic,
            CoverageLevel::Premium,
            CoverageLevel::Standard,
        ]
    }
}

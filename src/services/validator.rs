//! Feature schema validation.
//!
//! Presence check only: no type coercion, no range checks and no
//! categorical-membership checks happen here. Value-level problems surface
//! later as inference errors.

use crate::error::AppError;
use crate::models::{FeatureRecord, REQUIRED_FIELDS};

/// Names of required fields absent from the record, in schema order.
pub fn missing_fields(record: &FeatureRecord) -> Vec<String> {
    REQUIRED_FIELDS
        .iter()
        .filter(|field| !record.contains(field))
        .map(|field| field.to_string())
        .collect()
}

/// Confirm every required field is present before inference runs.
pub fn validate_schema(record: &FeatureRecord) -> Result<(), AppError> {
    let missing = missing_fields(record);
    if missing.is_empty() {
        Ok(())
    } else {
        Err(AppError::ValidationError(missing))
    }
}

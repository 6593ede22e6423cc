//! Request-scoped prediction orchestration.
//!
//! Validate, classify, resolve. Validation failures never reach the
//! classifier; classifier and resolver failures are per-request errors and
//! never take the serving loop down.

use serde::Serialize;

use crate::config::ModelConfig;
use crate::error::AppError;
use crate::models::FeatureRecord;
use crate::services::labels::LabelResolver;
use crate::services::pipeline::CoveragePipeline;
use crate::services::validator;

/// Successful prediction payload.
#[derive(Debug, Clone, Serialize)]
pub struct Prediction {
    pub coverage_level: String,
}

pub struct PredictionService {
    pipeline: CoveragePipeline,
    labels: LabelResolver,
}

impl PredictionService {
    /// Load the pipeline artifact from the configured path. Called once at
    /// startup; a failure here is fatal to process start.
    pub fn from_config(config: &ModelConfig) -> Result<Self, AppError> {
        let pipeline = CoveragePipeline::load(&config.path)?;
        Ok(Self::new(pipeline))
    }

    pub fn new(pipeline: CoveragePipeline) -> Self {
        let labels = LabelResolver::new(pipeline.labels().to_vec());
        Self { pipeline, labels }
    }

    pub fn n_classes(&self) -> usize {
        self.pipeline.n_classes()
    }

    /// Run the full pipeline for one record.
    pub fn predict(&self, record: &FeatureRecord) -> Result<Prediction, AppError> {
        validator::validate_schema(record)?;
        let code = self.pipeline.predict(record)?;
        let coverage_level = self.labels.resolve(code);
        Ok(Prediction { coverage_level })
    }
}

//! Pre-fitted preprocessing and classification pipeline.
//!
//! The artifact is produced by the offline training job and loaded exactly
//! once at startup. It carries everything inference needs: the fitted one-hot
//! categories, the fitted imputation/standardization statistics, the linear
//! classifier weights and the class-code label table. Nothing in here mutates
//! after load, so a single instance is shared across requests without locking.

use std::fs;
use std::path::Path;

use anyhow::anyhow;
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::{FeatureRecord, CATEGORICAL_FIELDS, NUMERICAL_FIELDS};

/// Artifact schema version. Bumped whenever the on-disk layout changes;
/// mismatched artifacts are rejected at load instead of misbehaving at
/// inference time.
pub const ARTIFACT_FORMAT_VERSION: u32 = 1;

/// Serialized form of the trained pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub format_version: u32,
    /// Class-code -> tier-name table, persisted with the model so serving
    /// never has to duplicate the training-time label encoding.
    pub labels: Vec<String>,
    pub preprocessor: PreprocessorParams,
    pub classifier: SoftmaxParams,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreprocessorParams {
    /// Fitted one-hot encodings, one entry per categorical field in schema
    /// order.
    pub categorical: Vec<CategoryEncoding>,
    /// Fitted imputation/standardization statistics, one entry per numeric
    /// field in schema order.
    pub numerical: Vec<NumericScaling>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryEncoding {
    pub field: String,
    /// Categories seen at fit time, in indicator-column order.
    pub categories: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NumericScaling {
    pub field: String,
    /// Training-set mean; doubles as the imputation value for null input.
    pub mean: f64,
    /// Training-set standard deviation.
    pub std: f64,
}

/// Fitted multinomial linear classifier over the transformed feature space.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SoftmaxParams {
    /// One weight row per class.
    pub weights: Vec<Vec<f64>>,
    pub bias: Vec<f64>,
}

/// A loaded, shape-checked pipeline ready for inference.
#[derive(Debug, Clone)]
pub struct CoveragePipeline {
    artifact: ModelArtifact,
    n_features: usize,
}

impl CoveragePipeline {
    /// Load and validate the artifact from disk. Any failure here is fatal to
    /// process start; there is no degraded serving mode without a model.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let path = path.as_ref();
        let raw = fs::read(path)
            .map_err(|e| AppError::ArtifactError(anyhow!("{}: {}", path.display(), e)))?;
        let artifact: ModelArtifact = serde_json::from_slice(&raw)
            .map_err(|e| AppError::ArtifactError(anyhow!("{}: {}", path.display(), e)))?;
        Self::from_artifact(artifact)
    }

    /// Validate an in-memory artifact against the fixed feature schema and
    /// the classifier shape.
    pub fn from_artifact(artifact: ModelArtifact) -> Result<Self, AppError> {
        if artifact.format_version != ARTIFACT_FORMAT_VERSION {
            return Err(AppError::ArtifactError(anyhow!(
                "unsupported artifact format version {} (expected {})",
                artifact.format_version,
                ARTIFACT_FORMAT_VERSION
            )));
        }

        let cat_fields: Vec<&str> = artifact
            .preprocessor
            .categorical
            .iter()
            .map(|c| c.field.as_str())
            .collect();
        if cat_fields != CATEGORICAL_FIELDS {
            return Err(AppError::ArtifactError(anyhow!(
                "categorical fields {:?} do not match the expected schema",
                cat_fields
            )));
        }

        let num_fields: Vec<&str> = artifact
            .preprocessor
            .numerical
            .iter()
            .map(|n| n.field.as_str())
            .collect();
        if num_fields != NUMERICAL_FIELDS {
            return Err(AppError::ArtifactError(anyhow!(
                "numerical fields {:?} do not match the expected schema",
                num_fields
            )));
        }

        let n_features: usize = artifact
            .preprocessor
            .categorical
            .iter()
            .map(|c| c.categories.len())
            .sum::<usize>()
            + artifact.preprocessor.numerical.len();

        let classifier = &artifact.classifier;
        if classifier.weights.is_empty() {
            return Err(AppError::ArtifactError(anyhow!(
                "classifier has no weight rows"
            )));
        }
        if classifier.bias.len() != classifier.weights.len() {
            return Err(AppError::ArtifactError(anyhow!(
                "classifier bias length {} does not match {} classes",
                classifier.bias.len(),
                classifier.weights.len()
            )));
        }
        if let Some(row) = classifier.weights.iter().find(|r| r.len() != n_features) {
            return Err(AppError::ArtifactError(anyhow!(
                "classifier weight row has width {} but the transformed space has {} features",
                row.len(),
                n_features
            )));
        }
        if artifact.labels.len() != classifier.weights.len() {
            tracing::warn!(
                labels = artifact.labels.len(),
                classes = classifier.weights.len(),
                "label table size differs from classifier class count"
            );
        }

        Ok(Self {
            artifact,
            n_features,
        })
    }

    pub fn labels(&self) -> &[String] {
        &self.artifact.labels
    }

    pub fn n_classes(&self) -> usize {
        self.artifact.classifier.weights.len()
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }

    /// Expand a record into the transformed feature vector: one-hot indicator
    /// blocks for the categorical fields (unknown category leaves its whole
    /// block zero, mirroring handle-unknown-ignore at fit time), then
    /// mean-imputed, standardized numeric fields.
    pub fn transform(&self, record: &FeatureRecord) -> Result<Vec<f64>, AppError> {
        let mut out = Vec::with_capacity(self.n_features);

        for encoding in &self.artifact.preprocessor.categorical {
            let value = record.categorical(&encoding.field)?;
            for category in &encoding.categories {
                out.push(if *category == value { 1.0 } else { 0.0 });
            }
        }

        for scaling in &self.artifact.preprocessor.numerical {
            let raw = record.numeric(&scaling.field)?.unwrap_or(scaling.mean);
            // Zero-variance columns keep unit scale, as the fitted scaler does.
            let scale = if scaling.std == 0.0 { 1.0 } else { scaling.std };
            out.push((raw - scaling.mean) / scale);
        }

        Ok(out)
    }

    /// Classify one record into a class code. Deterministic: linear scores
    /// over the transformed vector, argmax with ties broken by lowest index.
    pub fn predict(&self, record: &FeatureRecord) -> Result<usize, AppError> {
        let features = self.transform(record)?;
        let classifier = &self.artifact.classifier;

        let mut best = 0usize;
        let mut best_score = f64::NEG_INFINITY;
        for (idx, (row, bias)) in classifier
            .weights
            .iter()
            .zip(classifier.bias.iter())
            .enumerate()
        {
            let score: f64 =
                row.iter().zip(features.iter()).map(|(w, x)| w * x).sum::<f64>() + bias;
            if score > best_score {
                best_score = score;
                best = idx;
            }
        }
        Ok(best)
    }
}

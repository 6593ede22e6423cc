//! Class-code to coverage-tier resolution.

use crate::models::CoverageLevel;

/// Sentinel for codes outside the label table. A correctly paired artifact
/// never produces one, so hitting it is logged as an anomaly instead of
/// failing the request.
pub const UNKNOWN_LABEL: &str = "Unknown";

#[derive(Debug, Clone)]
pub struct LabelResolver {
    labels: Vec<String>,
}

impl LabelResolver {
    /// Build a resolver from the artifact's label table.
    pub fn new(labels: Vec<String>) -> Self {
        Self { labels }
    }

    pub fn resolve(&self, code: usize) -> String {
        match self.labels.get(code) {
            Some(label) => label.clone(),
            None => {
                tracing::warn!(
                    code,
                    known_labels = self.labels.len(),
                    "prediction code outside the label table, returning sentinel"
                );
                UNKNOWN_LABEL.to_string()
            }
        }
    }
}

impl Default for LabelResolver {
    /// The fixed training-time table: 0 -> Basic, 1 -> Premium, 2 -> Standard.
    fn default() -> Self {
        Self::new(
            CoverageLevel::all()
                .iter()
                .map(|level| level.as_str().to_string())
                .collect(),
        )
    }
}

//! Shared fixtures for integration tests.

use std::time::Duration;

use coverage_service::config::{CoverageConfig, ModelConfig, ServerConfig};
use coverage_service::models::CoverageLevel;
use coverage_service::services::pipeline::{
    CategoryEncoding, ModelArtifact, NumericScaling, PreprocessorParams, SoftmaxParams,
    ARTIFACT_FORMAT_VERSION,
};
use coverage_service::startup::Application;

/// A small but fully shaped artifact: the real feature schema with two
/// categories per field and hand-picked classifier weights.
pub fn fixture_artifact() -> ModelArtifact {
    let categorical = [
        ("gender", vec!["female", "male"]),
        ("smoker", vec!["no", "yes"]),
        ("region", vec!["north", "south"]),
        ("medical_history", vec!["diabetes", "none"]),
        ("family_medical_history", vec!["diabetes", "none"]),
        ("exercise_frequency", vec!["never", "often"]),
        ("occupation", vec!["doctor", "engineer"]),
    ]
    .into_iter()
    .map(|(field, categories)| CategoryEncoding {
        field: field.to_string(),
        categories: categories.into_iter().map(str::to_string).collect(),
    })
    .collect();

    let numerical = [
        ("age", 40.0, 10.0),
        ("bmi", 28.0, 5.0),
        ("children", 1.0, 1.0),
        ("charges", 5000.0, 2000.0),
    ]
    .into_iter()
    .map(|(field, mean, std)| NumericScaling {
        field: field.to_string(),
        mean,
        std,
    })
    .collect();

    // 14 indicator columns + 4 numeric columns.
    let n_features = 18;
    let mut weights = vec![vec![0.0; n_features]; 3];
    weights[1][3] = 2.0; // smoker == "yes" pushes towards Premium
    weights[2][17] = 1.5; // high standardized charges push towards Standard
    let bias = vec![0.5, 0.0, 0.0];

    ModelArtifact {
        format_version: ARTIFACT_FORMAT_VERSION,
        labels: CoverageLevel::all()
            .iter()
            .map(|l| l.as_str().to_string())
            .collect(),
        preprocessor: PreprocessorParams {
            categorical,
            numerical,
        },
        classifier: SoftmaxParams { weights, bias },
    }
}

/// Spawn the application on a random port against a temp-dir artifact and
/// return the port number.
pub async fn spawn_app() -> u16 {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let model_path = dir.path().join("insurance_model.json");
    std::fs::write(
        &model_path,
        serde_json::to_vec(&fixture_artifact()).expect("Failed to serialize artifact"),
    )
    .expect("Failed to write artifact");

    let config = CoverageConfig {
        server: ServerConfig { port: 0 },
        model: ModelConfig {
            path: model_path.display().to_string(),
        },
    };

    let app = Application::build(config)
        .await
        .expect("Failed to build application");
    let port = app.port();

    // Keep the artifact directory alive for the lifetime of the test binary.
    std::mem::forget(dir);

    tokio::spawn(async move {
        let _ = app.run_until_stopped().await;
    });

    // Wait for server to start
    tokio::time::sleep(Duration::from_millis(100)).await;

    port
}

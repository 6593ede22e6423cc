//! End-to-end tests for the prediction endpoint.
//!
//! Run with: cargo test --test predict_test

mod common;

use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use std::time::Duration;

fn complete_record() -> Value {
    json!({
        "age": 35,
        "bmi": 27.1,
        "children": 2,
        "gender": "male",
        "smoker": "no",
        "region": "south",
        "medical_history": "none",
        "family_medical_history": "none",
        "exercise_frequency": "often",
        "occupation": "engineer",
        "charges": 4200.5
    })
}

async fn post_predict(client: &Client, port: u16, body: &Value) -> reqwest::Response {
    client
        .post(format!("http://localhost:{}/predict", port))
        .json(body)
        .timeout(Duration::from_secs(5))
        .send()
        .await
        .expect("Failed to send request")
}

#[tokio::test]
async fn valid_record_returns_a_coverage_level() {
    let port = common::spawn_app().await;
    let client = Client::new();

    let response = post_predict(&client, port, &complete_record()).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.expect("Failed to parse JSON");
    let level = body["coverage_level"].as_str().expect("missing coverage_level");
    assert!(["Basic", "Premium", "Standard"].contains(&level));
}

#[tokio::test]
async fn missing_fields_return_the_contract_error_message() {
    let port = common::spawn_app().await;
    let client = Client::new();

    let mut record = complete_record();
    record.as_object_mut().unwrap().remove("bmi");
    record.as_object_mut().unwrap().remove("smoker");

    let response = post_predict(&client, port, &record).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["error"], "Missing fields in input: ['bmi', 'smoker']");
}

#[tokio::test]
async fn non_numeric_age_is_a_structured_server_error() {
    let port = common::spawn_app().await;
    let client = Client::new();

    let mut record = complete_record();
    record["age"] = json!("thirty-five");

    let response = post_predict(&client, port, &record).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body: Value = response.json().await.expect("Failed to parse JSON");
    let message = body["error"].as_str().expect("missing error message");
    assert!(message.contains("'age'"));

    // The failure is per-request; the process keeps serving.
    let follow_up = post_predict(&client, port, &complete_record()).await;
    assert_eq!(follow_up.status(), StatusCode::OK);
}

#[tokio::test]
async fn identical_records_classify_identically() {
    let port = common::spawn_app().await;
    let client = Client::new();

    let first: Value = post_predict(&client, port, &complete_record())
        .await
        .json()
        .await
        .expect("Failed to parse JSON");
    let second: Value = post_predict(&client, port, &complete_record())
        .await
        .json()
        .await
        .expect("Failed to parse JSON");

    assert_eq!(first["coverage_level"], second["coverage_level"]);
}

#[tokio::test]
async fn unseen_categorical_value_still_classifies() {
    let port = common::spawn_app().await;
    let client = Client::new();

    let mut record = complete_record();
    record["region"] = json!("atlantis");

    let response = post_predict(&client, port, &record).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.expect("Failed to parse JSON");
    let level = body["coverage_level"].as_str().expect("missing coverage_level");
    assert!(["Basic", "Premium", "Standard"].contains(&level));
}

#[tokio::test]
async fn non_object_body_is_a_bad_request() {
    let port = common::spawn_app().await;
    let client = Client::new();

    let response = post_predict(&client, port, &json!([1, 2, 3])).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = response.json().await.expect("Failed to parse JSON");
    assert!(body["error"].as_str().unwrap().contains("JSON object"));
}

#[tokio::test]
async fn smoker_record_hits_the_premium_weights() {
    let port = common::spawn_app().await;
    let client = Client::new();

    let mut record = complete_record();
    record["smoker"] = json!("yes");
    record["charges"] = json!(5000.0);

    let response = post_predict(&client, port, &record).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["coverage_level"], "Premium");
}

//! HTTP surface tests
//!
//! Drive the router directly with `tower::ServiceExt::oneshot` against a
//! bundle backed by a fake classifier, covering every endpoint and error
//! shape.

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use signserve_core::Result;
use signserve_model::{
    FeatureSchema, LabelSet, ModelBundle, NormalizationParams, SignClassifier,
};
use signserve_server::{create_router, AppState, ServerConfig};

struct FakeClassifier {
    output: Vec<f32>,
    fail: bool,
}

#[async_trait]
impl SignClassifier for FakeClassifier {
    async fn infer(&self, _features: &[f32]) -> Result<Vec<f32>> {
        if self.fail {
            return Err(signserve_core::Error::inference("model exploded"));
        }
        Ok(self.output.clone())
    }

    fn num_inputs(&self) -> usize {
        2
    }

    fn num_classes(&self) -> usize {
        self.output.len()
    }

    fn name(&self) -> &str {
        "fake"
    }
}

fn ready_state(output: Vec<f32>, fail: bool) -> AppState {
    let bundle = ModelBundle::from_parts(
        FeatureSchema::new(vec!["a".to_string(), "b".to_string()]).unwrap(),
        LabelSet::new(vec!["A".to_string(), "B".to_string(), "C".to_string()]).unwrap(),
        NormalizationParams::new(vec![0.0, 0.0], vec![1.0, 2.0]).unwrap(),
        Arc::new(FakeClassifier { output, fail }),
    )
    .unwrap();
    AppState::new(Arc::new(bundle), ServerConfig::default(), None)
}

async fn get(state: AppState, uri: &str) -> (StatusCode, Value) {
    let app = create_router(state);
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn post_predict(state: AppState, body: Value) -> (StatusCode, Value) {
    let app = create_router(state);
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/predict")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn health_reports_not_ready_before_bundle_publish() {
    let state = AppState::unloaded(ServerConfig::default());
    let (status, body) = get(state, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["model_loaded"], false);
    assert_eq!(body["num_classes"], 0);
}

#[tokio::test]
async fn health_reports_ready_after_bundle_publish() {
    let (status, body) = get(ready_state(vec![0.1, 0.7, 0.2], false), "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["model_loaded"], true);
    assert_eq!(body["num_classes"], 3);
}

#[tokio::test]
async fn labels_endpoint_returns_ordered_labels() {
    let (status, body) = get(ready_state(vec![0.1, 0.7, 0.2], false), "/api/labels").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["labels"], json!(["A", "B", "C"]));
    assert_eq!(body["num_classes"], 3);
}

#[tokio::test]
async fn features_endpoint_returns_schema_order() {
    let (status, body) = get(ready_state(vec![0.1, 0.7, 0.2], false), "/api/features").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["features"], json!(["a", "b"]));
    assert_eq!(body["num_features"], 2);
}

#[tokio::test]
async fn predict_returns_ranked_top_k() {
    let (status, body) = post_predict(
        ready_state(vec![0.1, 0.7, 0.2], false),
        json!({"features": {"a": 2.0, "b": 4.0}}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["predicted_sign"], "B");
    assert!((body["confidence"].as_f64().unwrap() - 0.7).abs() < 1e-6);

    let signs: Vec<&str> = body["all_predictions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["sign"].as_str().unwrap())
        .collect();
    assert_eq!(signs, vec!["B", "C", "A"]);
}

#[tokio::test]
async fn predict_with_wrong_count_is_a_400() {
    let (status, body) = post_predict(
        ready_state(vec![0.1, 0.7, 0.2], false),
        json!({"features": {"a": 2.0}}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "expected 2 features, got 1");
}

#[tokio::test]
async fn predict_with_missing_feature_names_it() {
    let (status, body) = post_predict(
        ready_state(vec![0.1, 0.7, 0.2], false),
        json!({"features": {"a": 2.0, "wrong": 4.0}}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "missing feature: b");
}

#[tokio::test]
async fn predict_without_features_key_is_a_400() {
    let (status, body) = post_predict(
        ready_state(vec![0.1, 0.7, 0.2], false),
        json!({"inputs": {}}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("invalid request body"));
}

#[tokio::test]
async fn inference_failure_is_a_500_with_error_body() {
    let (status, body) = post_predict(
        ready_state(vec![0.0, 0.0, 0.0], true),
        json!({"features": {"a": 2.0, "b": 4.0}}),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().contains("model exploded"));
}

#[tokio::test]
async fn predict_before_publish_is_refused() {
    let state = AppState::unloaded(ServerConfig::default());
    let (status, body) = post_predict(state, json!({"features": {"a": 1.0, "b": 2.0}})).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["error"], "model not loaded");
}

#[tokio::test]
async fn unknown_route_is_a_404() {
    let (status, body) = get(ready_state(vec![0.1, 0.7, 0.2], false), "/api/nope").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not found");
}

//! HTTP routes and handlers

use axum::{
    extract::rejection::JsonRejection,
    extract::State,
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use std::time::Instant;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing::{error, info, warn};

use crate::state::AppState;
use signserve_core::{Error, ValidationError};
use signserve_model::FeatureMap;

/// Build the router with all routes and the CORS layer
pub fn create_router(state: AppState) -> Router {
    // ServerConfig::load already rejects malformed origins; this guards
    // states built without going through it.
    let origins: Vec<HeaderValue> = state
        .config()
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("skipping malformed allowed origin: {origin:?}");
                None
            }
        })
        .collect();
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics))
        .route("/api/labels", get(labels))
        .route("/api/features", get(features))
        .route("/api/predict", post(predict))
        .fallback(fallback)
        .layer(cors)
        .with_state(state)
}

/// Health check: always succeeds, reflects bundle readiness
async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    let num_classes = state.bundle().map(|b| b.num_classes()).unwrap_or(0);
    Json(json!({
        "status": "healthy",
        "model_loaded": state.is_ready(),
        "num_classes": num_classes,
    }))
}

/// Prometheus metrics exposition
async fn metrics(State(state): State<AppState>) -> String {
    state.render_metrics()
}

/// All available sign labels, in classifier output order
async fn labels(State(state): State<AppState>) -> Result<Json<serde_json::Value>, AppError> {
    let bundle = state.bundle().ok_or(AppError::NotReady)?;
    Ok(Json(json!({
        "labels": bundle.labels().labels(),
        "num_classes": bundle.num_classes(),
    })))
}

/// Required feature names, in schema order
async fn features(State(state): State<AppState>) -> Result<Json<serde_json::Value>, AppError> {
    let bundle = state.bundle().ok_or(AppError::NotReady)?;
    Ok(Json(json!({
        "features": bundle.schema().names(),
        "num_features": bundle.num_features(),
    })))
}

#[derive(Debug, Deserialize)]
struct PredictRequest {
    features: FeatureMap,
}

/// Run the prediction pipeline for one request
async fn predict(
    State(state): State<AppState>,
    body: Result<Json<PredictRequest>, JsonRejection>,
) -> Result<Json<signserve_core::Prediction>, AppError> {
    metrics::counter!("signserve_requests_total").increment(1);

    let bundle = state.bundle().ok_or(AppError::NotReady)?;
    let Json(request) = body.map_err(|rejection| {
        AppError::InvalidRequest(format!("invalid request body: {rejection}"))
    })?;

    let start = Instant::now();
    let prediction = bundle
        .predict(&request.features, state.config().top_k)
        .await?;
    metrics::histogram!("signserve_predict_latency_us")
        .record(start.elapsed().as_micros() as f64);

    info!(
        predicted = %prediction.predicted_sign,
        confidence = prediction.confidence,
        "served prediction"
    );

    Ok(Json(prediction))
}

async fn fallback() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "not found" })),
    )
}

/// Error handling
#[derive(Debug)]
pub enum AppError {
    /// No bundle has been published yet
    NotReady,
    /// Malformed request body
    InvalidRequest(String),
    /// Feature map failed validation against the schema
    Validation(ValidationError),
    /// Classifier execution failed
    Inference(String),
    /// Anything else; the process must survive any single bad request
    Internal(String),
}

impl From<Error> for AppError {
    fn from(err: Error) -> Self {
        match err {
            Error::Validation(validation) => AppError::Validation(validation),
            Error::Inference(msg) => AppError::Inference(msg),
            other => AppError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, kind, message) = match self {
            AppError::NotReady => (
                StatusCode::SERVICE_UNAVAILABLE,
                "not_ready",
                "model not loaded".to_string(),
            ),
            AppError::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg),
            AppError::Validation(err) => {
                (StatusCode::BAD_REQUEST, "validation", err.to_string())
            }
            AppError::Inference(msg) => {
                error!("inference failure: {msg}");
                (StatusCode::INTERNAL_SERVER_ERROR, "inference", msg)
            }
            AppError::Internal(msg) => {
                error!("internal error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal",
                    "internal server error".to_string(),
                )
            }
        };

        if status == StatusCode::BAD_REQUEST {
            warn!("rejected request: {message}");
        }
        metrics::counter!("signserve_errors_total", "kind" => kind).increment(1);

        (status, Json(json!({ "error": message }))).into_response()
    }
}

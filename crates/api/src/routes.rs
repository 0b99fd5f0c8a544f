use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::trace::TraceLayer;
use tracing::info;
use uuid::Uuid;

use extract::{PredictionRecord, Task, TaskOutcome, TaskPredictor};

use crate::metrics::{Metrics, MetricsSnapshot, TimedOperation};

#[derive(Clone)]
pub struct AppState {
    // Locked for the whole batch so tasks never run concurrently.
    predictor: Arc<Mutex<TaskPredictor>>,
    models: Vec<String>,
    model_version: String,
    metrics: Arc<Metrics>,
}

impl AppState {
    pub fn new(predictor: TaskPredictor, model_version: String) -> Self {
        Self {
            models: predictor.models().to_vec(),
            predictor: Arc::new(Mutex::new(predictor)),
            model_version,
            metrics: Arc::new(Metrics::new()),
        }
    }
}

#[derive(Deserialize)]
struct PredictRequest {
    tasks: Vec<Task>,
    /// Opaque to us, only logged.
    #[serde(default)]
    project: Option<Value>,
    #[serde(default)]
    label_config: Option<String>,
}

#[derive(Serialize)]
struct PredictResponse {
    results: Vec<PredictionRecord>,
    model_version: String,
}

#[derive(Deserialize)]
struct SetupRequest {
    #[serde(default)]
    project: Option<Value>,
    #[serde(default)]
    schema: Option<String>,
}

#[derive(Serialize)]
struct SetupResponse {
    model_version: String,
}

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    model_class: String,
    models: Vec<String>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health_check))
        .route("/health", get(health_check))
        .route("/setup", post(setup))
        .route("/predict", post(predict))
        .route("/metrics", get(get_metrics))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "UP".to_string(),
        model_class: "GeminiNer".to_string(),
        models: state.models.clone(),
    })
}

async fn setup(
    State(state): State<AppState>,
    Json(req): Json<SetupRequest>,
) -> Json<SetupResponse> {
    info!(
        project = ?req.project,
        has_schema = req.schema.is_some(),
        "Setup request"
    );

    Json(SetupResponse {
        model_version: state.model_version.clone(),
    })
}

async fn predict(
    State(state): State<AppState>,
    Json(req): Json<PredictRequest>,
) -> Json<PredictResponse> {
    let request_id = Uuid::new_v4();
    info!(
        %request_id,
        tasks = req.tasks.len(),
        project = ?req.project,
        has_label_config = req.label_config.is_some(),
        "Predict request"
    );

    let timer = TimedOperation::start();
    let predictions = {
        let predictor = state.predictor.lock().await;
        predictor.predict_with_outcomes(&req.tasks).await
    };
    state.metrics.record_predict(timer.elapsed(), &predictions);

    info!(
        %request_id,
        succeeded = predictions
            .iter()
            .filter(|p| p.outcome == TaskOutcome::Succeeded)
            .count(),
        failed = predictions
            .iter()
            .filter(|p| p.outcome == TaskOutcome::Failed)
            .count(),
        elapsed_ms = timer.elapsed().as_millis() as u64,
        "Predict finished"
    );

    Json(PredictResponse {
        results: predictions.into_iter().map(|p| p.record).collect(),
        model_version: state.model_version.clone(),
    })
}

async fn get_metrics(State(state): State<AppState>) -> Json<MetricsSnapshot> {
    Json(state.metrics.snapshot())
}

use super::state::AppState;
use crate::synthesis::{
    DialogueInput, MonologueInput, SynthesisOutcome, dialogue_synthesis, monologue_synthesis,
};
use crate::view::{Form, FormView, form_view};
use axum::{
    Router,
    extract::{DefaultBodyLimit, Query, State, rejection::JsonRejection},
    http::StatusCode,
    response::{Html, IntoResponse, Json, Response},
    routing::{get, post},
};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use duet_speech::{ModelInfo, SpeechResponse, ValidationError, VoiceMode, encode_wav};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;

const INDEX_HTML: &str = include_str!("../../assets/index.html");

/// Request body ceiling; prompt clips travel base64-encoded inside the JSON
pub const MAX_REQUEST_BYTES: usize = 64 * 1024 * 1024;

#[derive(Debug, Serialize, Deserialize)]
pub struct SynthesisResponse {
    pub sample_rate: u32,
    pub duration_ms: u64,
    pub wav_base64: String,
    pub generation_time_ms: u64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WarningResponse {
    pub warning: String,
    pub rule: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ModelResponse {
    pub provider: String,
    pub model: ModelInfo,
    pub sample_rate: u32,
    pub languages: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub uptime_secs: u64,
}

#[derive(Debug, Deserialize)]
pub struct ViewQuery {
    pub form: Form,
    #[serde(default)]
    pub voice_mode: VoiceMode,
}

pub fn create_router(state: Arc<AppState>) -> Router {
    log::info!("Creating API router with endpoints:");
    log::info!("  GET  /");
    log::info!("  GET  /health");
    log::info!("  GET  /api/v1/model");
    log::info!("  GET  /api/v1/view");
    log::info!("  POST /api/v1/dialogue");
    log::info!("  POST /api/v1/monologue");

    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/api/v1/model", get(model))
        .route("/api/v1/view", get(view))
        .route("/api/v1/dialogue", post(dialogue))
        .route("/api/v1/monologue", post(monologue))
        .layer(DefaultBodyLimit::max(MAX_REQUEST_BYTES))
        .with_state(state)
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    log::debug!("Health check endpoint called");
    Json(HealthResponse {
        status: "healthy".to_string(),
        uptime_secs: state.uptime_secs(),
    })
}

async fn model(State(state): State<Arc<AppState>>) -> Json<ModelResponse> {
    let provider = &state.provider;
    Json(ModelResponse {
        provider: provider.provider_name().to_string(),
        model: provider.get_current_model(),
        sample_rate: provider.default_sample_rate(),
        languages: provider.supported_languages(),
    })
}

async fn view(Query(query): Query<ViewQuery>) -> Json<FormView> {
    Json(form_view(query.form, query.voice_mode))
}

async fn dialogue(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<DialogueInput>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(payload) = payload?;
    let start = Instant::now();
    log::debug!(
        "Dialogue request: {} characters, mode {}",
        payload.target_text.chars().count(),
        payload.voice_mode
    );

    let outcome = dialogue_synthesis(state.provider.as_ref(), payload)
        .await
        .map_err(|e| {
            log::error!("Dialogue generation failed: {}", e);
            AppError::Internal(e.to_string())
        })?;

    respond(outcome, start)
}

async fn monologue(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<MonologueInput>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(payload) = payload?;
    let start = Instant::now();
    log::debug!(
        "Monologue request: {} characters, mode {}",
        payload.text.chars().count(),
        payload.voice_mode
    );

    let outcome = monologue_synthesis(state.provider.as_ref(), payload)
        .await
        .map_err(|e| {
            log::error!("Monologue generation failed: {}", e);
            AppError::Internal(e.to_string())
        })?;

    respond(outcome, start)
}

fn respond(outcome: SynthesisOutcome, start: Instant) -> Result<Response, AppError> {
    match outcome {
        SynthesisOutcome::Generated(response) => {
            let body = synthesis_response(&response, start)?;
            Ok(Json(body).into_response())
        }
        SynthesisOutcome::Rejected(rejection) => Err(AppError::Rejected(rejection)),
    }
}

fn synthesis_response(response: &SpeechResponse, start: Instant) -> Result<SynthesisResponse, AppError> {
    let wav = encode_wav(&response.audio).map_err(|e| {
        log::error!("Failed to encode waveform: {}", e);
        AppError::Internal(e.to_string())
    })?;

    Ok(SynthesisResponse {
        sample_rate: response.audio.sample_rate,
        duration_ms: response.duration_ms,
        wav_base64: STANDARD.encode(wav),
        generation_time_ms: start.elapsed().as_millis() as u64,
    })
}

// Error handling
#[derive(Debug)]
pub enum AppError {
    Rejected(ValidationError),
    Malformed(StatusCode, String),
    Internal(String),
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        log::warn!("Unreadable request body: {}", rejection.body_text());
        // 422 stays reserved for input warnings
        let status = match rejection.status() {
            StatusCode::UNPROCESSABLE_ENTITY => StatusCode::BAD_REQUEST,
            other => other,
        };
        AppError::Malformed(status, rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Rejected(rejection) => {
                let body = Json(WarningResponse {
                    warning: rejection.to_string(),
                    rule: rejection.rule(),
                });
                (StatusCode::UNPROCESSABLE_ENTITY, body).into_response()
            }
            AppError::Malformed(status, message) => {
                let body = Json(serde_json::json!({
                    "error": message
                }));
                (status, body).into_response()
            }
            AppError::Internal(message) => {
                let body = Json(serde_json::json!({
                    "error": message
                }));
                (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
            }
        }
    }
}

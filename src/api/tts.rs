use super::IMMUTABLE_CACHE;
use crate::AppState;
use crate::tts::TtsError;
use axum::Json;
use axum::extract::{Query, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use serde_json::json;
use tracing::warn;

#[derive(Debug, Deserialize)]
pub struct TtsQuery {
    text: Option<String>,
    voice: Option<String>,
    /// Kept as a raw string: an unparseable speed falls back to the default
    /// instead of rejecting the request.
    speed: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TtsBody {
    text: Option<String>,
    voice: Option<String>,
    speed: Option<f64>,
}

pub async fn get_tts(
    State(state): State<AppState>,
    Query(query): Query<TtsQuery>,
) -> Result<Response, TtsFailure> {
    let speed = query
        .speed
        .as_deref()
        .and_then(|raw| raw.trim().parse::<f64>().ok());
    synthesize(&state, query.text.as_deref(), query.voice.as_deref(), speed).await
}

pub async fn post_tts(
    State(state): State<AppState>,
    body: Option<Json<TtsBody>>,
) -> Result<Response, TtsFailure> {
    let body = body.map(|Json(b)| b).unwrap_or(TtsBody {
        text: None,
        voice: None,
        speed: None,
    });
    synthesize(&state, body.text.as_deref(), body.voice.as_deref(), body.speed).await
}

async fn synthesize(
    state: &AppState,
    text: Option<&str>,
    voice: Option<&str>,
    speed: Option<f64>,
) -> Result<Response, TtsFailure> {
    let audio = state
        .tts
        .synthesize(text.unwrap_or(""), voice, speed)
        .await?;

    Ok((
        [
            (header::CONTENT_TYPE, "audio/wav"),
            (header::CACHE_CONTROL, IMMUTABLE_CACHE),
        ],
        audio,
    )
        .into_response())
}

/// HTTP surface for `TtsError`: client errors for caller mistakes, a gateway
/// error with truncated vendor detail for everything upstream.
pub struct TtsFailure(TtsError);

impl From<TtsError> for TtsFailure {
    fn from(err: TtsError) -> Self {
        Self(err)
    }
}

impl IntoResponse for TtsFailure {
    fn into_response(self) -> Response {
        match self.0 {
            TtsError::MissingText => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "Missing text" })),
            )
                .into_response(),
            TtsError::MissingApiKey => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "ZHIPU_API_KEY is not set" })),
            )
                .into_response(),
            TtsError::Upstream { status, detail } => (
                StatusCode::BAD_GATEWAY,
                Json(json!({
                    "error": "Upstream TTS failed",
                    "status": status,
                    "detail": detail,
                })),
            )
                .into_response(),
            err @ (TtsError::Request(_) | TtsError::BadPayload(_)) => {
                warn!(error = %err, "TTS request failed");
                (
                    StatusCode::BAD_GATEWAY,
                    Json(json!({
                        "error": "Upstream TTS failed",
                        "detail": err.to_string(),
                    })),
                )
                    .into_response()
            }
        }
    }
}

use super::wav;
use crate::config::Config;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

pub const VENDOR_ENDPOINT: &str = "https://open.bigmodel.cn/api/paas/v4/audio/speech";
pub const DEFAULT_VOICE: &str = "tongtong";
pub const DEFAULT_SPEED: f64 = 1.0;

const MODEL: &str = "glm-tts";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const DETAIL_LIMIT: usize = 2000;

#[derive(Debug, Error)]
pub enum TtsError {
    #[error("ZHIPU_API_KEY is not set")]
    MissingApiKey,
    #[error("Missing text")]
    MissingText,
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Upstream TTS failed: {status}")]
    Upstream { status: u16, detail: String },
    #[error("unusable vendor payload: {0}")]
    BadPayload(&'static str),
}

#[derive(Serialize)]
struct VendorRequest<'a> {
    model: &'a str,
    input: &'a str,
    voice: &'a str,
    speed: f64,
    response_format: &'a str,
}

/// Some vendor deployments answer JSON carrying base64 PCM instead of a raw
/// WAV stream; accept both field spellings.
#[derive(Deserialize)]
struct VendorAudio {
    audio: Option<String>,
    data: Option<String>,
}

/// Client for the third-party speech vendor. Stateless apart from the
/// connection pool; safe to clone into handlers.
#[derive(Clone)]
pub struct TtsClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
    default_voice: String,
    default_speed: f64,
}

impl TtsClient {
    pub fn new(config: &Config) -> Self {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            http,
            endpoint: config.tts_endpoint.clone(),
            api_key: config.tts_api_key.clone(),
            default_voice: config.tts_voice.clone(),
            default_speed: config.tts_speed,
        }
    }

    /// Synthesize `text` into WAV bytes. `voice`/`speed` fall back to the
    /// configured defaults when absent or unusable.
    pub async fn synthesize(
        &self,
        text: &str,
        voice: Option<&str>,
        speed: Option<f64>,
    ) -> Result<Bytes, TtsError> {
        let api_key = self.api_key.as_deref().ok_or(TtsError::MissingApiKey)?;
        let text = text.trim();
        if text.is_empty() {
            return Err(TtsError::MissingText);
        }

        let voice = voice
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .unwrap_or(&self.default_voice);
        let speed = speed
            .filter(|s| s.is_finite())
            .unwrap_or(self.default_speed);

        debug!(text, voice, speed, "Requesting vendor TTS");

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(&VendorRequest {
                model: MODEL,
                input: text,
                voice,
                speed,
                response_format: "wav",
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "Vendor TTS failed");
            return Err(TtsError::Upstream {
                status: status.as_u16(),
                detail: truncate_detail(&detail),
            });
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();
        let body = response.bytes().await?;

        wav_from_vendor_body(&content_type, body)
    }
}

/// Normalize whatever the vendor sent into a WAV byte stream.
fn wav_from_vendor_body(content_type: &str, body: Bytes) -> Result<Bytes, TtsError> {
    if wav::is_wav(&body) {
        return Ok(body);
    }

    if content_type.contains("json") {
        let parsed: VendorAudio = serde_json::from_slice(&body)
            .map_err(|_| TtsError::BadPayload("unparseable JSON audio response"))?;
        let encoded = parsed
            .audio
            .or(parsed.data)
            .ok_or(TtsError::BadPayload("no audio field in JSON response"))?;
        let pcm = BASE64
            .decode(encoded.trim())
            .map_err(|_| TtsError::BadPayload("audio field is not valid base64"))?;
        return Ok(Bytes::from(wav::wrap_pcm16(
            &pcm,
            wav::VENDOR_PCM_SAMPLE_RATE,
            1,
        )));
    }

    // Headerless audio: treat it as the vendor's raw PCM.
    Ok(Bytes::from(wav::wrap_pcm16(
        &body,
        wav::VENDOR_PCM_SAMPLE_RATE,
        1,
    )))
}

fn truncate_detail(detail: &str) -> String {
    detail.chars().take(DETAIL_LIMIT).collect()
}

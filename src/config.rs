use crate::tts::{DEFAULT_SPEED, DEFAULT_VOICE, VENDOR_ENDPOINT};
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub tts_api_key: Option<String>,
    pub tts_endpoint: String,
    pub tts_voice: String,
    pub tts_speed: f64,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            tts_api_key: env::var("ZHIPU_API_KEY").ok().filter(|k| !k.is_empty()),
            tts_endpoint: env::var("ZHIPU_TTS_ENDPOINT")
                .ok()
                .filter(|e| !e.is_empty())
                .unwrap_or_else(|| VENDOR_ENDPOINT.to_string()),
            tts_voice: env::var("ZHIPU_TTS_VOICE")
                .ok()
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| DEFAULT_VOICE.to_string()),
            tts_speed: env::var("ZHIPU_TTS_SPEED")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_SPEED),
        }
    }

    pub fn addr(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 0,
            tts_api_key: None,
            tts_endpoint: VENDOR_ENDPOINT.to_string(),
            tts_voice: DEFAULT_VOICE.to_string(),
            tts_speed: DEFAULT_SPEED,
        }
    }
}

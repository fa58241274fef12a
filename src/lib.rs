pub mod config;
pub mod quiz;
pub mod speech;
pub mod tts;

mod api;

use axum::{Router, routing::get};
use config::Config;
use quiz::WordBank;
use quiz::words::BankError;
use tower_http::cors::CorsLayer;
use tts::TtsClient;

async fn health() -> &'static str {
    "ok"
}

#[derive(Clone)]
pub struct AppState {
    pub bank: WordBank,
    pub tts: TtsClient,
}

/// Build the app around the word bank compiled into the binary.
pub fn app(config: &Config) -> Result<Router, BankError> {
    Ok(app_with_bank(config, WordBank::embedded()?))
}

pub fn app_with_bank(config: &Config, bank: WordBank) -> Router {
    let state = AppState {
        bank,
        tts: TtsClient::new(config),
    };

    Router::new()
        .route("/health", get(health))
        .route("/api/words", get(api::words::get_words))
        .route("/api/tts", get(api::tts::get_tts).post(api::tts::post_tts))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

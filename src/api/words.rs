use super::IMMUTABLE_CACHE;
use crate::AppState;
use crate::quiz::WordEntry;
use axum::Json;
use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct WordsResponse {
    pub words: Vec<WordEntry>,
    pub count: usize,
}

pub async fn get_words(State(state): State<AppState>) -> impl IntoResponse {
    let words = state.bank.words().to_vec();
    let count = words.len();
    (
        [(header::CACHE_CONTROL, IMMUTABLE_CACHE)],
        Json(WordsResponse { words, count }),
    )
}

pub mod tts;
pub mod words;

/// The word bank and synthesized audio are immutable; let clients keep them.
pub(crate) const IMMUTABLE_CACHE: &str = "public, max-age=31536000, immutable";

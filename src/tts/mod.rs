pub mod client;
pub mod wav;

pub use client::{DEFAULT_SPEED, DEFAULT_VOICE, TtsClient, TtsError, VENDOR_ENDPOINT};

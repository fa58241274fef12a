pub mod cheer;
pub mod local;
pub mod player;

pub use local::{LocalSpeech, SynthEngine, Utterance, Voice, pick_chinese_voice};
pub use player::{
    Fallback, FetchError, FetchWav, PlayError, PlaybackSink, SpeakOptions, SpeakOutcome,
    SpeechPlayer,
};

use std::sync::Mutex;

/// An installed synthesis voice as reported by the platform engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Voice {
    pub name: String,
    pub lang: String,
}

/// A pending utterance with the delivery parameters tuned for young ears:
/// slightly slowed down, slightly brightened.
#[derive(Debug, Clone, PartialEq)]
pub struct Utterance {
    pub text: String,
    pub lang: &'static str,
    pub rate: f32,
    pub pitch: f32,
    pub volume: f32,
}

impl Utterance {
    pub fn chinese(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            lang: "zh-CN",
            rate: 0.9,
            pitch: 1.15,
            volume: 1.0,
        }
    }
}

/// Platform speech-synthesis engine. Implementations are expected to be
/// fire-and-forget; `cancel` silences whatever is in flight.
pub trait SynthEngine: Send + Sync {
    fn voices(&self) -> Vec<Voice>;
    fn speak(&self, voice: Option<&Voice>, utterance: &Utterance);
    fn cancel(&self);
}

/// Prefer an exact `zh-CN` voice, then any `zh-CN` dialect, then any Chinese
/// voice at all.
pub fn pick_chinese_voice(voices: &[Voice]) -> Option<&Voice> {
    let zh: Vec<&Voice> = voices
        .iter()
        .filter(|v| v.lang.to_lowercase().starts_with("zh"))
        .collect();

    zh.iter()
        .find(|v| v.lang.eq_ignore_ascii_case("zh-CN"))
        .or_else(|| zh.iter().find(|v| v.lang.to_lowercase().starts_with("zh-cn")))
        .or_else(|| zh.first())
        .copied()
}

/// On-device synthesis with the Chinese-voice heuristic applied once and
/// cached for the life of the speaker.
pub struct LocalSpeech<E: SynthEngine> {
    engine: E,
    cached_voice: Mutex<Option<Voice>>,
}

impl<E: SynthEngine> LocalSpeech<E> {
    pub fn new(engine: E) -> Self {
        Self {
            engine,
            cached_voice: Mutex::new(None),
        }
    }

    fn chinese_voice(&self) -> Option<Voice> {
        let mut cached = self.cached_voice.lock().unwrap();
        if cached.is_none() {
            let voices = self.engine.voices();
            *cached = pick_chinese_voice(&voices).cloned();
        }
        cached.clone()
    }

    /// Cancel anything in flight and speak `text` with a Chinese voice when
    /// one is installed. Proceeds voiceless otherwise; the engine applies the
    /// utterance's `zh-CN` language tag either way.
    pub fn speak_chinese(&self, text: &str) {
        let voice = self.chinese_voice();
        self.engine.cancel();
        self.engine
            .speak(voice.as_ref(), &Utterance::chinese(text));
    }

    pub fn cancel(&self) {
        self.engine.cancel();
    }

    #[cfg(test)]
    pub(crate) fn engine(&self) -> &E {
        &self.engine
    }
}

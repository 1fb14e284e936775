//! Spoken announcements, one at a time

use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

pub const SPEECH_LANGUAGE: &str = "pt-BR";
pub const SPEECH_PITCH: f32 = 1.1;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Utterance {
    pub text: String,
    pub lang: String,
    pub rate: f32,
    pub pitch: f32,
}

/// Platform speech synthesis. Both calls return immediately.
pub trait SpeechEngine: Send + Sync {
    fn speak(&self, utterance: Utterance);
    fn cancel(&self);
}

/// Cancel-then-speak wrapper so a new announcement always cuts the previous one off
#[derive(Clone)]
pub struct SpeechAnnouncer {
    engine: Arc<dyn SpeechEngine>,
    words_per_minute: u32,
}

impl SpeechAnnouncer {
    pub fn new(engine: Arc<dyn SpeechEngine>, words_per_minute: u32) -> Self {
        Self {
            engine,
            words_per_minute: words_per_minute.max(1),
        }
    }

    /// Speak `text`, interrupting anything in progress. Returns the estimated speaking time.
    pub fn say(&self, text: &str, rate: f32) -> Duration {
        self.engine.cancel();
        debug!(rate, "Speaking: {}", text);
        self.engine.speak(Utterance {
            text: text.to_string(),
            lang: SPEECH_LANGUAGE.to_string(),
            rate,
            pitch: SPEECH_PITCH,
        });
        self.estimate_duration(text, rate)
    }

    pub fn cancel_all(&self) {
        self.engine.cancel();
    }

    /// Rough speaking time from word count, configured pace and rate
    #[must_use]
    pub fn estimate_duration(&self, text: &str, rate: f32) -> Duration {
        let words = text.split_whitespace().count();
        if words == 0 {
            return Duration::ZERO;
        }
        let words_per_second = f64::from(self.words_per_minute) / 60.0 * f64::from(rate.max(0.1));
        Duration::from_secs_f64(words as f64 / words_per_second)
    }
}

// src/speech.rs

use crate::errors::{ParrotError, ParrotResult};
use tokio::sync::mpsc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeechSettings {
    pub continuous: bool,
    pub interim_results: bool,
    pub language: String,
}

impl Default for SpeechSettings {
    fn default() -> Self {
        Self {
            continuous: true,
            interim_results: true,
            language: "en-US".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpeechErrorKind {
    NoSpeech,
    AudioCapture,
    Other(String),
}

impl SpeechErrorKind {
    /// Errors the user has to act on; dictation stops for these.
    pub fn stops_dictation(&self) -> bool {
        matches!(self, SpeechErrorKind::NoSpeech | SpeechErrorKind::AudioCapture)
    }
}

impl From<&str> for SpeechErrorKind {
    fn from(kind: &str) -> Self {
        match kind {
            "no-speech" => SpeechErrorKind::NoSpeech,
            "audio-capture" => SpeechErrorKind::AudioCapture,
            other => SpeechErrorKind::Other(other.to_string()),
        }
    }
}

/// Everything a recognizer reports back to the chat controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpeechEvent {
    Interim(String),
    Final(String),
    Error(SpeechErrorKind),
    Ended,
}

pub type SpeechEventSender = mpsc::UnboundedSender<SpeechEvent>;
pub type SpeechEventReceiver = mpsc::UnboundedReceiver<SpeechEvent>;

pub fn event_channel() -> (SpeechEventSender, SpeechEventReceiver) {
    mpsc::unbounded_channel()
}

/// A speech-to-text backend. Implementations push `SpeechEvent`s into the
/// sender they were built with.
pub trait SpeechRecognizer: Send {
    fn is_supported(&self) -> bool;
    fn start(&mut self, settings: &SpeechSettings) -> ParrotResult<()>;
    fn stop(&mut self);
}

/// Used where no speech capability exists, which is every terminal.
#[derive(Debug, Default)]
pub struct UnavailableRecognizer;

impl SpeechRecognizer for UnavailableRecognizer {
    fn is_supported(&self) -> bool {
        false
    }

    fn start(&mut self, _settings: &SpeechSettings) -> ParrotResult<()> {
        Err(ParrotError::speech_error("speech recognition is not supported"))
    }

    fn stop(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds_parse_from_adapter_strings() {
        assert_eq!(SpeechErrorKind::from("no-speech"), SpeechErrorKind::NoSpeech);
        assert_eq!(SpeechErrorKind::from("audio-capture"), SpeechErrorKind::AudioCapture);
        assert_eq!(
            SpeechErrorKind::from("network"),
            SpeechErrorKind::Other("network".to_string())
        );
    }

    #[test]
    fn test_only_user_facing_errors_stop_dictation() {
        assert!(SpeechErrorKind::NoSpeech.stops_dictation());
        assert!(SpeechErrorKind::AudioCapture.stops_dictation());
        assert!(!SpeechErrorKind::Other("aborted".into()).stops_dictation());
    }

    #[test]
    fn test_unavailable_recognizer_refuses_to_start() {
        let mut recognizer = UnavailableRecognizer;
        assert!(!recognizer.is_supported());
        assert!(recognizer.start(&SpeechSettings::default()).is_err());
    }
}

use crate::domain::error::AppError;
use crate::domain::model::Feature;
use crate::domain::traits::{SpeechEvent, SpeechRecognizer, SpeechUpdate};
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MicAction {
    Started(Feature),
    Stopped,
}

/// Owns the single microphone session shared by both text inputs.
///
/// `recording_for` is the only "who is recording" flag; transcripts go to the
/// input chosen when the capture started, even if they arrive after a stop.
/// Each capture gets a new number and events from older captures are dropped.
pub struct SpeechBridge {
    recognizer: Option<Box<dyn SpeechRecognizer>>,
    locale: String,
    capture: u64,
    recording_for: Option<Feature>,
    transcript_target: Option<Feature>,
    mic_error: Option<String>,
    events_tx: UnboundedSender<SpeechUpdate>,
}

impl SpeechBridge {
    /// A failed recogniser initialisation is recorded, not propagated: text input keeps working.
    pub fn new(
        recognizer: Result<Box<dyn SpeechRecognizer>, AppError>,
        locale: impl Into<String>,
    ) -> (Self, UnboundedReceiver<SpeechUpdate>) {
        let (events_tx, events_rx) = unbounded_channel();
        let (recognizer, mic_error) = match recognizer {
            Ok(recognizer) => (Some(recognizer), None),
            Err(e) => {
                // 麦克风状态行已经会显示原因
                info!("Speech recognition unavailable: {}", e);
                (None, Some(e.to_string()))
            }
        };

        let bridge = Self {
            recognizer,
            locale: locale.into(),
            capture: 0,
            recording_for: None,
            transcript_target: None,
            mic_error,
            events_tx,
        };
        (bridge, events_rx)
    }

    pub fn is_available(&self) -> bool {
        self.recognizer.is_some()
    }

    pub fn recording_for(&self) -> Option<Feature> {
        self.recording_for
    }

    pub fn is_recording_for(&self, feature: Feature) -> bool {
        self.recording_for == Some(feature)
    }

    /// The other input owns the microphone.
    pub fn mic_disabled_for(&self, feature: Feature) -> bool {
        matches!(self.recording_for, Some(owner) if owner != feature)
    }

    pub fn mic_error(&self) -> Option<&str> {
        self.mic_error.as_deref()
    }

    pub fn clear_error(&mut self) {
        self.mic_error = None;
    }

    /// Mic button for `target`: stop when recording, otherwise start a capture for it.
    pub fn toggle(&mut self, target: Feature, ai_ready: bool) -> Result<MicAction, AppError> {
        if !ai_ready {
            return Err(self.fail(AppError::SpeechUnavailable(
                "Cannot start microphone: API Key is missing.".to_string(),
            )));
        }

        if self.mic_disabled_for(target) {
            return Err(AppError::Validation(format!(
                "The microphone is in use by the {} input.",
                self.recording_for.map(|f| f.label()).unwrap_or_default()
            )));
        }

        let Some(recognizer) = self.recognizer.as_mut() else {
            let reason = self
                .mic_error
                .clone()
                .unwrap_or_else(|| "Speech recognition is not initialized.".to_string());
            return Err(AppError::SpeechUnavailable(reason));
        };

        if self.recording_for.is_some() {
            recognizer.stop();
            self.recording_for = None;
            debug!(capture = self.capture, "Speech capture stopped");
            return Ok(MicAction::Stopped);
        }

        self.mic_error = None;
        self.capture += 1;
        self.transcript_target = Some(target);
        match recognizer.start(self.capture, &self.locale, self.events_tx.clone()) {
            Ok(()) => {
                self.recording_for = Some(target);
                debug!(capture = self.capture, target = target.label(), locale = %self.locale, "Speech capture started");
                Ok(MicAction::Started(target))
            }
            Err(e) => {
                self.recording_for = None;
                Err(self.fail(e))
            }
        }
    }

    /// Apply a recogniser event. Returns the transcript and the input it belongs to.
    pub fn handle_event(&mut self, update: SpeechUpdate) -> Option<(Feature, String)> {
        if update.capture != self.capture {
            debug!(
                capture = update.capture,
                current = self.capture,
                "Dropping event from an earlier capture"
            );
            return None;
        }

        match update.event {
            SpeechEvent::Results(segments) => {
                let mut finals = String::new();
                let mut interim = String::new();
                for segment in segments {
                    if segment.is_final {
                        finals.push_str(&segment.text);
                    } else {
                        interim.push_str(&segment.text);
                    }
                }
                let transcript = if finals.is_empty() { interim } else { finals };
                if transcript.is_empty() {
                    return None;
                }
                self.transcript_target.map(|target| (target, transcript))
            }
            SpeechEvent::Error(message) => {
                warn!("Speech recognition error: {}", message);
                self.mic_error = Some(AppError::Speech(message).to_string());
                self.recording_for = None;
                None
            }
            SpeechEvent::End => {
                self.recording_for = None;
                None
            }
        }
    }

    /// Stop any capture; used on shutdown.
    pub fn shutdown(&mut self) {
        if self.recording_for.take().is_some() {
            if let Some(recognizer) = self.recognizer.as_mut() {
                recognizer.stop();
            }
        }
    }

    fn fail(&mut self, error: AppError) -> AppError {
        self.mic_error = Some(error.to_string());
        error
    }
}

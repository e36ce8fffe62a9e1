use crate::application::assistant::ask_assistant;
use crate::application::navigation::{AppMode, Navigator, View};
use crate::application::preferences::ThemeController;
use crate::application::speech::{MicAction, SpeechBridge};
use crate::application::translate::translate_text;
use crate::domain::error::AppError;
use crate::domain::language::{default_language, find_language, Language};
use crate::domain::model::{AssistantAnswer, Feature, TranslationRequest, TranslationResult};
use crate::domain::traits::SpeechUpdate;
use crate::presentation::theme::ThemeName;
use crate::state::AppState;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct TranslatorForm {
    pub source_text: String,
    pub target: &'static Language,
    pub result: Option<TranslationResult>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct AssistantForm {
    pub query: String,
    pub answer: Option<AssistantAnswer>,
    pub error: Option<String>,
}

/// What the shell should draw right now.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Home,
    /// Main view without a credential: a persistent error instead of the tabs.
    ConfigurationError(String),
    Main(AppMode),
}

// 同一时间只允许一个网络请求
struct InFlight(Arc<AtomicBool>);

impl InFlight {
    fn acquire(flag: &Arc<AtomicBool>) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag.clone()))
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Interactive state of one user: navigation, forms, theme and microphone.
pub struct Session {
    state: AppState,
    nav: Navigator,
    themes: ThemeController,
    speech: SpeechBridge,
    busy: Arc<AtomicBool>,
    pub translator: TranslatorForm,
    pub assistant: AssistantForm,
}

impl Session {
    pub fn new(
        state: AppState,
        themes: ThemeController,
        speech: SpeechBridge,
        initial_fragment: Option<&str>,
    ) -> Self {
        Self {
            state,
            nav: Navigator::new(initial_fragment),
            themes,
            speech,
            busy: Arc::new(AtomicBool::new(false)),
            translator: TranslatorForm {
                source_text: String::new(),
                target: default_language(),
                result: None,
                error: None,
            },
            assistant: AssistantForm::default(),
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn nav(&self) -> &Navigator {
        &self.nav
    }

    pub fn theme(&self) -> ThemeName {
        self.themes.current()
    }

    pub fn speech(&self) -> &SpeechBridge {
        &self.speech
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    pub fn screen(&self) -> Screen {
        match self.nav.view() {
            View::Home => Screen::Home,
            View::Main => match self.state.ai.unavailable_reason() {
                Some(reason) => Screen::ConfigurationError(reason.to_string()),
                None => Screen::Main(self.nav.mode()),
            },
        }
    }

    // Navigation

    pub fn enter_app(&mut self, mode: Option<AppMode>) {
        self.nav.enter_app(mode);
    }

    pub fn go_home(&mut self) {
        self.nav.go_home();
    }

    pub fn back(&mut self) -> bool {
        self.nav.back()
    }

    pub fn forward(&mut self) -> bool {
        self.nav.forward()
    }

    /// Switch tab; from the home view this also enters the app.
    pub fn select_tab(&mut self, mode: AppMode) {
        match self.nav.view() {
            View::Home => self.nav.enter_app(Some(mode)),
            View::Main => self.nav.select_tab(mode),
        }
    }

    // Theme

    pub fn toggle_theme(&mut self) -> Result<ThemeName, AppError> {
        self.themes.toggle()
    }

    pub fn reset_theme(&mut self) -> Result<ThemeName, AppError> {
        self.themes.reset()
    }

    // Translator

    pub fn set_source_text(&mut self, text: impl Into<String>) {
        self.translator.source_text = text.into();
    }

    pub fn set_target_language(&mut self, code: &str) -> Result<&'static Language, AppError> {
        let language = find_language(code).ok_or_else(|| {
            AppError::Validation(format!("Unsupported target language: {}", code))
        })?;
        self.translator.target = language;
        Ok(language)
    }

    pub fn clear_translator(&mut self) {
        self.translator.source_text.clear();
        self.translator.result = None;
        self.translator.error = None;
    }

    pub async fn translate(&mut self) -> Result<(), AppError> {
        let Some(_in_flight) = InFlight::acquire(&self.busy) else {
            return Err(already_running());
        };

        self.translator.error = None;
        self.translator.result = None;

        let request = TranslationRequest::new(
            self.translator.source_text.clone(),
            self.translator.target.code,
        );
        match translate_text(&self.state.ai, &request).await {
            Ok(result) => {
                self.translator.result = Some(result);
                Ok(())
            }
            Err(e) => {
                self.translator.error = Some(e.user_message(Feature::Translator));
                Err(e)
            }
        }
    }

    // Assistant

    pub fn set_assistant_query(&mut self, query: impl Into<String>) {
        self.assistant.query = query.into();
    }

    pub fn clear_assistant(&mut self) {
        self.assistant = AssistantForm::default();
    }

    pub async fn ask(&mut self) -> Result<(), AppError> {
        let Some(_in_flight) = InFlight::acquire(&self.busy) else {
            return Err(already_running());
        };

        self.assistant.error = None;
        self.assistant.answer = None;

        match ask_assistant(&self.state.ai, &self.assistant.query).await {
            Ok(answer) => {
                self.assistant.answer = Some(answer);
                Ok(())
            }
            Err(e) => {
                self.assistant.error = Some(e.user_message(Feature::Assistant));
                Err(e)
            }
        }
    }

    // Current tab

    /// Text typed or dictated into the current tab, if any.
    pub fn pending_input(&self) -> Option<&str> {
        let text = match self.nav.mode() {
            AppMode::Translator => &self.translator.source_text,
            AppMode::Assistant => &self.assistant.query,
            AppMode::Settings => return None,
        };
        (!text.trim().is_empty()).then_some(text.as_str())
    }

    /// The translation or answer shown on the current tab.
    pub fn copyable_output(&self) -> Option<&str> {
        match self.nav.mode() {
            AppMode::Translator => self
                .translator
                .result
                .as_ref()
                .map(|result| result.translation.as_str()),
            AppMode::Assistant => self
                .assistant
                .answer
                .as_ref()
                .map(|answer| answer.answer.as_str()),
            AppMode::Settings => None,
        }
        .filter(|text| !text.is_empty())
    }

    // Microphone

    pub fn toggle_mic(&mut self, feature: Feature) -> Result<MicAction, AppError> {
        if self.is_busy() {
            return Err(already_running());
        }
        self.speech.toggle(feature, self.state.ai.is_ready())
    }

    pub fn apply_speech_event(&mut self, update: SpeechUpdate) -> Option<Feature> {
        let (feature, transcript) = self.speech.handle_event(update)?;
        match feature {
            Feature::Translator => self.translator.source_text = transcript,
            Feature::Assistant => self.assistant.query = transcript,
        }
        Some(feature)
    }

    pub fn shutdown(&mut self) {
        self.speech.shutdown();
    }
}

fn already_running() -> AppError {
    AppError::Validation("A request is already in progress. Please wait for it to finish.".to_string())
}

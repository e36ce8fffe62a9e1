use crate::application::navigation::AppMode;
use crate::application::prompt::COMPANY_NAME;
use crate::application::session::{Screen, Session};
use crate::domain::language::SUPPORTED_LANGUAGES;
use crate::domain::model::{AssistantAnswer, Feature, TranslationResult};
use crate::presentation::theme::{Theme, ThemeName};
use indicatif::{ProgressBar, ProgressStyle};
use std::fmt::Write;
use std::time::Duration;

pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
pub const FEEDBACK_EMAIL: &str = "feedback@hereandnow.ai";

fn cutoff(theme: &Theme) -> String {
    (theme.line)(&"⸺".repeat(40))
}

/// Translation card: primary text, confidence badge, then the details.
pub fn format_translation(result: &TranslationResult, theme: &Theme) -> String {
    let mut output = String::new();

    writeln!(
        output,
        "{} {}",
        (theme.title)("Translation"),
        theme.confidence(result.confidence_level.as_str())
    )
    .ok();
    writeln!(output, "  {}", cutoff(theme)).ok();
    for line in result.translation.lines() {
        writeln!(output, "  {}", (theme.highlight)(line)).ok();
    }
    writeln!(output).ok();

    writeln!(
        output,
        "  {} {} ({})",
        (theme.label)("Source Language:"),
        (theme.value)(&result.source_language),
        (theme.value)(&result.detected_source_language_code.to_uppercase())
    )
    .ok();
    writeln!(
        output,
        "  {} {}",
        (theme.label)("Target Language:"),
        (theme.value)(&result.target_language)
    )
    .ok();

    if !result.alternative_options.is_empty() {
        writeln!(output, "  {}", (theme.label)("Alternative Options:")).ok();
        for (i, option) in result.alternative_options.iter().enumerate() {
            writeln!(
                output,
                "    {}. {}",
                (theme.idx)(&(i + 1).to_string()),
                (theme.value)(option)
            )
            .ok();
        }
    }

    if !result.context_notes.is_empty() {
        writeln!(output, "  {}", (theme.label)("Context Notes:")).ok();
        for line in result.context_notes.lines() {
            writeln!(output, "    {}", (theme.muted)(line)).ok();
        }
    }

    writeln!(output).ok();
    output
}

pub fn format_answer(answer: &AssistantAnswer, theme: &Theme) -> String {
    let mut output = String::new();
    writeln!(output, "{}", (theme.title)("AI Assistant's Response:")).ok();
    writeln!(output, "  {}", cutoff(theme)).ok();
    for line in answer.answer.lines() {
        writeln!(output, "  {}", (theme.value)(line)).ok();
    }
    writeln!(output).ok();
    output
}

pub fn format_error(message: &str, theme: &Theme, enable_emoji: bool) -> String {
    let prefix = if enable_emoji { "⚠️ " } else { "!" };
    format!("{} {}\n", prefix, (theme.error)(message))
}

pub fn format_languages(theme: &Theme) -> String {
    let mut output = String::new();
    for lang in SUPPORTED_LANGUAGES {
        writeln!(
            output,
            "  {}  {}",
            (theme.idx)(&format!("{:<3}", lang.code)),
            (theme.value)(lang.name)
        )
        .ok();
    }
    output
}

fn format_tabs(active: AppMode, theme: &Theme) -> String {
    let tabs: Vec<String> = AppMode::ALL
        .iter()
        .map(|mode| {
            if *mode == active {
                (theme.tab_active)(mode.label())
            } else {
                (theme.tab_inactive)(mode.label())
            }
        })
        .collect();
    format!("  {}\n", tabs.join("   "))
}

fn format_home(theme_name: ThemeName, theme: &Theme, ai_ready: bool, emoji: bool) -> String {
    let mut output = String::new();
    writeln!(output, "{}", (theme.title)(COMPANY_NAME)).ok();
    writeln!(output, "{}", (theme.highlight)("AI Services Suite")).ok();
    writeln!(output).ok();
    writeln!(
        output,
        "{}",
        (theme.value)("Step into the future of digital interaction with HEREANDNOW AI. Explore our advanced Translator and intelligent AI Assistant, designed to empower your communication and creativity.")
    )
    .ok();
    writeln!(output).ok();
    writeln!(
        output,
        "  {} {}",
        (theme.label)("Translator:"),
        (theme.value)("Break language barriers instantly with nuanced translations across diverse languages.")
    )
    .ok();
    writeln!(
        output,
        "  {} {}",
        (theme.label)("AI Assistant:"),
        (theme.value)("From complex queries to creative brainstorming, your partner in productivity.")
    )
    .ok();
    writeln!(output).ok();
    writeln!(output, "{}", (theme.highlight)("How to Use Our AI Suite")).ok();
    for (i, step) in [
        "Type /enter to open the suite (or /tab translator, /tab assistant).",
        "Pick a target language with /to <code>, then type the text to translate.",
        "Switch to the assistant with /tab assistant and type your question.",
        "Use /mic for voice input, then /send; /copy copies the result.",
        "Use /theme to change the look.",
    ]
    .iter()
    .enumerate()
    {
        writeln!(output, "  {}. {}", (theme.idx)(&(i + 1).to_string()), step).ok();
    }
    writeln!(output).ok();
    if !ai_ready {
        output.push_str(&format_error(
            "AI features are disabled: the API_KEY environment variable is not set.",
            theme,
            emoji,
        ));
    }
    writeln!(
        output,
        "{}",
        (theme.muted)(&format!(
            "/theme toggle switches to the {}.",
            theme_name.next_display_name()
        ))
    )
    .ok();
    output
}

fn format_settings(theme_name: ThemeName, theme: &Theme) -> String {
    let mut output = String::new();
    writeln!(output, "{}", (theme.title)("Appearance")).ok();
    writeln!(
        output,
        "  {} {}",
        (theme.label)("Current theme:"),
        (theme.value)(theme_name.display_name())
    )
    .ok();
    writeln!(
        output,
        "  {}",
        (theme.muted)(&format!(
            "/theme toggle → {}, /theme reset → Default Blue",
            theme_name.next_display_name()
        ))
    )
    .ok();
    writeln!(output).ok();

    writeln!(output, "{}", (theme.title)("About")).ok();
    writeln!(output, "  {} {}", (theme.label)("Version:"), APP_VERSION).ok();
    writeln!(output, "  {} {}", (theme.label)("Developed by:"), COMPANY_NAME).ok();
    writeln!(output, "  {} {}", (theme.label)("Feedback:"), FEEDBACK_EMAIL).ok();
    writeln!(output).ok();

    writeln!(output, "{}", (theme.title)("Supported Languages")).ok();
    output.push_str(&format_languages(theme));
    output
}

fn mic_status(session: &Session, feature: Feature, theme: &Theme) -> Option<String> {
    let speech = session.speech();
    if speech.is_recording_for(feature) {
        Some((theme.warning)("● recording… (/mic to stop)"))
    } else if speech.mic_disabled_for(feature) {
        Some((theme.muted)("microphone in use by the other input"))
    } else {
        None
    }
}

/// Render the whole current screen of an interactive session.
pub fn format_screen(session: &Session) -> String {
    let theme_name = session.theme();
    let theme = Theme::from_name(theme_name);
    let emoji = session.state().config.enable_emoji;
    let mut output = String::new();

    writeln!(output, "{}", (theme.muted)(&session.nav().title())).ok();
    writeln!(output).ok();

    match session.screen() {
        Screen::Home => {
            output.push_str(&format_home(
                theme_name,
                &theme,
                session.state().ai.is_ready(),
                emoji,
            ));
        }
        Screen::ConfigurationError(reason) => {
            writeln!(output, "{}", (theme.error)("Application Error")).ok();
            writeln!(output, "A critical configuration is missing:").ok();
            writeln!(output, "  {}", (theme.warning)(&reason)).ok();
            writeln!(
                output,
                "Please ensure the API_KEY environment variable is set and restart. Type /home to return to the homepage."
            )
            .ok();
        }
        Screen::Main(mode) => {
            output.push_str(&format_tabs(mode, &theme));
            writeln!(output).ok();
            if let Some(mic_error) = session.speech().mic_error() {
                output.push_str(&format_error(mic_error, &theme, emoji));
            }
            match mode {
                AppMode::Translator => {
                    let form = &session.translator;
                    writeln!(
                        output,
                        "{} {} ({})",
                        (theme.label)("Translate to:"),
                        (theme.value)(form.target.name),
                        form.target.code
                    )
                    .ok();
                    if !form.source_text.is_empty() {
                        writeln!(output, "{} {}", (theme.label)("Text:"), form.source_text).ok();
                    }
                    if let Some(status) = mic_status(session, Feature::Translator, &theme) {
                        writeln!(output, "{}", status).ok();
                    }
                    if let Some(error) = &form.error {
                        output.push_str(&format_error(error, &theme, emoji));
                    }
                    if let Some(result) = &form.result {
                        writeln!(output).ok();
                        output.push_str(&format_translation(result, &theme));
                    }
                }
                AppMode::Assistant => {
                    let form = &session.assistant;
                    if !form.query.is_empty() {
                        writeln!(output, "{} {}", (theme.label)("Query:"), form.query).ok();
                    }
                    if let Some(status) = mic_status(session, Feature::Assistant, &theme) {
                        writeln!(output, "{}", status).ok();
                    }
                    if let Some(error) = &form.error {
                        output.push_str(&format_error(error, &theme, emoji));
                    }
                    if let Some(answer) = &form.answer {
                        writeln!(output).ok();
                        output.push_str(&format_answer(answer, &theme));
                    }
                }
                AppMode::Settings => output.push_str(&format_settings(theme_name, &theme)),
            }
        }
    }

    writeln!(output).ok();
    writeln!(
        output,
        "{}",
        (theme.muted)(&format!("Powered by {}", COMPANY_NAME))
    )
    .ok();
    output
}

/// Spinner shown while a provider call is outstanding.
pub fn spinner(message: &'static str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.yellow} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

// Main entry point
use clap::Parser;
use colored::Colorize;
use hnai::application::assistant::ask_assistant;
use hnai::application::preferences::ThemeController;
use hnai::application::session::Session;
use hnai::application::speech::SpeechBridge;
use hnai::application::translate::translate_text;
use hnai::domain::error::AppError;
use hnai::domain::language::SUPPORTED_LANGUAGES;
use hnai::domain::model::{Feature, TranslationRequest};
use hnai::domain::traits::SpeechRecognizer;
use hnai::infrastructure::config::{self, load_config, read_api_key, Config};
use hnai::infrastructure::speech::CommandRecognizer;
use hnai::infrastructure::storage::prefs::FilePreferenceStore;
use hnai::interfaces::cli::{Cli, Command, ThemeAction};
use hnai::interfaces::shell;
use hnai::presentation::render::{
    format_answer, format_error, format_languages, format_translation, spinner,
};
use hnai::presentation::theme::{Theme, ThemeName};
use hnai::state::AppState;
use std::sync::Arc;
use tracing::warn;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Setup graceful shutdown handler
    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

    // Spawn signal handler task
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            eprintln!("Failed to listen for shutdown signal: {}", e);
        } else {
            let _ = shutdown_tx.send(());
        }
    });

    let cli = Cli::parse();
    let config = load_config()?;

    // Initialize logging
    if config.logging.enable {
        init_logging(&config.logging)?;
    }

    if cli.generate_config {
        config::generate_config_sample()?;
        return Ok(());
    }
    if cli.edit_config {
        if let Some(config_path) = config::get_config_path() {
            let editor = std::env::var("EDITOR").unwrap_or_else(|_| "vi".to_string());
            // Run editor in blocking task
            tokio::task::spawn_blocking(move || {
                std::process::Command::new(editor).arg(&config_path).status()
            })
            .await??;
        } else {
            eprintln!("{}", "Config file not found".red());
        }
        return Ok(());
    }

    // 凭据只在启动时读取一次
    let prefs = Arc::new(FilePreferenceStore::open(config::get_preferences_path()));
    let state = AppState::new(config, read_api_key(), prefs)?;
    let themes = load_themes(&state, cli.theme.as_deref());

    match cli.command.unwrap_or(Command::Shell) {
        Command::Translate { to, text } => {
            let theme = Theme::from_name(themes.current());
            let request = TranslationRequest::new(text.join(" "), to);
            let pb = spinner("Translating...");
            let result = translate_text(&state.ai, &request).await;
            pb.finish_and_clear();
            match result {
                Ok(result) if cli.json => println!("{}", serde_json::to_string_pretty(&result)?),
                Ok(result) => print!("{}", format_translation(&result, &theme)),
                Err(e) => exit_with(&state, &theme, &e, Feature::Translator),
            }
        }
        Command::Ask { query } => {
            let theme = Theme::from_name(themes.current());
            let pb = spinner("Thinking...");
            let result = ask_assistant(&state.ai, &query.join(" ")).await;
            pb.finish_and_clear();
            match result {
                Ok(answer) if cli.json => println!("{}", serde_json::to_string_pretty(&answer)?),
                Ok(answer) => print!("{}", format_answer(&answer, &theme)),
                Err(e) => exit_with(&state, &theme, &e, Feature::Assistant),
            }
        }
        Command::Languages => {
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&SUPPORTED_LANGUAGES)?);
            } else {
                print!("{}", format_languages(&Theme::from_name(themes.current())));
            }
        }
        Command::Theme { action } => {
            let mut themes = themes;
            let theme = match action {
                ThemeAction::Show => themes.current(),
                ThemeAction::Toggle => themes.toggle()?,
                ThemeAction::Reset => themes.reset()?,
            };
            println!("{}", theme.display_name());
        }
        Command::Status => print_status(&state, themes.current()),
        Command::Shell => {
            let recognizer = CommandRecognizer::from_config(&state.config.speech)
                .map(|r| Box::new(r) as Box<dyn SpeechRecognizer>);
            let (speech, speech_rx) =
                SpeechBridge::new(recognizer, state.config.speech.locale.clone());
            let session = Session::new(state, themes, speech, cli.open.as_deref());
            shell::run(session, speech_rx, shutdown_rx).await?;
            // stdin 的阻塞读取无法取消, 直接退出而不是等待运行时关闭
            std::process::exit(0);
        }
    }

    Ok(())
}

/// `--theme` wins for this run; otherwise the stored preference, then the config file.
fn load_themes(state: &AppState, cli_theme: Option<&str>) -> ThemeController {
    let parse = |name: &str| {
        ThemeName::parse(name).unwrap_or_else(|| {
            warn!(theme = %name, "Unknown theme, using default");
            ThemeName::Default
        })
    };
    match cli_theme {
        Some(name) => ThemeController::with_override(state.prefs.clone(), parse(name)),
        None => ThemeController::load(state.prefs.clone(), parse(&state.config.theme)),
    }
}

fn exit_with(state: &AppState, theme: &Theme, error: &AppError, feature: Feature) -> ! {
    eprint!(
        "{}",
        format_error(&error.user_message(feature), theme, state.config.enable_emoji)
    );
    std::process::exit(1);
}

/// Initialize logging with path and level configuration
fn init_logging(logging: &config::Logging) -> anyhow::Result<()> {
    use tracing_subscriber::EnvFilter;

    let level = match logging.level.as_str() {
        "DEBUG" => "debug",
        "INFO" => "info",
        "WARN" => "warn",
        "ERROR" => "error",
        _ => "warn",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    if let Some(path) = &logging.path {
        if !path.is_empty() {
            // Log to file
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(file)
                .init();
            return Ok(());
        }
    }

    // Log to stderr (default)
    tracing_subscriber::fmt().with_env_filter(filter).init();

    Ok(())
}

fn print_status(state: &AppState, theme: ThemeName) {
    let config: &Config = &state.config;
    println!("{}", "hnai Status".green().bold());
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    println!(
        "Config: {}",
        config::get_config_path()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "Not found".to_string())
    );
    println!("Preferences: {}", config::get_preferences_path().display());

    match state.ai.unavailable_reason() {
        None => println!("AI service: Configured ({})", config.model),
        Some(reason) => println!("AI service: {} {}", "Unavailable".red(), reason),
    }
    println!("Endpoint: {}", config.api_base_url);
    println!("Theme: {}", theme.display_name());

    match &config.speech.command {
        Some(command) => println!("Speech: {} ({})", command, config.speech.locale),
        None => println!("Speech: Not configured"),
    }
}

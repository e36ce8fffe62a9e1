use crate::application::navigation::AppMode;
use crate::application::session::{Screen, Session};
use crate::application::speech::MicAction;
use crate::domain::error::AppError;
use crate::domain::model::Feature;
use crate::domain::traits::SpeechUpdate;
use crate::interfaces::cli::ThemeAction;
use crate::presentation::clipboard::osc52_sequence;
use crate::presentation::render::{format_error, format_languages, format_screen, spinner};
use crate::presentation::theme::Theme;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::sync::oneshot;
use tracing::debug;

const HELP: &str = "\
Commands:
  /enter [tab]       open the suite (translator, assistant, settings)
  /home              back to the homepage
  /back, /forward    move through the view history
  /tab <name>        switch tab
  /to <code>         set the target language (see /languages)
  /languages         list supported languages
  /mic               start or stop voice input for the current tab
  /send              send the current tab's text again (e.g. after /mic)
  /copy              copy the translation or answer to the clipboard
  /clear             clear the current tab
  /theme [toggle|reset]
  /help, /quit
Anything else is sent to the current tab.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Enter(Option<AppMode>),
    Home,
    Back,
    Forward,
    Tab(AppMode),
    Target(String),
    Languages,
    Mic,
    Send,
    Copy,
    Clear,
    Theme(ThemeAction),
    Help,
    Quit,
    Submit(String),
    Empty,
    Unknown(String),
}

pub fn parse_line(line: &str) -> ShellCommand {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return ShellCommand::Empty;
    }
    let Some(command) = trimmed.strip_prefix('/') else {
        return ShellCommand::Submit(trimmed.to_string());
    };

    let mut parts = command.split_whitespace();
    let name = parts.next().unwrap_or_default().to_ascii_lowercase();
    let arg = parts.next();

    match (name.as_str(), arg) {
        ("enter" | "main", None) => ShellCommand::Enter(None),
        ("enter" | "main", Some(tab)) => match AppMode::parse(tab) {
            Some(mode) => ShellCommand::Enter(Some(mode)),
            None => ShellCommand::Unknown(trimmed.to_string()),
        },
        ("home", _) => ShellCommand::Home,
        ("back", _) => ShellCommand::Back,
        ("forward", _) => ShellCommand::Forward,
        ("tab", Some(tab)) => match AppMode::parse(tab) {
            Some(mode) => ShellCommand::Tab(mode),
            None => ShellCommand::Unknown(trimmed.to_string()),
        },
        ("translator" | "assistant" | "settings", None) => {
            AppMode::parse(&name).map_or(ShellCommand::Unknown(trimmed.to_string()), ShellCommand::Tab)
        }
        ("to", Some(code)) => ShellCommand::Target(code.to_string()),
        ("languages" | "langs", _) => ShellCommand::Languages,
        ("mic", _) => ShellCommand::Mic,
        ("send" | "translate" | "ask", None) => ShellCommand::Send,
        ("copy", _) => ShellCommand::Copy,
        ("clear", _) => ShellCommand::Clear,
        ("theme", None) | ("theme", Some("toggle")) => ShellCommand::Theme(ThemeAction::Toggle),
        ("theme", Some("reset")) => ShellCommand::Theme(ThemeAction::Reset),
        ("theme", Some("show")) => ShellCommand::Theme(ThemeAction::Show),
        ("help" | "?", _) => ShellCommand::Help,
        ("quit" | "exit" | "q", _) => ShellCommand::Quit,
        _ => ShellCommand::Unknown(trimmed.to_string()),
    }
}

/// Clear the terminal screen
fn clear_screen() {
    // ANSI escape sequence: clear screen and move cursor to top-left
    print!("\x1B[2J\x1B[1;1H");
    std::io::stdout().flush().ok();
}

fn redraw(session: &Session, notice: Option<&str>) {
    if session.state().config.clear_screen {
        clear_screen();
    }
    print!("{}", format_screen(session));
    if let Some(notice) = notice {
        let theme = Theme::from_name(session.theme());
        print!(
            "{}",
            format_error(notice, &theme, session.state().config.enable_emoji)
        );
    }
    print!("› ");
    std::io::stdout().flush().ok();
}

/// Run the interactive shell until `/quit`, end of input, or `shutdown` fires.
pub async fn run(
    mut session: Session,
    mut speech_events: UnboundedReceiver<SpeechUpdate>,
    mut shutdown: oneshot::Receiver<()>,
) -> Result<(), AppError> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    redraw(&session, None);

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match handle(&mut session, parse_line(&line)).await {
                    Outcome::Quit => break,
                    Outcome::Redraw(notice) => redraw(&session, notice.as_deref()),
                    Outcome::Print(text) => {
                        print!("{}\n› ", text);
                        std::io::stdout().flush().ok();
                    }
                }
            }
            Some(update) = speech_events.recv() => {
                session.apply_speech_event(update);
                redraw(&session, None);
            }
            _ = &mut shutdown => {
                println!();
                break;
            }
        }
    }

    session.shutdown();
    Ok(())
}

enum Outcome {
    Redraw(Option<String>),
    Print(String),
    Quit,
}

async fn handle(session: &mut Session, command: ShellCommand) -> Outcome {
    let notice = |e: AppError| Outcome::Redraw(Some(e.to_string()));

    match command {
        ShellCommand::Empty => Outcome::Redraw(None),
        ShellCommand::Enter(mode) => {
            session.enter_app(mode);
            Outcome::Redraw(None)
        }
        ShellCommand::Home => {
            session.go_home();
            Outcome::Redraw(None)
        }
        ShellCommand::Back => {
            session.back();
            Outcome::Redraw(None)
        }
        ShellCommand::Forward => {
            session.forward();
            Outcome::Redraw(None)
        }
        ShellCommand::Tab(mode) => {
            session.select_tab(mode);
            Outcome::Redraw(None)
        }
        ShellCommand::Target(code) => match session.set_target_language(&code) {
            Ok(_) => Outcome::Redraw(None),
            Err(e) => notice(e),
        },
        ShellCommand::Languages => {
            Outcome::Print(format_languages(&Theme::from_name(session.theme())))
        }
        ShellCommand::Mic => {
            let feature = match session.screen() {
                Screen::Main(AppMode::Translator) => Feature::Translator,
                Screen::Main(AppMode::Assistant) => Feature::Assistant,
                _ => {
                    return Outcome::Redraw(Some(
                        "Voice input is available on the Translator and AI Assistant tabs."
                            .to_string(),
                    ))
                }
            };
            match session.toggle_mic(feature) {
                Ok(MicAction::Started(_)) | Ok(MicAction::Stopped) => Outcome::Redraw(None),
                // capability errors are already shown by the mic status line
                Err(AppError::SpeechUnavailable(_)) => Outcome::Redraw(None),
                Err(e) => notice(e),
            }
        }
        ShellCommand::Send => match session.pending_input().map(str::to_string) {
            Some(text) => submit(session, text).await,
            None => Outcome::Redraw(Some(
                "Nothing to send yet. Type some text or use /mic first.".to_string(),
            )),
        },
        ShellCommand::Copy => match session.copyable_output() {
            Some(text) => {
                let theme = Theme::from_name(session.theme());
                Outcome::Print(format!(
                    "{}{}",
                    osc52_sequence(text),
                    (theme.muted)("Copied to clipboard.")
                ))
            }
            None => Outcome::Redraw(Some("Nothing to copy yet.".to_string())),
        },
        ShellCommand::Clear => {
            match session.nav().mode() {
                AppMode::Translator => session.clear_translator(),
                AppMode::Assistant => session.clear_assistant(),
                AppMode::Settings => {}
            }
            Outcome::Redraw(None)
        }
        ShellCommand::Theme(action) => {
            let result = match action {
                ThemeAction::Toggle => session.toggle_theme(),
                ThemeAction::Reset => session.reset_theme(),
                ThemeAction::Show => Ok(session.theme()),
            };
            match result {
                Ok(_) => Outcome::Redraw(None),
                Err(e) => notice(e),
            }
        }
        ShellCommand::Help => Outcome::Print(HELP.to_string()),
        ShellCommand::Quit => Outcome::Quit,
        ShellCommand::Unknown(input) => Outcome::Redraw(Some(format!(
            "Unknown command: {}. Type /help for the list of commands.",
            input
        ))),
        ShellCommand::Submit(text) => submit(session, text).await,
    }
}

async fn submit(session: &mut Session, text: String) -> Outcome {
    match session.screen() {
        Screen::Home => Outcome::Redraw(Some(
            "Type /enter to open the suite first.".to_string(),
        )),
        Screen::ConfigurationError(_) => Outcome::Redraw(None),
        Screen::Main(AppMode::Translator) => {
            session.set_source_text(text);
            let pb = spinner("Translating...");
            let result = session.translate().await;
            pb.finish_and_clear();
            if let Err(e) = result {
                debug!("Translation not completed: {}", e);
            }
            Outcome::Redraw(None)
        }
        Screen::Main(AppMode::Assistant) => {
            session.set_assistant_query(text);
            let pb = spinner("Thinking...");
            let result = session.ask().await;
            pb.finish_and_clear();
            if let Err(e) = result {
                debug!("Assistant query not completed: {}", e);
            }
            Outcome::Redraw(None)
        }
        Screen::Main(AppMode::Settings) => Outcome::Redraw(Some(
            "Switch to the Translator or AI Assistant tab to send text.".to_string(),
        )),
    }
}

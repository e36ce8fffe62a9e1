// Speech capture backed by an external recogniser process
use crate::domain::error::AppError;
use crate::domain::traits::{SpeechEvent, SpeechRecognizer, SpeechUpdate, TranscriptSegment};
use crate::infrastructure::config::SpeechConfig;
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;
use tokio::sync::mpsc::UnboundedSender;
use tokio::sync::oneshot;
use tracing::{debug, warn};

/// Runs the configured command and turns each stdout line into a transcript.
///
/// Lines starting with `~` are interim results; every other line is final.
/// The capture ends when the process exits or `stop` is called.
pub struct CommandRecognizer {
    command: String,
    stop_tx: Option<oneshot::Sender<()>>,
}

impl CommandRecognizer {
    pub fn from_config(config: &SpeechConfig) -> Result<Self, AppError> {
        match config.command.as_deref().map(str::trim) {
            Some(command) if !command.is_empty() => Ok(Self {
                command: command.to_string(),
                stop_tx: None,
            }),
            _ => Err(AppError::SpeechUnavailable(
                "Speech recognition is not supported here. Set `command` under [speech] in the config file to enable voice input.".to_string(),
            )),
        }
    }

    fn shell(command: &str) -> Command {
        if cfg!(target_os = "windows") {
            let mut cmd = Command::new("cmd");
            cmd.arg("/C").arg(command);
            cmd
        } else {
            let mut cmd = Command::new("sh");
            cmd.arg("-c").arg(command);
            cmd
        }
    }
}

pub fn parse_transcript_line(line: &str) -> Option<TranscriptSegment> {
    let (text, is_final) = match line.strip_prefix('~') {
        Some(rest) => (rest.trim(), false),
        None => (line.trim(), true),
    };
    if text.is_empty() {
        return None;
    }
    Some(TranscriptSegment {
        text: text.to_string(),
        is_final,
    })
}

impl SpeechRecognizer for CommandRecognizer {
    fn start(
        &mut self,
        capture: u64,
        locale: &str,
        events: UnboundedSender<SpeechUpdate>,
    ) -> Result<(), AppError> {
        let command_line = self.command.replace("{locale}", locale);
        debug!(capture, command = %command_line, "Starting speech recogniser");

        let mut child = Self::shell(&command_line)
            .env("SPEECH_LOCALE", locale)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                AppError::SpeechUnavailable(format!(
                    "Could not start voice input ({}). Check the recogniser command and microphone permissions.",
                    e
                ))
            })?;

        let Some(stdout) = child.stdout.take() else {
            return Err(AppError::SpeechUnavailable(
                "Could not read from the speech recogniser".to_string(),
            ));
        };

        let (stop_tx, mut stop_rx) = oneshot::channel::<()>();
        self.stop_tx = Some(stop_tx);

        tokio::spawn(async move {
            let emit = |event: SpeechEvent| {
                let _ = events.send(SpeechUpdate { capture, event });
            };
            let mut lines = BufReader::new(stdout).lines();
            loop {
                tokio::select! {
                    line = lines.next_line() => match line {
                        Ok(Some(line)) => {
                            if let Some(segment) = parse_transcript_line(&line) {
                                emit(SpeechEvent::Results(vec![segment]));
                            }
                        }
                        Ok(None) => break,
                        Err(e) => {
                            emit(SpeechEvent::Error(e.to_string()));
                            break;
                        }
                    },
                    _ = &mut stop_rx => {
                        if let Err(e) = child.kill().await {
                            warn!("Failed to stop speech recogniser: {}", e);
                        }
                        emit(SpeechEvent::End);
                        return;
                    }
                }
            }

            match child.wait().await {
                Ok(status) if !status.success() => {
                    emit(SpeechEvent::Error(format!("recogniser exited with {}", status)));
                }
                Err(e) => {
                    emit(SpeechEvent::Error(e.to_string()));
                }
                Ok(_) => {}
            }
            emit(SpeechEvent::End);
        });

        Ok(())
    }

    fn stop(&mut self) {
        if let Some(stop_tx) = self.stop_tx.take() {
            let _ = stop_tx.send(());
        }
    }
}

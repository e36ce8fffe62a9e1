// Terminal clipboard through the OSC 52 escape sequence
use base64::{engine::general_purpose::STANDARD, Engine};

/// Escape sequence asking the terminal to put `text` on the system clipboard.
/// Works over SSH and needs no display server.
pub fn osc52_sequence(text: &str) -> String {
    format!("\x1B]52;c;{}\x07", STANDARD.encode(text))
}

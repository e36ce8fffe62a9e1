use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "hnai")]
#[command(about = "HEREANDNOW AI Services Suite: AI translation and an AI assistant in the terminal.")]
#[command(version)]
pub struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Choose color theme for this run (default, light, dark)
    #[arg(short = 'T', long, global = true)]
    pub theme: Option<String>,

    /// View to open the interactive shell on (#home or #main)
    #[arg(long)]
    pub open: Option<String>,

    /// Generate config sample
    #[arg(long)]
    pub generate_config: bool,

    /// Edit configuration file
    #[arg(long)]
    pub edit_config: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Translate text into a supported language
    Translate {
        /// Target language code (see `languages`)
        #[arg(short = 't', long = "to", default_value = "es")]
        to: String,

        /// Text to translate
        #[arg(num_args = 0..)]
        text: Vec<String>,
    },
    /// Ask the AI assistant a question
    Ask {
        #[arg(num_args = 0..)]
        query: Vec<String>,
    },
    /// List supported target languages
    Languages,
    /// Show or change the saved theme
    Theme {
        #[arg(value_enum, default_value_t = ThemeAction::Show)]
        action: ThemeAction,
    },
    /// Show status
    Status,
    /// Start the interactive shell (the default)
    Shell,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ThemeAction {
    Show,
    Toggle,
    Reset,
}

use colored::Colorize;
use std::fmt;

/// Persisted under this key in the preference store.
pub const THEME_STORAGE_KEY: &str = "appTheme";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeName {
    #[default]
    Default,
    Light,
    Dark,
}

impl ThemeName {
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "default" | "" => Some(ThemeName::Default),
            "light" => Some(ThemeName::Light),
            "dark" => Some(ThemeName::Dark),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeName::Default => "default",
            ThemeName::Light => "light",
            ThemeName::Dark => "dark",
        }
    }

    /// default → light → dark → default
    pub fn next(&self) -> Self {
        match self {
            ThemeName::Default => ThemeName::Light,
            ThemeName::Light => ThemeName::Dark,
            ThemeName::Dark => ThemeName::Default,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ThemeName::Default => "Default Blue",
            ThemeName::Light => "Light",
            ThemeName::Dark => "Dark",
        }
    }

    /// Label for the "switch theme" action.
    pub fn next_display_name(&self) -> &'static str {
        match self.next() {
            ThemeName::Default => "Default Blue Theme",
            ThemeName::Light => "Light Theme",
            ThemeName::Dark => "Dark Theme",
        }
    }
}

impl fmt::Display for ThemeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub struct Theme {
    pub name: ThemeName,
    pub title: fn(&str) -> String,
    pub line: fn(&str) -> String,
    pub label: fn(&str) -> String,
    pub value: fn(&str) -> String,
    pub highlight: fn(&str) -> String,
    pub idx: fn(&str) -> String,
    pub muted: fn(&str) -> String,
    pub error: fn(&str) -> String,
    pub warning: fn(&str) -> String,
    pub tab_active: fn(&str) -> String,
    pub tab_inactive: fn(&str) -> String,
}

impl Theme {
    pub fn from_name(name: ThemeName) -> Self {
        match name {
            ThemeName::Default => Self::default_blue(),
            ThemeName::Light => Self::light(),
            ThemeName::Dark => Self::dark(),
        }
    }

    /// Badge for a confidence level; unknown levels get a neutral style.
    pub fn confidence(&self, level: &str) -> String {
        let badge = format!(" {} ", level);
        match (level.to_ascii_lowercase().as_str(), self.name) {
            ("high", ThemeName::Light) => badge.green().bold().to_string(),
            ("high", _) => badge.on_green().white().bold().to_string(),
            ("medium", ThemeName::Light) => badge.yellow().bold().to_string(),
            ("medium", _) => badge.on_yellow().black().bold().to_string(),
            ("low", ThemeName::Light) => badge.red().bold().to_string(),
            ("low", _) => badge.on_red().white().bold().to_string(),
            (_, ThemeName::Light) => badge.bright_black().to_string(),
            _ => badge.on_bright_black().white().to_string(),
        }
    }

    fn default_blue() -> Self {
        Self {
            name: ThemeName::Default,
            title: |s| s.bright_yellow().bold().to_string(),
            line: |s| s.bright_black().dimmed().to_string(),
            label: |s| s.cyan().to_string(),
            value: |s| s.bright_white().to_string(),
            highlight: |s| s.bright_white().bold().to_string(),
            idx: |s| s.bright_cyan().to_string(),
            muted: |s| s.bright_black().italic().to_string(),
            error: |s| s.bright_red().to_string(),
            warning: |s| s.yellow().to_string(),
            tab_active: |s| s.bright_yellow().bold().underline().to_string(),
            tab_inactive: |s| s.bright_black().to_string(),
        }
    }

    fn light() -> Self {
        Self {
            name: ThemeName::Light,
            title: |s| s.yellow().bold().to_string(),
            line: |s| s.bright_black().to_string(),
            label: |s| s.green().to_string(),
            value: |s| s.black().to_string(),
            highlight: |s| s.black().bold().to_string(),
            idx: |s| s.cyan().to_string(),
            muted: |s| s.bright_black().italic().to_string(),
            error: |s| s.red().to_string(),
            warning: |s| s.yellow().to_string(),
            tab_active: |s| s.yellow().bold().underline().to_string(),
            tab_inactive: |s| s.bright_black().to_string(),
        }
    }

    fn dark() -> Self {
        Self {
            name: ThemeName::Dark,
            title: |s| s.yellow().bold().to_string(),
            line: |s| s.bright_black().dimmed().to_string(),
            label: |s| s.bright_cyan().to_string(),
            value: |s| s.white().to_string(),
            highlight: |s| s.white().bold().to_string(),
            idx: |s| s.bright_white().to_string(),
            muted: |s| s.bright_black().dimmed().italic().to_string(),
            error: |s| s.red().to_string(),
            warning: |s| s.bright_yellow().to_string(),
            tab_active: |s| s.yellow().bold().underline().to_string(),
            tab_inactive: |s| s.bright_black().dimmed().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn themes_cycle_through_all_three() {
        let start = ThemeName::Default;
        assert_eq!(start.next(), ThemeName::Light);
        assert_eq!(start.next().next(), ThemeName::Dark);
        assert_eq!(start.next().next().next(), start);
    }

    #[test]
    fn names_parse_back() {
        for theme in [ThemeName::Default, ThemeName::Light, ThemeName::Dark] {
            assert_eq!(ThemeName::parse(theme.as_str()), Some(theme));
        }
        assert_eq!(ThemeName::parse("solarized"), None);
    }

    #[test]
    fn switch_label_names_the_next_theme() {
        assert_eq!(ThemeName::Default.next_display_name(), "Light Theme");
        assert_eq!(ThemeName::Dark.next_display_name(), "Default Blue Theme");
    }
}

use std::fmt;

pub const APP_TITLE_BASE: &str = "HEREANDNOW AI";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Home,
    Main,
}

impl View {
    /// Anything other than `#main` restores the home view.
    pub fn from_fragment(fragment: &str) -> Self {
        let fragment = fragment.trim();
        let fragment = fragment.strip_prefix('#').unwrap_or(fragment);
        if fragment.eq_ignore_ascii_case("main") {
            View::Main
        } else {
            View::Home
        }
    }

    pub fn fragment(&self) -> &'static str {
        match self {
            View::Home => "#home",
            View::Main => "#main",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppMode {
    #[default]
    Translator,
    Assistant,
    Settings,
}

impl AppMode {
    pub const ALL: [AppMode; 3] = [AppMode::Translator, AppMode::Assistant, AppMode::Settings];

    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "translator" | "translate" | "t" => Some(AppMode::Translator),
            "assistant" | "ask" | "a" => Some(AppMode::Assistant),
            "settings" | "s" => Some(AppMode::Settings),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AppMode::Translator => "Translator",
            AppMode::Assistant => "AI Assistant",
            AppMode::Settings => "Settings",
        }
    }
}

impl fmt::Display for AppMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

pub fn document_title(view: View, mode: AppMode) -> String {
    match view {
        View::Home => format!("{} | Home", APP_TITLE_BASE),
        View::Main => {
            let suffix = match mode {
                AppMode::Translator => "Translator",
                AppMode::Assistant => "AI Assistant",
                AppMode::Settings => "Settings",
            };
            format!("{} | Services Suite - {}", APP_TITLE_BASE, suffix)
        }
    }
}

/// View history with back/forward, plus the selected tab.
#[derive(Debug, Clone)]
pub struct Navigator {
    history: Vec<View>,
    cursor: usize,
    mode: AppMode,
}

impl Navigator {
    pub fn new(initial_fragment: Option<&str>) -> Self {
        let view = initial_fragment.map(View::from_fragment).unwrap_or(View::Home);
        Self {
            history: vec![view],
            cursor: 0,
            mode: AppMode::default(),
        }
    }

    pub fn view(&self) -> View {
        self.history[self.cursor]
    }

    pub fn mode(&self) -> AppMode {
        self.mode
    }

    pub fn fragment(&self) -> &'static str {
        self.view().fragment()
    }

    pub fn title(&self) -> String {
        document_title(self.view(), self.mode)
    }

    pub fn select_tab(&mut self, mode: AppMode) {
        self.mode = mode;
    }

    /// Enter the main view, optionally switching to `mode`.
    pub fn enter_app(&mut self, mode: Option<AppMode>) {
        if let Some(mode) = mode {
            self.mode = mode;
        }
        self.push(View::Main);
    }

    pub fn go_home(&mut self) {
        self.push(View::Home);
    }

    pub fn can_go_back(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.cursor + 1 < self.history.len()
    }

    pub fn back(&mut self) -> bool {
        if !self.can_go_back() {
            return false;
        }
        self.cursor -= 1;
        true
    }

    pub fn forward(&mut self) -> bool {
        if !self.can_go_forward() {
            return false;
        }
        self.cursor += 1;
        true
    }

    fn push(&mut self, view: View) {
        if self.view() == view {
            return;
        }
        self.history.truncate(self.cursor + 1);
        self.history.push(view);
        self.cursor += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fragment_restores_view() {
        assert_eq!(View::from_fragment("#main"), View::Main);
        assert_eq!(View::from_fragment("main"), View::Main);
        assert_eq!(View::from_fragment("#home"), View::Home);
        assert_eq!(View::from_fragment("#whatever"), View::Home);
        assert_eq!(Navigator::new(None).view(), View::Home);
    }

    #[test]
    fn back_and_forward_walk_the_history() {
        let mut nav = Navigator::new(Some("#home"));
        nav.enter_app(Some(AppMode::Assistant));
        nav.go_home();
        assert_eq!(nav.fragment(), "#home");

        assert!(nav.back());
        assert_eq!(nav.view(), View::Main);
        assert!(nav.back());
        assert_eq!(nav.view(), View::Home);
        assert!(!nav.back());

        assert!(nav.forward());
        assert_eq!(nav.view(), View::Main);
    }

    #[test]
    fn new_navigation_drops_forward_entries() {
        let mut nav = Navigator::new(None);
        nav.enter_app(None);
        nav.back();
        nav.enter_app(None);
        assert!(!nav.can_go_forward());
        assert_eq!(nav.view(), View::Main);
    }

    #[test]
    fn titles_follow_view_and_tab() {
        let mut nav = Navigator::new(None);
        assert_eq!(nav.title(), "HEREANDNOW AI | Home");
        nav.enter_app(Some(AppMode::Settings));
        assert_eq!(nav.title(), "HEREANDNOW AI | Services Suite - Settings");
        nav.select_tab(AppMode::Assistant);
        assert_eq!(nav.title(), "HEREANDNOW AI | Services Suite - AI Assistant");
    }
}

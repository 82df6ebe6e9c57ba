//! User configuration — keybindings and display options.
//!
//! Stored as a simple key-value text file at
//! `$XDG_CONFIG_HOME/gallery-walk/config.toml` (default
//! `~/.config/gallery-walk/config.toml`).

use std::collections::HashMap;
use std::path::PathBuf;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::warn;

// ───────────────────────────────────────── actions ───────────

/// All configurable user actions in the gallery view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    ScrollBack,
    ScrollForward,
    SelectNearest,
    ExitInspect,
    ViewWork,
    PrevMedia,
    NextMedia,
    Quit,
}

impl Action {
    /// Ordered list of all actions (used for serialisation).
    pub const ALL: &[Action] = &[
        Action::ScrollBack,
        Action::ScrollForward,
        Action::SelectNearest,
        Action::ExitInspect,
        Action::ViewWork,
        Action::PrevMedia,
        Action::NextMedia,
        Action::Quit,
    ];

    /// Key used in the config file.
    fn config_key(self) -> &'static str {
        match self {
            Action::ScrollBack => "scroll_back",
            Action::ScrollForward => "scroll_forward",
            Action::SelectNearest => "select",
            Action::ExitInspect => "exit_inspect",
            Action::ViewWork => "view_work",
            Action::PrevMedia => "prev_media",
            Action::NextMedia => "next_media",
            Action::Quit => "quit",
        }
    }

    fn from_config_key(s: &str) -> Option<Self> {
        match s {
            "scroll_back" => Some(Action::ScrollBack),
            "scroll_forward" => Some(Action::ScrollForward),
            "select" => Some(Action::SelectNearest),
            "exit_inspect" => Some(Action::ExitInspect),
            "view_work" => Some(Action::ViewWork),
            "prev_media" => Some(Action::PrevMedia),
            "next_media" => Some(Action::NextMedia),
            "quit" => Some(Action::Quit),
            _ => None,
        }
    }
}

// ───────────────────────────────────────── key bind ──────────

/// A single key binding — key code + modifier combination.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyBind {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBind {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// Does this binding match a key event?  Only CTRL/ALT/SHIFT modifiers
    /// are compared (platform-specific modifiers like SUPER are ignored).
    pub fn matches(&self, event: KeyEvent) -> bool {
        let mask = KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SHIFT;
        self.code == event.code && (self.modifiers & mask) == (event.modifiers & mask)
    }

    /// User-friendly display string (e.g. `"←"`, `"Ctrl+c"`, `"v"`).
    pub fn display(&self) -> String {
        let mut s = String::new();
        if self.modifiers.contains(KeyModifiers::CONTROL) {
            s.push_str("Ctrl+");
        }
        if self.modifiers.contains(KeyModifiers::ALT) {
            s.push_str("Alt+");
        }
        if self.modifiers.contains(KeyModifiers::SHIFT) {
            s.push_str("Shift+");
        }
        s.push_str(&match self.code {
            KeyCode::Char(' ') => "Space".into(),
            KeyCode::Char(c) => c.to_string(),
            KeyCode::Up => "↑".into(),
            KeyCode::Down => "↓".into(),
            KeyCode::Left => "←".into(),
            KeyCode::Right => "→".into(),
            KeyCode::Enter => "Enter".into(),
            KeyCode::Esc => "Esc".into(),
            other => format!("{other:?}"),
        });
        s
    }

    /// Serialise to config-file format (e.g. `"Left"`, `"Ctrl+c"`, `"v"`).
    fn to_config_string(&self) -> String {
        let mut s = String::new();
        if self.modifiers.contains(KeyModifiers::CONTROL) {
            s.push_str("Ctrl+");
        }
        if self.modifiers.contains(KeyModifiers::ALT) {
            s.push_str("Alt+");
        }
        if self.modifiers.contains(KeyModifiers::SHIFT) {
            s.push_str("Shift+");
        }
        s.push_str(&match self.code {
            KeyCode::Char(' ') => "Space".into(),
            KeyCode::Char(c) => c.to_string(),
            KeyCode::Up => "Up".into(),
            KeyCode::Down => "Down".into(),
            KeyCode::Left => "Left".into(),
            KeyCode::Right => "Right".into(),
            KeyCode::Enter => "Enter".into(),
            KeyCode::Esc => "Esc".into(),
            other => format!("{other:?}"),
        });
        s
    }

    /// Parse a key string like `"Ctrl+c"`, `"Left"`, `"v"`, `"Enter"`.
    fn parse(s: &str) -> Option<Self> {
        let mut modifiers = KeyModifiers::NONE;
        let parts: Vec<&str> = s.split('+').collect();
        let key_part = parts.last()?;

        for &part in &parts[..parts.len() - 1] {
            match part.to_lowercase().as_str() {
                "ctrl" => modifiers |= KeyModifiers::CONTROL,
                "alt" => modifiers |= KeyModifiers::ALT,
                "shift" => modifiers |= KeyModifiers::SHIFT,
                _ => return None,
            }
        }

        let code = match key_part.to_lowercase().as_str() {
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "enter" | "return" => KeyCode::Enter,
            "esc" | "escape" => KeyCode::Esc,
            "space" => KeyCode::Char(' '),
            s if s.len() == 1 => KeyCode::Char(s.chars().next()?),
            _ => return None,
        };

        Some(KeyBind { code, modifiers })
    }
}

// ───────────────────────────────────────── config ────────────

/// Application configuration — keybindings and display options.
pub struct AppConfig {
    pub bindings: HashMap<Action, Vec<KeyBind>>,
    /// Faster velocity settle so idle detection kicks in sooner
    /// (battery-friendly).
    pub low_power: bool,
    /// Select the first interactive artwork immediately on launch.
    pub auto_focus_first: bool,
    /// Narrow-viewport constant set (tighter module spacing).
    pub narrow_viewport: bool,
    /// Offset change per wheel notch / arrow key press.
    pub scroll_step: f32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::defaults()
    }
}

impl AppConfig {
    /// Hard-coded default keybindings.
    pub fn default_bindings() -> HashMap<Action, Vec<KeyBind>> {
        use Action::*;
        use KeyCode::*;
        let n = KeyModifiers::NONE;
        let mut m = HashMap::new();

        m.insert(ScrollBack, vec![KeyBind::new(Left, n), KeyBind::new(Char('h'), n)]);
        m.insert(ScrollForward, vec![KeyBind::new(Right, n), KeyBind::new(Char('l'), n)]);
        m.insert(SelectNearest, vec![KeyBind::new(Enter, n)]);
        m.insert(ExitInspect, vec![KeyBind::new(Esc, n)]);
        m.insert(ViewWork, vec![KeyBind::new(Char('v'), n)]);
        m.insert(PrevMedia, vec![KeyBind::new(Char('['), n)]);
        m.insert(NextMedia, vec![KeyBind::new(Char(']'), n)]);
        m.insert(Quit, vec![KeyBind::new(Char('q'), n)]);

        m
    }

    /// Find the action that matches a key event.  When multiple bindings
    /// match, the one with the most modifiers wins.
    pub fn match_key(&self, event: KeyEvent) -> Option<Action> {
        let mut best: Option<Action> = None;
        let mut best_mod_count = 0;

        for (&action, binds) in &self.bindings {
            for bind in binds {
                if bind.matches(event) {
                    let mc = bind.modifiers.bits().count_ones();
                    if best.is_none() || mc > best_mod_count {
                        best = Some(action);
                        best_mod_count = mc;
                    }
                }
            }
        }
        best
    }

    /// Short display of the first binding only (for the status bar).
    fn short_binding(&self, action: Action) -> String {
        match self.bindings.get(&action) {
            Some(binds) if !binds.is_empty() => binds[0].display(),
            _ => "?".into(),
        }
    }

    /// Build the status-bar hint string from current bindings.
    pub fn walk_hint(&self) -> String {
        format!(
            "{}/{}: scroll | {}: inspect | {}: quit",
            self.short_binding(Action::ScrollBack),
            self.short_binding(Action::ScrollForward),
            self.short_binding(Action::SelectNearest),
            self.short_binding(Action::Quit),
        )
    }

    pub fn inspect_hint(&self, has_media: bool) -> String {
        if has_media {
            format!(
                "{}: view work | {}: back | scroll to leave",
                self.short_binding(Action::ViewWork),
                self.short_binding(Action::ExitInspect),
            )
        } else {
            format!(
                "{}: back | scroll to leave",
                self.short_binding(Action::ExitInspect),
            )
        }
    }

    // ── persistence ─────────────────────────────────────────────

    /// Load config from disk, falling back to defaults.  On first run the
    /// defaults are written out so users have a file to edit.
    pub fn load() -> Self {
        let path = config_path();
        if path.exists() {
            match std::fs::read_to_string(&path) {
                Ok(contents) => return Self::parse_config(&contents),
                Err(err) => warn!(?path, %err, "failed to read config, using defaults"),
            }
            return Self::defaults();
        }
        let defaults = Self::defaults();
        if let Err(err) = defaults.save() {
            warn!(?path, %err, "could not write default config");
        }
        defaults
    }

    fn defaults() -> Self {
        Self {
            bindings: Self::default_bindings(),
            low_power: false,
            auto_focus_first: false,
            narrow_viewport: false,
            scroll_step: 0.04,
        }
    }

    /// Persist current config to disk.
    pub fn save(&self) -> anyhow::Result<()> {
        let path = config_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, self.serialise())?;
        Ok(())
    }

    fn parse_config(s: &str) -> Self {
        let mut config = Self::defaults();

        for line in s.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('[') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let key = key.trim();
            let value = value.trim();

            // Display options.
            match key {
                "low_power" => {
                    config.low_power = value == "true";
                    continue;
                }
                "auto_focus_first" => {
                    config.auto_focus_first = value == "true";
                    continue;
                }
                "narrow_viewport" => {
                    config.narrow_viewport = value == "true";
                    continue;
                }
                "scroll_step" => {
                    if let Ok(v) = value.parse::<f32>() {
                        // Keep this bounded for predictable UX.
                        config.scroll_step = v.clamp(0.005, 0.2);
                    }
                    continue;
                }
                _ => {}
            }

            let Some(action) = Action::from_config_key(key) else {
                continue;
            };

            let mut parsed = Vec::new();
            for part in value.split(',') {
                let part = part.trim().trim_matches('"');
                if let Some(bind) = KeyBind::parse(part) {
                    parsed.push(bind);
                }
            }
            if !parsed.is_empty() {
                config.bindings.insert(action, parsed);
            }
        }

        config
    }

    fn serialise(&self) -> String {
        let mut lines = vec![
            "# gallery-walk configuration".to_string(),
            String::new(),
            "# Display options".to_string(),
            format!("low_power = {}", self.low_power),
            format!("auto_focus_first = {}", self.auto_focus_first),
            format!("narrow_viewport = {}", self.narrow_viewport),
            format!("scroll_step = {}", self.scroll_step),
            String::new(),
            "# Key bindings".to_string(),
            "# Format: action = Key1, Key2, ...".to_string(),
            "# Modifiers: Ctrl+, Alt+, Shift+ (prefix)".to_string(),
            "# Special keys: Up, Down, Left, Right, Enter, Esc, Space".to_string(),
            String::new(),
        ];

        for &action in Action::ALL {
            if let Some(binds) = self.bindings.get(&action) {
                let keys: Vec<String> = binds.iter().map(|b| b.to_config_string()).collect();
                lines.push(format!("{} = {}", action.config_key(), keys.join(", ")));
            }
        }
        lines.push(String::new());
        lines.join("\n")
    }
}

/// Return the config file path (`$XDG_CONFIG_HOME/gallery-walk/config.toml`).
fn config_path() -> PathBuf {
    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            PathBuf::from(home).join(".config")
        });
    config_dir.join("gallery-walk").join("config.toml")
}

//! User configuration: motion tuning, keybindings and persistence.
//!
//! Settings are stored as a simple key-value text file at
//! `$XDG_CONFIG_HOME/hero-motion/config.toml` (default
//! `~/.config/hero-motion/config.toml`).  Values that fail validation are
//! logged and replaced by their defaults.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::core::effects::{Parallax, NAVBAR_HIDE_AFTER, PARALLAX_SPEED};
use crate::core::error::MotionError;
use crate::core::follower::{Smoothing, DEFAULT_ALPHA, DEFAULT_INTENSITY_SCALE};

pub const DEFAULT_FPS: u32 = 60;

// ───────────────────────────────────────── actions ───────────

/// All configurable user actions on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,
    NextSection,
    PrevSection,
    ToggleMenu,
    NextFilter,
    PrevFilter,
    WriteMessage,
    Quit,
}

impl Action {
    pub const ALL: &[Action] = &[
        Action::ScrollUp,
        Action::ScrollDown,
        Action::PageUp,
        Action::PageDown,
        Action::NextSection,
        Action::PrevSection,
        Action::ToggleMenu,
        Action::NextFilter,
        Action::PrevFilter,
        Action::WriteMessage,
        Action::Quit,
    ];

    /// Human-readable label for the UI.
    pub fn label(self) -> &'static str {
        match self {
            Action::ScrollUp => "Scroll Up",
            Action::ScrollDown => "Scroll Down",
            Action::PageUp => "Page Up",
            Action::PageDown => "Page Down",
            Action::NextSection => "Next Section",
            Action::PrevSection => "Previous Section",
            Action::ToggleMenu => "Menu",
            Action::NextFilter => "Next Filter",
            Action::PrevFilter => "Previous Filter",
            Action::WriteMessage => "Write Message",
            Action::Quit => "Quit",
        }
    }

    fn config_key(self) -> &'static str {
        match self {
            Action::ScrollUp => "scroll_up",
            Action::ScrollDown => "scroll_down",
            Action::PageUp => "page_up",
            Action::PageDown => "page_down",
            Action::NextSection => "next_section",
            Action::PrevSection => "prev_section",
            Action::ToggleMenu => "toggle_menu",
            Action::NextFilter => "next_filter",
            Action::PrevFilter => "prev_filter",
            Action::WriteMessage => "write_message",
            Action::Quit => "quit",
        }
    }

    fn from_config_key(s: &str) -> Option<Self> {
        Action::ALL.iter().copied().find(|a| a.config_key() == s)
    }
}

// ───────────────────────────────────────── key bind ──────────

/// A single key binding: key code plus modifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyBind {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

const MOD_MASK: KeyModifiers = KeyModifiers::CONTROL
    .union(KeyModifiers::ALT)
    .union(KeyModifiers::SHIFT);

impl KeyBind {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// Only CTRL/ALT/SHIFT are compared.
    pub fn matches(&self, event: KeyEvent) -> bool {
        self.code == event.code && (self.modifiers & MOD_MASK) == (event.modifiers & MOD_MASK)
    }

    /// Short display string for the status bar (e.g. `"↓"`, `"PgDn"`).
    pub fn display(&self) -> String {
        let mut s = modifier_prefix(self.modifiers);
        s.push_str(&match self.code {
            KeyCode::Char(' ') => "Space".into(),
            KeyCode::Char(c) => c.to_string(),
            KeyCode::Up => "↑".into(),
            KeyCode::Down => "↓".into(),
            KeyCode::Left => "←".into(),
            KeyCode::Right => "→".into(),
            KeyCode::PageUp => "PgUp".into(),
            KeyCode::PageDown => "PgDn".into(),
            other => key_name(other),
        });
        s
    }

    fn to_config_string(&self) -> String {
        let mut s = modifier_prefix(self.modifiers);
        s.push_str(&key_name(self.code));
        s
    }

    /// Parse a key string like `"Ctrl+c"`, `"Shift+Tab"`, `"j"`, `"PageDown"`.
    fn parse(s: &str) -> Option<Self> {
        let mut modifiers = KeyModifiers::NONE;
        let parts: Vec<&str> = s.split('+').collect();
        let (key_part, mods) = parts.split_last()?;

        for part in mods {
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
            "tab" => KeyCode::Tab,
            "backtab" => KeyCode::BackTab,
            "home" => KeyCode::Home,
            "end" => KeyCode::End,
            "pageup" | "pgup" => KeyCode::PageUp,
            "pagedown" | "pgdn" => KeyCode::PageDown,
            "space" => KeyCode::Char(' '),
            _ if key_part.chars().count() == 1 => KeyCode::Char(key_part.chars().next()?),
            _ => return None,
        };

        Some(KeyBind { code, modifiers })
    }
}

fn modifier_prefix(modifiers: KeyModifiers) -> String {
    let mut s = String::new();
    if modifiers.contains(KeyModifiers::CONTROL) {
        s.push_str("Ctrl+");
    }
    if modifiers.contains(KeyModifiers::ALT) {
        s.push_str("Alt+");
    }
    if modifiers.contains(KeyModifiers::SHIFT) {
        s.push_str("Shift+");
    }
    s
}

fn key_name(code: KeyCode) -> String {
    match code {
        KeyCode::Char(' ') => "Space".into(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Up => "Up".into(),
        KeyCode::Down => "Down".into(),
        KeyCode::Left => "Left".into(),
        KeyCode::Right => "Right".into(),
        KeyCode::Enter => "Enter".into(),
        KeyCode::Esc => "Esc".into(),
        KeyCode::Tab => "Tab".into(),
        KeyCode::BackTab => "BackTab".into(),
        KeyCode::Home => "Home".into(),
        KeyCode::End => "End".into(),
        KeyCode::PageUp => "PageUp".into(),
        KeyCode::PageDown => "PageDown".into(),
        other => format!("{other:?}"),
    }
}

// ───────────────────────────────────────── config ────────────

/// Application configuration: motion tuning and keybindings.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bindings: HashMap<Action, Vec<KeyBind>>,
    /// Fraction of the remaining tilt covered per frame.
    pub smoothing_alpha: f64,
    /// Bulb scale gained per degree of tilt.
    pub intensity_scale: f64,
    /// Hero image drift per scrolled pixel.
    pub parallax_speed: f64,
    /// Pixels scrolled before the navbar may hide.
    pub navbar_hide_after: f64,
    /// Repaints per second.
    pub fps: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bindings: Self::default_bindings(),
            smoothing_alpha: DEFAULT_ALPHA,
            intensity_scale: DEFAULT_INTENSITY_SCALE,
            parallax_speed: PARALLAX_SPEED,
            navbar_hide_after: NAVBAR_HIDE_AFTER,
            fps: DEFAULT_FPS,
        }
    }
}

impl AppConfig {
    pub fn default_bindings() -> HashMap<Action, Vec<KeyBind>> {
        use KeyCode::*;
        let n = KeyModifiers::NONE;
        let mut m = HashMap::new();

        m.insert(Action::ScrollUp, vec![KeyBind::new(Up, n), KeyBind::new(Char('k'), n)]);
        m.insert(Action::ScrollDown, vec![KeyBind::new(Down, n), KeyBind::new(Char('j'), n)]);
        m.insert(Action::PageUp, vec![KeyBind::new(PageUp, n)]);
        m.insert(Action::PageDown, vec![KeyBind::new(PageDown, n), KeyBind::new(Char(' '), n)]);
        m.insert(Action::NextSection, vec![KeyBind::new(Char('n'), n)]);
        m.insert(Action::PrevSection, vec![KeyBind::new(Char('p'), n)]);
        m.insert(Action::ToggleMenu, vec![KeyBind::new(Char('m'), n)]);
        m.insert(Action::NextFilter, vec![KeyBind::new(Tab, n), KeyBind::new(Right, n)]);
        m.insert(
            Action::PrevFilter,
            vec![KeyBind::new(BackTab, KeyModifiers::SHIFT), KeyBind::new(Left, n)],
        );
        m.insert(Action::WriteMessage, vec![KeyBind::new(Char('w'), n)]);
        m.insert(Action::Quit, vec![KeyBind::new(Char('q'), n)]);

        m
    }

    /// Find the action bound to a key event.  The binding with the most
    /// modifiers wins when several match.
    pub fn match_key(&self, event: KeyEvent) -> Option<Action> {
        self.bindings
            .iter()
            .flat_map(|(&action, binds)| binds.iter().map(move |b| (action, b)))
            .filter(|(_, bind)| bind.matches(event))
            .max_by_key(|(_, bind)| bind.modifiers.bits().count_ones())
            .map(|(action, _)| action)
    }

    /// First binding of `action`, as shown in hints.
    pub fn short_binding(&self, action: Action) -> String {
        match self.bindings.get(&action) {
            Some(binds) if !binds.is_empty() => binds[0].display(),
            _ => "?".into(),
        }
    }

    /// Build the status-bar hint string from current bindings.
    pub fn status_bar_hint(&self) -> String {
        format!(
            "{}/{}: scroll | {}: section | {}: menu | {}: filter | {}: message | {}: quit",
            self.short_binding(Action::ScrollUp),
            self.short_binding(Action::ScrollDown),
            self.short_binding(Action::NextSection),
            self.short_binding(Action::ToggleMenu),
            self.short_binding(Action::NextFilter),
            self.short_binding(Action::WriteMessage),
            self.short_binding(Action::Quit),
        )
    }

    // ── motion parameters ───────────────────────────────────────

    pub fn smoothing(&self) -> Result<Smoothing, MotionError> {
        Smoothing::new(self.smoothing_alpha, self.intensity_scale)
    }

    pub fn parallax(&self) -> Result<Parallax, MotionError> {
        Parallax::new(self.parallax_speed)
    }

    /// Time between repaints.
    pub fn frame_interval(&self) -> Duration {
        Duration::from_micros(1_000_000 / u64::from(self.fps.max(1)))
    }

    /// Override the smoothing factor, rejecting values the follower can't use.
    pub fn set_alpha(&mut self, alpha: f64) -> Result<(), MotionError> {
        Smoothing::new(alpha, self.intensity_scale)?;
        self.smoothing_alpha = alpha;
        Ok(())
    }

    pub fn set_fps(&mut self, fps: u32) -> Result<(), MotionError> {
        self.fps = validate_fps(fps)?;
        Ok(())
    }

    // ── persistence ─────────────────────────────────────────────

    /// Load config from disk, falling back to defaults.
    pub fn load() -> Self {
        let path = config_path();
        match std::fs::read_to_string(&path) {
            Ok(contents) => Self::parse(&contents),
            Err(e) => {
                tracing::debug!("no config at {}: {e}", path.display());
                Self::default()
            }
        }
    }

    /// Persist current config to disk.
    pub fn save(&self) -> anyhow::Result<PathBuf> {
        let path = config_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, self.serialise())?;
        Ok(path)
    }

    pub fn parse(s: &str) -> Self {
        let mut config = Self::default();

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

            if config.apply_setting(key, value) {
                continue;
            }

            let Some(action) = Action::from_config_key(key) else {
                tracing::warn!("unknown config key {key:?}");
                continue;
            };

            let parsed: Vec<KeyBind> = value
                .split(',')
                .filter_map(|part| KeyBind::parse(part.trim().trim_matches('"')))
                .collect();
            if !parsed.is_empty() {
                config.bindings.insert(action, parsed);
            }
        }

        config
    }

    /// Apply one motion setting.  Returns `false` when `key` is not a
    /// setting, so the caller can try it as a key binding.
    fn apply_setting(&mut self, key: &str, value: &str) -> bool {
        match key {
            "smoothing_alpha" => match value.parse::<f64>() {
                Ok(alpha) => {
                    if let Err(e) = self.set_alpha(alpha) {
                        tracing::warn!("ignoring smoothing_alpha: {e}");
                    }
                }
                Err(e) => tracing::warn!("ignoring smoothing_alpha {value:?}: {e}"),
            },
            "intensity_scale" => match value.parse::<f64>() {
                Ok(scale) => match Smoothing::new(self.smoothing_alpha, scale) {
                    Ok(_) => self.intensity_scale = scale,
                    Err(e) => tracing::warn!("ignoring intensity_scale: {e}"),
                },
                Err(e) => tracing::warn!("ignoring intensity_scale {value:?}: {e}"),
            },
            "parallax_speed" => match value.parse::<f64>().map(|v| (v, Parallax::new(v))) {
                Ok((speed, Ok(_))) => self.parallax_speed = speed,
                Ok((_, Err(e))) => tracing::warn!("ignoring parallax_speed: {e}"),
                Err(e) => tracing::warn!("ignoring parallax_speed {value:?}: {e}"),
            },
            "navbar_hide_after" => match value.parse::<f64>() {
                Ok(v) if v.is_finite() && v >= 0.0 => self.navbar_hide_after = v,
                _ => tracing::warn!("ignoring navbar_hide_after {value:?}"),
            },
            "fps" => match value.parse::<u32>() {
                Ok(fps) => {
                    if let Err(e) = self.set_fps(fps) {
                        tracing::warn!("ignoring fps: {e}");
                    }
                }
                Err(e) => tracing::warn!("ignoring fps {value:?}: {e}"),
            },
            _ => return false,
        }
        true
    }

    pub fn serialise(&self) -> String {
        let mut lines = vec![
            "# hero-motion configuration".to_string(),
            String::new(),
            "# Motion".to_string(),
            format!("smoothing_alpha = {}", self.smoothing_alpha),
            format!("intensity_scale = {}", self.intensity_scale),
            format!("parallax_speed = {}", self.parallax_speed),
            format!("navbar_hide_after = {}", self.navbar_hide_after),
            format!("fps = {}", self.fps),
            String::new(),
            "# Key bindings".to_string(),
            "# Format: action = Key1, Key2, ...".to_string(),
            "# Modifiers: Ctrl+, Alt+, Shift+ (prefix)".to_string(),
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

fn validate_fps(fps: u32) -> Result<u32, MotionError> {
    if (1..=240).contains(&fps) {
        Ok(fps)
    } else {
        Err(MotionError::InvalidFrameRate(fps))
    }
}

/// Return the config file path (`$XDG_CONFIG_HOME/hero-motion/config.toml`).
pub fn config_path() -> PathBuf {
    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            PathBuf::from(home).join(".config")
        });
    config_dir.join("hero-motion").join("config.toml")
}

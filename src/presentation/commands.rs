use crate::domain::keybinding::Action;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;
use tracing::warn;

pub struct CommandRegistry {
    display_bindings: HashMap<Action, KeyEvent>,
    input_bindings: Vec<(KeyEvent, Action)>,
}

impl Default for CommandRegistry {
    fn default() -> Self {
        let mut display_bindings = HashMap::new();
        let mut input_bindings = Vec::new();

        let mut register = |action: Action, key: KeyEvent, is_primary: bool| {
            if is_primary {
                display_bindings.insert(action, key);
            }
            input_bindings.push((key, action));
        };

        register(
            Action::Quit,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
            true,
        );
        register(
            Action::Logout,
            KeyEvent::new(KeyCode::Char('d'), KeyModifiers::CONTROL),
            true,
        );

        register(
            Action::NextTab,
            KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE),
            true,
        );
        register(
            Action::PrevTab,
            KeyEvent::new(KeyCode::BackTab, KeyModifiers::SHIFT),
            true,
        );

        register(
            Action::NavigateUp,
            KeyEvent::new(KeyCode::Up, KeyModifiers::NONE),
            true,
        );
        register(
            Action::NavigateUp,
            KeyEvent::new(KeyCode::Char('k'), KeyModifiers::NONE),
            false,
        );
        register(
            Action::NavigateDown,
            KeyEvent::new(KeyCode::Down, KeyModifiers::NONE),
            true,
        );
        register(
            Action::NavigateDown,
            KeyEvent::new(KeyCode::Char('j'), KeyModifiers::NONE),
            false,
        );

        register(
            Action::Select,
            KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE),
            true,
        );
        register(
            Action::Cancel,
            KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE),
            true,
        );
        register(
            Action::FocusSearch,
            KeyEvent::new(KeyCode::Char('/'), KeyModifiers::NONE),
            true,
        );

        register(
            Action::ScrollUp,
            KeyEvent::new(KeyCode::PageUp, KeyModifiers::NONE),
            true,
        );
        register(
            Action::ScrollDown,
            KeyEvent::new(KeyCode::PageDown, KeyModifiers::NONE),
            true,
        );

        register(
            Action::SendMessage,
            KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE),
            true,
        );
        register(
            Action::OpenActionPanel,
            KeyEvent::new(KeyCode::Char('p'), KeyModifiers::CONTROL),
            true,
        );
        register(
            Action::ClearInput,
            KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL),
            true,
        );

        Self {
            display_bindings,
            input_bindings,
        }
    }
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the registry with user overrides from the config file
    /// layered over the defaults. Unparseable key strings are skipped
    /// with a warning.
    pub fn with_overrides(overrides: &HashMap<String, Action>) -> Self {
        let mut registry = Self::default();
        for (key_str, action) in overrides {
            match parse_key(key_str) {
                Some(key) => {
                    registry.display_bindings.insert(*action, key);
                    registry.input_bindings.insert(0, (key, *action));
                }
                None => warn!(key = %key_str, "Ignoring unparseable keybinding"),
            }
        }
        registry
    }

    pub fn get(&self, action: Action) -> Option<KeyEvent> {
        self.display_bindings.get(&action).copied()
    }

    pub fn find_action(&self, key: KeyEvent) -> Option<Action> {
        self.input_bindings
            .iter()
            .find(|(k, _)| k.code == key.code && k.modifiers == key.modifiers)
            .map(|(_, a)| *a)
    }

    /// Formats a binding for footer hints, e.g. `Ctrl+D`.
    pub fn label(&self, action: Action) -> Option<String> {
        self.get(action).map(|key| format_key(&key))
    }
}

/// Parses a `Ctrl+q` / `Alt+Enter` / `F1` style key string.
fn parse_key(s: &str) -> Option<KeyEvent> {
    let mut modifiers = KeyModifiers::NONE;
    let mut code = None;

    for part in s.split('+') {
        match part.trim() {
            "Ctrl" | "ctrl" => modifiers |= KeyModifiers::CONTROL,
            "Alt" | "alt" => modifiers |= KeyModifiers::ALT,
            "Shift" | "shift" => modifiers |= KeyModifiers::SHIFT,
            part => code = Some(parse_key_code(part)?),
        }
    }

    code.map(|code| KeyEvent::new(code, modifiers))
}

fn parse_key_code(s: &str) -> Option<KeyCode> {
    match s {
        "Enter" | "enter" => Some(KeyCode::Enter),
        "Esc" | "esc" => Some(KeyCode::Esc),
        "Tab" | "tab" => Some(KeyCode::Tab),
        "Backspace" | "backspace" => Some(KeyCode::Backspace),
        "Up" | "up" => Some(KeyCode::Up),
        "Down" | "down" => Some(KeyCode::Down),
        "Left" | "left" => Some(KeyCode::Left),
        "Right" | "right" => Some(KeyCode::Right),
        "Home" | "home" => Some(KeyCode::Home),
        "End" | "end" => Some(KeyCode::End),
        "PageUp" | "pageup" => Some(KeyCode::PageUp),
        "PageDown" | "pagedown" => Some(KeyCode::PageDown),
        s if s.len() == 1 => s.chars().next().map(KeyCode::Char),
        s if s.starts_with('F') => s[1..].parse().ok().map(KeyCode::F),
        _ => None,
    }
}

fn format_key(key: &KeyEvent) -> String {
    let mut parts = Vec::new();
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        parts.push("Ctrl".to_string());
    }
    if key.modifiers.contains(KeyModifiers::ALT) {
        parts.push("Alt".to_string());
    }
    let code = match key.code {
        KeyCode::Char(c) => c.to_uppercase().to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::BackTab => "Shift+Tab".to_string(),
        KeyCode::PageUp => "PgUp".to_string(),
        KeyCode::PageDown => "PgDn".to_string(),
        KeyCode::F(n) => format!("F{n}"),
        other => format!("{other:?}"),
    };
    parts.push(code);
    parts.join("+")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bindings() {
        let registry = CommandRegistry::new();

        assert_eq!(
            registry.find_action(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Action::Quit)
        );
        assert_eq!(
            registry.find_action(KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE)),
            Some(Action::NextTab)
        );
    }

    #[test]
    fn test_parse_key_strings() {
        assert_eq!(
            parse_key("Ctrl+q"),
            Some(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL))
        );
        assert_eq!(
            parse_key("Alt+Enter"),
            Some(KeyEvent::new(KeyCode::Enter, KeyModifiers::ALT))
        );
        assert_eq!(
            parse_key("F1"),
            Some(KeyEvent::new(KeyCode::F(1), KeyModifiers::NONE))
        );
        assert_eq!(parse_key("Ctrl+"), None);
    }

    #[test]
    fn test_overrides_win() {
        let mut overrides = HashMap::new();
        overrides.insert("Ctrl+q".to_string(), Action::Quit);
        let registry = CommandRegistry::with_overrides(&overrides);

        assert_eq!(
            registry.find_action(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL)),
            Some(Action::Quit)
        );
        // Defaults survive alongside.
        assert_eq!(
            registry.find_action(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Action::Quit)
        );
    }

    #[test]
    fn test_labels() {
        let registry = CommandRegistry::new();
        assert_eq!(registry.label(Action::Logout).as_deref(), Some("Ctrl+D"));
    }
}

use crate::tui::action::Action;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Maps KeyEvents to Actions
#[derive(Debug, Clone)]
pub struct KeyBindings {
    bindings_list: Vec<KeyBinding>,
    bindings_map: HashMap<KeyPattern, Action>,
}

/// Single keybinding entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyBinding {
    pub key: String,
    pub action: Action,
}

/// Pattern for matching key events
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyPattern {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::from_list(vec![
            // Navigation - Arrow keys
            KeyBinding::new("Up", Action::MoveUp),
            KeyBinding::new("Down", Action::MoveDown),
            KeyBinding::new("Left", Action::MoveLeft),
            KeyBinding::new("Right", Action::MoveRight),
            // Navigation - Vim-style
            KeyBinding::new("k", Action::MoveUp),
            KeyBinding::new("j", Action::MoveDown),
            KeyBinding::new("h", Action::MoveLeft),
            KeyBinding::new("l", Action::MoveRight),
            // Page navigation
            KeyBinding::new("PageUp", Action::PageUp),
            KeyBinding::new("PageDown", Action::PageDown),
            KeyBinding::new("Ctrl+u", Action::PageUp),
            KeyBinding::new("Ctrl+d", Action::PageDown),
            // Home/End
            KeyBinding::new("Home", Action::Home),
            KeyBinding::new("End", Action::End),
            // Top/Bottom
            KeyBinding::new("g", Action::GoToTop),
            KeyBinding::new("G", Action::GoToBottom),
            // Grid
            KeyBinding::new("s", Action::Sort),
            KeyBinding::new("f", Action::Filter),
            KeyBinding::new("x", Action::ClearFilters),
            KeyBinding::new("c", Action::CopyCell),
            KeyBinding::new(">", Action::WidenColumn),
            KeyBinding::new("<", Action::NarrowColumn),
            // Dataset
            KeyBinding::new("F5", Action::FetchData),
            KeyBinding::new("r", Action::FetchData),
            KeyBinding::new("F2", Action::ShowIssues),
            KeyBinding::new("1", Action::ShowIssues),
            KeyBinding::new("F3", Action::ShowEvents),
            KeyBinding::new("2", Action::ShowEvents),
            // Focus
            KeyBinding::new("Tab", Action::NextFocus),
            KeyBinding::new("Shift+Tab", Action::PrevFocus),
            // Application
            KeyBinding::new("q", Action::Quit),
            KeyBinding::new("Ctrl+c", Action::Quit),
            KeyBinding::new("Esc", Action::Cancel),
            KeyBinding::new("Enter", Action::Confirm),
        ])
    }
}

impl KeyBindings {
    fn from_list(bindings_list: Vec<KeyBinding>) -> Self {
        let bindings_map = Self::build_map(&bindings_list);
        Self {
            bindings_list,
            bindings_map,
        }
    }

    /// Defaults with user entries layered on top
    ///
    /// An override replaces every default bound to the same key.
    pub fn with_overrides(overrides: &[KeyBinding]) -> Self {
        let mut list = Self::default().bindings_list;
        for binding in overrides {
            let pattern = KeyPattern::from_string(&binding.key).ok();
            list.retain(|existing| {
                existing.key != binding.key
                    && (pattern.is_none() || KeyPattern::from_string(&existing.key).ok() != pattern)
            });
            list.push(binding.clone());
        }
        Self::from_list(list)
    }

    /// Build hashmap from bindings list
    fn build_map(bindings: &[KeyBinding]) -> HashMap<KeyPattern, Action> {
        bindings
            .iter()
            .filter_map(|b| {
                KeyPattern::from_string(&b.key)
                    .ok()
                    .map(|pattern| (pattern, b.action))
            })
            .collect()
    }

    /// Get action for key event
    pub fn get_action(&self, key: &KeyEvent) -> Option<Action> {
        let pattern = KeyPattern::from_event(key);
        self.bindings_map.get(&pattern).copied()
    }

    pub fn bindings(&self) -> &[KeyBinding] {
        &self.bindings_list
    }

    /// Get all bindings for an action (for help display)
    pub fn get_keys_for_action(&self, action: Action) -> Vec<String> {
        self.bindings_list
            .iter()
            .filter(|b| b.action == action)
            .map(|b| b.key.clone())
            .collect()
    }

    /// Check for actions that don't have any keybindings
    /// Returns Vec of (Action, description) for unbound actions
    pub fn get_unbound_actions(&self) -> Vec<(Action, &'static str)> {
        let bound_actions: HashSet<Action> = self.bindings_list.iter().map(|b| b.action).collect();

        Action::all()
            .into_iter()
            .filter(|action| !bound_actions.contains(action))
            .map(|action| (action, action.description()))
            .collect()
    }

    /// Validate bindings and return warnings
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        let mut seen: HashMap<KeyPattern, (&str, Action)> = HashMap::new();
        for binding in &self.bindings_list {
            match KeyPattern::from_string(&binding.key) {
                Ok(pattern) => {
                    if let Some((key, existing)) = seen.get(&pattern) {
                        warnings.push(format!(
                            "Duplicate key '{}': bound to both {:?} and {:?} (via '{}')",
                            binding.key, existing, binding.action, key
                        ));
                    } else {
                        seen.insert(pattern, (&binding.key, binding.action));
                    }
                }
                Err(e) => warnings.push(format!(
                    "Invalid key pattern '{}' for action {:?}: {}",
                    binding.key, binding.action, e
                )),
            }
        }

        let unbound = self.get_unbound_actions();
        if !unbound.is_empty() {
            warnings.push(format!(
                "{} action(s) have no keybindings: {}",
                unbound.len(),
                unbound
                    .iter()
                    .map(|(action, _)| format!("{:?}", action))
                    .collect::<Vec<_>>()
                    .join(", ")
            ));
        }

        warnings
    }
}

impl KeyBinding {
    pub fn new(key: &str, action: Action) -> Self {
        Self {
            key: key.to_string(),
            action,
        }
    }
}

impl KeyPattern {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// Normalize a terminal event
    ///
    /// Characters already carry their shifted form, so SHIFT is dropped for
    /// them. Terminals report Shift+Tab as BackTab, with or without SHIFT.
    pub fn from_event(event: &KeyEvent) -> Self {
        let mut modifiers = event.modifiers;
        if matches!(event.code, KeyCode::Char(_) | KeyCode::BackTab) {
            modifiers.remove(KeyModifiers::SHIFT);
        }
        Self {
            code: event.code,
            modifiers,
        }
    }

    /// Parse from string (e.g., "Ctrl+c", "G", "Shift+Tab", "F5")
    pub fn from_string(s: &str) -> Result<Self, String> {
        // A lone "+" is the plus key, not a separator
        let parts: Vec<&str> = if s == "+" {
            vec![s]
        } else {
            s.split('+').collect()
        };
        let Some((key_part, modifier_parts)) = parts.split_last() else {
            return Err("Empty key".to_string());
        };

        let mut modifiers = KeyModifiers::empty();
        for part in modifier_parts {
            match part.to_lowercase().as_str() {
                "ctrl" => modifiers |= KeyModifiers::CONTROL,
                "alt" => modifiers |= KeyModifiers::ALT,
                "shift" => modifiers |= KeyModifiers::SHIFT,
                _ => return Err(format!("Unknown modifier: {}", part)),
            }
        }

        let code = match key_part.to_lowercase().as_str() {
            "up" | "↑" => KeyCode::Up,
            "down" | "↓" => KeyCode::Down,
            "left" | "←" => KeyCode::Left,
            "right" | "→" => KeyCode::Right,
            "pageup" | "pgup" => KeyCode::PageUp,
            "pagedown" | "pgdown" | "pgdn" => KeyCode::PageDown,
            "home" => KeyCode::Home,
            "end" => KeyCode::End,
            "tab" if modifiers.contains(KeyModifiers::SHIFT) => {
                modifiers.remove(KeyModifiers::SHIFT);
                KeyCode::BackTab
            }
            "tab" => KeyCode::Tab,
            "backtab" => KeyCode::BackTab,
            "enter" | "return" => KeyCode::Enter,
            "esc" | "escape" => KeyCode::Esc,
            "backspace" => KeyCode::Backspace,
            "delete" | "del" => KeyCode::Delete,
            "insert" | "ins" => KeyCode::Insert,
            "space" => KeyCode::Char(' '),

            // Single characters keep their case; "Shift+a" means 'A'
            _ if key_part.chars().count() == 1 => {
                let mut ch = key_part.chars().next().unwrap_or_default();
                if modifiers.contains(KeyModifiers::SHIFT) {
                    ch = ch.to_ascii_uppercase();
                    modifiers.remove(KeyModifiers::SHIFT);
                }
                KeyCode::Char(ch)
            }

            // Function keys: F1-F12
            s if s.starts_with('f') && (2..=3).contains(&s.len()) => match s[1..].parse::<u8>() {
                Ok(n) if (1..=12).contains(&n) => KeyCode::F(n),
                _ => return Err(format!("Invalid function key: {}", key_part)),
            },

            _ => return Err(format!("Unknown key: {}", key_part)),
        };

        Ok(Self { code, modifiers })
    }
}

impl fmt::Display for KeyPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.modifiers.contains(KeyModifiers::CONTROL) {
            write!(f, "Ctrl+")?;
        }
        if self.modifiers.contains(KeyModifiers::ALT) {
            write!(f, "Alt+")?;
        }
        if self.modifiers.contains(KeyModifiers::SHIFT) {
            write!(f, "Shift+")?;
        }

        match self.code {
            KeyCode::Char(' ') => write!(f, "Space"),
            KeyCode::Char(c) => write!(f, "{c}"),
            KeyCode::Up => write!(f, "↑"),
            KeyCode::Down => write!(f, "↓"),
            KeyCode::Left => write!(f, "←"),
            KeyCode::Right => write!(f, "→"),
            KeyCode::PageUp => write!(f, "PgUp"),
            KeyCode::PageDown => write!(f, "PgDn"),
            KeyCode::Home => write!(f, "Home"),
            KeyCode::End => write!(f, "End"),
            KeyCode::Tab => write!(f, "Tab"),
            KeyCode::BackTab => write!(f, "Shift+Tab"),
            KeyCode::Enter => write!(f, "Enter"),
            KeyCode::Esc => write!(f, "Esc"),
            KeyCode::Backspace => write!(f, "Backspace"),
            KeyCode::Delete => write!(f, "Del"),
            KeyCode::F(n) => write!(f, "F{n}"),
            other => write!(f, "{other:?}"),
        }
    }
}

//! Type-safe key bindings for widget keymaps.
//!
//! A [`Binding`] pairs one or more key presses with the help text shown for
//! them; widget keymaps are plain structs of bindings implementing
//! [`KeyMap`] so owners can assemble help displays without knowing any
//! widget internals.
//!
//! Bindings are built either from bare [`KeyCode`]s:
//!
//! ```rust
//! use scrollbox_widgets::key::Binding;
//! use crossterm::event::KeyCode;
//!
//! let up = Binding::new(vec![KeyCode::Up, KeyCode::Char('k')]).with_help("↑/k", "up");
//! ```
//!
//! or from parsed key strings when modifiers are involved:
//!
//! ```rust
//! use scrollbox_widgets::key::{new_binding, with_keys_str, with_help};
//!
//! let top = new_binding(vec![
//!     with_keys_str(&["home", "ctrl+a"]),
//!     with_help("home", "go to top"),
//! ]);
//! ```

use bubbletea_rs::KeyMsg;
use crossterm::event::{KeyCode, KeyModifiers};

/// A single concrete key press: a key code plus its modifier set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    /// The key code.
    pub code: KeyCode,
    /// Modifier keys that must be held.
    pub modifiers: KeyModifiers,
}

impl KeyPress {
    /// A key press with no modifiers.
    pub const fn plain(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::NONE,
        }
    }
}

/// Help text for a binding: the key label and what it does.
#[derive(Debug, Clone, Default)]
pub struct Help {
    /// Short key label, e.g. `"pgdn"`.
    pub key: String,
    /// Action description, e.g. `"next page"`.
    pub desc: String,
}

/// A set of key presses that trigger one action, with help text.
#[derive(Debug, Clone, Default)]
pub struct Binding {
    keys: Vec<KeyPress>,
    help: Help,
}

impl Binding {
    /// Creates a binding from unmodified key codes.
    pub fn new(keys: Vec<KeyCode>) -> Self {
        Self {
            keys: keys.into_iter().map(KeyPress::plain).collect(),
            help: Help::default(),
        }
    }

    /// Attaches help text (builder style).
    pub fn with_help(mut self, key: impl Into<String>, desc: impl Into<String>) -> Self {
        self.help = Help {
            key: key.into(),
            desc: desc.into(),
        };
        self
    }

    /// Returns true if the given key message matches any press in this
    /// binding. Both the key code and the modifier set must match.
    pub fn matches(&self, msg: &KeyMsg) -> bool {
        self.keys
            .iter()
            .any(|p| p.code == msg.key && p.modifiers == msg.modifiers)
    }

    /// The key presses in this binding.
    pub fn keys(&self) -> &[KeyPress] {
        &self.keys
    }

    /// The binding's help text.
    pub fn help(&self) -> &Help {
        &self.help
    }
}

/// One configuration step for [`new_binding`].
#[derive(Debug, Clone)]
pub enum BindingOpt {
    /// Adds key presses to the binding.
    Keys(Vec<KeyPress>),
    /// Sets the binding's help text.
    Help(String, String),
}

/// Builds a [`Binding`] from a list of options, Go-bubbles style.
pub fn new_binding(opts: Vec<BindingOpt>) -> Binding {
    let mut binding = Binding::default();
    for opt in opts {
        match opt {
            BindingOpt::Keys(mut keys) => binding.keys.append(&mut keys),
            BindingOpt::Help(key, desc) => binding.help = Help { key, desc },
        }
    }
    binding
}

/// Option: bind the given key presses.
pub fn with_keys(keys: Vec<KeyPress>) -> BindingOpt {
    BindingOpt::Keys(keys)
}

/// Option: bind keys parsed from strings such as `"up"`, `"pgdn"`,
/// `"ctrl+a"`, or single characters. Unrecognized strings are skipped.
pub fn with_keys_str(keys: &[&str]) -> BindingOpt {
    BindingOpt::Keys(keys.iter().filter_map(|s| parse_key(s)).collect())
}

/// Option: set the binding's help text.
pub fn with_help(key: &str, desc: &str) -> BindingOpt {
    BindingOpt::Help(key.to_string(), desc.to_string())
}

fn parse_key(s: &str) -> Option<KeyPress> {
    let mut modifiers = KeyModifiers::NONE;
    let mut name = s;
    while let Some((prefix, rest)) = name.split_once('+') {
        match prefix {
            "ctrl" => modifiers |= KeyModifiers::CONTROL,
            "alt" => modifiers |= KeyModifiers::ALT,
            "shift" => modifiers |= KeyModifiers::SHIFT,
            _ => return None,
        }
        name = rest;
    }
    let code = match name {
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "pgup" => KeyCode::PageUp,
        "pgdn" | "pgdown" => KeyCode::PageDown,
        "enter" => KeyCode::Enter,
        "esc" => KeyCode::Esc,
        "tab" => KeyCode::Tab,
        "space" => KeyCode::Char(' '),
        "backspace" => KeyCode::Backspace,
        _ => {
            let mut chars = name.chars();
            let c = chars.next()?;
            if chars.next().is_some() {
                return None;
            }
            KeyCode::Char(c)
        }
    };
    Some(KeyPress { code, modifiers })
}

/// Implemented by widget keymaps so help views can enumerate bindings.
pub trait KeyMap {
    /// The essential bindings, for compact help displays.
    fn short_help(&self) -> Vec<&Binding>;
    /// All bindings, grouped into columns.
    fn full_help(&self) -> Vec<Vec<&Binding>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn msg(code: KeyCode, modifiers: KeyModifiers) -> KeyMsg {
        KeyMsg {
            key: code,
            modifiers,
        }
    }

    #[test]
    fn plain_binding_matches_code_without_modifiers() {
        let b = Binding::new(vec![KeyCode::Home, KeyCode::Char('g')]);
        assert!(b.matches(&msg(KeyCode::Home, KeyModifiers::NONE)));
        assert!(b.matches(&msg(KeyCode::Char('g'), KeyModifiers::NONE)));
        assert!(!b.matches(&msg(KeyCode::End, KeyModifiers::NONE)));
        assert!(!b.matches(&msg(KeyCode::Home, KeyModifiers::CONTROL)));
    }

    #[test]
    fn parsed_binding_carries_modifiers() {
        let b = new_binding(vec![with_keys_str(&["ctrl+u", "pgup"])]);
        assert!(b.matches(&msg(KeyCode::Char('u'), KeyModifiers::CONTROL)));
        assert!(b.matches(&msg(KeyCode::PageUp, KeyModifiers::NONE)));
        assert!(!b.matches(&msg(KeyCode::Char('u'), KeyModifiers::NONE)));
    }

    #[test]
    fn unknown_key_strings_are_skipped() {
        let b = new_binding(vec![with_keys_str(&["nosuchkey", "end"])]);
        assert_eq!(b.keys().len(), 1);
        assert!(b.matches(&msg(KeyCode::End, KeyModifiers::NONE)));
    }

    #[test]
    fn help_text_is_attached() {
        let b = Binding::new(vec![KeyCode::PageDown]).with_help("pgdn", "next page");
        assert_eq!(b.help().key, "pgdn");
        assert_eq!(b.help().desc, "next page");
    }
}

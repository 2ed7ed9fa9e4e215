//! Owner-facing types for the list widget: the delegate trait and the
//! interaction state.

use bubbletea_rs::{Cmd, KeyMsg};

/// How far the user has taken the current interaction.
///
/// Purely observational: the widget updates it as clicks arrive so the
/// owner can tell "browsed" apart from "activated" on the same callback
/// path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListState {
    /// No interaction yet.
    #[default]
    Normal,
    /// A row was selected with a single click.
    Select,
    /// A row was activated with a double click.
    UseNow,
}

/// Callbacks from the list widget to its owner.
///
/// All methods default to doing nothing, so owners implement only what
/// they care about. Returned commands are handed back through the call
/// that triggered them.
///
/// ```rust
/// use scrollbox_widgets::list::ListDelegate;
/// use bubbletea_rs::Cmd;
///
/// struct MenuOwner;
///
/// impl ListDelegate for MenuOwner {
///     fn on_activate(&mut self, index: usize, _text: &str) -> Option<Cmd> {
///         println!("menu entry {} chosen", index);
///         None
///     }
/// }
/// ```
pub trait ListDelegate {
    /// A row was selected with a single click.
    fn on_select(&mut self, index: usize, text: &str) -> Option<Cmd> {
        let _ = (index, text);
        None
    }

    /// A row was activated with a double click.
    fn on_activate(&mut self, index: usize, text: &str) -> Option<Cmd> {
        let _ = (index, text);
        None
    }

    /// A key the widget's keymap does not recognize.
    fn on_key_unhandled(&mut self, key: &KeyMsg) -> Option<Cmd> {
        let _ = key;
        None
    }
}

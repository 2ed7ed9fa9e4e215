//! Key bindings for list navigation.

use crate::key;
use crossterm::event::KeyCode;

/// Key bindings for list scrolling.
#[derive(Debug, Clone)]
pub struct ListKeyMap {
    /// Scroll up one row.
    pub line_up: key::Binding,
    /// Scroll down one row.
    pub line_down: key::Binding,
    /// Scroll up one page.
    pub prev_page: key::Binding,
    /// Scroll down one page.
    pub next_page: key::Binding,
    /// Jump to the first row.
    pub go_to_start: key::Binding,
    /// Jump past the last row (lands on the last page).
    pub go_to_end: key::Binding,
}

impl Default for ListKeyMap {
    fn default() -> Self {
        Self {
            line_up: key::Binding::new(vec![KeyCode::Up]).with_help("↑", "up"),
            line_down: key::Binding::new(vec![KeyCode::Down]).with_help("↓", "down"),
            prev_page: key::Binding::new(vec![KeyCode::PageUp]).with_help("pgup", "prev page"),
            next_page: key::Binding::new(vec![KeyCode::PageDown]).with_help("pgdn", "next page"),
            go_to_start: key::Binding::new(vec![KeyCode::Home]).with_help("home", "go to start"),
            go_to_end: key::Binding::new(vec![KeyCode::End]).with_help("end", "go to end"),
        }
    }
}

impl key::KeyMap for ListKeyMap {
    fn short_help(&self) -> Vec<&key::Binding> {
        vec![
            &self.line_up,
            &self.line_down,
            &self.prev_page,
            &self.next_page,
        ]
    }

    fn full_help(&self) -> Vec<Vec<&key::Binding>> {
        vec![
            vec![&self.line_up, &self.line_down],
            vec![&self.prev_page, &self.next_page],
            vec![&self.go_to_start, &self.go_to_end],
        ]
    }
}

//! Owned row storage for the list widget.
//!
//! A [`RowBuffer`] holds the widget's rows in insertion order: each row is
//! an owned string plus an optional color override. Inputs are copied on
//! the way in, never aliased; the widget is the sole owner of everything
//! it displays.
//!
//! Index handling follows the crate's contract-error policy: read
//! accessors are `Option`-returning at the public boundary, while
//! mutators assert their index arguments (an out-of-range mutation is a
//! caller bug, not a recoverable condition).

use crate::surface::Color;

/// One list row: its text and an optional color override.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    text: String,
    color: Option<Color>,
}

impl Row {
    fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            color: None,
        }
    }

    /// The row's text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The row's color override, if one was set.
    pub fn color(&self) -> Option<Color> {
        self.color
    }
}

/// An ordered collection of owned rows with 0-based contiguous indices.
///
/// Insertions and deletions shift subsequent indices, exactly like a
/// `Vec`.
#[derive(Debug, Clone, Default)]
pub struct RowBuffer {
    rows: Vec<Row>,
}

impl RowBuffer {
    /// Creates an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True if there are no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The row at `index`, if it exists.
    pub fn get(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    /// The text of the row at `index`, if it exists.
    pub fn text(&self, index: usize) -> Option<&str> {
        self.rows.get(index).map(|r| r.text())
    }

    /// Appends a copy of `text` as the last row.
    pub fn push_back(&mut self, text: &str) {
        self.rows.push(Row::new(text));
    }

    /// Prepends a copy of `text` as the first row.
    pub fn push_front(&mut self, text: &str) {
        self.rows.insert(0, Row::new(text));
    }

    /// Inserts a copy of `text` before the row at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn insert_before(&mut self, index: usize, text: &str) {
        assert!(index < self.rows.len(), "row index {} out of range", index);
        self.rows.insert(index, Row::new(text));
    }

    /// Inserts a copy of `text` after the row at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn insert_after(&mut self, index: usize, text: &str) {
        assert!(index < self.rows.len(), "row index {} out of range", index);
        self.rows.insert(index + 1, Row::new(text));
    }

    /// Removes and returns the row at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn delete_at(&mut self, index: usize) -> Row {
        assert!(index < self.rows.len(), "row index {} out of range", index);
        self.rows.remove(index)
    }

    /// Removes every row.
    pub fn delete_all(&mut self) {
        self.rows.clear();
    }

    /// Replaces the text of the row at `index` in place.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn set_text(&mut self, index: usize, text: &str) {
        assert!(index < self.rows.len(), "row index {} out of range", index);
        self.rows[index].text = text.to_string();
    }

    /// Sets or clears the color override of the row at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn set_line_color(&mut self, index: usize, color: Option<Color>) {
        assert!(index < self.rows.len(), "row index {} out of range", index);
        self.rows[index].color = color;
    }

    /// Iterates over the rows in order.
    pub fn iter(&self) -> impl Iterator<Item = &Row> {
        self.rows.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_keep_insertion_order() {
        let mut rows = RowBuffer::new();
        rows.push_back("b");
        rows.push_front("a");
        rows.push_back("d");
        rows.insert_before(2, "c");
        let texts: Vec<_> = rows.iter().map(|r| r.text().to_string()).collect();
        assert_eq!(texts, ["a", "b", "c", "d"]);
    }

    #[test]
    fn insert_after_lands_past_its_anchor() {
        let mut rows = RowBuffer::new();
        rows.push_back("a");
        rows.push_back("c");
        rows.insert_after(0, "b");
        assert_eq!(rows.text(1), Some("b"));
        assert_eq!(rows.len(), 3);
    }

    #[test]
    fn count_tracks_net_inserts_minus_deletes() {
        let mut rows = RowBuffer::new();
        for i in 0..6 {
            rows.push_back(&format!("row {}", i));
        }
        rows.delete_at(0);
        rows.delete_at(2);
        assert_eq!(rows.len(), 4);
        // Survivors, in order.
        assert_eq!(rows.text(0), Some("row 1"));
        assert_eq!(rows.text(1), Some("row 2"));
        assert_eq!(rows.text(2), Some("row 4"));
        assert_eq!(rows.text(3), Some("row 5"));
    }

    #[test]
    fn delete_all_releases_everything() {
        let mut rows = RowBuffer::new();
        rows.push_back("x");
        rows.push_back("y");
        rows.delete_all();
        assert!(rows.is_empty());
        assert_eq!(rows.text(0), None);
    }

    #[test]
    fn set_text_replaces_in_place() {
        let mut rows = RowBuffer::new();
        rows.push_back("old");
        rows.set_text(0, "new");
        assert_eq!(rows.text(0), Some("new"));
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn line_color_is_per_row() {
        let mut rows = RowBuffer::new();
        rows.push_back("plain");
        rows.push_back("tagged");
        rows.set_line_color(1, Some(Color::rgb(255, 0, 0)));
        assert_eq!(rows.get(0).unwrap().color(), None);
        assert_eq!(rows.get(1).unwrap().color(), Some(Color::rgb(255, 0, 0)));
        rows.set_line_color(1, None);
        assert_eq!(rows.get(1).unwrap().color(), None);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn deleting_past_the_end_is_a_contract_violation() {
        let mut rows = RowBuffer::new();
        rows.push_back("only");
        rows.delete_at(1);
    }
}

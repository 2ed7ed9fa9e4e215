//! Line-number to byte-offset translation for text buffers.
//!
//! The text widget keeps its content as one owned string and derives line
//! positions on demand. Translation is a forward-only scan from the start
//! of the buffer counting separators, O(line) per call. That is fine
//! here: page sizes are small and scrolling is user-paced.
//!
//! A line count is the number of `'\n'` separators in the buffer, and
//! line `i` starts immediately after the `i`-th separator. Asking for the
//! start of line `line_count` (one past the last separator) is answered
//! with the start of the final line rather than an offset past the end of
//! the buffer, the same "one past the end means the end" convention the
//! scroll arithmetic uses.
//!
//! ```rust
//! use scrollbox_widgets::paginator::{line_count, line_start};
//!
//! let text = "L0\nL1\nL2\nL3\n";
//! assert_eq!(line_count(text), 4);
//! assert_eq!(line_start(text, 0), 0);
//! assert_eq!(line_start(text, 2), 6);
//! assert_eq!(line_start(text, 4), 9); // start of "L3", not past the end
//! ```

/// Number of line separators in the buffer.
pub fn line_count(text: &str) -> usize {
    text.bytes().filter(|&b| b == b'\n').count()
}

/// Byte offset where the given line starts.
///
/// `line` may be at most `line_count(text)`; the value `line_count(text)`
/// itself yields the start of the final line (see the module docs).
///
/// # Panics
///
/// In debug builds, panics if `line` exceeds `line_count(text)`.
pub fn line_start(text: &str, line: usize) -> usize {
    debug_assert!(
        line <= line_count(text),
        "line {} out of range for a {}-line buffer",
        line,
        line_count(text)
    );
    let bytes = text.as_bytes();
    let mut start = 0;
    let mut seen = 0;
    let mut i = 0;
    while seen < line && i < bytes.len() {
        if bytes[i] == b'\n' {
            seen += 1;
            if i + 1 >= bytes.len() {
                // The separator ends the buffer; the requested line has no
                // content, so stay on the final line.
                break;
            }
            start = i + 1;
        }
        i += 1;
    }
    start
}

/// The slice of the buffer making up the given line, without its
/// separator.
pub fn line_at(text: &str, line: usize) -> &str {
    let start = line_start(text, line);
    let rest = &text[start..];
    match rest.find('\n') {
        Some(end) => &rest[..end],
        None => rest,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_separators() {
        assert_eq!(line_count(""), 0);
        assert_eq!(line_count("no separator"), 0);
        assert_eq!(line_count("a\nb"), 1);
        assert_eq!(line_count("a\nb\nc\n"), 3);
    }

    #[test]
    fn first_line_starts_at_zero() {
        assert_eq!(line_start("anything\nat all", 0), 0);
        assert_eq!(line_start("x", 0), 0);
    }

    #[test]
    fn lines_start_after_their_separator() {
        let text = "L0\nL1\nL2\nL3\n";
        assert_eq!(line_start(text, 1), 3);
        assert_eq!(line_start(text, 2), 6);
        assert_eq!(line_start(text, 3), 9);
    }

    #[test]
    fn one_past_the_last_separator_is_the_final_line() {
        // Trailing separator: the naive answer would be past the end.
        assert_eq!(line_start("L0\nL1\nL2\nL3\n", 4), 9);
        // No trailing separator: the naive answer is already the final line.
        assert_eq!(line_start("L0\nL1", 1), 3);
        // Degenerate single-separator buffer.
        assert_eq!(line_start("X\n", 1), 0);
    }

    #[test]
    fn line_at_strips_the_separator() {
        let text = "alpha\nbeta\ngamma";
        assert_eq!(line_at(text, 0), "alpha");
        assert_eq!(line_at(text, 1), "beta");
        assert_eq!(line_at(text, 2), "gamma");
    }
}

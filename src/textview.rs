//! A read-only text viewport: one owned buffer, paged by line.
//!
//! The text-oriented scroll box displays a large text buffer a page of
//! lines at a time. The buffer is owned whole; line positions are derived
//! on demand by [`crate::paginator`] and cached only as the current
//! line / byte offset pair. Scrolling goes through the same
//! [`crate::scroll::ScrollModel`] as the list widget, with one
//! difference: a direct [`Model::scroll_to`] keeps the bare "one past the
//! end lands on the last line" rule and does not snap to page
//! boundaries, so the final page may start on the very last line.
//!
//! # Examples
//!
//! ```rust
//! use scrollbox_widgets::geometry::Rect;
//! use scrollbox_widgets::textview;
//!
//! let mut view = textview::Model::new(Rect::new(0, 0, 200, 100), "L0\nL1\nL2\nL3\n")
//!     .with_page_length(2);
//!
//! assert_eq!(view.line_count(), 4);
//!
//! // Scrolling one past the last line lands on the last line.
//! view.scroll_to(4);
//! assert_eq!(view.current_line(), 3);
//! assert_eq!(view.current_offset(), 9);
//! ```

use crate::geometry::{Point, Rect};
use crate::key;
use crate::layout::{Font, Justify, TextFormat, TextLayout, TextStyle, TextWeight};
use crate::paginator;
use crate::scroll::{ScrollModel, ScrollOutcome};
use crate::surface::{Color, GfxDevice, SurfaceCache};
use bubbletea_rs::{Cmd, KeyMsg, Msg};

/// Lines per page before [`Model::set_page_length`] is called.
pub const DEFAULT_PAGE_LENGTH: usize = 10;

/// Key bindings for text scrolling.
#[derive(Debug, Clone)]
pub struct TextKeyMap {
    /// Scroll up one line.
    pub line_up: key::Binding,
    /// Scroll down one line.
    pub line_down: key::Binding,
    /// Scroll up one page.
    pub prev_page: key::Binding,
    /// Scroll down one page.
    pub next_page: key::Binding,
    /// Jump to the first line.
    pub go_to_start: key::Binding,
    /// Jump past the last line (lands on the last line).
    pub go_to_end: key::Binding,
}

impl Default for TextKeyMap {
    fn default() -> Self {
        Self {
            line_up: key::new_binding(vec![key::with_keys_str(&["up"]), key::with_help("↑", "up")]),
            line_down: key::new_binding(vec![
                key::with_keys_str(&["down"]),
                key::with_help("↓", "down"),
            ]),
            prev_page: key::new_binding(vec![
                key::with_keys_str(&["pgup"]),
                key::with_help("pgup", "prev page"),
            ]),
            next_page: key::new_binding(vec![
                key::with_keys_str(&["pgdn"]),
                key::with_help("pgdn", "next page"),
            ]),
            go_to_start: key::new_binding(vec![
                key::with_keys_str(&["home"]),
                key::with_help("home", "go to start"),
            ]),
            go_to_end: key::new_binding(vec![
                key::with_keys_str(&["end"]),
                key::with_help("end", "go to end"),
            ]),
        }
    }
}

impl key::KeyMap for TextKeyMap {
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

/// The text viewport.
pub struct Model {
    bounds: Rect,
    text: String,
    line_count: usize,
    scroll: ScrollModel,
    current_offset: usize,
    style: TextStyle,
    /// Key bindings for scrolling. Replace or edit to rebind.
    pub keymap: TextKeyMap,
    surfaces: SurfaceCache,
    pending: bool,
    visible: bool,
    erred: bool,
}

impl Model {
    /// Creates a hidden text viewport over a copy of `text`.
    ///
    /// # Panics
    ///
    /// Panics if `text` is empty.
    pub fn new(bounds: Rect, text: &str) -> Self {
        assert!(!text.is_empty(), "text buffer must not be empty");
        Self {
            bounds,
            text: text.to_string(),
            line_count: paginator::line_count(text),
            scroll: ScrollModel::new(DEFAULT_PAGE_LENGTH),
            current_offset: 0,
            style: TextStyle::default().with_font(Font::Mono),
            keymap: TextKeyMap::default(),
            surfaces: SurfaceCache::new(),
            pending: false,
            visible: false,
            erred: false,
        }
    }

    /// Sets the lines-per-page (builder style).
    ///
    /// # Panics
    ///
    /// Panics if `page_length` is zero.
    pub fn with_page_length(mut self, page_length: usize) -> Self {
        self.set_page_length(page_length);
        self
    }

    /// Sets the text style (builder style).
    pub fn with_style(mut self, style: TextStyle) -> Self {
        self.style = style;
        self
    }

    // --- content ----------------------------------------------------------

    /// The whole buffer.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replaces the buffer with a copy of `text`; the line count is
    /// recomputed and the view returns to the first line.
    ///
    /// # Panics
    ///
    /// Panics if `text` is empty.
    pub fn set_text(&mut self, text: &str) {
        assert!(!text.is_empty(), "text buffer must not be empty");
        self.text = text.to_string();
        self.line_count = paginator::line_count(&self.text);
        self.scroll.reset();
        self.current_offset = 0;
        self.mark_dirty();
    }

    /// Number of lines (separator characters) in the buffer.
    pub fn line_count(&self) -> usize {
        self.line_count
    }

    /// The line currently shown at the top of the viewport.
    pub fn current_line(&self) -> usize {
        self.scroll.first_visible()
    }

    /// Byte offset of the current line's start.
    pub fn current_offset(&self) -> usize {
        self.current_offset
    }

    // --- configuration ----------------------------------------------------

    /// Lines per page.
    pub fn page_length(&self) -> usize {
        self.scroll.page_size()
    }

    /// Sets the lines-per-page.
    ///
    /// # Panics
    ///
    /// Panics if `page_length` is zero.
    pub fn set_page_length(&mut self, page_length: usize) {
        assert!(page_length > 0, "page length must be positive");
        self.scroll.set_page_size(page_length);
        self.mark_dirty();
    }

    /// The viewport bounds.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Moves or resizes the viewport; the cached backdrop goes stale and
    /// is recaptured on the next paint.
    pub fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
        self.surfaces.kill_background();
        self.mark_dirty();
    }

    /// Sets the text color.
    pub fn set_color(&mut self, color: Color) {
        self.style.color = color;
        self.mark_dirty();
    }

    /// Sets the typeface.
    pub fn set_font(&mut self, font: Font) {
        self.style.font = font;
        self.mark_dirty();
    }

    /// Sets the point size.
    pub fn set_point_size(&mut self, point_size: i32) {
        self.style.point_size = point_size;
        self.mark_dirty();
    }

    /// Sets the glyph weight.
    pub fn set_weight(&mut self, weight: TextWeight) {
        self.style.weight = weight;
        self.mark_dirty();
    }

    /// Supplies the backdrop from the owner's own background copy instead
    /// of letting the first paint capture the live screen. The bitmap
    /// must match the viewport's bounds.
    pub fn set_backdrop(&mut self, backdrop: Box<dyn crate::surface::Surface>) {
        self.surfaces.set_backdrop(backdrop);
        self.mark_dirty();
    }

    // --- visibility -------------------------------------------------------

    /// Shows the viewport and queues a repaint.
    pub fn show(&mut self) {
        self.visible = true;
        self.mark_dirty();
    }

    /// Hides the viewport; paint requests while hidden are dropped.
    pub fn hide(&mut self) {
        self.visible = false;
        self.pending = false;
    }

    /// True while the viewport is shown.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    // --- scrolling --------------------------------------------------------

    /// Scrolls so `line` becomes the current (top) line. A target one
    /// past the last line lands on the last line; when the whole buffer
    /// fits on one page this is a no-op.
    pub fn scroll_to(&mut self, line: usize) {
        if self.scroll.scroll_to(line, self.line_count) == ScrollOutcome::Moved {
            self.sync_offset();
            self.mark_dirty();
        }
    }

    /// Scrolls up one line.
    pub fn line_up(&mut self) {
        self.apply_scroll(|s, n| s.line_up(n));
    }

    /// Scrolls down one line.
    pub fn line_down(&mut self) {
        self.apply_scroll(|s, n| s.line_down(n));
    }

    /// Scrolls up one page.
    pub fn page_up(&mut self) {
        self.apply_scroll(|s, n| s.page_up(n));
    }

    /// Scrolls down one page.
    pub fn page_down(&mut self) {
        self.apply_scroll(|s, n| s.page_down(n));
    }

    fn apply_scroll(&mut self, op: impl FnOnce(&mut ScrollModel, usize) -> ScrollOutcome) {
        if op(&mut self.scroll, self.line_count) == ScrollOutcome::Moved {
            self.sync_offset();
            self.mark_dirty();
        }
    }

    fn sync_offset(&mut self) {
        self.current_offset = paginator::line_start(&self.text, self.scroll.first_visible());
    }

    // --- input ------------------------------------------------------------

    /// Handles a message: keys in the keymap scroll the view; everything
    /// else is ignored.
    pub fn update(&mut self, msg: Msg) -> Option<Cmd> {
        let key = msg.downcast_ref::<KeyMsg>()?;
        if self.keymap.go_to_start.matches(key) {
            self.scroll_to(0);
        } else if self.keymap.go_to_end.matches(key) {
            self.scroll_to(self.line_count);
        } else if self.keymap.line_up.matches(key) {
            self.line_up();
        } else if self.keymap.line_down.matches(key) {
            self.line_down();
        } else if self.keymap.prev_page.matches(key) {
            self.page_up();
        } else if self.keymap.next_page.matches(key) {
            self.page_down();
        }
        None
    }

    // --- painting ---------------------------------------------------------

    /// Paints the visible page if a repaint is pending.
    pub fn present(&mut self, gfx: &mut dyn GfxDevice, layout: &dyn TextLayout) {
        if self.pending {
            self.display(gfx, layout);
        }
    }

    /// Composites the visible page into the work bitmap (backdrop, then
    /// each line from the current line down) and blits it in one
    /// present. Does nothing while hidden or after a paint failure.
    pub fn display(&mut self, gfx: &mut dyn GfxDevice, layout: &dyn TextLayout) {
        if self.erred || !self.visible {
            return;
        }
        if let Err(err) = self.surfaces.create_work_area(gfx, self.bounds) {
            log::warn!("text view painting disabled: {}", err);
            self.erred = true;
            return;
        }
        let local = self.bounds.at_origin();
        self.surfaces.restore(local);

        let page = self.scroll.page_size();
        let line_height = self.bounds.height / page as i32;
        let remaining = self.line_count - self.scroll.first_visible().min(self.line_count);
        let Some(work) = self.surfaces.work_mut() else {
            return;
        };
        work.lock();
        let visible = self.text[self.current_offset..]
            .split('\n')
            .take(page.min(remaining));
        for (row, line) in visible.enumerate() {
            let rect = Rect::new(0, row as i32 * line_height, local.width, line_height);
            layout.draw(work, rect, line, &self.style, Justify::Left, TextFormat::TopLeft);
        }
        work.unlock();
        if let Some(work) = self.surfaces.work() {
            gfx.present(work, local, Point::new(self.bounds.x, self.bounds.y));
        }
        self.pending = false;
    }

    /// Restores the backdrop over the whole viewport and blits it,
    /// removing the text from the screen. The content is untouched; the
    /// next [`Model::display`] brings it back.
    pub fn erase(&mut self, gfx: &mut dyn GfxDevice) {
        if self.erred || !self.visible || !self.surfaces.has_work_area() {
            return;
        }
        let local = self.bounds.at_origin();
        self.surfaces.restore(local);
        if let Some(work) = self.surfaces.work() {
            gfx.present(work, local, Point::new(self.bounds.x, self.bounds.y));
        }
        self.pending = false;
    }

    /// True once a paint has failed; later paints are no-ops and the last
    /// good frame stays on screen.
    pub fn paint_failed(&self) -> bool {
        self.erred
    }

    /// Clears the sticky paint-failure flag and drops the stale caches.
    pub fn clear_paint_error(&mut self) {
        self.erred = false;
        self.surfaces.kill_background();
        self.mark_dirty();
    }

    /// True if a repaint is pending.
    pub fn needs_repaint(&self) -> bool {
        self.pending
    }

    fn mark_dirty(&mut self) {
        if self.visible {
            self.pending = true;
        }
    }
}

/// Creates a text viewport. Equivalent to [`Model::new`].
pub fn new(bounds: Rect, text: &str) -> Model {
    Model::new(bounds, text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::MonoLayout;
    use crate::surface::{MemoryDevice, Surface};
    use crossterm::event::{KeyCode, KeyModifiers};

    const FOUR_LINES: &str = "L0\nL1\nL2\nL3\n";

    fn key(code: KeyCode) -> Msg {
        Box::new(KeyMsg {
            key: code,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn scrolling_one_past_the_end_lands_on_the_last_line() {
        let mut view = Model::new(Rect::new(0, 0, 100, 40), FOUR_LINES).with_page_length(2);
        view.scroll_to(4);
        assert_eq!(view.current_line(), 3);
        assert_eq!(view.current_offset(), 9);
    }

    #[test]
    fn set_text_recomputes_and_rewinds() {
        let mut view = Model::new(Rect::new(0, 0, 100, 40), FOUR_LINES).with_page_length(2);
        view.scroll_to(3);
        view.set_text("a\nb\n");
        assert_eq!(view.line_count(), 2);
        assert_eq!(view.current_line(), 0);
        assert_eq!(view.current_offset(), 0);
    }

    #[test]
    #[should_panic(expected = "must not be empty")]
    fn empty_text_is_a_contract_violation() {
        let _ = Model::new(Rect::new(0, 0, 100, 40), "");
    }

    #[test]
    fn relative_scrolling_snaps_to_full_pages() {
        let text = (0..10).map(|i| format!("line {}\n", i)).collect::<String>();
        let mut view = Model::new(Rect::new(0, 0, 100, 60), &text).with_page_length(3);
        view.page_down();
        assert_eq!(view.current_line(), 3);
        view.page_down();
        assert_eq!(view.current_line(), 6);
        view.page_down();
        assert_eq!(view.current_line(), 7); // 10 - 3: never a partial tail page
        view.line_down();
        assert_eq!(view.current_line(), 7);
        assert_eq!(view.current_offset(), text.find("line 7").unwrap());
    }

    #[test]
    fn scrolling_is_a_noop_when_the_buffer_fits() {
        let mut view = Model::new(Rect::new(0, 0, 100, 40), "a\nb\n");
        for n in [0, 1, 2, 50] {
            view.scroll_to(n);
            assert_eq!(view.current_line(), 0);
        }
    }

    #[test]
    fn keymap_drives_the_view() {
        let text = (0..10).map(|i| format!("line {}\n", i)).collect::<String>();
        let mut view = Model::new(Rect::new(0, 0, 100, 60), &text).with_page_length(3);
        view.update(key(KeyCode::End));
        assert_eq!(view.current_line(), 9);
        view.update(key(KeyCode::Home));
        assert_eq!(view.current_line(), 0);
        view.update(key(KeyCode::PageDown));
        assert_eq!(view.current_line(), 3);
        view.update(key(KeyCode::Up));
        assert_eq!(view.current_line(), 2);
    }

    #[test]
    fn display_composites_and_blits_once() {
        let mut gfx = MemoryDevice::new(200, 100);
        let layout = MonoLayout::new();
        let mut view = Model::new(Rect::new(10, 10, 100, 40), FOUR_LINES).with_page_length(2);
        view.show();
        assert!(view.needs_repaint());
        view.present(&mut gfx, &layout);
        assert_eq!(gfx.present_count(), 1);
        assert!(!view.needs_repaint());
        // Text landed on screen inside the bounds.
        assert_ne!(gfx.screen().read_pixel(11, 11), 0);
        // Nothing pending: present is free.
        view.present(&mut gfx, &layout);
        assert_eq!(gfx.present_count(), 1);
    }

    #[test]
    fn erase_restores_the_backdrop() {
        let mut gfx = MemoryDevice::new(200, 100);
        let layout = MonoLayout::new();
        let mut view = Model::new(Rect::new(10, 10, 100, 40), FOUR_LINES).with_page_length(2);
        view.show();
        view.display(&mut gfx, &layout);
        assert_ne!(gfx.screen().read_pixel(11, 11), 0);
        view.erase(&mut gfx);
        assert_eq!(gfx.screen().read_pixel(11, 11), 0);
    }
}

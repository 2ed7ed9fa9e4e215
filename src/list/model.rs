//! The list widget's state and input handling.

use super::content::RowBuffer;
use super::keys::ListKeyMap;
use super::rendering::Repaint;
use super::types::{ListDelegate, ListState};
use crate::geometry::{Point, Rect, ViewportGeometry};
use crate::layout::{Font, TextStyle, TextWeight};
use crate::scroll::{ScrollModel, ScrollOutcome};
use crate::surface::{Color, SurfaceCache};
use bubbletea_rs::{Cmd, KeyMsg, Msg};

/// A scrollable list box: owned rows, one selectable, painted a page at a
/// time into an off-screen work bitmap.
///
/// The widget keeps three kinds of state: logical content (the rows and
/// the selection), derived scroll position, and paint caches (backdrop +
/// work bitmaps and a pending-repaint marker). Mutators touch only the
/// first two and record what needs repainting; painting happens when the
/// owner calls [`Model::present`] (or the explicit repaint methods in the
/// rendering half of this widget).
///
/// # Examples
///
/// ```rust
/// use scrollbox_widgets::geometry::Rect;
/// use scrollbox_widgets::list;
///
/// let mut list = list::Model::new(Rect::new(0, 0, 120, 40), 10);
/// list.push_back("A");
/// list.push_back("B");
/// list.push_back("C");
///
/// // Page size is 4; three rows fit, so scrolling is a no-op.
/// list.scroll_to(2);
/// assert_eq!(list.first_visible(), 0);
/// ```
pub struct Model {
    pub(super) geometry: ViewportGeometry,
    pub(super) rows: RowBuffer,
    pub(super) scroll: ScrollModel,
    pub(super) selected: Option<usize>,
    pub(super) state: ListState,
    /// Key bindings for scrolling. Replace or edit to rebind.
    pub keymap: ListKeyMap,
    pub(super) delegate: Option<Box<dyn ListDelegate>>,
    pub(super) style: TextStyle,
    pub(super) highlight_color: Option<Color>,
    pub(super) surfaces: SurfaceCache,
    pub(super) pending: Repaint,
    pub(super) visible: bool,
    pub(super) erred: bool,
    pub(super) last_mouse_down: Option<Point>,
}

impl Model {
    /// Creates an empty, hidden list box with the given bounds and row
    /// height.
    ///
    /// # Panics
    ///
    /// Panics if `item_height` is not positive.
    pub fn new(bounds: Rect, item_height: i32) -> Self {
        let geometry = ViewportGeometry::new(bounds, item_height);
        let scroll = ScrollModel::new(geometry.page_size());
        Self {
            geometry,
            rows: RowBuffer::new(),
            scroll,
            selected: None,
            state: ListState::Normal,
            keymap: ListKeyMap::default(),
            delegate: None,
            style: TextStyle::default(),
            highlight_color: None,
            surfaces: SurfaceCache::new(),
            pending: Repaint::None,
            visible: false,
            erred: false,
            last_mouse_down: None,
        }
    }

    /// Sets the owner delegate (builder style).
    pub fn with_delegate(mut self, delegate: Box<dyn ListDelegate>) -> Self {
        self.delegate = Some(delegate);
        self
    }

    /// Sets the default text style (builder style).
    pub fn with_style(mut self, style: TextStyle) -> Self {
        self.style = style;
        self
    }

    /// Sets the selected-row highlight color (builder style).
    pub fn with_highlight_color(mut self, color: Color) -> Self {
        self.highlight_color = Some(color);
        self
    }

    // --- geometry ---------------------------------------------------------

    /// The widget's bounds in screen coordinates.
    pub fn bounds(&self) -> Rect {
        self.geometry.bounds()
    }

    /// Moves or resizes the widget. The cached backdrop goes stale and is
    /// recaptured on the next paint.
    pub fn set_bounds(&mut self, bounds: Rect) {
        self.geometry.set_bounds(bounds);
        self.scroll.set_page_size(self.geometry.page_size());
        self.surfaces.kill_background();
        self.mark_dirty(Repaint::All);
    }

    /// The row height in pixels.
    pub fn item_height(&self) -> i32 {
        self.geometry.item_height()
    }

    /// Changes the row height.
    ///
    /// # Panics
    ///
    /// Panics if `item_height` is not positive.
    pub fn set_item_height(&mut self, item_height: i32) {
        self.geometry.set_item_height(item_height);
        self.scroll.set_page_size(self.geometry.page_size());
        self.mark_dirty(Repaint::All);
    }

    /// Number of fully visible rows.
    pub fn page_size(&self) -> usize {
        self.geometry.page_size()
    }

    // --- appearance -------------------------------------------------------

    /// The default text color.
    pub fn text_color(&self) -> Color {
        self.style.color
    }

    /// Sets the default text color.
    pub fn set_text_color(&mut self, color: Color) {
        self.style.color = color;
        self.mark_dirty(Repaint::All);
    }

    /// Sets the color used for the selected row when no per-row override
    /// applies.
    pub fn set_highlight_color(&mut self, color: Color) {
        self.highlight_color = Some(color);
        self.mark_dirty(Repaint::All);
    }

    /// Sets the point size rows are drawn at.
    pub fn set_point_size(&mut self, point_size: i32) {
        self.style.point_size = point_size;
        self.mark_dirty(Repaint::All);
    }

    /// Sets the typeface rows are drawn with.
    pub fn set_font(&mut self, font: Font) {
        self.style.font = font;
        self.mark_dirty(Repaint::All);
    }

    /// Sets the glyph weight rows are drawn with.
    pub fn set_weight(&mut self, weight: TextWeight) {
        self.style.weight = weight;
        self.mark_dirty(Repaint::All);
    }

    /// Supplies the backdrop from the owner's own background copy instead
    /// of letting the first paint capture the live screen. The bitmap
    /// must match the widget's bounds.
    pub fn set_backdrop(&mut self, backdrop: Box<dyn crate::surface::Surface>) {
        self.surfaces.set_backdrop(backdrop);
        self.mark_dirty(Repaint::All);
    }

    // --- visibility -------------------------------------------------------

    /// Shows the widget and queues a full repaint.
    pub fn show(&mut self) {
        self.visible = true;
        self.mark_dirty(Repaint::All);
    }

    /// Hides the widget; paint requests while hidden are dropped.
    pub fn hide(&mut self) {
        self.visible = false;
        self.pending = Repaint::None;
    }

    /// True while the widget is shown.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    // --- content ----------------------------------------------------------

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True if there are no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The text of the row at `index`, if it exists.
    pub fn text(&self, index: usize) -> Option<&str> {
        self.rows.text(index)
    }

    /// Appends a row. Clears the selection.
    pub fn push_back(&mut self, text: &str) {
        self.rows.push_back(text);
        self.content_changed();
    }

    /// Prepends a row. Clears the selection.
    pub fn push_front(&mut self, text: &str) {
        self.rows.push_front(text);
        self.content_changed();
    }

    /// Inserts a row before `index`. Clears the selection.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn insert_before(&mut self, index: usize, text: &str) {
        self.rows.insert_before(index, text);
        self.content_changed();
    }

    /// Inserts a row after `index`. Clears the selection.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn insert_after(&mut self, index: usize, text: &str) {
        self.rows.insert_after(index, text);
        self.content_changed();
    }

    /// Deletes the row at `index`. Clears the selection; if the first
    /// visible index now points past the end it is pulled back onto the
    /// last remaining row.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn delete_at(&mut self, index: usize) {
        self.rows.delete_at(index);
        let _ = self.scroll.clamp_to(self.rows.len());
        self.content_changed();
    }

    /// Deletes every row and returns to the top.
    pub fn delete_all(&mut self) {
        self.rows.delete_all();
        self.scroll.reset();
        self.content_changed();
    }

    /// Replaces one row's text in place. The selection is kept.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn set_text(&mut self, index: usize, text: &str) {
        self.rows.set_text(index, text);
        self.mark_dirty(Repaint::Item(index));
    }

    /// Sets or clears one row's color override, independent of the
    /// selection.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn set_line_color(&mut self, index: usize, color: Option<Color>) {
        self.rows.set_line_color(index, color);
        self.mark_dirty(Repaint::Item(index));
    }

    fn content_changed(&mut self) {
        self.selected = None;
        self.state = ListState::Normal;
        self.mark_dirty(Repaint::All);
    }

    // --- selection --------------------------------------------------------

    /// The selected row, if any.
    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    /// Sets or clears the selection.
    ///
    /// # Panics
    ///
    /// Panics if `index` is `Some` and out of range.
    pub fn set_selected_index(&mut self, index: Option<usize>) {
        if let Some(i) = index {
            assert!(i < self.rows.len(), "row index {} out of range", i);
        }
        let old = self.selected;
        self.selected = index;
        if old != index {
            if let Some(o) = old {
                self.mark_dirty(Repaint::Item(o));
            }
            if let Some(i) = index {
                self.mark_dirty(Repaint::Item(i));
            }
        }
    }

    /// How far the current interaction has gone (browse vs. activate).
    pub fn state(&self) -> ListState {
        self.state
    }

    // --- scrolling --------------------------------------------------------

    /// The row shown at the top of the viewport.
    pub fn first_visible(&self) -> usize {
        self.scroll.first_visible()
    }

    /// Scrolls so `line` becomes the first visible row, then snaps up so
    /// the final page is always full. Passing `len()` jumps to the last
    /// page. No-op (and no repaint) when the position does not change.
    pub fn scroll_to(&mut self, line: usize) {
        let before = self.scroll.first_visible();
        let extent = self.rows.len();
        let _ = self.scroll.scroll_to(line, extent);
        let _ = self.scroll.snap_to_fill(extent);
        if self.scroll.first_visible() != before {
            self.mark_dirty(Repaint::All);
        }
    }

    /// Scrolls up one row.
    pub fn line_up(&mut self) {
        self.apply_scroll(|s, n| s.line_up(n));
    }

    /// Scrolls down one row.
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
        if op(&mut self.scroll, self.rows.len()) == ScrollOutcome::Moved {
            self.mark_dirty(Repaint::All);
        }
    }

    // --- input ------------------------------------------------------------

    /// Handles a message: keys in the keymap scroll the list, anything
    /// else is offered to the delegate's `on_key_unhandled`.
    pub fn update(&mut self, msg: Msg) -> Option<Cmd> {
        let key = msg.downcast_ref::<KeyMsg>()?;
        if self.keymap.go_to_start.matches(key) {
            self.scroll_to(0);
        } else if self.keymap.go_to_end.matches(key) {
            self.scroll_to(self.rows.len());
        } else if self.keymap.line_up.matches(key) {
            self.line_up();
        } else if self.keymap.line_down.matches(key) {
            self.line_down();
        } else if self.keymap.prev_page.matches(key) {
            self.page_up();
        } else if self.keymap.next_page.matches(key) {
            self.page_down();
        } else if let Some(delegate) = self.delegate.as_mut() {
            return delegate.on_key_unhandled(key);
        }
        None
    }

    /// Handles a single click at a screen-space point. A click on a row
    /// selects it, repaints the rows that changed, and notifies the
    /// delegate through `on_select`. Clicks below the last row or outside
    /// the bounds do nothing.
    pub fn mouse_down(&mut self, p: Point) -> Option<Cmd> {
        let index = self.hit_test(p)?;
        self.take_selection(index, ListState::Select);
        let delegate = self.delegate.as_mut()?;
        delegate.on_select(index, self.rows.text(index).unwrap_or_default())
    }

    /// Handles a double click: selects the row and notifies the delegate
    /// through `on_activate`.
    pub fn double_click(&mut self, p: Point) -> Option<Cmd> {
        let index = self.hit_test(p)?;
        self.take_selection(index, ListState::UseNow);
        let delegate = self.delegate.as_mut()?;
        delegate.on_activate(index, self.rows.text(index).unwrap_or_default())
    }

    /// The most recent click point, kept for the owner's row-relative
    /// hit-testing.
    pub fn last_mouse_down(&self) -> Option<Point> {
        self.last_mouse_down
    }

    fn hit_test(&mut self, p: Point) -> Option<usize> {
        let row = self.geometry.row_at(p)?;
        self.last_mouse_down = Some(p);
        let index = row + self.scroll.first_visible();
        (index < self.rows.len()).then_some(index)
    }

    fn take_selection(&mut self, index: usize, state: ListState) {
        let old = self.selected;
        self.selected = Some(index);
        self.state = state;
        if let Some(o) = old.filter(|&o| o != index) {
            self.mark_dirty(Repaint::Item(o));
        }
        self.mark_dirty(Repaint::Item(index));
    }

    // --- repaint bookkeeping ----------------------------------------------

    /// True once a paint has failed; see the rendering methods.
    pub fn paint_failed(&self) -> bool {
        self.erred
    }

    /// Clears the sticky paint-failure flag and drops the stale caches so
    /// the next paint starts from a fresh capture.
    pub fn clear_paint_error(&mut self) {
        self.erred = false;
        self.surfaces.kill_background();
        self.mark_dirty(Repaint::All);
    }

    /// True if a repaint is pending.
    pub fn needs_repaint(&self) -> bool {
        self.pending != Repaint::None
    }

    pub(super) fn mark_dirty(&mut self, repaint: Repaint) {
        if self.visible {
            self.pending = self.pending.merge(repaint);
        }
    }
}

/// Creates a list box. Equivalent to [`Model::new`].
pub fn new(bounds: Rect, item_height: i32) -> Model {
    Model::new(bounds, item_height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bubbletea_rs::KeyMsg;
    use crossterm::event::{KeyCode, KeyModifiers};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn key(code: KeyCode) -> Msg {
        Box::new(KeyMsg {
            key: code,
            modifiers: KeyModifiers::NONE,
        })
    }

    fn filled(bounds: Rect, item_height: i32, n: usize) -> Model {
        let mut list = Model::new(bounds, item_height);
        for i in 0..n {
            list.push_back(&format!("row {}", i));
        }
        list
    }

    #[derive(Default)]
    struct Events {
        selected: Vec<usize>,
        activated: Vec<usize>,
        keys: Vec<KeyCode>,
    }

    struct Recorder(Rc<RefCell<Events>>);

    impl ListDelegate for Recorder {
        fn on_select(&mut self, index: usize, _text: &str) -> Option<Cmd> {
            self.0.borrow_mut().selected.push(index);
            None
        }
        fn on_activate(&mut self, index: usize, _text: &str) -> Option<Cmd> {
            self.0.borrow_mut().activated.push(index);
            None
        }
        fn on_key_unhandled(&mut self, key: &KeyMsg) -> Option<Cmd> {
            self.0.borrow_mut().keys.push(key.key);
            None
        }
    }

    #[test]
    fn selection_resets_on_every_structural_mutation() {
        let mut list = filled(Rect::new(0, 0, 100, 40), 10, 5);
        list.set_selected_index(Some(2));
        list.push_back("tail");
        assert_eq!(list.selected_index(), None);

        list.set_selected_index(Some(2));
        list.delete_at(0);
        assert_eq!(list.selected_index(), None);

        list.set_selected_index(Some(1));
        list.delete_all();
        assert_eq!(list.selected_index(), None);
    }

    #[test]
    fn set_text_keeps_the_selection() {
        let mut list = filled(Rect::new(0, 0, 100, 40), 10, 3);
        list.set_selected_index(Some(1));
        list.set_text(1, "renamed");
        assert_eq!(list.selected_index(), Some(1));
        assert_eq!(list.text(1), Some("renamed"));
    }

    #[test]
    fn delete_pulls_first_visible_back_into_range() {
        // 8 rows, page of 2, scrolled to the tail.
        let mut list = filled(Rect::new(0, 0, 100, 20), 10, 8);
        list.scroll_to(6);
        assert_eq!(list.first_visible(), 6);
        for _ in 0..6 {
            list.delete_at(0);
        }
        // 2 rows remain; first visible was pulled back onto the last row.
        assert_eq!(list.first_visible(), 1);
        list.delete_at(0);
        assert_eq!(list.first_visible(), 0);
    }

    #[test]
    fn scroll_to_clamps_like_the_abc_scenario() {
        let mut list = Model::new(Rect::new(0, 0, 100, 20), 10);
        for text in ["A", "B", "C"] {
            list.push_back(text);
        }
        list.scroll_to(3);
        assert_eq!(list.first_visible(), 1); // shows "B", "C"
        list.scroll_to(0);
        assert_eq!(list.first_visible(), 0); // shows "A", "B"
    }

    #[test]
    fn scroll_to_never_leaves_a_partial_tail_page() {
        let mut list = filled(Rect::new(0, 0, 100, 50), 10, 20);
        list.scroll_to(17);
        assert_eq!(list.first_visible(), 15);
    }

    #[test]
    fn scrolling_is_a_noop_when_everything_fits() {
        let mut list = filled(Rect::new(0, 0, 100, 100), 10, 5);
        for n in [0, 2, 5, 99] {
            list.scroll_to(n);
            assert_eq!(list.first_visible(), 0);
        }
    }

    #[test]
    fn idempotent_scrolls_do_not_queue_repaints() {
        let mut list = filled(Rect::new(0, 0, 100, 20), 10, 8);
        list.show();
        list.pending = Repaint::None; // drop the repaint queued by show()
        list.scroll_to(4);
        assert!(list.needs_repaint());
        list.pending = Repaint::None;
        list.scroll_to(4);
        assert!(!list.needs_repaint());
    }

    #[test]
    fn keymap_drives_the_scroll_model() {
        let mut list = filled(Rect::new(0, 0, 100, 40), 10, 12);
        list.update(key(KeyCode::PageDown));
        assert_eq!(list.first_visible(), 4);
        list.update(key(KeyCode::Down));
        assert_eq!(list.first_visible(), 5);
        list.update(key(KeyCode::Up));
        assert_eq!(list.first_visible(), 4);
        list.update(key(KeyCode::End));
        assert_eq!(list.first_visible(), 8);
        list.update(key(KeyCode::Home));
        assert_eq!(list.first_visible(), 0);
        list.update(key(KeyCode::PageUp));
        assert_eq!(list.first_visible(), 0);
    }

    #[test]
    fn unrecognized_keys_go_to_the_delegate() {
        let events = Rc::new(RefCell::new(Events::default()));
        let mut list = filled(Rect::new(0, 0, 100, 40), 10, 3)
            .with_delegate(Box::new(Recorder(events.clone())));
        list.update(key(KeyCode::Char('q')));
        list.update(key(KeyCode::Enter));
        assert_eq!(events.borrow().keys, vec![KeyCode::Char('q'), KeyCode::Enter]);
    }

    #[test]
    fn clicks_select_and_notify() {
        let events = Rc::new(RefCell::new(Events::default()));
        let mut list = filled(Rect::new(10, 20, 100, 40), 10, 12)
            .with_delegate(Box::new(Recorder(events.clone())));
        list.scroll_to(4);

        // Third visible row: index 4 + 2.
        list.mouse_down(Point::new(50, 45));
        assert_eq!(list.selected_index(), Some(6));
        assert_eq!(list.state(), ListState::Select);
        assert_eq!(list.last_mouse_down(), Some(Point::new(50, 45)));
        assert_eq!(events.borrow().selected, vec![6]);

        list.double_click(Point::new(50, 25));
        assert_eq!(list.selected_index(), Some(4));
        assert_eq!(list.state(), ListState::UseNow);
        assert_eq!(events.borrow().activated, vec![4]);
    }

    #[test]
    fn clicks_below_the_content_are_ignored() {
        let events = Rc::new(RefCell::new(Events::default()));
        let mut list = filled(Rect::new(0, 0, 100, 40), 10, 2)
            .with_delegate(Box::new(Recorder(events.clone())));
        // Row 3 is inside the bounds but past the last row.
        list.mouse_down(Point::new(5, 35));
        assert_eq!(list.selected_index(), None);
        assert!(events.borrow().selected.is_empty());
        // And clicks outside the widget entirely.
        list.mouse_down(Point::new(500, 500));
        assert_eq!(list.selected_index(), None);
    }

    #[test]
    fn hidden_widgets_queue_no_repaints() {
        let mut list = filled(Rect::new(0, 0, 100, 20), 10, 8);
        assert!(!list.needs_repaint());
        list.scroll_to(4);
        assert!(!list.needs_repaint());
        list.show();
        assert!(list.needs_repaint());
    }
}

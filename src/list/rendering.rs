//! Painting for the list widget: full-page and single-row presents.

use super::Model;
use crate::geometry::Point;
use crate::layout::{Justify, TextFormat, TextLayout, TextStyle};
use crate::surface::{Color, GfxDevice};

/// What is waiting to be painted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum Repaint {
    /// Nothing.
    #[default]
    None,
    /// One row.
    Item(usize),
    /// The whole page.
    All,
}

impl Repaint {
    /// Combines two pending repaints into the smallest one covering both.
    pub(crate) fn merge(self, other: Repaint) -> Repaint {
        match (self, other) {
            (Repaint::None, r) | (r, Repaint::None) => r,
            (Repaint::Item(a), Repaint::Item(b)) if a == b => Repaint::Item(a),
            _ => Repaint::All,
        }
    }
}

impl Model {
    /// Paints whatever is pending (nothing, one row, or the full page)
    /// and clears the pending marker.
    pub fn present(&mut self, gfx: &mut dyn GfxDevice, layout: &dyn TextLayout) {
        match self.pending {
            Repaint::None => {}
            Repaint::Item(index) => self.repaint_item(gfx, layout, index),
            Repaint::All => self.repaint_all(gfx, layout),
        }
    }

    /// Composites the full visible page into the work bitmap and blits it
    /// in one present: backdrop first, then every valid row's text and a
    /// 1-px separator along each row's bottom edge.
    ///
    /// Does nothing while the widget is hidden or after a paint failure
    /// (the last good frame stays on screen; see
    /// [`Model::paint_failed`](Model::paint_failed)).
    pub fn repaint_all(&mut self, gfx: &mut dyn GfxDevice, layout: &dyn TextLayout) {
        if self.erred || !self.visible {
            return;
        }
        if !self.ensure_work_area(gfx) {
            return;
        }
        let bounds = self.geometry.bounds();
        self.surfaces.restore(bounds.at_origin());
        if let Some(work) = self.surfaces.work_mut() {
            work.lock();
        }
        for row in 0..self.geometry.page_size() {
            let index = self.scroll.first_visible() + row;
            if index >= self.rows.len() {
                break;
            }
            self.draw_row(layout, row, index);
        }
        if let Some(work) = self.surfaces.work_mut() {
            work.unlock();
        }
        if let Some(work) = self.surfaces.work() {
            gfx.present(work, bounds.at_origin(), bounds.origin());
        }
        self.pending = Repaint::None;
    }

    /// Repaints one row, but only if it lies inside the visible window:
    /// restores the row's backdrop sub-rectangle, redraws its text and
    /// separator, and blits just that sub-rectangle. Rows outside the
    /// window cost nothing: no backdrop paint, no blit.
    pub fn repaint_item(&mut self, gfx: &mut dyn GfxDevice, layout: &dyn TextLayout, index: usize) {
        if self.erred || !self.visible {
            return;
        }
        let first = self.scroll.first_visible();
        if index < first || index >= first + self.geometry.page_size() {
            return;
        }
        if !self.ensure_work_area(gfx) {
            return;
        }
        let row = index - first;
        let rect = self.geometry.row_rect_local(row);
        self.surfaces.restore(rect);
        if let Some(work) = self.surfaces.work_mut() {
            work.lock();
        }
        self.draw_row(layout, row, index);
        if let Some(work) = self.surfaces.work_mut() {
            work.unlock();
        }
        let bounds = self.geometry.bounds();
        if let Some(work) = self.surfaces.work() {
            gfx.present(work, rect, Point::new(bounds.x + rect.x, bounds.y + rect.y));
        }
        if self.pending == Repaint::Item(index) {
            self.pending = Repaint::None;
        }
    }

    /// The color a row is drawn in: its own override if set, else the
    /// highlight color if the row is selected and a highlight is
    /// configured, else the widget default.
    fn row_color(&self, index: usize) -> Color {
        if let Some(color) = self.rows.get(index).and_then(|r| r.color()) {
            return color;
        }
        if self.selected == Some(index) {
            if let Some(highlight) = self.highlight_color {
                return highlight;
            }
        }
        self.style.color
    }

    fn draw_row(&mut self, layout: &dyn TextLayout, row: usize, index: usize) {
        let rect = self.geometry.row_rect_local(row);
        let style = TextStyle {
            color: self.row_color(index),
            ..self.style
        };
        let separator = self.style.color;
        let Some(text) = self.rows.text(index) else {
            return;
        };
        let Some(work) = self.surfaces.work_mut() else {
            return;
        };
        layout.draw(work, rect, text, &style, Justify::Left, TextFormat::TopLeft);
        let separator_index = work.nearest_color(separator);
        work.hline(
            Point::new(rect.x, rect.bottom() - 1),
            rect.width,
            separator_index,
        );
    }

    fn ensure_work_area(&mut self, gfx: &mut dyn GfxDevice) -> bool {
        match self.surfaces.create_work_area(gfx, self.geometry.bounds()) {
            Ok(()) => true,
            Err(err) => {
                log::warn!("list box painting disabled: {}", err);
                self.erred = true;
                false
            }
        }
    }
}

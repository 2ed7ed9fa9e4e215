//! The text-layout capability: drawing strings into surface rectangles.
//!
//! Font measurement and glyph rasterization are the host's business; the
//! widgets only ever call [`TextLayout::draw`] with a rectangle, a string,
//! and a [`TextStyle`]. The bundled [`MonoLayout`] implementation renders
//! fixed-cell "glyphs" into palette surfaces, which is enough for tests and
//! headless use, and a template for wrapping a real font engine.

use crate::geometry::Rect;
use crate::surface::{Color, Surface};
use unicode_width::UnicodeWidthStr;

/// The typeface families the era's asset packs shipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Font {
    /// The host's proportional UI font.
    #[default]
    Default,
    /// The monospace terminal font.
    Mono,
}

/// Glyph weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextWeight {
    /// Regular weight.
    #[default]
    Normal,
    /// Bold weight.
    Bold,
}

/// Horizontal placement of text within its rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Justify {
    /// Flush left.
    #[default]
    Left,
    /// Centered.
    Center,
    /// Flush right.
    Right,
    /// Flush left with word wrap inside the rectangle.
    Wrap,
}

/// Vertical/corner anchoring of text within its rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextFormat {
    /// Anchored to the top-left corner.
    #[default]
    TopLeft,
    /// Anchored to the top edge, centered.
    TopCenter,
    /// Anchored to the top-right corner.
    TopRight,
}

/// Everything about how a run of text should look.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextStyle {
    /// Typeface.
    pub font: Font,
    /// Point size.
    pub point_size: i32,
    /// Glyph weight.
    pub weight: TextWeight,
    /// Text color.
    pub color: Color,
}

impl TextStyle {
    /// A style in the given color with the default font, 12pt, normal
    /// weight.
    pub fn new(color: Color) -> Self {
        Self {
            font: Font::default(),
            point_size: 12,
            weight: TextWeight::default(),
            color,
        }
    }

    /// Sets the typeface (builder style).
    pub fn with_font(mut self, font: Font) -> Self {
        self.font = font;
        self
    }

    /// Sets the point size (builder style).
    pub fn with_point_size(mut self, point_size: i32) -> Self {
        self.point_size = point_size;
        self
    }

    /// Sets the weight (builder style).
    pub fn with_weight(mut self, weight: TextWeight) -> Self {
        self.weight = weight;
        self
    }
}

impl Default for TextStyle {
    fn default() -> Self {
        Self::new(Color::WHITE)
    }
}

/// Draws text into surfaces.
pub trait TextLayout {
    /// Draws `text` into `rect` of `surface` and returns the bounding
    /// rectangle actually used (clipped to `rect`).
    fn draw(
        &self,
        surface: &mut dyn Surface,
        rect: Rect,
        text: &str,
        style: &TextStyle,
        justify: Justify,
        format: TextFormat,
    ) -> Rect;
}

/// A software layout for fixed-cell text.
///
/// Every glyph occupies a cell `point_size / 2` wide and `point_size`
/// tall (wide characters take two cells, per `unicode-width`); the glyph
/// band is filled with the palette-nearest index of the style color. Real
/// hosts draw actual glyphs; the geometry is the part the widgets rely
/// on.
#[derive(Debug, Clone, Copy, Default)]
pub struct MonoLayout;

impl MonoLayout {
    /// Creates the layout.
    pub fn new() -> Self {
        Self
    }

    /// The cell width for a style, in pixels.
    pub fn cell_width(style: &TextStyle) -> i32 {
        (style.point_size / 2).max(1)
    }

    /// The pixel width of a string in this layout.
    pub fn text_width(text: &str, style: &TextStyle) -> i32 {
        UnicodeWidthStr::width(text) as i32 * Self::cell_width(style)
    }
}

impl TextLayout for MonoLayout {
    fn draw(
        &self,
        surface: &mut dyn Surface,
        rect: Rect,
        text: &str,
        style: &TextStyle,
        justify: Justify,
        _format: TextFormat,
    ) -> Rect {
        let width = Self::text_width(text, style).min(rect.width);
        let height = style.point_size.min(rect.height);
        let x = match justify {
            Justify::Left | Justify::Wrap => rect.x,
            Justify::Center => rect.x + (rect.width - width) / 2,
            Justify::Right => rect.right() - width,
        };
        let bounds = Rect::new(x, rect.y, width, height).intersection(&rect);
        if !bounds.is_empty() {
            let index = surface.nearest_color(style.color);
            surface.fill_rect(bounds, index);
        }
        bounds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::MemorySurface;

    fn style() -> TextStyle {
        TextStyle::new(Color::WHITE).with_point_size(8)
    }

    #[test]
    fn left_justified_text_starts_at_rect_origin() {
        let mut s = MemorySurface::new(100, 20);
        let rect = Rect::new(10, 2, 80, 10);
        let bounds = MonoLayout::new().draw(
            &mut s,
            rect,
            "abc",
            &style(),
            Justify::Left,
            TextFormat::TopLeft,
        );
        assert_eq!(bounds.x, 10);
        assert_eq!(bounds.y, 2);
        assert_eq!(bounds.width, 12); // 3 cells * 4px
        assert_eq!(bounds.height, 8);
        assert_ne!(s.read_pixel(10, 2), 0);
    }

    #[test]
    fn right_justified_text_ends_at_rect_edge() {
        let mut s = MemorySurface::new(100, 20);
        let rect = Rect::new(0, 0, 40, 10);
        let bounds = MonoLayout::new().draw(
            &mut s,
            rect,
            "ab",
            &style(),
            Justify::Right,
            TextFormat::TopLeft,
        );
        assert_eq!(bounds.right(), 40);
    }

    #[test]
    fn overlong_text_is_clipped_to_rect() {
        let mut s = MemorySurface::new(100, 20);
        let rect = Rect::new(0, 0, 10, 10);
        let bounds = MonoLayout::new().draw(
            &mut s,
            rect,
            "a very long line of text",
            &style(),
            Justify::Left,
            TextFormat::TopLeft,
        );
        assert_eq!(bounds.width, 10);
        assert_eq!(s.read_pixel(11, 0), 0);
    }

    #[test]
    fn wide_characters_take_two_cells() {
        let style = style();
        assert_eq!(MonoLayout::text_width("世", &style), 8);
        assert_eq!(MonoLayout::text_width("ab", &style), 8);
    }
}

//! The surface capability: bitmaps, blits, and the backdrop/work cache.
//!
//! Widgets never touch video memory directly. They paint through two small
//! traits the host implements ([`Surface`] for an individual bitmap,
//! [`GfxDevice`] for allocation, screen capture, and the final blit) and
//! keep their off-screen state in a [`SurfaceCache`]: a captured *backdrop*
//! (the static background under the widget) plus a scratch *work* bitmap a
//! frame is composited into before one blit. Both bitmaps are allocated
//! lazily on first paint and rebuilt when the widget is resized.
//!
//! A software implementation, [`MemoryDevice`] / [`MemorySurface`], ships
//! with the crate. It backs the test suite and works for headless
//! rendering; real hosts wrap their own bitmap types instead.

use crate::geometry::{Point, Rect};
use once_cell::sync::Lazy;
use std::fmt;

/// A 24-bit RGB color.
///
/// Widgets resolve colors in RGB and defer palette mapping to the surface
/// via [`Surface::nearest_color`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    /// Red component.
    pub r: u8,
    /// Green component.
    pub g: u8,
    /// Blue component.
    pub b: u8,
}

impl Color {
    /// Creates a color from RGB components.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Opaque white, the widgets' default text color.
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    /// Opaque black.
    pub const BLACK: Color = Color::rgb(0, 0, 0);
}

/// Resource failures from the surface capability.
///
/// These are the only recoverable errors the crate reports; everything
/// else is an asserted precondition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceError {
    /// A bitmap of the given size could not be allocated.
    Alloc {
        /// Requested width.
        width: i32,
        /// Requested height.
        height: i32,
    },
    /// The given screen region could not be captured.
    Capture {
        /// Requested region.
        rect: Rect,
    },
}

impl fmt::Display for SurfaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SurfaceError::Alloc { width, height } => {
                write!(f, "could not allocate a {}x{} bitmap", width, height)
            }
            SurfaceError::Capture { rect } => write!(
                f,
                "could not capture {}x{} pixels at ({}, {})",
                rect.width, rect.height, rect.x, rect.y
            ),
        }
    }
}

impl std::error::Error for SurfaceError {}

/// Crate-wide result alias for surface operations.
pub type Result<T> = std::result::Result<T, SurfaceError>;

/// One bitmap with a palette.
///
/// Coordinates are pixel coordinates local to the surface. Drawing outside
/// the surface is clipped, never an error.
pub trait Surface {
    /// Width in pixels.
    fn width(&self) -> i32;

    /// Height in pixels.
    fn height(&self) -> i32;

    /// Acquires direct pixel access. Paired with [`Surface::unlock`];
    /// defaults to a no-op for surfaces that are always accessible.
    fn lock(&mut self) {}

    /// Releases direct pixel access.
    fn unlock(&mut self) {}

    /// Reads the palette index at a pixel. Out-of-bounds reads return 0.
    fn read_pixel(&self, x: i32, y: i32) -> u8;

    /// Copies `src_rect` of `src` into this surface with its top-left
    /// corner at `dst`.
    fn copy_region(&mut self, src: &dyn Surface, src_rect: Rect, dst: Point);

    /// Fills a rectangle with a palette index.
    fn fill_rect(&mut self, rect: Rect, color_index: u8);

    /// Draws a 1-px horizontal line starting at `p`.
    fn hline(&mut self, p: Point, width: i32, color_index: u8);

    /// The palette index closest to the given RGB color.
    fn nearest_color(&self, color: Color) -> u8;
}

/// The host's graphics device: allocates surfaces, captures the live
/// screen, and blits finished frames onto it.
pub trait GfxDevice {
    /// Allocates a surface of the given size, in the screen's palette.
    fn create_surface(&mut self, width: i32, height: i32) -> Result<Box<dyn Surface>>;

    /// Captures the given screen region into a new surface.
    fn capture(&mut self, rect: Rect) -> Result<Box<dyn Surface>>;

    /// Blits `src_rect` of `src` onto the screen at `dst`.
    fn present(&mut self, src: &dyn Surface, src_rect: Rect, dst: Point);
}

/// The backdrop and work bitmaps of one widget, built on demand.
///
/// The backdrop holds the pixels that were under the widget before it
/// first painted; restoring a sub-rectangle of it is how a row is erased
/// before being redrawn. The work bitmap is where a frame is composited
/// so the screen only ever sees one finished blit. Both are owned by
/// exactly one widget and die with it.
#[derive(Default)]
pub struct SurfaceCache {
    backdrop: Option<Box<dyn Surface>>,
    work: Option<Box<dyn Surface>>,
    width: i32,
    height: i32,
}

impl SurfaceCache {
    /// Creates an empty cache; nothing is allocated until
    /// [`SurfaceCache::create_work_area`] runs.
    pub fn new() -> Self {
        Self::default()
    }

    /// Supplies the backdrop from the owner's own background copy instead
    /// of capturing the live screen. Replaces any cached backdrop.
    pub fn set_backdrop(&mut self, backdrop: Box<dyn Surface>) {
        self.width = backdrop.width();
        self.height = backdrop.height();
        self.backdrop = Some(backdrop);
        self.work = None;
    }

    /// Ensures backdrop and work bitmaps exist for the given bounds.
    ///
    /// On first use the backdrop is captured from the live screen (unless
    /// one was supplied via [`SurfaceCache::set_backdrop`]); the work
    /// bitmap is then allocated with the same dimensions and palette.
    /// If `bounds` no longer matches the cached size, both bitmaps are
    /// dropped and rebuilt.
    pub fn create_work_area(&mut self, gfx: &mut dyn GfxDevice, bounds: Rect) -> Result<()> {
        if bounds.width != self.width || bounds.height != self.height {
            self.kill_background();
            self.width = bounds.width;
            self.height = bounds.height;
        }
        if self.backdrop.is_none() {
            self.backdrop = Some(gfx.capture(bounds)?);
        }
        if self.work.is_none() {
            self.work = Some(gfx.create_surface(bounds.width, bounds.height)?);
        }
        Ok(())
    }

    /// Releases the backdrop (and the work bitmap composited from it),
    /// forcing a fresh capture on the next paint. Called when cached
    /// pixels go stale, e.g. on resize.
    pub fn kill_background(&mut self) {
        self.backdrop = None;
        self.work = None;
    }

    /// True once both bitmaps exist.
    pub fn has_work_area(&self) -> bool {
        self.backdrop.is_some() && self.work.is_some()
    }

    /// Copies the backdrop sub-rectangle `rect` (local coordinates) back
    /// into the work bitmap, erasing whatever was drawn there.
    ///
    /// Does nothing until the work area exists.
    pub fn restore(&mut self, rect: Rect) {
        let Self { backdrop, work, .. } = self;
        if let (Some(backdrop), Some(work)) = (backdrop.as_deref(), work.as_deref_mut()) {
            work.copy_region(backdrop, rect, rect.origin());
        }
    }

    /// The work bitmap, if allocated.
    pub fn work(&self) -> Option<&dyn Surface> {
        self.work.as_deref()
    }

    /// Mutable access to the work bitmap, if allocated.
    pub fn work_mut(&mut self) -> Option<&mut (dyn Surface + 'static)> {
        self.work.as_deref_mut()
    }
}

/// The default 16-entry palette of the software device: the classic EGA
/// colors, which every asset in the era's art pipeline could count on.
static DEFAULT_PALETTE: Lazy<Vec<Color>> = Lazy::new(|| {
    vec![
        Color::rgb(0, 0, 0),
        Color::rgb(0, 0, 170),
        Color::rgb(0, 170, 0),
        Color::rgb(0, 170, 170),
        Color::rgb(170, 0, 0),
        Color::rgb(170, 0, 170),
        Color::rgb(170, 85, 0),
        Color::rgb(170, 170, 170),
        Color::rgb(85, 85, 85),
        Color::rgb(85, 85, 255),
        Color::rgb(85, 255, 85),
        Color::rgb(85, 255, 255),
        Color::rgb(255, 85, 85),
        Color::rgb(255, 85, 255),
        Color::rgb(255, 255, 85),
        Color::rgb(255, 255, 255),
    ]
});

/// A palette-indexed bitmap held in a plain byte vector.
#[derive(Debug, Clone)]
pub struct MemorySurface {
    width: i32,
    height: i32,
    pixels: Vec<u8>,
    palette: Vec<Color>,
}

impl MemorySurface {
    /// Creates a zero-filled surface with the default palette.
    pub fn new(width: i32, height: i32) -> Self {
        Self::with_palette(width, height, DEFAULT_PALETTE.clone())
    }

    /// Creates a zero-filled surface with the given palette.
    ///
    /// # Panics
    ///
    /// Panics if the palette is empty or either dimension is negative.
    pub fn with_palette(width: i32, height: i32, palette: Vec<Color>) -> Self {
        assert!(!palette.is_empty(), "palette must not be empty");
        assert!(width >= 0 && height >= 0, "dimensions must be non-negative");
        Self {
            width,
            height,
            pixels: vec![0; (width as usize) * (height as usize)],
            palette,
        }
    }

    /// The surface's palette.
    pub fn palette(&self) -> &[Color] {
        &self.palette
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        (x >= 0 && x < self.width && y >= 0 && y < self.height)
            .then(|| (y as usize) * (self.width as usize) + x as usize)
    }

    /// Writes one pixel; out-of-bounds writes are dropped.
    pub fn put_pixel(&mut self, x: i32, y: i32, color_index: u8) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = color_index;
        }
    }
}

impl Surface for MemorySurface {
    fn width(&self) -> i32 {
        self.width
    }

    fn height(&self) -> i32 {
        self.height
    }

    fn read_pixel(&self, x: i32, y: i32) -> u8 {
        self.index(x, y).map(|i| self.pixels[i]).unwrap_or(0)
    }

    fn copy_region(&mut self, src: &dyn Surface, src_rect: Rect, dst: Point) {
        for row in 0..src_rect.height.max(0) {
            for col in 0..src_rect.width.max(0) {
                let v = src.read_pixel(src_rect.x + col, src_rect.y + row);
                self.put_pixel(dst.x + col, dst.y + row, v);
            }
        }
    }

    fn fill_rect(&mut self, rect: Rect, color_index: u8) {
        for row in rect.y..rect.bottom() {
            for col in rect.x..rect.right() {
                self.put_pixel(col, row, color_index);
            }
        }
    }

    fn hline(&mut self, p: Point, width: i32, color_index: u8) {
        for col in 0..width.max(0) {
            self.put_pixel(p.x + col, p.y, color_index);
        }
    }

    fn nearest_color(&self, color: Color) -> u8 {
        let mut best = 0usize;
        let mut best_dist = u32::MAX;
        for (i, c) in self.palette.iter().enumerate() {
            let dr = c.r as i32 - color.r as i32;
            let dg = c.g as i32 - color.g as i32;
            let db = c.b as i32 - color.b as i32;
            let dist = (dr * dr + dg * dg + db * db) as u32;
            if dist < best_dist {
                best_dist = dist;
                best = i;
            }
        }
        best as u8
    }
}

/// A software [`GfxDevice`]: an in-memory screen plus an allocation and
/// blit counter, which the test suite leans on to observe repaints.
pub struct MemoryDevice {
    screen: MemorySurface,
    presents: usize,
}

impl MemoryDevice {
    /// Creates a device with a zero-filled screen of the given size and
    /// the default palette.
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            screen: MemorySurface::new(width, height),
            presents: 0,
        }
    }

    /// The live screen.
    pub fn screen(&self) -> &MemorySurface {
        &self.screen
    }

    /// How many blits have reached the screen.
    pub fn present_count(&self) -> usize {
        self.presents
    }
}

impl GfxDevice for MemoryDevice {
    fn create_surface(&mut self, width: i32, height: i32) -> Result<Box<dyn Surface>> {
        if width < 0 || height < 0 {
            return Err(SurfaceError::Alloc { width, height });
        }
        Ok(Box::new(MemorySurface::with_palette(
            width,
            height,
            self.screen.palette.clone(),
        )))
    }

    fn capture(&mut self, rect: Rect) -> Result<Box<dyn Surface>> {
        if rect.is_empty() {
            return Err(SurfaceError::Capture { rect });
        }
        let mut out = MemorySurface::with_palette(rect.width, rect.height, self.screen.palette.clone());
        out.copy_region(&self.screen, rect, Point::new(0, 0));
        Ok(Box::new(out))
    }

    fn present(&mut self, src: &dyn Surface, src_rect: Rect, dst: Point) {
        self.screen.copy_region(src, src_rect, dst);
        self.presents += 1;
    }
}

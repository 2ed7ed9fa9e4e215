#![warn(missing_docs)]

//! # scrollbox-widgets
//!
//! Scrollable list and text viewport widgets for palette-based game GUIs.
//!
//! This crate provides the two workhorse "scroll box" widgets of a classic
//! point-and-click interface: a row-oriented [`list`] box with selection and
//! per-row color overrides, and a line-oriented [`textview`] for paging
//! through a large text buffer. Both paint off-screen into a scratch bitmap
//! and present a finished frame in a single blit, so a slow host never shows
//! a half-drawn page.
//!
//! ## Overview
//!
//! The widgets do not rasterize glyphs or own video memory themselves. They
//! consume two small capabilities the host supplies:
//!
//! - [`surface::GfxDevice`] / [`surface::Surface`]: bitmap allocation,
//!   screen capture, region copies, and palette-nearest color lookup.
//! - [`layout::TextLayout`]: draws a string into a rectangle of a surface
//!   and reports the bounding box it used.
//!
//! Software implementations of both ([`surface::MemoryDevice`],
//! [`layout::MonoLayout`]) ship with the crate; they back the test suite and
//! are handy for headless rendering.
//!
//! Scrolling arithmetic lives in [`scroll`], shared by both widgets: clamped
//! first-visible tracking, "never show a partial tail page" snapping, and
//! the scroll-one-past-the-end convention for jumping to the last page.
//! Line-number-to-byte-offset translation for the text widget lives in
//! [`paginator`].
//!
//! ## Quick start
//!
//! ```rust
//! use scrollbox_widgets::geometry::Rect;
//! use scrollbox_widgets::layout::MonoLayout;
//! use scrollbox_widgets::surface::MemoryDevice;
//! use scrollbox_widgets::list;
//!
//! // A 320x200 software screen and a monospace layout.
//! let mut gfx = MemoryDevice::new(320, 200);
//! let layout = MonoLayout::new();
//!
//! // A list box occupying part of the screen, 10px rows.
//! let mut list = list::Model::new(Rect::new(8, 8, 200, 100), 10);
//! list.push_back("Deal summary");
//! list.push_back("Buyer bids");
//! list.push_back("Staff bios");
//! list.show();
//!
//! // Paint whatever is pending (here: the full page).
//! list.present(&mut gfx, &layout);
//! assert!(!list.needs_repaint());
//! ```
//!
//! ## Message handling
//!
//! Widgets expose an inherent `update` method that accepts a
//! `bubbletea_rs::Msg` and reacts to the key bindings in their keymap
//! (Home/End, Up/Down, PageUp/PageDown by default). Keys the widget does
//! not recognize are handed to the owner through the widget's delegate.
//!
//! ```rust
//! use scrollbox_widgets::geometry::Rect;
//! use scrollbox_widgets::list;
//! use bubbletea_rs::{KeyMsg, Msg};
//! use crossterm::event::{KeyCode, KeyModifiers};
//!
//! let mut list = list::Model::new(Rect::new(0, 0, 100, 40), 10);
//! for i in 0..12 {
//!     list.push_back(&format!("row {}", i));
//! }
//!
//! let msg: Msg = Box::new(KeyMsg {
//!     key: KeyCode::PageDown,
//!     modifiers: KeyModifiers::NONE,
//! });
//! list.update(msg);
//! assert_eq!(list.first_visible(), 4);
//! ```
//!
//! For convenience, you can import the prelude:
//!
//! ```rust
//! use scrollbox_widgets::prelude::*;
//! ```

pub mod geometry;
pub mod key;
pub mod layout;
pub mod list;
pub mod paginator;
pub mod scroll;
pub mod surface;
pub mod textview;

pub use key::{Binding, KeyMap};
pub use list::Model as ListBox;
pub use textview::Model as TextView;

/// Commonly used types, re-exported under widget-named aliases.
///
/// ```rust
/// use scrollbox_widgets::prelude::*;
///
/// let list = ListBox::new(Rect::new(0, 0, 120, 60), 12);
/// assert_eq!(list.len(), 0);
/// ```
pub mod prelude {
    pub use crate::geometry::{Point, Rect, ViewportGeometry};
    pub use crate::key::{Binding, KeyMap};
    pub use crate::layout::{Font, Justify, MonoLayout, TextFormat, TextLayout, TextStyle, TextWeight};
    pub use crate::list::Model as ListBox;
    pub use crate::list::{ListDelegate, ListKeyMap, ListState};
    pub use crate::scroll::{clamp_first_visible, ScrollModel, ScrollOutcome};
    pub use crate::surface::{Color, GfxDevice, MemoryDevice, MemorySurface, Surface, SurfaceCache, SurfaceError};
    pub use crate::textview::Model as TextView;
    pub use crate::textview::TextKeyMap;
}

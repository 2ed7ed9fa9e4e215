//! A scrollable, selectable list box painted into a palette surface.
//!
//! This is the row-oriented scroll box: an ordered collection of owned
//! text rows shown a page at a time, with single-click selection,
//! double-click activation, per-row color overrides, and keyboard
//! scrolling. Frames are composited off-screen (backdrop first, then each
//! visible row and its separator) and reach the screen in one blit; a
//! selection change repaints only the rows involved.
//!
//! ## Architecture
//!
//! - **Content**: [`content::RowBuffer`] owns the rows; every input
//!   string is copied in, and structural mutations clear the selection.
//! - **Scrolling**: the shared [`crate::scroll::ScrollModel`], with the
//!   list's extra rule that jumps snap up so the final page is always
//!   full.
//! - **Painting**: the rendering half of [`Model`]: `repaint_all`,
//!   `repaint_item`, and `present`, which flushes whatever the mutators
//!   marked pending.
//! - **Input**: `update` maps keys through [`ListKeyMap`];
//!   `mouse_down` / `double_click` map points to rows. Whatever the
//!   widget does not consume goes to the owner's [`ListDelegate`].
//!
//! ## Example
//!
//! ```rust
//! use scrollbox_widgets::geometry::{Point, Rect};
//! use scrollbox_widgets::layout::MonoLayout;
//! use scrollbox_widgets::surface::MemoryDevice;
//! use scrollbox_widgets::list;
//!
//! let mut gfx = MemoryDevice::new(320, 200);
//! let layout = MonoLayout::new();
//!
//! let mut menu = list::Model::new(Rect::new(16, 16, 240, 120), 12);
//! for entry in ["New game", "Load game", "Options", "Quit"] {
//!     menu.push_back(entry);
//! }
//! menu.show();
//! menu.present(&mut gfx, &layout);
//!
//! // A click on the third row selects it.
//! menu.mouse_down(Point::new(20, 16 + 2 * 12 + 3));
//! assert_eq!(menu.selected_index(), Some(2));
//! ```

pub mod content;
pub mod keys;

mod model;
mod rendering;
mod types;

pub use content::{Row, RowBuffer};
pub use keys::ListKeyMap;
pub use model::{new, Model};
pub use types::{ListDelegate, ListState};

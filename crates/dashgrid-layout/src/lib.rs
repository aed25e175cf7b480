//! Layout reflow for dashgrid.
//!
//! This crate holds the pure functions that turn a layout plus a proposed
//! change into a new collision-free, compacted layout.
//!
//! # Architecture
//!
//! 1. **Collision**: overlap tests between items
//! 2. **Compaction**: settle items as far up (or left) as collisions allow
//! 3. **Mutation handlers**: move, resize, and column-count changes, each
//!    followed by compaction
//! 4. **Diff**: which items appeared, disappeared, or changed
//! 5. **Geometry**: conversions between pixels and grid cells
//! 6. **Responsive**: breakpoint lookups and per-breakpoint layouts
//!
//! # Example
//!
//! ```
//! use dashgrid_core::{GridConfig, LayoutItem};
//! use dashgrid_layout::move_item;
//!
//! let layout = vec![
//!     LayoutItem::new("a", 0, 0, 2, 2),
//!     LayoutItem::new("b", 0, 2, 2, 2),
//! ];
//! let layout = move_item(&layout, "a", 0, 5, &GridConfig::new(12));
//!
//! assert_eq!(layout[0].y, 2);
//! assert_eq!(layout[1].y, 0);
//! ```

mod collision;
mod compact;
mod diff;
mod geometry;
mod mutate;
mod responsive;
mod validate;

pub use collision::{all_collisions, bottom, clearance_below, collides, first_collision, statics};
pub use compact::{compact, compact_with, correct_bounds, sort_layout_items};
pub use diff::{changed_items, diff, updated_items};
pub use geometry::{GridGeometry, PixelRect};
pub use mutate::{apply_mutation, change_columns, move_item, resize_item, Mutation};
pub use responsive::{responsive_layout, Breakpoint, Breakpoints};
pub use validate::validate_layout;

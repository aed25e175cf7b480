//! Stateful widgets over the dashgrid reflow core.
//!
//! A [`GridContainer`] owns the layout and an [`EventBus`](dashgrid_bus::EventBus).
//! [`GridItem`] handles, one per rendered item, translate pointer positions
//! into grid cells and publish them as intents. The container answers each
//! intent by running the layout handlers and publishing what moved.
//!
//! ```
//! use dashgrid_core::{GridConfig, LayoutItem};
//! use dashgrid_widget::GridContainer;
//! use glam::Vec2;
//!
//! let config = GridConfig::new(12)
//!     .with_container_width(1330.0)
//!     .with_row_height(50.0);
//! let container = GridContainer::new(
//!     config,
//!     vec![LayoutItem::new("a", 0, 0, 2, 2), LayoutItem::new("b", 0, 2, 2, 2)],
//! )
//! .unwrap();
//!
//! let a = container.item("a").unwrap();
//! a.drag_start(Vec2::new(50.0, 50.0));
//! a.drag_move(Vec2::new(50.0, 350.0));
//! a.drag_end(Vec2::new(50.0, 350.0));
//!
//! assert_eq!(a.item().y, 2);
//! assert_eq!(container.item("b").unwrap().item().y, 0);
//! ```

mod container;
mod item;

pub use container::GridContainer;
pub use item::GridItem;

//! Typed publish/subscribe channel for dashgrid.
//!
//! A container creates one [`EventBus`] and hands clones to its items. Items
//! publish drag and resize intents; the container publishes configuration
//! changes and per-item updates; the embedding application listens for
//! committed layout changes. Nobody talks to a sibling directly.

mod bus;
mod events;

pub use bus::{EventBus, Listener, ListenerId, Subscription};
pub use events::{
    BreakpointChange, GeometryChange, GridEvent, ItemDragEvent, ItemResizeEvent, Phase, Topic,
};

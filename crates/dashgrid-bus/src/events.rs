//! Event kinds carried on the bus.

use dashgrid_core::{GridRect, ItemId, Layout, LayoutItem};
use glam::Vec2;

/// Subscription key: one per [`GridEvent`] variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Topic {
    ItemDrag,
    ItemResize,
    ColNum,
    RowHeight,
    Margin,
    Draggable,
    Resizable,
    Bounded,
    TransformScale,
    MaxRows,
    ContainerWidth,
    Breakpoint,
    ItemUpdated,
    LayoutChanged,
    ItemMoved,
    ItemResized,
}

/// Stage of a pointer interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum Phase {
    Start,
    Move,
    End,
}

/// An item asks the container to move it; `rect` is the proposed cell.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemDragEvent {
    pub phase: Phase,
    pub id: ItemId,
    pub rect: GridRect,
}

/// An item asks the container to resize it; `rect` is the proposed size.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemResizeEvent {
    pub phase: Phase,
    pub id: ItemId,
    pub rect: GridRect,
}

/// Before/after geometry of one item across a committed interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeometryChange {
    pub id: ItemId,
    pub before: GridRect,
    pub after: GridRect,
}

/// The container switched breakpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BreakpointChange {
    pub breakpoint: String,
    pub cols: u32,
}

/// Everything that travels on the bus.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GridEvent {
    // Item intents, consumed by the container.
    ItemDrag(ItemDragEvent),
    ItemResize(ItemResizeEvent),

    // Container state, mirrored by items.
    ColNum(u32),
    RowHeight(f32),
    Margin(Vec2),
    Draggable(bool),
    Resizable(bool),
    Bounded(bool),
    TransformScale(f32),
    MaxRows(Option<u32>),
    ContainerWidth(f32),
    Breakpoint(BreakpointChange),
    ItemUpdated(LayoutItem),

    // Notifications for the embedding application.
    LayoutChanged(Layout),
    ItemMoved(GeometryChange),
    ItemResized(GeometryChange),
}

impl GridEvent {
    /// The topic listeners subscribe to for this event.
    pub fn topic(&self) -> Topic {
        match self {
            GridEvent::ItemDrag(_) => Topic::ItemDrag,
            GridEvent::ItemResize(_) => Topic::ItemResize,
            GridEvent::ColNum(_) => Topic::ColNum,
            GridEvent::RowHeight(_) => Topic::RowHeight,
            GridEvent::Margin(_) => Topic::Margin,
            GridEvent::Draggable(_) => Topic::Draggable,
            GridEvent::Resizable(_) => Topic::Resizable,
            GridEvent::Bounded(_) => Topic::Bounded,
            GridEvent::TransformScale(_) => Topic::TransformScale,
            GridEvent::MaxRows(_) => Topic::MaxRows,
            GridEvent::ContainerWidth(_) => Topic::ContainerWidth,
            GridEvent::Breakpoint(_) => Topic::Breakpoint,
            GridEvent::ItemUpdated(_) => Topic::ItemUpdated,
            GridEvent::LayoutChanged(_) => Topic::LayoutChanged,
            GridEvent::ItemMoved(_) => Topic::ItemMoved,
            GridEvent::ItemResized(_) => Topic::ItemResized,
        }
    }
}

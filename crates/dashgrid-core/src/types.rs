//! Core value types for grid layouts.

use std::fmt;

/// Identity of a layout item, unique within a layout.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ItemId(pub String);

impl ItemId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ItemId {
    fn from(s: &str) -> Self {
        ItemId(s.to_string())
    }
}

impl From<String> for ItemId {
    fn from(s: String) -> Self {
        ItemId(s)
    }
}

impl AsRef<str> for ItemId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for ItemId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for ItemId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A rectangle in grid units: columns horizontally, rows vertically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridRect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl GridRect {
    pub const fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    /// First column past the right edge.
    pub fn right(&self) -> u32 {
        self.x.saturating_add(self.w)
    }

    /// First row past the bottom edge.
    pub fn bottom(&self) -> u32 {
        self.y.saturating_add(self.h)
    }

    /// Half-open overlap test on both axes.
    pub fn overlaps(&self, other: &GridRect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

/// A rectangle placed on the grid, plus its resize bounds and behavior flags.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct LayoutItem {
    pub i: ItemId,
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub min_w: Option<u32>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub min_h: Option<u32>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub max_w: Option<u32>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub max_h: Option<u32>,
    /// Immovable obstacle: never dragged, resized, or displaced by compaction.
    #[cfg_attr(feature = "serde", serde(rename = "static", default))]
    pub is_static: bool,
    /// Per-item override of the container's draggable default.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub is_draggable: Option<bool>,
    /// Per-item override of the container's resizable default.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub is_resizable: Option<bool>,
    /// Set by compaction when the position changed during the last recompute.
    #[cfg_attr(feature = "serde", serde(default))]
    pub moved: bool,
}

impl LayoutItem {
    /// Create an item at `(x, y)` spanning `w` columns and `h` rows.
    pub fn new(i: impl Into<ItemId>, x: u32, y: u32, w: u32, h: u32) -> Self {
        Self {
            i: i.into(),
            x,
            y,
            w,
            h,
            ..Default::default()
        }
    }

    /// Set the minimum size.
    pub fn with_min_size(mut self, w: u32, h: u32) -> Self {
        self.min_w = Some(w);
        self.min_h = Some(h);
        self
    }

    /// Set the maximum size.
    pub fn with_max_size(mut self, w: u32, h: u32) -> Self {
        self.max_w = Some(w);
        self.max_h = Some(h);
        self
    }

    /// Set the width bounds only.
    pub fn with_width_bounds(mut self, min: u32, max: u32) -> Self {
        self.min_w = Some(min);
        self.max_w = Some(max);
        self
    }

    /// Mark the item static.
    pub fn pinned(mut self) -> Self {
        self.is_static = true;
        self
    }

    pub fn with_draggable(mut self, draggable: bool) -> Self {
        self.is_draggable = Some(draggable);
        self
    }

    pub fn with_resizable(mut self, resizable: bool) -> Self {
        self.is_resizable = Some(resizable);
        self
    }

    pub fn rect(&self) -> GridRect {
        GridRect::new(self.x, self.y, self.w, self.h)
    }

    pub fn right(&self) -> u32 {
        self.rect().right()
    }

    pub fn bottom(&self) -> u32 {
        self.rect().bottom()
    }

    /// Whether the item may be dragged, given the container default.
    pub fn draggable(&self, default: bool) -> bool {
        !self.is_static && self.is_draggable.unwrap_or(default)
    }

    /// Whether the item may be resized, given the container default.
    pub fn resizable(&self, default: bool) -> bool {
        !self.is_static && self.is_resizable.unwrap_or(default)
    }

    /// Clamp a proposed width to this item's bounds (and to at least 1).
    pub fn clamp_width(&self, w: i64) -> u32 {
        clamp_span(w, self.min_w, self.max_w)
    }

    /// Clamp a proposed height to this item's bounds (and to at least 1).
    pub fn clamp_height(&self, h: i64) -> u32 {
        clamp_span(h, self.min_h, self.max_h)
    }
}

fn clamp_span(value: i64, min: Option<u32>, max: Option<u32>) -> u32 {
    let mut value = value;
    if let Some(max) = max {
        value = value.min(i64::from(max));
    }
    if let Some(min) = min {
        value = value.max(i64::from(min));
    }
    value.clamp(1, i64::from(u32::MAX)) as u32
}

/// An ordered sequence of items; order is insertion order, not spatial order.
pub type Layout = Vec<LayoutItem>;

/// Find an item by id.
pub fn get_layout_item<'a>(layout: &'a [LayoutItem], id: &str) -> Option<&'a LayoutItem> {
    layout.iter().find(|item| item.i == id)
}

/// Position of an item by id.
pub fn item_index(layout: &[LayoutItem], id: &str) -> Option<usize> {
    layout.iter().position(|item| item.i == id)
}

/// Clear the transient `moved` marker on every item.
pub fn clear_moved(layout: &mut [LayoutItem]) {
    for item in layout.iter_mut() {
        item.moved = false;
    }
}

/// The in-progress rectangle of an item being dragged or resized.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Placeholder {
    pub i: ItemId,
    pub rect: GridRect,
}

impl Placeholder {
    pub fn from_item(item: &LayoutItem) -> Self {
        Self {
            i: item.i.clone(),
            rect: item.rect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_overlap_is_half_open() {
        let a = GridRect::new(0, 0, 2, 2);
        assert!(a.overlaps(&GridRect::new(1, 1, 2, 2)));
        assert!(!a.overlaps(&GridRect::new(2, 0, 2, 2)));
        assert!(!a.overlaps(&GridRect::new(0, 2, 2, 2)));
    }

    #[test]
    fn test_clamp_width_respects_bounds() {
        let item = LayoutItem::new("a", 0, 0, 4, 1).with_width_bounds(2, 6);
        assert_eq!(item.clamp_width(10), 6);
        assert_eq!(item.clamp_width(1), 2);
        assert_eq!(item.clamp_width(3), 3);
    }

    #[test]
    fn test_clamp_never_below_one() {
        let item = LayoutItem::new("a", 0, 0, 4, 1);
        assert_eq!(item.clamp_width(-3), 1);
        assert_eq!(item.clamp_height(0), 1);
    }

    #[test]
    fn test_static_items_are_never_draggable() {
        let item = LayoutItem::new("a", 0, 0, 1, 1).pinned().with_draggable(true);
        assert!(!item.draggable(true));
        assert!(!item.resizable(true));

        let item = LayoutItem::new("b", 0, 0, 1, 1).with_draggable(false);
        assert!(!item.draggable(true));
        assert!(item.resizable(true));
    }

    #[test]
    fn test_lookup_by_id() {
        let layout = vec![LayoutItem::new("a", 0, 0, 1, 1), LayoutItem::new("b", 1, 0, 1, 1)];
        assert_eq!(get_layout_item(&layout, "b").map(|i| i.x), Some(1));
        assert_eq!(item_index(&layout, "b"), Some(1));
        assert!(get_layout_item(&layout, "zzz").is_none());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_item_json_shape() {
        let json = r#"{"i":"a","x":1,"y":2,"w":3,"h":4,"minW":2,"static":true,"isDraggable":false}"#;
        let item: LayoutItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.i, "a");
        assert_eq!(item.rect(), GridRect::new(1, 2, 3, 4));
        assert_eq!(item.min_w, Some(2));
        assert!(item.is_static);
        assert_eq!(item.is_draggable, Some(false));
        assert!(!item.moved);

        let back = serde_json::to_value(&item).unwrap();
        assert_eq!(back["static"], true);
        assert!(back.get("maxW").is_none());
    }
}

//! Layout mutation handlers.
//!
//! Each handler edits the affected item(s) directly and then compacts. They
//! are pure: the same inputs always give the same layout, and the input layout
//! is never modified. Out-of-range proposals are clamped; unknown ids and
//! static targets leave the layout as it was.

use dashgrid_core::{item_index, CompactMode, GridConfig, ItemId, Layout, LayoutItem};

use crate::collision::first_collision;
use crate::compact::compact_with;

/// A proposed change to a layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    /// Put the item's top-left corner at a grid cell.
    Move { id: ItemId, x: i64, y: i64 },
    /// Give the item a new size in cells.
    Resize { id: ItemId, w: i64, h: i64 },
    /// Rescale every item from `from` columns to `to` columns.
    Columns { from: u32, to: u32 },
}

/// Apply a mutation with the matching handler.
pub fn apply_mutation(layout: &[LayoutItem], mutation: &Mutation, config: &GridConfig) -> Layout {
    match mutation {
        Mutation::Move { id, x, y } => move_item(layout, id.as_str(), *x, *y, config),
        Mutation::Resize { id, w, h } => resize_item(layout, id.as_str(), *w, *h, config),
        Mutation::Columns { from, to } => change_columns(layout, *from, *to, config.compact_mode),
    }
}

/// Move an item to the grid cell `(x, y)` and compact.
///
/// `x` is clamped to `[0, cols - w]`; `y` to `[0, max_rows - h]`, or just to
/// non-negative when rows are unbounded. With `prevent_collision` set, a move
/// that would overlap another item is refused.
pub fn move_item(layout: &[LayoutItem], id: &str, x: i64, y: i64, config: &GridConfig) -> Layout {
    let Some(index) = target_index(layout, id, "move") else {
        return layout.to_vec();
    };

    let mut next = layout.to_vec();
    {
        let item = &mut next[index];
        let max_x = config.col_num.max(1).saturating_sub(item.w);
        let max_y = config.max_y_for(item.h).unwrap_or(u32::MAX);
        item.x = x.clamp(0, i64::from(max_x)) as u32;
        item.y = y.clamp(0, i64::from(max_y)) as u32;
    }

    if config.prevent_collision && first_collision(&next, &next[index]).is_some() {
        log::debug!("move of '{}' refused: would collide", id);
        return layout.to_vec();
    }

    compact_with(&next, config.compact_mode)
}

/// Resize an item to `w` by `h` cells and compact.
///
/// The size is clamped to the item's min/max bounds, then to the columns
/// remaining right of the item (and to `max_rows`), and never drops below one
/// cell. With `prevent_collision` set, a resize that would overlap another
/// item is refused.
pub fn resize_item(layout: &[LayoutItem], id: &str, w: i64, h: i64, config: &GridConfig) -> Layout {
    let Some(index) = target_index(layout, id, "resize") else {
        return layout.to_vec();
    };

    let mut next = layout.to_vec();
    {
        let item = &mut next[index];
        let room_w = config.col_num.max(1).saturating_sub(item.x).max(1);
        item.w = item.clamp_width(w).min(room_w);
        item.h = item.clamp_height(h);
        if let Some(rows) = config.max_rows {
            item.h = item.h.min(rows.saturating_sub(item.y).max(1));
        }
    }

    if config.prevent_collision && first_collision(&next, &next[index]).is_some() {
        log::debug!("resize of '{}' refused: would collide", id);
        return layout.to_vec();
    }

    compact_with(&next, config.compact_mode)
}

/// Rescale every item from `from` columns to `to` columns and compact.
///
/// `x` and `w` scale by `to / from` with rounding. Widths are then clamped to
/// the item's bounds and to the new column count, and `x` is pulled in so the
/// item ends inside the grid. Rows are untouched until compaction.
pub fn change_columns(layout: &[LayoutItem], from: u32, to: u32, mode: CompactMode) -> Layout {
    let to = to.max(1);
    let from = from.max(1);
    let ratio = f64::from(to) / f64::from(from);

    let rescaled: Layout = layout
        .iter()
        .map(|item| {
            let mut item = item.clone();
            let x = (f64::from(item.x) * ratio).round() as i64;
            let w = (f64::from(item.w) * ratio).round() as i64;
            item.w = item.clamp_width(w).min(to);
            item.x = (x.max(0) as u32).min(to - item.w);
            item
        })
        .collect();

    log::debug!("rescaled {} items from {} to {} columns", rescaled.len(), from, to);
    compact_with(&rescaled, mode)
}

fn target_index(layout: &[LayoutItem], id: &str, action: &str) -> Option<usize> {
    match item_index(layout, id) {
        None => {
            log::debug!("{} ignored: no item with id '{}'", action, id);
            None
        }
        Some(index) if layout[index].is_static => {
            log::debug!("{} ignored: item '{}' is static", action, id);
            None
        }
        Some(index) => Some(index),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dashgrid_core::get_layout_item;

    fn item<'a>(layout: &'a [LayoutItem], id: &str) -> &'a LayoutItem {
        get_layout_item(layout, id).unwrap()
    }

    #[test]
    fn test_move_clamps_to_columns() {
        let config = GridConfig::new(12);
        let layout = vec![LayoutItem::new("a", 2, 0, 4, 1)];

        let left = move_item(&layout, "a", -5, 0, &config);
        assert_eq!(item(&left, "a").x, 0);

        let right = move_item(&layout, "a", 20, 0, &config);
        assert_eq!(item(&right, "a").x, 8);
    }

    #[test]
    fn test_move_then_compact_settles_below_neighbor() {
        let config = GridConfig::new(12);
        let layout = vec![
            LayoutItem::new("a", 0, 0, 2, 2),
            LayoutItem::new("b", 0, 2, 2, 2),
        ];
        let out = move_item(&layout, "a", 0, 5, &config);
        assert_eq!(item(&out, "a").y, 2);
        assert_eq!(item(&out, "b").y, 0);
        assert!(item(&out, "a").moved);
    }

    #[test]
    fn test_move_without_vertical_compact_keeps_row() {
        let config = GridConfig::new(12).with_vertical_compact(false);
        let layout = vec![LayoutItem::new("a", 0, 0, 2, 2)];
        let out = move_item(&layout, "a", 3, 7, &config);
        assert_eq!((item(&out, "a").x, item(&out, "a").y), (3, 7));
    }

    #[test]
    fn test_move_respects_max_rows() {
        let config = GridConfig::new(12).with_vertical_compact(false).with_max_rows(6);
        let layout = vec![LayoutItem::new("a", 0, 0, 1, 2)];
        let out = move_item(&layout, "a", 0, 50, &config);
        assert_eq!(item(&out, "a").y, 4);
    }

    #[test]
    fn test_move_unknown_or_static_is_noop() {
        let config = GridConfig::new(12);
        let layout = vec![
            LayoutItem::new("a", 0, 0, 2, 2).pinned(),
            LayoutItem::new("b", 2, 0, 2, 2),
        ];
        assert_eq!(move_item(&layout, "ghost", 4, 4, &config), layout);
        assert_eq!(move_item(&layout, "a", 4, 4, &config), layout);
    }

    #[test]
    fn test_prevent_collision_refuses_overlapping_move() {
        let config = GridConfig::new(12).with_prevent_collision(true);
        let layout = vec![
            LayoutItem::new("a", 0, 0, 2, 2),
            LayoutItem::new("b", 2, 0, 2, 2),
        ];
        assert_eq!(move_item(&layout, "a", 1, 0, &config), layout);

        let out = move_item(&layout, "a", 6, 0, &config);
        assert_eq!(item(&out, "a").x, 6);
    }

    #[test]
    fn test_resize_clamps_to_bounds() {
        let config = GridConfig::new(12);
        let layout = vec![LayoutItem::new("a", 0, 0, 4, 2).with_width_bounds(2, 6)];

        let out = resize_item(&layout, "a", 10, 2, &config);
        assert_eq!(item(&out, "a").w, 6);

        let out = resize_item(&layout, "a", 1, 2, &config);
        assert_eq!(item(&out, "a").w, 2);
    }

    #[test]
    fn test_resize_clamps_to_remaining_columns() {
        let config = GridConfig::new(12);
        let layout = vec![LayoutItem::new("a", 9, 0, 2, 2)];
        let out = resize_item(&layout, "a", 8, 0, &config);
        assert_eq!((item(&out, "a").w, item(&out, "a").h), (3, 1));
    }

    #[test]
    fn test_resize_pushes_neighbors_down() {
        let config = GridConfig::new(12);
        let layout = vec![
            LayoutItem::new("a", 0, 0, 2, 1),
            LayoutItem::new("b", 0, 1, 2, 1),
        ];
        let out = resize_item(&layout, "a", 2, 3, &config);
        assert_eq!(item(&out, "a").h, 3);
        assert_eq!(item(&out, "b").y, 3);
    }

    #[test]
    fn test_change_columns_rescales_and_refits() {
        let layout = vec![
            LayoutItem::new("a", 6, 0, 4, 1),
            LayoutItem::new("b", 0, 0, 6, 1),
        ];
        let out = change_columns(&layout, 12, 6, CompactMode::Vertical);
        let a = item(&out, "a");
        assert_eq!((a.x, a.w), (3, 2));
        assert!(a.x + a.w <= 6);
        let b = item(&out, "b");
        assert_eq!((b.x, b.w), (0, 3));
    }

    #[test]
    fn test_change_columns_honors_min_width() {
        let layout = vec![LayoutItem::new("a", 10, 0, 2, 1).with_width_bounds(2, 12)];
        let out = change_columns(&layout, 12, 4, CompactMode::Vertical);
        let a = item(&out, "a");
        assert_eq!(a.w, 2);
        assert_eq!(a.x, 2);
    }

    #[test]
    fn test_handlers_are_deterministic() {
        let config = GridConfig::new(12);
        let layout = vec![
            LayoutItem::new("a", 0, 0, 3, 2),
            LayoutItem::new("b", 3, 0, 3, 4),
            LayoutItem::new("c", 0, 2, 6, 1),
        ];
        let mutation = Mutation::Move { id: "c".into(), x: 4, y: 0 };
        let first = apply_mutation(&layout, &mutation, &config);
        let second = apply_mutation(&layout, &mutation, &config);
        assert_eq!(first, second);
    }
}

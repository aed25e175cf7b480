//! Compaction: settle every item as far up (or left) as collisions allow.
//!
//! Static items are settled first and never move. The remaining items are
//! visited in row-major order (column-major for horizontal compaction), ties
//! broken by layout order, and each one becomes an obstacle for the items
//! visited after it. Every visited item is first pushed down past anything it
//! overlaps, then floated toward the origin one cell at a time until the next
//! cell is blocked.
//!
//! Because an item only stops floating when a cell is blocked by something
//! that sorts before it, running compaction on its own output settles every
//! item exactly where it already is.

use dashgrid_core::{CompactMode, Layout, LayoutItem};

use crate::collision::{bottom, first_collision};

/// Compact a layout, floating items up when `vertical_compact` is set.
///
/// With vertical compaction off, items keep their rows unless they overlap
/// something, in which case they are pushed down.
pub fn compact(layout: &[LayoutItem], vertical_compact: bool) -> Layout {
    compact_with(layout, CompactMode::from_vertical(vertical_compact))
}

/// Compact a layout with an explicit mode.
///
/// The output has the same items in the same order; only `x`, `y`, and
/// `moved` differ from the input.
pub fn compact_with(layout: &[LayoutItem], mode: CompactMode) -> Layout {
    let mut settled: Vec<LayoutItem> = layout.iter().filter(|item| item.is_static).cloned().collect();
    let mut out = layout.to_vec();

    for index in visit_order(layout, mode) {
        let original = &layout[index];
        let mut item = original.clone();
        settle(&mut item, &settled, mode);
        item.moved = item.x != original.x || item.y != original.y;
        settled.push(item.clone());
        out[index] = item;
    }

    for item in out.iter_mut().filter(|item| item.is_static) {
        item.moved = false;
    }

    log::trace!(
        "compacted {} items ({:?}), {} moved",
        out.len(),
        mode,
        out.iter().filter(|item| item.moved).count()
    );
    out
}

/// Items sorted by row then column (or column then row for horizontal mode).
///
/// The sort is stable, so items sharing a cell keep their layout order.
pub fn sort_layout_items(layout: &[LayoutItem], mode: CompactMode) -> Layout {
    let mut sorted = layout.to_vec();
    match mode {
        CompactMode::Horizontal => sorted.sort_by_key(|item| (item.x, item.y)),
        CompactMode::Vertical | CompactMode::None => sorted.sort_by_key(|item| (item.y, item.x)),
    }
    sorted
}

/// Pull items back inside a grid of `cols` columns.
///
/// Widths wider than the grid shrink to the grid; items hanging off the right
/// edge shift left. Rows are untouched.
pub fn correct_bounds(layout: &[LayoutItem], cols: u32) -> Layout {
    let cols = cols.max(1);
    layout
        .iter()
        .map(|item| {
            let mut item = item.clone();
            item.w = item.w.clamp(1, cols);
            if item.right() > cols {
                item.x = cols - item.w;
            }
            item
        })
        .collect()
}

fn visit_order(layout: &[LayoutItem], mode: CompactMode) -> Vec<usize> {
    let mut order: Vec<usize> = (0..layout.len()).filter(|&i| !layout[i].is_static).collect();
    match mode {
        CompactMode::Horizontal => order.sort_by_key(|&i| (layout[i].x, layout[i].y)),
        CompactMode::Vertical | CompactMode::None => order.sort_by_key(|&i| (layout[i].y, layout[i].x)),
    }
    order
}

fn settle(item: &mut LayoutItem, settled: &[LayoutItem], mode: CompactMode) {
    if mode == CompactMode::Vertical {
        // Every row from the current bottom down is free.
        item.y = item.y.min(bottom(settled));
    }

    while let Some(hit) = first_collision(settled, item) {
        item.y = hit.bottom();
    }

    match mode {
        CompactMode::Vertical => {
            while item.y > 0 && fits_at(item, settled, item.x, item.y - 1) {
                item.y -= 1;
            }
        }
        CompactMode::Horizontal => {
            while item.x > 0 && fits_at(item, settled, item.x - 1, item.y) {
                item.x -= 1;
            }
        }
        CompactMode::None => {}
    }
}

fn fits_at(item: &LayoutItem, settled: &[LayoutItem], x: u32, y: u32) -> bool {
    let mut candidate = item.clone();
    candidate.x = x;
    candidate.y = y;
    first_collision(settled, &candidate).is_none()
}

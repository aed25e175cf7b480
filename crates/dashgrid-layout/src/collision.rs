//! Overlap tests between items.

use dashgrid_core::LayoutItem;
use smallvec::SmallVec;

/// Whether two items overlap.
///
/// Rectangles are half-open, so items that merely touch along an edge do not
/// collide. An item never collides with itself (same `i`).
pub fn collides(a: &LayoutItem, b: &LayoutItem) -> bool {
    if a.i == b.i {
        return false;
    }
    a.rect().overlaps(&b.rect())
}

/// First item in `layout` that collides with `item`.
pub fn first_collision<'a>(layout: &'a [LayoutItem], item: &LayoutItem) -> Option<&'a LayoutItem> {
    layout.iter().find(|other| collides(item, other))
}

/// Every item in `layout` that collides with `item`, in layout order.
pub fn all_collisions<'a>(
    layout: &'a [LayoutItem],
    item: &LayoutItem,
) -> SmallVec<[&'a LayoutItem; 4]> {
    layout.iter().filter(|other| collides(item, other)).collect()
}

/// Row just below the lowest item; zero for an empty layout.
pub fn bottom(layout: &[LayoutItem]) -> u32 {
    layout.iter().map(LayoutItem::bottom).max().unwrap_or(0)
}

/// Static items of a layout, in layout order.
pub fn statics(layout: &[LayoutItem]) -> Vec<&LayoutItem> {
    layout.iter().filter(|item| item.is_static).collect()
}

/// Smallest `y` that clears `item` of `obstacle` by moving it down.
///
/// Returns `None` when the two do not collide.
pub fn clearance_below(item: &LayoutItem, obstacle: &LayoutItem) -> Option<u32> {
    collides(item, obstacle).then(|| obstacle.bottom())
}

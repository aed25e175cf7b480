//! Layout comparison.

use std::collections::HashSet;

use dashgrid_core::{get_layout_item, ItemId, Layout, LayoutItem};

/// Items present in exactly one of the two layouts, compared by id.
///
/// Returns the items only in `a` followed by the items only in `b`, each in
/// their layout's order. Two items with the same id count as unchanged even if
/// their geometry differs; see [`changed_items`] for that.
pub fn diff(a: &[LayoutItem], b: &[LayoutItem]) -> Layout {
    let ids_a: HashSet<&ItemId> = a.iter().map(|item| &item.i).collect();
    let ids_b: HashSet<&ItemId> = b.iter().map(|item| &item.i).collect();

    a.iter()
        .filter(|item| !ids_b.contains(&item.i))
        .chain(b.iter().filter(|item| !ids_a.contains(&item.i)))
        .cloned()
        .collect()
}

/// Items of `after` whose rectangle differs from the item with the same id in
/// `before`, plus items of `after` that `before` does not have.
pub fn changed_items(before: &[LayoutItem], after: &[LayoutItem]) -> Layout {
    after
        .iter()
        .filter(|item| {
            get_layout_item(before, item.i.as_str())
                .map_or(true, |old| old.rect() != item.rect())
        })
        .cloned()
        .collect()
}

/// Items of `after` that differ from the item with the same id in `before` in
/// any field but `moved`, plus items of `after` that `before` does not have.
pub fn updated_items(before: &[LayoutItem], after: &[LayoutItem]) -> Layout {
    after
        .iter()
        .filter(|item| {
            get_layout_item(before, item.i.as_str()).map_or(true, |old| !same_item(old, item))
        })
        .cloned()
        .collect()
}

fn same_item(a: &LayoutItem, b: &LayoutItem) -> bool {
    let a = LayoutItem {
        moved: b.moved,
        ..a.clone()
    };
    a == *b
}

//! Optional precondition checks for caller-supplied layouts.
//!
//! Nothing in the engine calls this; layouts are taken as given. Embedders
//! that load layouts from storage can run it to catch bad data early.

use std::collections::HashMap;

use dashgrid_core::{ItemId, LayoutItem, ValidationError};

/// Report the first duplicate id, zero-sized item, or inverted bound.
pub fn validate_layout(layout: &[LayoutItem]) -> Result<(), ValidationError> {
    let mut seen: HashMap<&ItemId, usize> = HashMap::with_capacity(layout.len());

    for (index, item) in layout.iter().enumerate() {
        if let Some(&first) = seen.get(&item.i) {
            return Err(ValidationError::DuplicateId {
                id: item.i.clone(),
                first,
                second: index,
            });
        }
        seen.insert(&item.i, index);

        if item.w == 0 {
            return Err(ValidationError::ZeroSize {
                id: item.i.clone(),
                axis: "width",
            });
        }
        if item.h == 0 {
            return Err(ValidationError::ZeroSize {
                id: item.i.clone(),
                axis: "height",
            });
        }
        check_bounds(item, "width", item.min_w, item.max_w)?;
        check_bounds(item, "height", item.min_h, item.max_h)?;
    }

    Ok(())
}

fn check_bounds(
    item: &LayoutItem,
    axis: &'static str,
    min: Option<u32>,
    max: Option<u32>,
) -> Result<(), ValidationError> {
    match (min, max) {
        (Some(min), Some(max)) if min > max => Err(ValidationError::InvertedBounds {
            id: item.i.clone(),
            axis,
            min,
            max,
        }),
        _ => Ok(()),
    }
}

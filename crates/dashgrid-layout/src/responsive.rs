//! Breakpoint tables and per-breakpoint layouts.

use dashgrid_core::{get_layout_item, BreakpointError, CompactMode, Layout, LayoutItem};
use indexmap::IndexMap;

use crate::compact::{compact_with, correct_bounds};
use crate::diff::diff;
use crate::mutate::change_columns;

/// A named container-width threshold and the column count used above it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Breakpoint {
    pub min_width: f32,
    pub cols: u32,
}

/// Lookup table from breakpoint name to width threshold and column count.
#[derive(Debug, Clone, PartialEq)]
pub struct Breakpoints {
    entries: IndexMap<String, Breakpoint>,
}

impl Default for Breakpoints {
    fn default() -> Self {
        Self::new()
            .with("lg", 1200.0, 12)
            .with("md", 996.0, 10)
            .with("sm", 768.0, 6)
            .with("xs", 480.0, 4)
            .with("xxs", 0.0, 2)
    }
}

impl Breakpoints {
    /// Create an empty table.
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    /// Add or replace a breakpoint.
    pub fn with(mut self, name: impl Into<String>, min_width: f32, cols: u32) -> Self {
        self.insert(name, min_width, cols);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, min_width: f32, cols: u32) {
        self.entries.insert(name.into(), Breakpoint { min_width, cols });
        self.entries
            .sort_by(|_, a, _, b| a.min_width.total_cmp(&b.min_width));
    }

    pub fn get(&self, name: &str) -> Option<Breakpoint> {
        self.entries.get(name).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Breakpoint names, narrowest first.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// The widest breakpoint whose threshold `width` exceeds.
    ///
    /// Falls back to the narrowest breakpoint when `width` exceeds none.
    pub fn breakpoint_for_width(&self, width: f32) -> Result<&str, BreakpointError> {
        let mut entries = self.entries.iter();
        let (first, _) = entries.next().ok_or(BreakpointError::Empty)?;
        let matching = entries
            .filter(|(_, bp)| width > bp.min_width)
            .map(|(name, _)| name)
            .last()
            .unwrap_or(first);
        Ok(matching.as_str())
    }

    /// Column count of a breakpoint.
    pub fn cols_for(&self, name: &str) -> Result<u32, BreakpointError> {
        self.get(name)
            .map(|bp| bp.cols)
            .ok_or_else(|| BreakpointError::Unknown {
                name: name.to_string(),
            })
    }
}

/// Layout to show when switching from `from` to the breakpoint `to`.
///
/// A layout previously stored for `to` is reused, with items that no longer
/// exist dropped and new items taken from `current`. Without a stored layout,
/// `current` is rescaled from the old column count. Either way the result is
/// fitted to the new columns and compacted.
pub fn responsive_layout(
    stored: &IndexMap<String, Layout>,
    breakpoints: &Breakpoints,
    from: &str,
    to: &str,
    current: &[LayoutItem],
    mode: CompactMode,
) -> Result<Layout, BreakpointError> {
    let cols = breakpoints.cols_for(to)?;

    let Some(saved) = stored.get(to) else {
        let from_cols = breakpoints.cols_for(from)?;
        return Ok(change_columns(current, from_cols, cols, mode));
    };

    let mut layout: Layout = Vec::with_capacity(current.len());
    let mut added = Vec::new();
    for item in diff(saved, current) {
        if get_layout_item(saved, item.i.as_str()).is_none() {
            added.push(item);
        }
    }
    layout.extend(
        saved
            .iter()
            .filter(|item| get_layout_item(current, item.i.as_str()).is_some())
            .cloned(),
    );
    layout.extend(added);

    Ok(compact_with(&correct_bounds(&layout, cols), mode))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table() {
        let bps = Breakpoints::default();
        let names: Vec<_> = bps.names().collect();
        assert_eq!(names, vec!["xxs", "xs", "sm", "md", "lg"]);
        assert_eq!(bps.cols_for("md"), Ok(10));
    }

    #[test]
    fn test_breakpoint_for_width() {
        let bps = Breakpoints::default();
        assert_eq!(bps.breakpoint_for_width(1300.0), Ok("lg"));
        assert_eq!(bps.breakpoint_for_width(1200.0), Ok("md"));
        assert_eq!(bps.breakpoint_for_width(800.0), Ok("sm"));
        assert_eq!(bps.breakpoint_for_width(100.0), Ok("xxs"));
        assert_eq!(bps.breakpoint_for_width(0.0), Ok("xxs"));
    }

    #[test]
    fn test_breakpoint_errors() {
        assert_eq!(Breakpoints::new().breakpoint_for_width(10.0), Err(BreakpointError::Empty));
        assert_eq!(
            Breakpoints::default().cols_for("huge"),
            Err(BreakpointError::Unknown { name: "huge".into() })
        );
    }

    #[test]
    fn test_responsive_layout_rescales_without_stored_layout() {
        let current = vec![LayoutItem::new("a", 6, 0, 6, 1)];
        let out = responsive_layout(
            &IndexMap::new(),
            &Breakpoints::default(),
            "lg",
            "sm",
            &current,
            CompactMode::Vertical,
        )
        .unwrap();
        assert_eq!((out[0].x, out[0].w), (3, 3));
    }

    #[test]
    fn test_responsive_layout_restores_stored_layout() {
        let mut stored = IndexMap::new();
        stored.insert(
            "sm".to_string(),
            vec![
                LayoutItem::new("a", 0, 0, 6, 1),
                LayoutItem::new("gone", 0, 1, 2, 1),
            ],
        );
        let current = vec![
            LayoutItem::new("a", 0, 0, 4, 1),
            LayoutItem::new("new", 8, 0, 4, 1),
        ];
        let out = responsive_layout(
            &stored,
            &Breakpoints::default(),
            "lg",
            "sm",
            &current,
            CompactMode::Vertical,
        )
        .unwrap();

        let ids: Vec<_> = out.iter().map(|item| item.i.as_str()).collect();
        assert_eq!(ids, vec!["a", "new"]);
        assert_eq!(out[0].w, 6);
        // `new` is pulled inside six columns and lands below `a`.
        assert_eq!((out[1].x, out[1].y), (2, 1));
    }
}

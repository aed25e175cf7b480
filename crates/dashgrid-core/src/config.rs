//! Container-level grid configuration.

use glam::Vec2;

use crate::errors::ConfigError;

/// How compaction settles items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum CompactMode {
    /// Float items to the top.
    #[default]
    Vertical,
    /// Float items to the left.
    Horizontal,
    /// Only resolve collisions; leave gaps.
    None,
}

impl CompactMode {
    /// Mode for the boolean "vertical compact" switch.
    pub fn from_vertical(vertical_compact: bool) -> Self {
        if vertical_compact {
            Self::Vertical
        } else {
            Self::None
        }
    }
}

/// Grid configuration owned by the container.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
pub struct GridConfig {
    /// Number of columns
    pub col_num: u32,
    /// Height of one row in pixels
    pub row_height: f32,
    /// Horizontal and vertical spacing between items in pixels
    pub margin: Vec2,
    /// Width of the container in pixels
    pub container_width: f32,
    /// Rows available below the top edge, unbounded when `None`
    pub max_rows: Option<u32>,
    /// Compaction mode applied after every mutation
    pub compact_mode: CompactMode,
    /// Reject moves and resizes that would overlap another item
    pub prevent_collision: bool,
    /// Default drag permission for items without an override
    pub is_draggable: bool,
    /// Default resize permission for items without an override
    pub is_resizable: bool,
    /// Keep dragged items inside the container
    pub is_bounded: bool,
    /// CSS scale applied to the container; divides pointer deltas
    pub transform_scale: f32,
    /// Switch column counts by breakpoint when the width changes
    pub responsive: bool,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            col_num: 12,
            row_height: 150.0,
            margin: Vec2::new(10.0, 10.0),
            container_width: 1200.0,
            max_rows: None,
            compact_mode: CompactMode::Vertical,
            prevent_collision: false,
            is_draggable: true,
            is_resizable: true,
            is_bounded: false,
            transform_scale: 1.0,
            responsive: false,
        }
    }
}

impl GridConfig {
    /// Create a configuration with `col_num` columns and defaults elsewhere.
    pub fn new(col_num: u32) -> Self {
        Self {
            col_num,
            ..Default::default()
        }
    }

    pub fn with_row_height(mut self, row_height: f32) -> Self {
        self.row_height = row_height;
        self
    }

    pub fn with_margin(mut self, x: f32, y: f32) -> Self {
        self.margin = Vec2::new(x, y);
        self
    }

    pub fn with_container_width(mut self, width: f32) -> Self {
        self.container_width = width;
        self
    }

    pub fn with_max_rows(mut self, max_rows: u32) -> Self {
        self.max_rows = Some(max_rows);
        self
    }

    pub fn with_compact_mode(mut self, mode: CompactMode) -> Self {
        self.compact_mode = mode;
        self
    }

    /// Shorthand for the vertical-compact on/off switch.
    pub fn with_vertical_compact(mut self, enabled: bool) -> Self {
        self.compact_mode = CompactMode::from_vertical(enabled);
        self
    }

    pub fn with_prevent_collision(mut self, enabled: bool) -> Self {
        self.prevent_collision = enabled;
        self
    }

    pub fn with_bounded(mut self, bounded: bool) -> Self {
        self.is_bounded = bounded;
        self
    }

    pub fn with_transform_scale(mut self, scale: f32) -> Self {
        self.transform_scale = scale;
        self
    }

    pub fn with_responsive(mut self, responsive: bool) -> Self {
        self.responsive = responsive;
        self
    }

    /// Lowest row index an item of height `h` may start at, if rows are capped.
    pub fn max_y_for(&self, h: u32) -> Option<u32> {
        self.max_rows.map(|rows| rows.saturating_sub(h))
    }

    /// Check that every numeric field is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.col_num == 0 {
            return Err(ConfigError::ZeroColumns);
        }
        if !(self.row_height.is_finite() && self.row_height > 0.0) {
            return Err(ConfigError::InvalidRowHeight {
                value: self.row_height,
            });
        }
        if !(self.margin.is_finite() && self.margin.x >= 0.0 && self.margin.y >= 0.0) {
            return Err(ConfigError::InvalidMargin {
                x: self.margin.x,
                y: self.margin.y,
            });
        }
        if !(self.container_width.is_finite() && self.container_width >= 0.0) {
            return Err(ConfigError::InvalidContainerWidth {
                value: self.container_width,
            });
        }
        if !(self.transform_scale.is_finite() && self.transform_scale > 0.0) {
            return Err(ConfigError::InvalidTransformScale {
                value: self.transform_scale,
            });
        }
        if self.max_rows == Some(0) {
            return Err(ConfigError::ZeroMaxRows);
        }
        Ok(())
    }
}

//! JavaScript-facing shapes for the WASM bindings.

use dashgrid_bus::Topic;
use dashgrid_core::{CompactMode, GridConfig, GridRect};
use dashgrid_layout::{Breakpoints, PixelRect};
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Grid options from JavaScript. Missing fields keep their defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridConfigJs {
    #[serde(default)]
    pub col_num: Option<u32>,
    #[serde(default)]
    pub row_height: Option<f32>,
    /// `[horizontal, vertical]` gutter in pixels.
    #[serde(default)]
    pub margin: Option<[f32; 2]>,
    #[serde(default)]
    pub container_width: Option<f32>,
    #[serde(default)]
    pub max_rows: Option<u32>,
    /// Shorthand for `compactMode: "vertical"` or `"none"`.
    #[serde(default)]
    pub vertical_compact: Option<bool>,
    #[serde(default)]
    pub compact_mode: Option<CompactMode>,
    #[serde(default)]
    pub prevent_collision: Option<bool>,
    #[serde(default)]
    pub is_draggable: Option<bool>,
    #[serde(default)]
    pub is_resizable: Option<bool>,
    #[serde(default)]
    pub is_bounded: Option<bool>,
    #[serde(default)]
    pub transform_scale: Option<f32>,
    #[serde(default)]
    pub responsive: Option<bool>,
    /// Replaces the default breakpoint table when present.
    #[serde(default)]
    pub breakpoints: Option<Vec<BreakpointJs>>,
}

impl GridConfigJs {
    pub fn into_core(self) -> GridConfig {
        let mut config = GridConfig::default();
        if let Some(cols) = self.col_num {
            config.col_num = cols;
        }
        if let Some(row_height) = self.row_height {
            config.row_height = row_height;
        }
        if let Some([x, y]) = self.margin {
            config.margin = Vec2::new(x, y);
        }
        if let Some(width) = self.container_width {
            config.container_width = width;
        }
        config.max_rows = self.max_rows;
        if let Some(vertical) = self.vertical_compact {
            config.compact_mode = CompactMode::from_vertical(vertical);
        }
        if let Some(mode) = self.compact_mode {
            config.compact_mode = mode;
        }
        if let Some(prevent) = self.prevent_collision {
            config.prevent_collision = prevent;
        }
        if let Some(draggable) = self.is_draggable {
            config.is_draggable = draggable;
        }
        if let Some(resizable) = self.is_resizable {
            config.is_resizable = resizable;
        }
        if let Some(bounded) = self.is_bounded {
            config.is_bounded = bounded;
        }
        if let Some(scale) = self.transform_scale {
            config.transform_scale = scale;
        }
        if let Some(responsive) = self.responsive {
            config.responsive = responsive;
        }
        config
    }

    pub fn breakpoints(&self) -> Breakpoints {
        match &self.breakpoints {
            Some(entries) => entries.iter().fold(Breakpoints::new(), |table, entry| {
                table.with(entry.name.clone(), entry.min_width, entry.cols)
            }),
            None => Breakpoints::default(),
        }
    }
}

/// One breakpoint from JavaScript.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakpointJs {
    pub name: String,
    pub min_width: f32,
    pub cols: u32,
}

/// Pixel rectangle for JavaScript.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PixelRectJs {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl From<PixelRect> for PixelRectJs {
    fn from(rect: PixelRect) -> Self {
        Self {
            left: rect.left,
            top: rect.top,
            width: rect.width,
            height: rect.height,
        }
    }
}

/// The drop target shown while an item is dragged or resized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceholderJs {
    pub id: String,
    pub cell: GridRect,
    pub pixels: PixelRectJs,
}

/// Map a JavaScript event name to its bus topic.
pub fn topic_from_name(name: &str) -> Option<Topic> {
    let topic = match name {
        "layoutChanged" => Topic::LayoutChanged,
        "itemMoved" => Topic::ItemMoved,
        "itemResized" => Topic::ItemResized,
        "itemUpdated" => Topic::ItemUpdated,
        "breakpoint" => Topic::Breakpoint,
        "colNum" => Topic::ColNum,
        "containerWidth" => Topic::ContainerWidth,
        _ => return None,
    };
    Some(topic)
}

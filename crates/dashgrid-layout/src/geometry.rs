//! Conversion between grid units and container pixels.

use dashgrid_core::{GridConfig, GridRect, LayoutItem};
use glam::Vec2;

use crate::collision::bottom;

/// Axis-aligned rectangle in container pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PixelRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl PixelRect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Create a rectangle from position and size vectors.
    pub fn from_vecs(position: Vec2, size: Vec2) -> Self {
        Self::new(position.x, position.y, size.x, size.y)
    }

    pub fn position(&self) -> Vec2 {
        Vec2::new(self.left, self.top)
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    /// Check if a point is inside the rectangle.
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.left && point.x <= self.right() && point.y >= self.top && point.y <= self.bottom()
    }
}

/// Pixel metrics of a grid: the pixel-to-cell ratio used by drag and resize.
///
/// Rebuilt whenever the container width, column count, row height, or margin
/// changes. Building one never touches the layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridGeometry {
    cols: u32,
    row_height: f32,
    margin: Vec2,
    container_width: f32,
    max_rows: Option<u32>,
}

impl GridGeometry {
    pub fn new(config: &GridConfig) -> Self {
        Self {
            cols: config.col_num.max(1),
            row_height: config.row_height,
            margin: config.margin,
            container_width: config.container_width,
            max_rows: config.max_rows,
        }
    }

    /// Geometry for a container that is now `width` pixels wide.
    pub fn with_container_width(mut self, width: f32) -> Self {
        self.container_width = width.max(0.0);
        self
    }

    /// Geometry for a grid that now has `cols` columns.
    pub fn with_cols(mut self, cols: u32) -> Self {
        self.cols = cols.max(1);
        self
    }

    pub fn cols(&self) -> u32 {
        self.cols
    }

    pub fn container_width(&self) -> f32 {
        self.container_width
    }

    /// Width of one column in pixels, excluding margins.
    pub fn col_width(&self) -> f32 {
        let cols = self.cols as f32;
        ((self.container_width - self.margin.x * (cols + 1.0)) / cols).max(0.0)
    }

    /// Pixel rectangle of a grid rectangle, rounded to whole pixels.
    pub fn pixel_rect(&self, rect: GridRect) -> PixelRect {
        let col_width = self.col_width();
        let (x, y, w, h) = (rect.x as f32, rect.y as f32, rect.w as f32, rect.h as f32);
        PixelRect::new(
            (col_width * x + (x + 1.0) * self.margin.x).round(),
            (self.row_height * y + (y + 1.0) * self.margin.y).round(),
            span_px(w, col_width, self.margin.x),
            span_px(h, self.row_height, self.margin.y),
        )
    }

    /// Grid cell nearest to a pixel position for an item of `w` by `h`.
    ///
    /// The cell is clamped so the item stays inside the columns, and inside
    /// `max_rows` when rows are capped.
    pub fn grid_position(&self, position: Vec2, w: u32, h: u32) -> (u32, u32) {
        let x = round_to_cell((position.x - self.margin.x) / (self.col_width() + self.margin.x));
        let y = round_to_cell((position.y - self.margin.y) / (self.row_height + self.margin.y));

        let max_x = i64::from(self.cols.saturating_sub(w));
        let max_y = self.max_rows.map_or(i64::from(u32::MAX), |rows| i64::from(rows.saturating_sub(h)));
        (x.clamp(0, max_x) as u32, y.clamp(0, max_y) as u32)
    }

    /// Grid span nearest to a pixel size for an item anchored at `(x, y)`.
    ///
    /// The span is at least one cell and never runs past the last column, or
    /// past `max_rows` when rows are capped.
    pub fn grid_size(&self, size: Vec2, x: u32, y: u32) -> (u32, u32) {
        let w = round_to_cell((size.x + self.margin.x) / (self.col_width() + self.margin.x));
        let h = round_to_cell((size.y + self.margin.y) / (self.row_height + self.margin.y));

        let max_w = i64::from(self.cols.saturating_sub(x).max(1));
        let max_h = self.max_rows.map_or(i64::from(u32::MAX), |rows| i64::from(rows.saturating_sub(y).max(1)));
        (w.clamp(1, max_w) as u32, h.clamp(1, max_h) as u32)
    }

    /// Pixel height needed to show every item of the layout.
    pub fn container_height(&self, layout: &[LayoutItem]) -> f32 {
        bottom(layout) as f32 * (self.row_height + self.margin.y) + self.margin.y
    }

    /// Clamp a pixel position so an item of `w` by `h` stays inside the container.
    pub fn bounded_position(&self, position: Vec2, w: u32, h: u32, container_height: f32) -> Vec2 {
        let right_limit = (self.container_width - span_px(w as f32, self.col_width(), self.margin.x)).max(0.0);
        let bottom_limit = (container_height - span_px(h as f32, self.row_height, self.margin.y)).max(0.0);
        Vec2::new(position.x.clamp(0.0, right_limit), position.y.clamp(0.0, bottom_limit))
    }
}

fn span_px(span: f32, cell: f32, margin: f32) -> f32 {
    (cell * span + (span - 1.0).max(0.0) * margin).round()
}

fn round_to_cell(value: f32) -> i64 {
    // NaN and infinities from a zero-sized grid saturate instead of panicking.
    value.round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 12 columns of exactly 100px with 10px gutters; rows of 50px.
    fn geometry() -> GridGeometry {
        GridGeometry::new(
            &GridConfig::new(12)
                .with_container_width(1330.0)
                .with_row_height(50.0)
                .with_margin(10.0, 10.0),
        )
    }

    #[test]
    fn test_col_width() {
        assert!((geometry().col_width() - 100.0).abs() < 0.001);
    }

    #[test]
    fn test_pixel_rect() {
        let rect = geometry().pixel_rect(GridRect::new(1, 2, 3, 2));
        assert_eq!(rect, PixelRect::new(120.0, 130.0, 320.0, 110.0));
        assert_eq!(rect.right(), 440.0);
        assert!(rect.contains(Vec2::new(200.0, 200.0)));
    }

    #[test]
    fn test_grid_position_rounds_to_nearest_cell() {
        let geo = geometry();
        assert_eq!(geo.grid_position(Vec2::new(120.0, 130.0), 3, 2), (1, 2));
        assert_eq!(geo.grid_position(Vec2::new(230.0, 165.0), 3, 2), (2, 3));
        assert_eq!(geo.grid_position(Vec2::new(160.0, 150.0), 3, 2), (1, 2));
    }

    #[test]
    fn test_grid_position_clamps() {
        let geo = geometry();
        assert_eq!(geo.grid_position(Vec2::new(-500.0, -500.0), 4, 1), (0, 0));
        assert_eq!(geo.grid_position(Vec2::new(5000.0, 0.0), 4, 1), (8, 0));

        let capped = GridGeometry::new(&GridConfig::new(12).with_max_rows(10));
        assert_eq!(capped.grid_position(Vec2::new(0.0, 99_999.0), 1, 3).1, 7);
    }

    #[test]
    fn test_grid_size() {
        let geo = geometry();
        assert_eq!(geo.grid_size(Vec2::new(320.0, 110.0), 0, 0), (3, 2));
        assert_eq!(geo.grid_size(Vec2::new(5.0, 5.0), 0, 0), (1, 1));
        assert_eq!(geo.grid_size(Vec2::new(5000.0, 110.0), 10, 0), (2, 2));
    }

    #[test]
    fn test_container_width_change_only_changes_ratio() {
        let geo = geometry();
        let narrow = geo.with_container_width(670.0);
        assert!((narrow.col_width() - 45.0).abs() < 0.001);
        assert_eq!(narrow.cols(), geo.cols());
        assert_eq!(narrow.grid_position(Vec2::new(120.0, 0.0), 1, 1), (2, 0));
    }

    #[test]
    fn test_container_height() {
        let layout = vec![LayoutItem::new("a", 0, 0, 1, 2), LayoutItem::new("b", 0, 2, 1, 1)];
        assert_eq!(geometry().container_height(&layout), 190.0);
        assert_eq!(geometry().container_height(&[]), 10.0);
    }

    #[test]
    fn test_bounded_position() {
        let geo = geometry();
        let clamped = geo.bounded_position(Vec2::new(2000.0, -20.0), 2, 1, 300.0);
        assert_eq!(clamped, Vec2::new(1330.0 - 210.0, 0.0));
        let clamped = geo.bounded_position(Vec2::new(10.0, 400.0), 2, 1, 300.0);
        assert_eq!(clamped, Vec2::new(10.0, 250.0));
    }
}

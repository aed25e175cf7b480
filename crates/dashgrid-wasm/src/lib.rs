//! WebAssembly bindings for the dashgrid layout engine.
//!
//! ## Example
//!
//! ```js
//! import { GridEngine } from 'dashgrid';
//!
//! const grid = new GridEngine({ colNum: 12, rowHeight: 30, containerWidth: 1200 });
//! grid.setLayout([
//!   { i: 'a', x: 0, y: 0, w: 2, h: 2 },
//!   { i: 'b', x: 0, y: 2, w: 2, h: 2 },
//! ]);
//!
//! grid.on('layoutChanged', (event) => save(event.LayoutChanged));
//!
//! // Forward pointer events from the page.
//! grid.dragStart('a', e.clientX, e.clientY);
//! grid.dragMove('a', e.clientX, e.clientY);
//! grid.dragEnd('a', e.clientX, e.clientY);
//!
//! const { left, top, width, height } = grid.itemRect('a');
//! ```

use dashgrid_bus::Subscription;
use dashgrid_core::Layout;
use dashgrid_layout::validate_layout;
use dashgrid_widget::{GridContainer, GridItem};
use glam::Vec2;
use indexmap::IndexMap;
use wasm_bindgen::prelude::*;

mod types;

pub use types::*;

/// Install the panic hook for readable panics in the browser console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(debug_assertions)]
    console_error_panic_hook::set_once();
}

/// A grid container plus one pointer handle per item.
#[wasm_bindgen]
pub struct GridEngine {
    container: GridContainer,
    items: IndexMap<String, GridItem>,
    listeners: Vec<Subscription>,
}

#[wasm_bindgen]
impl GridEngine {
    /// Create an engine from an options object; `undefined` uses defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(options: JsValue) -> Result<GridEngine, JsError> {
        let options: GridConfigJs = if options.is_undefined() || options.is_null() {
            GridConfigJs::default()
        } else {
            serde_wasm_bindgen::from_value(options)
                .map_err(|e| JsError::new(&format!("Invalid grid options: {}", e)))?
        };
        let breakpoints = options.breakpoints();
        let container = GridContainer::with_breakpoints(options.into_core(), Vec::new(), breakpoints)
            .map_err(|e| JsError::new(&format!("Invalid grid options: {}", e)))?;
        Ok(Self::from_container(container))
    }

    #[wasm_bindgen(js_name = version)]
    pub fn version() -> String {
        env!("CARGO_PKG_VERSION").to_string()
    }

    /// Replace the layout with an array of items.
    #[wasm_bindgen(js_name = setLayout)]
    pub fn set_layout(&mut self, layout: JsValue) -> Result<(), JsError> {
        let layout: Layout = serde_wasm_bindgen::from_value(layout)
            .map_err(|e| JsError::new(&format!("Invalid layout: {}", e)))?;
        self.replace_layout(layout)
            .map_err(|e| JsError::new(&format!("Invalid layout: {}", e)))
    }

    /// Replace the layout from a JSON string.
    #[wasm_bindgen(js_name = setLayoutFromString)]
    pub fn set_layout_from_string(&mut self, json: &str) -> Result<(), JsError> {
        let layout: Layout = serde_json::from_str(json)
            .map_err(|e| JsError::new(&format!("Invalid JSON: {}", e)))?;
        self.replace_layout(layout)
            .map_err(|e| JsError::new(&format!("Invalid layout: {}", e)))
    }

    /// The current layout as an array of items.
    #[wasm_bindgen]
    pub fn layout(&self) -> Result<JsValue, JsError> {
        serde_wasm_bindgen::to_value(&self.container.layout())
            .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
    }

    /// The current layout as a JSON string.
    #[wasm_bindgen(js_name = layoutToString)]
    pub fn layout_to_string(&self) -> Result<String, JsError> {
        serde_json::to_string(&self.container.layout())
            .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
    }

    /// Where to draw an item, following the pointer while it is dragged.
    #[wasm_bindgen(js_name = itemRect)]
    pub fn item_rect(&self, id: &str) -> Result<JsValue, JsError> {
        let rect = self.items.get(id).map(|item| PixelRectJs::from(item.pixel_rect()));
        serde_wasm_bindgen::to_value(&rect)
            .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
    }

    /// The drop target of the current interaction, or `null`.
    #[wasm_bindgen]
    pub fn placeholder(&self) -> Result<JsValue, JsError> {
        let placeholder = self.placeholder_js();
        serde_wasm_bindgen::to_value(&placeholder)
            .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
    }

    #[wasm_bindgen(js_name = containerHeight)]
    pub fn container_height(&self) -> f32 {
        self.container.container_height()
    }

    #[wasm_bindgen]
    pub fn breakpoint(&self) -> Option<String> {
        self.container.breakpoint()
    }

    #[wasm_bindgen(js_name = moveItem)]
    pub fn move_item(&self, id: &str, x: i32, y: i32) {
        self.container.move_item(id, i64::from(x), i64::from(y));
    }

    #[wasm_bindgen(js_name = resizeItem)]
    pub fn resize_item(&self, id: &str, w: i32, h: i32) {
        self.container.resize_item(id, i64::from(w), i64::from(h));
    }

    /// Begin dragging an item. Returns false for unknown or locked items.
    #[wasm_bindgen(js_name = dragStart)]
    pub fn drag_start(&self, id: &str, x: f32, y: f32) -> bool {
        self.items
            .get(id)
            .is_some_and(|item| item.drag_start(Vec2::new(x, y)))
    }

    #[wasm_bindgen(js_name = dragMove)]
    pub fn drag_move(&self, id: &str, x: f32, y: f32) {
        if let Some(item) = self.items.get(id) {
            item.drag_move(Vec2::new(x, y));
        }
    }

    #[wasm_bindgen(js_name = dragEnd)]
    pub fn drag_end(&self, id: &str, x: f32, y: f32) {
        if let Some(item) = self.items.get(id) {
            item.drag_end(Vec2::new(x, y));
        }
    }

    /// Begin resizing an item. Returns false for unknown or locked items.
    #[wasm_bindgen(js_name = resizeStart)]
    pub fn resize_start(&self, id: &str, x: f32, y: f32) -> bool {
        self.items
            .get(id)
            .is_some_and(|item| item.resize_start(Vec2::new(x, y)))
    }

    #[wasm_bindgen(js_name = resizeMove)]
    pub fn resize_move(&self, id: &str, x: f32, y: f32) {
        if let Some(item) = self.items.get(id) {
            item.resize_move(Vec2::new(x, y));
        }
    }

    #[wasm_bindgen(js_name = resizeEnd)]
    pub fn resize_end(&self, id: &str, x: f32, y: f32) {
        if let Some(item) = self.items.get(id) {
            item.resize_end(Vec2::new(x, y));
        }
    }

    #[wasm_bindgen(js_name = setContainerWidth)]
    pub fn set_container_width(&self, width: f32) {
        self.container.set_container_width(width);
    }

    #[wasm_bindgen(js_name = setColNum)]
    pub fn set_col_num(&self, cols: u32) {
        self.container.set_col_num(cols);
    }

    #[wasm_bindgen(js_name = setRowHeight)]
    pub fn set_row_height(&self, row_height: f32) {
        self.container.set_row_height(row_height);
    }

    #[wasm_bindgen(js_name = setMargin)]
    pub fn set_margin(&self, x: f32, y: f32) {
        self.container.set_margin(x, y);
    }

    #[wasm_bindgen(js_name = setDraggable)]
    pub fn set_draggable(&self, draggable: bool) {
        self.container.set_draggable(draggable);
    }

    #[wasm_bindgen(js_name = setResizable)]
    pub fn set_resizable(&self, resizable: bool) {
        self.container.set_resizable(resizable);
    }

    #[wasm_bindgen(js_name = setBounded)]
    pub fn set_bounded(&self, bounded: bool) {
        self.container.set_bounded(bounded);
    }

    #[wasm_bindgen(js_name = setTransformScale)]
    pub fn set_transform_scale(&self, scale: f32) {
        self.container.set_transform_scale(scale);
    }

    #[wasm_bindgen(js_name = setMaxRows)]
    pub fn set_max_rows(&self, max_rows: Option<u32>) {
        self.container.set_max_rows(max_rows);
    }

    #[wasm_bindgen(js_name = setResponsive)]
    pub fn set_responsive(&self, responsive: bool) {
        self.container.set_responsive(responsive);
    }

    /// Call `callback` with each event of the named kind.
    ///
    /// Known names: `layoutChanged`, `itemMoved`, `itemResized`,
    /// `itemUpdated`, `breakpoint`, `colNum`, `containerWidth`.
    #[wasm_bindgen]
    pub fn on(&mut self, name: &str, callback: js_sys::Function) -> Result<(), JsError> {
        let topic = topic_from_name(name)
            .ok_or_else(|| JsError::new(&format!("Unknown event: {}", name)))?;
        let subscription = self.container.bus().subscribe(topic, move |event| {
            let delivered = serde_wasm_bindgen::to_value(event)
                .map_err(|e| JsValue::from_str(&e.to_string()))
                .and_then(|value| callback.call1(&JsValue::NULL, &value));
            if let Err(err) = delivered {
                log::warn!("event listener failed: {:?}", err);
            }
        });
        self.listeners.push(subscription);
        Ok(())
    }

    /// Remove every callback registered with [`on`](Self::on).
    #[wasm_bindgen(js_name = clearListeners)]
    pub fn clear_listeners(&mut self) {
        self.listeners.clear();
    }
}

impl GridEngine {
    fn from_container(container: GridContainer) -> Self {
        let mut engine = Self {
            container,
            items: IndexMap::new(),
            listeners: Vec::new(),
        };
        engine.sync_items();
        engine
    }

    fn replace_layout(&mut self, layout: Layout) -> Result<(), dashgrid_core::ValidationError> {
        validate_layout(&layout)?;
        self.container.set_layout(layout);
        self.sync_items();
        Ok(())
    }

    /// Keep exactly one handle per item in the layout.
    fn sync_items(&mut self) {
        let layout = self.container.layout();
        self.items
            .retain(|id, _| layout.iter().any(|item| item.i == id.as_str()));
        for item in &layout {
            if !self.items.contains_key(item.i.as_str()) {
                if let Some(handle) = self.container.item(item.i.as_str()) {
                    self.items.insert(item.i.0.clone(), handle);
                }
            }
        }
    }

    fn placeholder_js(&self) -> Option<PlaceholderJs> {
        let placeholder = self.container.placeholder()?;
        let pixels = self.container.placeholder_rect()?;
        Some(PlaceholderJs {
            id: placeholder.i.0,
            cell: placeholder.rect,
            pixels: pixels.into(),
        })
    }
}

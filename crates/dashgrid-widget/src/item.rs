//! Per-item handles that turn pointer input into grid intents.

use std::cell::RefCell;
use std::rc::Rc;

use dashgrid_bus::{EventBus, GridEvent, ItemDragEvent, ItemResizeEvent, Phase, Subscription, Topic};
use dashgrid_core::{GridConfig, GridRect, ItemId, LayoutItem};
use dashgrid_layout::{GridGeometry, PixelRect};
use glam::Vec2;

/// Topics an item mirrors from its container.
const MIRRORED: [Topic; 10] = [
    Topic::ItemUpdated,
    Topic::ColNum,
    Topic::RowHeight,
    Topic::Margin,
    Topic::Draggable,
    Topic::Resizable,
    Topic::Bounded,
    Topic::TransformScale,
    Topic::MaxRows,
    Topic::ContainerWidth,
];

/// Pointer state captured when a drag or resize begins.
#[derive(Debug, Clone, Copy)]
struct PointerSession {
    /// Pointer position at start.
    pointer: Vec2,
    /// Pixel position (drag) or pixel size (resize) at start.
    origin: Vec2,
    /// Latest unsnapped pixel position or size.
    current: Vec2,
    /// Last cell proposed to the container.
    last: GridRect,
}

#[derive(Debug)]
struct ItemState {
    item: LayoutItem,
    config: GridConfig,
    geometry: GridGeometry,
    drag: Option<PointerSession>,
    resize: Option<PointerSession>,
}

impl ItemState {
    fn mirror(&mut self, event: &GridEvent) {
        match event {
            GridEvent::ItemUpdated(item) => {
                if item.i == self.item.i {
                    self.item = item.clone();
                }
                return;
            }
            GridEvent::ColNum(cols) => self.config.col_num = *cols,
            GridEvent::RowHeight(row_height) => self.config.row_height = *row_height,
            GridEvent::Margin(margin) => self.config.margin = *margin,
            GridEvent::Draggable(draggable) => self.config.is_draggable = *draggable,
            GridEvent::Resizable(resizable) => self.config.is_resizable = *resizable,
            GridEvent::Bounded(bounded) => self.config.is_bounded = *bounded,
            GridEvent::TransformScale(scale) => self.config.transform_scale = *scale,
            GridEvent::MaxRows(max_rows) => self.config.max_rows = *max_rows,
            GridEvent::ContainerWidth(width) => self.config.container_width = *width,
            _ => return,
        }
        self.geometry = GridGeometry::new(&self.config);
    }

    /// Pointer travel since `start`, in unscaled container pixels.
    fn travel(&self, start: Vec2, pointer: Vec2) -> Vec2 {
        (pointer - start) / self.config.transform_scale
    }

    /// Lowest pixel an item may reach when bounded.
    fn bounded_height(&self) -> f32 {
        self.config.max_rows.map_or(f32::INFINITY, |rows| {
            rows as f32 * (self.config.row_height + self.config.margin.y) + self.config.margin.y
        })
    }

    fn drag_to(&mut self, pointer: Vec2) -> Option<GridRect> {
        let mut session = self.drag?;
        let (w, h) = (self.item.w, self.item.h);
        let mut position = session.origin + self.travel(session.pointer, pointer);
        if self.config.is_bounded {
            position = self.geometry.bounded_position(position, w, h, self.bounded_height());
        }
        let (x, y) = self.geometry.grid_position(position, w, h);

        session.current = position;
        session.last = GridRect::new(x, y, w, h);
        self.drag = Some(session);
        Some(session.last)
    }

    fn resize_to(&mut self, pointer: Vec2) -> Option<GridRect> {
        let mut session = self.resize?;
        let (x, y) = (self.item.x, self.item.y);
        let size = (session.origin + self.travel(session.pointer, pointer)).max(Vec2::ZERO);
        let (w, h) = self.geometry.grid_size(size, x, y);
        let w = self.item.clamp_width(i64::from(w));
        let h = self.item.clamp_height(i64::from(h));

        session.current = size;
        session.last = GridRect::new(x, y, w, h);
        self.resize = Some(session);
        Some(session.last)
    }
}

/// Handle for one grid item.
///
/// The handle keeps its own copy of the item and of the container settings,
/// refreshed from the bus. Pointer methods take positions in page pixels and
/// publish [`GridEvent::ItemDrag`] or [`GridEvent::ItemResize`] intents; the
/// authoritative geometry comes back as [`GridEvent::ItemUpdated`].
#[derive(Debug)]
pub struct GridItem {
    id: ItemId,
    bus: EventBus,
    state: Rc<RefCell<ItemState>>,
    _subscriptions: Vec<Subscription>,
}

impl GridItem {
    pub fn new(bus: &EventBus, item: LayoutItem, config: &GridConfig) -> Self {
        let id = item.i.clone();
        let state = Rc::new(RefCell::new(ItemState {
            item,
            geometry: GridGeometry::new(config),
            config: config.clone(),
            drag: None,
            resize: None,
        }));

        let subscriptions = MIRRORED
            .iter()
            .map(|&topic| {
                let state = Rc::clone(&state);
                bus.subscribe(topic, move |event| state.borrow_mut().mirror(event))
            })
            .collect();

        Self {
            id,
            bus: bus.clone(),
            state,
            _subscriptions: subscriptions,
        }
    }

    pub fn id(&self) -> &ItemId {
        &self.id
    }

    /// Last geometry received from the container.
    pub fn item(&self) -> LayoutItem {
        self.state.borrow().item.clone()
    }

    pub fn is_dragging(&self) -> bool {
        self.state.borrow().drag.is_some()
    }

    pub fn is_resizing(&self) -> bool {
        self.state.borrow().resize.is_some()
    }

    /// Where the item should be drawn.
    ///
    /// While dragging or resizing the rectangle follows the pointer; otherwise
    /// it is the committed cell.
    pub fn pixel_rect(&self) -> PixelRect {
        let state = self.state.borrow();
        let settled = state.geometry.pixel_rect(state.item.rect());
        if let Some(drag) = state.drag {
            return PixelRect::from_vecs(drag.current, settled.size());
        }
        if let Some(resize) = state.resize {
            return PixelRect::from_vecs(settled.position(), resize.current);
        }
        settled
    }

    /// Begin dragging. Returns false when the item is locked.
    pub fn drag_start(&self, pointer: Vec2) -> bool {
        let rect = {
            let mut state = self.state.borrow_mut();
            if !state.item.draggable(state.config.is_draggable) || state.resize.is_some() {
                log::debug!("drag refused for item '{}'", self.id);
                return false;
            }
            let rect = state.item.rect();
            let origin = state.geometry.pixel_rect(rect).position();
            state.drag = Some(PointerSession {
                pointer,
                origin,
                current: origin,
                last: rect,
            });
            rect
        };
        self.publish_drag(Phase::Start, rect);
        true
    }

    /// Follow the pointer; proposes a new cell only when the snapped cell changes.
    pub fn drag_move(&self, pointer: Vec2) {
        let proposal = {
            let mut state = self.state.borrow_mut();
            let previous = state.drag.map(|session| session.last);
            state.drag_to(pointer).filter(|rect| Some(*rect) != previous)
        };
        if let Some(rect) = proposal {
            self.publish_drag(Phase::Move, rect);
        }
    }

    pub fn drag_end(&self, pointer: Vec2) {
        let proposal = {
            let mut state = self.state.borrow_mut();
            let rect = state.drag_to(pointer);
            state.drag = None;
            rect
        };
        if let Some(rect) = proposal {
            self.publish_drag(Phase::End, rect);
        }
    }

    /// Begin resizing from the bottom-right handle. Returns false when the
    /// item is locked.
    pub fn resize_start(&self, pointer: Vec2) -> bool {
        let rect = {
            let mut state = self.state.borrow_mut();
            if !state.item.resizable(state.config.is_resizable) || state.drag.is_some() {
                log::debug!("resize refused for item '{}'", self.id);
                return false;
            }
            let rect = state.item.rect();
            let origin = state.geometry.pixel_rect(rect).size();
            state.resize = Some(PointerSession {
                pointer,
                origin,
                current: origin,
                last: rect,
            });
            rect
        };
        self.publish_resize(Phase::Start, rect);
        true
    }

    pub fn resize_move(&self, pointer: Vec2) {
        let proposal = {
            let mut state = self.state.borrow_mut();
            let previous = state.resize.map(|session| session.last);
            state.resize_to(pointer).filter(|rect| Some(*rect) != previous)
        };
        if let Some(rect) = proposal {
            self.publish_resize(Phase::Move, rect);
        }
    }

    pub fn resize_end(&self, pointer: Vec2) {
        let proposal = {
            let mut state = self.state.borrow_mut();
            let rect = state.resize_to(pointer);
            state.resize = None;
            rect
        };
        if let Some(rect) = proposal {
            self.publish_resize(Phase::End, rect);
        }
    }

    fn publish_drag(&self, phase: Phase, rect: GridRect) {
        self.bus.emit(&GridEvent::ItemDrag(ItemDragEvent {
            phase,
            id: self.id.clone(),
            rect,
        }));
    }

    fn publish_resize(&self, phase: Phase, rect: GridRect) {
        self.bus.emit(&GridEvent::ItemResize(ItemResizeEvent {
            phase,
            id: self.id.clone(),
            rect,
        }));
    }
}

//! The grid container: sole owner and writer of the layout.

use std::cell::RefCell;
use std::rc::Rc;

use dashgrid_bus::{
    BreakpointChange, EventBus, GeometryChange, GridEvent, Phase, Subscription, Topic,
};
use dashgrid_core::{
    clear_moved, get_layout_item, GridConfig, GridError, GridRect, ItemId, Layout, Placeholder,
};
use dashgrid_layout::{
    apply_mutation, change_columns, changed_items, compact_with, correct_bounds, diff,
    responsive_layout, updated_items, Breakpoints, GridGeometry, Mutation, PixelRect,
};
use glam::Vec2;
use indexmap::IndexMap;

use crate::item::GridItem;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InteractionKind {
    Drag,
    Resize,
}

/// An in-progress drag or resize.
#[derive(Debug)]
struct Interaction {
    kind: InteractionKind,
    id: ItemId,
    before: GridRect,
    layout_before: Layout,
}

#[derive(Debug)]
struct ContainerState {
    config: GridConfig,
    geometry: GridGeometry,
    layout: Layout,
    placeholder: Option<Placeholder>,
    interaction: Option<Interaction>,
    breakpoints: Breakpoints,
    breakpoint: Option<String>,
    stored_layouts: IndexMap<String, Layout>,
}

impl ContainerState {
    fn new(mut config: GridConfig, layout: Layout, breakpoints: Breakpoints) -> Result<Self, GridError> {
        config.validate()?;

        let mut breakpoint = None;
        let mut layout = layout;
        if config.responsive {
            let name = breakpoints.breakpoint_for_width(config.container_width)?.to_string();
            let cols = breakpoints.cols_for(&name)?;
            if cols != config.col_num {
                layout = change_columns(&layout, config.col_num, cols, config.compact_mode);
                config.col_num = cols;
            }
            breakpoint = Some(name);
        }

        let mut layout = compact_with(&correct_bounds(&layout, config.col_num), config.compact_mode);
        clear_moved(&mut layout);
        Ok(Self {
            geometry: GridGeometry::new(&config),
            config,
            layout,
            placeholder: None,
            interaction: None,
            breakpoints,
            breakpoint,
            stored_layouts: IndexMap::new(),
        })
    }

    fn interact(&mut self, kind: InteractionKind, phase: Phase, id: &ItemId, rect: GridRect) -> Vec<GridEvent> {
        match phase {
            Phase::Start => {
                self.begin(kind, id);
                Vec::new()
            }
            Phase::Move => self.step(kind, id, rect),
            Phase::End => {
                let mut notices = self.step(kind, id, rect);
                notices.extend(self.finish(kind, id));
                notices
            }
        }
    }

    fn begin(&mut self, kind: InteractionKind, id: &ItemId) {
        let Some(item) = get_layout_item(&self.layout, id.as_str()) else {
            log::debug!("{:?} start ignored: no item with id '{}'", kind, id);
            return;
        };
        let allowed = match kind {
            InteractionKind::Drag => item.draggable(self.config.is_draggable),
            InteractionKind::Resize => item.resizable(self.config.is_resizable),
        };
        if !allowed {
            log::debug!("{:?} start ignored: item '{}' is locked", kind, id);
            return;
        }

        self.placeholder = Some(Placeholder::from_item(item));
        self.interaction = Some(Interaction {
            kind,
            id: id.clone(),
            before: item.rect(),
            layout_before: self.layout.clone(),
        });
    }

    fn is_interacting(&self, kind: InteractionKind, id: &ItemId) -> bool {
        self.interaction
            .as_ref()
            .is_some_and(|active| active.kind == kind && active.id == *id)
    }

    fn step(&mut self, kind: InteractionKind, id: &ItemId, rect: GridRect) -> Vec<GridEvent> {
        if !self.is_interacting(kind, id) {
            return Vec::new();
        }

        let mutation = match kind {
            InteractionKind::Drag => Mutation::Move {
                id: id.clone(),
                x: i64::from(rect.x),
                y: i64::from(rect.y),
            },
            InteractionKind::Resize => Mutation::Resize {
                id: id.clone(),
                w: i64::from(rect.w),
                h: i64::from(rect.h),
            },
        };
        let next = apply_mutation(&self.layout, &mutation, &self.config);
        self.placeholder = get_layout_item(&next, id.as_str()).map(Placeholder::from_item);
        self.item_updates(next)
    }

    fn finish(&mut self, kind: InteractionKind, id: &ItemId) -> Vec<GridEvent> {
        if !self.is_interacting(kind, id) {
            return Vec::new();
        }
        let Some(interaction) = self.interaction.take() else {
            return Vec::new();
        };
        self.placeholder = None;

        let mut notices = Vec::new();
        if let Some(after) = get_layout_item(&self.layout, id.as_str()).map(|item| item.rect()) {
            if after != interaction.before {
                let change = GeometryChange {
                    id: id.clone(),
                    before: interaction.before,
                    after,
                };
                notices.push(match kind {
                    InteractionKind::Drag => GridEvent::ItemMoved(change),
                    InteractionKind::Resize => GridEvent::ItemResized(change),
                });
            }
        }
        if !changed_items(&interaction.layout_before, &self.layout).is_empty() {
            notices.push(GridEvent::LayoutChanged(self.layout.clone()));
        }
        clear_moved(&mut self.layout);
        notices
    }

    /// Install `next` and describe what items need to hear about it.
    ///
    /// Items hear about any change to their own record, flags and bounds
    /// included, not only about new geometry.
    fn item_updates(&mut self, next: Layout) -> Vec<GridEvent> {
        let notices = updated_items(&self.layout, &next)
            .into_iter()
            .map(GridEvent::ItemUpdated)
            .collect();
        self.layout = next;
        notices
    }

    /// Install `next` outside an interaction; announces the new layout too.
    fn replace_layout(&mut self, next: Layout) -> Vec<GridEvent> {
        let membership_changed = !diff(&self.layout, &next).is_empty();
        let mut notices = self.item_updates(next);
        if membership_changed || !notices.is_empty() {
            notices.push(GridEvent::LayoutChanged(self.layout.clone()));
        }
        clear_moved(&mut self.layout);
        notices
    }

    fn commit(&mut self, kind: InteractionKind, mutation: &Mutation, id: &ItemId) -> Vec<GridEvent> {
        let before = get_layout_item(&self.layout, id.as_str()).map(|item| item.rect());
        let next = apply_mutation(&self.layout, mutation, &self.config);
        let after = get_layout_item(&next, id.as_str()).map(|item| item.rect());
        let mut notices = self.replace_layout(next);

        if let (Some(before), Some(after)) = (before, after) {
            if before != after {
                let change = GeometryChange {
                    id: id.clone(),
                    before,
                    after,
                };
                notices.push(match kind {
                    InteractionKind::Drag => GridEvent::ItemMoved(change),
                    InteractionKind::Resize => GridEvent::ItemResized(change),
                });
            }
        }
        notices
    }

    fn set_columns(&mut self, cols: u32) -> Vec<GridEvent> {
        let cols = cols.max(1);
        if cols == self.config.col_num {
            return Vec::new();
        }
        let next = change_columns(&self.layout, self.config.col_num, cols, self.config.compact_mode);
        self.config.col_num = cols;
        self.geometry = self.geometry.with_cols(cols);

        let mut notices = vec![GridEvent::ColNum(cols)];
        notices.extend(self.replace_layout(next));
        notices
    }

    fn set_container_width(&mut self, width: f32) -> Vec<GridEvent> {
        if !width.is_finite() {
            log::warn!("ignoring non-finite container width {}", width);
            return Vec::new();
        }
        let width = width.max(0.0);
        self.config.container_width = width;
        self.geometry = self.geometry.with_container_width(width);

        let mut notices = vec![GridEvent::ContainerWidth(width)];
        if self.config.responsive {
            notices.extend(self.follow_breakpoint());
        }
        notices
    }

    fn set_responsive(&mut self, responsive: bool) -> Vec<GridEvent> {
        self.config.responsive = responsive;
        if responsive {
            return self.follow_breakpoint();
        }
        self.breakpoint = None;
        self.stored_layouts.clear();
        Vec::new()
    }

    fn follow_breakpoint(&mut self) -> Vec<GridEvent> {
        let name = match self.breakpoints.breakpoint_for_width(self.config.container_width) {
            Ok(name) => name.to_string(),
            Err(err) => {
                log::warn!("responsive layout skipped: {}", err);
                return Vec::new();
            }
        };
        if self.breakpoint.as_deref() == Some(name.as_str()) {
            return Vec::new();
        }

        let next = match &self.breakpoint {
            Some(previous) => {
                self.stored_layouts.insert(previous.clone(), self.layout.clone());
                responsive_layout(
                    &self.stored_layouts,
                    &self.breakpoints,
                    previous,
                    &name,
                    &self.layout,
                    self.config.compact_mode,
                )
            }
            // Responsive mode was just switched on: rescale from the current columns.
            None => self
                .breakpoints
                .cols_for(&name)
                .map(|cols| change_columns(&self.layout, self.config.col_num, cols, self.config.compact_mode)),
        };
        let (next, cols) = match (next, self.breakpoints.cols_for(&name)) {
            (Ok(next), Ok(cols)) => (next, cols),
            (Err(err), _) | (_, Err(err)) => {
                log::warn!("responsive layout skipped: {}", err);
                return Vec::new();
            }
        };

        let previous = self.breakpoint.replace(name.clone());
        log::debug!("breakpoint {:?} -> {} ({} columns)", previous, name, cols);
        self.config.col_num = cols;
        self.geometry = self.geometry.with_cols(cols);

        let mut notices = vec![
            GridEvent::ColNum(cols),
            GridEvent::Breakpoint(BreakpointChange {
                breakpoint: name,
                cols,
            }),
        ];
        notices.extend(self.replace_layout(next));
        notices
    }
}

/// Owns the authoritative layout and reflows it in response to item intents.
///
/// Items never write the layout. They publish [`GridEvent::ItemDrag`] and
/// [`GridEvent::ItemResize`] on the bus; the container runs the matching
/// handler, compacts, and publishes [`GridEvent::ItemUpdated`] for each item
/// whose rectangle changed. Committed interactions also publish
/// [`GridEvent::ItemMoved`] or [`GridEvent::ItemResized`] and
/// [`GridEvent::LayoutChanged`] for the embedding application.
#[derive(Debug)]
pub struct GridContainer {
    state: Rc<RefCell<ContainerState>>,
    bus: EventBus,
    _subscriptions: Vec<Subscription>,
}

impl GridContainer {
    /// Create a container with the default breakpoint table.
    pub fn new(config: GridConfig, layout: Layout) -> Result<Self, GridError> {
        Self::with_breakpoints(config, layout, Breakpoints::default())
    }

    /// Create a container that switches columns by the given breakpoints when
    /// `config.responsive` is set.
    pub fn with_breakpoints(
        config: GridConfig,
        layout: Layout,
        breakpoints: Breakpoints,
    ) -> Result<Self, GridError> {
        let state = Rc::new(RefCell::new(ContainerState::new(config, layout, breakpoints)?));
        let bus = EventBus::new();

        let drag_state = Rc::clone(&state);
        let drag_bus = bus.clone();
        let drag = bus.subscribe(Topic::ItemDrag, move |event| {
            if let GridEvent::ItemDrag(drag) = event {
                let notices = drag_state
                    .borrow_mut()
                    .interact(InteractionKind::Drag, drag.phase, &drag.id, drag.rect);
                publish(&drag_bus, notices);
            }
        });

        let resize_state = Rc::clone(&state);
        let resize_bus = bus.clone();
        let resize = bus.subscribe(Topic::ItemResize, move |event| {
            if let GridEvent::ItemResize(resize) = event {
                let notices = resize_state
                    .borrow_mut()
                    .interact(InteractionKind::Resize, resize.phase, &resize.id, resize.rect);
                publish(&resize_bus, notices);
            }
        });

        Ok(Self {
            state,
            bus,
            _subscriptions: vec![drag, resize],
        })
    }

    /// The bus shared with this container's items.
    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    /// A copy of the current layout.
    pub fn layout(&self) -> Layout {
        self.state.borrow().layout.clone()
    }

    pub fn config(&self) -> GridConfig {
        self.state.borrow().config.clone()
    }

    pub fn geometry(&self) -> GridGeometry {
        self.state.borrow().geometry
    }

    /// The in-progress drag or resize rectangle, if any.
    pub fn placeholder(&self) -> Option<Placeholder> {
        self.state.borrow().placeholder.clone()
    }

    /// Current breakpoint name when responsive.
    pub fn breakpoint(&self) -> Option<String> {
        self.state.borrow().breakpoint.clone()
    }

    /// Pixel height needed to show every item.
    pub fn container_height(&self) -> f32 {
        let state = self.state.borrow();
        state.geometry.container_height(&state.layout)
    }

    /// Pixel rectangle of an item's committed position.
    pub fn item_rect(&self, id: &str) -> Option<PixelRect> {
        let state = self.state.borrow();
        get_layout_item(&state.layout, id).map(|item| state.geometry.pixel_rect(item.rect()))
    }

    /// Pixel rectangle of the placeholder.
    pub fn placeholder_rect(&self) -> Option<PixelRect> {
        let state = self.state.borrow();
        state
            .placeholder
            .as_ref()
            .map(|placeholder| state.geometry.pixel_rect(placeholder.rect))
    }

    /// A handle for one item, wired to this container's bus.
    pub fn item(&self, id: &str) -> Option<GridItem> {
        let state = self.state.borrow();
        let item = get_layout_item(&state.layout, id)?.clone();
        Some(GridItem::new(&self.bus, item, &state.config))
    }

    /// Replace the layout, as when the embedding application adds or removes items.
    ///
    /// Nothing is published when the new layout has the same items in the
    /// same places.
    pub fn set_layout(&self, layout: Layout) {
        let notices = {
            let mut state = self.state.borrow_mut();
            let next = compact_with(
                &correct_bounds(&layout, state.config.col_num),
                state.config.compact_mode,
            );
            state.replace_layout(next)
        };
        publish(&self.bus, notices);
    }

    /// Move an item to a grid cell outside of any pointer interaction.
    pub fn move_item(&self, id: &str, x: i64, y: i64) {
        let mutation = Mutation::Move { id: id.into(), x, y };
        let notices = self
            .state
            .borrow_mut()
            .commit(InteractionKind::Drag, &mutation, &id.into());
        publish(&self.bus, notices);
    }

    /// Resize an item outside of any pointer interaction.
    pub fn resize_item(&self, id: &str, w: i64, h: i64) {
        let mutation = Mutation::Resize { id: id.into(), w, h };
        let notices = self
            .state
            .borrow_mut()
            .commit(InteractionKind::Resize, &mutation, &id.into());
        publish(&self.bus, notices);
    }

    /// Change the column count and rescale every item.
    pub fn set_col_num(&self, cols: u32) {
        let notices = self.state.borrow_mut().set_columns(cols);
        publish(&self.bus, notices);
    }

    /// Record a new container width; switches breakpoint when responsive.
    pub fn set_container_width(&self, width: f32) {
        let notices = self.state.borrow_mut().set_container_width(width);
        publish(&self.bus, notices);
    }

    /// Turn breakpoint following on or off.
    ///
    /// Switching it on picks the breakpoint for the current width and rescales
    /// the layout to its columns. Switching it off keeps the current columns
    /// and forgets the per-breakpoint layouts.
    pub fn set_responsive(&self, responsive: bool) {
        let notices = self.state.borrow_mut().set_responsive(responsive);
        publish(&self.bus, notices);
    }

    pub fn set_row_height(&self, row_height: f32) {
        if !(row_height.is_finite() && row_height > 0.0) {
            log::warn!("ignoring invalid row height {}", row_height);
            return;
        }
        self.update_config(GridEvent::RowHeight(row_height), |config| config.row_height = row_height);
    }

    pub fn set_margin(&self, x: f32, y: f32) {
        let margin = Vec2::new(x, y);
        if !(margin.is_finite() && x >= 0.0 && y >= 0.0) {
            log::warn!("ignoring invalid margin [{}, {}]", x, y);
            return;
        }
        self.update_config(GridEvent::Margin(margin), |config| config.margin = margin);
    }

    pub fn set_draggable(&self, draggable: bool) {
        self.update_config(GridEvent::Draggable(draggable), |config| config.is_draggable = draggable);
    }

    pub fn set_resizable(&self, resizable: bool) {
        self.update_config(GridEvent::Resizable(resizable), |config| config.is_resizable = resizable);
    }

    pub fn set_bounded(&self, bounded: bool) {
        self.update_config(GridEvent::Bounded(bounded), |config| config.is_bounded = bounded);
    }

    pub fn set_transform_scale(&self, scale: f32) {
        if !(scale.is_finite() && scale > 0.0) {
            log::warn!("ignoring invalid transform scale {}", scale);
            return;
        }
        self.update_config(GridEvent::TransformScale(scale), |config| config.transform_scale = scale);
    }

    pub fn set_max_rows(&self, max_rows: Option<u32>) {
        let max_rows = max_rows.filter(|&rows| rows > 0);
        self.update_config(GridEvent::MaxRows(max_rows), |config| config.max_rows = max_rows);
    }

    fn update_config(&self, event: GridEvent, apply: impl FnOnce(&mut GridConfig)) {
        {
            let mut state = self.state.borrow_mut();
            apply(&mut state.config);
            state.geometry = GridGeometry::new(&state.config);
        }
        self.bus.emit(&event);
    }
}

fn publish(bus: &EventBus, notices: Vec<GridEvent>) {
    for notice in &notices {
        bus.emit(notice);
    }
}

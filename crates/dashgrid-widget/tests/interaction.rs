//! End-to-end interactions between a container, its item handles and the bus.

use std::cell::RefCell;
use std::rc::Rc;

use dashgrid_bus::{GridEvent, Subscription, Topic};
use dashgrid_core::{get_layout_item, GridConfig, GridRect, LayoutItem};
use dashgrid_widget::GridContainer;
use glam::Vec2;

/// 12 columns of 100px with 10px gutters; 50px rows, so a row step is 60px.
fn config() -> GridConfig {
    GridConfig::new(12)
        .with_container_width(1330.0)
        .with_row_height(50.0)
        .with_margin(10.0, 10.0)
}

fn stacked() -> GridContainer {
    GridContainer::new(
        config(),
        vec![LayoutItem::new("a", 0, 0, 2, 2), LayoutItem::new("b", 0, 2, 2, 2)],
    )
    .unwrap()
}

struct Recorder {
    events: Rc<RefCell<Vec<GridEvent>>>,
    _subscriptions: Vec<Subscription>,
}

impl Recorder {
    fn new(container: &GridContainer, topics: &[Topic]) -> Self {
        let events = Rc::new(RefCell::new(Vec::new()));
        let subscriptions = topics
            .iter()
            .map(|&topic| {
                let sink = Rc::clone(&events);
                container
                    .bus()
                    .subscribe(topic, move |event| sink.borrow_mut().push(event.clone()))
            })
            .collect();
        Self {
            events,
            _subscriptions: subscriptions,
        }
    }

    fn topics(&self) -> Vec<Topic> {
        self.events.borrow().iter().map(GridEvent::topic).collect()
    }

    fn take(&self) -> Vec<GridEvent> {
        self.events.borrow_mut().drain(..).collect()
    }
}

#[test]
fn drag_below_neighbour_swaps_them() {
    let container = stacked();
    let recorder = Recorder::new(&container, &[Topic::ItemMoved, Topic::LayoutChanged]);
    let a = container.item("a").unwrap();
    let b = container.item("b").unwrap();

    assert!(a.drag_start(Vec2::new(50.0, 50.0)));
    a.drag_move(Vec2::new(50.0, 350.0));

    assert_eq!(
        container.placeholder().map(|p| p.rect),
        Some(GridRect::new(0, 2, 2, 2))
    );
    assert_eq!(b.item().y, 0);
    // Nothing is committed while the pointer is down.
    assert!(recorder.topics().is_empty());

    a.drag_end(Vec2::new(50.0, 350.0));

    assert!(container.placeholder().is_none());
    assert_eq!(a.item().rect(), GridRect::new(0, 2, 2, 2));
    let events = recorder.take();
    assert_eq!(events.len(), 2);
    match &events[0] {
        GridEvent::ItemMoved(change) => {
            assert_eq!(change.id, "a");
            assert_eq!(change.before, GridRect::new(0, 0, 2, 2));
            assert_eq!(change.after, GridRect::new(0, 2, 2, 2));
        }
        other => panic!("expected ItemMoved, got {:?}", other),
    }
    match &events[1] {
        GridEvent::LayoutChanged(layout) => {
            let rects: Vec<_> = layout.iter().map(LayoutItem::rect).collect();
            let committed: Vec<_> = container.layout().iter().map(LayoutItem::rect).collect();
            assert_eq!(rects, committed);
            assert_eq!(get_layout_item(layout, "a").map(|i| i.moved), Some(true));
        }
        other => panic!("expected LayoutChanged, got {:?}", other),
    }
    // The announcement carried `moved`; the stored layout starts clean again.
    assert!(container.layout().iter().all(|item| !item.moved));
}

#[test]
fn pinning_through_set_layout_locks_the_handle() {
    let container = stacked();
    let a = container.item("a").unwrap();

    container.set_layout(vec![
        LayoutItem::new("a", 0, 0, 2, 2).pinned(),
        LayoutItem::new("b", 0, 2, 2, 2),
    ]);

    assert!(a.item().is_static);
    assert!(!a.drag_start(Vec2::ZERO));
    assert!(!a.is_dragging());
    assert!(!a.resize_start(Vec2::ZERO));
}

#[test]
fn bounds_changed_through_set_layout_reach_the_handle() {
    let container = stacked();
    let recorder = Recorder::new(&container, &[Topic::LayoutChanged]);
    let a = container.item("a").unwrap();

    container.set_layout(vec![
        LayoutItem::new("a", 0, 0, 2, 2).with_max_size(3, 3),
        LayoutItem::new("b", 0, 2, 2, 2),
    ]);
    assert_eq!(recorder.topics(), vec![Topic::LayoutChanged]);
    assert_eq!(a.item().max_w, Some(3));

    assert!(a.resize_start(Vec2::new(200.0, 100.0)));
    a.resize_end(Vec2::new(1000.0, 100.0));
    let layout = container.layout();
    assert_eq!(get_layout_item(&layout, "a").map(|i| i.w), Some(3));
}

#[test]
fn enabling_responsive_rescales_to_the_current_breakpoint() {
    let container = GridContainer::new(
        config().with_container_width(800.0),
        vec![LayoutItem::new("a", 6, 0, 4, 1)],
    )
    .unwrap();
    let recorder = Recorder::new(&container, &[Topic::ColNum, Topic::Breakpoint]);
    assert_eq!(container.breakpoint(), None);

    container.set_responsive(true);
    assert_eq!(container.breakpoint().as_deref(), Some("sm"));
    assert_eq!(container.config().col_num, 6);
    assert_eq!(recorder.topics(), vec![Topic::ColNum, Topic::Breakpoint]);
    let a = container.layout()[0].clone();
    assert_eq!((a.x, a.w), (3, 2));

    container.set_responsive(false);
    assert_eq!(container.breakpoint(), None);
    container.set_container_width(1300.0);
    assert_eq!(container.config().col_num, 6);
}

#[test]
fn drag_back_to_start_commits_nothing() {
    let container = stacked();
    let recorder = Recorder::new(&container, &[Topic::ItemMoved, Topic::LayoutChanged]);
    let a = container.item("a").unwrap();

    a.drag_start(Vec2::ZERO);
    a.drag_move(Vec2::new(0.0, 300.0));
    a.drag_end(Vec2::ZERO);

    assert_eq!(get_layout_item(&container.layout(), "a").map(|i| i.y), Some(0));
    assert!(recorder.topics().is_empty());
}

#[test]
fn resize_pushes_neighbour_down() {
    let container = stacked();
    let recorder = Recorder::new(&container, &[Topic::ItemResized]);
    let a = container.item("a").unwrap();

    assert!(a.resize_start(Vec2::new(200.0, 100.0)));
    a.resize_move(Vec2::new(200.0, 220.0));
    a.resize_end(Vec2::new(200.0, 220.0));

    let layout = container.layout();
    assert_eq!(get_layout_item(&layout, "a").map(|i| i.rect()), Some(GridRect::new(0, 0, 2, 4)));
    assert_eq!(get_layout_item(&layout, "b").map(|i| i.y), Some(4));
    assert_eq!(recorder.topics(), vec![Topic::ItemResized]);
}

#[test]
fn static_item_is_never_displaced() {
    let container = GridContainer::new(
        config(),
        vec![
            LayoutItem::new("wall", 0, 1, 4, 1).pinned(),
            LayoutItem::new("a", 0, 0, 2, 1),
        ],
    )
    .unwrap();
    let a = container.item("a").unwrap();

    a.drag_start(Vec2::ZERO);
    a.drag_end(Vec2::new(0.0, 60.0));

    let layout = container.layout();
    assert_eq!(get_layout_item(&layout, "wall").map(|i| i.rect()), Some(GridRect::new(0, 1, 4, 1)));
    assert_eq!(get_layout_item(&layout, "a").map(|i| i.y), Some(2));
}

#[test]
fn prevent_collision_refuses_overlapping_drop() {
    let container = GridContainer::new(
        config().with_prevent_collision(true),
        vec![LayoutItem::new("a", 0, 0, 2, 2), LayoutItem::new("b", 2, 0, 2, 2)],
    )
    .unwrap();
    let before = container.layout();

    container.move_item("a", 1, 0);
    assert_eq!(container.layout(), before);

    container.move_item("a", 4, 0);
    assert_eq!(get_layout_item(&container.layout(), "a").map(|i| i.x), Some(4));
}

#[test]
fn pointer_events_for_removed_item_are_ignored() {
    let container = stacked();
    let b = container.item("b").unwrap();
    container.set_layout(vec![LayoutItem::new("a", 0, 0, 2, 2)]);
    let before = container.layout();

    assert!(b.drag_start(Vec2::ZERO));
    b.drag_move(Vec2::new(400.0, 0.0));
    b.drag_end(Vec2::new(400.0, 0.0));

    assert_eq!(container.layout(), before);
    assert!(container.placeholder().is_none());
}

#[test]
fn set_layout_only_notifies_on_change() {
    let container = stacked();
    let recorder = Recorder::new(&container, &[Topic::LayoutChanged]);

    container.set_layout(container.layout());
    assert!(recorder.topics().is_empty());

    let mut grown = container.layout();
    grown.push(LayoutItem::new("c", 4, 0, 1, 1));
    container.set_layout(grown);
    assert_eq!(recorder.topics(), vec![Topic::LayoutChanged]);

    container.set_layout(vec![LayoutItem::new("a", 0, 0, 2, 2)]);
    assert_eq!(recorder.topics().len(), 2);
}

#[test]
fn config_changes_reach_items() {
    let container = stacked();
    let a = container.item("a").unwrap();

    container.set_draggable(false);
    assert!(!a.drag_start(Vec2::ZERO));
    container.set_draggable(true);
    assert!(a.drag_start(Vec2::ZERO));
    a.drag_end(Vec2::ZERO);

    container.set_row_height(110.0);
    // Row pitch is now 120px.
    assert_eq!(a.pixel_rect().height, 230.0);

    container.set_col_num(6);
    assert_eq!(a.item().w, 1);
    assert_eq!(container.item_rect("a"), Some(a.pixel_rect()));
}

#[test]
fn responsive_width_switches_breakpoints_and_restores_layouts() {
    let container = GridContainer::new(
        config().with_container_width(1300.0).with_responsive(true),
        vec![LayoutItem::new("a", 8, 0, 4, 1), LayoutItem::new("b", 0, 0, 4, 1)],
    )
    .unwrap();
    let recorder = Recorder::new(&container, &[Topic::Breakpoint, Topic::ColNum]);
    assert_eq!(container.breakpoint().as_deref(), Some("lg"));
    let wide = container.layout();

    container.set_container_width(800.0);
    assert_eq!(container.breakpoint().as_deref(), Some("sm"));
    assert_eq!(container.config().col_num, 6);
    assert_eq!(recorder.topics(), vec![Topic::ColNum, Topic::Breakpoint]);
    assert!(container.layout().iter().all(|item| item.right() <= 6));

    container.set_container_width(1300.0);
    assert_eq!(container.breakpoint().as_deref(), Some("lg"));
    assert_eq!(container.layout(), wide);
}

#[test]
fn dropping_container_releases_bus_listeners() {
    let container = stacked();
    let bus = container.bus().clone();
    assert_eq!(bus.listener_count(Topic::ItemDrag), 1);
    drop(container);
    assert_eq!(bus.listener_count(Topic::ItemDrag), 0);
}

#[test]
fn application_can_read_layout_from_listener() {
    let container = Rc::new(stacked());
    let seen = Rc::new(RefCell::new(None));

    let weak = Rc::downgrade(&container);
    let sink = Rc::clone(&seen);
    let _sub = container.bus().subscribe(Topic::LayoutChanged, move |_| {
        if let Some(container) = weak.upgrade() {
            *sink.borrow_mut() = Some(container.container_height());
        }
    });

    container.resize_item("b", 2, 3);
    // Bottom is row 5: 5 * 60 + 10.
    assert_eq!(*seen.borrow(), Some(310.0));
}

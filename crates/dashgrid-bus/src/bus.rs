//! The publish/subscribe channel.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use indexmap::IndexMap;
use smallvec::SmallVec;

use crate::events::{GridEvent, Topic};

/// A registered callback.
pub type Listener = Rc<dyn Fn(&GridEvent)>;

/// Handle returned by [`EventBus::on`], used to deregister.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type ListenerList = SmallVec<[(ListenerId, Listener); 4]>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    topics: IndexMap<Topic, ListenerList>,
}

/// Single-threaded event bus shared by one grid container and its items.
///
/// Cloning yields another handle to the same bus. Listeners run synchronously
/// inside [`emit`](Self::emit), in registration order, and only those
/// registered when the emission began are called. A panicking listener is not
/// caught: it unwinds through `emit` and the remaining listeners for that
/// emission do not run.
#[derive(Clone, Default)]
pub struct EventBus {
    registry: Rc<RefCell<Registry>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener for `topic`.
    pub fn on(&self, topic: Topic, listener: impl Fn(&GridEvent) + 'static) -> ListenerId {
        let mut registry = self.registry.borrow_mut();
        let id = ListenerId(registry.next_id);
        registry.next_id += 1;
        registry
            .topics
            .entry(topic)
            .or_default()
            .push((id, Rc::new(listener)));
        id
    }

    /// Deregister a listener. Returns false if it was not registered.
    pub fn off(&self, topic: Topic, id: ListenerId) -> bool {
        remove_listener(&self.registry, topic, id).is_some()
    }

    /// Register a listener that stays registered until the guard is dropped.
    pub fn subscribe(&self, topic: Topic, listener: impl Fn(&GridEvent) + 'static) -> Subscription {
        let id = self.on(topic, listener);
        Subscription {
            topic,
            id,
            registry: Rc::downgrade(&self.registry),
        }
    }

    /// Deliver an event to every listener of its topic.
    pub fn emit(&self, event: &GridEvent) {
        let topic = event.topic();
        let listeners: SmallVec<[Listener; 4]> = match self.registry.borrow().topics.get(&topic) {
            Some(list) => list.iter().map(|(_, listener)| Rc::clone(listener)).collect(),
            None => SmallVec::new(),
        };

        log::trace!("emit {:?} to {} listeners", topic, listeners.len());
        for listener in listeners {
            listener(event);
        }
    }

    /// Number of listeners currently registered for `topic`.
    pub fn listener_count(&self, topic: Topic) -> usize {
        self.registry
            .borrow()
            .topics
            .get(&topic)
            .map_or(0, |list| list.len())
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let registry = self.registry.borrow();
        let counts: Vec<_> = registry
            .topics
            .iter()
            .filter(|(_, list)| !list.is_empty())
            .map(|(topic, list)| (*topic, list.len()))
            .collect();
        f.debug_struct("EventBus").field("listeners", &counts).finish()
    }
}

/// Deregisters its listener when dropped.
///
/// Holds the bus weakly, so a subscription never keeps a bus alive.
#[must_use = "the listener is removed as soon as the subscription is dropped"]
pub struct Subscription {
    topic: Topic,
    id: ListenerId,
    registry: Weak<RefCell<Registry>>,
}

impl Subscription {
    pub fn topic(&self) -> Topic {
        self.topic
    }

    pub fn id(&self) -> ListenerId {
        self.id
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("topic", &self.topic)
            .field("id", &self.id)
            .finish()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            remove_listener(&registry, self.topic, self.id);
        }
    }
}

/// Unlink a listener and hand it back.
///
/// The caller drops it after the registry borrow ends, since dropping a
/// closure may drop a `Subscription` that needs the registry again.
fn remove_listener(registry: &RefCell<Registry>, topic: Topic, id: ListenerId) -> Option<Listener> {
    let mut registry = registry.borrow_mut();
    let listeners = registry.topics.get_mut(&topic)?;
    let index = listeners.iter().position(|(listener_id, _)| *listener_id == id)?;
    Some(listeners.remove(index).1)
}

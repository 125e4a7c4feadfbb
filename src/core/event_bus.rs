//! Pub/Sub Event Bus for decoupled component communication.
//!
//! Architecture:
//! - Components subscribe to event types with callbacks (immediate invocation)
//! - emit() invokes callbacks immediately AND queues for deferred processing
//! - poll() returns queued events for batch processing in the host loop
//!
//! Callback order: FIFO (first-subscribed, first-called) within same event type.
//! Cross-type order undefined - don't rely on ordering between different event types.
//!
//! The panel runs on the UI thread only, so the bus is `Rc`-shared and not `Send`.

use std::any::{Any, TypeId};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use log::warn;

/// Maximum events in queue before oldest are evicted
const MAX_QUEUE_SIZE: usize = 1000;

/// Marker trait for events.
pub trait Event: Any + 'static {
    fn as_any(&self) -> &dyn Any;
    fn type_name(&self) -> &'static str;
}

// Blanket impl for all qualifying types
impl<T: Any + 'static> Event for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }
}

/// Type-erased callback
type Callback = Rc<dyn Fn(&dyn Any)>;

/// Boxed event for queue storage
pub type BoxedEvent = Box<dyn Event>;

type Subscribers = Rc<RefCell<HashMap<TypeId, Vec<Callback>>>>;
type Queue = Rc<RefCell<Vec<BoxedEvent>>>;

/// Invoke subscribers of `type_id`, then queue the event.
///
/// Callbacks are cloned out before invocation so a callback may subscribe
/// or emit without a re-entrant borrow.
fn dispatch(subscribers: &Subscribers, queue: &Queue, type_id: TypeId, event: BoxedEvent, origin: &str) {
    let callbacks: Vec<Callback> = subscribers.borrow().get(&type_id).cloned().unwrap_or_default();
    for cb in &callbacks {
        // Deref to `dyn Event` so the vtable call sees the concrete type
        cb((*event).as_any());
    }

    let mut queue = queue.borrow_mut();
    if queue.len() >= MAX_QUEUE_SIZE {
        let evict_count = queue.len() / 2;
        warn!("{} queue full ({} events), evicting oldest {}", origin, queue.len(), evict_count);
        queue.drain(0..evict_count);
    }
    queue.push(event);
}

/// Pub/Sub Event Bus with deferred processing support.
///
/// Two modes of operation:
/// 1. Immediate: subscribe() + emit() triggers callbacks instantly
/// 2. Deferred: emit() also queues events for poll() in the host loop
#[derive(Clone, Default)]
pub struct EventBus {
    subscribers: Subscribers,
    queue: Queue,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to events of type E.
    ///
    /// Callback is invoked immediately when emit() is called.
    /// Use `Rc<RefCell<State>>` in the callback for state mutations.
    pub fn subscribe<E, F>(&self, callback: F)
    where
        E: Event,
        F: Fn(&E) + 'static,
    {
        let wrapped: Callback = Rc::new(move |any: &dyn Any| {
            if let Some(event) = any.downcast_ref::<E>() {
                callback(event);
            }
        });
        self.subscribers
            .borrow_mut()
            .entry(TypeId::of::<E>())
            .or_default()
            .push(wrapped);
    }

    /// Emit event: invoke callbacks immediately AND queue for deferred processing.
    pub fn emit<E: Event>(&self, event: E) {
        dispatch(&self.subscribers, &self.queue, TypeId::of::<E>(), Box::new(event), "EventBus");
    }

    /// Poll all queued events for batch processing.
    pub fn poll(&self) -> Vec<BoxedEvent> {
        std::mem::take(&mut *self.queue.borrow_mut())
    }

    /// Get an emitter handle for passing to UI components.
    pub fn emitter(&self) -> EventEmitter {
        EventEmitter {
            subscribers: Rc::clone(&self.subscribers),
            queue: Rc::clone(&self.queue),
        }
    }

    /// Clear subscribers for type E
    pub fn unsubscribe_all<E: Event>(&self) {
        self.subscribers.borrow_mut().remove(&TypeId::of::<E>());
    }

    /// Check if there are subscribers for event type E
    pub fn has_subscribers<E: Event>(&self) -> bool {
        self.subscribers
            .borrow()
            .get(&TypeId::of::<E>())
            .is_some_and(|v| !v.is_empty())
    }

    pub fn queue_len(&self) -> usize {
        self.queue.borrow().len()
    }
}

/// Lightweight emitter handle for UI components.
#[derive(Clone)]
pub struct EventEmitter {
    subscribers: Subscribers,
    queue: Queue,
}

impl std::fmt::Debug for EventEmitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventEmitter")
            .field("subscriber_types", &self.subscribers.borrow().len())
            .field("queue_len", &self.queue.borrow().len())
            .finish()
    }
}

impl EventEmitter {
    /// Emit event: invoke callbacks and queue for deferred processing
    pub fn emit<E: Event>(&self, event: E) {
        dispatch(&self.subscribers, &self.queue, TypeId::of::<E>(), Box::new(event), "EventEmitter");
    }
}

/// Panel-side emitter (wraps Option<EventEmitter>)
#[derive(Clone, Default, Debug)]
pub struct PanelEventEmitter {
    inner: Option<EventEmitter>,
}

impl PanelEventEmitter {
    /// Create a no-op emitter (panel used without an event bus)
    pub fn dummy() -> Self {
        Self { inner: None }
    }

    pub fn from_emitter(emitter: EventEmitter) -> Self {
        Self { inner: Some(emitter) }
    }

    /// Emit event (no-op if dummy)
    pub fn emit<E: Event>(&self, event: E) {
        if let Some(ref emitter) = self.inner {
            emitter.emit(event);
        }
    }
}

/// Helper: downcast BoxedEvent to concrete type
///
/// Must explicitly deref to `dyn Event` before calling `as_any()`: the blanket
/// impl also covers `Box<dyn Event>` and would hand back the box itself.
#[inline]
pub fn downcast_event<E: Event>(event: &BoxedEvent) -> Option<&E> {
    (**event).as_any().downcast_ref::<E>()
}

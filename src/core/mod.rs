//! Core plumbing shared by the panel and its host - the event bus.

pub mod event_bus;

pub use event_bus::{downcast_event, BoxedEvent, EventBus, EventEmitter, PanelEventEmitter};

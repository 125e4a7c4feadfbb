//! PROPBOX - property panel for a visual authoring tool
//!
//! Renders the editable properties of the current selection into a display
//! surface and writes edited values back. Re-exports all modules for use by
//! the binary target.

// Core plumbing (events)
pub mod core;

// App modules
pub mod cli;
pub mod config;
pub mod document;
pub mod entities;
pub mod paths;
pub mod shell;
pub mod widgets;

// Re-export commonly used types from core
pub use crate::core::event_bus::{downcast_event, BoxedEvent, EventBus, EventEmitter, PanelEventEmitter};

// Re-export the model and the panel
pub use config::PanelConfig;
pub use document::Document;
pub use entities::{ObjectKind, ObjectWithProperties, Properties, Property, PropertyType, Target};
pub use widgets::props::{DisplaySurface, MemorySurface, PropertiesPanel};

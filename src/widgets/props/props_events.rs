//! Property panel events.
//!
//! Routed through the event bus; hosts subscribe or poll, the panel never waits on them.

use crate::entities::{AlterTableRequest, ObjectKind};

/// Emitted after every render pass; `id` is `None` when nothing is selected.
#[derive(Clone, Debug)]
pub struct PanelRenderedEvent {
    pub id: Option<String>,
    pub kind: ObjectKind,
    pub rows: usize,
}

/// Emitted after an apply pass with the property names that were written.
#[derive(Clone, Debug)]
pub struct PropertiesAppliedEvent {
    pub id: String,
    pub kind: ObjectKind,
    pub written: Vec<String>,
}

/// Emitted when a structural trigger has been forwarded to a table.
#[derive(Clone, Debug)]
pub struct TableAlteredEvent {
    pub table_id: String,
    pub request: AlterTableRequest,
}

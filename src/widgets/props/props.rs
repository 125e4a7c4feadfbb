use std::cell::RefCell;
use std::rc::Weak;

use anyhow::{Context, Result};

use crate::config::{Labels, PanelConfig};
use crate::core::event_bus::PanelEventEmitter;
use crate::entities::{AlterTableKind, AlterTableRequest, TableObject, Target};

use super::surface::DisplaySurface;

/// Button id of the universal apply trigger
pub const APPLY_TRIGGER: &str = "btnApplyProperties";
pub const ADD_ROW_TRIGGER: &str = "btnAddRow";
pub const DELETE_ROW_TRIGGER: &str = "btnDeleteRow";
pub const ADD_COLUMN_TRIGGER: &str = "btnAddColumn";
pub const DELETE_COLUMN_TRIGGER: &str = "btnDeleteColumn";

/// What a trigger does when fired. Everything it needs is captured at render time.
#[derive(Debug, Clone)]
pub enum TriggerAction {
    /// Copy the panel inputs onto the target and run its post-update action
    Apply(Target),
    /// Ask the owning table for a structural edit at the captured coordinates
    AlterTable {
        table: Weak<RefCell<dyn TableObject>>,
        request: AlterTableRequest,
    },
}

/// Interactive control produced by a render pass.
#[derive(Debug, Clone)]
pub struct Trigger {
    pub id: &'static str,
    pub caption: String,
    pub action: TriggerAction,
}

impl Trigger {
    pub(super) fn apply(target: &Target, labels: &Labels) -> Self {
        Self {
            id: APPLY_TRIGGER,
            caption: labels.apply.clone(),
            action: TriggerAction::Apply(target.clone()),
        }
    }

    /// The four table-cell triggers, in button order.
    pub(super) fn structural(
        table: &Weak<RefCell<dyn TableObject>>,
        row: usize,
        column: usize,
        labels: &Labels,
    ) -> Vec<Self> {
        [
            (ADD_ROW_TRIGGER, &labels.add_row, AlterTableKind::AddRow),
            (DELETE_ROW_TRIGGER, &labels.delete_row, AlterTableKind::DeleteRow),
            (ADD_COLUMN_TRIGGER, &labels.add_column, AlterTableKind::AddColumn),
            (DELETE_COLUMN_TRIGGER, &labels.delete_column, AlterTableKind::DeleteColumn),
        ]
        .into_iter()
        .map(|(id, caption, kind)| Self {
            id,
            caption: caption.clone(),
            action: TriggerAction::AlterTable {
                table: table.clone(),
                request: AlterTableRequest { kind, row, column },
            },
        })
        .collect()
    }

    pub fn is_structural(&self) -> bool {
        matches!(self.action, TriggerAction::AlterTable { .. })
    }
}

/// Property panel for the current selection.
///
/// Owns the display surface; every render replaces its title, body and the
/// set of live triggers.
pub struct PropertiesPanel<S: DisplaySurface> {
    pub(super) surface: S,
    pub(super) labels: Labels,
    pub(super) triggers: Vec<Trigger>,
    pub(super) emitter: PanelEventEmitter,
}

impl<S: DisplaySurface> PropertiesPanel<S> {
    pub fn new(surface: S, config: &PanelConfig) -> Self {
        Self {
            surface,
            labels: config.labels.clone(),
            triggers: Vec::new(),
            emitter: PanelEventEmitter::dummy(),
        }
    }

    pub fn with_emitter(mut self, emitter: PanelEventEmitter) -> Self {
        self.emitter = emitter;
        self
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable surface access, e.g. for the user editing inputs.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn labels(&self) -> &Labels {
        &self.labels
    }

    /// Triggers produced by the last render.
    pub fn triggers(&self) -> &[Trigger] {
        &self.triggers
    }

    pub fn trigger(&self, id: &str) -> Option<&Trigger> {
        self.triggers.iter().find(|t| t.id == id)
    }

    /// Fire a trigger of the current render by id.
    pub fn fire(&mut self, trigger_id: &str) -> Result<()> {
        let trigger = self
            .trigger(trigger_id)
            .cloned()
            .with_context(|| format!("No trigger {trigger_id:?} in the current property panel"))?;
        log::debug!("Firing {}", trigger.id);
        match trigger.action {
            TriggerAction::Apply(target) => self.apply_new_properties(&target),
            TriggerAction::AlterTable { table, request } => self.alter_table(&table, request),
        }
    }
}

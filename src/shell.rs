//! Shared shell for the binary target.
//!
//! Wires a loaded document, the property panel and the event bus together and
//! drives them the way an interactive host would: select, edit, fire, repeat.

use anyhow::{Context, Result};
use log::{debug, info};

use crate::config::PanelConfig;
use crate::core::event_bus::{downcast_event, EventBus, PanelEventEmitter};
use crate::document::Document;
use crate::entities::Target;
use crate::widgets::props::{
    InputKind, MemorySurface, PanelRenderedEvent, PropertiesAppliedEvent, PropertiesPanel, TableAlteredEvent,
    APPLY_TRIGGER,
};

/// Common shell state
pub struct Shell {
    pub document: Document,
    pub panel: PropertiesPanel<MemorySurface>,
    pub event_bus: EventBus,
    selected: Option<String>,
}

impl Shell {
    pub fn new(document: Document, config: &PanelConfig) -> Self {
        let event_bus = EventBus::new();
        let panel = PropertiesPanel::new(MemorySurface::new(config), config)
            .with_emitter(PanelEventEmitter::from_emitter(event_bus.emitter()));
        Self {
            document,
            panel,
            event_bus,
            selected: None,
        }
    }

    /// Current selection, re-resolved by id so deleted objects read as nothing.
    pub fn selection(&self) -> Target {
        match &self.selected {
            Some(id) => self.document.select(id),
            None => Target::NothingSelected,
        }
    }

    /// Select an object by id (or nothing) and render the panel for it.
    pub fn select(&mut self, id: Option<&str>) -> Result<()> {
        self.selected = id.map(str::to_string);
        self.refresh()
    }

    /// Re-render the panel for the current selection.
    pub fn refresh(&mut self) -> Result<()> {
        let target = self.selection();
        self.panel.show_properties_of(&target)
    }

    /// Type into an input, or pick a select option by label (falling back to its value).
    pub fn edit(&mut self, name: &str, value: &str) -> Result<()> {
        let surface = self.panel.surface_mut();
        let is_select = surface.input(name).is_some_and(|i| i.kind == InputKind::Select);
        if is_select && surface.choose(name, value).is_ok() {
            return Ok(());
        }
        surface.edit(name, value)
    }

    /// Fire a trigger of the current render, then re-render the selection.
    pub fn fire(&mut self, trigger_id: &str) -> Result<()> {
        self.panel
            .fire(trigger_id)
            .with_context(|| format!("Trigger {trigger_id} failed"))?;
        self.refresh()
    }

    /// Apply `edits` through the panel form and fire `trigger` (apply by default).
    pub fn run(&mut self, edits: &[(String, String)], trigger: Option<&str>) -> Result<()> {
        for (name, value) in edits {
            self.edit(name, value)?;
        }
        if !edits.is_empty() || trigger.is_some() {
            self.fire(trigger.unwrap_or(APPLY_TRIGGER))?;
        }
        Ok(())
    }

    /// Drain queued panel events, logging each. Returns how many were handled.
    pub fn process_events(&mut self) -> usize {
        let events = self.event_bus.poll();
        for event in &events {
            if let Some(e) = downcast_event::<PanelRenderedEvent>(event) {
                debug!("Panel rendered: {} {:?} ({} rows)", e.kind, e.id, e.rows);
            } else if let Some(e) = downcast_event::<PropertiesAppliedEvent>(event) {
                info!("Applied {} properties to {} {}", e.written.len(), e.kind, e.id);
            } else if let Some(e) = downcast_event::<TableAlteredEvent>(event) {
                info!("{} at ({}, {}) on table {}", e.request.kind, e.request.row, e.request.column, e.table_id);
            } else {
                debug!("Unhandled event: {}", event.type_name());
            }
        }
        events.len()
    }

    /// Title and body markup as currently displayed.
    pub fn render_text(&self) -> String {
        let surface = self.panel.surface();
        let title = surface.title().unwrap_or_default();
        match surface.body() {
            Some(body) if body.visible => format!("{title}\n\n{}", body.content),
            _ => title.to_string(),
        }
    }
}

/// Default log filter for a `-v` count.
pub fn default_log_level(verbosity: u8) -> &'static str {
    // 0 (default) = warn, 1 (-v) = info, 2 (-vv) = debug, 3+ (-vvv) = trace
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Console logger; RUST_LOG wins over the verbosity count.
pub fn init_logger(verbosity: u8) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_log_level(verbosity)))
        .format_timestamp_millis()
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::UnitFile;
    use crate::widgets::props::ADD_ROW_TRIGGER;

    fn shell() -> Shell {
        let file: UnitFile = serde_json::from_str(
            r#"{ "id": "u", "pages": [{ "id": "p", "elements": [
                { "id": "box", "elementType": "textBox", "properties": {
                    "align": { "value": "l", "propertyType": "dropdown",
                               "propertyData": { "Left": "l", "Right": "r" } },
                    "text": { "value": "hi", "propertyType": "text" } } },
                { "id": "grid", "elementType": "table", "cells": [[{}, {}]] } ] }] }"#,
        )
        .unwrap();
        Shell::new(Document::from_file(file).unwrap(), &PanelConfig::default())
    }

    #[test]
    fn test_edit_and_apply() {
        let mut shell = shell();
        shell.select(Some("box")).unwrap();
        let edits = vec![("text".to_string(), "bye".to_string()), ("align".to_string(), "Right".to_string())];
        shell.run(&edits, None).unwrap();

        let Target::UnitElement(element) = shell.selection() else {
            panic!("box should still be selected");
        };
        assert_eq!(element.borrow().property_value("text"), Some("bye"));
        assert_eq!(element.borrow().property_value("align"), Some("r"));
        assert!(shell.process_events() >= 3);
        assert!(shell.render_text().starts_with("Properties of box"));
    }

    #[test]
    fn test_structural_trigger_rerenders_cell() {
        let mut shell = shell();
        shell.select(Some("grid_cell1")).unwrap();
        shell.run(&[], Some(ADD_ROW_TRIGGER)).unwrap();

        let Target::UnitElement(grid) = shell.document.select("grid") else {
            panic!("grid should be an element");
        };
        assert_eq!(grid.borrow().id(), "grid");
        assert!(shell.document.select("grid_cell3").kind() == crate::entities::ObjectKind::TableCell);
    }

    #[test]
    fn test_verbosity_levels() {
        let levels: Vec<_> = (0..5).map(default_log_level).collect();
        assert_eq!(levels, ["warn", "info", "debug", "trace", "trace"]);
    }

    #[test]
    fn test_unknown_selection_shows_nothing() {
        let mut shell = shell();
        shell.select(Some("nope")).unwrap();
        assert_eq!(shell.render_text(), "Nothing selected");
        assert!(shell.run(&[], Some(APPLY_TRIGGER)).is_err());
    }
}

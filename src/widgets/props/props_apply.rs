//! Property panel - apply pass and structural table edits.
//!
//! Apply copies every named input back onto the target, one property at a
//! time, then runs exactly one post-update action for the target's kind:
//! - table cell: `resize(width, height)` from its own values, then re-render the owning table
//! - element / page / unit: re-render the object itself
//! - nothing selected: no action
//!
//! Writes are best-effort and sequential: a failed write is logged and skipped,
//! earlier writes stay in place.

use std::cell::RefCell;
use std::rc::Weak;

use anyhow::{Context, Result};
use log::{debug, trace, warn};

use crate::entities::keys::{P_HEIGHT, P_WIDTH};
use crate::entities::{AlterTableRequest, ObjectWithProperties, TableCellObject, TableObject, Target};

use super::props::PropertiesPanel;
use super::props_events::{PropertiesAppliedEvent, TableAlteredEvent};
use super::surface::{DisplaySurface, FormInput};

/// Write each named input onto `object`. Returns the names actually written.
fn write_inputs<O: ObjectWithProperties + ?Sized>(object: &mut O, inputs: &[FormInput]) -> Vec<String> {
    let mut written = Vec::with_capacity(inputs.len());
    for input in inputs {
        let Some(name) = input.name.as_deref() else {
            continue;
        };
        match object.set_property_value(name, &input.value) {
            Ok(()) => {
                trace!("{}.{} = {:?}", object.id(), name, input.value);
                written.push(name.to_string());
            }
            Err(e) => warn!("Skipping input {name}: {e:#}"),
        }
    }
    written
}

fn update_table_cell(cell: &RefCell<dyn TableCellObject>) {
    let (size, table) = {
        let cell = cell.borrow();
        let size = cell
            .property_value(P_WIDTH)
            .zip(cell.property_value(P_HEIGHT))
            .map(|(w, h)| (w.to_string(), h.to_string()));
        (size, cell.parent_table())
    };

    match size {
        Some((width, height)) => cell.borrow_mut().resize(&width, &height),
        None => warn!("Table cell {} has no width/height, not resized", cell.borrow().id()),
    }
    match table {
        Some(table) => table.borrow_mut().render(),
        None => warn!("Table cell {} has lost its table, nothing re-rendered", cell.borrow().id()),
    }
}

impl<S: DisplaySurface> PropertiesPanel<S> {
    /// Copy edited inputs onto `target` and run its post-update action.
    pub fn apply_new_properties(&mut self, target: &Target) -> Result<()> {
        let inputs = self.surface.inputs()?;

        let written = match target {
            Target::UnitElement(element) => {
                let written = write_inputs(&mut *element.borrow_mut(), &inputs);
                element.borrow_mut().render();
                written
            }
            Target::TableCell(cell) => {
                let written = write_inputs(&mut *cell.borrow_mut(), &inputs);
                update_table_cell(cell);
                written
            }
            Target::UnitPage(page) => {
                let written = write_inputs(&mut *page.borrow_mut(), &inputs);
                page.borrow_mut().render();
                written
            }
            Target::Unit(unit) => {
                let written = write_inputs(&mut *unit.borrow_mut(), &inputs);
                unit.borrow_mut().render();
                written
            }
            Target::NothingSelected => {
                debug!("Apply with nothing selected, ignored");
                return Ok(());
            }
        };

        let id = target.id().unwrap_or_default();
        debug!("Applied {} properties to {} {}", written.len(), target.kind(), id);
        self.emitter.emit(PropertiesAppliedEvent { id, kind: target.kind(), written });
        Ok(())
    }

    /// Forward a captured structural edit to the owning table.
    pub(super) fn alter_table(&mut self, table: &Weak<RefCell<dyn TableObject>>, request: AlterTableRequest) -> Result<()> {
        let table = table
            .upgrade()
            .context("The table of the edited cell no longer exists")?;
        let table_id = {
            let mut table = table.borrow_mut();
            table
                .alter_table(request.kind, request.row, request.column)
                .with_context(|| format!("{} failed on table {}", request.kind, table.id()))?;
            table.id().to_string()
        };
        debug!("{} at ({}, {}) on {}", request.kind, request.row, request.column, table_id);
        self.emitter.emit(TableAlteredEvent { table_id, request });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::event_bus::{downcast_event, EventBus, PanelEventEmitter};
    use crate::entities::keys::{P_COLUMN_NUMBER, P_ROW_NUMBER};
    use crate::entities::testing::{MockElement, MockPage, MockTable, MockTableCell, MockUnit};
    use crate::entities::{AlterTableKind, Properties, Property};
    use crate::widgets::props::{test_panel, ADD_ROW_TRIGGER, APPLY_TRIGGER, DELETE_COLUMN_TRIGGER};

    #[test]
    fn test_text_round_trip_unchanged() {
        let props = Properties::new()
            .with("label", Property::text("Hello, world"))
            .with("quote", Property::text(r#"say "hi" & <bye>"#));
        let element = MockElement::shared("el", props);
        let target = Target::UnitElement(element.clone());
        let mut panel = test_panel();

        panel.show_properties_of(&target).unwrap();
        assert!(panel.surface().body().unwrap().content.contains("say &quot;hi&quot;"));
        panel.fire(APPLY_TRIGGER).unwrap();

        let element = element.borrow();
        assert_eq!(element.property_value("label"), Some("Hello, world"));
        assert_eq!(element.property_value("quote"), Some(r#"say "hi" & <bye>"#));
    }

    #[test]
    fn test_entity_text_survives_unchanged_apply() {
        let props = Properties::new()
            .with("text", Property::text("a &quot; b"))
            .with("size", Property::number("&quot;1"))
            .with("mode", Property::dropdown("x&quot;y", [("Odd", "x&quot;y"), ("Plain", "p")]));
        let element = MockElement::shared("el", props);
        let target = Target::UnitElement(element.clone());
        let mut panel = test_panel();

        panel.show_properties_of(&target).unwrap();
        assert_eq!(panel.surface().input("mode").unwrap().selected_label(), Some("Odd"));
        panel.fire(APPLY_TRIGGER).unwrap();
        panel.fire(APPLY_TRIGGER).unwrap();

        let element = element.borrow();
        assert_eq!(element.property_value("text"), Some("a &quot; b"));
        assert_eq!(element.property_value("size"), Some("&quot;1"));
        assert_eq!(element.property_value("mode"), Some("x&quot;y"));
    }

    #[test]
    fn test_edits_are_written_back() {
        let props = Properties::new()
            .with("label", Property::text("old"))
            .with("color", Property::dropdown("r", [("Red", "r"), ("Blue", "b")]))
            .with("visible", Property::boolean(true));
        let element = MockElement::shared("el", props);
        let target = Target::UnitElement(element.clone());
        let mut panel = test_panel();

        panel.show_properties_of(&target).unwrap();
        panel.surface_mut().edit("label", "new").unwrap();
        panel.surface_mut().choose("color", "Blue").unwrap();
        panel.surface_mut().choose("visible", "false").unwrap();
        panel.apply_new_properties(&target).unwrap();

        let element = element.borrow();
        assert_eq!(element.property_value("label"), Some("new"));
        assert_eq!(element.property_value("color"), Some("b"));
        assert_eq!(element.property_value("visible"), Some("false"));
    }

    #[test]
    fn test_boolean_and_dropdown_unchanged_round_trip() {
        let props = Properties::new()
            .with("flag", Property::boolean(true))
            .with("color", Property::dropdown("b", [("Red", "r"), ("Blue", "b")]));
        let element = MockElement::shared("el", props);
        let target = Target::UnitElement(element.clone());
        let mut panel = test_panel();

        panel.show_properties_of(&target).unwrap();
        assert_eq!(panel.surface().input("color").unwrap().selected_label(), Some("Blue"));
        panel.fire(APPLY_TRIGGER).unwrap();

        assert_eq!(element.borrow().property_value("flag"), Some("true"));
        assert_eq!(element.borrow().property_value("color"), Some("b"));
    }

    #[test]
    fn test_hidden_and_read_only_untouched() {
        let props = Properties::new()
            .with("shown", Property::text("a"))
            .with("secret", Property::text("keep").hidden())
            .with("id", Property::text("fixed").read_only());
        let element = MockElement::shared("el", props);
        let target = Target::UnitElement(element.clone());
        let mut panel = test_panel();

        panel.show_properties_of(&target).unwrap();
        // Object changes behind the panel's back; apply must not clobber these
        element.borrow_mut().properties_mut().set_value("secret", "changed").unwrap();
        element.borrow_mut().properties_mut().set_value("id", "changed").unwrap();
        panel.fire(APPLY_TRIGGER).unwrap();

        let element = element.borrow();
        assert_eq!(element.property_value("secret"), Some("changed"));
        assert_eq!(element.property_value("id"), Some("changed"));
    }

    #[test]
    fn test_unnamed_and_unknown_inputs_skipped() {
        let element = MockElement::shared("el", Properties::new().with("a", Property::text("1")));
        let inputs = vec![
            FormInput { name: None, ..input("a", "ignored") },
            input("missing", "x"),
            input("a", "2"),
        ];
        let written = write_inputs(&mut *element.borrow_mut(), &inputs);
        assert_eq!(written, ["a"]);
        assert_eq!(element.borrow().property_value("a"), Some("2"));
        assert!(!element.borrow().properties().contains("missing"));
    }

    fn input(name: &str, value: &str) -> FormInput {
        FormInput {
            name: Some(name.into()),
            kind: crate::widgets::props::InputKind::TextArea,
            value: value.into(),
            options: Vec::new(),
        }
    }

    #[test]
    fn test_apply_renders_element_exactly_once() {
        let element = MockElement::shared("el", Properties::new().with("a", Property::text("1")));
        let other = MockElement::shared("other", Properties::new());
        let target = Target::UnitElement(element.clone());
        let mut panel = test_panel();

        panel.show_properties_of(&target).unwrap();
        assert_eq!(element.borrow().renders, 0);
        panel.fire(APPLY_TRIGGER).unwrap();

        assert_eq!(element.borrow().renders, 1);
        assert_eq!(other.borrow().renders, 0);
    }

    #[test]
    fn test_apply_renders_page_and_unit() {
        let page = MockPage::shared("page1", Properties::new().with("title", Property::text("t")));
        let unit = MockUnit::shared("unit", Properties::new().with("name", Property::text("u")));
        let mut panel = test_panel();

        let page_target = Target::UnitPage(page.clone());
        panel.show_properties_of(&page_target).unwrap();
        panel.apply_new_properties(&page_target).unwrap();
        assert_eq!(page.borrow().renders, 1);

        let unit_target = Target::Unit(unit.clone());
        panel.show_properties_of(&unit_target).unwrap();
        panel.apply_new_properties(&unit_target).unwrap();
        assert_eq!(unit.borrow().renders, 1);
        assert_eq!(page.borrow().renders, 1);
    }

    #[test]
    fn test_table_cell_apply_resizes_and_renders_table() {
        let table = MockTable::shared("table1");
        let cell = MockTableCell::shared("cell", &table, 0, 0);
        let target = Target::TableCell(cell.clone());
        let mut panel = test_panel();

        panel.show_properties_of(&target).unwrap();
        panel.surface_mut().edit("width", "150").unwrap();
        panel.fire(APPLY_TRIGGER).unwrap();

        assert_eq!(cell.borrow().resized, vec![("150".to_string(), "40".to_string())]);
        assert_eq!(cell.borrow().renders, 0);
        assert_eq!(table.borrow().renders, 1);
    }

    #[test]
    fn test_structural_trigger_uses_render_time_coordinates() {
        let table = MockTable::shared("table1");
        let cell = MockTableCell::shared("cell", &table, 2, 3);
        let mut panel = test_panel();

        panel.show_properties_of(&Target::TableCell(cell.clone())).unwrap();
        {
            let mut cell = cell.borrow_mut();
            cell.properties_mut().set_value(P_ROW_NUMBER, "7").unwrap();
            cell.properties_mut().set_value(P_COLUMN_NUMBER, "8").unwrap();
        }
        panel.fire(ADD_ROW_TRIGGER).unwrap();
        panel.fire(DELETE_COLUMN_TRIGGER).unwrap();

        assert_eq!(
            table.borrow().altered,
            vec![(AlterTableKind::AddRow, 2, 3), (AlterTableKind::DeleteColumn, 2, 3)]
        );
    }

    #[test]
    fn test_structural_trigger_after_table_dropped() {
        let table = MockTable::shared("table1");
        let cell = MockTableCell::shared("cell", &table, 0, 0);
        let mut panel = test_panel();
        panel.show_properties_of(&Target::TableCell(cell)).unwrap();

        drop(table);
        assert!(panel.fire(ADD_ROW_TRIGGER).is_err());
    }

    #[test]
    fn test_structural_failure_propagates() {
        let table = MockTable::shared("table1");
        table.borrow_mut().fail = true;
        let cell = MockTableCell::shared("cell", &table, 0, 0);
        let mut panel = test_panel();
        panel.show_properties_of(&Target::TableCell(cell)).unwrap();

        let err = panel.fire(ADD_ROW_TRIGGER).unwrap_err();
        assert!(format!("{err:#}").contains("addRow failed on table table1"));
        assert!(table.borrow().altered.is_empty());
    }

    #[test]
    fn test_unknown_trigger_is_error() {
        let mut panel = test_panel();
        panel.show_properties_of(&Target::NothingSelected).unwrap();
        assert!(panel.fire(APPLY_TRIGGER).is_err());
        assert!(panel.apply_new_properties(&Target::NothingSelected).is_ok());
    }

    #[test]
    fn test_events_emitted() {
        let bus = EventBus::new();
        let mut panel = test_panel().with_emitter(PanelEventEmitter::from_emitter(bus.emitter()));
        let table = MockTable::shared("table1");
        let cell = MockTableCell::shared("cell", &table, 1, 1);

        panel.show_properties_of(&Target::TableCell(cell.clone())).unwrap();
        panel.fire(APPLY_TRIGGER).unwrap();
        panel.fire(ADD_ROW_TRIGGER).unwrap();

        let events = bus.poll();
        assert_eq!(events.len(), 3);
        let applied = downcast_event::<PropertiesAppliedEvent>(&events[1]).unwrap();
        assert_eq!(applied.id, "cell");
        assert!(applied.written.contains(&"width".to_string()));
        let altered = downcast_event::<TableAlteredEvent>(&events[2]).unwrap();
        assert_eq!(altered.table_id, "table1");
        assert_eq!(altered.request.kind, AlterTableKind::AddRow);
    }

    #[test]
    fn test_reapply_is_idempotent() {
        let props = Properties::new()
            .with("a", Property::text("x"))
            .with("n", Property::number("3"))
            .with("c", Property::dropdown("zz", [("Red", "r")]));
        let element = MockElement::shared("el", props);
        let target = Target::UnitElement(element.clone());
        let mut panel = test_panel();

        panel.show_properties_of(&target).unwrap();
        let before = element.borrow().properties().clone();
        panel.fire(APPLY_TRIGGER).unwrap();
        panel.fire(APPLY_TRIGGER).unwrap();

        assert_eq!(*element.borrow().properties(), before);
        assert_eq!(element.borrow().renders, 2);
    }
}

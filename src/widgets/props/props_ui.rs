//! Property panel - render pass
//!
//! Turns an object's [`Properties`] into a sorted list of typed rows and puts
//! them on the display surface together with the triggers for the selection.
//!
//! # Ordering
//! - the property named `type` always comes first (keyed on the name, not the caption)
//! - everything else by caption, byte-wise ascending; ties keep insertion order
//!
//! # Widgets
//! - read-only property -> escaped text
//! - `text` -> multi-line text input, `number` -> numeric input
//! - `boolean` -> `true`/`false` select, `dropdown` -> select over `propertyData`
//! - unknown type tag -> empty value cell
//!
//! Hidden properties produce no row and therefore no input.

use std::cmp::Ordering;

use anyhow::Result;
use log::debug;

use crate::config::Labels;
use crate::entities::keys::P_TYPE;
use crate::entities::{ObjectWithProperties, Properties, Property, PropertyType, Target};

use super::markup;
use super::props::{PropertiesPanel, Trigger};
use super::props_events::PanelRenderedEvent;
use super::surface::{DisplaySurface, FormInput, InputKind, PanelBody, SelectOption};

/// Value cell of a property row. Values are raw; escaping happens only in the markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Widget {
    Display { text: String },
    TextArea { value: String },
    Number { value: String },
    /// `fallback` is what the input submits when no option is pre-selected
    Select { options: Vec<SelectOption>, fallback: String },
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyRow {
    pub name: String,
    pub caption: String,
    pub tooltip: String,
    pub widget: Widget,
}

impl PropertyRow {
    fn build(name: &str, prop: &Property) -> Self {
        Self {
            name: name.to_string(),
            caption: prop.effective_caption(name).to_string(),
            tooltip: prop.tooltip_or_empty().to_string(),
            widget: widget_for(prop),
        }
    }

    /// Live form input for this row, seeded with the raw stored values.
    pub fn input(&self) -> Option<FormInput> {
        let (kind, value, options) = match &self.widget {
            Widget::TextArea { value } => (InputKind::TextArea, value.clone(), Vec::new()),
            Widget::Number { value } => (InputKind::Number, value.clone(), Vec::new()),
            Widget::Select { options, fallback } => {
                let options = options.clone();
                let value = options
                    .iter()
                    .find(|o| o.selected)
                    .map_or_else(|| fallback.clone(), |o| o.value.clone());
                (InputKind::Select, value, options)
            }
            Widget::Display { .. } | Widget::Empty => return None,
        };
        Some(FormInput { name: Some(self.name.clone()), kind, value, options })
    }
}

fn widget_for(prop: &Property) -> Widget {
    if !prop.user_adjustable {
        return Widget::Display { text: prop.value.clone() };
    }
    match &prop.property_type {
        PropertyType::Text => Widget::TextArea { value: prop.value.clone() },
        PropertyType::Number => Widget::Number { value: prop.value.clone() },
        PropertyType::Boolean => {
            let is_true = prop.value == "true";
            let option = |v: &str, selected| SelectOption { label: v.into(), value: v.into(), selected };
            Widget::Select {
                options: vec![option("true", is_true), option("false", !is_true)],
                fallback: prop.value.clone(),
            }
        }
        PropertyType::Dropdown => Widget::Select {
            options: prop
                .property_data
                .iter()
                .map(|(label, value)| SelectOption {
                    label: label.clone(),
                    value: value.clone(),
                    selected: *value == prop.value,
                })
                .collect(),
            fallback: prop.value.clone(),
        },
        PropertyType::Other(_) => Widget::Empty,
    }
}

/// Comparator for panel order: `type` first, then caption ascending.
fn display_cmp(props: &Properties, a: &str, b: &str) -> Ordering {
    match (a == P_TYPE, b == P_TYPE) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => {
            let caption = |name: &str| props.get(name).map_or("", |p| p.effective_caption(name)).to_string();
            caption(a).cmp(&caption(b))
        }
    }
}

/// Property names in panel order, hidden ones included.
pub fn display_order(props: &Properties) -> Vec<String> {
    let mut names: Vec<&str> = props.names().collect();
    names.sort_by(|a, b| display_cmp(props, a, b));
    names.into_iter().map(String::from).collect()
}

/// Normalize captions, then build the visible rows in panel order.
pub fn property_rows<O: ObjectWithProperties + ?Sized>(object: &mut O) -> Vec<PropertyRow> {
    let filled = object.properties_mut().normalize_captions();
    if filled > 0 {
        debug!("Filled {} default captions on {}", filled, object.id());
    }

    let props = object.properties();
    display_order(props)
        .iter()
        .filter_map(|name| {
            let prop = props.get(name)?;
            (!prop.hidden).then(|| PropertyRow::build(name, prop))
        })
        .collect()
}

impl<S: DisplaySurface> PropertiesPanel<S> {
    /// Render the panel for `target`, replacing whatever was shown before.
    ///
    /// A failed render leaves the cleared "nothing selected" surface behind,
    /// never a mix of the previous target's body and no triggers.
    pub fn show_properties_of(&mut self, target: &Target) -> Result<()> {
        self.triggers.clear();

        let prepared = match Self::prepare(target, &self.labels) {
            Ok(prepared) => prepared,
            Err(e) => {
                self.clear_surface()?;
                return Err(e);
            }
        };
        let Some((id, rows, triggers)) = prepared else {
            self.clear_surface()?;
            debug!("Property panel cleared");
            self.emitter.emit(PanelRenderedEvent { id: None, kind: target.kind(), rows: 0 });
            return Ok(());
        };

        let body = PanelBody {
            markup: markup::panel_body(&rows, &triggers),
            inputs: rows.iter().filter_map(PropertyRow::input).collect(),
        };
        self.surface.set_title(&format!("{} {}", self.labels.properties_of, id))?;
        self.surface.set_body(body)?;
        self.surface.set_body_visible(true)?;
        self.triggers = triggers;

        debug!("Rendered {} rows for {} {}", rows.len(), target.kind(), id);
        self.emitter.emit(PanelRenderedEvent { id: Some(id), kind: target.kind(), rows: rows.len() });
        Ok(())
    }

    fn clear_surface(&mut self) -> Result<()> {
        self.surface.set_title(&self.labels.nothing_selected)?;
        self.surface.set_body(PanelBody::default())?;
        self.surface.set_body_visible(false)
    }

    /// Rows and triggers for `target`; `None` when nothing is selected.
    /// Touches only the target (caption fill), never the surface.
    fn prepare(target: &Target, labels: &Labels) -> Result<Option<(String, Vec<PropertyRow>, Vec<Trigger>)>> {
        let prepared = match target {
            Target::NothingSelected => return Ok(None),
            Target::UnitElement(element) => {
                let mut element = element.borrow_mut();
                debug!("Rendering properties of {} element {}", element.element_type(), element.element_id());
                let rows = property_rows(&mut *element);
                (element.id().to_string(), rows, vec![Trigger::apply(target, labels)])
            }
            Target::TableCell(cell) => {
                let mut cell = cell.borrow_mut();
                let (row, column) = cell.coordinates()?;
                let rows = property_rows(&mut *cell);
                let mut triggers = vec![Trigger::apply(target, labels)];
                triggers.extend(Trigger::structural(&cell.parent_table_weak(), row, column, labels));
                (cell.id().to_string(), rows, triggers)
            }
            Target::UnitPage(page) => {
                let mut page = page.borrow_mut();
                let rows = property_rows(&mut *page);
                (page.id().to_string(), rows, vec![Trigger::apply(target, labels)])
            }
            Target::Unit(unit) => {
                let mut unit = unit.borrow_mut();
                let rows = property_rows(&mut *unit);
                (unit.id().to_string(), rows, vec![Trigger::apply(target, labels)])
            }
        };
        Ok(Some(prepared))
    }
}

//! In-memory authoring document: a unit with pages, elements and tables.
//!
//! Unit files are JSON:
//!
//! ```json
//! { "id": "unit1", "properties": { ... },
//!   "pages": [ { "id": "page1", "properties": { ... },
//!     "elements": [
//!       { "id": "title", "elementType": "textBox", "properties": { ... } },
//!       { "id": "grid", "elementType": "table", "properties": { ... },
//!         "cells": [[ { ... }, { ... } ]] } ] } ] }
//! ```
//!
//! Runtime links (cell -> table) are rebuilt on load; the file only carries data.

pub mod table;
pub mod unit;

use std::cell::RefCell;
use std::fs;
use std::path::Path;
use std::rc::Rc;

use anyhow::{Context, Result, bail};
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::entities::{ObjectWithProperties, Properties, Target, UnitElementObject};

pub use table::{CellHandle, TABLE_ELEMENT_TYPE, TableCell, TableElement};
pub use unit::{PageElement, Unit, UnitElement, UnitPage};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementFile {
    pub id: String,
    pub element_type: String,
    #[serde(default)]
    pub properties: Properties,
    /// Table cells, row-major. Only used for `elementType: "table"`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cells: Vec<Vec<Properties>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageFile {
    pub id: String,
    #[serde(default)]
    pub properties: Properties,
    #[serde(default)]
    pub elements: Vec<ElementFile>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitFile {
    pub id: String,
    #[serde(default)]
    pub properties: Properties,
    #[serde(default)]
    pub pages: Vec<PageFile>,
}

pub struct Document {
    pub unit: Rc<RefCell<Unit>>,
}

impl Document {
    pub fn from_file(file: UnitFile) -> Result<Self> {
        let mut unit = Unit::new(&file.id, file.properties);
        for page_file in file.pages {
            let mut page = UnitPage::new(&page_file.id, page_file.properties);
            for el in page_file.elements {
                let element = if el.element_type == TABLE_ELEMENT_TYPE {
                    let width = el.cells.first().map_or(0, Vec::len);
                    if el.cells.is_empty() || width == 0 {
                        bail!("Table {} has no cells", el.id);
                    }
                    if let Some(bad) = el.cells.iter().position(|row| row.len() != width) {
                        bail!("Table {}: row {} has {} cells, expected {}", el.id, bad, el.cells[bad].len(), width);
                    }
                    PageElement::Table(TableElement::new(&el.id, el.properties, el.cells))
                } else {
                    PageElement::Plain(Rc::new(RefCell::new(UnitElement::new(
                        &el.id,
                        &el.element_type,
                        el.properties,
                    ))))
                };
                page.elements.push(element);
            }
            unit.pages.push(Rc::new(RefCell::new(page)));
        }
        Ok(Self { unit: Rc::new(RefCell::new(unit)) })
    }

    /// Load a unit file and rebuild runtime links.
    pub fn from_json<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).with_context(|| format!("Failed to read unit file {}", path.display()))?;
        let file: UnitFile =
            serde_json::from_str(&json).with_context(|| format!("Failed to parse unit file {}", path.display()))?;
        let doc = Self::from_file(file).with_context(|| format!("Invalid unit file {}", path.display()))?;
        info!("Loaded unit {} from {}", doc.unit.borrow().id(), path.display());
        Ok(doc)
    }

    /// Snapshot the current state back into the file model.
    pub fn to_file(&self) -> UnitFile {
        let unit = self.unit.borrow();
        let pages = unit
            .pages
            .iter()
            .map(|page| {
                let page = page.borrow();
                let elements = page
                    .elements
                    .iter()
                    .map(|slot| match slot {
                        PageElement::Plain(e) => {
                            let e = e.borrow();
                            ElementFile {
                                id: e.id().to_string(),
                                element_type: e.element_type().to_string(),
                                properties: e.properties().clone(),
                                cells: Vec::new(),
                            }
                        }
                        PageElement::Table(t) => {
                            let t = t.borrow();
                            ElementFile {
                                id: slot.id(),
                                element_type: TABLE_ELEMENT_TYPE.to_string(),
                                properties: t.properties().clone(),
                                cells: t.cell_properties(),
                            }
                        }
                    })
                    .collect();
                PageFile {
                    id: page.id().to_string(),
                    properties: page.properties().clone(),
                    elements,
                }
            })
            .collect();
        UnitFile {
            id: unit.id().to_string(),
            properties: unit.properties().clone(),
            pages,
        }
    }

    pub fn to_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(&self.to_file()).context("Failed to serialize unit")?;
        fs::write(path, json).with_context(|| format!("Failed to write unit file {}", path.display()))?;
        debug!("Saved unit to {}", path.display());
        Ok(())
    }

    /// Resolve an id to a selection. Unknown ids select nothing.
    ///
    /// Search order: unit, pages, page elements, table cells.
    pub fn select(&self, id: &str) -> Target {
        if self.unit.borrow().id() == id {
            return Target::Unit(self.unit.clone());
        }
        let unit = self.unit.borrow();
        for page in &unit.pages {
            if page.borrow().id() == id {
                return Target::UnitPage(page.clone());
            }
        }
        for page in &unit.pages {
            for slot in &page.borrow().elements {
                if slot.id() == id {
                    return Target::UnitElement(slot.as_element());
                }
                if let PageElement::Table(t) = slot
                    && let Some(cell) = t.borrow().find_cell(id)
                {
                    return Target::TableCell(cell);
                }
            }
        }
        debug!("Nothing with id {id:?} in unit {}", unit.id());
        Target::NothingSelected
    }
}

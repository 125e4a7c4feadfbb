//! Editable-object capability: what the property panel needs from a domain object.
//!
//! The panel never owns or reimplements domain behaviour. It talks to objects
//! through these traits and selects behaviour by matching on [`Target`], a
//! closed union over the object kinds the authoring tool can select.
//!
//! Objects are shared with the surrounding document as `Rc<RefCell<_>>`
//! handles; the panel runs on the UI thread only.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::keys::{P_COLUMN_NUMBER, P_ROW_NUMBER};
use super::property::Properties;

/// Kind tag of a selectable object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectKind {
    UnitElement,
    TableCell,
    UnitPage,
    Unit,
    #[serde(rename = "nothingSelected")]
    NothingSelected,
}

impl ObjectKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectKind::UnitElement => "UnitElement",
            ObjectKind::TableCell => "TableCell",
            ObjectKind::UnitPage => "UnitPage",
            ObjectKind::Unit => "Unit",
            ObjectKind::NothingSelected => "nothingSelected",
        }
    }
}

impl std::fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Anything that carries a property set and can be edited through the panel.
pub trait ObjectWithProperties {
    fn id(&self) -> &str;

    fn properties(&self) -> &Properties;

    fn properties_mut(&mut self) -> &mut Properties;

    fn property_value(&self, name: &str) -> Option<&str> {
        self.properties().value(name)
    }

    fn set_property_value(&mut self, name: &str, value: &str) -> Result<()> {
        self.properties_mut()
            .set_value(name, value)
            .with_context(|| format!("Failed to set property on {}", self.id()))
    }
}

/// Element placed on a unit page (text box, image, table container, ...).
pub trait UnitElementObject: ObjectWithProperties {
    fn element_type(&self) -> &str;

    fn element_id(&self) -> &str;

    fn render(&mut self);
}

pub trait UnitPageObject: ObjectWithProperties {
    fn render(&mut self);
}

pub trait UnitObject: ObjectWithProperties {
    fn render(&mut self);
}

/// Table that owns cells. Not itself selectable; reached through a cell.
pub trait TableObject {
    fn id(&self) -> &str;

    fn render(&mut self);

    fn alter_table(&mut self, kind: AlterTableKind, row: usize, column: usize) -> Result<()>;
}

pub type TableHandle = Rc<RefCell<dyn TableObject>>;

pub trait TableCellObject: ObjectWithProperties {
    /// Non-owning back-reference to the owning table.
    fn parent_table_weak(&self) -> Weak<RefCell<dyn TableObject>>;

    /// Owning table, if it is still alive.
    fn parent_table(&self) -> Option<TableHandle> {
        self.parent_table_weak().upgrade()
    }

    fn resize(&mut self, width: &str, height: &str);

    /// Current `(row, column)` read from the cell's own properties.
    fn coordinates(&self) -> Result<(usize, usize)> {
        let read = |name: &str| -> Result<usize> {
            let raw = self
                .property_value(name)
                .with_context(|| format!("Table cell {} has no {name} property", self.id()))?;
            raw.trim()
                .parse()
                .with_context(|| format!("Table cell {} has invalid {name}: {raw:?}", self.id()))
        };
        Ok((read(P_ROW_NUMBER)?, read(P_COLUMN_NUMBER)?))
    }
}

/// Structural edit requested from a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AlterTableKind {
    AddRow,
    AddColumn,
    DeleteRow,
    DeleteColumn,
}

impl AlterTableKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlterTableKind::AddRow => "addRow",
            AlterTableKind::AddColumn => "addColumn",
            AlterTableKind::DeleteRow => "deleteRow",
            AlterTableKind::DeleteColumn => "deleteColumn",
        }
    }
}

impl std::fmt::Display for AlterTableKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `(kind, row, column)` captured when the panel was rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AlterTableRequest {
    pub kind: AlterTableKind,
    pub row: usize,
    pub column: usize,
}

/// Current selection of the authoring tool.
#[derive(Clone)]
pub enum Target {
    UnitElement(Rc<RefCell<dyn UnitElementObject>>),
    TableCell(Rc<RefCell<dyn TableCellObject>>),
    UnitPage(Rc<RefCell<dyn UnitPageObject>>),
    Unit(Rc<RefCell<dyn UnitObject>>),
    NothingSelected,
}

impl Target {
    pub fn kind(&self) -> ObjectKind {
        match self {
            Target::UnitElement(_) => ObjectKind::UnitElement,
            Target::TableCell(_) => ObjectKind::TableCell,
            Target::UnitPage(_) => ObjectKind::UnitPage,
            Target::Unit(_) => ObjectKind::Unit,
            Target::NothingSelected => ObjectKind::NothingSelected,
        }
    }

    pub fn id(&self) -> Option<String> {
        match self {
            Target::UnitElement(o) => Some(o.borrow().id().to_string()),
            Target::TableCell(o) => Some(o.borrow().id().to_string()),
            Target::UnitPage(o) => Some(o.borrow().id().to_string()),
            Target::Unit(o) => Some(o.borrow().id().to_string()),
            Target::NothingSelected => None,
        }
    }

    pub fn is_nothing(&self) -> bool {
        matches!(self, Target::NothingSelected)
    }
}

impl std::fmt::Debug for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Target")
            .field("kind", &self.kind())
            .field("id", &self.id())
            .finish()
    }
}

//! Recording collaborators for panel tests.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use anyhow::{bail, Result};

use super::keys::{P_COLUMN_NUMBER, P_HEIGHT, P_ROW_NUMBER, P_WIDTH};
use super::{
    AlterTableKind, ObjectWithProperties, Properties, Property, TableCellObject, TableObject,
    UnitElementObject, UnitObject, UnitPageObject,
};

macro_rules! mock_object {
    ($name:ident, $trait_:ident) => {
        pub struct $name {
            pub id: String,
            pub props: Properties,
            pub renders: usize,
        }

        impl $name {
            pub fn shared(id: &str, props: Properties) -> Rc<RefCell<Self>> {
                Rc::new(RefCell::new(Self { id: id.to_string(), props, renders: 0 }))
            }
        }

        impl ObjectWithProperties for $name {
            fn id(&self) -> &str {
                &self.id
            }
            fn properties(&self) -> &Properties {
                &self.props
            }
            fn properties_mut(&mut self) -> &mut Properties {
                &mut self.props
            }
        }

        impl $trait_ for $name {
            fn render(&mut self) {
                self.renders += 1;
            }
        }
    };
}

mock_object!(MockPage, UnitPageObject);
mock_object!(MockUnit, UnitObject);

pub struct MockElement {
    pub id: String,
    pub props: Properties,
    pub renders: usize,
}

impl MockElement {
    pub fn shared(id: &str, props: Properties) -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self { id: id.to_string(), props, renders: 0 }))
    }
}

impl ObjectWithProperties for MockElement {
    fn id(&self) -> &str {
        &self.id
    }
    fn properties(&self) -> &Properties {
        &self.props
    }
    fn properties_mut(&mut self) -> &mut Properties {
        &mut self.props
    }
}

impl UnitElementObject for MockElement {
    fn element_type(&self) -> &str {
        "mock"
    }
    fn element_id(&self) -> &str {
        &self.id
    }
    fn render(&mut self) {
        self.renders += 1;
    }
}

pub struct MockTable {
    pub id: String,
    pub renders: usize,
    pub altered: Vec<(AlterTableKind, usize, usize)>,
    pub fail: bool,
}

impl MockTable {
    pub fn shared(id: &str) -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self { id: id.to_string(), renders: 0, altered: Vec::new(), fail: false }))
    }
}

impl TableObject for MockTable {
    fn id(&self) -> &str {
        &self.id
    }
    fn render(&mut self) {
        self.renders += 1;
    }
    fn alter_table(&mut self, kind: AlterTableKind, row: usize, column: usize) -> Result<()> {
        if self.fail {
            bail!("table is locked");
        }
        self.altered.push((kind, row, column));
        Ok(())
    }
}

pub struct MockTableCell {
    pub id: String,
    pub props: Properties,
    pub table: Weak<RefCell<dyn TableObject>>,
    pub renders: usize,
    pub resized: Vec<(String, String)>,
}

impl MockTableCell {
    /// Cell at `(row, column)` with width 100, height 40 and a text property.
    pub fn shared(id: &str, table: &Rc<RefCell<MockTable>>, row: usize, column: usize) -> Rc<RefCell<Self>> {
        let table: Rc<RefCell<dyn TableObject>> = table.clone();
        let props = Properties::new()
            .with(P_ROW_NUMBER, Property::number(row.to_string()).read_only())
            .with(P_COLUMN_NUMBER, Property::number(column.to_string()).read_only())
            .with(P_WIDTH, Property::number("100"))
            .with(P_HEIGHT, Property::number("40"))
            .with("text", Property::text(""));
        Rc::new(RefCell::new(Self {
            id: id.to_string(),
            props,
            table: Rc::downgrade(&table),
            renders: 0,
            resized: Vec::new(),
        }))
    }
}

impl ObjectWithProperties for MockTableCell {
    fn id(&self) -> &str {
        &self.id
    }
    fn properties(&self) -> &Properties {
        &self.props
    }
    fn properties_mut(&mut self) -> &mut Properties {
        &mut self.props
    }
}

impl TableCellObject for MockTableCell {
    fn parent_table_weak(&self) -> Weak<RefCell<dyn TableObject>> {
        self.table.clone()
    }
    fn resize(&mut self, width: &str, height: &str) {
        self.resized.push((width.to_string(), height.to_string()));
    }
}

//! Table element: a unit element holding a grid of editable cells.
//!
//! Cells point back at their table through a `Weak`; the table owns the cells.
//! Structural edits insert or remove whole rows/columns and renumber every
//! cell's `rowNumber`/`columnNumber` so the panel always reads fresh coordinates.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use anyhow::{bail, Result};
use log::{debug, warn};

use crate::entities::keys::{P_COLUMN_NUMBER, P_HEIGHT, P_ROW_NUMBER, P_WIDTH};
use crate::entities::{
    AlterTableKind, ObjectWithProperties, Properties, Property, TableCellObject, TableObject, UnitElementObject,
};

/// `elementType` of table elements in unit files
pub const TABLE_ELEMENT_TYPE: &str = "table";

/// Default cell size in pixels
pub const DEFAULT_CELL_WIDTH: f64 = 100.0;
pub const DEFAULT_CELL_HEIGHT: f64 = 30.0;

pub struct TableCell {
    id: String,
    props: Properties,
    table: Weak<RefCell<dyn TableObject>>,
    /// Last size accepted by `resize`
    pub size: (f64, f64),
}

impl TableCell {
    /// Properties every cell starts with.
    pub fn default_properties(row: usize, column: usize) -> Properties {
        Properties::new()
            .with(
                P_ROW_NUMBER,
                Property::number(row.to_string()).with_caption("Row").read_only(),
            )
            .with(
                P_COLUMN_NUMBER,
                Property::number(column.to_string()).with_caption("Column").read_only(),
            )
            .with(P_WIDTH, Property::number(DEFAULT_CELL_WIDTH.to_string()).with_caption("Width"))
            .with(P_HEIGHT, Property::number(DEFAULT_CELL_HEIGHT.to_string()).with_caption("Height"))
            .with("text", Property::text("").with_caption("Text"))
    }

    fn new(id: String, props: Properties, table: Weak<RefCell<dyn TableObject>>) -> Self {
        let width = props.value(P_WIDTH).and_then(|v| v.parse().ok()).unwrap_or(DEFAULT_CELL_WIDTH);
        let height = props.value(P_HEIGHT).and_then(|v| v.parse().ok()).unwrap_or(DEFAULT_CELL_HEIGHT);
        Self { id, props, table, size: (width, height) }
    }

    fn set_coordinates(&mut self, row: usize, column: usize) {
        for (name, value) in [(P_ROW_NUMBER, row), (P_COLUMN_NUMBER, column)] {
            if let Err(e) = self.props.set_value(name, value.to_string()) {
                warn!("Cell {}: cannot renumber: {e:#}", self.id);
            }
        }
    }
}

impl ObjectWithProperties for TableCell {
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

impl TableCellObject for TableCell {
    fn parent_table_weak(&self) -> Weak<RefCell<dyn TableObject>> {
        self.table.clone()
    }

    fn resize(&mut self, width: &str, height: &str) {
        match (width.trim().parse::<f64>(), height.trim().parse::<f64>()) {
            (Ok(w), Ok(h)) if w >= 0.0 && h >= 0.0 => {
                self.size = (w, h);
                debug!("Cell {} resized to {}x{}", self.id, w, h);
            }
            _ => warn!("Cell {}: ignoring invalid size {:?}x{:?}", self.id, width, height),
        }
    }
}

pub type CellHandle = Rc<RefCell<TableCell>>;

pub struct TableElement {
    id: String,
    props: Properties,
    rows: Vec<Vec<CellHandle>>,
    next_cell: usize,
    this: Weak<RefCell<TableElement>>,
    pub render_count: usize,
}

impl TableElement {
    /// Build a table from its element properties and per-cell overrides (row-major).
    ///
    /// Cell coordinates always come from the grid position, not from the overrides.
    pub fn new(id: &str, props: Properties, cells: Vec<Vec<Properties>>) -> Rc<RefCell<Self>> {
        Rc::new_cyclic(|this: &Weak<RefCell<TableElement>>| {
            let mut table = TableElement {
                id: id.to_string(),
                props,
                rows: Vec::new(),
                next_cell: 0,
                this: this.clone(),
                render_count: 0,
            };
            for (r, row) in cells.into_iter().enumerate() {
                let row = row
                    .into_iter()
                    .enumerate()
                    .map(|(c, overrides)| table.make_cell(r, c, overrides))
                    .collect();
                table.rows.push(row);
            }
            RefCell::new(table)
        })
    }

    /// Empty `rows x columns` table with default cells.
    pub fn with_size(id: &str, rows: usize, columns: usize) -> Rc<RefCell<Self>> {
        Self::new(id, Properties::new(), vec![vec![Properties::new(); columns]; rows])
    }

    fn make_cell(&mut self, row: usize, column: usize, overrides: Properties) -> CellHandle {
        let mut props = TableCell::default_properties(row, column);
        for (name, prop) in overrides.iter() {
            if name != P_ROW_NUMBER && name != P_COLUMN_NUMBER {
                props.insert(name.clone(), prop.clone());
            }
        }
        let id = format!("{}_cell{}", self.id, self.next_cell);
        self.next_cell += 1;
        let table: Weak<RefCell<dyn TableObject>> = self.this.clone();
        Rc::new(RefCell::new(TableCell::new(id, props, table)))
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    pub fn cell(&self, row: usize, column: usize) -> Option<&CellHandle> {
        self.rows.get(row)?.get(column)
    }

    pub fn cells(&self) -> impl Iterator<Item = &CellHandle> {
        self.rows.iter().flatten()
    }

    /// Current cell properties, row-major. Used when saving.
    pub fn cell_properties(&self) -> Vec<Vec<Properties>> {
        self.rows
            .iter()
            .map(|row| row.iter().map(|c| c.borrow().properties().clone()).collect())
            .collect()
    }

    /// Find a cell anywhere in the grid by id.
    pub fn find_cell(&self, id: &str) -> Option<CellHandle> {
        self.cells().find(|c| c.borrow().id() == id).cloned()
    }

    fn renumber(&mut self) {
        for (r, row) in self.rows.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                cell.borrow_mut().set_coordinates(r, c);
            }
        }
    }
}

impl ObjectWithProperties for TableElement {
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

impl UnitElementObject for TableElement {
    fn element_type(&self) -> &str {
        TABLE_ELEMENT_TYPE
    }

    fn element_id(&self) -> &str {
        &self.id
    }

    fn render(&mut self) {
        TableObject::render(self);
    }
}

impl TableObject for TableElement {
    fn id(&self) -> &str {
        &self.id
    }

    fn render(&mut self) {
        self.render_count += 1;
        debug!("Table {} rendered ({}x{})", self.id, self.row_count(), self.column_count());
    }

    /// Adds insert after the given row/column; deletes remove it.
    fn alter_table(&mut self, kind: AlterTableKind, row: usize, column: usize) -> Result<()> {
        let (rows, columns) = (self.row_count(), self.column_count());
        match kind {
            AlterTableKind::AddRow => {
                if row >= rows {
                    bail!("Row {row} out of range (table has {rows} rows)");
                }
                let new_row = (0..columns).map(|c| self.make_cell(row + 1, c, Properties::new())).collect();
                self.rows.insert(row + 1, new_row);
            }
            AlterTableKind::AddColumn => {
                if column >= columns {
                    bail!("Column {column} out of range (table has {columns} columns)");
                }
                for r in 0..rows {
                    let cell = self.make_cell(r, column + 1, Properties::new());
                    self.rows[r].insert(column + 1, cell);
                }
            }
            AlterTableKind::DeleteRow => {
                if row >= rows {
                    bail!("Row {row} out of range (table has {rows} rows)");
                }
                if rows == 1 {
                    bail!("Cannot delete the last row of table {}", self.id);
                }
                self.rows.remove(row);
            }
            AlterTableKind::DeleteColumn => {
                if column >= columns {
                    bail!("Column {column} out of range (table has {columns} columns)");
                }
                if columns == 1 {
                    bail!("Cannot delete the last column of table {}", self.id);
                }
                for cells in &mut self.rows {
                    cells.remove(column);
                }
            }
        }
        self.renumber();
        TableObject::render(self);
        Ok(())
    }
}

//! Entities module - the property model and the editable-object capability
//!
//! Domain objects (units, pages, elements, table cells) carry a [`Properties`]
//! set and expose it through [`ObjectWithProperties`]. The property panel only
//! ever sees them through these traits and the [`Target`] selection union.

pub mod keys;
pub mod object;
pub mod property;

#[cfg(test)]
pub(crate) mod testing;

pub use object::{
    AlterTableKind, AlterTableRequest, ObjectKind, ObjectWithProperties, TableCellObject, TableHandle,
    TableObject, Target, UnitElementObject, UnitObject, UnitPageObject,
};
pub use property::{Properties, Property, PropertyType};

//! Property key constants for `Properties` access.
//!
//! Avoid string typos, enable IDE autocomplete.
//! Usage: `cell.property_value(P_ROW_NUMBER)`

// === Identity ===
/// Type property - always listed first in the panel
pub const P_TYPE: &str = "type";

// === Geometry ===
/// Width (table cells feed this into `resize`)
pub const P_WIDTH: &str = "width";
/// Height (table cells feed this into `resize`)
pub const P_HEIGHT: &str = "height";

// === Table cells ===
/// Row index of a cell inside its table
pub const P_ROW_NUMBER: &str = "rowNumber";
/// Column index of a cell inside its table
pub const P_COLUMN_NUMBER: &str = "columnNumber";

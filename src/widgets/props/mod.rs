//! Property panel widget
//!
//! Renders the properties of the selected object and writes edits back

pub mod markup;
mod props;
mod props_apply;
pub mod props_events;
mod props_ui;
pub mod surface;

pub use props::{
    PropertiesPanel, Trigger, TriggerAction, ADD_COLUMN_TRIGGER, ADD_ROW_TRIGGER, APPLY_TRIGGER,
    DELETE_COLUMN_TRIGGER, DELETE_ROW_TRIGGER,
};
pub use props_events::{PanelRenderedEvent, PropertiesAppliedEvent, TableAlteredEvent};
pub use props_ui::{display_order, property_rows, PropertyRow, Widget};
pub use surface::{DisplaySurface, FormInput, InputKind, MemorySurface, PanelBody, SelectOption};

#[cfg(test)]
pub(crate) fn test_panel() -> PropertiesPanel<MemorySurface> {
    let config = crate::config::PanelConfig::default();
    PropertiesPanel::new(MemorySurface::new(&config), &config)
}

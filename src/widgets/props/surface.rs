//! Display surface the property panel draws into.
//!
//! The panel owns two addressable regions - a title and a body - and always
//! replaces their content wholesale. [`DisplaySurface`] is the seam to the real
//! display backend; [`MemorySurface`] is the in-process implementation used by
//! the CLI and tests, holding regions by id the way a page holds elements.

use std::collections::HashMap;

use anyhow::{bail, Context, Result};

use crate::config::PanelConfig;

/// CSS class marking an editable property input in the body markup.
pub const INPUT_CLASS: &str = "propertyInput";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    TextArea,
    Number,
    Select,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub label: String,
    pub value: String,
    pub selected: bool,
}

/// Editable element of the rendered body, as the user sees and edits it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormInput {
    /// Property the input writes back to. Unnamed inputs are never applied.
    pub name: Option<String>,
    pub kind: InputKind,
    /// Current (decoded) value
    pub value: String,
    /// Select options; empty for text and number inputs
    pub options: Vec<SelectOption>,
}

impl FormInput {
    /// Replace the value as if typed/selected by the user.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        if self.kind == InputKind::Select {
            for opt in &mut self.options {
                opt.selected = opt.value == self.value;
            }
        }
    }

    /// Pick a select option by its visible label.
    pub fn choose(&mut self, label: &str) -> Result<()> {
        let value = self
            .options
            .iter()
            .find(|o| o.label == label)
            .map(|o| o.value.clone())
            .with_context(|| format!("No option {label:?} in {:?}", self.name))?;
        self.set_value(value);
        Ok(())
    }

    pub fn selected_label(&self) -> Option<&str> {
        self.options.iter().find(|o| o.selected).map(|o| o.label.as_str())
    }
}

/// Body region content: markup plus the live inputs it contains.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PanelBody {
    pub markup: String,
    pub inputs: Vec<FormInput>,
}

/// Title/body regions owned by the property panel.
///
/// Every method fails when the backing region is missing: rendering into an
/// absent surface is a caller contract violation.
pub trait DisplaySurface {
    fn set_title(&mut self, text: &str) -> Result<()>;

    fn set_body(&mut self, body: PanelBody) -> Result<()>;

    fn set_body_visible(&mut self, visible: bool) -> Result<()>;

    /// Editable inputs currently present in the body, in document order.
    fn inputs(&self) -> Result<Vec<FormInput>>;
}

/// One addressable region of a [`MemorySurface`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Region {
    pub content: String,
    pub visible: bool,
    pub inputs: Vec<FormInput>,
}

/// In-memory page with regions addressed by id.
#[derive(Debug, Clone)]
pub struct MemorySurface {
    title_region: String,
    body_region: String,
    regions: HashMap<String, Region>,
}

impl MemorySurface {
    /// Surface with both configured regions present.
    pub fn new(config: &PanelConfig) -> Self {
        let mut surface = Self::without_regions(config);
        surface.add_region(&config.title_region);
        surface.add_region(&config.body_region);
        surface
    }

    /// Surface that knows the region ids but holds no regions yet.
    pub fn without_regions(config: &PanelConfig) -> Self {
        Self {
            title_region: config.title_region.clone(),
            body_region: config.body_region.clone(),
            regions: HashMap::new(),
        }
    }

    pub fn add_region(&mut self, id: &str) {
        self.regions.entry(id.to_string()).or_insert_with(|| Region {
            visible: true,
            ..Region::default()
        });
    }

    pub fn remove_region(&mut self, id: &str) -> Option<Region> {
        self.regions.remove(id)
    }

    pub fn region(&self, id: &str) -> Option<&Region> {
        self.regions.get(id)
    }

    pub fn title(&self) -> Option<&str> {
        self.region(&self.title_region).map(|r| r.content.as_str())
    }

    pub fn body(&self) -> Option<&Region> {
        self.region(&self.body_region)
    }

    pub fn input(&self, name: &str) -> Option<&FormInput> {
        self.body()?.inputs.iter().find(|i| i.name.as_deref() == Some(name))
    }

    pub fn input_mut(&mut self, name: &str) -> Option<&mut FormInput> {
        self.regions
            .get_mut(&self.body_region)?
            .inputs
            .iter_mut()
            .find(|i| i.name.as_deref() == Some(name))
    }

    /// Simulate the user editing input `name`.
    pub fn edit(&mut self, name: &str, value: &str) -> Result<()> {
        match self.input_mut(name) {
            Some(input) => {
                input.set_value(value);
                Ok(())
            }
            None => bail!("No input named {name:?} in the property panel"),
        }
    }

    /// Simulate the user picking option `label` in select `name`.
    pub fn choose(&mut self, name: &str, label: &str) -> Result<()> {
        self.input_mut(name)
            .with_context(|| format!("No input named {name:?} in the property panel"))?
            .choose(label)
    }

    fn region_mut(&mut self, id: &str) -> Result<&mut Region> {
        self.regions
            .get_mut(id)
            .with_context(|| format!("Display region {id:?} is missing"))
    }
}

impl DisplaySurface for MemorySurface {
    fn set_title(&mut self, text: &str) -> Result<()> {
        let id = self.title_region.clone();
        self.region_mut(&id)?.content = text.to_string();
        Ok(())
    }

    fn set_body(&mut self, body: PanelBody) -> Result<()> {
        let id = self.body_region.clone();
        let region = self.region_mut(&id)?;
        region.content = body.markup;
        region.inputs = body.inputs;
        Ok(())
    }

    fn set_body_visible(&mut self, visible: bool) -> Result<()> {
        let id = self.body_region.clone();
        self.region_mut(&id)?.visible = visible;
        Ok(())
    }

    fn inputs(&self) -> Result<Vec<FormInput>> {
        self.body()
            .map(|r| r.inputs.clone())
            .with_context(|| format!("Display region {:?} is missing", self.body_region))
    }
}

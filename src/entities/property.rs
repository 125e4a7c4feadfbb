//! Property storage shared by every editable object.
//!
//! A [`Property`] is a text value plus the metadata the property panel needs to
//! pick a widget for it (type tag, caption, tooltip, visibility flags).
//! [`Properties`] is the owning container: property name -> property, kept in
//! insertion order so documents and dropdown options survive a load/save cycle.
//!
//! Captions are optional on disk. The panel calls
//! [`Properties::normalize_captions`] once per render pass to persist the
//! `caption := name` default; [`Property::effective_caption`] is the pure view
//! of the same rule.

use anyhow::{bail, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

/// Semantic type of a property value. Values are always stored as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PropertyType {
    Text,
    Number,
    Boolean,
    Dropdown,
    /// Any tag the panel has no widget for. Kept verbatim.
    Other(String),
}

impl PropertyType {
    pub fn as_str(&self) -> &str {
        match self {
            PropertyType::Text => "text",
            PropertyType::Number => "number",
            PropertyType::Boolean => "boolean",
            PropertyType::Dropdown => "dropdown",
            PropertyType::Other(tag) => tag,
        }
    }
}

impl From<String> for PropertyType {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "text" => PropertyType::Text,
            "number" => PropertyType::Number,
            "boolean" => PropertyType::Boolean,
            "dropdown" => PropertyType::Dropdown,
            _ => PropertyType::Other(tag),
        }
    }
}

impl From<PropertyType> for String {
    fn from(ty: PropertyType) -> Self {
        match ty {
            PropertyType::Other(tag) => tag,
            other => other.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for PropertyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

fn default_true() -> bool {
    true
}

/// Accept strings, numbers and booleans for `value` - unit files are hand-written.
fn value_as_text<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => s,
        serde_json::Value::Null => String::new(),
        serde_json::Value::Bool(b) => b.to_string(),
        serde_json::Value::Number(n) => n.to_string(),
        other => other.to_string(),
    })
}

/// Named, typed, describable value attached to an editable object.
///
/// The name is not stored here; it is the key in the owning [`Properties`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    #[serde(default, deserialize_with = "value_as_text")]
    pub value: String,
    pub property_type: PropertyType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tooltip: Option<String>,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default = "default_true")]
    pub user_adjustable: bool,
    /// Dropdown options: label -> stored value, in display order.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub property_data: IndexMap<String, String>,
}

impl Property {
    pub fn new(property_type: PropertyType, value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            property_type,
            caption: None,
            tooltip: None,
            hidden: false,
            user_adjustable: true,
            property_data: IndexMap::new(),
        }
    }

    pub fn text(value: impl Into<String>) -> Self {
        Self::new(PropertyType::Text, value)
    }

    pub fn number(value: impl Into<String>) -> Self {
        Self::new(PropertyType::Number, value)
    }

    pub fn boolean(value: bool) -> Self {
        Self::new(PropertyType::Boolean, value.to_string())
    }

    /// Dropdown with `(label, value)` options in display order.
    pub fn dropdown<L, V>(value: impl Into<String>, options: impl IntoIterator<Item = (L, V)>) -> Self
    where
        L: Into<String>,
        V: Into<String>,
    {
        let mut prop = Self::new(PropertyType::Dropdown, value);
        prop.property_data = options
            .into_iter()
            .map(|(label, value)| (label.into(), value.into()))
            .collect();
        prop
    }

    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    pub fn with_tooltip(mut self, tooltip: impl Into<String>) -> Self {
        self.tooltip = Some(tooltip.into());
        self
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    pub fn read_only(mut self) -> Self {
        self.user_adjustable = false;
        self
    }

    /// Caption shown in the panel: the stored caption, or `name` when missing/empty.
    pub fn effective_caption<'a>(&'a self, name: &'a str) -> &'a str {
        match self.caption.as_deref() {
            Some(caption) if !caption.is_empty() => caption,
            _ => name,
        }
    }

    pub fn tooltip_or_empty(&self) -> &str {
        self.tooltip.as_deref().unwrap_or("")
    }
}

/// Property container: name -> property, insertion ordered.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Properties {
    map: IndexMap<String, Property>,
}

impl Properties {
    pub fn new() -> Self {
        Self { map: IndexMap::new() }
    }

    /// Insert or replace a property. Names stay unique by construction.
    pub fn insert(&mut self, name: impl Into<String>, property: Property) -> Option<Property> {
        self.map.insert(name.into(), property)
    }

    pub fn with(mut self, name: impl Into<String>, property: Property) -> Self {
        self.insert(name, property);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Property> {
        self.map.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Property> {
        self.map.get_mut(name)
    }

    pub fn value(&self, name: &str) -> Option<&str> {
        self.map.get(name).map(|p| p.value.as_str())
    }

    /// Overwrite the value of an existing property.
    ///
    /// Unknown names are an error: the panel only ever writes names it rendered.
    pub fn set_value(&mut self, name: &str, value: impl Into<String>) -> Result<()> {
        match self.map.get_mut(name) {
            Some(prop) => {
                prop.value = value.into();
                Ok(())
            }
            None => bail!("Unknown property: {name}"),
        }
    }

    /// Persist the default caption (`caption := name`) for every property
    /// lacking one. Returns how many captions were filled; a second call on the
    /// same set returns 0.
    pub fn normalize_captions(&mut self) -> usize {
        let mut filled = 0;
        for (name, prop) in self.map.iter_mut() {
            if prop.caption.as_deref().is_none_or(str::is_empty) {
                prop.caption = Some(name.clone());
                filled += 1;
            }
        }
        filled
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.map.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Property)> {
        self.map.iter()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.map.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl<N: Into<String>> FromIterator<(N, Property)> for Properties {
    fn from_iter<T: IntoIterator<Item = (N, Property)>>(iter: T) -> Self {
        Self {
            map: iter.into_iter().map(|(n, p)| (n.into(), p)).collect(),
        }
    }
}

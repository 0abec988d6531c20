// File: src/element/input.rs
// Purpose: <input> fields with optional datalist suggestions

use super::{Field, FieldCore, FieldParams};
use crate::attributes::{escape, AttributeMap};
use crate::error::{FormError, Result};
use crate::template::{FieldData, Format};
use once_cell::sync::Lazy;

/// Every `type` an input may declare
pub const INPUT_TYPES: [&str; 23] = [
    "button",
    "checkbox",
    "color",
    "date",
    "datetime",
    "datetime-local",
    "email",
    "file",
    "hidden",
    "image",
    "month",
    "number",
    "password",
    "radio",
    "range",
    "reset",
    "search",
    "submit",
    "tel",
    "text",
    "time",
    "url",
    "week",
];

static DEFAULT_FORMAT: Lazy<Format> = Lazy::new(|| {
    Format::parse(
        "input",
        r#"<label for="{id}">{label}</label><input type="{type}" id="{id}" name="{name}" value="{value}" {attributes}>{datalist}"#,
    )
});

#[derive(Debug, Clone)]
pub struct Input {
    core: FieldCore,
    input_type: String,
    list: Vec<String>,
}

impl Input {
    pub fn new(
        input_type: &str,
        name: impl Into<String>,
        label: impl Into<String>,
        value: Option<&str>,
        params: FieldParams,
    ) -> Result<Self> {
        if !INPUT_TYPES.contains(&input_type) {
            return Err(FormError::UnsupportedInputType(input_type.to_string()));
        }

        let list = params.list.clone();
        Ok(Self {
            core: FieldCore::new(name, label, value, params)?,
            input_type: input_type.to_string(),
            list,
        })
    }

    pub fn input_type(&self) -> &str {
        &self.input_type
    }

    pub fn list(&self) -> &[String] {
        &self.list
    }

    /// Id of the datalist element, derived from the field id
    pub fn list_id(&self) -> String {
        format!("{}-list", self.core.id)
    }

    fn datalist(&self) -> String {
        if self.list.is_empty() {
            return String::new();
        }

        let options: String = self
            .list
            .iter()
            .map(|option| format!(r#"<option value="{}">"#, escape(option)))
            .collect();
        format!(r#"<datalist id="{}">{}</datalist>"#, escape(&self.list_id()), options)
    }
}

impl Field for Input {
    fn tag(&self) -> &'static str {
        "input"
    }

    fn field_type(&self) -> Option<&str> {
        Some(&self.input_type)
    }

    fn core(&self) -> &FieldCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut FieldCore {
        &mut self.core
    }

    fn default_format(&self) -> &'static Format {
        &DEFAULT_FORMAT
    }

    fn parameters(&self) -> FieldData {
        self.core
            .parameters()
            .with("type", self.input_type.as_str())
            .with("datalist", self.datalist())
    }

    fn render_attributes(&self) -> AttributeMap {
        let mut attributes = self.core.attributes.clone();
        if !self.list.is_empty() {
            attributes.insert("list", self.list_id());
        }
        attributes
    }
}

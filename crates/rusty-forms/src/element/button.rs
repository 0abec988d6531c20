// File: src/element/button.rs
// Purpose: <button> fields

use super::{Field, FieldCore, FieldParams};
use crate::error::{FormError, Result};
use crate::template::{FieldData, Format};
use once_cell::sync::Lazy;

/// Every `type` a button may declare
pub const BUTTON_TYPES: [&str; 3] = ["submit", "reset", "button"];

static DEFAULT_FORMAT: Lazy<Format> = Lazy::new(|| {
    Format::parse(
        "button",
        r#"<button type="{type}" id="{id}" name="{name}" value="{value}" {attributes}>{label}</button>"#,
    )
});

#[derive(Debug, Clone)]
pub struct Button {
    core: FieldCore,
    button_type: String,
}

impl Button {
    pub fn new(
        button_type: &str,
        name: impl Into<String>,
        label: impl Into<String>,
        value: Option<&str>,
        params: FieldParams,
    ) -> Result<Self> {
        if !BUTTON_TYPES.contains(&button_type) {
            return Err(FormError::UnsupportedButtonType(button_type.to_string()));
        }

        Ok(Self {
            core: FieldCore::new(name, label, value, params)?,
            button_type: button_type.to_string(),
        })
    }

    pub fn button_type(&self) -> &str {
        &self.button_type
    }
}

impl Field for Button {
    fn tag(&self) -> &'static str {
        "button"
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
        self.core.parameters().with("type", self.button_type.as_str())
    }
}

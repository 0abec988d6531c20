// File: src/element/textarea.rs
// Purpose: <textarea> fields

use super::{Field, FieldCore, FieldParams};
use crate::error::Result;
use crate::template::Format;
use once_cell::sync::Lazy;

static DEFAULT_FORMAT: Lazy<Format> = Lazy::new(|| {
    Format::parse(
        "textarea",
        r#"<label for="{id}">{label}</label><textarea id="{id}" name="{name}" {attributes}>{value}</textarea>"#,
    )
});

#[derive(Debug, Clone)]
pub struct Textarea {
    core: FieldCore,
}

impl Textarea {
    pub fn new(
        name: impl Into<String>,
        label: impl Into<String>,
        value: Option<&str>,
        params: FieldParams,
    ) -> Result<Self> {
        Ok(Self {
            core: FieldCore::new(name, label, value, params)?,
        })
    }
}

impl Field for Textarea {
    fn tag(&self) -> &'static str {
        "textarea"
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
}

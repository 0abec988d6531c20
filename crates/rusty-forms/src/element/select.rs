// File: src/element/select.rs
// Purpose: <select> fields with plain options and option groups

use super::{Field, FieldCore, FieldParams};
use crate::attributes::escape;
use crate::error::Result;
use crate::template::{FieldData, Format};
use once_cell::sync::Lazy;

static DEFAULT_FORMAT: Lazy<Format> = Lazy::new(|| {
    Format::parse(
        "select",
        r#"<label for="{id}">{label}</label><select id="{id}" name="{name}" {attributes}>{options}</select>"#,
    )
});

/// One `<option>`. Its submitted value defaults to the label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub label: String,
    pub value: Option<String>,
}

impl SelectOption {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: None,
        }
    }

    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn submitted_value(&self) -> &str {
        self.value.as_deref().unwrap_or(&self.label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionGroup {
    pub label: String,
    pub disabled: bool,
    pub options: Vec<SelectOption>,
}

impl OptionGroup {
    pub fn new(label: impl Into<String>, options: impl IntoIterator<Item = SelectOption>) -> Self {
        Self {
            label: label.into(),
            disabled: false,
            options: options.into_iter().collect(),
        }
    }

    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectItem {
    Option(SelectOption),
    Group(OptionGroup),
}

impl From<SelectOption> for SelectItem {
    fn from(option: SelectOption) -> Self {
        SelectItem::Option(option)
    }
}

impl From<OptionGroup> for SelectItem {
    fn from(group: OptionGroup) -> Self {
        SelectItem::Group(group)
    }
}

#[derive(Debug, Clone)]
pub struct Select {
    core: FieldCore,
    options: Vec<SelectItem>,
}

impl Select {
    pub fn new<I: Into<SelectItem>>(
        name: impl Into<String>,
        label: impl Into<String>,
        value: Option<&str>,
        options: impl IntoIterator<Item = I>,
        params: FieldParams,
    ) -> Result<Self> {
        Ok(Self {
            core: FieldCore::new(name, label, value, params)?,
            options: options.into_iter().map(Into::into).collect(),
        })
    }

    pub fn options(&self) -> &[SelectItem] {
        &self.options
    }

    fn option(&self, option: &SelectOption) -> String {
        let value = option.submitted_value();
        let selected = match self.core.value.as_deref() == Some(value) {
            true => r#"selected="selected" "#,
            false => "",
        };
        format!(
            r#"<option {}value="{}">{}</option>"#,
            selected,
            escape(value),
            escape(&option.label)
        )
    }

    /// Markup for every option, marking the one matching the current value
    fn options_markup(&self) -> String {
        let mut out = String::new();
        for item in &self.options {
            match item {
                SelectItem::Option(option) => out.push_str(&self.option(option)),
                SelectItem::Group(group) => {
                    let disabled = if group.disabled { r#"disabled="disabled" "# } else { "" };
                    out.push_str(&format!(
                        r#"<optgroup {}label="{}">"#,
                        disabled,
                        escape(&group.label)
                    ));
                    for option in &group.options {
                        out.push_str(&self.option(option));
                    }
                    out.push_str("</optgroup>");
                }
            }
        }
        out
    }
}

impl Field for Select {
    fn tag(&self) -> &'static str {
        "select"
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
        self.core.parameters().with("options", self.options_markup())
    }
}

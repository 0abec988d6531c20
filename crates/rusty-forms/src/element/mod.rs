// File: src/element/mod.rs
// Purpose: The field abstraction shared by inputs, textareas, selects and buttons

mod button;
mod input;
mod select;
mod textarea;

pub use button::{Button, BUTTON_TYPES};
pub use input::{Input, INPUT_TYPES};
pub use select::{OptionGroup, Select, SelectItem, SelectOption};
pub use textarea::Textarea;

use crate::attributes::{normalize, AttributeMap, RawAttributes};
use crate::error::Result;
use crate::template::{self, FieldData, Format, TemplateRegistry};
use rusty_forms_validation::{RuleDecl, Validation, ValidationFailure};
use std::fmt;

/// Optional construction parameters common to every field.
///
/// ```
/// use rusty_forms::{FieldParams, RawAttributes};
///
/// let params = FieldParams::new()
///     .attributes(RawAttributes::new().attr("class", "required"))
///     .rules(["Required", "Email"]);
/// assert!(params.rules.is_some());
/// ```
#[derive(Debug, Clone, Default)]
pub struct FieldParams {
    pub attributes: Option<RawAttributes>,
    /// `Some` with no rules is rejected at construction
    pub rules: Option<Vec<RuleDecl>>,
    /// Datalist suggestions; only inputs use them
    pub list: Vec<String>,
}

impl FieldParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attributes(mut self, attributes: RawAttributes) -> Self {
        self.attributes = Some(attributes);
        self
    }

    pub fn rules<R: Into<RuleDecl>>(mut self, rules: impl IntoIterator<Item = R>) -> Self {
        self.rules = Some(rules.into_iter().map(Into::into).collect());
        self
    }

    pub fn list<S: Into<String>>(mut self, list: impl IntoIterator<Item = S>) -> Self {
        self.list = list.into_iter().map(Into::into).collect();
        self
    }
}

/// State every field carries.
#[derive(Debug, Clone)]
pub struct FieldCore {
    pub name: String,
    pub label: String,
    /// Empty until the field joins a form
    pub id: String,
    pub value: Option<String>,
    pub attributes: AttributeMap,
    pub rules: Vec<RuleDecl>,
    pub validation: Option<Validation>,
}

impl FieldCore {
    pub fn new(
        name: impl Into<String>,
        label: impl Into<String>,
        value: Option<&str>,
        params: FieldParams,
    ) -> Result<Self> {
        let name = name.into();
        let validation = match &params.rules {
            Some(rules) => Some(Validation::new(name.clone(), rules)?),
            None => None,
        };
        let rules = params.rules.unwrap_or_default();

        Ok(Self {
            label: label.into(),
            id: String::new(),
            value: value.map(str::to_string),
            attributes: normalize(params.attributes.as_ref()),
            rules,
            validation,
            name,
        })
    }

    /// Substitution data every format understands
    pub fn parameters(&self) -> FieldData {
        FieldData::new()
            .with("id", self.id.as_str())
            .with("label", self.label.as_str())
            .with("name", self.name.as_str())
            .with("value", self.value.as_deref().unwrap_or_default())
    }
}

/// A renderable, validatable form field.
///
/// Implementors provide their tag, built-in format and substitution data;
/// identity, validation and rendering come from the shared [`FieldCore`].
pub trait Field: fmt::Debug + Send + Sync {
    fn tag(&self) -> &'static str;

    /// Sub-type used to pick a format, such as an input's `type`
    fn field_type(&self) -> Option<&str> {
        None
    }

    fn core(&self) -> &FieldCore;

    fn core_mut(&mut self) -> &mut FieldCore;

    /// Format used when no registry overrides this kind
    fn default_format(&self) -> &'static Format;

    fn parameters(&self) -> FieldData {
        self.core().parameters()
    }

    /// Attributes as they should be serialized, before class folding
    fn render_attributes(&self) -> AttributeMap {
        self.core().attributes.clone()
    }

    fn name(&self) -> &str {
        &self.core().name
    }

    fn label(&self) -> &str {
        &self.core().label
    }

    fn id(&self) -> &str {
        &self.core().id
    }

    fn value(&self) -> Option<&str> {
        self.core().value.as_deref()
    }

    fn set_value(&mut self, value: Option<String>) {
        self.core_mut().value = value;
    }

    fn attributes(&self) -> &AttributeMap {
        &self.core().attributes
    }

    fn rules(&self) -> &[RuleDecl] {
        &self.core().rules
    }

    fn validation(&self) -> Option<&Validation> {
        self.core().validation.as_ref()
    }

    /// Give the field its document id, unique within `form_id`.
    fn assign_to(&mut self, form_id: &str) {
        let id = slug(&format!("{}-{}", form_id, self.name()));
        self.core_mut().id = id;
    }

    fn render(&self, registry: Option<&TemplateRegistry>) -> Result<String> {
        template::render(self, registry)
    }

    /// Check the current value. Fields without rules always pass.
    fn validate(&self) -> Result<(), ValidationFailure> {
        match self.validation() {
            Some(validation) => validation.validate(self.value()),
            None => Ok(()),
        }
    }
}

/// Lowercase, hyphen-separated form of `text`; `n-a` when nothing is left.
pub fn slug(text: &str) -> String {
    let slug = slug::slugify(text);
    if slug.is_empty() {
        "n-a".to_string()
    } else {
        slug
    }
}

// File: src/builder.rs
// Purpose: Assemble fields into a form, render it and validate submissions

use crate::attributes::{escape, normalize, serialize, AttributeMap, RawAttributes};
use crate::config::{CsrfConfig, FormsConfig};
use crate::csrf::{self, SessionStore};
use crate::element::{slug, Button, Field, FieldParams, Input, SelectItem, Select, Textarea};
use crate::error::{FormError, Result};
use crate::input::FormInput;
use crate::template::{merge, FieldData, Format, TemplateRegistry};
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use rusty_forms_validation::ValidationFailure;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tracing::debug;

static OPEN_FORMAT: Lazy<Format> = Lazy::new(|| {
    Format::parse(
        "form",
        r#"<form id="{id}" method="{method}" action="{action}" {attributes}>"#,
    )
});

/// Form submission method
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "get",
            Method::Post => "post",
        }
    }
}

impl FromStr for Method {
    type Err = FormError;

    fn from_str(method: &str) -> Result<Self> {
        match method {
            "get" => Ok(Method::Get),
            "post" => Ok(Method::Post),
            other => Err(FormError::UnsupportedMethod(other.to_string())),
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A form: its fields in insertion order, an optional template registry
/// and, for `post` forms with a session, CSRF protection.
///
/// ```
/// use rusty_forms::{Builder, FieldParams, FormInput};
///
/// let mut form = Builder::new("Sign Up", "get", "/signup", None, None)
///     .unwrap()
///     .with_input("email", "email", "Email", None, FieldParams::new().rules(["Email"]))
///     .unwrap();
///
/// assert_eq!(form.id(), "sign-up");
/// let input = FormInput::from_urlencoded("email=nope").unwrap();
/// assert_eq!(form.validate(&input).unwrap_err().to_string(),
///     r#"validation for field "email" failed rule "Email""#);
/// ```
pub struct Builder {
    id: String,
    method: Method,
    action: String,
    registry: Option<Arc<TemplateRegistry>>,
    attributes: AttributeMap,
    elements: IndexMap<String, Box<dyn Field>>,
    session: Option<Box<dyn SessionStore>>,
    csrf: CsrfConfig,
}

impl Builder {
    pub fn new(
        id: &str,
        method: &str,
        action: impl Into<String>,
        registry: Option<Arc<TemplateRegistry>>,
        attributes: Option<RawAttributes>,
    ) -> Result<Self> {
        Ok(Self {
            method: method.parse()?,
            id: slug(id),
            action: action.into(),
            registry,
            attributes: normalize(attributes.as_ref()),
            elements: IndexMap::new(),
            session: None,
            csrf: CsrfConfig::default(),
        })
    }

    /// Use the CSRF naming from `config`. On a form that is already
    /// protected, the token field is replaced in place under the new name.
    pub fn with_config(mut self, config: &FormsConfig) -> Result<Self> {
        let previous = std::mem::replace(&mut self.csrf, config.csrf.clone());

        if self.is_protected() {
            let index = self.elements.shift_remove_full(&previous.field_name).map(|(i, ..)| i);
            self.attach_token_field()?;
            if let Some(index) = index {
                let last = self.elements.len() - 1;
                self.elements.move_index(last, index);
            }
        }
        Ok(self)
    }

    pub fn with_input(
        self,
        input_type: &str,
        name: &str,
        label: &str,
        value: Option<&str>,
        params: FieldParams,
    ) -> Result<Self> {
        let field = Input::new(input_type, name, label, value, params)?;
        self.push(Box::new(field))
    }

    pub fn with_textarea(
        self,
        name: &str,
        label: &str,
        value: Option<&str>,
        params: FieldParams,
    ) -> Result<Self> {
        let field = Textarea::new(name, label, value, params)?;
        self.push(Box::new(field))
    }

    pub fn with_select<I: Into<SelectItem>>(
        self,
        name: &str,
        label: &str,
        value: Option<&str>,
        options: impl IntoIterator<Item = I>,
        params: FieldParams,
    ) -> Result<Self> {
        let field = Select::new(name, label, value, options, params)?;
        self.push(Box::new(field))
    }

    pub fn with_button(
        self,
        button_type: &str,
        name: &str,
        label: &str,
        value: Option<&str>,
        params: FieldParams,
    ) -> Result<Self> {
        let field = Button::new(button_type, name, label, value, params)?;
        self.push(Box::new(field))
    }

    /// Add a field under its name, replacing any field already there. With
    /// a registry, the field's tag must be one it knows.
    pub fn push(mut self, mut field: Box<dyn Field>) -> Result<Self> {
        if let Some(registry) = &self.registry {
            registry.resolve(field.tag(), field.field_type())?;
        }

        field.assign_to(&self.id);
        self.elements.insert(field.name().to_string(), field);
        Ok(self)
    }

    /// Attach a session. `post` forms then carry a hidden token field and
    /// check it on every validation.
    pub fn with_session(mut self, session: Box<dyn SessionStore>) -> Result<Self> {
        self.session = Some(session);

        if self.is_protected() {
            self.attach_token_field()?;
        }
        Ok(self)
    }

    /// Issue or reuse the session token and add the hidden field carrying it
    fn attach_token_field(&mut self) -> Result<()> {
        let key = self.csrf.session_key(&self.id);
        let token = match self.session.as_deref_mut() {
            Some(session) => csrf::issue_token(session, &key),
            None => return Ok(()),
        };

        let name = self.csrf.field_name.as_str();
        let mut field =
            Input::new("hidden", name, "", Some(token.as_str()), FieldParams::new())?;
        field.assign_to(&self.id);
        self.elements.insert(field.name().to_string(), Box::new(field));
        Ok(())
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn action(&self) -> &str {
        &self.action
    }

    pub fn attributes(&self) -> &AttributeMap {
        &self.attributes
    }

    pub fn registry(&self) -> Option<&TemplateRegistry> {
        self.registry.as_deref()
    }

    pub fn session(&self) -> Option<&dyn SessionStore> {
        self.session.as_deref()
    }

    /// Current CSRF token, if the form is protected
    pub fn token(&self) -> Option<String> {
        if !self.is_protected() {
            return None;
        }
        self.session.as_ref()?.get(&self.csrf.session_key(&self.id))
    }

    pub fn is_protected(&self) -> bool {
        self.method == Method::Post && self.session.is_some()
    }

    pub fn elements(&self) -> impl Iterator<Item = &dyn Field> {
        self.elements.values().map(|field| field.as_ref())
    }

    pub fn get(&self, name: &str) -> Option<&dyn Field> {
        self.elements.get(name).map(|field| field.as_ref())
    }

    pub fn open(&self) -> String {
        let edits = match self.attributes.is_empty() {
            true => OPEN_FORMAT
                .attribute_slots()
                .iter()
                .map(|span| (span.clone(), String::new()))
                .collect(),
            false => Vec::new(),
        };

        let data = FieldData::new()
            .with("id", escape(&self.id))
            .with("method", self.method.as_str())
            .with("action", escape(&self.action))
            .with("attributes", serialize(&self.attributes));

        merge(&OPEN_FORMAT.splice(edits), &data)
    }

    pub fn close(&self) -> &'static str {
        "</form>"
    }

    /// The whole form: opening tag, every field in order, closing tag
    pub fn render(&self) -> Result<String> {
        let mut html = self.open();
        for field in self.elements.values() {
            html.push_str(&field.render(self.registry())?);
        }
        html.push_str(self.close());
        Ok(html)
    }

    /// Render a single field by name
    pub fn element(&self, name: &str) -> Result<String> {
        self.elements
            .get(name)
            .ok_or_else(|| FormError::UnknownElement(name.to_string()))?
            .render(self.registry())
    }

    /// Check the CSRF token, then validate each field that has rules
    /// against its submitted value, stopping at the first failure.
    pub fn validate(&mut self, input: &FormInput) -> Result<()> {
        self.check_forgery(input)?;

        for field in self.elements.values_mut() {
            if field.validation().is_none() {
                continue;
            }
            let value = input.get(field.name()).map(str::to_string);
            field.set_value(value);
            field.validate()?;
        }

        debug!(form = %self.id, "form passed validation");
        Ok(())
    }

    /// Like [`validate`](Self::validate), but keep going and collect the
    /// first failure of every field.
    pub fn failures(&mut self, input: &FormInput) -> Result<IndexMap<String, ValidationFailure>> {
        self.check_forgery(input)?;

        let mut failures = IndexMap::new();
        for field in self.elements.values_mut() {
            if field.validation().is_none() {
                continue;
            }
            let value = input.get(field.name()).map(str::to_string);
            field.set_value(value);
            if let Err(failure) = field.validate() {
                failures.insert(field.name().to_string(), failure);
            }
        }

        debug!(form = %self.id, failed = failures.len(), "collected form failures");
        Ok(failures)
    }

    fn check_forgery(&self, input: &FormInput) -> Result<()> {
        let session = match (&self.session, self.method) {
            (Some(session), Method::Post) => session.as_ref(),
            _ => return Ok(()),
        };

        let key = self.csrf.session_key(&self.id);
        csrf::verify(session, &key, input.get(&self.csrf.field_name))
            .map_err(FormError::RequestForgery)
    }
}

impl fmt::Debug for Builder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Builder")
            .field("id", &self.id)
            .field("method", &self.method)
            .field("action", &self.action)
            .field("elements", &self.elements.keys().collect::<Vec<_>>())
            .field("protected", &self.is_protected())
            .finish()
    }
}

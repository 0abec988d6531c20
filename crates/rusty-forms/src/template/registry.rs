// File: src/template/registry.rs
// Purpose: Per-kind format overrides and their lookup

use crate::config::TemplateConfig;
use crate::element::INPUT_TYPES;
use crate::error::{FormError, Result};
use crate::template::Format;
use indexmap::IndexMap;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// The field kinds a registry can hold formats for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Input,
    Textarea,
    Button,
    Select,
}

impl FieldKind {
    pub const ALL: [FieldKind; 4] = [
        FieldKind::Input,
        FieldKind::Textarea,
        FieldKind::Button,
        FieldKind::Select,
    ];

    pub fn tag(self) -> &'static str {
        match self {
            FieldKind::Input => "input",
            FieldKind::Textarea => "textarea",
            FieldKind::Button => "button",
            FieldKind::Select => "select",
        }
    }
}

impl FromStr for FieldKind {
    type Err = FormError;

    fn from_str(tag: &str) -> Result<Self> {
        FieldKind::ALL
            .into_iter()
            .find(|kind| kind.tag() == tag)
            .ok_or_else(|| FormError::UnknownFieldKind(tag.to_string()))
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Format overrides by field kind.
///
/// Inputs hold one format per input type plus a `default` shared by every
/// type without its own. The other kinds hold a single format. Lookups
/// that find nothing fall back to the element's built-in format.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateRegistry {
    input: IndexMap<String, Format>,
    textarea: Option<Format>,
    button: Option<Format>,
    select: Option<Format>,
}

impl TemplateRegistry {
    /// Key of the input format used when a type has no format of its own
    pub const DEFAULT_VARIANT: &'static str = "default";

    pub fn new() -> Self {
        Self::default()
    }

    /// Register `source` for `kind`. A variant is only meaningful for
    /// inputs, where it names an input type or `default`.
    pub fn set_format(
        &mut self,
        kind: FieldKind,
        source: &str,
        variant: Option<&str>,
    ) -> Result<()> {
        let format = Format::parse(kind.tag(), source);

        match (kind, variant) {
            (FieldKind::Input, variant) => {
                let variant = variant.unwrap_or(Self::DEFAULT_VARIANT);
                if variant != Self::DEFAULT_VARIANT && !INPUT_TYPES.contains(&variant) {
                    return Err(FormError::UnsupportedInputType(variant.to_string()));
                }
                self.input.insert(variant.to_string(), format);
            }
            (kind, Some(variant)) => {
                return Err(FormError::UnexpectedVariant {
                    kind: kind.to_string(),
                    variant: variant.to_string(),
                });
            }
            (FieldKind::Textarea, None) => self.textarea = Some(format),
            (FieldKind::Button, None) => self.button = Some(format),
            (FieldKind::Select, None) => self.select = Some(format),
        }

        debug!(kind = %kind, variant = variant.unwrap_or("-"), "registered field format");
        Ok(())
    }

    /// Builder-style [`set_format`](Self::set_format)
    pub fn with_format(
        mut self,
        kind: FieldKind,
        source: &str,
        variant: Option<&str>,
    ) -> Result<Self> {
        self.set_format(kind, source, variant)?;
        Ok(self)
    }

    /// Find the format for a `tag` element. `field_type` selects an input
    /// format; it is ignored for other kinds.
    pub fn resolve(&self, tag: &str, field_type: Option<&str>) -> Result<Option<&Format>> {
        let format = match tag.parse::<FieldKind>()? {
            FieldKind::Input => field_type
                .and_then(|ty| self.input.get(ty))
                .or_else(|| self.input.get(Self::DEFAULT_VARIANT)),
            FieldKind::Textarea => self.textarea.as_ref(),
            FieldKind::Button => self.button.as_ref(),
            FieldKind::Select => self.select.as_ref(),
        };
        Ok(format)
    }

    /// Registry holding every format in `config`
    pub fn from_config(config: &TemplateConfig) -> Result<Self> {
        let mut registry = Self::new();

        for (variant, source) in &config.input {
            registry.set_format(FieldKind::Input, source, Some(variant.as_str()))?;
        }

        let single = [
            (FieldKind::Textarea, &config.textarea),
            (FieldKind::Button, &config.button),
            (FieldKind::Select, &config.select),
        ];
        for (kind, source) in single {
            if let Some(source) = source {
                registry.set_format(kind, source, None)?;
            }
        }

        Ok(registry)
    }

    pub fn is_empty(&self) -> bool {
        self.input.is_empty()
            && self.textarea.is_none()
            && self.button.is_none()
            && self.select.is_none()
    }
}

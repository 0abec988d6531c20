// File: src/template/merge.rs
// Purpose: Token substitution, class folding and field rendering

use crate::attributes::{escape, serialize, AttributeMap};
use crate::element::Field;
use crate::error::Result;
use crate::template::{Format, TemplateRegistry};
use indexmap::IndexMap;
use rusty_forms_validation::numeric::is_numeric;
use std::ops::Range;
use tracing::debug;

/// Substitution values keyed by token name, without braces.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldData(IndexMap<String, String>);

impl FieldData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, token: impl Into<String>, value: impl Into<String>) {
        self.0.insert(token.into(), value.into());
    }

    pub fn with(mut self, token: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(token, value);
        self
    }

    pub fn get(&self, token: &str) -> Option<&str> {
        self.0.get(token).map(String::as_str)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FieldData {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Replace each `{name}` in `format` whose name is in `data`.
///
/// One left-to-right pass: substituted text is never scanned again and
/// unknown tokens stay as written.
///
/// ```
/// use rusty_forms::template::{merge, FieldData};
///
/// let data = FieldData::new().with("id", "signup-email").with("label", "{id}");
/// assert_eq!(
///     merge(r#"<label for="{id}">{label}</label>{hint}"#, &data),
///     r#"<label for="signup-email">{id}</label>{hint}"#
/// );
/// ```
pub fn merge(format: &str, data: &FieldData) -> String {
    let mut out = String::with_capacity(format.len());
    let mut rest = format;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let candidate = &rest[open..];

        let token = candidate
            .find('}')
            .map(|close| (&candidate[1..close], close))
            .filter(|(name, _)| !name.contains('{'))
            .and_then(|(name, close)| data.get(name).map(|value| (value, close)));

        match token {
            Some((value, close)) => {
                out.push_str(value);
                rest = &candidate[close + 1..];
            }
            None => {
                out.push('{');
                rest = &candidate[1..];
            }
        }
    }

    out.push_str(rest);
    out
}

/// Fold the caller's `class` into a `class` the format hard-codes on its
/// opening tag, returning the adjusted format text.
///
/// The result carries `class="<format class> <caller class>"` once and
/// `class` is removed from `attributes` so it is not emitted twice. When
/// either side has no class, the format and map are left alone.
pub fn fold_class(format: &Format, attributes: &mut AttributeMap) -> String {
    let edits = take_class(format, attributes)
        .map(|(span, existing, caller)| (span, join_class(existing, &caller)))
        .into_iter()
        .collect();
    format.splice(edits)
}

/// Span and text of the format's class, plus the caller's class removed
/// from `attributes`, when both exist
fn take_class<'f>(
    format: &'f Format,
    attributes: &mut AttributeMap,
) -> Option<(Range<usize>, &'f str, String)> {
    let inline = format.inline_attribute("class")?;
    let caller = attributes.remove("class")?;
    let existing = &format.as_str()[inline.value.clone()];
    Some((inline.value.clone(), existing, caller))
}

fn join_class(existing: &str, caller: &str) -> String {
    if existing.is_empty() {
        escape(caller)
    } else {
        format!("{} {}", existing, escape(caller))
    }
}

/// Render one field to HTML.
///
/// The format comes from `registry` when it has one for the field's kind
/// and type, otherwise from the element itself. A blank, non-numeric value
/// drops the ` value="{value}"` fragment; any other value is escaped. With
/// no attributes the ` {attributes}` slot is dropped as well.
///
/// Tokens are substituted in the format's own text only. A folded caller
/// class is inserted as written, like every other caller attribute.
pub fn render<F: Field + ?Sized>(
    field: &F,
    registry: Option<&TemplateRegistry>,
) -> Result<String> {
    let format = match registry {
        Some(registry) => registry.resolve(field.tag(), field.field_type())?,
        None => None,
    }
    .unwrap_or_else(|| field.default_format());

    let mut data = field.parameters();
    let mut attributes = field.render_attributes();
    let mut edits = Vec::new();

    let value = data.get("value").unwrap_or_default();
    if value.is_empty() && !is_numeric(value) {
        edits.extend(
            format
                .value_fragments()
                .iter()
                .map(|span| (span.clone(), String::new())),
        );
        data.insert("value", "");
    } else {
        let escaped = escape(value);
        data.insert("value", escaped);
    }

    let mut class = None;
    if attributes.is_empty() {
        edits.extend(
            format
                .attribute_slots()
                .iter()
                .map(|span| (span.clone(), String::new())),
        );
        data.insert("attributes", "");
    } else {
        class = take_class(format, &mut attributes);
        data.insert("attributes", serialize(&attributes));
    }

    let folded = class.is_some();
    if let Some((span, existing, caller)) = class {
        edits.push((span, join_class(&merge(existing, &data), &caller)));
    }

    debug!(
        tag = field.tag(),
        field_type = field.field_type().unwrap_or("-"),
        name = field.name(),
        folded,
        "rendering field"
    );

    Ok(format.splice_with(edits, |literal, out| out.push_str(&merge(literal, &data))))
}

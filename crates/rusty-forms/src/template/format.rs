// File: src/template/format.rs
// Purpose: Template strings parsed once into the spans rendering needs

use indexmap::IndexMap;
use std::ops::Range;

/// The literal value attribute dropped when a field has no value
pub const VALUE_FRAGMENT: &str = r#"value="{value}""#;

/// Placeholder replaced by the field's serialized attributes
pub const ATTRIBUTES_SLOT: &str = "{attributes}";

/// A `name="value"` pair written directly on the format's opening tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineAttribute {
    /// Source text of the match; the first pair includes the `<tag` opener
    pub capture: Range<usize>,
    /// The text between the quotes
    pub value: Range<usize>,
}

/// A template string for one field kind, with placeholder tokens such as
/// `{id}`, `{label}`, `{value}` and `{attributes}`.
///
/// Parsing records where the value fragment and attribute slot sit and
/// which attributes the format hard-codes on its `<tag` element, so each
/// render only splices precomputed spans.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Format {
    tag: String,
    source: String,
    value_fragments: Vec<Range<usize>>,
    attribute_slots: Vec<Range<usize>>,
    inline: IndexMap<String, InlineAttribute>,
}

impl Format {
    /// Parse `source` as the format of a `tag` element.
    pub fn parse(tag: &str, source: impl Into<String>) -> Self {
        let source = source.into();

        Self {
            value_fragments: fragment_spans(&source, VALUE_FRAGMENT),
            attribute_slots: fragment_spans(&source, ATTRIBUTES_SLOT),
            inline: scan_opening_attributes(tag, &source),
            tag: tag.to_string(),
            source,
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Spans of every `value="{value}"` fragment, with its leading space
    pub fn value_fragments(&self) -> &[Range<usize>] {
        &self.value_fragments
    }

    /// Spans of every `{attributes}` slot, with its leading space
    pub fn attribute_slots(&self) -> &[Range<usize>] {
        &self.attribute_slots
    }

    pub fn inline_attribute(&self, name: &str) -> Option<&InlineAttribute> {
        self.inline.get(name)
    }

    /// Source text of an inline attribute's capture and value
    pub fn inline_text(&self, name: &str) -> Option<(&str, &str)> {
        self.inline
            .get(name)
            .map(|attr| (&self.source[attr.capture.clone()], &self.source[attr.value.clone()]))
    }

    pub fn inline_names(&self) -> impl Iterator<Item = &str> {
        self.inline.keys().map(String::as_str)
    }

    /// Copy of the source with each span replaced by its text. Edits are
    /// applied in source order; one overlapping an earlier edit is dropped.
    pub fn splice(&self, edits: Vec<(Range<usize>, String)>) -> String {
        self.splice_with(edits, |literal, out| out.push_str(literal))
    }

    /// Like [`splice`](Self::splice), but the source text between edits is
    /// written through `literal`. Edit text is copied as is.
    pub fn splice_with(
        &self,
        mut edits: Vec<(Range<usize>, String)>,
        mut literal: impl FnMut(&str, &mut String),
    ) -> String {
        edits.sort_by_key(|(range, _)| range.start);

        let mut out = String::with_capacity(self.source.len());
        let mut cursor = 0;
        for (range, text) in edits {
            if range.start < cursor {
                continue;
            }
            literal(&self.source[cursor..range.start], &mut out);
            out.push_str(&text);
            cursor = range.end;
        }
        literal(&self.source[cursor..], &mut out);
        out
    }
}

/// Every occurrence of `needle`, widened to take one preceding space or tab.
fn fragment_spans(source: &str, needle: &str) -> Vec<Range<usize>> {
    source
        .match_indices(needle)
        .map(|(start, _)| {
            let from = match start.checked_sub(1).map(|i| source.as_bytes()[i]) {
                Some(b' ' | b'\t') => start - 1,
                _ => start,
            };
            from..start + needle.len()
        })
        .collect()
}

fn is_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'-'
}

/// Collect the run of `name="value"` pairs directly after each `<tag`.
///
/// The run ends at the first thing that is not such a pair: a bare
/// attribute, a placeholder, or the end of the tag. A later `<tag` in the
/// same format overwrites pairs with the same name.
fn scan_opening_attributes(tag: &str, source: &str) -> IndexMap<String, InlineAttribute> {
    let mut found = IndexMap::new();
    let bytes = source.as_bytes();
    let opener = format!("<{}", tag);

    for (start, _) in source.match_indices(&opener) {
        let mut pos = start + opener.len();
        if !matches!(bytes.get(pos), Some(b' ' | b'\t' | b'>' | b'/')) {
            continue;
        }

        let mut capture_start = start;
        loop {
            let mut cursor = pos;
            while matches!(bytes.get(cursor), Some(b' ' | b'\t')) {
                cursor += 1;
            }

            let name_start = cursor;
            while bytes.get(cursor).copied().is_some_and(is_name_byte) {
                cursor += 1;
            }
            if cursor == name_start || !source[cursor..].starts_with("=\"") {
                break;
            }
            let name = &source[name_start..cursor];

            let value_start = cursor + 2;
            let Some(len) = source[value_start..].find('"') else {
                break;
            };
            let value_end = value_start + len;
            let end = value_end + 1;

            // The pair only counts inside a tag that is closed later on
            if !source[end..].contains('>') {
                break;
            }

            found.insert(
                name.to_string(),
                InlineAttribute {
                    capture: capture_start..end,
                    value: value_start..value_end,
                },
            );

            pos = end;
            capture_start = end;
        }
    }

    found
}

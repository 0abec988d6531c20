// File: src/attributes.rs
// Purpose: Flatten declared element attributes and serialize them as HTML

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One declared attribute: a plain value, or a group such as `data` or
/// `aria` whose entries become `data-*` / `aria-*` attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Text(String),
    Nested(IndexMap<String, String>),
}

/// Attributes as a caller declares them, at most two levels deep.
///
/// ```
/// use rusty_forms::RawAttributes;
///
/// let raw = RawAttributes::new()
///     .attr("class", "required")
///     .nested("data", [("format", "email")]);
/// let attributes = rusty_forms::attributes::normalize(Some(&raw));
/// assert_eq!(attributes.get("data-format"), Some("email"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawAttributes(IndexMap<String, AttributeValue>);

impl RawAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(name.into(), AttributeValue::Text(value.into()));
        self
    }

    pub fn nested<K, V>(
        mut self,
        name: impl Into<String>,
        entries: impl IntoIterator<Item = (K, V)>,
    ) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let group = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self.0.insert(name.into(), AttributeValue::Nested(group));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &AttributeValue)> {
        self.0.iter()
    }
}

impl From<&AttributeMap> for RawAttributes {
    fn from(map: &AttributeMap) -> Self {
        Self(
            map.iter()
                .map(|(k, v)| (k.to_string(), AttributeValue::Text(v.to_string())))
                .collect(),
        )
    }
}

/// Flat, ordered attribute-name to value mapping for one element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeMap(IndexMap<String, String>);

impl AttributeMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Insert or overwrite in place, keeping the original position.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.0.shift_remove(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for AttributeMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Flatten declared attributes one level: `data: {format: x}` becomes
/// `data-format: x`. Later entries overwrite earlier ones with the same
/// derived name.
pub fn normalize(raw: Option<&RawAttributes>) -> AttributeMap {
    let mut map = AttributeMap::new();

    for (name, value) in raw.into_iter().flat_map(RawAttributes::iter) {
        match value {
            AttributeValue::Text(value) => map.insert(name.as_str(), value.as_str()),
            AttributeValue::Nested(group) => {
                for (child, value) in group {
                    map.insert(format!("{}-{}", name, child), value.as_str());
                }
            }
        }
    }

    map
}

/// Escape text for use inside a double- or single-quoted attribute.
pub fn escape(text: &str) -> String {
    html_escape::encode_quoted_attribute(text).into_owned()
}

/// Render `name="value"` pairs joined by single spaces, in map order.
pub fn serialize(map: &AttributeMap) -> String {
    map.iter()
        .map(|(name, value)| format!("{}=\"{}\"", escape(name), escape(value)))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    /// Inverse of `serialize` for lines it produced
    fn parse_line(line: &str) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        let mut rest = line;
        while !rest.is_empty() {
            let (name, after) = rest.split_once("=\"").unwrap();
            let (value, after) = after.split_once('"').unwrap();
            pairs.push((
                html_escape::decode_html_entities(name).into_owned(),
                html_escape::decode_html_entities(value).into_owned(),
            ));
            rest = after.strip_prefix(' ').unwrap_or(after);
        }
        pairs
    }

    #[test]
    fn test_normalize_none_is_empty() {
        assert!(normalize(None).is_empty());
        assert!(normalize(Some(&RawAttributes::new())).is_empty());
    }

    #[test]
    fn test_normalize_flattens_one_level() {
        let raw = RawAttributes::new()
            .attr("class", "required")
            .nested("data", [("format", "email"), ("hint", "Use a real address")])
            .nested("aria", [("required", "true")]);

        let map = normalize(Some(&raw));
        let pairs: Vec<_> = map.iter().collect();
        assert_eq!(
            pairs,
            vec![
                ("class", "required"),
                ("data-format", "email"),
                ("data-hint", "Use a real address"),
                ("aria-required", "true"),
            ]
        );
    }

    #[test]
    fn test_normalize_later_entry_overwrites_derived_key() {
        let raw = RawAttributes::new()
            .attr("data-format", "text")
            .nested("data", [("format", "email")]);

        let map = normalize(Some(&raw));
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("data-format"), Some("email"));
    }

    #[test]
    fn test_normalize_is_idempotent_on_flat_maps() {
        let raw = RawAttributes::new().attr("class", "a").attr("title", "b");
        let once = normalize(Some(&raw));
        let twice = normalize(Some(&RawAttributes::from(&once)));
        assert_eq!(once, twice);
    }

    #[test]
    fn test_serialize() {
        let map: AttributeMap = [("class", "required"), ("data-format", "email")]
            .into_iter()
            .collect();
        assert_eq!(serialize(&map), r#"class="required" data-format="email""#);
        assert_eq!(serialize(&AttributeMap::new()), "");
    }

    #[test]
    fn test_serialize_escapes_quotes_and_markup() {
        let map: AttributeMap = [("title", r#"Say "hi" & <wave>"#)].into_iter().collect();
        let line = serialize(&map);
        assert_eq!(line, r#"title="Say &quot;hi&quot; &amp; &lt;wave&gt;""#);
    }

    #[test]
    fn test_serialize_escapes_single_quote() {
        let map: AttributeMap = [("title", "it's")].into_iter().collect();
        let line = serialize(&map);
        assert!(!line.contains('\''));
    }

    #[test]
    fn test_remove_keeps_order() {
        let mut map: AttributeMap = [("a", "1"), ("class", "x"), ("b", "2")].into_iter().collect();
        assert_eq!(map.remove("class").as_deref(), Some("x"));
        assert_eq!(serialize(&map), r#"a="1" b="2""#);
    }

    #[rstest]
    #[case(vec![])]
    #[case(vec![("class", "required")])]
    #[case(vec![("a", "1"), ("data-x", "y z")])]
    #[case(vec![("data-format", "email"), ("aria-label", "Tom & Jerry"), ("title", "a < b")])]
    #[case(vec![("id", ""), ("data-hint", "  spaced  out  ")])]
    fn test_serialize_round_trips_in_order(#[case] pairs: Vec<(&str, &str)>) {
        let map: AttributeMap = pairs.iter().copied().collect();
        let expected: Vec<(String, String)> = pairs
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect();

        assert_eq!(parse_line(&serialize(&map)), expected);
    }
}

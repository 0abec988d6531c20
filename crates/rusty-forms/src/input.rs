// File: src/input.rs
// Purpose: Submitted form values keyed by field name

use crate::error::{FormError, Result};
use indexmap::IndexMap;

/// Submitted values. A name given twice keeps the last value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormInput {
    values: IndexMap<String, String>,
}

impl FormInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode an `application/x-www-form-urlencoded` body.
    ///
    /// ```
    /// use rusty_forms::FormInput;
    ///
    /// let body = "email=j.smith%40example.com&name=Jo+Smith";
    /// let input = FormInput::from_urlencoded(body).unwrap();
    /// assert_eq!(input.get("email"), Some("j.smith@example.com"));
    /// assert_eq!(input.get("name"), Some("Jo Smith"));
    /// ```
    pub fn from_urlencoded(body: &str) -> Result<Self> {
        let mut input = Self::new();

        for pair in body.split('&').filter(|pair| !pair.is_empty()) {
            let (name, value) = pair.split_once('=').unwrap_or((pair, ""));
            input.insert(decode(name)?, decode(value)?);
        }

        Ok(input)
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormInput {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut input = Self::new();
        for (name, value) in iter {
            input.insert(name, value);
        }
        input
    }
}

fn decode(component: &str) -> Result<String> {
    let component = component.replace('+', " ");
    urlencoding::decode(&component)
        .map(|decoded| decoded.into_owned())
        .map_err(|err| FormError::MalformedInput(err.to_string()))
}

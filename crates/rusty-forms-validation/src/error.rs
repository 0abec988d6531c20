// File: src/error.rs
// Purpose: Rule construction errors and the validation failure raised per field

use thiserror::Error;

/// Error raised while turning rule declarations into a [`RuleSet`](crate::RuleSet).
///
/// These are configuration mistakes in the form definition, never caused by
/// submitted input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleError {
    #[error("rule does not exist: \"{0}\"")]
    UnknownRule(String),

    #[error("validation rules have not been provided")]
    NoRules,

    #[error("rule \"{rule}\" expects {expected} argument(s), found {found}")]
    ArgumentCount {
        rule: String,
        expected: usize,
        found: usize,
    },
}

/// A field failed one of its rules.
///
/// `rule` is the name of the first failing rule (`Required` for a blank
/// required field, or the key a predicate was declared under).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("validation for field \"{field}\" failed rule \"{rule}\"")]
pub struct ValidationFailure {
    pub field: String,
    pub rule: String,
}

impl ValidationFailure {
    pub fn new(field: impl Into<String>, rule: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            rule: rule.into(),
        }
    }
}

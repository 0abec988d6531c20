// File: src/validation.rs
// Purpose: Parsed rule sets and the per-field validation pass

use crate::error::{RuleError, ValidationFailure};
use crate::numeric::is_numeric;
use crate::rule::{Rule, RuleDecl, RuleKind};
use indexmap::IndexMap;
use tracing::debug;

/// A value is blank when, once trimmed, it is empty and not numeric.
/// An absent value is blank. `"0"` is not.
pub fn is_blank(value: Option<&str>) -> bool {
    match value {
        None => true,
        Some(value) => {
            let value = value.trim();
            value.is_empty() && !is_numeric(value)
        }
    }
}

/// Terminal state of a validation pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Pass,
    /// Name of the first rule that failed
    Fail(String),
}

impl Outcome {
    pub fn is_pass(&self) -> bool {
        matches!(self, Outcome::Pass)
    }
}

/// Rules declared on one field, parsed and whitelisted.
///
/// `Required` is pulled out into a flag: it decides what happens to blank
/// values and is never dispatched as a check.
#[derive(Debug, Clone)]
pub struct RuleSet {
    required: bool,
    rules: IndexMap<String, Rule>,
}

impl RuleSet {
    /// Parse declarations in order. A rule name declared twice keeps its
    /// first position and its last arguments.
    pub fn parse(decls: &[RuleDecl]) -> Result<Self, RuleError> {
        if decls.is_empty() {
            return Err(RuleError::NoRules);
        }

        let mut rules = IndexMap::with_capacity(decls.len());
        for decl in decls {
            let rule = Rule::from_decl(decl)?;
            rules.insert(rule.name().to_string(), rule);
        }

        let required = rules.shift_remove(RuleKind::Required.name()).is_some();

        Ok(Self { required, rules })
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Rules that run against non-blank values, in declaration order
    pub fn rules(&self) -> impl Iterator<Item = &Rule> {
        self.rules.values()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Run the state machine: blank values short-circuit on `Required`,
    /// otherwise the first failing rule ends the pass.
    pub fn evaluate(&self, value: Option<&str>) -> Outcome {
        let value = match value {
            Some(value) if !is_blank(Some(value)) => value,
            _ if self.required => return Outcome::Fail(RuleKind::Required.name().to_string()),
            _ => return Outcome::Pass,
        };

        self.rules
            .iter()
            .find(|(_, rule)| !rule.check(value))
            .map_or(Outcome::Pass, |(name, _)| Outcome::Fail(name.clone()))
    }
}

/// Validation attached to a single field.
///
/// # Example
///
/// ```
/// use rusty_forms_validation::{RuleDecl, Validation};
///
/// let validation = Validation::new(
///     "email",
///     &[RuleDecl::from("Required"), RuleDecl::from("Email")],
/// )
/// .unwrap();
///
/// assert!(validation.validate(Some("j.smith@example.com")).is_ok());
/// assert_eq!(validation.validate(Some("")).unwrap_err().rule, "Required");
/// ```
#[derive(Debug, Clone)]
pub struct Validation {
    field: String,
    rules: RuleSet,
}

impl Validation {
    pub fn new(field: impl Into<String>, decls: &[RuleDecl]) -> Result<Self, RuleError> {
        Ok(Self {
            field: field.into(),
            rules: RuleSet::parse(decls)?,
        })
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn is_required(&self) -> bool {
        self.rules.is_required()
    }

    /// Validate the field's current value, failing on the first broken rule.
    pub fn validate(&self, value: Option<&str>) -> Result<(), ValidationFailure> {
        match self.rules.evaluate(value) {
            Outcome::Pass => Ok(()),
            Outcome::Fail(rule) => {
                debug!(field = %self.field, rule = %rule, "field failed validation");
                Err(ValidationFailure::new(self.field.clone(), rule))
            }
        }
    }
}

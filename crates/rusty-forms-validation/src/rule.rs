// File: src/rule.rs
// Purpose: Rule declarations, the built-in rule whitelist and their dispatch table

use crate::error::RuleError;
use crate::{email, numeric, string};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

// `Name(arg1,arg2)`; anything else is taken as a bare rule name
static RULE_CALL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([a-zA-Z0-9_]+)\((.+?)\)$").unwrap());

/// Signature every built-in check is dispatched through: the value under
/// test followed by the rule's raw arguments.
pub type CheckFn = fn(&str, &[String]) -> bool;

/// The closed set of built-in rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleKind {
    Alpha,
    AlphaNum,
    Between,
    Email,
    Equals,
    Float,
    Integer,
    Length,
    Max,
    MaxLength,
    Min,
    MinLength,
    Numeric,
    Required,
}

impl RuleKind {
    pub const ALL: [RuleKind; 14] = [
        RuleKind::Alpha,
        RuleKind::AlphaNum,
        RuleKind::Between,
        RuleKind::Email,
        RuleKind::Equals,
        RuleKind::Float,
        RuleKind::Integer,
        RuleKind::Length,
        RuleKind::Max,
        RuleKind::MaxLength,
        RuleKind::Min,
        RuleKind::MinLength,
        RuleKind::Numeric,
        RuleKind::Required,
    ];

    pub fn name(self) -> &'static str {
        match self {
            RuleKind::Alpha => "Alpha",
            RuleKind::AlphaNum => "AlphaNum",
            RuleKind::Between => "Between",
            RuleKind::Email => "Email",
            RuleKind::Equals => "Equals",
            RuleKind::Float => "Float",
            RuleKind::Integer => "Integer",
            RuleKind::Length => "Length",
            RuleKind::Max => "Max",
            RuleKind::MaxLength => "MaxLength",
            RuleKind::Min => "Min",
            RuleKind::MinLength => "MinLength",
            RuleKind::Numeric => "Numeric",
            RuleKind::Required => "Required",
        }
    }

    /// Number of arguments the rule takes after the value.
    pub fn arity(self) -> usize {
        match self {
            RuleKind::Between => 2,
            RuleKind::Equals
            | RuleKind::Length
            | RuleKind::Max
            | RuleKind::MaxLength
            | RuleKind::Min
            | RuleKind::MinLength => 1,
            _ => 0,
        }
    }

    /// Static dispatch table. `Required` has no check of its own: it is
    /// resolved by the blank pre-check in [`RuleSet`](crate::RuleSet).
    pub fn check(self) -> Option<CheckFn> {
        let check: CheckFn = match self {
            RuleKind::Alpha => |value, _| string::is_alpha(value),
            RuleKind::AlphaNum => |value, _| string::is_alpha_num(value),
            RuleKind::Between => |value, args| numeric::between(value, &args[0], &args[1]),
            RuleKind::Email => |value, _| email::is_valid_email(value),
            RuleKind::Equals => |value, args| string::equals(value, &args[0]),
            RuleKind::Float => |value, _| numeric::is_float(value),
            RuleKind::Integer => |value, _| numeric::is_integer(value),
            RuleKind::Length => |value, args| string::length(value, &args[0]),
            RuleKind::Max => |value, args| numeric::max(value, &args[0]),
            RuleKind::MaxLength => |value, args| string::max_length(value, &args[0]),
            RuleKind::Min => |value, args| numeric::min(value, &args[0]),
            RuleKind::MinLength => |value, args| string::min_length(value, &args[0]),
            RuleKind::Numeric => |value, _| numeric::is_numeric(value),
            RuleKind::Required => return None,
        };
        Some(check)
    }
}

impl FromStr for RuleKind {
    type Err = RuleError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        RuleKind::ALL
            .into_iter()
            .find(|kind| kind.name() == name)
            .ok_or_else(|| RuleError::UnknownRule(name.to_string()))
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// User-supplied check, called with the submitted value only.
#[derive(Clone)]
pub struct Predicate(Arc<dyn Fn(&str) -> bool + Send + Sync>);

impl Predicate {
    pub fn new(check: impl Fn(&str) -> bool + Send + Sync + 'static) -> Self {
        Self(Arc::new(check))
    }

    pub fn call(&self, value: &str) -> bool {
        (self.0)(value)
    }
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Predicate(..)")
    }
}

/// A rule as declared on a field, before parsing.
///
/// ```
/// use rusty_forms_validation::RuleDecl;
///
/// let rules = vec![
///     RuleDecl::from("Required"),
///     RuleDecl::from("MinLength(5)"),
///     RuleDecl::predicate("IsDisposable", |value| !value.ends_with("@example.org")),
/// ];
/// assert_eq!(rules.len(), 3);
/// ```
#[derive(Debug, Clone)]
pub enum RuleDecl {
    /// `"Required"`, `"MinLength(5)"`, `"Between(5,25)"`
    Named(String),
    /// Custom check reported under `name` when it fails
    Predicate { name: String, predicate: Predicate },
}

impl RuleDecl {
    pub fn predicate(
        name: impl Into<String>,
        check: impl Fn(&str) -> bool + Send + Sync + 'static,
    ) -> Self {
        RuleDecl::Predicate {
            name: name.into(),
            predicate: Predicate::new(check),
        }
    }
}

impl From<&str> for RuleDecl {
    fn from(rule: &str) -> Self {
        RuleDecl::Named(rule.to_string())
    }
}

impl From<String> for RuleDecl {
    fn from(rule: String) -> Self {
        RuleDecl::Named(rule)
    }
}

/// A parsed, whitelisted rule.
#[derive(Debug, Clone)]
pub enum Rule {
    Builtin {
        kind: RuleKind,
        /// Raw comma-split arguments, coerced by the check that uses them
        arguments: Vec<String>,
    },
    Predicate {
        name: String,
        predicate: Predicate,
    },
}

impl Rule {
    /// Parse a rule string such as `"MinLength(5)"` or `"Email"`.
    pub fn parse(rule: &str) -> Result<Self, RuleError> {
        let (name, arguments): (&str, Vec<String>) = match RULE_CALL_REGEX.captures(rule) {
            Some(caps) => (
                caps.get(1).map_or("", |m| m.as_str()),
                caps[2].split(',').map(str::to_string).collect(),
            ),
            None => (rule, Vec::new()),
        };

        let kind: RuleKind = name.parse()?;

        if arguments.len() != kind.arity() {
            return Err(RuleError::ArgumentCount {
                rule: kind.name().to_string(),
                expected: kind.arity(),
                found: arguments.len(),
            });
        }

        Ok(Rule::Builtin { kind, arguments })
    }

    pub fn from_decl(decl: &RuleDecl) -> Result<Self, RuleError> {
        match decl {
            RuleDecl::Named(rule) => Rule::parse(rule),
            RuleDecl::Predicate { name, predicate } => Ok(Rule::Predicate {
                name: name.clone(),
                predicate: predicate.clone(),
            }),
        }
    }

    /// Name reported when the rule fails
    pub fn name(&self) -> &str {
        match self {
            Rule::Builtin { kind, .. } => kind.name(),
            Rule::Predicate { name, .. } => name,
        }
    }

    pub fn kind(&self) -> Option<RuleKind> {
        match self {
            Rule::Builtin { kind, .. } => Some(*kind),
            Rule::Predicate { .. } => None,
        }
    }

    /// Run the rule against a non-blank value. A built-in rule holding
    /// the wrong number of arguments fails.
    pub fn check(&self, value: &str) -> bool {
        match self {
            // Hand-built rules can skip the arity check in `parse`
            Rule::Builtin { arguments, kind } if arguments.len() != kind.arity() => false,
            Rule::Builtin { kind, arguments } => match kind.check() {
                Some(check) => check(value, arguments),
                None => true,
            },
            Rule::Predicate { predicate, .. } => predicate.call(value),
        }
    }
}

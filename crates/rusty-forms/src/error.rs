// File: src/error.rs
// Purpose: Error type shared by templates, elements and the form builder

use rusty_forms_validation::{RuleError, ValidationFailure};
use std::fmt;
use thiserror::Error;

/// Why a submitted CSRF token was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForgeryReason {
    MissingFromInput,
    EmptyInInput,
    MissingFromSession,
    Invalid,
}

impl fmt::Display for ForgeryReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            ForgeryReason::MissingFromInput => "Token missing from input",
            ForgeryReason::EmptyInInput => "Token in input is empty",
            ForgeryReason::MissingFromSession => "Token missing from session",
            ForgeryReason::Invalid => "Token invalid",
        };
        f.write_str(reason)
    }
}

#[derive(Debug, Error)]
pub enum FormError {
    #[error("unsupported input type \"{0}\" provided")]
    UnsupportedInputType(String),

    #[error("unsupported button type \"{0}\" provided")]
    UnsupportedButtonType(String),

    #[error("unsupported form method \"{0}\" provided")]
    UnsupportedMethod(String),

    #[error("no such field kind \"{0}\"")]
    UnknownFieldKind(String),

    #[error("field kind \"{kind}\" has a single format, got variant \"{variant}\"")]
    UnexpectedVariant { kind: String, variant: String },

    #[error("form has no element named \"{0}\"")]
    UnknownElement(String),

    #[error("malformed form input: {0}")]
    MalformedInput(String),

    #[error(transparent)]
    Rule(#[from] RuleError),

    #[error("CSRF validation failed: {0}")]
    RequestForgery(ForgeryReason),

    #[error(transparent)]
    Validation(#[from] ValidationFailure),
}

impl FormError {
    /// Mistakes in the form definition itself, as opposed to bad input.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            FormError::UnsupportedInputType(_)
                | FormError::UnsupportedButtonType(_)
                | FormError::UnsupportedMethod(_)
                | FormError::UnknownFieldKind(_)
                | FormError::UnexpectedVariant { .. }
                | FormError::UnknownElement(_)
                | FormError::Rule(_)
        )
    }
}

pub type Result<T, E = FormError> = std::result::Result<T, E>;

//! Rusty-Forms-Validation
//!
//! Declarative field rules for server-rendered forms. A field declares its
//! rules as strings (`"Required"`, `"MinLength(5)"`, `"Between(5,25)"`) or as
//! named predicates; [`Validation`] parses them once and checks submitted
//! values, stopping at the first rule that fails.
//!
//! ```
//! use rusty_forms_validation::{RuleDecl, Validation};
//!
//! let validation = Validation::new(
//!     "email",
//!     &[
//!         RuleDecl::from("Required"),
//!         RuleDecl::from("MinLength(5)"),
//!         RuleDecl::from("MaxLength(25)"),
//!         RuleDecl::from("Email"),
//!     ],
//! )
//! .unwrap();
//!
//! assert!(validation.validate(Some("j.smith@example.com")).is_ok());
//! assert_eq!(validation.validate(Some("ab")).unwrap_err().rule, "MinLength");
//! ```

pub mod email;
pub mod error;
pub mod numeric;
pub mod rule;
pub mod string;
pub mod validation;

pub use error::{RuleError, ValidationFailure};
pub use rule::{CheckFn, Predicate, Rule, RuleDecl, RuleKind};
pub use validation::{is_blank, Outcome, RuleSet, Validation};

//! # rusty-forms
//!
//! Server-rendered HTML forms. Fields render through string formats with
//! `{token}` placeholders, which a [`TemplateRegistry`] can override per
//! field kind; submitted values are checked against declarative rules from
//! [`rusty_forms_validation`], re-exported here as [`validation`].
//!
//! ## Quick Start
//!
//! ```rust
//! use rusty_forms::{Builder, FieldParams, FormInput, RawAttributes};
//!
//! let mut form = Builder::new("signup", "get", "/signup", None, None)?
//!     .with_input(
//!         "email",
//!         "email",
//!         "Email",
//!         None,
//!         FieldParams::new()
//!             .attributes(RawAttributes::new().attr("class", "required"))
//!             .rules(["Required", "MinLength(5)", "MaxLength(25)", "Email"]),
//!     )?
//!     .with_button("submit", "save", "Sign up", None, FieldParams::new())?;
//!
//! let html = form.render()?;
//! assert!(html.starts_with(r#"<form id="signup" method="get" action="/signup">"#));
//! assert!(html.contains(r#"name="email" class="required">"#));
//!
//! let input = FormInput::from_urlencoded("email=j.smith%40example.com")?;
//! form.validate(&input)?;
//! # Ok::<(), rusty_forms::FormError>(())
//! ```
//!
//! ## Templates
//!
//! A registry format that hard-codes `class` on its opening tag absorbs
//! the field's own class instead of emitting the attribute twice:
//!
//! ```rust
//! use rusty_forms::{Field, FieldKind, FieldParams, Input, RawAttributes, TemplateRegistry};
//!
//! let registry = TemplateRegistry::new().with_format(
//!     FieldKind::Input,
//!     r#"<input class="form-control" id="{id}" name="{name}" value="{value}" {attributes}>"#,
//!     None,
//! )?;
//!
//! let params = FieldParams::new().attributes(RawAttributes::new().attr("class", "required"));
//! let mut email = Input::new("email", "email", "Email", None, params)?;
//! email.assign_to("signup");
//!
//! // The slot stays, now empty, since the field did declare attributes
//! assert_eq!(
//!     email.render(Some(&registry))?,
//!     r#"<input class="form-control required" id="signup-email" name="email" >"#
//! );
//! # Ok::<(), rusty_forms::FormError>(())
//! ```

pub mod attributes;
pub mod builder;
pub mod config;
pub mod csrf;
pub mod element;
pub mod error;
pub mod input;
pub mod template;

pub use rusty_forms_validation as validation;

pub use attributes::{AttributeMap, AttributeValue, RawAttributes};
pub use builder::{Builder, Method};
pub use config::{CsrfConfig, FormsConfig, TemplateConfig};
pub use csrf::{MemorySession, SessionStore};
pub use element::{
    Button, Field, FieldCore, FieldParams, Input, OptionGroup, Select, SelectItem, SelectOption,
    Textarea,
};
pub use error::{ForgeryReason, FormError, Result};
pub use input::FormInput;
pub use template::{FieldData, FieldKind, Format, TemplateRegistry};
pub use validation::{RuleDecl, ValidationFailure};

// File: src/template/mod.rs
// Purpose: Field formats, their registry and the render pipeline

mod format;
mod merge;
mod registry;

pub use format::{Format, InlineAttribute, ATTRIBUTES_SLOT, VALUE_FRAGMENT};
pub use merge::{fold_class, merge, render, FieldData};
pub use registry::{FieldKind, TemplateRegistry};

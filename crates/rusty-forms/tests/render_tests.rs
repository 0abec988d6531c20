// Integration tests for field rendering through formats and registries

use once_cell::sync::Lazy;
use pretty_assertions::assert_eq;
use rstest::rstest;
use rusty_forms::template::{fold_class, render};
use rusty_forms::{
    AttributeMap, Builder, Field, FieldCore, FieldKind, FieldParams, Format, FormError, Input,
    RawAttributes, TemplateRegistry, Textarea,
};
use serde_json::json;

fn email(value: Option<&str>, params: FieldParams) -> Input {
    let mut input = Input::new("email", "email", "Email", value, params).unwrap();
    input.assign_to("signup");
    input
}

fn bootstrap() -> TemplateRegistry {
    TemplateRegistry::new()
        .with_format(
            FieldKind::Input,
            r#"<div class="form-group"><input type="{type}" class="form-control" id="{id}" name="{name}" value="{value}" {attributes}></div>"#,
            None,
        )
        .unwrap()
}

#[test]
fn test_class_folds_into_format_class_once() {
    let params = FieldParams::new().attributes(
        RawAttributes::new()
            .attr("class", "required")
            .attr("placeholder", "you@example.com"),
    );
    let html = email(None, params).render(Some(&bootstrap())).unwrap();

    assert_eq!(
        html,
        r#"<div class="form-group"><input type="email" class="form-control required" id="signup-email" name="email" placeholder="you@example.com"></div>"#
    );
    assert_eq!(html.matches("class=").count(), 2);
    assert_eq!(html.matches("required").count(), 1);
}

#[test]
fn test_fold_class_removes_class_from_attributes() {
    let format = Format::parse("input", r#"<input class="form-control">"#);
    let mut attributes: AttributeMap = [("class", "required")].into_iter().collect();

    assert_eq!(fold_class(&format, &mut attributes), r#"<input class="form-control required">"#);
    assert!(attributes.is_empty());
}

#[test]
fn test_fold_is_repeatable_across_renders() {
    let params = FieldParams::new().attributes(RawAttributes::new().attr("class", "required"));
    let field = email(Some("a@b.co"), params);
    let registry = bootstrap();

    let first = field.render(Some(&registry)).unwrap();
    let second = field.render(Some(&registry)).unwrap();

    assert_eq!(first, second);
    assert!(first.contains(r#"class="form-control required""#));
    assert_eq!(field.attributes().get("class"), Some("required"));
    assert!(registry
        .resolve("input", Some("email"))
        .unwrap()
        .unwrap()
        .as_str()
        .contains(r#"class="form-control" "#));
}

#[test]
fn test_folded_class_is_not_expanded() {
    let registry = TemplateRegistry::new()
        .with_format(
            FieldKind::Input,
            r#"<input class="field-{name}" id="{id}" {attributes}>"#,
            None,
        )
        .unwrap();
    let params = FieldParams::new().attributes(
        RawAttributes::new()
            .attr("class", "{id}")
            .attr("title", "{name}"),
    );

    let html = email(None, params).render(Some(&registry)).unwrap();
    assert_eq!(
        html,
        r#"<input class="field-email {id}" id="signup-email" title="{name}">"#
    );
}

#[test]
fn test_other_shared_attributes_are_not_folded() {
    let registry = TemplateRegistry::new()
        .with_format(
            FieldKind::Input,
            r#"<input autocomplete="off" name="{name}" {attributes}>"#,
            None,
        )
        .unwrap();
    let params = FieldParams::new().attributes(RawAttributes::new().attr("autocomplete", "email"));

    let html = email(None, params).render(Some(&registry)).unwrap();
    assert_eq!(html, r#"<input autocomplete="off" name="email" autocomplete="email">"#);
}

#[rstest]
#[case(None, false)]
#[case(Some(""), false)]
#[case(Some("0"), true)]
#[case(Some("0.0"), true)]
#[case(Some(" "), true)]
#[case(Some("a@b.co"), true)]
fn test_value_attribute_presence(#[case] value: Option<&str>, #[case] present: bool) {
    let html = email(value, FieldParams::new()).render(None).unwrap();
    assert_eq!(html.contains("value="), present, "{}", html);
}

#[test]
fn test_value_is_escaped() {
    let html = email(Some(r#""><script>"#), FieldParams::new()).render(None).unwrap();
    assert!(html.contains(r#"value="&quot;&gt;&lt;script&gt;""#));
}

// serde_json objects iterate in key order
#[test]
fn test_attributes_from_json_declaration() {
    let raw: RawAttributes = serde_json::from_value(json!({
        "class": "required",
        "data": { "format": "email", "hint": "work address" },
        "aria": { "required": "true" }
    }))
    .unwrap();

    let html = email(None, FieldParams::new().attributes(raw)).render(None).unwrap();
    assert!(html.ends_with(
        r#"name="email" aria-required="true" class="required" data-format="email" data-hint="work address">"#
    ));
}

#[test]
fn test_registry_falls_back_to_built_in_format() {
    let registry = TemplateRegistry::new()
        .with_format(FieldKind::Input, r#"<input type="date" id="{id}">"#, Some("date"))
        .unwrap();

    let html = email(None, FieldParams::new()).render(Some(&registry)).unwrap();
    assert_eq!(
        html,
        r#"<label for="signup-email">Email</label><input type="email" id="signup-email" name="email">"#
    );

    let mut bio = Textarea::new("bio", "Bio", None, FieldParams::new()).unwrap();
    bio.assign_to("signup");
    assert_eq!(bio.render(Some(&registry)).unwrap(), bio.render(None).unwrap());
}

#[test]
fn test_placeholders_in_values_are_not_expanded() {
    let mut input = Input::new("text", "q", "{name}", Some("{id}"), FieldParams::new()).unwrap();
    input.assign_to("search");

    assert_eq!(
        input.render(None).unwrap(),
        r#"<label for="search-q">{name}</label><input type="text" id="search-q" name="q" value="{id}">"#
    );
}

#[test]
fn test_unknown_tokens_stay_literal() {
    let registry = TemplateRegistry::new()
        .with_format(
            FieldKind::Textarea,
            r#"<textarea name="{name}">{value}</textarea>{help}"#,
            None,
        )
        .unwrap();
    let mut notes = Textarea::new("notes", "Notes", Some("a"), FieldParams::new()).unwrap();
    notes.assign_to("f");

    assert_eq!(
        notes.render(Some(&registry)).unwrap(),
        r#"<textarea name="notes">a</textarea>{help}"#
    );
}

static FIELDSET_FORMAT: Lazy<Format> =
    Lazy::new(|| {
        Format::parse(
            "fieldset",
            r#"<fieldset id="{id}" {attributes}><legend>{label}</legend></fieldset>"#,
        )
    });

#[derive(Debug)]
struct Fieldset {
    core: FieldCore,
}

impl Field for Fieldset {
    fn tag(&self) -> &'static str {
        "fieldset"
    }

    fn core(&self) -> &FieldCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut FieldCore {
        &mut self.core
    }

    fn default_format(&self) -> &'static Format {
        &FIELDSET_FORMAT
    }
}

fn fieldset() -> Box<dyn Field> {
    Box::new(Fieldset {
        core: FieldCore::new("contact", "Contact", None, FieldParams::new()).unwrap(),
    })
}

#[test]
fn test_custom_field_renders_its_own_format() {
    let form = Builder::new("f", "get", "/", None, None).unwrap().push(fieldset()).unwrap();
    assert_eq!(
        form.element("contact").unwrap(),
        r#"<fieldset id="f-contact"><legend>Contact</legend></fieldset>"#
    );
}

#[test]
fn test_registry_rejects_unknown_tag() {
    let registry = std::sync::Arc::new(TemplateRegistry::new());
    let err = Builder::new("f", "get", "/", Some(registry.clone()), None)
        .unwrap()
        .push(fieldset())
        .unwrap_err();
    assert!(err.is_configuration());
    assert!(matches!(err, FormError::UnknownFieldKind(tag) if tag == "fieldset"));

    let field = fieldset();
    assert!(matches!(
        render(field.as_ref(), Some(registry.as_ref())),
        Err(FormError::UnknownFieldKind(_))
    ));
}

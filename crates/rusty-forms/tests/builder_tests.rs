// Integration tests for building, rendering and validating whole forms

use pretty_assertions::assert_eq;
use rusty_forms::{
    Builder, FieldParams, ForgeryReason, FormError, FormInput, FormsConfig, MemorySession,
    RawAttributes, RuleDecl, SelectOption, SessionStore,
};
use std::sync::Arc;

fn contact_form() -> Builder {
    let mut session = MemorySession::new();
    session.set("contact-us.csrf", "tok".to_string());

    Builder::new("Contact Us", "post", "/contact", None, None)
        .unwrap()
        .with_session(Box::new(session))
        .unwrap()
        .with_input("text", "name", "Name", None, FieldParams::new().rules(["Required"]))
        .unwrap()
        .with_textarea("message", "Message", Some("Hi"), FieldParams::new())
        .unwrap()
        .with_select(
            "topic",
            "Topic",
            Some("sales"),
            [
                SelectOption::new("Sales").value("sales"),
                SelectOption::new("Support").value("support"),
            ],
            FieldParams::new(),
        )
        .unwrap()
        .with_button("submit", "send", "Send", None, FieldParams::new())
        .unwrap()
}

#[test]
fn test_render_whole_form() {
    let expected = concat!(
        r#"<form id="contact-us" method="post" action="/contact">"#,
        r#"<label for="contact-us-csrf"></label><input type="hidden" id="contact-us-csrf" name="csrf" value="tok">"#,
        r#"<label for="contact-us-name">Name</label><input type="text" id="contact-us-name" name="name">"#,
        r#"<label for="contact-us-message">Message</label><textarea id="contact-us-message" name="message">Hi</textarea>"#,
        r#"<label for="contact-us-topic">Topic</label><select id="contact-us-topic" name="topic">"#,
        r#"<option selected="selected" value="sales">Sales</option><option value="support">Support</option></select>"#,
        r#"<button type="submit" id="contact-us-send" name="send">Send</button>"#,
        r#"</form>"#,
    );

    assert_eq!(contact_form().render().unwrap(), expected);
}

#[test]
fn test_render_single_element() {
    let form = contact_form();
    assert_eq!(
        form.element("send").unwrap(),
        r#"<button type="submit" id="contact-us-send" name="send">Send</button>"#
    );
}

#[test]
fn test_generated_token_round_trips() {
    let mut form = Builder::new("login", "post", "/login", None, None)
        .unwrap()
        .with_session(Box::new(MemorySession::new()))
        .unwrap();

    let token = form.token().unwrap();
    assert_eq!(form.session().unwrap().get("login.csrf").as_deref(), Some(token.as_str()));

    let input: FormInput = [("csrf", token.as_str())].into_iter().collect();
    assert!(form.validate(&input).is_ok());
}

#[test]
fn test_forgery_reasons() {
    let mut form = contact_form();

    let cases = [
        ("name=jo", ForgeryReason::MissingFromInput),
        ("csrf=&name=jo", ForgeryReason::EmptyInInput),
        ("csrf=nope&name=jo", ForgeryReason::Invalid),
    ];
    for (body, reason) in cases {
        let input = FormInput::from_urlencoded(body).unwrap();
        match form.validate(&input) {
            Err(FormError::RequestForgery(found)) => assert_eq!(found, reason, "{}", body),
            other => panic!("expected forgery error for {}, got {:?}", body, other),
        }
    }
}

/// Session that loses everything written to it
struct ForgetfulSession;

impl SessionStore for ForgetfulSession {
    fn get(&self, _key: &str) -> Option<String> {
        None
    }

    fn set(&mut self, _key: &str, _value: String) {}
}

#[test]
fn test_token_missing_from_session() {
    let mut form = Builder::new("login", "post", "/login", None, None)
        .unwrap()
        .with_session(Box::new(ForgetfulSession))
        .unwrap();
    assert!(form.token().is_none());

    let input: FormInput = [("csrf", "anything")].into_iter().collect();
    let err = form.validate(&input).unwrap_err();
    assert_eq!(err.to_string(), "CSRF validation failed: Token missing from session");
}

#[test]
fn test_validation_stops_at_first_failing_field() {
    let mut form = contact_form();
    let input = FormInput::from_urlencoded("csrf=tok&name=+++").unwrap();

    let err = form.validate(&input).unwrap_err();
    match err {
        FormError::Validation(failure) => {
            assert_eq!(failure.field, "name");
            assert_eq!(failure.rule, "Required");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn test_fields_without_rules_keep_their_value() {
    let mut form = contact_form();
    let input = FormInput::from_urlencoded("csrf=tok&name=Jo&message=changed").unwrap();

    form.validate(&input).unwrap();
    assert_eq!(form.get("name").unwrap().value(), Some("Jo"));
    assert_eq!(form.get("message").unwrap().value(), Some("Hi"));
}

fn signup_form() -> Builder {
    Builder::new("signup", "get", "/signup", None, None)
        .unwrap()
        .with_input(
            "email",
            "email",
            "Email",
            None,
            FieldParams::new().rules(["Required", "MinLength(5)", "MaxLength(25)", "Email"]),
        )
        .unwrap()
        .with_input(
            "number",
            "age",
            "Age",
            None,
            FieldParams::new().rules(["Integer", "Between(18,120)"]),
        )
        .unwrap()
        .with_input(
            "text",
            "handle",
            "Handle",
            None,
            FieldParams::new().rules([
                RuleDecl::from("AlphaNum"),
                RuleDecl::predicate("NotReserved", |value| value != "admin"),
            ]),
        )
        .unwrap()
}

#[test]
fn test_signup_scenarios() {
    let cases = [
        ("email=j.smith%40example.com&age=30&handle=jsmith", None),
        ("email=&age=30", Some(("email", "Required"))),
        ("email=a%40b&age=30", Some(("email", "MinLength"))),
        ("email=not-an-email&age=30", Some(("email", "Email"))),
        ("email=j.smith%40example.com&age=17", Some(("age", "Between"))),
        ("email=j.smith%40example.com&age=3.5", Some(("age", "Integer"))),
        ("email=j.smith%40example.com&handle=admin", Some(("handle", "NotReserved"))),
        ("email=j.smith%40example.com&handle=j+smith", Some(("handle", "AlphaNum"))),
    ];

    for (body, expected) in cases {
        let mut form = signup_form();
        let input = FormInput::from_urlencoded(body).unwrap();
        let result = form.validate(&input);

        match expected {
            None => assert!(result.is_ok(), "{}: {:?}", body, result),
            Some((field, rule)) => match result {
                Err(FormError::Validation(failure)) => {
                    let found = (failure.field.as_str(), failure.rule.as_str());
                    assert_eq!(found, (field, rule), "{}", body);
                }
                other => panic!("{}: expected {}/{}, got {:?}", body, field, rule, other),
            },
        }
    }
}

#[test]
fn test_failures_collects_every_field() {
    let mut form = signup_form();
    let input = FormInput::from_urlencoded("email=nope&age=200&handle=ok").unwrap();

    let failures = form.failures(&input).unwrap();
    let found: Vec<_> = failures
        .iter()
        .map(|(name, failure)| (name.as_str(), failure.rule.as_str()))
        .collect();
    assert_eq!(found, vec![("email", "MinLength"), ("age", "Between")]);

    let clean = FormInput::from_urlencoded("email=j.smith%40example.com").unwrap();
    assert!(form.failures(&clean).unwrap().is_empty());
}

#[test]
fn test_configured_templates() {
    let config = FormsConfig::parse(
        r#"
        [templates.input]
        default = '<div class="form-group"><input type="{type}" class="form-control" id="{id}" name="{name}" value="{value}" {attributes}></div>'
        "#,
    )
    .unwrap();
    let registry = Arc::new(config.registry().unwrap());

    let form = Builder::new("search", "get", "/search", Some(registry), None)
        .unwrap()
        .with_config(&config)
        .unwrap()
        .with_input(
            "search",
            "q",
            "Search",
            Some("rust"),
            FieldParams::new().attributes(
                RawAttributes::new()
                    .attr("class", "lg")
                    .attr("placeholder", "Find"),
            ),
        )
        .unwrap()
        .with_textarea("notes", "Notes", None, FieldParams::new())
        .unwrap();

    assert_eq!(
        form.element("q").unwrap(),
        r#"<div class="form-group"><input type="search" class="form-control lg" id="search-q" name="q" value="rust" placeholder="Find"></div>"#
    );
    assert_eq!(
        form.element("notes").unwrap(),
        r#"<label for="search-notes">Notes</label><textarea id="search-notes" name="notes"></textarea>"#
    );
}

use devfeed_core::{ContactField, ContactForm, ErrorKind, FeedError, MESSAGE_MAX};
use pretty_assertions::assert_eq;

fn form() -> ContactForm {
    ContactForm {
        name: "Ada Lovelace".into(),
        email: "ada@example.com".into(),
        subject: "Hello".into(),
        message: "Loved the article on iterators.".into(),
    }
}

fn violation(form: &ContactForm) -> (ContactField, &'static str) {
    match form.validate() {
        Err(FeedError::ValidationFailure { field, message }) => (field, message),
        other => panic!("expected validation failure, got {other:?}"),
    }
}

#[test]
fn valid_form_is_trimmed() {
    let mut input = form();
    input.name = "  Ada Lovelace ".into();
    input.message = "\n hi there \n".into();

    let message = input.validate().expect("valid form");
    assert_eq!(message.name, "Ada Lovelace");
    assert_eq!(message.message, "hi there");
    assert_eq!(message.email, "ada@example.com");
}

#[test]
fn message_over_limit_is_rejected() {
    let mut input = form();
    input.message = "x".repeat(MESSAGE_MAX + 1);

    let err = input.validate().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ValidationFailure);
    assert_eq!(err.to_string(), "Message too long");
    assert_eq!(violation(&input), (ContactField::Message, "Message too long"));
}

#[test]
fn message_at_limit_is_accepted() {
    let mut input = form();
    input.message = "é".repeat(MESSAGE_MAX);
    assert!(input.validate().is_ok());
}

#[test]
fn astral_characters_count_twice_toward_the_limit() {
    let mut input = form();
    input.message = "🦀".repeat(MESSAGE_MAX / 2);
    assert!(input.validate().is_ok());

    input.message = "🦀".repeat(MESSAGE_MAX / 2 + 1);
    assert_eq!(violation(&input), (ContactField::Message, "Message too long"));
}

#[test]
fn first_violation_wins() {
    let input = ContactForm {
        name: "   ".into(),
        email: "not-an-email".into(),
        subject: String::new(),
        message: String::new(),
    };
    assert_eq!(violation(&input), (ContactField::Name, "Name is required"));

    let input = ContactForm {
        name: "Ada".into(),
        ..input
    };
    assert_eq!(violation(&input), (ContactField::Email, "Invalid email address"));

    let input = ContactForm {
        email: "ada@example.com".into(),
        ..input
    };
    assert_eq!(violation(&input), (ContactField::Subject, "Subject is required"));

    let input = ContactForm {
        subject: "s".repeat(201),
        ..input
    };
    assert_eq!(violation(&input), (ContactField::Subject, "Subject too long"));
}

#[test]
fn long_name_is_rejected() {
    let mut input = form();
    input.name = "n".repeat(101);
    assert_eq!(violation(&input), (ContactField::Name, "Name too long"));
}

#[test]
fn missing_json_fields_default_to_empty() {
    let input: ContactForm =
        serde_json::from_value(serde_json::json!({ "name": "Ada" })).expect("form json");
    assert_eq!(violation(&input), (ContactField::Email, "Invalid email address"));
}

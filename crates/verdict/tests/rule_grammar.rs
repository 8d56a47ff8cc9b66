//! Rule-string grammar behavior through the public API.

use pretty_assertions::assert_eq;
use verdict::{ValidationError, Validator};

#[test]
fn parse_preserves_token_order_and_spelling() {
    let mut validator = Validator::new();
    validator
        .add_field(
            "username",
            Some("ada"),
            "required|alphaDash|lengthMin:2|lengthMax:20",
        )
        .unwrap();

    let tokens: Vec<String> = validator.fields()[0]
        .rules()
        .iter()
        .map(|rule| rule.token())
        .collect();
    assert_eq!(
        tokens.join("|"),
        "required|alphaDash|lengthMin:2|lengthMax:20"
    );
}

#[test]
fn alias_tokens_round_trip_as_written() {
    let mut validator = Validator::new();
    validator
        .add_field("score", Some("7"), "gt:5|lte:10")
        .unwrap();

    let rules = validator.fields()[0].rules();
    assert_eq!(rules[0].token(), "gt:5");
    assert_eq!(rules[0].canonical_name(), "greaterThan");
    assert_eq!(rules[1].token(), "lte:10");
    assert!(validator.validate(false).unwrap());
}

#[test]
fn alias_and_canonical_spelling_validate_identically() {
    for rules in ["gt:10", "greaterThan:10"] {
        let mut validator = Validator::new();
        validator.add_field("score", Some("3"), rules).unwrap();
        assert!(!validator.validate(false).unwrap(), "rules: {rules}");
        assert_eq!(
            validator.error_messages(),
            vec!["The score must be greater than 10.".to_string()]
        );
    }
}

#[test]
fn unknown_rule_is_rejected_and_field_not_registered() {
    let mut validator = Validator::new();
    let error = validator
        .add_field("name", Some("x"), "bogus")
        .unwrap_err();
    assert_eq!(error, ValidationError::unknown_rule("bogus"));
    assert!(validator.fields().is_empty());
    // The validator is still usable afterwards.
    validator.add_field("name", Some("x"), "alpha").unwrap();
    assert_eq!(validator.fields().len(), 1);
}

#[test]
fn parameterized_rule_without_parameters_is_rejected() {
    let mut validator = Validator::new();
    assert_eq!(
        validator.add_field("age", Some("5"), "max:").unwrap_err(),
        ValidationError::missing_parameters("max")
    );
    assert_eq!(
        validator.add_field("age", Some("5"), "max").unwrap_err(),
        ValidationError::missing_parameters("max")
    );
    assert!(validator.fields().is_empty());
}

#[test]
fn blank_name_or_rules_is_a_bad_argument() {
    let mut validator = Validator::new();
    let error = validator.add_field("  ", Some("x"), "required").unwrap_err();
    assert_eq!(error.code(), "RULES:BAD_ARGUMENT");
    let error = validator.add_field("name", Some("x"), "").unwrap_err();
    assert_eq!(error.code(), "RULES:BAD_ARGUMENT");
}

#[test]
fn format_parameters_keep_their_colons() {
    let mut validator = Validator::new();
    validator
        .add_field("opens_at", Some("09:30"), "dateFormat:%H:%M")
        .unwrap();
    assert!(validator.validate(false).unwrap());

    let mut validator = Validator::new();
    validator
        .add_field("opens_at", Some("late"), "format:%H:%M")
        .unwrap();
    assert!(!validator.validate(false).unwrap());
}

#[test]
fn required_flag_is_set_wherever_the_rule_appears() {
    let mut validator = Validator::new();
    validator
        .add_field("first", Some(""), "required|alpha")
        .unwrap();
    validator
        .add_field("second", Some(""), "alpha|required")
        .unwrap();
    assert!(validator.fields()[0].is_required());
    assert!(validator.fields()[1].is_required());
}

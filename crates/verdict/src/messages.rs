//! Default message templates and caller-supplied overrides.
//!
//! Templates use positional `{}` placeholders: the first receives the field
//! name; for parameterized rules each parameter fills one subsequent
//! placeholder, except that a rule with more than two parameters renders
//! them as a single bracketed list into the second placeholder.

use std::collections::HashMap;
use std::sync::LazyLock;

static EXPLICIT_TEMPLATES: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        ("required", "The {} field is required."),
        ("notEmpty", "The {} field can not be empty."),
        ("email", "The {} must be a valid email address."),
        ("alpha", "The {} must only contain letters."),
        (
            "alphaDash",
            "The {} must only contain letters, numbers, dashes and underscores.",
        ),
        ("alphaNumeric", "The {} must only contain letters and numbers."),
        ("uppercase", "The {} must be uppercase."),
        ("lowercase", "The {} must be lowercase."),
        ("numeric", "The {} must be a number."),
        ("boolean", "The {} field must be true or false."),
        ("date", "The {} is not a valid date."),
    ])
});

static PARAMETERIZED_TEMPLATES: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| {
        HashMap::from([
            ("digits", "The {} must be {} digits."),
            ("between", "The {} must be between {} and {}."),
            ("in", "The {} must be in {}."),
            ("notIn", "The {} cannot be in {}."),
            ("max", "The {} must not be greater than {}."),
            ("min", "The {} must be at least {}."),
            ("digitsMax", "The {} must not have more than {} digits."),
            ("digitsMin", "The {} must have at least {} digits."),
            ("length", "The length of {} must be {}."),
            ("lengthMax", "The length of {} must not be longer than {}."),
            ("lengthMin", "The length of {} must not be shorter than {}."),
            ("dateFormat", "The date format of {} must be {}."),
            ("greaterThan", "The {} must be greater than {}."),
            ("lessThan", "The {} must be less than {}."),
            (
                "greaterThanOrEqual",
                "The {} must be greater than or equal to {}.",
            ),
            ("lessThanOrEqual", "The {} must be less than or equal to {}."),
            ("equal", "The {} must be {}."),
            ("regex", "The {} does not match the regular expression {}."),
            ("same", "The {} doesn't match {}."),
        ])
    });

/// Default template for an explicit rule, by canonical name.
pub(crate) fn explicit_template(rule: &str) -> Option<&'static str> {
    EXPLICIT_TEMPLATES.get(rule).copied()
}

/// Default template for a parameterized rule, by canonical name.
pub(crate) fn parameterized_template(rule: &str) -> Option<&'static str> {
    PARAMETERIZED_TEMPLATES.get(rule).copied()
}

/// Substitute `args` into successive `{}` placeholders.
///
/// Surplus arguments are ignored; surplus placeholders are left in place.
pub(crate) fn render(template: &str, args: &[&str]) -> String {
    let mut out = String::with_capacity(template.len() + 16);
    let mut args = args.iter();
    let mut rest = template;
    while let Some(pos) = rest.find("{}") {
        out.push_str(&rest[..pos]);
        match args.next() {
            Some(arg) => out.push_str(arg),
            None => out.push_str("{}"),
        }
        rest = &rest[pos + 2..];
    }
    out.push_str(rest);
    out
}

// ============================================================================
// OVERRIDE BAG
// ============================================================================

/// Caller-supplied message templates keyed by `(field name, rule name)`.
///
/// An override wins over the default catalog and is used verbatim, with no
/// placeholder substitution. Registering a second override for the same key
/// replaces the first.
#[derive(Debug, Clone, Default)]
pub(crate) struct MessageOverrides {
    map: HashMap<(String, String), String>,
}

impl MessageOverrides {
    pub fn insert(&mut self, field: &str, rule: &str, template: &str) {
        self.map
            .insert((field.to_string(), rule.to_string()), template.to_string());
    }

    pub fn get(&self, field: &str, rule: &str) -> Option<&str> {
        self.map
            .get(&(field.to_string(), rule.to_string()))
            .map(String::as_str)
    }
}

// ============================================================================
// TESTS
// ============================================================================

//! The matcher registry: one pure predicate per rule kind.
//!
//! Every matcher has the uniform signature
//! `fn(value: Option<&str>, params: &[String]) -> bool`. Matchers never fail:
//! a missing value, a malformed number, an invalid date, or an uncompilable
//! regex parameter is a non-match (`false`), not an error. Parse-time
//! validation of rule names and parameter presence lives in [`crate::parse`];
//! this module only answers "does this value satisfy this rule".

use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use regex::Regex;

/// The predicate type bound to every rule.
///
/// A plain function pointer: cheap to copy, and swappable. The same-field
/// mechanism replaces a rule's matcher with [`always_pass`] or
/// [`always_fail`] for the duration of one evaluation.
pub type Matcher = fn(Option<&str>, &[String]) -> bool;

static ALPHA_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\p{L}\p{M}]+$").unwrap());

static ALPHA_NUMERIC_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\p{L}\p{M}\p{N}]+$").unwrap());

static ALPHA_DASH_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\p{L}\p{M}\p{N}_-]+$").unwrap());

static NUMERIC_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\p{N}+$").unwrap());

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9_+&*-]+(?:\.[a-zA-Z0-9_+&*-]+)*@(?:[a-zA-Z0-9-]+\.)+[a-zA-Z]{2,7}$")
        .unwrap()
});

// ============================================================================
// REGISTRY
// ============================================================================

/// Look up the matcher for an explicit (parameterless) rule name.
pub(crate) fn explicit_matcher(name: &str) -> Option<Matcher> {
    Some(match name {
        "required" => required,
        "notEmpty" => not_empty,
        "alpha" => alpha,
        "alphaNumeric" => alpha_numeric,
        "alphaDash" => alpha_dash,
        "email" => email,
        "numeric" => numeric,
        "date" => date,
        "boolean" => boolean,
        "uppercase" => uppercase,
        "lowercase" => lowercase,
        _ => return None,
    })
}

/// Look up the matcher for a parameterized rule name or one of its aliases.
pub(crate) fn parameterized_matcher(name: &str) -> Option<Matcher> {
    Some(match canonical(name) {
        "digits" => digits,
        "between" => between,
        "max" => max,
        "min" => min,
        // The digits variants share the plain length checks.
        "digitsMax" => length_max,
        "digitsMin" => length_min,
        "length" => length,
        "lengthMax" => length_max,
        "lengthMin" => length_min,
        "in" => is_in,
        "notIn" => not_in,
        "greaterThan" => greater_than,
        "greaterThanOrEqual" => greater_than_or_equal,
        "lessThan" => less_than,
        "lessThanOrEqual" => less_than_or_equal,
        "equal" => equal,
        "dateFormat" => date_format,
        "regex" => matches_pattern,
        "same" => same,
        _ => return None,
    })
}

/// Map a rule-token spelling to its canonical rule name.
///
/// The short spellings are accepted in rule-strings interchangeably with
/// their long forms; message templates are keyed by the canonical name.
#[must_use]
pub fn canonical(name: &str) -> &str {
    match name {
        "gt" => "greaterThan",
        "gte" => "greaterThanOrEqual",
        "lt" => "lessThan",
        "lte" => "lessThanOrEqual",
        "format" => "dateFormat",
        "digits_max" => "digitsMax",
        "digits_min" => "digitsMin",
        "length_max" => "lengthMax",
        "length_min" => "lengthMin",
        other => other,
    }
}

pub(crate) fn is_explicit_rule(name: &str) -> bool {
    explicit_matcher(name).is_some()
}

pub(crate) fn is_parameterized_rule(name: &str) -> bool {
    parameterized_matcher(name).is_some()
}

// ============================================================================
// ARITY METADATA
// ============================================================================

/// Declared parameter count for a parameterized rule.
///
/// This is introspection metadata only: the parser requires at least one
/// parameter for every parameterized rule and otherwise leaves arity
/// unenforced; a rule given the wrong number of parameters simply fails to
/// match at evaluation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arity {
    /// Exactly one parameter.
    One,
    /// Exactly two parameters.
    Two,
    /// One or more parameters.
    OneOrMore,
}

/// Declared arity for a parameterized rule name (or alias), if known.
#[must_use]
pub fn arity(name: &str) -> Option<Arity> {
    match canonical(name) {
        "between" => Some(Arity::Two),
        "in" | "notIn" => Some(Arity::OneOrMore),
        other if is_parameterized_rule(other) => Some(Arity::One),
        _ => None,
    }
}

// ============================================================================
// SAME-FIELD OVERRIDES
// ============================================================================

/// Matcher that passes unconditionally.
pub(crate) fn always_pass(_value: Option<&str>, _params: &[String]) -> bool {
    true
}

/// Matcher that fails unconditionally.
pub(crate) fn always_fail(_value: Option<&str>, _params: &[String]) -> bool {
    false
}

// ============================================================================
// EXPLICIT MATCHERS
// ============================================================================

/// A value is blank when it is absent or all-whitespace.
pub(crate) fn is_blank(value: Option<&str>) -> bool {
    value.is_none_or(|v| v.trim().is_empty())
}

fn required(value: Option<&str>, _params: &[String]) -> bool {
    !is_blank(value)
}

fn not_empty(value: Option<&str>, _params: &[String]) -> bool {
    !is_blank(value)
}

fn alpha(value: Option<&str>, _params: &[String]) -> bool {
    value.is_some_and(|v| ALPHA_REGEX.is_match(v))
}

fn alpha_numeric(value: Option<&str>, _params: &[String]) -> bool {
    value.is_some_and(|v| ALPHA_NUMERIC_REGEX.is_match(v))
}

fn alpha_dash(value: Option<&str>, _params: &[String]) -> bool {
    value.is_some_and(|v| ALPHA_DASH_REGEX.is_match(v))
}

fn email(value: Option<&str>, _params: &[String]) -> bool {
    value.is_some_and(|v| EMAIL_REGEX.is_match(v))
}

fn numeric(value: Option<&str>, _params: &[String]) -> bool {
    value.is_some_and(|v| NUMERIC_REGEX.is_match(v))
}

fn date(value: Option<&str>, _params: &[String]) -> bool {
    value.is_some_and(|v| NaiveDate::parse_from_str(v, "%d/%m/%Y").is_ok())
}

fn boolean(value: Option<&str>, _params: &[String]) -> bool {
    matches!(value, Some("true" | "false"))
}

fn uppercase(value: Option<&str>, _params: &[String]) -> bool {
    match value {
        Some(v) if !v.trim().is_empty() => v == v.to_uppercase(),
        _ => false,
    }
}

fn lowercase(value: Option<&str>, _params: &[String]) -> bool {
    match value {
        Some(v) if !v.trim().is_empty() => v == v.to_lowercase(),
        _ => false,
    }
}

// ============================================================================
// PARAMETERIZED MATCHERS
// ============================================================================

fn digits(value: Option<&str>, params: &[String]) -> bool {
    let Some(v) = value else { return false };
    if !NUMERIC_REGEX.is_match(v) {
        return false;
    }
    param_usize(params, 0).is_some_and(|expected| v.chars().count() == expected)
}

/// Inclusive integer range check on both bounds.
fn between(value: Option<&str>, params: &[String]) -> bool {
    let (Some(v), Some(lo), Some(hi)) = (
        value.and_then(|v| v.parse::<i64>().ok()),
        param_i64(params, 0),
        param_i64(params, 1),
    ) else {
        return false;
    };
    v >= lo && v <= hi
}

/// Numeric values compare numerically against the bound; anything else
/// compares by character length. Both comparisons are strict.
fn max(value: Option<&str>, params: &[String]) -> bool {
    let Some(v) = value else { return false };
    if NUMERIC_REGEX.is_match(v) {
        let (Some(n), Some(bound)) = (v.parse::<i64>().ok(), param_i64(params, 0)) else {
            return false;
        };
        return n < bound;
    }
    param_usize(params, 0).is_some_and(|bound| v.chars().count() < bound)
}

fn min(value: Option<&str>, params: &[String]) -> bool {
    let Some(v) = value else { return false };
    if NUMERIC_REGEX.is_match(v) {
        let (Some(n), Some(bound)) = (v.parse::<i64>().ok(), param_i64(params, 0)) else {
            return false;
        };
        return n > bound;
    }
    param_usize(params, 0).is_some_and(|bound| v.chars().count() > bound)
}

fn length(value: Option<&str>, params: &[String]) -> bool {
    let Some(v) = value else { return false };
    param_usize(params, 0).is_some_and(|expected| v.chars().count() == expected)
}

fn length_max(value: Option<&str>, params: &[String]) -> bool {
    let Some(v) = value else { return false };
    param_usize(params, 0).is_some_and(|bound| v.chars().count() <= bound)
}

fn length_min(value: Option<&str>, params: &[String]) -> bool {
    let Some(v) = value else { return false };
    param_usize(params, 0).is_some_and(|bound| v.chars().count() >= bound)
}

fn is_in(value: Option<&str>, params: &[String]) -> bool {
    value.is_some_and(|v| params.iter().any(|p| p == v))
}

/// A missing value is not a member of any list.
fn not_in(value: Option<&str>, params: &[String]) -> bool {
    !is_in(value, params)
}

fn greater_than(value: Option<&str>, params: &[String]) -> bool {
    compare_numeric(value, params, |a, b| a > b)
}

fn greater_than_or_equal(value: Option<&str>, params: &[String]) -> bool {
    compare_numeric(value, params, |a, b| a >= b)
}

fn less_than(value: Option<&str>, params: &[String]) -> bool {
    compare_numeric(value, params, |a, b| a < b)
}

fn less_than_or_equal(value: Option<&str>, params: &[String]) -> bool {
    compare_numeric(value, params, |a, b| a <= b)
}

/// Numeric comparison when both operands parse as numbers, exact string
/// equality otherwise.
#[allow(clippy::float_cmp)]
fn equal(value: Option<&str>, params: &[String]) -> bool {
    let Some(v) = value else { return false };
    let Some(expected) = params.first() else {
        return false;
    };
    match (v.parse::<f64>(), expected.parse::<f64>()) {
        (Ok(a), Ok(b)) => a == b,
        _ => v == expected.as_str(),
    }
}

fn date_format(value: Option<&str>, params: &[String]) -> bool {
    let Some(v) = value else { return false };
    let Some(fmt) = params.first() else {
        return false;
    };
    NaiveDateTime::parse_from_str(v, fmt).is_ok()
        || NaiveDate::parse_from_str(v, fmt).is_ok()
        || NaiveTime::parse_from_str(v, fmt).is_ok()
}

/// Full-match semantics: the pattern must cover the whole value.
fn matches_pattern(value: Option<&str>, params: &[String]) -> bool {
    let Some(v) = value else { return false };
    let Some(pattern) = params.first() else {
        return false;
    };
    match Regex::new(&format!("^(?:{pattern})$")) {
        Ok(re) => re.is_match(v),
        Err(_) => false,
    }
}

/// Never decides anything by itself. The cross-field comparison is wired
/// structurally: when a same-field link exists, every matcher on the field
/// is replaced by [`always_pass`] or [`always_fail`] before evaluation.
fn same(_value: Option<&str>, _params: &[String]) -> bool {
    false
}

// ============================================================================
// HELPERS
// ============================================================================

fn param_i64(params: &[String], index: usize) -> Option<i64> {
    params.get(index).and_then(|p| p.parse().ok())
}

fn param_usize(params: &[String], index: usize) -> Option<usize> {
    params.get(index).and_then(|p| p.parse().ok())
}

fn compare_numeric(value: Option<&str>, params: &[String], op: fn(f64, f64) -> bool) -> bool {
    let Some(v) = value.and_then(|v| v.parse::<f64>().ok()) else {
        return false;
    };
    let Some(bound) = params.first().and_then(|p| p.parse::<f64>().ok()) else {
        return false;
    };
    op(v, bound)
}

// ============================================================================
// TESTS
// ============================================================================

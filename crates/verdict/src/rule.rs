//! The rule model: a rule name bound to its matcher, plus per-run result state.
//!
//! A [`Rule`] carries its configuration (name as written in the rule-string,
//! parameters, matcher) and the mutable outcome of one evaluation pass
//! (`passed`, resolved `message`). Rules are created by the parser when a
//! field is constructed, mutated only during that field's single evaluation,
//! and dropped with the field.

use std::fmt;

use smallvec::SmallVec;

use crate::error::{ValidationError, ValidationResult};
use crate::matchers::{self, Matcher};

/// Parameter storage; rule-strings carry one to three parameters in practice.
pub(crate) type Params = SmallVec<[String; 2]>;

// ============================================================================
// RULE KIND
// ============================================================================

/// Whether a rule takes parameters, and which.
#[derive(Debug, Clone)]
pub enum RuleKind {
    /// A parameterless rule such as `required` or `email`.
    Explicit,
    /// A rule with a colon-separated parameter list such as `max:40`.
    Parameterized { params: Params },
}

// ============================================================================
// RULE
// ============================================================================

/// One executable rule from a rule-string.
#[derive(Debug, Clone)]
pub struct Rule {
    /// Rule name exactly as written in the rule-string (aliases are kept).
    name: String,
    kind: RuleKind,
    matcher: Matcher,
    passed: bool,
    message: Option<String>,
}

impl Rule {
    /// Create an explicit rule, binding its matcher from the registry.
    pub(crate) fn explicit(name: &str) -> ValidationResult<Self> {
        let matcher = matchers::explicit_matcher(name)
            .ok_or_else(|| ValidationError::unknown_rule(name))?;
        Ok(Self {
            name: name.to_string(),
            kind: RuleKind::Explicit,
            matcher,
            passed: false,
            message: None,
        })
    }

    /// Create a parameterized rule, binding its matcher from the registry.
    pub(crate) fn parameterized(name: &str, params: Params) -> ValidationResult<Self> {
        let matcher = matchers::parameterized_matcher(name)
            .ok_or_else(|| ValidationError::unknown_rule(name))?;
        Ok(Self {
            name: name.to_string(),
            kind: RuleKind::Parameterized { params },
            matcher,
            passed: false,
            message: None,
        })
    }

    /// Rule name as written in the rule-string.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Canonical rule name (aliases resolved).
    #[must_use]
    pub fn canonical_name(&self) -> &str {
        matchers::canonical(&self.name)
    }

    #[must_use]
    pub fn kind(&self) -> &RuleKind {
        &self.kind
    }

    /// Parameters in declaration order; empty for explicit rules.
    #[must_use]
    pub fn params(&self) -> &[String] {
        match &self.kind {
            RuleKind::Explicit => &[],
            RuleKind::Parameterized { params } => params,
        }
    }

    #[must_use]
    pub fn is_parameterized(&self) -> bool {
        matches!(self.kind, RuleKind::Parameterized { .. })
    }

    /// Whether the last evaluation passed. Defaults to `false` before any
    /// evaluation has run.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.passed
    }

    /// The resolved failure message, if message resolution has run.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub(crate) fn set_message(&mut self, message: String) {
        self.message = Some(message);
    }

    /// Replace the bound matcher. Only the same-field mechanism does this,
    /// for the duration of one evaluation pass.
    pub(crate) fn set_matcher(&mut self, matcher: Matcher) {
        self.matcher = matcher;
    }

    /// Run the matcher against a value, recording the outcome.
    pub(crate) fn evaluate(&mut self, value: Option<&str>) -> bool {
        self.passed = (self.matcher)(value, self.params());
        self.passed
    }

    /// Re-serialize this rule to its source token (`name` or `name:p1,p2`).
    #[must_use]
    pub fn token(&self) -> String {
        match &self.kind {
            RuleKind::Explicit => self.name.clone(),
            RuleKind::Parameterized { params } => {
                format!("{}:{}", self.name, params.join(","))
            }
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.token())
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use smallvec::smallvec;

    use super::*;

    #[test]
    fn test_explicit_construction() {
        let rule = Rule::explicit("required").unwrap();
        assert_eq!(rule.name(), "required");
        assert!(!rule.is_parameterized());
        assert!(rule.params().is_empty());
        assert!(!rule.passed());
        assert!(rule.message().is_none());
    }

    #[test]
    fn test_unknown_names_are_rejected() {
        assert_eq!(
            Rule::explicit("bogus").unwrap_err(),
            ValidationError::unknown_rule("bogus")
        );
        assert_eq!(
            Rule::parameterized("bogus", smallvec!["1".to_string()]).unwrap_err(),
            ValidationError::unknown_rule("bogus")
        );
        // An explicit name is not a parameterized one and vice versa.
        assert!(Rule::parameterized("required", smallvec!["x".to_string()]).is_err());
        assert!(Rule::explicit("max").is_err());
    }

    #[test]
    fn test_evaluate_records_outcome() {
        let mut rule = Rule::parameterized("max", smallvec!["3".to_string()]).unwrap();
        assert!(rule.evaluate(Some("ab")));
        assert!(rule.passed());
        assert!(!rule.evaluate(Some("abcd")));
        assert!(!rule.passed());
    }

    #[test]
    fn test_token_round_trip() {
        let rule = Rule::parameterized(
            "in",
            smallvec!["admin".to_string(), "user".to_string()],
        )
        .unwrap();
        assert_eq!(rule.token(), "in:admin,user");
        assert_eq!(Rule::explicit("email").unwrap().token(), "email");
        // Aliases keep their spelling.
        let rule = Rule::parameterized("gt", smallvec!["5".to_string()]).unwrap();
        assert_eq!(rule.token(), "gt:5");
        assert_eq!(rule.canonical_name(), "greaterThan");
    }

    #[test]
    fn test_matcher_override() {
        let mut rule = Rule::explicit("required").unwrap();
        assert!(!rule.evaluate(None));
        rule.set_matcher(crate::matchers::always_pass);
        assert!(rule.evaluate(None));
    }
}

//! A field under validation: one value, its ordered rules, and the
//! single-shot evaluation state machine.

use tracing::trace;

use crate::error::ValidationResult;
use crate::matchers;
use crate::parse;
use crate::rule::Rule;

// ============================================================================
// SAME-FIELD TARGET
// ============================================================================

/// Snapshot of the field a `same` rule points at.
///
/// The validator resolves this after every field exists and before the
/// referencing field evaluates. Holding the target's name and a copy of its
/// value (rather than a reference into the sibling list) keeps the link
/// read-only by construction.
#[derive(Debug, Clone)]
pub(crate) struct SameTarget {
    pub field: String,
    pub value: Option<String>,
}

// ============================================================================
// FIELD
// ============================================================================

/// One validation subject: a named value and the rules it must pass.
///
/// A field evaluates at most once; repeat calls return the cached verdict
/// without re-running any matcher.
#[derive(Debug, Clone)]
pub struct Field {
    name: String,
    value: Option<String>,
    rule_string: String,
    required: bool,
    rules: Vec<Rule>,
    /// Indices into `rules`, in declaration order.
    failed: Vec<usize>,
    same_target: Option<SameTarget>,
    passed_all: bool,
    evaluated: bool,
}

impl Field {
    /// Build a field by parsing its rule-string.
    pub(crate) fn new(
        name: impl Into<String>,
        value: Option<String>,
        rule_string: &str,
    ) -> ValidationResult<Self> {
        let parsed = parse::parse_rule_string(rule_string)?;
        Ok(Self {
            name: name.into(),
            value,
            rule_string: rule_string.to_string(),
            required: parsed.required,
            rules: parsed.rules,
            failed: Vec::new(),
            same_target: None,
            passed_all: false,
            evaluated: false,
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// The rule-string this field was declared with.
    #[must_use]
    pub fn rule_string(&self) -> &str {
        &self.rule_string
    }

    /// True iff an explicit `required` rule appears in the rule-string.
    #[must_use]
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// All rules, in the order they appeared in the rule-string.
    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// The first rule with the given name (as written), if declared.
    #[must_use]
    pub fn rule(&self, name: &str) -> Option<&Rule> {
        self.rules.iter().find(|rule| rule.name() == name)
    }

    #[must_use]
    pub fn has_rule(&self, name: &str) -> bool {
        self.rule(name).is_some()
    }

    /// Rules that failed the last evaluation, in declaration order.
    pub fn failed_rules(&self) -> impl Iterator<Item = &Rule> {
        self.failed.iter().map(|&idx| &self.rules[idx])
    }

    pub(crate) fn failed_rules_mut(&mut self) -> impl Iterator<Item = &mut Rule> {
        let failed = &self.failed;
        self.rules
            .iter_mut()
            .enumerate()
            .filter(move |(idx, _)| failed.contains(idx))
            .map(|(_, rule)| rule)
    }

    /// Whether the last evaluation passed every rule.
    #[must_use]
    pub fn passed_all(&self) -> bool {
        self.passed_all
    }

    #[must_use]
    pub fn is_evaluated(&self) -> bool {
        self.evaluated
    }

    pub(crate) fn set_same_target(&mut self, target: SameTarget) {
        self.same_target = Some(target);
    }

    // ========================================================================
    // EVALUATION
    // ========================================================================

    /// Evaluate every rule against the field's value.
    ///
    /// Runs at most once per field: a repeat call returns the verdict cached
    /// by the first call without re-running any matcher.
    pub(crate) fn evaluate(&mut self, stop_on_first_failure: bool) -> bool {
        if self.evaluated {
            return self.passed_all;
        }

        self.apply_same_override();

        // An optional field with nothing in it has nothing to check, unless
        // a same-field link forces the comparison.
        let skip_all = self.same_target.is_none()
            && !self.required
            && matchers::is_blank(self.value.as_deref());

        if !skip_all {
            for idx in 0..self.rules.len() {
                let rule = &mut self.rules[idx];
                if !rule.evaluate(self.value.as_deref()) {
                    trace!(field = %self.name, rule = %rule.name(), "rule failed");
                    self.failed.push(idx);
                    if stop_on_first_failure {
                        break;
                    }
                }
            }
        }

        self.passed_all = self.failed.is_empty();
        self.evaluated = true;
        self.passed_all
    }

    /// When a same-field link exists, the comparison against the target
    /// decides the whole field: every rule's matcher is replaced by a
    /// constant before any rule runs.
    fn apply_same_override(&mut self) {
        let Some(target) = &self.same_target else {
            return;
        };
        let is_same = self.value == target.value;
        trace!(field = %self.name, target = %target.field, is_same, "same-field link resolved");
        let matcher = if is_same {
            matchers::always_pass
        } else {
            matchers::always_fail
        };
        for rule in &mut self.rules {
            rule.set_matcher(matcher);
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

//! The validator: field registration, the two-level evaluation loop, and
//! message resolution.

use serde::Serialize;
use tracing::debug;

use crate::error::{ValidationError, ValidationResult};
use crate::field::{Field, SameTarget};
use crate::messages::{self, MessageOverrides};
use crate::rule::Rule;
use crate::source::ValidationSource;

// ============================================================================
// VALIDATOR
// ============================================================================

/// Validates a collection of named values against their rule-strings.
///
/// One validation run is construction, field registration, a single
/// `validate` call, and result reads: an exclusive, non-reentrant sequence
/// owned by one caller. Construct a fresh `Validator` per run.
///
/// # Examples
///
/// ```rust,ignore
/// use verdict::Validator;
///
/// let mut validator = Validator::new();
/// validator.add_field("email", Some("user@example.com"), "required|email")?;
/// validator.add_field("age", Some("30"), "required|numeric|between:18,99")?;
///
/// if !validator.validate(false)? {
///     for message in validator.error_messages() {
///         eprintln!("{message}");
///     }
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct Validator {
    fields: Vec<Field>,
    /// Indices into `fields`, in declaration order.
    failed: Vec<usize>,
    overrides: MessageOverrides,
}

impl Validator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a validator from a collaborator-supplied source of field
    /// triples and overrides.
    pub fn from_source(source: &impl ValidationSource) -> ValidationResult<Self> {
        let mut validator = Self::new();
        for spec in source.field_specs() {
            validator.add_field(&spec.name, spec.value.as_deref(), &spec.rules)?;
        }
        for o in source.message_overrides() {
            validator.add_message_override(&o.field, &o.rule, &o.template);
        }
        Ok(validator)
    }

    /// Register one field. The rule-string is parsed eagerly: a malformed
    /// string leaves the validator unchanged.
    pub fn add_field(
        &mut self,
        name: &str,
        value: Option<&str>,
        rules: &str,
    ) -> ValidationResult<()> {
        if name.trim().is_empty() || rules.trim().is_empty() {
            return Err(ValidationError::bad_argument(
                "field name and rules can not be blank",
            ));
        }
        self.fields
            .push(Field::new(name, value.map(String::from), rules)?);
        Ok(())
    }

    /// Register a custom message template for `(field, rule)`. Registering
    /// the same pair twice replaces the template.
    pub fn add_message_override(&mut self, field: &str, rule: &str, template: &str) {
        self.overrides.insert(field, rule, template);
    }

    // ========================================================================
    // EVALUATION
    // ========================================================================

    /// Validate every registered field, in declaration order.
    ///
    /// With `stop_on_first_failure`, each field stops at its first failed
    /// rule and the pass stops at its first failed field. Returns `Ok(true)`
    /// iff no field failed.
    pub fn validate(&mut self, stop_on_first_failure: bool) -> ValidationResult<bool> {
        self.run(stop_on_first_failure, None)
    }

    /// Validate only the named fields. Fields outside the subset are left
    /// entirely unevaluated and appear in no result collection, but a `same`
    /// rule may still reference them.
    pub fn validate_only(
        &mut self,
        names: &[&str],
        stop_on_first_failure: bool,
    ) -> ValidationResult<bool> {
        self.run(stop_on_first_failure, Some(names))
    }

    fn run(
        &mut self,
        stop_on_first_failure: bool,
        subset: Option<&[&str]>,
    ) -> ValidationResult<bool> {
        debug!(fields = self.fields.len(), "starting validation pass");
        self.failed.clear();

        for idx in 0..self.fields.len() {
            if let Some(names) = subset {
                if !names.contains(&self.fields[idx].name()) {
                    continue;
                }
            }
            self.resolve_same_target(idx)?;
            if !self.fields[idx].evaluate(stop_on_first_failure) {
                self.failed.push(idx);
                if stop_on_first_failure {
                    break;
                }
            }
        }

        self.resolve_messages();
        debug!(failed = self.failed.len(), "validation pass finished");
        Ok(self.failed.is_empty())
    }

    /// Wire the same-field link before a field evaluates. The target is
    /// looked up among all registered fields, not just a validation subset.
    fn resolve_same_target(&mut self, idx: usize) -> ValidationResult<()> {
        let Some(rule) = self.fields[idx].rule("same") else {
            return Ok(());
        };
        let Some(target_name) = rule.params().first().filter(|p| !p.is_empty()).cloned() else {
            return Err(ValidationError::missing_parameters("same"));
        };

        let field_name = self.fields[idx].name().to_string();
        let target = self
            .fields
            .iter()
            .find(|f| f.name() == target_name)
            .ok_or_else(|| ValidationError::unknown_field_reference(&field_name, &target_name))?;

        let snapshot = SameTarget {
            field: target.name().to_string(),
            value: target.value().map(String::from),
        };
        self.fields[idx].set_same_target(snapshot);
        Ok(())
    }

    // ========================================================================
    // MESSAGE RESOLUTION
    // ========================================================================

    /// Resolve a final message for every failed rule of every failed field:
    /// caller override first, then an already-present message, then the
    /// default catalog template.
    fn resolve_messages(&mut self) {
        let Self {
            fields,
            failed,
            overrides,
        } = self;

        for &fidx in failed.iter() {
            let field_name = fields[fidx].name().to_string();
            for rule in fields[fidx].failed_rules_mut() {
                if let Some(custom) = overrides.get(&field_name, rule.name()) {
                    rule.set_message(custom.to_string());
                } else if rule.message().is_none_or(|m| m.trim().is_empty()) {
                    if let Some(message) = default_message(&field_name, rule) {
                        rule.set_message(message);
                    }
                }
            }
        }
    }

    // ========================================================================
    // RESULTS
    // ========================================================================

    /// All registered fields, in declaration order.
    #[must_use]
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Fields that failed the last pass, in declaration order.
    #[must_use]
    pub fn failed_fields(&self) -> Vec<&Field> {
        self.failed.iter().map(|&idx| &self.fields[idx]).collect()
    }

    /// Names of the failed fields, in declaration order.
    #[must_use]
    pub fn failed_field_names(&self) -> Vec<&str> {
        self.failed
            .iter()
            .map(|&idx| self.fields[idx].name())
            .collect()
    }

    /// Every resolved failure message, flattened in declaration order.
    #[must_use]
    pub fn error_messages(&self) -> Vec<String> {
        self.failed_fields()
            .into_iter()
            .flat_map(Field::failed_rules)
            .filter_map(|rule| rule.message().map(String::from))
            .collect()
    }

    /// Resolved failure messages for one named field.
    #[must_use]
    pub fn error_messages_for(&self, field: &str) -> Vec<String> {
        self.failed_fields()
            .into_iter()
            .filter(|f| f.name() == field)
            .flat_map(Field::failed_rules)
            .filter_map(|rule| rule.message().map(String::from))
            .collect()
    }

    /// All failure messages joined with newlines.
    #[must_use]
    pub fn error_messages_string(&self) -> String {
        self.error_messages().join("\n")
    }

    /// Structured summary of the last pass.
    #[must_use]
    pub fn report(&self) -> ValidationReport {
        ValidationReport {
            passed: self.failed.is_empty(),
            failures: self
                .failed_fields()
                .into_iter()
                .map(|field| FieldFailures {
                    field: field.name().to_string(),
                    errors: field
                        .failed_rules()
                        .map(|rule| RuleFailure {
                            rule: rule.name().to_string(),
                            message: rule.message().unwrap_or_default().to_string(),
                        })
                        .collect(),
                })
                .collect(),
        }
    }
}

fn default_message(field: &str, rule: &Rule) -> Option<String> {
    if rule.is_parameterized() {
        let template = messages::parameterized_template(rule.canonical_name())?;
        let params = rule.params();
        let mut args: Vec<&str> = Vec::with_capacity(params.len() + 1);
        args.push(field);
        let joined;
        if params.len() > 2 {
            joined = format!("[{}]", params.join(", "));
            args.push(&joined);
        } else {
            args.extend(params.iter().map(String::as_str));
        }
        Some(messages::render(template, &args))
    } else {
        let template = messages::explicit_template(rule.canonical_name())?;
        Some(messages::render(template, &[field]))
    }
}

// ============================================================================
// REPORT TYPES
// ============================================================================

/// Serializable summary of one validation pass.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    pub passed: bool,
    pub failures: Vec<FieldFailures>,
}

/// The failed rules of one field.
#[derive(Debug, Clone, Serialize)]
pub struct FieldFailures {
    pub field: String,
    pub errors: Vec<RuleFailure>,
}

/// One failed rule with its resolved message.
#[derive(Debug, Clone, Serialize)]
pub struct RuleFailure {
    pub rule: String,
    pub message: String,
}

impl ValidationReport {
    /// Convert the report to a JSON value.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

// ============================================================================
// TESTS
// ============================================================================

//! # verdict
//!
//! A declarative rule-string validation engine.
//!
//! Fields are named values paired with a compact rule grammar
//! (`"required|max:40|same:confirmation"`). The engine parses each
//! rule-string into executable rules, evaluates them, and reports failed
//! fields with human-readable, overridable messages.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use verdict::Validator;
//!
//! let mut validator = Validator::new();
//! validator.add_field("email", Some("user@example.com"), "required|email")?;
//! validator.add_field("password", Some("hunter2"), "required|lengthMin:6")?;
//! validator.add_field("confirm", Some("hunter2"), "same:password")?;
//!
//! assert!(validator.validate(false)?);
//! ```
//!
//! ## Rule grammar
//!
//! Rules are `|`-separated; a `:` separates a rule name from its
//! comma-separated parameters. Explicit rules (`required`, `email`,
//! `alpha`, ...) take no parameters; parameterized rules (`max:40`,
//! `between:18,99`, `in:admin,user`, ...) take one or more. Fields are
//! optional by default: a blank value skips every rule unless `required`
//! is declared or a `same:` link forces the comparison.
//!
//! ## Messages
//!
//! Every failed rule resolves a message: a caller override for
//! `(field, rule)` wins verbatim, otherwise the built-in template for the
//! rule is filled positionally with the field name and parameters.

mod error;
mod field;
mod matchers;
mod messages;
mod parse;
mod rule;
mod source;
mod validator;

pub mod prelude;

pub use error::{ValidationError, ValidationResult};
pub use field::Field;
pub use matchers::{Arity, Matcher, arity, canonical};
pub use rule::{Rule, RuleKind};
pub use source::{FieldSpec, MessageOverride, ValidationSource};
pub use validator::{FieldFailures, RuleFailure, ValidationReport, Validator};

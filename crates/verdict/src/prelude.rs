//! Prelude module for convenient imports.
//!
//! ```rust,ignore
//! use verdict::prelude::*;
//!
//! let mut validator = Validator::new();
//! validator.add_field("age", Some("30"), "required|numeric")?;
//! ```

pub use crate::error::{ValidationError, ValidationResult};
pub use crate::field::Field;
pub use crate::rule::{Rule, RuleKind};
pub use crate::source::{FieldSpec, MessageOverride, ValidationSource};
pub use crate::validator::{ValidationReport, Validator};

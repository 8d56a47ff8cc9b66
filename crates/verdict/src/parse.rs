//! The rule-string grammar parser.
//!
//! Grammar:
//!
//! ```text
//! ruleString := rule ("|" rule)*
//! rule       := ruleName (":" paramList)?
//! paramList  := param ("," param)*
//! ```
//!
//! A token is split on its *first* colon only, so parameters may themselves
//! contain colons (`format:%H:%M`). Rule names are validated against the
//! matcher registry at parse time; evaluation can therefore assume every
//! rule is well-formed.

use crate::error::{ValidationError, ValidationResult};
use crate::matchers;
use crate::rule::{Params, Rule};

/// Output of parsing one rule-string: the ordered rules, and whether an
/// explicit `required` rule appeared anywhere in the string.
#[derive(Debug)]
pub(crate) struct ParsedRules {
    pub rules: Vec<Rule>,
    pub required: bool,
}

/// Parse a rule-string into its ordered rule sequence.
pub(crate) fn parse_rule_string(input: &str) -> ValidationResult<ParsedRules> {
    let mut rules = Vec::new();
    let mut required = false;

    for token in input.split('|') {
        match token.split_once(':') {
            Some((name, raw_params)) => {
                if !matchers::is_parameterized_rule(name) {
                    return Err(ValidationError::unknown_rule(name));
                }
                if raw_params.is_empty() {
                    return Err(ValidationError::missing_parameters(name));
                }
                let params: Params = raw_params.split(',').map(String::from).collect();
                rules.push(Rule::parameterized(name, params)?);
            }
            None => {
                if matchers::is_explicit_rule(token) {
                    if token == "required" {
                        required = true;
                    }
                    rules.push(Rule::explicit(token)?);
                } else if matchers::is_parameterized_rule(token) {
                    // A known parameterized rule written without its
                    // parameter section.
                    return Err(ValidationError::missing_parameters(token));
                } else {
                    return Err(ValidationError::unknown_rule(token));
                }
            }
        }
    }

    Ok(ParsedRules { rules, required })
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_single_explicit_rule() {
        let parsed = parse_rule_string("email").unwrap();
        assert_eq!(parsed.rules.len(), 1);
        assert_eq!(parsed.rules[0].name(), "email");
        assert!(!parsed.required);
    }

    #[test]
    fn test_required_flag() {
        assert!(parse_rule_string("required|email").unwrap().required);
        assert!(parse_rule_string("email|required").unwrap().required);
        assert!(!parse_rule_string("email|notEmpty").unwrap().required);
    }

    #[test]
    fn test_parameterized_rules() {
        let parsed = parse_rule_string("required|max:40|in:admin,user").unwrap();
        let tokens: Vec<String> = parsed.rules.iter().map(Rule::token).collect();
        assert_eq!(tokens, vec!["required", "max:40", "in:admin,user"]);
        assert_eq!(parsed.rules[2].params(), ["admin", "user"]);
    }

    #[test]
    fn test_order_is_preserved() {
        let input = "notEmpty|min:2|max:10|alphaDash";
        let parsed = parse_rule_string(input).unwrap();
        let rebuilt: Vec<String> = parsed.rules.iter().map(Rule::token).collect();
        assert_eq!(rebuilt.join("|"), input);
    }

    #[test]
    fn test_unknown_rule() {
        assert_eq!(
            parse_rule_string("bogus").unwrap_err(),
            ValidationError::unknown_rule("bogus")
        );
        assert_eq!(
            parse_rule_string("required|bogus:1").unwrap_err(),
            ValidationError::unknown_rule("bogus")
        );
    }

    #[test]
    fn test_missing_parameters() {
        // Bare colon with nothing after it.
        assert_eq!(
            parse_rule_string("max:").unwrap_err(),
            ValidationError::missing_parameters("max")
        );
        // A parameterized rule written without any colon at all.
        assert_eq!(
            parse_rule_string("max").unwrap_err(),
            ValidationError::missing_parameters("max")
        );
    }

    #[test]
    fn test_explicit_rule_with_params_is_unknown() {
        // `required:x`: required takes no parameters, so as a
        // parameterized token the name is unknown.
        assert_eq!(
            parse_rule_string("required:x").unwrap_err(),
            ValidationError::unknown_rule("required")
        );
    }

    #[test]
    fn test_params_may_contain_colons() {
        let parsed = parse_rule_string("dateFormat:%H:%M").unwrap();
        assert_eq!(parsed.rules[0].params(), ["%H:%M"]);
        assert_eq!(parsed.rules[0].token(), "dateFormat:%H:%M");
    }

    #[test]
    fn test_aliases_parse() {
        let parsed = parse_rule_string("gt:5|lte:10|format:%Y").unwrap();
        assert_eq!(parsed.rules.len(), 3);
        assert_eq!(parsed.rules[0].canonical_name(), "greaterThan");
        // Round-trip keeps the alias spelling.
        assert_eq!(parsed.rules[0].token(), "gt:5");
    }

    #[test]
    fn test_empty_token_is_unknown() {
        assert_eq!(
            parse_rule_string("email||max:3").unwrap_err(),
            ValidationError::unknown_rule("")
        );
    }
}

//! Rule library
//!
//! The fixed catalog of form-field rules. Each rule is a pure function of
//! the (already trimmed) value, its optional parameter and the field label,
//! returning `None` when the value is acceptable or a human-readable message
//! when it is not.
//!
//! Every rule except [`Rule::Required`] treats an empty value as valid.
//! Emptiness is only `required`'s concern, so an empty optional field never
//! reports twice.

use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;
use thiserror::Error;

static NUMERIC_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]+$").unwrap());
static ALPHA_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[a-zA-Z\s]+$").unwrap());
static ALPHANUMERIC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9]+$").unwrap());
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());
static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]{10}$").unwrap());
static AADHAR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]{12}$").unwrap());
static ACCOUNT_NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{1,20}$").unwrap());
static CUSTOMER_ID_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^CUST[0-9]{3,}$").unwrap());
static FLOAT_PREFIX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:Infinity|(?:[0-9]+\.?[0-9]*|\.[0-9]+)(?:[eE][+-]?[0-9]+)?)").unwrap()
});

/// Something that can judge a single field value
///
/// [`Rule`] is the only production implementation. The trait exists so the
/// field validator can be exercised with instrumented rules in tests.
pub trait FieldRule {
    /// Canonical rule name, used in logs
    fn name(&self) -> &'static str;

    /// Returns `None` if `value` passes, or the failure message
    fn check(&self, value: &str, label: &str) -> Option<String>;
}

/// A bound validation rule
///
/// Parameterized variants carry their bound value (e.g. `MinLength(8)`),
/// so a `Vec<Rule>` is a complete, ordered rule list for a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    /// Value must be non-empty after trimming
    Required,
    /// At least `n` characters
    MinLength(usize),
    /// At most `n` characters
    MaxLength(usize),
    /// Exactly `n` characters
    ExactLength(usize),
    /// ASCII digits only
    Numeric,
    /// Letters and whitespace only
    Alpha,
    /// ASCII letters and digits only
    Alphanumeric,
    Email,
    /// Ten-digit phone number
    Phone,
    /// Twelve-digit Aadhar (national ID) number
    Aadhar,
    /// Parses as a number greater than zero; fractions are accepted
    PositiveNumber,
    /// One to twenty digits
    AccountNumber,
    /// `CUST` followed by at least three digits, case-insensitive
    CustomerId,
}

impl Rule {
    /// Every rule name accepted by [`Rule::from_str`], in catalog order
    pub const NAMES: [&'static str; 13] = [
        "required",
        "minLength",
        "maxLength",
        "exactLength",
        "numeric",
        "alpha",
        "alphanumeric",
        "email",
        "phone",
        "aadhar",
        "positiveNumber",
        "accountNumber",
        "customerId",
    ];

    /// Returns the canonical camelCase name of the rule
    pub fn name(&self) -> &'static str {
        match self {
            Rule::Required => "required",
            Rule::MinLength(_) => "minLength",
            Rule::MaxLength(_) => "maxLength",
            Rule::ExactLength(_) => "exactLength",
            Rule::Numeric => "numeric",
            Rule::Alpha => "alpha",
            Rule::Alphanumeric => "alphanumeric",
            Rule::Email => "email",
            Rule::Phone => "phone",
            Rule::Aadhar => "aadhar",
            Rule::PositiveNumber => "positiveNumber",
            Rule::AccountNumber => "accountNumber",
            Rule::CustomerId => "customerId",
        }
    }

    /// The bound parameter, for the length rules
    pub fn parameter(&self) -> Option<usize> {
        match self {
            Rule::MinLength(n) | Rule::MaxLength(n) | Rule::ExactLength(n) => Some(*n),
            _ => None,
        }
    }

    /// Evaluates the rule against `value`
    ///
    /// # Arguments
    /// - `value` - The field value; callers normally trim it first
    /// - `label` - Human-readable field label embedded in the message
    ///
    /// # Returns
    /// `None` if the value is acceptable, otherwise the failure message
    pub fn check(&self, value: &str, label: &str) -> Option<String> {
        match *self {
            Rule::Required => required(value, label),
            Rule::MinLength(n) => min_length(value, n, label),
            Rule::MaxLength(n) => max_length(value, n, label),
            Rule::ExactLength(n) => exact_length(value, n, label),
            Rule::Numeric => numeric(value, label),
            Rule::Alpha => alpha(value, label),
            Rule::Alphanumeric => alphanumeric(value, label),
            Rule::Email => email(value, label),
            Rule::Phone => phone(value),
            Rule::Aadhar => aadhar(value),
            Rule::PositiveNumber => positive_number(value, label),
            Rule::AccountNumber => account_number(value),
            Rule::CustomerId => customer_id(value),
        }
    }
}

impl FieldRule for Rule {
    fn name(&self) -> &'static str {
        Rule::name(self)
    }

    fn check(&self, value: &str, label: &str) -> Option<String> {
        Rule::check(self, value, label)
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.parameter() {
            Some(n) => write!(f, "{}:{}", self.name(), n),
            None => f.write_str(self.name()),
        }
    }
}

/// Error raised when a textual rule declaration cannot be parsed
///
/// This is a configuration fault in the form definition, not a failed
/// field check.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleParseError {
    #[error("unknown validation rule '{0}'")]
    UnknownRule(String),

    #[error("rule '{0}' requires a length parameter (e.g. {0}:8)")]
    MissingParameter(&'static str),

    #[error("rule '{rule}' has an invalid parameter '{value}'")]
    InvalidParameter { rule: &'static str, value: String },

    #[error("rule '{0}' does not take a parameter")]
    UnexpectedParameter(&'static str),
}

impl FromStr for Rule {
    type Err = RuleParseError;

    /// Parses `name` or `name:param`
    ///
    /// Names are matched case-insensitively and `-`/`_` separators are
    /// ignored, so `minLength:8`, `min-length:8` and `MIN_LENGTH:8` agree.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (raw_name, raw_param) = match s.split_once(':') {
            Some((name, param)) => (name.trim(), Some(param.trim())),
            None => (s.trim(), None),
        };

        let key: String = raw_name
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .map(|c| c.to_ascii_lowercase())
            .collect();

        let simple = match key.as_str() {
            "required" => Some(Rule::Required),
            "numeric" => Some(Rule::Numeric),
            "alpha" => Some(Rule::Alpha),
            "alphanumeric" => Some(Rule::Alphanumeric),
            "email" => Some(Rule::Email),
            "phone" => Some(Rule::Phone),
            "aadhar" => Some(Rule::Aadhar),
            "positivenumber" => Some(Rule::PositiveNumber),
            "accountnumber" => Some(Rule::AccountNumber),
            "customerid" => Some(Rule::CustomerId),
            _ => None,
        };

        if let Some(rule) = simple {
            if raw_param.is_some() {
                return Err(RuleParseError::UnexpectedParameter(rule.name()));
            }
            return Ok(rule);
        }

        let build: fn(usize) -> Rule = match key.as_str() {
            "minlength" => Rule::MinLength,
            "maxlength" => Rule::MaxLength,
            "exactlength" => Rule::ExactLength,
            _ => return Err(RuleParseError::UnknownRule(raw_name.to_string())),
        };
        let rule_name = build(0).name();

        let param = raw_param
            .filter(|p| !p.is_empty())
            .ok_or(RuleParseError::MissingParameter(rule_name))?;
        let n = param
            .parse::<usize>()
            .map_err(|_| RuleParseError::InvalidParameter {
                rule: rule_name,
                value: param.to_string(),
            })?;

        Ok(build(n))
    }
}

/// Parses a comma-separated rule declaration such as `"required,minLength:8"`
///
/// Empty segments are skipped, so a trailing comma is harmless.
///
/// # Errors
/// Returns the first [`RuleParseError`] encountered.
pub fn parse_rules(declaration: &str) -> Result<Vec<Rule>, RuleParseError> {
    declaration
        .split(',')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(str::parse)
        .collect()
}

fn char_len(value: &str) -> usize {
    value.chars().count()
}

/// `"{label} is required"` when the value is blank
pub fn required(value: &str, label: &str) -> Option<String> {
    if value.trim().is_empty() {
        return Some(format!("{} is required", label));
    }
    None
}

pub fn min_length(value: &str, min: usize, label: &str) -> Option<String> {
    if !value.is_empty() && char_len(value) < min {
        return Some(format!("{} must be at least {} characters", label, min));
    }
    None
}

pub fn max_length(value: &str, max: usize, label: &str) -> Option<String> {
    if !value.is_empty() && char_len(value) > max {
        return Some(format!("{} must not exceed {} characters", label, max));
    }
    None
}

pub fn exact_length(value: &str, length: usize, label: &str) -> Option<String> {
    if !value.is_empty() && char_len(value) != length {
        return Some(format!("{} must be exactly {} characters", label, length));
    }
    None
}

pub fn numeric(value: &str, label: &str) -> Option<String> {
    if !value.is_empty() && !NUMERIC_RE.is_match(value) {
        return Some(format!("{} must contain only numbers", label));
    }
    None
}

pub fn alpha(value: &str, label: &str) -> Option<String> {
    if !value.is_empty() && !ALPHA_RE.is_match(value) {
        return Some(format!("{} must contain only letters and spaces", label));
    }
    None
}

pub fn alphanumeric(value: &str, label: &str) -> Option<String> {
    if !value.is_empty() && !ALPHANUMERIC_RE.is_match(value) {
        return Some(format!("{} must contain only letters and numbers", label));
    }
    None
}

pub fn email(value: &str, label: &str) -> Option<String> {
    if !value.is_empty() && !EMAIL_RE.is_match(value) {
        return Some(format!("Please enter a valid {}", label));
    }
    None
}

/// Phone numbers carry a fixed message; the label is not used
pub fn phone(value: &str) -> Option<String> {
    if !value.is_empty() && !PHONE_RE.is_match(value) {
        return Some("Phone number must be exactly 10 digits".to_string());
    }
    None
}

pub fn aadhar(value: &str) -> Option<String> {
    if !value.is_empty() && !AADHAR_RE.is_match(value) {
        return Some("Aadhar number must be exactly 12 digits".to_string());
    }
    None
}

/// Accepts any number greater than zero, including fractional amounts
///
/// Input is read the lenient way browsers parse floats: leading whitespace
/// is skipped and the longest numeric prefix is used, so `"12.50 INR"`
/// passes. Text with no numeric prefix fails with the standard message.
pub fn positive_number(value: &str, label: &str) -> Option<String> {
    if value.is_empty() {
        return None;
    }
    match parse_float_prefix(value) {
        Some(n) if n > 0.0 => None,
        _ => Some(format!("{} must be a positive number", label)),
    }
}

pub fn account_number(value: &str) -> Option<String> {
    if !value.is_empty() && !ACCOUNT_NUMBER_RE.is_match(value) {
        return Some("Please enter a valid account number".to_string());
    }
    None
}

/// Matches `CUST` plus three or more digits after uppercasing, so `cust007` passes
pub fn customer_id(value: &str) -> Option<String> {
    if !value.is_empty() && !CUSTOMER_ID_RE.is_match(&value.to_uppercase()) {
        return Some(
            "Customer ID must be in format CUST followed by numbers (e.g., CUST001)".to_string(),
        );
    }
    None
}

/// Reads the longest leading float literal of `value`
///
/// Returns `None` when there is no numeric prefix at all.
pub(crate) fn parse_float_prefix(value: &str) -> Option<f64> {
    let trimmed = value.trim_start();
    let literal = FLOAT_PREFIX_RE.find(trimmed)?.as_str();

    match literal.trim_start_matches(['+', '-']) {
        "Infinity" if literal.starts_with('-') => Some(f64::NEG_INFINITY),
        "Infinity" => Some(f64::INFINITY),
        _ => literal.parse::<f64>().ok(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_reports_blank_values() {
        assert_eq!(required("", "Name"), Some("Name is required".to_string()));
        assert_eq!(required("   ", "Name"), Some("Name is required".to_string()));
        assert_eq!(required("x", "Name"), None);
    }

    #[test]
    fn test_min_length() {
        assert_eq!(
            min_length("ab", 3, "PIN"),
            Some("PIN must be at least 3 characters".to_string())
        );
        assert_eq!(min_length("abc", 3, "PIN"), None);
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        assert_eq!(exact_length("₹₹₹", 3, "Code"), None);
        assert_eq!(max_length("éé", 2, "Code"), None);
    }

    #[test]
    fn test_max_and_exact_length_messages() {
        assert_eq!(
            max_length("abcdef", 5, "Name"),
            Some("Name must not exceed 5 characters".to_string())
        );
        assert_eq!(
            exact_length("1234", 6, "OTP"),
            Some("OTP must be exactly 6 characters".to_string())
        );
    }

    #[test]
    fn test_numeric_rejects_non_ascii_digits() {
        assert_eq!(numeric("0123", "Amount"), None);
        assert!(numeric("١٢٣", "Amount").is_some());
        assert_eq!(
            numeric("12a", "Amount"),
            Some("Amount must contain only numbers".to_string())
        );
    }

    #[test]
    fn test_alpha_and_alphanumeric() {
        assert_eq!(alpha("Ravi Kumar", "Name"), None);
        assert_eq!(
            alpha("Ravi2", "Name"),
            Some("Name must contain only letters and spaces".to_string())
        );
        assert_eq!(alphanumeric("IFSC0001", "Code"), None);
        assert_eq!(
            alphanumeric("IFSC 0001", "Code"),
            Some("Code must contain only letters and numbers".to_string())
        );
    }

    #[test]
    fn test_email() {
        assert_eq!(email("a.b@bank.in", "email address"), None);
        assert_eq!(
            email("a.b@bank", "email address"),
            Some("Please enter a valid email address".to_string())
        );
        assert!(email("a b@bank.in", "Email").is_some());
    }

    #[test]
    fn test_phone_and_aadhar_fixed_messages() {
        assert_eq!(phone("1234567890"), None);
        assert_eq!(
            phone("123"),
            Some("Phone number must be exactly 10 digits".to_string())
        );
        assert_eq!(aadhar("123456789012"), None);
        assert_eq!(
            aadhar("12345678901"),
            Some("Aadhar number must be exactly 12 digits".to_string())
        );
    }

    #[test]
    fn test_positive_number_accepts_fractions() {
        assert_eq!(positive_number("0.01", "Amount"), None);
        assert_eq!(positive_number("2500", "Amount"), None);
        assert_eq!(positive_number("12.50 INR", "Amount"), None);
    }

    #[test]
    fn test_positive_number_rejects_zero_negative_and_text() {
        let msg = Some("Amount must be a positive number".to_string());
        assert_eq!(positive_number("0", "Amount"), msg);
        assert_eq!(positive_number("-5", "Amount"), msg);
        assert_eq!(positive_number("abc", "Amount"), msg);
        assert_eq!(positive_number("NaN", "Amount"), msg);
    }

    #[test]
    fn test_parse_float_prefix() {
        assert_eq!(parse_float_prefix("  3.5e2xyz"), Some(350.0));
        assert_eq!(parse_float_prefix(".5"), Some(0.5));
        assert_eq!(parse_float_prefix("7."), Some(7.0));
        assert_eq!(parse_float_prefix("-Infinity"), Some(f64::NEG_INFINITY));
        assert_eq!(parse_float_prefix("e5"), None);
        assert_eq!(parse_float_prefix(""), None);
    }

    #[test]
    fn test_account_number() {
        assert_eq!(account_number("1"), None);
        assert_eq!(account_number("12345678901234567890"), None);
        assert!(account_number("123456789012345678901").is_some());
        assert!(account_number("12-34").is_some());
    }

    #[test]
    fn test_customer_id_is_case_insensitive() {
        assert_eq!(customer_id("cust007"), None);
        assert_eq!(customer_id("CUST001"), None);
        assert_eq!(
            customer_id("CUSTOMER7"),
            Some(
                "Customer ID must be in format CUST followed by numbers (e.g., CUST001)"
                    .to_string()
            )
        );
        assert!(customer_id("CUST01").is_some());
    }

    #[test]
    fn test_non_required_rules_pass_empty_value() {
        let rules = [
            Rule::MinLength(3),
            Rule::MaxLength(3),
            Rule::ExactLength(3),
            Rule::Numeric,
            Rule::Alpha,
            Rule::Alphanumeric,
            Rule::Email,
            Rule::Phone,
            Rule::Aadhar,
            Rule::PositiveNumber,
            Rule::AccountNumber,
            Rule::CustomerId,
        ];
        for rule in rules {
            assert_eq!(rule.check("", "Field"), None, "{} failed on empty", rule);
        }
        assert!(Rule::Required.check("", "Field").is_some());
    }

    #[test]
    fn test_parse_rule_names_and_parameters() {
        assert_eq!("required".parse::<Rule>(), Ok(Rule::Required));
        assert_eq!("minLength:8".parse::<Rule>(), Ok(Rule::MinLength(8)));
        assert_eq!("max-length: 20".parse::<Rule>(), Ok(Rule::MaxLength(20)));
        assert_eq!("CUSTOMER_ID".parse::<Rule>(), Ok(Rule::CustomerId));
    }

    #[test]
    fn test_parse_rule_errors() {
        assert_eq!(
            "minLength".parse::<Rule>(),
            Err(RuleParseError::MissingParameter("minLength"))
        );
        assert_eq!(
            "exactLength:x".parse::<Rule>(),
            Err(RuleParseError::InvalidParameter {
                rule: "exactLength",
                value: "x".to_string()
            })
        );
        assert_eq!(
            "numeric:3".parse::<Rule>(),
            Err(RuleParseError::UnexpectedParameter("numeric"))
        );
        assert_eq!(
            "bogus".parse::<Rule>(),
            Err(RuleParseError::UnknownRule("bogus".to_string()))
        );
    }

    #[test]
    fn test_parse_rules_list() {
        assert_eq!(
            parse_rules("required, minLength:8,").unwrap(),
            vec![Rule::Required, Rule::MinLength(8)]
        );
        assert_eq!(parse_rules("").unwrap(), Vec::<Rule>::new());
    }

    #[test]
    fn test_display_round_trips_through_from_str() {
        for name in Rule::NAMES {
            let text = match name {
                "minLength" | "maxLength" | "exactLength" => format!("{}:4", name),
                _ => name.to_string(),
            };
            let rule: Rule = text.parse().unwrap();
            assert_eq!(rule.to_string(), text);
        }
    }
}

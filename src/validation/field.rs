//! Field validator
//!
//! Applies an ordered rule list to one field value. Evaluation stops at the
//! first failing rule and only that rule's message is surfaced.

use super::rules::{parse_rules, FieldRule, Rule, RuleParseError};
use serde::Serialize;

/// Label used when a field has neither a data label nor a placeholder
pub const DEFAULT_LABEL: &str = "Field";

/// Outcome of validating one field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub message: Option<String>,
}

impl ValidationResult {
    pub fn ok() -> Self {
        Self {
            valid: true,
            message: None,
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            message: Some(message.into()),
        }
    }
}

/// Presentation-side sink for field feedback
///
/// Implemented by whatever owns the input widget. The validator only
/// decides; the sink marks the widget and shows or hides the message.
pub trait FieldFeedback {
    /// Marks the field invalid and displays `message`
    fn mark_invalid(&mut self, message: &str);

    /// Marks the field valid and hides any previous message
    fn mark_valid(&mut self);

    /// Resets the field to its neutral state
    fn clear(&mut self);
}

/// Validates `raw` against `rules`, in order
///
/// The value is trimmed once before any rule sees it. An empty rule list
/// is vacuously valid.
///
/// # Arguments
/// - `raw` - The field's current text, untrimmed
/// - `label` - Human-readable field label used in messages
/// - `rules` - Ordered, already-bound rules
///
/// # Returns
/// A [`ValidationResult`] carrying the first failure message, if any
pub fn validate<R: FieldRule>(raw: &str, label: &str, rules: &[R]) -> ValidationResult {
    let value = raw.trim();

    for rule in rules {
        if let Some(message) = rule.check(value, label) {
            tracing::debug!(label, rule = rule.name(), %message, "field failed validation");
            return ValidationResult::invalid(message);
        }
    }

    ValidationResult::ok()
}

/// Validates and pushes the outcome to `feedback`
///
/// Calls `mark_invalid` with the first failure message, or `mark_valid`
/// when every rule passes. Returns whether the field is valid.
pub fn validate_field_with<R: FieldRule>(
    feedback: &mut dyn FieldFeedback,
    raw: &str,
    label: &str,
    rules: &[R],
) -> bool {
    let result = validate(raw, label, rules);
    match &result.message {
        Some(message) => feedback.mark_invalid(message),
        None => feedback.mark_valid(),
    }
    result.valid
}

/// Picks the label shown in messages for an input
///
/// Prefers the explicit data label, then the placeholder, then
/// [`DEFAULT_LABEL`]. Blank strings count as missing.
pub fn resolve_label<'a>(data_label: Option<&'a str>, placeholder: Option<&'a str>) -> &'a str {
    data_label
        .filter(|s| !s.is_empty())
        .or(placeholder.filter(|s| !s.is_empty()))
        .unwrap_or(DEFAULT_LABEL)
}

/// A named form field with its rule list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub label: String,
    pub rules: Vec<Rule>,
}

impl Field {
    pub fn new(name: impl Into<String>, label: impl Into<String>, rules: Vec<Rule>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            rules,
        }
    }

    /// Builds a field from a textual rule declaration such as `"required,numeric"`
    ///
    /// # Errors
    /// Returns a [`RuleParseError`] if the declaration names an unknown rule
    /// or a length rule lacks a valid parameter.
    pub fn parse(
        name: impl Into<String>,
        label: impl Into<String>,
        rules: &str,
    ) -> Result<Self, RuleParseError> {
        Ok(Self::new(name, label, parse_rules(rules)?))
    }

    pub fn validate(&self, raw: &str) -> ValidationResult {
        validate(raw, &self.label, &self.rules)
    }
}

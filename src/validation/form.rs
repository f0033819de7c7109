//! Form-level validation
//!
//! Runs the field validator over every field of a form. Unlike a single
//! field, a form does not stop at the first failure: every field is
//! evaluated so each one can show its own feedback.

use super::field::{Field, FieldFeedback, ValidationResult};
use super::rules::{Rule, RuleParseError};
use std::collections::HashMap;

/// An ordered set of fields validated together
#[derive(Debug, Clone, Default)]
pub struct FormValidator {
    fields: Vec<Field>,
}

impl FormValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a field with pre-bound rules
    pub fn field(
        mut self,
        name: impl Into<String>,
        label: impl Into<String>,
        rules: Vec<Rule>,
    ) -> Self {
        self.fields.push(Field::new(name, label, rules));
        self
    }

    /// Adds a field from a declaration such as `"required,minLength:8"`
    ///
    /// # Errors
    /// Returns a [`RuleParseError`] when the declaration is malformed.
    pub fn field_decl(
        mut self,
        name: impl Into<String>,
        label: impl Into<String>,
        rules: &str,
    ) -> Result<Self, RuleParseError> {
        self.fields.push(Field::parse(name, label, rules)?);
        Ok(self)
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Validates every field against `values`, keyed by field name
    ///
    /// A field with no entry in `values` is validated as the empty string.
    pub fn validate(&self, values: &HashMap<String, String>) -> FormReport {
        let results = self
            .fields
            .iter()
            .map(|field| {
                let raw = values.get(&field.name).map(String::as_str).unwrap_or("");
                (field.name.clone(), field.validate(raw))
            })
            .collect();

        let report = FormReport { results };
        tracing::debug!(
            fields = report.results.len(),
            errors = report.errors().count(),
            "form validated"
        );
        report
    }
}

/// Per-field results of a form validation, in field order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormReport {
    pub results: Vec<(String, ValidationResult)>,
}

impl FormReport {
    /// True when every field passed
    pub fn is_valid(&self) -> bool {
        self.results.iter().all(|(_, result)| result.valid)
    }

    /// `(field name, message)` for each failing field
    pub fn errors(&self) -> impl Iterator<Item = (&str, &str)> {
        self.results.iter().filter_map(|(name, result)| {
            result
                .message
                .as_deref()
                .map(|message| (name.as_str(), message))
        })
    }

    /// The first failing field's message, in form order
    pub fn first_error(&self) -> Option<&str> {
        self.errors().next().map(|(_, message)| message)
    }

    pub fn get(&self, name: &str) -> Option<&ValidationResult> {
        self.results
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, result)| result)
    }
}

/// Resets every field's feedback to neutral
pub fn clear_all<'a, I>(feedbacks: I)
where
    I: IntoIterator<Item = &'a mut dyn FieldFeedback>,
{
    for feedback in feedbacks {
        feedback.clear();
    }
}

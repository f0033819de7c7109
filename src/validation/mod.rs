//! Form-field validation
//!
//! A closed catalog of rules ([`rules`]), a short-circuiting single-field
//! validator ([`field`]) and a form aggregate ([`form`]). Everything here is
//! synchronous and pure; marking widgets is left to a [`FieldFeedback`]
//! implementation supplied by the caller.

pub mod field;
pub mod form;
pub mod rules;

pub use field::{
    resolve_label, validate, validate_field_with, Field, FieldFeedback, ValidationResult,
};
pub use form::{clear_all, FormReport, FormValidator};
pub use rules::{parse_rules, FieldRule, Rule, RuleParseError};

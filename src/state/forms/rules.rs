//! Declarative per-field validation rules

use super::field::FieldValue;
use regex::Regex;
use std::collections::HashMap;
use thiserror::Error;

/// Fallback message for required fields whose rule carries none
pub const DEFAULT_REQUIRED_MESSAGE: &str = "This field is required";

/// Why a single field failed validation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldValidationError {
    #[error("{message}")]
    Required { field: String, message: String },
    #[error("{message}")]
    PatternMismatch { field: String, message: String },
    #[error("{message}")]
    TooShort { field: String, message: String },
}

impl FieldValidationError {
    pub fn field(&self) -> &str {
        match self {
            Self::Required { field, .. }
            | Self::PatternMismatch { field, .. }
            | Self::TooShort { field, .. } => field,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Required { message, .. }
            | Self::PatternMismatch { message, .. }
            | Self::TooShort { message, .. } => message,
        }
    }
}

/// Validation policy for one form field
#[derive(Debug, Clone)]
pub struct FieldRule {
    pub required: bool,
    pub min_length: Option<usize>,
    pub pattern: Option<Regex>,
    pub message: String,
}

impl FieldRule {
    /// A required field with no further constraints
    pub fn required(message: &str) -> Self {
        Self {
            required: true,
            min_length: None,
            pattern: None,
            message: message.to_string(),
        }
    }

    pub fn with_min_length(mut self, min_length: usize) -> Self {
        self.min_length = Some(min_length);
        self
    }

    pub fn with_pattern(mut self, pattern: &Regex) -> Self {
        self.pattern = Some(pattern.clone());
        self
    }

    /// Check a raw value against this rule.
    ///
    /// Order: required, then the empty short-circuit, then pattern, then
    /// minimum length. Text is trimmed before every check.
    pub fn check(&self, field: &str, value: &FieldValue) -> Result<(), FieldValidationError> {
        if value.is_empty() {
            if self.required {
                let message = if self.message.is_empty() {
                    DEFAULT_REQUIRED_MESSAGE.to_string()
                } else {
                    self.message.clone()
                };
                return Err(FieldValidationError::Required {
                    field: field.to_string(),
                    message,
                });
            }
            return Ok(());
        }

        let text = match value {
            FieldValue::Text(s) => s.trim(),
            // A checked box has nothing left to match
            FieldValue::Flag(_) => return Ok(()),
        };

        if let Some(pattern) = &self.pattern {
            if !pattern.is_match(text) {
                return Err(FieldValidationError::PatternMismatch {
                    field: field.to_string(),
                    message: self.message.clone(),
                });
            }
        }

        if let Some(min) = self.min_length {
            if text.chars().count() < min {
                return Err(FieldValidationError::TooShort {
                    field: field.to_string(),
                    message: self.message.clone(),
                });
            }
        }

        Ok(())
    }
}

/// Rules keyed by field name
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: HashMap<String, FieldRule>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rule(mut self, field: &str, rule: FieldRule) -> Self {
        self.rules.insert(field.to_string(), rule);
        self
    }

    pub fn get(&self, field: &str) -> Option<&FieldRule> {
        self.rules.get(field)
    }

    /// Whether the field must be filled in. Fields without a rule are optional.
    pub fn is_required(&self, field: &str) -> bool {
        self.rules.get(field).is_some_and(|r| r.required)
    }

    /// Validate a raw value. A field with no rule is always valid.
    pub fn check(&self, field: &str, value: &FieldValue) -> Result<(), FieldValidationError> {
        match self.rules.get(field) {
            Some(rule) => rule.check(field, value),
            None => Ok(()),
        }
    }
}

use std::collections::BTreeMap;

use serde::de::IgnoredAny;
use serde::{Deserialize, Serialize};
use validator::ValidationErrors;

use crate::domain::types::TypeConstraintError;

pub mod categories;

/// First validation message per field, keyed by the field's wire name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `message` for `field` unless the field already failed.
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_insert_with(|| message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn first_message(&self) -> &str {
        self.0.values().next().map(String::as_str).unwrap_or_default()
    }

    /// Record a failed domain conversion against the field it names.
    pub fn add_constraint(&mut self, field: &str, error: TypeConstraintError) {
        self.add(field, error.to_string());
    }
}

/// A JSON field that either has the expected type or is set aside as a mismatch.
///
/// Lets a form report a wrongly typed value against its field instead of
/// failing the whole body.
#[derive(Debug, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Typed<T> {
    Value(T),
    #[serde(skip_serializing)]
    Mismatch(IgnoredAny),
}

impl<T> Typed<T> {
    /// Unwrap the value, recording `{field} {expected}` on a mismatch.
    pub fn accept(self, errors: &mut FieldErrors, field: &str, expected: &str) -> Option<T> {
        match self {
            Typed::Value(value) => Some(value),
            Typed::Mismatch(_) => {
                errors.add(field, format!("{field} {expected}"));
                None
            }
        }
    }
}

impl From<ValidationErrors> for FieldErrors {
    fn from(value: ValidationErrors) -> Self {
        let mut errors = FieldErrors::new();
        for (field, failures) in value.field_errors() {
            if let Some(failure) = failures.first() {
                let message = failure
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{field} is invalid ({})", failure.code));
                errors.add(field.to_string(), message);
            }
        }
        errors
    }
}

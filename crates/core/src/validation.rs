//! Request payload validation helpers.

use validator::{Validate, ValidationErrors};

use crate::error::CoreError;

/// Run `validator` rules on an input and convert failures into
/// [`CoreError::Validation`] with a flat, field-prefixed message.
pub fn validate_input<T: Validate>(input: &T) -> Result<(), CoreError> {
    input
        .validate()
        .map_err(|errors| CoreError::Validation(describe(&errors)))
}

fn describe(errors: &ValidationErrors) -> String {
    let mut parts: Vec<String> = errors
        .field_errors()
        .iter()
        .map(|(field, errs)| {
            let reasons: Vec<String> = errs
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string())
                })
                .collect();
            format!("{field}: {}", reasons.join(", "))
        })
        .collect();
    parts.sort();
    parts.join("; ")
}

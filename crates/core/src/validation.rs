//! Input validation helpers built on the `validator` crate.
//!
//! DTOs derive [`Validate`]; handlers call [`validate_input`] to turn a
//! failed check into a [`CoreError::Validation`] with a readable message.

use validator::{Validate, ValidationErrors, ValidationErrorsKind};

use crate::error::CoreError;

/// Run the derived validation rules on `input`.
pub fn validate_input<T: Validate>(input: &T) -> Result<(), CoreError> {
    input
        .validate()
        .map_err(|errors| CoreError::Validation(describe(&errors)))
}

/// Flatten field errors into one message, ordered by field name.
///
/// Nested structs and lists are walked recursively. Uses each rule's custom
/// message when present, otherwise `"<field> is invalid (<code>)"`.
pub fn describe(errors: &ValidationErrors) -> String {
    let mut messages = Vec::new();
    collect_messages(errors, "", &mut messages);
    messages.join("; ")
}

fn collect_messages(errors: &ValidationErrors, prefix: &str, out: &mut Vec<String>) {
    let mut fields: Vec<_> = errors
        .errors()
        .iter()
        .map(|(field, kind)| (format!("{prefix}{field}"), kind))
        .collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    for (field, kind) in fields {
        match kind {
            ValidationErrorsKind::Field(errs) => {
                out.extend(errs.iter().map(|e| match &e.message {
                    Some(msg) => msg.to_string(),
                    None => format!("{field} is invalid ({})", e.code),
                }));
            }
            ValidationErrorsKind::Struct(inner) => {
                collect_messages(inner, &format!("{field}."), out);
            }
            ValidationErrorsKind::List(entries) => {
                for (index, inner) in entries {
                    collect_messages(inner, &format!("{field}[{index}]."), out);
                }
            }
        }
    }
}

/// Trim a free-text search term, treating blank input as absent.
pub fn normalize_search_term(term: Option<&str>) -> Option<&str> {
    term.map(str::trim).filter(|t| !t.is_empty())
}

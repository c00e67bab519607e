//! Bridge from `validator` derive output to [`FieldError`] lists.

use validator::ValidationErrors;

use crate::error::{CoreError, FieldError};

/// Flatten field-level validation errors into `(field, message)` pairs.
///
/// Fields are sorted by name so responses are stable. A violation without a
/// custom message falls back to its validator code (e.g. `range`).
pub fn field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut out: Vec<FieldError> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, violations)| {
            let field = field.to_string();
            violations.iter().map(move |v| {
                let message = v
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| v.code.to_string());
                FieldError::new(field.clone(), message)
            })
        })
        .collect();
    out.sort_by(|a, b| a.field.cmp(&b.field));
    out
}

impl From<ValidationErrors> for CoreError {
    fn from(errors: ValidationErrors) -> Self {
        CoreError::InvalidFields(field_errors(&errors))
    }
}

#[cfg(test)]
mod tests {
    use std::borrow::Cow;

    use assert_matches::assert_matches;
    use validator::ValidationError;

    use super::*;

    fn sample_errors() -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        let mut with_message = ValidationError::new("length");
        with_message.message = Some(Cow::Borrowed("too long"));
        errors.add("genre", with_message);
        errors.add("duration", ValidationError::new("range"));
        errors
    }

    #[test]
    fn uses_custom_message_when_present() {
        let fields = field_errors(&sample_errors());
        assert!(fields.contains(&FieldError::new("genre", "too long")));
    }

    #[test]
    fn falls_back_to_code() {
        let fields = field_errors(&sample_errors());
        assert!(fields.contains(&FieldError::new("duration", "range")));
    }

    #[test]
    fn output_is_sorted_by_field() {
        let fields = field_errors(&sample_errors());
        let names: Vec<_> = fields.iter().map(|f| f.field.as_str()).collect();
        assert_eq!(names, vec!["duration", "genre"]);
    }

    #[test]
    fn converts_into_invalid_fields() {
        let err: CoreError = sample_errors().into();
        assert_matches!(err, CoreError::InvalidFields(fields) if fields.len() == 2);
    }
}

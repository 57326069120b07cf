//! Answer validation against a schema
//!
//! Checks run field by field in schema order and stop at the first
//! failure, so a respondent is told about exactly one problem per
//! attempt. Accepted values are never coerced or normalized; a numeric
//! field's accepted answer stays the raw string the respondent typed.

use std::collections::HashMap;
use thiserror::Error;

use crate::form::document::{FieldDoc, FormSchema};
use crate::form::field::TextFormat;

/// Raw answers keyed by field id
pub type AnswerMap = HashMap<String, String>;

/// Why a field's answer was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Required field left empty or whitespace-only
    Required,
    /// Non-empty answer doesn't match the field's format rule
    InvalidFormat(TextFormat),
}

/// The first validation failure found, in schema order
#[derive(Debug, Clone, Error)]
pub enum ValidationFailure {
    #[error("\"{label}\" is required")]
    Required { field_id: String, label: String },

    #[error("\"{label}\" must be a valid email address")]
    InvalidEmail { field_id: String, label: String },

    #[error("\"{label}\" must be a number")]
    InvalidNumber { field_id: String, label: String },
}

impl ValidationFailure {
    fn new(kind: FailureKind, field: &FieldDoc) -> Self {
        let field_id = field.id.clone();
        let label = field.label.clone();
        match kind {
            FailureKind::Required => ValidationFailure::Required { field_id, label },
            FailureKind::InvalidFormat(TextFormat::Email) => {
                ValidationFailure::InvalidEmail { field_id, label }
            }
            FailureKind::InvalidFormat(TextFormat::Number) => {
                ValidationFailure::InvalidNumber { field_id, label }
            }
        }
    }

    /// Id of the field that failed
    pub fn field_id(&self) -> &str {
        match self {
            ValidationFailure::Required { field_id, .. }
            | ValidationFailure::InvalidEmail { field_id, .. }
            | ValidationFailure::InvalidNumber { field_id, .. } => field_id,
        }
    }

    /// What went wrong
    pub fn kind(&self) -> FailureKind {
        match self {
            ValidationFailure::Required { .. } => FailureKind::Required,
            ValidationFailure::InvalidEmail { .. } => {
                FailureKind::InvalidFormat(TextFormat::Email)
            }
            ValidationFailure::InvalidNumber { .. } => {
                FailureKind::InvalidFormat(TextFormat::Number)
            }
        }
    }
}

/// Validate a raw answer set against a schema, fail-fast in field order
///
/// Missing answers are treated as empty strings. On success the caller's
/// answer map is accepted as-is.
pub fn validate(schema: &FormSchema, answers: &AnswerMap) -> Result<(), ValidationFailure> {
    for field in &schema.fields {
        let value = answers
            .get(&field.id)
            .map(|v| v.trim())
            .unwrap_or_default();

        if field.required && value.is_empty() {
            return Err(ValidationFailure::new(FailureKind::Required, field));
        }

        if value.is_empty() {
            continue;
        }

        match field.effective_format() {
            Some(TextFormat::Email) if !is_valid_email(value) => {
                return Err(ValidationFailure::new(
                    FailureKind::InvalidFormat(TextFormat::Email),
                    field,
                ));
            }
            Some(TextFormat::Number) if value.parse::<f64>().is_err() => {
                return Err(ValidationFailure::new(
                    FailureKind::InvalidFormat(TextFormat::Number),
                    field,
                ));
            }
            _ => {}
        }
    }

    Ok(())
}

/// Single `@` with a non-empty local part, and at least one interior `.`
/// after the `@`. No whitespace anywhere.
fn is_valid_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rfind('.') {
        None | Some(0) => false,
        Some(i) => i != domain.len() - 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::builder::{FieldPatch, FormDraft};
    use crate::form::field::FieldType;

    fn answers(pairs: &[(&str, &str)]) -> AnswerMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn schema_with_format(format: TextFormat) -> FormSchema {
        let mut draft = FormDraft::new("T");
        let id = draft.add_field(FieldType::Text);
        draft.update_field(
            &id,
            FieldPatch::default().label("Answer").format(Some(format)),
        );
        draft.to_schema()
    }

    #[test]
    fn test_required_fails_on_empty_and_whitespace() {
        let mut draft = FormDraft::new("T");
        let id = draft.add_field(FieldType::Text);
        draft.update_field(&id, FieldPatch::default().label("Name").required(true));
        let schema = draft.to_schema();

        let err = validate(&schema, &AnswerMap::new()).unwrap_err();
        assert_eq!(err.kind(), FailureKind::Required);
        assert_eq!(err.field_id(), id);
        assert_eq!(err.to_string(), "\"Name\" is required");

        let err = validate(&schema, &answers(&[(&id, "   ")])).unwrap_err();
        assert_eq!(err.kind(), FailureKind::Required);
    }

    #[test]
    fn test_required_failure_reported_before_later_fields() {
        let mut draft = FormDraft::new("T");
        let first = draft.add_field(FieldType::Text);
        draft.update_field(&first, FieldPatch::default().label("Name").required(true));
        let second = draft.add_field(FieldType::Text);
        draft.update_field(
            &second,
            FieldPatch::default()
                .label("Email")
                .format(Some(TextFormat::Email)),
        );
        let schema = draft.to_schema();

        // Both fields are invalid; only the first is reported.
        let err = validate(&schema, &answers(&[(&second, "not-an-email")])).unwrap_err();
        assert_eq!(err.field_id(), first);
        assert_eq!(err.kind(), FailureKind::Required);
    }

    #[test]
    fn test_email_format() {
        let schema = schema_with_format(TextFormat::Email);
        let id = schema.fields[0].id.clone();

        assert!(validate(&schema, &answers(&[(&id, "a@b.com")])).is_ok());
        assert!(validate(&schema, &answers(&[(&id, "first.last@mail.example.org")])).is_ok());

        for bad in ["not-an-email", "a@b", "@b.com", "a@.com", "a@b.", "a b@c.com", "a@b@c.com"] {
            let err = validate(&schema, &answers(&[(&id, bad)])).unwrap_err();
            assert_eq!(
                err.kind(),
                FailureKind::InvalidFormat(TextFormat::Email),
                "expected {:?} to be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_email_skipped_when_empty_and_optional() {
        let schema = schema_with_format(TextFormat::Email);
        assert!(validate(&schema, &AnswerMap::new()).is_ok());
    }

    #[test]
    fn test_number_format() {
        let schema = schema_with_format(TextFormat::Number);
        let id = schema.fields[0].id.clone();

        assert!(validate(&schema, &answers(&[(&id, "42")])).is_ok());
        assert!(validate(&schema, &answers(&[(&id, "3.14")])).is_ok());
        assert!(validate(&schema, &answers(&[(&id, "-7")])).is_ok());

        let err = validate(&schema, &answers(&[(&id, "abc")])).unwrap_err();
        assert_eq!(err.kind(), FailureKind::InvalidFormat(TextFormat::Number));
        assert!(err.to_string().contains("must be a number"));
    }

    #[test]
    fn test_all_optional_unanswered_succeeds() {
        let mut draft = FormDraft::new("T");
        draft.add_field(FieldType::Text);
        draft.add_field(FieldType::Textarea);
        draft.add_field(FieldType::Date);
        draft.add_field(FieldType::Dropdown);
        let schema = draft.to_schema();

        assert!(validate(&schema, &AnswerMap::new()).is_ok());
    }

    #[test]
    fn test_date_and_dropdown_only_checked_for_required() {
        let mut draft = FormDraft::new("T");
        let date = draft.add_field(FieldType::Date);
        let drop = draft.add_field(FieldType::Dropdown);
        draft.add_option(&drop, "Red");
        let schema = draft.to_schema();

        // Any non-empty value passes; no format rules apply.
        assert!(validate(&schema, &answers(&[(&date, "whenever"), (&drop, "Purple")])).is_ok());
    }

    #[test]
    fn test_end_to_end_scenario() {
        let yaml = r#"
title: T
fields:
- id: f1
  label: Name
  type: text
  required: true
- id: f2
  label: Color
  type: dropdown
  required: false
  options:
  - Red
  - Blue
"#;
        let schema: FormSchema = serde_yml::from_str(yaml).unwrap();

        let err = validate(&schema, &answers(&[("f1", "")])).unwrap_err();
        assert_eq!(err.field_id(), "f1");
        assert_eq!(err.kind(), FailureKind::Required);

        assert!(validate(&schema, &answers(&[("f1", "Ann"), ("f2", "Blue")])).is_ok());
    }
}

//! Canonical form schema documents
//!
//! [`FormSchema`] is the deterministic, order-preserving document form of
//! a draft, and the single source of truth for what gets persisted and
//! what a respondent later receives. Optional attributes that don't apply
//! are omitted from the document entirely (never `null`): `format` only
//! appears when set, `options` only on dropdown fields (present there
//! even when empty).

use serde::{Deserialize, Serialize};

use crate::form::builder::FormDraft;
use crate::form::field::{Field, FieldKind, FieldType, TextFormat};

/// One serialized field of a schema document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDoc {
    pub id: String,
    pub label: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<TextFormat>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
}

impl FieldDoc {
    /// The format rule that actually applies to this field
    ///
    /// A hand-edited document may carry `format` on a kind that doesn't
    /// accept one; such a rule is ignored.
    pub fn effective_format(&self) -> Option<TextFormat> {
        if self.field_type.accepts_format() {
            self.format
        } else {
            None
        }
    }
}

/// The canonical, persisted form of a schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormSchema {
    pub title: String,
    pub fields: Vec<FieldDoc>,
}

impl FormSchema {
    /// Derive the canonical document from a draft's current state
    ///
    /// Pure and deterministic: the same draft always yields the same
    /// document, field order preserved.
    pub fn from_draft(draft: &FormDraft) -> Self {
        let fields = draft
            .fields()
            .iter()
            .map(|field| FieldDoc {
                id: field.id.clone(),
                label: field.label.clone(),
                field_type: field.field_type(),
                required: field.required,
                format: field.kind.format(),
                options: field.kind.options().map(<[String]>::to_vec),
            })
            .collect();

        Self {
            title: draft.title.clone(),
            fields,
        }
    }

    /// Rebuild an editable draft from a persisted document
    ///
    /// Inapplicable attributes are dropped at the boundary: a `format`
    /// on a date or dropdown field and `options` on a non-dropdown field
    /// do not survive the round-trip.
    pub fn into_draft(self) -> FormDraft {
        let fields = self
            .fields
            .into_iter()
            .map(|doc| {
                let kind = match doc.field_type {
                    FieldType::Text => FieldKind::Text {
                        format: doc.format,
                    },
                    FieldType::Textarea => FieldKind::Textarea {
                        format: doc.format,
                    },
                    FieldType::Date => FieldKind::Date,
                    FieldType::Dropdown => FieldKind::Dropdown {
                        options: doc.options.unwrap_or_default(),
                    },
                };
                Field {
                    id: doc.id,
                    label: doc.label,
                    required: doc.required,
                    kind,
                }
            })
            .collect();

        FormDraft::from_parts(self.title, fields)
    }

    /// Find a field by its id
    pub fn field(&self, id: &str) -> Option<&FieldDoc> {
        self.fields.iter().find(|f| f.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::builder::FieldPatch;
    use crate::form::field::FieldType;

    fn sample_draft() -> FormDraft {
        let mut draft = FormDraft::new("Customer Survey");
        let name = draft.add_field(FieldType::Text);
        draft.update_field(
            &name,
            FieldPatch::default().label("Name").required(true),
        );
        let email = draft.add_field(FieldType::Text);
        draft.update_field(
            &email,
            FieldPatch::default()
                .label("Email")
                .format(Some(TextFormat::Email)),
        );
        let color = draft.add_field(FieldType::Dropdown);
        draft.update_field(&color, FieldPatch::default().label("Color"));
        draft.add_option(&color, "Red");
        draft.add_option(&color, "Blue");
        draft.add_field(FieldType::Date);
        draft
    }

    #[test]
    fn test_serialization_is_deterministic() {
        let draft = sample_draft();
        let a = serde_yml::to_string(&draft.to_schema()).unwrap();
        let b = serde_yml::to_string(&draft.to_schema()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_field_order_is_preserved() {
        let schema = sample_draft().to_schema();
        let labels: Vec<&str> = schema.fields.iter().map(|f| f.label.as_str()).collect();
        assert_eq!(labels, vec!["Name", "Email", "Color", "date field"]);
    }

    #[test]
    fn test_unset_format_is_omitted_not_null() {
        let schema = sample_draft().to_schema();
        let yaml = serde_yml::to_string(&schema).unwrap();

        // One field carries a format; no field serializes a null one.
        assert!(yaml.contains("format: email"));
        assert!(!yaml.contains("format: null"));
        assert!(!yaml.contains("format: ~"));
    }

    #[test]
    fn test_options_only_on_dropdown_even_when_empty() {
        let mut draft = FormDraft::new("T");
        draft.add_field(FieldType::Text);
        draft.add_field(FieldType::Dropdown);

        let schema = draft.to_schema();
        assert_eq!(schema.fields[0].options, None);
        assert_eq!(schema.fields[1].options, Some(Vec::new()));

        let yaml = serde_yml::to_string(&schema).unwrap();
        assert!(yaml.contains("options: []"));
    }

    #[test]
    fn test_document_draft_roundtrip() {
        let draft = sample_draft();
        let schema = draft.to_schema();

        let reloaded = schema.clone().into_draft();
        assert_eq!(reloaded.title, draft.title);
        assert_eq!(reloaded.fields(), draft.fields());
        assert_eq!(reloaded.to_schema(), schema);
    }

    #[test]
    fn test_yaml_roundtrip() {
        let schema = sample_draft().to_schema();
        let yaml = serde_yml::to_string(&schema).unwrap();
        let back: FormSchema = serde_yml::from_str(&yaml).unwrap();
        assert_eq!(back, schema);
    }

    #[test]
    fn test_inapplicable_attributes_dropped_on_load() {
        let yaml = r#"
title: Odd
fields:
- id: f1
  label: When
  type: date
  required: false
  format: email
- id: f2
  label: Name
  type: text
  required: false
  options:
  - stray
"#;
        let schema: FormSchema = serde_yml::from_str(yaml).unwrap();
        assert_eq!(schema.fields[0].effective_format(), None);

        let cleaned = schema.into_draft().to_schema();
        assert_eq!(cleaned.fields[0].format, None);
        assert_eq!(cleaned.fields[1].options, None);
    }

    #[test]
    fn test_required_defaults_false_when_absent() {
        let yaml = r#"
title: T
fields:
- id: f1
  label: Name
  type: text
"#;
        let schema: FormSchema = serde_yml::from_str(yaml).unwrap();
        assert!(!schema.fields[0].required);
    }
}

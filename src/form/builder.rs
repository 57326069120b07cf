//! Form draft state and its mutation commands
//!
//! A draft is the mutable, ordered field list a form is composed from.
//! All mutations go through [`FormDraft::apply`] as explicit commands, a
//! reducer over the whole field list. Invariants held across any command
//! sequence: field ids stay pairwise distinct, insertion order of
//! surviving fields is preserved, and option entries are trimmed and
//! non-empty.

use crate::form::document::FormSchema;
use crate::form::field::{Field, FieldType, TextFormat};

/// A mutation of the draft's field list
#[derive(Debug, Clone)]
pub enum Command {
    AddField {
        field_type: FieldType,
    },
    UpdateField {
        id: String,
        patch: FieldPatch,
    },
    RemoveField {
        id: String,
    },
    AddOption {
        id: String,
        text: String,
    },
    RemoveOptionAt {
        id: String,
        index: usize,
    },
}

/// Partial update of a field's mutable attributes
///
/// Unset members leave the attribute untouched. The outer `Option` on
/// `format` distinguishes "don't touch" from "set/clear".
#[derive(Debug, Clone, Default)]
pub struct FieldPatch {
    pub label: Option<String>,
    pub required: Option<bool>,
    pub format: Option<Option<TextFormat>>,
}

impl FieldPatch {
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = Some(required);
        self
    }

    pub fn format(mut self, format: Option<TextFormat>) -> Self {
        self.format = Some(format);
        self
    }
}

/// An in-progress form: a title plus an ordered field list
#[derive(Debug, Clone, Default)]
pub struct FormDraft {
    pub title: String,
    fields: Vec<Field>,
}

impl FormDraft {
    /// Create an empty draft with the given title
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            fields: Vec::new(),
        }
    }

    /// Rebuild a draft from previously serialized parts
    pub(crate) fn from_parts(title: String, fields: Vec<Field>) -> Self {
        Self { title, fields }
    }

    /// The fields in insertion order
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Whether the draft has no fields yet
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Apply one mutation command to the draft
    pub fn apply(&mut self, command: Command) {
        match command {
            Command::AddField { field_type } => {
                self.fields.push(Field::new(field_type));
            }
            Command::UpdateField { id, patch } => {
                // Absent id is a silent no-op: callers resolve ids from
                // the current field list before issuing the command.
                if let Some(field) = self.fields.iter_mut().find(|f| f.id == id) {
                    if let Some(label) = patch.label {
                        let label = label.trim().to_string();
                        if !label.is_empty() {
                            field.label = label;
                        }
                    }
                    if let Some(required) = patch.required {
                        field.required = required;
                    }
                    if let Some(format) = patch.format {
                        field.kind.set_format(format);
                    }
                }
            }
            Command::RemoveField { id } => {
                self.fields.retain(|f| f.id != id);
            }
            Command::AddOption { id, text } => {
                let text = text.trim();
                if text.is_empty() {
                    return;
                }
                if let Some(field) = self.fields.iter_mut().find(|f| f.id == id) {
                    if let crate::form::field::FieldKind::Dropdown { options } = &mut field.kind {
                        options.push(text.to_string());
                    }
                }
            }
            Command::RemoveOptionAt { id, index } => {
                if let Some(field) = self.fields.iter_mut().find(|f| f.id == id) {
                    if let crate::form::field::FieldKind::Dropdown { options } = &mut field.kind {
                        if index < options.len() {
                            options.remove(index);
                        }
                    }
                }
            }
        }
    }

    /// Append a new field of the given kind and return its id
    pub fn add_field(&mut self, field_type: FieldType) -> String {
        self.apply(Command::AddField { field_type });
        self.fields
            .last()
            .map(|f| f.id.clone())
            .unwrap_or_default()
    }

    /// Patch the attributes of an existing field
    pub fn update_field(&mut self, id: &str, patch: FieldPatch) {
        self.apply(Command::UpdateField {
            id: id.to_string(),
            patch,
        });
    }

    /// Remove a field, preserving the order of the rest
    pub fn remove_field(&mut self, id: &str) {
        self.apply(Command::RemoveField { id: id.to_string() });
    }

    /// Append a trimmed option to a dropdown field
    pub fn add_option(&mut self, id: &str, text: &str) {
        self.apply(Command::AddOption {
            id: id.to_string(),
            text: text.to_string(),
        });
    }

    /// Remove the option at the given position
    pub fn remove_option_at(&mut self, id: &str, index: usize) {
        self.apply(Command::RemoveOptionAt {
            id: id.to_string(),
            index,
        });
    }

    /// Derive the canonical schema document from the current state
    pub fn to_schema(&self) -> FormSchema {
        FormSchema::from_draft(self)
    }
}

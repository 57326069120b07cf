//! Field kinds and their per-kind configuration
//!
//! The set of field kinds is closed. Which extra configuration a field
//! carries depends on its kind, so the configuration lives in a tagged
//! union ([`FieldKind`]) rather than a bag of optional attributes: a
//! `date` field cannot hold a text format, a `text` field cannot hold
//! dropdown options.

use serde::{Deserialize, Serialize};
use ulid::Ulid;

/// The closed set of field kinds a form may contain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Textarea,
    Date,
    Dropdown,
}

impl FieldType {
    /// All field kinds, in presentation order
    pub fn all() -> &'static [FieldType] {
        &[
            FieldType::Text,
            FieldType::Textarea,
            FieldType::Date,
            FieldType::Dropdown,
        ]
    }

    /// Whether fields of this kind accept a text format rule
    pub fn accepts_format(self) -> bool {
        matches!(self, FieldType::Text | FieldType::Textarea)
    }

    /// Whether fields of this kind carry an option list
    pub fn has_options(self) -> bool {
        matches!(self, FieldType::Dropdown)
    }

    /// Default label for a freshly added field of this kind
    pub fn default_label(self) -> String {
        format!("{} field", self)
    }
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldType::Text => write!(f, "text"),
            FieldType::Textarea => write!(f, "textarea"),
            FieldType::Date => write!(f, "date"),
            FieldType::Dropdown => write!(f, "dropdown"),
        }
    }
}

impl std::str::FromStr for FieldType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(FieldType::Text),
            "textarea" => Ok(FieldType::Textarea),
            "date" => Ok(FieldType::Date),
            "dropdown" => Ok(FieldType::Dropdown),
            _ => Err(format!("Unknown field type: {}", s)),
        }
    }
}

/// Format rule for text-bearing fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextFormat {
    Email,
    Number,
}

impl std::fmt::Display for TextFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TextFormat::Email => write!(f, "email"),
            TextFormat::Number => write!(f, "number"),
        }
    }
}

impl std::str::FromStr for TextFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "email" => Ok(TextFormat::Email),
            "number" => Ok(TextFormat::Number),
            _ => Err(format!("Unknown format: {} (valid: email, number)", s)),
        }
    }
}

/// Per-kind configuration of a field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    Text { format: Option<TextFormat> },
    Textarea { format: Option<TextFormat> },
    Date,
    Dropdown { options: Vec<String> },
}

impl FieldKind {
    /// Fresh configuration for a field of the given kind
    pub fn new(field_type: FieldType) -> Self {
        match field_type {
            FieldType::Text => FieldKind::Text { format: None },
            FieldType::Textarea => FieldKind::Textarea { format: None },
            FieldType::Date => FieldKind::Date,
            FieldType::Dropdown => FieldKind::Dropdown {
                options: Vec::new(),
            },
        }
    }

    /// The kind tag of this configuration
    pub fn field_type(&self) -> FieldType {
        match self {
            FieldKind::Text { .. } => FieldType::Text,
            FieldKind::Textarea { .. } => FieldType::Textarea,
            FieldKind::Date => FieldType::Date,
            FieldKind::Dropdown { .. } => FieldType::Dropdown,
        }
    }

    /// The format rule, if this kind carries one
    pub fn format(&self) -> Option<TextFormat> {
        match self {
            FieldKind::Text { format } | FieldKind::Textarea { format } => *format,
            _ => None,
        }
    }

    /// The option list, if this kind carries one
    pub fn options(&self) -> Option<&[String]> {
        match self {
            FieldKind::Dropdown { options } => Some(options),
            _ => None,
        }
    }

    /// Set or clear the format rule; silently ignored on kinds that
    /// don't accept one.
    pub fn set_format(&mut self, new_format: Option<TextFormat>) {
        match self {
            FieldKind::Text { format } | FieldKind::Textarea { format } => *format = new_format,
            _ => {}
        }
    }
}

/// One question in a form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Unique within the form, assigned at creation, immutable
    pub id: String,
    /// Display label shown to respondents
    pub label: String,
    /// Whether an answer must be provided
    pub required: bool,
    /// Kind tag plus kind-specific configuration
    pub kind: FieldKind,
}

impl Field {
    /// Create a field of the given kind with a fresh id and defaults
    pub fn new(field_type: FieldType) -> Self {
        Self {
            id: format!("fld-{}", Ulid::new()),
            label: field_type.default_label(),
            required: false,
            kind: FieldKind::new(field_type),
        }
    }

    /// The kind tag of this field
    pub fn field_type(&self) -> FieldType {
        self.kind.field_type()
    }
}

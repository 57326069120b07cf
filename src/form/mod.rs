//! Form schema model and its validation pipeline
//!
//! The flow: a [`builder::FormDraft`] accumulates fields through
//! mutation commands; [`document::FormSchema`] is its canonical,
//! persisted document form; [`validate::validate`] checks a respondent's
//! raw answers against a schema; [`response::collect`] turns accepted
//! answers into an immutable [`response::Response`] record.

pub mod builder;
pub mod document;
pub mod field;
pub mod response;
pub mod validate;

pub use builder::{Command, FieldPatch, FormDraft};
pub use document::{FieldDoc, FormSchema};
pub use field::{Field, FieldKind, FieldType, TextFormat};
pub use response::{collect, Answer, Response};
pub use validate::{validate, AnswerMap, FailureKind, ValidationFailure};

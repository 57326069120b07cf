//! Response records and answer collection

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::identity::ArtifactId;
use crate::form::document::FormSchema;
use crate::form::validate::AnswerMap;

/// One respondent-supplied value for one field
///
/// Carries the field's label as it read at submission time, not the
/// field id, so a record stays readable after the form changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    pub label: String,
    pub value: String,
}

/// The immutable record of one respondent's full set of answers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    #[serde(rename = "formId")]
    pub form_id: ArtifactId,
    pub answers: Vec<Answer>,
    #[serde(rename = "submittedAt")]
    pub submitted_at: DateTime<Utc>,
}

/// Assemble a response from an accepted answer set
///
/// Produces one answer per schema field, in schema order, defaulting
/// missing answers to the empty string. Collection never fails; callers
/// are expected to have validated the answers first.
pub fn collect(
    schema: &FormSchema,
    answers: &AnswerMap,
    form_id: ArtifactId,
    now: DateTime<Utc>,
) -> Response {
    let answers = schema
        .fields
        .iter()
        .map(|field| Answer {
            label: field.label.clone(),
            value: answers.get(&field.id).cloned().unwrap_or_default(),
        })
        .collect();

    Response {
        form_id,
        answers,
        submitted_at: now,
    }
}

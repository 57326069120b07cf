//! In-memory store for exercising the pipeline without any I/O

use std::cell::RefCell;

use crate::core::identity::{ArtifactId, ArtifactPrefix};
use crate::form::document::FormSchema;
use crate::form::response::Response;
use crate::store::{Store, StoreError};

/// Store holding everything in process memory
///
/// Single-session only, like the rest of the core; no interior locking.
#[derive(Debug, Default)]
pub struct MemoryStore {
    forms: RefCell<Vec<(ArtifactId, FormSchema)>>,
    responses: RefCell<Vec<Response>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Store for MemoryStore {
    fn create(&self, schema: &FormSchema) -> Result<ArtifactId, StoreError> {
        let id = ArtifactId::new(ArtifactPrefix::Form);
        self.forms.borrow_mut().push((id.clone(), schema.clone()));
        Ok(id)
    }

    fn get(&self, id: &ArtifactId) -> Result<FormSchema, StoreError> {
        self.forms
            .borrow()
            .iter()
            .find(|(stored_id, _)| stored_id == id)
            .map(|(_, schema)| schema.clone())
            .ok_or_else(|| StoreError::NotFound(id.clone()))
    }

    fn submit(&self, response: &Response) -> Result<(), StoreError> {
        self.responses.borrow_mut().push(response.clone());
        Ok(())
    }

    fn list(&self) -> Result<Vec<Response>, StoreError> {
        let mut responses = self.responses.borrow().clone();
        responses.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));
        Ok(responses)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    use crate::form::builder::{FieldPatch, FormDraft};
    use crate::form::field::{FieldType, TextFormat};
    use crate::form::response::collect;
    use crate::form::validate::{validate, AnswerMap, FailureKind};

    #[test]
    fn test_create_then_get() {
        let store = MemoryStore::new();
        let schema = FormDraft::new("T").to_schema();

        let id = store.create(&schema).unwrap();
        assert_eq!(store.get(&id).unwrap(), schema);

        let other = ArtifactId::new(ArtifactPrefix::Form);
        assert!(matches!(
            store.get(&other).unwrap_err(),
            StoreError::NotFound(_)
        ));
    }

    /// Full pipeline: build, persist, fetch, validate, collect, submit, list.
    #[test]
    fn test_pipeline_without_io() {
        let store = MemoryStore::new();

        let mut draft = FormDraft::new("Signup");
        let name = draft.add_field(FieldType::Text);
        draft.update_field(&name, FieldPatch::default().label("Name").required(true));
        let email = draft.add_field(FieldType::Text);
        draft.update_field(
            &email,
            FieldPatch::default()
                .label("Email")
                .format(Some(TextFormat::Email)),
        );

        let form_id = store.create(&draft.to_schema()).unwrap();
        let schema = store.get(&form_id).unwrap();

        let mut answers = AnswerMap::new();
        answers.insert(name.clone(), "Ann".to_string());
        answers.insert(email.clone(), "bad-address".to_string());

        let err = validate(&schema, &answers).unwrap_err();
        assert_eq!(err.kind(), FailureKind::InvalidFormat(TextFormat::Email));

        answers.insert(email, "ann@example.com".to_string());
        validate(&schema, &answers).unwrap();

        let response = collect(&schema, &answers, form_id.clone(), Utc::now());
        store.submit(&response).unwrap();

        let listed = store.list().unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].form_id, form_id);
        assert_eq!(listed[0].answers[0].value, "Ann");
    }
}

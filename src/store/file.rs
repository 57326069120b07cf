//! Filesystem store: one YAML document per schema or response
//!
//! Schemas live under `forms/`, responses under `responses/`, each named
//! by its artifact id. Files that fail to parse are skipped when
//! listing, so one corrupt document doesn't hide the rest.

use std::fs;
use std::path::Path;

use crate::core::identity::{ArtifactId, ArtifactPrefix};
use crate::core::workspace::Workspace;
use crate::form::document::FormSchema;
use crate::form::response::Response;
use crate::store::{Store, StoreError};

/// Store backed by the workspace's forms/ and responses/ directories
pub struct FileStore {
    workspace: Workspace,
}

impl FileStore {
    pub fn new(workspace: Workspace) -> Self {
        Self { workspace }
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    /// Re-serialize a schema at an existing identity (a new edit of the
    /// document, not part of the narrow [`Store`] contract)
    pub fn save(&self, id: &ArtifactId, schema: &FormSchema) -> Result<(), StoreError> {
        let yaml = serde_yml::to_string(schema).map_err(StoreError::unavailable)?;
        fs::write(self.workspace.form_path(id), yaml).map_err(StoreError::unavailable)
    }

    /// All persisted schemas with their ids, oldest first
    ///
    /// ULID filenames sort chronologically, so a name sort doubles as a
    /// creation-order sort.
    pub fn forms(&self) -> Result<Vec<(ArtifactId, FormSchema)>, StoreError> {
        let mut forms = Vec::new();

        for path in yaml_documents(&self.workspace.forms_dir()) {
            let Some(id) = id_from_path(&path) else {
                continue;
            };
            if let Ok(content) = fs::read_to_string(&path) {
                if let Ok(schema) = serde_yml::from_str::<FormSchema>(&content) {
                    forms.push((id, schema));
                }
            }
        }

        forms.sort_by_key(|(id, _)| id.to_string());
        Ok(forms)
    }
}

impl Store for FileStore {
    fn create(&self, schema: &FormSchema) -> Result<ArtifactId, StoreError> {
        let id = ArtifactId::new(ArtifactPrefix::Form);
        self.save(&id, schema)?;
        Ok(id)
    }

    fn get(&self, id: &ArtifactId) -> Result<FormSchema, StoreError> {
        let path = self.workspace.form_path(id);
        if !path.exists() {
            return Err(StoreError::NotFound(id.clone()));
        }
        let content = fs::read_to_string(&path).map_err(StoreError::unavailable)?;
        serde_yml::from_str(&content).map_err(StoreError::unavailable)
    }

    fn submit(&self, response: &Response) -> Result<(), StoreError> {
        let id = ArtifactId::new(ArtifactPrefix::Resp);
        let yaml = serde_yml::to_string(response).map_err(StoreError::unavailable)?;
        fs::write(self.workspace.response_path(&id), yaml).map_err(StoreError::unavailable)
    }

    fn list(&self) -> Result<Vec<Response>, StoreError> {
        let mut responses = Vec::new();

        for path in yaml_documents(&self.workspace.responses_dir()) {
            if let Ok(content) = fs::read_to_string(&path) {
                if let Ok(response) = serde_yml::from_str::<Response>(&content) {
                    responses.push(response);
                }
            }
        }

        responses.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));
        Ok(responses)
    }
}

fn yaml_documents(dir: &Path) -> impl Iterator<Item = std::path::PathBuf> {
    walkdir::WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| e.path().to_string_lossy().ends_with(".tally.yaml"))
        .map(|e| e.path().to_path_buf())
}

fn id_from_path(path: &Path) -> Option<ArtifactId> {
    let name = path.file_name()?.to_str()?;
    let stem = name.strip_suffix(".tally.yaml")?;
    ArtifactId::parse(stem).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use tempfile::tempdir;

    use crate::form::builder::{FieldPatch, FormDraft};
    use crate::form::field::FieldType;
    use crate::form::response::collect;
    use crate::form::validate::AnswerMap;

    fn test_store() -> (tempfile::TempDir, FileStore) {
        let tmp = tempdir().unwrap();
        let ws = Workspace::init(tmp.path()).unwrap();
        (tmp, FileStore::new(ws))
    }

    fn sample_schema() -> FormSchema {
        let mut draft = FormDraft::new("Customer Survey");
        let name = draft.add_field(FieldType::Text);
        draft.update_field(&name, FieldPatch::default().label("Name").required(true));
        let color = draft.add_field(FieldType::Dropdown);
        draft.update_field(&color, FieldPatch::default().label("Color"));
        draft.add_option(&color, "Red");
        draft.to_schema()
    }

    #[test]
    fn test_create_get_roundtrip() {
        let (_tmp, store) = test_store();
        let schema = sample_schema();

        let id = store.create(&schema).unwrap();
        assert_eq!(id.prefix(), ArtifactPrefix::Form);

        let fetched = store.get(&id).unwrap();
        assert_eq!(fetched, schema);
    }

    #[test]
    fn test_get_unknown_id_is_not_found() {
        let (_tmp, store) = test_store();
        let id = ArtifactId::new(ArtifactPrefix::Form);

        let err = store.get(&id).unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[test]
    fn test_save_overwrites_existing_document() {
        let (_tmp, store) = test_store();
        let id = store.create(&sample_schema()).unwrap();

        let mut draft = store.get(&id).unwrap().into_draft();
        draft.add_field(FieldType::Date);
        store.save(&id, &draft.to_schema()).unwrap();

        let fetched = store.get(&id).unwrap();
        assert_eq!(fetched.fields.len(), 3);
    }

    #[test]
    fn test_forms_lists_all_created() {
        let (_tmp, store) = test_store();
        let a = store.create(&sample_schema()).unwrap();
        let b = store.create(&sample_schema()).unwrap();

        let forms = store.forms().unwrap();
        let ids: Vec<&ArtifactId> = forms.iter().map(|(id, _)| id).collect();
        assert!(ids.contains(&&a));
        assert!(ids.contains(&&b));
        assert_eq!(forms.len(), 2);
    }

    #[test]
    fn test_list_orders_most_recent_first() {
        let (_tmp, store) = test_store();
        let schema = sample_schema();
        let id = store.create(&schema).unwrap();

        let older = collect(
            &schema,
            &AnswerMap::new(),
            id.clone(),
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        );
        let newer = collect(
            &schema,
            &AnswerMap::new(),
            id,
            Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap(),
        );

        store.submit(&older).unwrap();
        store.submit(&newer).unwrap();

        let listed = store.list().unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].submitted_at, newer.submitted_at);
        assert_eq!(listed[1].submitted_at, older.submitted_at);
    }

    #[test]
    fn test_list_skips_unparseable_files() {
        let (_tmp, store) = test_store();
        fs::write(
            store.workspace().responses_dir().join("RESP-bogus.tally.yaml"),
            "not: [valid",
        )
        .unwrap();

        assert!(store.list().unwrap().is_empty());
    }
}

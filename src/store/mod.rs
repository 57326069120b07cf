//! Persistence boundary for schemas and responses
//!
//! The core hands documents across this trait and owns no I/O of its
//! own. A schema is written once and read many times; a response is
//! written once and never rewritten. Callers that want a freshly
//! submitted response reflected in a listing must await the submit
//! acknowledgement before issuing the list call.

pub mod file;
pub mod memory;

use thiserror::Error;

use crate::core::identity::ArtifactId;
use crate::form::document::FormSchema;
use crate::form::response::Response;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Storage collaborator for schemas and responses
pub trait Store {
    /// Persist a new schema, returning its assigned identifier
    fn create(&self, schema: &FormSchema) -> Result<ArtifactId, StoreError>;

    /// Fetch a persisted schema by id
    fn get(&self, id: &ArtifactId) -> Result<FormSchema, StoreError>;

    /// Persist one response record
    fn submit(&self, response: &Response) -> Result<(), StoreError>;

    /// All persisted responses, most recent first
    fn list(&self) -> Result<Vec<Response>, StoreError>;
}

/// Errors surfaced by a store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("form not available: {0}")]
    NotFound(ArtifactId),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    pub(crate) fn unavailable(err: impl std::fmt::Display) -> Self {
        StoreError::Unavailable(err.to_string())
    }
}

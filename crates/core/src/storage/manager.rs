use std::sync::Arc;

use crate::errors::CoreError;
use crate::models::investment::Investment;

use super::backend::KeyValueBackend;

/// Persists the investment collection as a single JSON array under one key.
///
/// `load` distinguishes "nothing stored" (`Ok(None)`) from "stored but
/// unreadable" (`Err(CoreError::Corruption)`); recovering from the latter
/// is the repository's job.
#[derive(Clone)]
pub struct InvestmentStore {
    backend: Arc<dyn KeyValueBackend>,
    key: String,
}

impl std::fmt::Debug for InvestmentStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InvestmentStore")
            .field("backend", &self.backend.name())
            .field("key", &self.key)
            .finish()
    }
}

impl InvestmentStore {
    pub fn new(backend: Arc<dyn KeyValueBackend>, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
        }
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Read and parse the stored collection.
    pub fn load(&self) -> Result<Option<Vec<Investment>>, CoreError> {
        let Some(json) = self.backend.get(&self.key)? else {
            return Ok(None);
        };
        let investments = serde_json::from_str(&json)
            .map_err(|e| CoreError::Corruption(format!("key '{}': {e}", self.key)))?;
        Ok(Some(investments))
    }

    /// Serialize and write the whole collection.
    pub fn save(&self, investments: &[Investment]) -> Result<(), CoreError> {
        let json = serde_json::to_string(investments)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize investments: {e}")))?;
        self.backend
            .set(&self.key, &json)
            .map_err(|e| match e {
                CoreError::StorageWrite(_) => e,
                other => CoreError::StorageWrite(other.to_string()),
            })
    }

    /// The stored blob exactly as persisted.
    pub fn raw(&self) -> Result<Option<String>, CoreError> {
        self.backend.get(&self.key)
    }
}

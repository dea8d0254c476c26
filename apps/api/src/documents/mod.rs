//! In-process store for compiled PDFs awaiting download.
//!
//! Each entry owns the kept compilation workspace; disposal deletes the
//! whole directory. Nothing survives a process restart, by design.

pub mod handlers;

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::warn;
use uuid::Uuid;

/// A compiled document and the workspace directory that holds it.
#[derive(Debug, Clone)]
pub struct StoredDocument {
    pub pdf_path: PathBuf,
    pub workspace: PathBuf,
}

/// Shared map of document id to compiled PDF. Cheap to clone.
#[derive(Clone, Default)]
pub struct DocumentStore {
    inner: Arc<RwLock<HashMap<Uuid, StoredDocument>>>,
}

impl DocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a compiled document and returns its id.
    pub async fn insert(&self, pdf_path: PathBuf, workspace: PathBuf) -> Uuid {
        let id = Uuid::new_v4();
        self.inner.write().await.insert(
            id,
            StoredDocument {
                pdf_path,
                workspace,
            },
        );
        id
    }

    pub async fn get(&self, id: Uuid) -> Option<StoredDocument> {
        self.inner.read().await.get(&id).cloned()
    }

    /// Removes the entry and deletes its workspace directory.
    /// Returns false when the id is unknown.
    pub async fn dispose(&self, id: Uuid) -> bool {
        let Some(doc) = self.inner.write().await.remove(&id) else {
            return false;
        };
        if let Err(e) = tokio::fs::remove_dir_all(&doc.workspace).await {
            warn!(
                "Failed to remove workspace {}: {e}",
                doc.workspace.display()
            );
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_insert_get_dispose_roundtrip() {
        let store = DocumentStore::new();
        let ws = tempfile::TempDir::new().unwrap().keep();
        let pdf = ws.join("resume.pdf");
        std::fs::write(&pdf, "%PDF-1.4").unwrap();

        let id = store.insert(pdf.clone(), ws.clone()).await;
        let doc = store.get(id).await.expect("document should exist");
        assert_eq!(doc.pdf_path, pdf);

        assert!(store.dispose(id).await);
        assert!(store.get(id).await.is_none());
        assert!(!ws.exists());
    }

    #[tokio::test]
    async fn test_dispose_unknown_id() {
        let store = DocumentStore::new();
        assert!(!store.dispose(Uuid::new_v4()).await);
    }
}

//! Content catalog port
//!
//! Read-only source of the poems a reader can choose from.

use async_trait::async_trait;
use thiserror::Error;
use tutor_domain::ContentItem;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read catalog: {0}")]
    Io(String),

    #[error("Malformed catalog at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Catalog request failed: {0}")]
    Http(String),
}

/// Source of [`ContentItem`]s, listed once at bootstrap.
#[async_trait]
pub trait ContentCatalog: Send + Sync {
    /// All items, ordered by id.
    async fn list(&self) -> Result<Vec<ContentItem>, CatalogError>;

    /// Look up one item by id.
    async fn find(&self, id: u64) -> Result<Option<ContentItem>, CatalogError> {
        Ok(self.list().await?.into_iter().find(|item| item.id == id))
    }
}

//! Repository traits for data access
//!
//! These traits define the interface for MCP storage without specifying
//! the implementation (SQL JSON column, document store, in-memory, etc.)
//!
//! Records are stored as the JSON form of [`crate::domain::McpExtended`].
//! Repositories do not interpret them; the application layer validates every
//! document it reads back.

use async_trait::async_trait;
use serde_json::Value;

/// Result type for repository operations
pub type RepoResult<T> = anyhow::Result<T>;

/// MCP document repository trait
#[async_trait]
pub trait McpRepository: Send + Sync {
    /// Get all stored documents, in insertion order
    async fn list(&self) -> RepoResult<Vec<Value>>;

    /// Get a document by MCP ID
    async fn get(&self, id: &str) -> RepoResult<Option<Value>>;

    /// Store a new document
    async fn create(&self, id: &str, document: &Value) -> RepoResult<()>;

    /// Replace an existing document
    async fn update(&self, id: &str, document: &Value) -> RepoResult<()>;

    /// Delete a document. Returns `false` if it did not exist.
    async fn delete(&self, id: &str) -> RepoResult<bool>;
}

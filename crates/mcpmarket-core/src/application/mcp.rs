//! MCP Application Service
//!
//! Validates marketplace input, applies the MCP lifecycle and persists the
//! result, emitting an event after every successful change.

use anyhow::Context as _;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::{info, warn};

use crate::catalog::McpCatalog;
use crate::domain::{DomainEvent, McpExtended, McpOwner};
use crate::event_bus::EventSender;
use crate::repository::McpRepository;
use crate::schema::{ValidationErrors, ValidationOptions, Validator};

/// Errors returned by [`McpAppService`]
#[derive(Debug, Error)]
pub enum McpServiceError {
    /// Caller input failed validation; map to a 400 with the listed fields
    #[error("Invalid MCP input: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("MCP not found: {0}")]
    NotFound(String),

    /// A stored document no longer matches the schema
    #[error("Stored MCP {id} is invalid: {errors}")]
    CorruptRecord { id: String, errors: ValidationErrors },

    #[error(transparent)]
    Repository(#[from] anyhow::Error),
}

pub type ServiceResult<T> = Result<T, McpServiceError>;

/// Application service for publishing, editing and rating MCPs
///
/// Read-modify-write operations on the same MCP run one at a time, so
/// concurrent ratings and downloads are never lost.
pub struct McpAppService {
    repository: Arc<dyn McpRepository>,
    validator: Validator,
    event_sender: EventSender,
    write_locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl McpAppService {
    pub fn new(repository: Arc<dyn McpRepository>, event_sender: EventSender) -> Self {
        Self {
            repository,
            validator: Validator::default(),
            event_sender,
            write_locks: Mutex::new(HashMap::new()),
        }
    }

    /// Use non-default validation options for input and stored documents
    pub fn with_options(mut self, options: ValidationOptions) -> Self {
        self.validator = Validator::new(options);
        self
    }

    pub fn validator(&self) -> &Validator {
        &self.validator
    }

    /// Publish a new MCP from an untrusted create payload
    ///
    /// Emits: `McpPublished`
    pub async fn create(&self, owner: McpOwner, input: &Value) -> ServiceResult<McpExtended> {
        let create = self.validator.validate_create(input)?;
        let record = McpExtended::publish(create, owner);
        let document = self.encode(&record)?;

        // Owner attribution is checked with the rest of the record
        self.validator.validate_extended(&document)?;

        self.repository.create(&record.id, &document).await?;

        info!(
            mcp_id = %record.id,
            name = %record.mcp.name,
            owner_id = %record.owner.id,
            "[McpAppService] Published MCP"
        );

        self.event_sender.emit(DomainEvent::McpPublished {
            mcp_id: record.id.clone(),
            name: record.mcp.name.clone(),
            owner_id: record.owner.id.clone(),
            is_public: record.is_public,
        });

        Ok(record)
    }

    /// Apply a partial update. An empty update returns the record unchanged.
    ///
    /// Emits: `McpUpdated` (only when a field changed)
    pub async fn update(&self, id: &str, input: &Value) -> ServiceResult<McpExtended> {
        let update = self.validator.validate_update(input)?;
        let _guard = self.lock_record(id).await;
        let mut record = self.load(id).await?;

        let changed = record.apply_update(update);
        if changed.is_empty() {
            return Ok(record);
        }

        let document = self.encode(&record)?;
        self.repository.update(id, &document).await?;

        info!(
            mcp_id = %id,
            changed = ?changed,
            "[McpAppService] Updated MCP"
        );

        self.event_sender.emit(DomainEvent::McpUpdated {
            mcp_id: id.to_string(),
            changed_fields: changed.iter().map(|f| f.to_string()).collect(),
        });

        Ok(record)
    }

    /// Append a rating and recompute the average
    ///
    /// Emits: `McpRated`
    pub async fn rate(&self, id: &str, input: &Value) -> ServiceResult<McpExtended> {
        let rating = self.validator.validate_rating(input)?;
        let _guard = self.lock_record(id).await;
        let mut record = self.load(id).await?;

        let user_id = rating.user_id.clone();
        let value = rating.value;
        record.add_rating(rating);

        let document = self.encode(&record)?;
        self.repository.update(id, &document).await?;

        info!(
            mcp_id = %id,
            user_id = %user_id,
            value,
            average = record.average_rating,
            "[McpAppService] Rated MCP"
        );

        self.event_sender.emit(DomainEvent::McpRated {
            mcp_id: id.to_string(),
            user_id,
            value,
            average_rating: record.average_rating,
        });

        Ok(record)
    }

    /// Count one download
    ///
    /// Emits: `McpDownloaded`
    pub async fn record_download(&self, id: &str) -> ServiceResult<u64> {
        let _guard = self.lock_record(id).await;
        let mut record = self.load(id).await?;
        let downloads = record.record_download();

        let document = self.encode(&record)?;
        self.repository.update(id, &document).await?;

        self.event_sender.emit(DomainEvent::McpDownloaded {
            mcp_id: id.to_string(),
            downloads,
        });

        Ok(downloads)
    }

    /// Delete an MCP
    ///
    /// Emits: `McpDeleted`
    pub async fn delete(&self, id: &str) -> ServiceResult<()> {
        let guard = self.lock_record(id).await;
        let deleted = self.repository.delete(id).await?;
        drop(guard);
        self.write_locks.lock().await.remove(id);

        if !deleted {
            return Err(McpServiceError::NotFound(id.to_string()));
        }

        info!(mcp_id = %id, "[McpAppService] Deleted MCP");

        self.event_sender.emit(DomainEvent::McpDeleted {
            mcp_id: id.to_string(),
        });

        Ok(())
    }

    /// Get an MCP by ID
    pub async fn get(&self, id: &str) -> ServiceResult<McpExtended> {
        self.load(id).await
    }

    /// All readable MCPs. Records that fail validation are skipped.
    pub async fn list(&self) -> ServiceResult<Vec<McpExtended>> {
        let documents = self.repository.list().await?;
        Ok(documents
            .iter()
            .filter_map(|document| match self.validator.validate_extended(document) {
                Ok(record) => Some(record),
                Err(errors) => {
                    warn!(
                        mcp_id = document.get("id").and_then(|v| v.as_str()).unwrap_or("?"),
                        violations = errors.len(),
                        "[McpAppService] Skipping invalid stored MCP"
                    );
                    None
                }
            })
            .collect())
    }

    /// MCPs published by one owner
    pub async fn list_by_owner(&self, owner_id: &str) -> ServiceResult<Vec<McpExtended>> {
        let records = self.list().await?;
        Ok(records
            .into_iter()
            .filter(|r| r.is_owned_by(owner_id))
            .collect())
    }

    /// Browsable snapshot of every readable MCP
    pub async fn catalog(&self) -> ServiceResult<McpCatalog> {
        Ok(McpCatalog::new(self.list().await?))
    }

    /// Exclusive write access to one MCP until the guard drops
    async fn lock_record(&self, id: &str) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.write_locks.lock().await;
            locks
                .entry(id.to_string())
                .or_insert_with(|| Arc::new(Mutex::new(())))
                .clone()
        };
        lock.lock_owned().await
    }

    async fn load(&self, id: &str) -> ServiceResult<McpExtended> {
        let document = self
            .repository
            .get(id)
            .await?
            .ok_or_else(|| McpServiceError::NotFound(id.to_string()))?;

        self.validator
            .validate_extended(&document)
            .map_err(|errors| {
                warn!(
                    mcp_id = %id,
                    violations = errors.len(),
                    "[McpAppService] Stored MCP failed validation"
                );
                McpServiceError::CorruptRecord {
                    id: id.to_string(),
                    errors,
                }
            })
    }

    fn encode(&self, record: &McpExtended) -> ServiceResult<Value> {
        let document = serde_json::to_value(record)
            .with_context(|| format!("Failed to encode MCP {}", record.id))?;
        Ok(document)
    }
}

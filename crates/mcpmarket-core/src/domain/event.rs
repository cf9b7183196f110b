//! Domain Events - marketplace changes broadcast on the event bus
//!
//! Events are emitted by [`crate::application::McpAppService`] after a change
//! has been persisted. They are facts: consumers never mutate them.

use serde::{Deserialize, Serialize};

/// Everything that can happen to an MCP in the marketplace
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DomainEvent {
    /// A new MCP was accepted and stored
    McpPublished {
        mcp_id: String,
        name: String,
        owner_id: String,
        is_public: bool,
    },

    /// An existing MCP was edited
    McpUpdated {
        mcp_id: String,
        /// Wire names of the fields that changed
        changed_fields: Vec<String>,
    },

    /// A rating was appended
    McpRated {
        mcp_id: String,
        user_id: String,
        value: f64,
        average_rating: f64,
    },

    McpDownloaded {
        mcp_id: String,
        downloads: u64,
    },

    McpDeleted {
        mcp_id: String,
    },
}

impl DomainEvent {
    /// Stable event name for logging
    pub fn type_name(&self) -> &'static str {
        match self {
            DomainEvent::McpPublished { .. } => "mcp_published",
            DomainEvent::McpUpdated { .. } => "mcp_updated",
            DomainEvent::McpRated { .. } => "mcp_rated",
            DomainEvent::McpDownloaded { .. } => "mcp_downloaded",
            DomainEvent::McpDeleted { .. } => "mcp_deleted",
        }
    }

    /// ID of the MCP the event is about
    pub fn mcp_id(&self) -> &str {
        match self {
            DomainEvent::McpPublished { mcp_id, .. }
            | DomainEvent::McpUpdated { mcp_id, .. }
            | DomainEvent::McpRated { mcp_id, .. }
            | DomainEvent::McpDownloaded { mcp_id, .. }
            | DomainEvent::McpDeleted { mcp_id } => mcp_id,
        }
    }
}

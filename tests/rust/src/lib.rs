//! Shared test utilities and fixtures for McpMarket integration tests.

pub use mcpmarket_core::domain::{
    DomainEvent, Mcp, McpCreate, McpExtended, McpFunction, McpOwner, McpParameter, McpRating,
    McpReturns, McpUpdate,
};

pub use mocks::MockRepositories;

/// Install a test-friendly tracing subscriber once per test binary.
///
/// Honors `RUST_LOG`; defaults to debug output from the core crate.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,mcpmarket_core=debug"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}

/// Event testing utilities
pub mod events {
    use mcpmarket_core::{DomainEvent, EventReceiver};

    /// Drain every event already delivered to a receiver
    pub fn drain(rx: &mut EventReceiver) -> Vec<DomainEvent> {
        let mut events = Vec::new();
        while let Some(event) = rx.try_recv() {
            events.push(event);
        }
        events
    }

    /// Event type names, in emission order
    pub fn type_names(events: &[DomainEvent]) -> Vec<&'static str> {
        events.iter().map(|e| e.type_name()).collect()
    }
}

/// Test fixture utilities
pub mod fixtures {
    use serde_json::{json, Value};

    use super::*;

    /// Minimal valid create payload
    pub fn classifier_json() -> Value {
        json!({
            "name": "Classifier",
            "description": "desc",
            "version": "1.0.0",
            "category": "nlp",
            "tags": ["nlp"],
            "functions": []
        })
    }

    /// Create payload with nested functions and metadata
    pub fn image_tagger_json() -> Value {
        json!({
            "name": "ImageTagger",
            "description": "Tags objects in images",
            "version": "2.1.0",
            "category": "vision",
            "tags": ["images", "tagging", "images"],
            "functions": [
                {
                    "name": "tag",
                    "description": "Return labels for an image",
                    "parameters": [
                        { "name": "image", "type": "base64", "description": "Image bytes", "required": true },
                        {
                            "name": "threshold",
                            "type": "number",
                            "description": "Minimum confidence",
                            "default": 0.5,
                            "example": 0.8
                        },
                        {
                            "name": "language",
                            "type": "string",
                            "description": "Label language",
                            "enum": ["en", "it", "de"]
                        }
                    ],
                    "returns": {
                        "type": "string[]",
                        "description": "Labels",
                        "example": ["cat", "sofa"]
                    }
                }
            ],
            "metadata": { "license": "MIT", "gpu": true },
            "isPublic": false
        })
    }

    pub fn rating_json(user_id: &str, value: Value) -> Value {
        json!({
            "userId": user_id,
            "userName": format!("User {}", user_id),
            "value": value,
            "comment": "Works well",
            "createdAt": "2023-01-01T00:00:00Z"
        })
    }

    pub fn test_owner() -> McpOwner {
        McpOwner::new("owner-1", "Alice")
    }

    /// Fully populated stored record as JSON
    pub fn extended_json() -> Value {
        json!({
            "id": "mcp-1",
            "owner": { "id": "owner-1", "name": "Alice" },
            "name": "ImageTagger",
            "description": "Tags objects in images",
            "version": "2.1.0",
            "category": "vision",
            "tags": ["images"],
            "functions": [
                {
                    "name": "tag",
                    "description": "Return labels for an image",
                    "parameters": [
                        { "name": "image", "type": "base64", "description": "Image bytes", "required": true }
                    ],
                    "returns": { "type": "string[]", "description": "Labels" }
                }
            ],
            "metadata": { "license": "MIT" },
            "ratings": [
                {
                    "userId": "u1",
                    "userName": "Bob",
                    "value": 4,
                    "createdAt": "2023-01-02T10:30:00Z"
                },
                {
                    "userId": "u2",
                    "userName": "Carol",
                    "value": 4.5,
                    "comment": "Fast",
                    "createdAt": "2023-01-03T08:00:00.250Z"
                }
            ],
            "averageRating": 4.3,
            "downloads": 12,
            "isPublic": true,
            "createdAt": "2023-01-01T00:00:00Z",
            "updatedAt": "2023-01-03T08:00:00.250Z"
        })
    }
}

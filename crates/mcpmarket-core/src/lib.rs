//! # McpMarket Core Library
//!
//! Document model, validation and business rules for the MCP marketplace.
//!
//! ## Modules
//!
//! - `domain` - MCP documents (create, update, persisted record), ratings, events
//! - `schema` - Validator turning untrusted JSON into typed documents
//! - `version` - Version label rules
//! - `catalog` - Marketplace browsing queries
//! - `repository` - Data access traits
//! - `application` - Application services with event emission
//! - `event_bus` - Central event distribution system

pub mod application;
pub mod catalog;
pub mod domain;
pub mod event_bus;
pub mod repository;
pub mod schema;
pub mod version;

// Re-export commonly used types
pub use domain::*;
pub use repository::*;
pub use schema::{
    validate_create, validate_extended, validate_function, validate_parameter, validate_rating,
    validate_update, ValidationError, ValidationErrors, ValidationOptions, Validator,
};

// Event-driven architecture exports
pub use application::{McpAppService, McpServiceError};
pub use catalog::McpCatalog;
pub use event_bus::{create_shared_event_bus, EventBus, EventReceiver, EventSender, SharedEventBus};

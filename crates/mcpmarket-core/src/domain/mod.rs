//! Domain entities and events
//!
//! This module contains all domain-level types for McpMarket:
//! - MCP documents (McpCreate, McpUpdate, McpExtended and their parts)
//! - Rating aggregation
//! - Domain Events (DomainEvent enum for event-driven architecture)

mod event;
mod mcp;
pub mod rating;

pub use event::DomainEvent;
pub use mcp::*;
pub use rating::{average_rating, MAX_RATING, MIN_RATING};

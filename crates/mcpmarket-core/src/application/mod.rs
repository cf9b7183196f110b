//! Application Services - Orchestration layer with event emission
//!
//! Application services sit between the presentation layer (HTTP handlers,
//! form submissions) and the domain layer (validator, repositories). They:
//!
//! 1. **Validate** untrusted input and stored documents
//! 2. **Apply** the MCP lifecycle (publish, update, rate, download)
//! 3. **Persist** through repository traits
//! 4. **Emit events** after successful operations via the event bus
//!
//! # Architecture
//!
//! ```text
//! Presentation Layer (HTTP handlers, forms)
//!         │
//!         ▼
//! ┌─────────────────────────────────────┐
//! │      Application Services           │
//! │  ┌─────────────────────────────┐    │
//! │  │ McpAppService               │    │
//! │  └─────────────┬───────────────┘    │
//! │                │                    │
//! │                ▼                    │
//! │         ┌──────────┐                │
//! │         │Event Bus │                │
//! │         └──────────┘                │
//! └─────────────────────────────────────┘
//!         │
//!         ▼
//! Domain Layer (Validator, Repositories)
//! ```

mod mcp;

pub use mcp::{McpAppService, McpServiceError, ServiceResult};

//! Application service tests
//!
//! Tests for the MCP application service that validates input, persists
//! documents and emits domain events.

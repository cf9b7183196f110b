//! Schema validation tests
//!
//! Behavioral properties of the MCP document validator as seen by its
//! collaborators: API handlers, form layers and stored-record readers.

mod documents;
mod round_trip;

//! Marketplace catalog
//!
//! Read-only browsing queries over a set of persisted MCPs: lookup, filtering
//! by category/tag/owner, free-text search and rankings.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use crate::domain::McpExtended;

/// Snapshot of marketplace entries, in repository order
#[derive(Debug, Clone, Default)]
pub struct McpCatalog {
    entries: Vec<McpExtended>,
}

impl McpCatalog {
    pub fn new(entries: Vec<McpExtended>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[McpExtended] {
        &self.entries
    }

    /// Get an MCP by ID
    pub fn get(&self, id: &str) -> Option<&McpExtended> {
        self.entries.iter().find(|m| m.id == id)
    }

    /// Entries visible to everyone
    pub fn public(&self) -> Vec<&McpExtended> {
        self.entries.iter().filter(|m| m.is_public).collect()
    }

    /// Filter by category (case-insensitive)
    pub fn by_category(&self, category: &str) -> Vec<&McpExtended> {
        self.entries
            .iter()
            .filter(|m| m.mcp.category.eq_ignore_ascii_case(category))
            .collect()
    }

    /// Filter by tag (case-insensitive)
    pub fn by_tag(&self, tag: &str) -> Vec<&McpExtended> {
        self.entries
            .iter()
            .filter(|m| m.mcp.tags.iter().any(|t| t.eq_ignore_ascii_case(tag)))
            .collect()
    }

    /// Everything published by one owner, public or not
    pub fn by_owner(&self, owner_id: &str) -> Vec<&McpExtended> {
        self.entries
            .iter()
            .filter(|m| m.is_owned_by(owner_id))
            .collect()
    }

    /// Search by name, description, category or tags
    pub fn search(&self, query: &str) -> Vec<&McpExtended> {
        let query_lower = query.to_lowercase();
        self.entries
            .iter()
            .filter(|m| {
                m.mcp.name.to_lowercase().contains(&query_lower)
                    || m.mcp.description.to_lowercase().contains(&query_lower)
                    || m.mcp.category.to_lowercase().contains(&query_lower)
                    || m
                        .mcp
                        .tags
                        .iter()
                        .any(|t| t.to_lowercase().contains(&query_lower))
            })
            .collect()
    }

    /// Highest average rating first; ties go to the MCP with more ratings
    pub fn top_rated(&self, limit: usize) -> Vec<&McpExtended> {
        let mut ranked: Vec<&McpExtended> = self.entries.iter().collect();
        ranked.sort_by(|a, b| {
            b.average_rating
                .partial_cmp(&a.average_rating)
                .unwrap_or(Ordering::Equal)
                .then_with(|| b.ratings.len().cmp(&a.ratings.len()))
        });
        ranked.truncate(limit);
        ranked
    }

    pub fn most_downloaded(&self, limit: usize) -> Vec<&McpExtended> {
        let mut ranked: Vec<&McpExtended> = self.entries.iter().collect();
        ranked.sort_by(|a, b| b.downloads.cmp(&a.downloads));
        ranked.truncate(limit);
        ranked
    }

    /// Distinct categories, sorted
    pub fn categories(&self) -> Vec<&str> {
        self.entries
            .iter()
            .map(|m| m.mcp.category.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

impl From<Vec<McpExtended>> for McpCatalog {
    fn from(entries: Vec<McpExtended>) -> Self {
        Self::new(entries)
    }
}

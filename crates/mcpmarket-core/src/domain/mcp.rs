//! MCP document model
//!
//! An MCP is a versioned description of an AI model's callable interface:
//! a list of functions with typed parameters and return shapes. The same
//! document appears in three forms:
//!
//! - [`McpCreate`] - submitted by a publisher
//! - [`McpUpdate`] - a partial edit, every field optional
//! - [`McpExtended`] - the persisted record with identity, owner and counters
//!
//! All types serialize to camelCase JSON and round-trip without loss.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use super::rating::average_rating;

pub(crate) fn default_true() -> bool {
    true
}

/// One input parameter of an [`McpFunction`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct McpParameter {
    /// Parameter identifier (non-empty)
    pub name: String,

    /// Free-form data type name ("string", "number", "ImageBuffer", ...)
    #[serde(rename = "type")]
    pub param_type: String,

    pub description: String,

    #[serde(default)]
    pub required: bool,

    /// Illustrative value, never checked against `param_type`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<Value>,

    /// Allowed values, informational only
    #[serde(rename = "enum", default, skip_serializing_if = "Option::is_none")]
    pub allowed_values: Option<Vec<Value>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
}

impl McpParameter {
    /// Create an optional parameter
    pub fn new(
        name: impl Into<String>,
        param_type: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            param_type: param_type.into(),
            description: description.into(),
            required: false,
            example: None,
            allowed_values: None,
            default: None,
        }
    }

    /// Mark the parameter as required
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_example(mut self, example: Value) -> Self {
        self.example = Some(example);
        self
    }

    pub fn with_allowed_values(mut self, values: Vec<Value>) -> Self {
        self.allowed_values = Some(values);
        self
    }

    pub fn with_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }
}

/// Return shape of an [`McpFunction`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct McpReturns {
    #[serde(rename = "type")]
    pub return_type: String,

    pub description: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<Value>,
}

impl McpReturns {
    pub fn new(return_type: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            return_type: return_type.into(),
            description: description.into(),
            example: None,
        }
    }
}

/// One callable operation exposed by an MCP
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct McpFunction {
    pub name: String,
    pub description: String,

    /// Display order is preserved
    pub parameters: Vec<McpParameter>,

    pub returns: McpReturns,
}

impl McpFunction {
    pub fn new(name: impl Into<String>, description: impl Into<String>, returns: McpReturns) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters: Vec::new(),
            returns,
        }
    }

    pub fn with_parameter(mut self, parameter: McpParameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    /// Parameters a caller must supply
    pub fn required_parameters(&self) -> Vec<&McpParameter> {
        self.parameters.iter().filter(|p| p.required).collect()
    }
}

/// A single user review of an MCP
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct McpRating {
    pub user_id: String,
    pub user_name: String,

    /// Score in `[1, 5]`, fractional scores allowed
    pub value: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,

    pub created_at: DateTime<Utc>,
}

impl McpRating {
    pub fn new(user_id: impl Into<String>, user_name: impl Into<String>, value: f64) -> Self {
        Self {
            user_id: user_id.into(),
            user_name: user_name.into(),
            value,
            comment: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }
}

/// Base MCP document shared by every variant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mcp {
    pub name: String,
    pub description: String,

    /// Free-form version label, see [`crate::version::is_semver`]
    pub version: String,

    pub category: String,

    /// Ordered, duplicates allowed
    pub tags: Vec<String>,

    pub functions: Vec<McpFunction>,

    /// Extension fields not otherwise modeled
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, Value>>,
}

impl Mcp {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        version: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            version: version.into(),
            category: category.into(),
            tags: Vec::new(),
            functions: Vec::new(),
            metadata: None,
        }
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    pub fn with_function(mut self, function: McpFunction) -> Self {
        self.functions.push(function);
        self
    }

    /// Look up a function by name
    pub fn function(&self, name: &str) -> Option<&McpFunction> {
        self.functions.iter().find(|f| f.name == name)
    }
}

/// Publisher attribution on a persisted MCP
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct McpOwner {
    pub id: String,
    pub name: String,
}

impl McpOwner {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Payload accepted when publishing a new MCP
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct McpCreate {
    #[serde(flatten)]
    pub mcp: Mcp,

    #[serde(default = "default_true")]
    pub is_public: bool,
}

impl McpCreate {
    pub fn new(mcp: Mcp) -> Self {
        Self {
            mcp,
            is_public: true,
        }
    }

    pub fn private(mut self) -> Self {
        self.is_public = false;
        self
    }
}

/// Partial edit of an MCP. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct McpUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub functions: Option<Vec<McpFunction>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_public: Option<bool>,
}

impl McpUpdate {
    /// Names of the fields this update touches, in wire form
    pub fn changed_fields(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        if self.name.is_some() {
            fields.push("name");
        }
        if self.description.is_some() {
            fields.push("description");
        }
        if self.version.is_some() {
            fields.push("version");
        }
        if self.category.is_some() {
            fields.push("category");
        }
        if self.tags.is_some() {
            fields.push("tags");
        }
        if self.functions.is_some() {
            fields.push("functions");
        }
        if self.metadata.is_some() {
            fields.push("metadata");
        }
        if self.is_public.is_some() {
            fields.push("isPublic");
        }
        fields
    }

    pub fn is_empty(&self) -> bool {
        self.changed_fields().is_empty()
    }
}

/// Persisted, display-ready MCP record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct McpExtended {
    #[serde(flatten)]
    pub mcp: Mcp,

    pub id: String,

    pub owner: McpOwner,

    #[serde(default)]
    pub ratings: Vec<McpRating>,

    /// Derived from `ratings`, kept in sync by [`McpExtended::add_rating`]
    #[serde(default)]
    pub average_rating: f64,

    #[serde(default)]
    pub downloads: u64,

    #[serde(default = "default_true")]
    pub is_public: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl McpExtended {
    /// Turn an accepted create payload into a stored record
    pub fn publish(create: McpCreate, owner: McpOwner) -> Self {
        let now = Utc::now();
        Self {
            mcp: create.mcp,
            id: Uuid::new_v4().to_string(),
            owner,
            ratings: Vec::new(),
            average_rating: 0.0,
            downloads: 0,
            is_public: create.is_public,
            created_at: now,
            updated_at: now,
        }
    }

    /// Merge a validated partial update.
    ///
    /// Returns the names of the fields that were written.
    pub fn apply_update(&mut self, update: McpUpdate) -> Vec<&'static str> {
        let changed = update.changed_fields();
        if changed.is_empty() {
            return changed;
        }

        if let Some(name) = update.name {
            self.mcp.name = name;
        }
        if let Some(description) = update.description {
            self.mcp.description = description;
        }
        if let Some(version) = update.version {
            self.mcp.version = version;
        }
        if let Some(category) = update.category {
            self.mcp.category = category;
        }
        if let Some(tags) = update.tags {
            self.mcp.tags = tags;
        }
        if let Some(functions) = update.functions {
            self.mcp.functions = functions;
        }
        if let Some(metadata) = update.metadata {
            self.mcp.metadata = Some(metadata);
        }
        if let Some(is_public) = update.is_public {
            self.is_public = is_public;
        }
        self.updated_at = Utc::now();

        changed
    }

    /// Append a validated rating and refresh `average_rating`
    pub fn add_rating(&mut self, rating: McpRating) {
        self.ratings.push(rating);
        self.average_rating = average_rating(&self.ratings);
    }

    pub fn record_download(&mut self) -> u64 {
        self.downloads = self.downloads.saturating_add(1);
        self.downloads
    }

    pub fn is_owned_by(&self, owner_id: &str) -> bool {
        self.owner.id == owner_id
    }
}

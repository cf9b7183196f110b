//! Validator configuration

use serde::{Deserialize, Serialize};

/// How many violations to collect per call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum ValidationMode {
    /// Report every violation (form submission, API error bodies)
    #[default]
    CollectAll,
    /// Stop at the first violation (programmatic guards)
    FailFast,
}

/// Treatment of keys the schema does not declare
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum UnknownFields {
    /// Ignore them. Stored documents written by newer versions stay readable.
    #[default]
    Strip,
    /// Report each one as an `UnrecognizedKey` violation
    Reject,
}

/// Options shared by every validation entry point
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct ValidationOptions {
    pub mode: ValidationMode,

    pub unknown_fields: UnknownFields,

    /// Require `version` to look like `1.2.3`. Off by default: the document
    /// schema accepts any string and the publish form enforces the pattern.
    pub require_semver_version: bool,
}

impl ValidationOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_fast(mut self) -> Self {
        self.mode = ValidationMode::FailFast;
        self
    }

    pub fn reject_unknown_fields(mut self) -> Self {
        self.unknown_fields = UnknownFields::Reject;
        self
    }

    pub fn require_semver_version(mut self) -> Self {
        self.require_semver_version = true;
        self
    }

    /// Load options from a JSON document. Missing keys take their defaults.
    pub fn from_json_str(json: &str) -> anyhow::Result<Self> {
        let options: Self = serde_json::from_str(json)
            .map_err(|e| anyhow::anyhow!("Invalid validation options: {}", e))?;
        Ok(options)
    }
}

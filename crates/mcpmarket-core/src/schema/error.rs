//! Validation violations
//!
//! Every failed validation returns a [`ValidationErrors`] list with one
//! [`ValidationError`] per violated field. Nothing in the validator panics or
//! stops at the first problem unless fail-fast mode was requested.

use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

use super::path::FieldPath;

/// JSON type a field was declared with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpectedType {
    String,
    Number,
    Integer,
    Boolean,
    Array,
    Object,
}

impl fmt::Display for ExpectedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExpectedType::String => "string",
            ExpectedType::Number => "number",
            ExpectedType::Integer => "integer",
            ExpectedType::Boolean => "boolean",
            ExpectedType::Array => "array",
            ExpectedType::Object => "object",
        };
        f.write_str(name)
    }
}

/// String formats checked beyond the plain type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum StringFormat {
    /// ISO-8601 / RFC 3339 date-time
    DateTime,
    /// `major.minor.patch`
    Semver,
}

impl fmt::Display for StringFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StringFormat::DateTime => f.write_str("date-time"),
            StringFormat::Semver => f.write_str("semver"),
        }
    }
}

/// What went wrong at a field
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum ViolationKind {
    /// Present, but of the wrong JSON type
    InvalidType { expected: ExpectedType },
    /// Absent with no default
    Required,
    /// Numeric value outside `[minimum, maximum]`
    OutOfRange { minimum: f64, maximum: f64 },
    /// Numeric value below `minimum`
    TooSmall { minimum: f64 },
    /// String that fails its format check
    InvalidFormat { format: StringFormat },
    /// Empty string where an identifier is needed
    Empty,
    /// Key not declared by the schema (reject mode only)
    UnrecognizedKey,
}

/// Name of the JSON type of a received value, `undefined` when absent
pub fn received_type(value: Option<&Value>) -> &'static str {
    match value {
        None => "undefined",
        Some(Value::Null) => "null",
        Some(Value::Bool(_)) => "boolean",
        Some(Value::Number(_)) => "number",
        Some(Value::String(_)) => "string",
        Some(Value::Array(_)) => "array",
        Some(Value::Object(_)) => "object",
    }
}

/// A single violation: where, what was expected, what arrived
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationError {
    pub path: FieldPath,

    #[serde(flatten)]
    pub kind: ViolationKind,

    /// Offending value, `None` when the field was missing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub received: Option<Value>,
}

impl ValidationError {
    pub fn new(path: FieldPath, kind: ViolationKind, received: Option<Value>) -> Self {
        Self {
            path,
            kind,
            received,
        }
    }

    /// Human-readable message without the path, for inline form errors
    pub fn message(&self) -> String {
        match &self.kind {
            ViolationKind::InvalidType { expected } => format!(
                "Expected {}, received {}",
                expected,
                received_type(self.received.as_ref())
            ),
            ViolationKind::Required => "Required".to_string(),
            ViolationKind::OutOfRange { minimum, maximum } => {
                format!("Number must be between {} and {}", minimum, maximum)
            }
            ViolationKind::TooSmall { minimum } => {
                format!("Number must be greater than or equal to {}", minimum)
            }
            ViolationKind::InvalidFormat { format } => format!("Invalid {}", format),
            ViolationKind::Empty => "String must not be empty".to_string(),
            ViolationKind::UnrecognizedKey => "Unrecognized key".to_string(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_root() {
            write!(f, "{}", self.message())
        } else {
            write!(f, "{}: {}", self.path, self.message())
        }
    }
}

fn summarize(errors: &[ValidationError]) -> String {
    let details = errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ");
    format!("{} validation error(s): {}", errors.len(), details)
}

/// Ordered, non-empty list of violations from one validation call
#[derive(Debug, Clone, PartialEq, Serialize, Error)]
#[serde(transparent)]
#[error("{}", summarize(.errors))]
pub struct ValidationErrors {
    errors: Vec<ValidationError>,
}

impl ValidationErrors {
    /// Wrap collected violations. Returns `None` for an empty list.
    pub fn from_vec(errors: Vec<ValidationError>) -> Option<Self> {
        if errors.is_empty() {
            None
        } else {
            Some(Self { errors })
        }
    }

    pub(crate) fn single(error: ValidationError) -> Self {
        Self {
            errors: vec![error],
        }
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ValidationError> {
        self.errors.iter()
    }

    pub fn as_slice(&self) -> &[ValidationError] {
        &self.errors
    }

    pub fn into_vec(self) -> Vec<ValidationError> {
        self.errors
    }

    /// Violations at exactly this path
    pub fn at(&self, path: &str) -> Vec<&ValidationError> {
        self.errors
            .iter()
            .filter(|e| e.path.to_string() == path)
            .collect()
    }

    /// Messages keyed by field path, for attaching to form inputs
    pub fn by_path(&self) -> BTreeMap<String, Vec<String>> {
        let mut map: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for error in &self.errors {
            map.entry(error.path.to_string())
                .or_default()
                .push(error.message());
        }
        map
    }
}

impl IntoIterator for ValidationErrors {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a ValidationError;
    type IntoIter = std::slice::Iter<'a, ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

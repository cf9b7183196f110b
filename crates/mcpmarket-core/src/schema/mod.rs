//! MCP Definition Validator
//!
//! Converts untrusted JSON (request bodies, stored records) into typed MCP
//! documents, or into a list of every violated field.
//!
//! ```ignore
//! let create = schema::validate_create(&body)?;
//! let record = McpExtended::publish(create, owner);
//! ```
//!
//! Validation is pure and synchronous: no I/O, no shared state, safe to call
//! from any number of tasks at once. Unknown keys are ignored unless
//! [`UnknownFields::Reject`] is configured, so documents written by newer
//! versions of the marketplace keep validating.

mod documents;
mod error;
mod options;
mod path;
mod validator;

pub use error::{
    received_type, ExpectedType, StringFormat, ValidationError, ValidationErrors, ViolationKind,
};
pub use options::{UnknownFields, ValidationMode, ValidationOptions};
pub use path::{FieldPath, PathSegment};

use serde_json::Value;
use tracing::debug;

use crate::domain::{McpCreate, McpExtended, McpFunction, McpParameter, McpRating, McpUpdate};
use validator::Context;

/// Validator bound to a set of [`ValidationOptions`]
#[derive(Debug, Clone, Default)]
pub struct Validator {
    options: ValidationOptions,
}

impl Validator {
    pub fn new(options: ValidationOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ValidationOptions {
        &self.options
    }

    /// Validate a publish payload. `isPublic` defaults to `true`.
    pub fn validate_create(&self, input: &Value) -> Result<McpCreate, ValidationErrors> {
        self.run("McpCreate", input, documents::create)
    }

    /// Validate a partial edit. `{}` is valid and yields an empty update.
    pub fn validate_update(&self, input: &Value) -> Result<McpUpdate, ValidationErrors> {
        self.run("McpUpdate", input, documents::update)
    }

    /// Validate a stored record
    pub fn validate_extended(&self, input: &Value) -> Result<McpExtended, ValidationErrors> {
        self.run("McpExtended", input, documents::extended)
    }

    pub fn validate_rating(&self, input: &Value) -> Result<McpRating, ValidationErrors> {
        self.run("McpRating", input, documents::rating)
    }

    pub fn validate_function(&self, input: &Value) -> Result<McpFunction, ValidationErrors> {
        self.run("McpFunction", input, documents::function)
    }

    pub fn validate_parameter(&self, input: &Value) -> Result<McpParameter, ValidationErrors> {
        self.run("McpParameter", input, documents::parameter)
    }

    fn run<T>(
        &self,
        shape: &'static str,
        input: &Value,
        parse: impl FnOnce(&mut Context<'_>, &Value, &FieldPath) -> Option<T>,
    ) -> Result<T, ValidationErrors> {
        let mut cx = Context::new(&self.options);
        let parsed = parse(&mut cx, input, &FieldPath::root());
        let result = cx.finish(parsed);
        if let Err(errors) = &result {
            debug!(
                shape,
                violations = errors.len(),
                errors = %errors,
                "[Validator] Rejected document"
            );
        }
        result
    }
}

/// [`Validator::validate_create`] with default options
pub fn validate_create(input: &Value) -> Result<McpCreate, ValidationErrors> {
    Validator::default().validate_create(input)
}

/// [`Validator::validate_update`] with default options
pub fn validate_update(input: &Value) -> Result<McpUpdate, ValidationErrors> {
    Validator::default().validate_update(input)
}

/// [`Validator::validate_extended`] with default options
pub fn validate_extended(input: &Value) -> Result<McpExtended, ValidationErrors> {
    Validator::default().validate_extended(input)
}

/// [`Validator::validate_rating`] with default options
pub fn validate_rating(input: &Value) -> Result<McpRating, ValidationErrors> {
    Validator::default().validate_rating(input)
}

/// [`Validator::validate_function`] with default options
pub fn validate_function(input: &Value) -> Result<McpFunction, ValidationErrors> {
    Validator::default().validate_function(input)
}

/// [`Validator::validate_parameter`] with default options
pub fn validate_parameter(input: &Value) -> Result<McpParameter, ValidationErrors> {
    Validator::default().validate_parameter(input)
}

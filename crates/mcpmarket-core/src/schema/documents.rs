//! Per-shape parsers for MCP documents
//!
//! Each parser reads every declared field before combining, so one call
//! reports all violations of a document. Nesting is fixed: document,
//! functions, parameters.

use serde_json::Value;

use super::error::{StringFormat, ViolationKind};
use super::path::FieldPath;
use super::validator::{
    any, array, boolean, date_time, non_empty_string, non_negative_integer, number,
    number_in_range, object, record, string, Context, Object,
};
use crate::domain::{
    Mcp, McpCreate, McpExtended, McpFunction, McpOwner, McpParameter, McpRating, McpReturns,
    McpUpdate, MAX_RATING, MIN_RATING,
};
use crate::version::is_semver;

const PARAMETER_KEYS: &[&str] = &[
    "name",
    "type",
    "description",
    "required",
    "example",
    "enum",
    "default",
];
const RETURNS_KEYS: &[&str] = &["type", "description", "example"];
const FUNCTION_KEYS: &[&str] = &["name", "description", "parameters", "returns"];
const RATING_KEYS: &[&str] = &["userId", "userName", "value", "comment", "createdAt"];
const OWNER_KEYS: &[&str] = &["id", "name"];
const CREATE_KEYS: &[&str] = &[
    "name",
    "description",
    "version",
    "category",
    "tags",
    "functions",
    "metadata",
    "isPublic",
];
const EXTENDED_KEYS: &[&str] = &[
    "name",
    "description",
    "version",
    "category",
    "tags",
    "functions",
    "metadata",
    "isPublic",
    "id",
    "owner",
    "ratings",
    "averageRating",
    "downloads",
    "createdAt",
    "updatedAt",
];

fn version_label(cx: &mut Context<'_>, value: &Value, path: &FieldPath) -> Option<String> {
    let version = string(cx, value, path)?;
    if cx.options().require_semver_version && !is_semver(&version) {
        cx.report(
            path,
            ViolationKind::InvalidFormat {
                format: StringFormat::Semver,
            },
            Some(value),
        );
        return None;
    }
    Some(version)
}

fn tag_list(cx: &mut Context<'_>, value: &Value, path: &FieldPath) -> Option<Vec<String>> {
    array(cx, value, path, string)
}

fn function_list(cx: &mut Context<'_>, value: &Value, path: &FieldPath) -> Option<Vec<McpFunction>> {
    array(cx, value, path, function)
}

pub(crate) fn parameter(cx: &mut Context<'_>, value: &Value, path: &FieldPath) -> Option<McpParameter> {
    let obj = object(cx, value, path)?;

    let name = obj.required(cx, "name", non_empty_string);
    let param_type = obj.required(cx, "type", string);
    let description = obj.required(cx, "description", string);
    let required = obj.defaulted(cx, "required", boolean, || false);
    let example = obj.optional(cx, "example", any);
    let allowed_values = obj.optional(cx, "enum", |cx, v, p| array(cx, v, p, any));
    let default = obj.optional(cx, "default", any);
    obj.check_unknown(cx, PARAMETER_KEYS);

    Some(McpParameter {
        name: name?,
        param_type: param_type?,
        description: description?,
        required: required?,
        example: example?,
        allowed_values: allowed_values?,
        default: default?,
    })
}

fn return_shape(cx: &mut Context<'_>, value: &Value, path: &FieldPath) -> Option<McpReturns> {
    let obj = object(cx, value, path)?;

    let return_type = obj.required(cx, "type", string);
    let description = obj.required(cx, "description", string);
    let example = obj.optional(cx, "example", any);
    obj.check_unknown(cx, RETURNS_KEYS);

    Some(McpReturns {
        return_type: return_type?,
        description: description?,
        example: example?,
    })
}

pub(crate) fn function(cx: &mut Context<'_>, value: &Value, path: &FieldPath) -> Option<McpFunction> {
    let obj = object(cx, value, path)?;

    let name = obj.required(cx, "name", string);
    let description = obj.required(cx, "description", string);
    let parameters = obj.required(cx, "parameters", |cx, v, p| array(cx, v, p, parameter));
    let returns = obj.required(cx, "returns", return_shape);
    obj.check_unknown(cx, FUNCTION_KEYS);

    Some(McpFunction {
        name: name?,
        description: description?,
        parameters: parameters?,
        returns: returns?,
    })
}

pub(crate) fn rating(cx: &mut Context<'_>, value: &Value, path: &FieldPath) -> Option<McpRating> {
    let obj = object(cx, value, path)?;

    let user_id = obj.required(cx, "userId", string);
    let user_name = obj.required(cx, "userName", string);
    let score = obj.required(cx, "value", |cx, v, p| {
        number_in_range(cx, v, p, MIN_RATING, MAX_RATING)
    });
    let comment = obj.optional(cx, "comment", string);
    let created_at = obj.required(cx, "createdAt", date_time);
    obj.check_unknown(cx, RATING_KEYS);

    Some(McpRating {
        user_id: user_id?,
        user_name: user_name?,
        value: score?,
        comment: comment?,
        created_at: created_at?,
    })
}

fn owner_ref(cx: &mut Context<'_>, value: &Value, path: &FieldPath) -> Option<McpOwner> {
    let obj = object(cx, value, path)?;

    let id = obj.required(cx, "id", non_empty_string);
    let name = obj.required(cx, "name", non_empty_string);
    obj.check_unknown(cx, OWNER_KEYS);

    Some(McpOwner {
        id: id?,
        name: name?,
    })
}

/// Base document fields shared by create and extended records
fn base(cx: &mut Context<'_>, obj: &Object<'_>) -> Option<Mcp> {
    let name = obj.required(cx, "name", string);
    let description = obj.required(cx, "description", string);
    let version = obj.required(cx, "version", version_label);
    let category = obj.required(cx, "category", string);
    let tags = obj.required(cx, "tags", tag_list);
    let functions = obj.required(cx, "functions", function_list);
    let metadata = obj.optional(cx, "metadata", record);

    Some(Mcp {
        name: name?,
        description: description?,
        version: version?,
        category: category?,
        tags: tags?,
        functions: functions?,
        metadata: metadata?,
    })
}

pub(crate) fn create(cx: &mut Context<'_>, value: &Value, path: &FieldPath) -> Option<McpCreate> {
    let obj = object(cx, value, path)?;

    let mcp = base(cx, &obj);
    let is_public = obj.defaulted(cx, "isPublic", boolean, || true);
    obj.check_unknown(cx, CREATE_KEYS);

    Some(McpCreate {
        mcp: mcp?,
        is_public: is_public?,
    })
}

pub(crate) fn update(cx: &mut Context<'_>, value: &Value, path: &FieldPath) -> Option<McpUpdate> {
    let obj = object(cx, value, path)?;

    let name = obj.optional(cx, "name", string);
    let description = obj.optional(cx, "description", string);
    let version = obj.optional(cx, "version", version_label);
    let category = obj.optional(cx, "category", string);
    let tags = obj.optional(cx, "tags", tag_list);
    let functions = obj.optional(cx, "functions", function_list);
    let metadata = obj.optional(cx, "metadata", record);
    let is_public = obj.optional(cx, "isPublic", boolean);
    obj.check_unknown(cx, CREATE_KEYS);

    Some(McpUpdate {
        name: name?,
        description: description?,
        version: version?,
        category: category?,
        tags: tags?,
        functions: functions?,
        metadata: metadata?,
        is_public: is_public?,
    })
}

pub(crate) fn extended(cx: &mut Context<'_>, value: &Value, path: &FieldPath) -> Option<McpExtended> {
    let obj = object(cx, value, path)?;

    let mcp = base(cx, &obj);
    let id = obj.required(cx, "id", non_empty_string);
    let owner = obj.required(cx, "owner", owner_ref);
    let ratings = obj.defaulted(cx, "ratings", |cx, v, p| array(cx, v, p, rating), Vec::new);
    let average_rating = obj.defaulted(cx, "averageRating", number, || 0.0);
    let downloads = obj.defaulted(cx, "downloads", non_negative_integer, || 0);
    let is_public = obj.defaulted(cx, "isPublic", boolean, || true);
    let created_at = obj.required(cx, "createdAt", date_time);
    let updated_at = obj.required(cx, "updatedAt", date_time);
    obj.check_unknown(cx, EXTENDED_KEYS);

    Some(McpExtended {
        mcp: mcp?,
        id: id?,
        owner: owner?,
        ratings: ratings?,
        average_rating: average_rating?,
        downloads: downloads?,
        is_public: is_public?,
        created_at: created_at?,
        updated_at: updated_at?,
    })
}

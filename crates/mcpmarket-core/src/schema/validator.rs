//! Recursive-descent building blocks
//!
//! A [`Context`] collects violations while field readers walk a
//! `serde_json::Value`. Each reader returns `None` after reporting, so a
//! document parser can read every field first and only then combine the
//! results with `?`, which keeps collect-all semantics without any unwinding.

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use super::error::{ExpectedType, StringFormat, ValidationError, ValidationErrors, ViolationKind};
use super::options::{UnknownFields, ValidationMode, ValidationOptions};
use super::path::FieldPath;

/// Violation sink for one validation call
pub(crate) struct Context<'o> {
    options: &'o ValidationOptions,
    errors: Vec<ValidationError>,
}

impl<'o> Context<'o> {
    pub(crate) fn new(options: &'o ValidationOptions) -> Self {
        Self {
            options,
            errors: Vec::new(),
        }
    }

    pub(crate) fn options(&self) -> &ValidationOptions {
        self.options
    }

    /// True once fail-fast mode has seen its first violation
    pub(crate) fn halted(&self) -> bool {
        self.options.mode == ValidationMode::FailFast && !self.errors.is_empty()
    }

    pub(crate) fn report(&mut self, path: &FieldPath, kind: ViolationKind, received: Option<&Value>) {
        if self.halted() {
            return;
        }
        self.errors
            .push(ValidationError::new(path.clone(), kind, received.cloned()));
    }

    fn report_type(&mut self, path: &FieldPath, expected: ExpectedType, received: &Value) {
        self.report(path, ViolationKind::InvalidType { expected }, Some(received));
    }

    pub(crate) fn finish<T>(self, value: Option<T>) -> Result<T, ValidationErrors> {
        if let Some(errors) = ValidationErrors::from_vec(self.errors) {
            return Err(errors);
        }
        // Readers report before returning None
        value.ok_or_else(|| {
            ValidationErrors::single(ValidationError::new(
                FieldPath::root(),
                ViolationKind::Required,
                None,
            ))
        })
    }
}

/// An input value known to be a JSON object
pub(crate) struct Object<'v> {
    map: &'v Map<String, Value>,
    path: FieldPath,
}

/// Require `value` to be an object
pub(crate) fn object<'v>(cx: &mut Context<'_>, value: &'v Value, path: &FieldPath) -> Option<Object<'v>> {
    match value {
        Value::Object(map) => Some(Object {
            map,
            path: path.clone(),
        }),
        other => {
            cx.report_type(path, ExpectedType::Object, other);
            None
        }
    }
}

impl<'v> Object<'v> {
    /// Read a field that must be present
    pub(crate) fn required<'o, T>(
        &self,
        cx: &mut Context<'o>,
        key: &str,
        parse: impl FnOnce(&mut Context<'o>, &'v Value, &FieldPath) -> Option<T>,
    ) -> Option<T> {
        if cx.halted() {
            return None;
        }
        let path = self.path.key(key);
        match self.map.get(key) {
            Some(value) => parse(cx, value, &path),
            None => {
                cx.report(&path, ViolationKind::Required, None);
                None
            }
        }
    }

    /// Read a field that may be absent. `Some(None)` means absent.
    pub(crate) fn optional<'o, T>(
        &self,
        cx: &mut Context<'o>,
        key: &str,
        parse: impl FnOnce(&mut Context<'o>, &'v Value, &FieldPath) -> Option<T>,
    ) -> Option<Option<T>> {
        if cx.halted() {
            return None;
        }
        match self.map.get(key) {
            Some(value) => parse(cx, value, &self.path.key(key)).map(Some),
            None => Some(None),
        }
    }

    /// Read a field, substituting `default` only when it is absent
    pub(crate) fn defaulted<'o, T>(
        &self,
        cx: &mut Context<'o>,
        key: &str,
        parse: impl FnOnce(&mut Context<'o>, &'v Value, &FieldPath) -> Option<T>,
        default: impl FnOnce() -> T,
    ) -> Option<T> {
        self.optional(cx, key, parse)
            .map(|value| value.unwrap_or_else(default))
    }

    /// Apply the unknown-field policy against the declared keys
    pub(crate) fn check_unknown(&self, cx: &mut Context<'_>, known: &[&str]) {
        if cx.options().unknown_fields == UnknownFields::Strip {
            return;
        }
        for (key, value) in self.map {
            if !known.contains(&key.as_str()) {
                cx.report(&self.path.key(key.as_str()), ViolationKind::UnrecognizedKey, Some(value));
            }
        }
    }
}

pub(crate) fn string(cx: &mut Context<'_>, value: &Value, path: &FieldPath) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        other => {
            cx.report_type(path, ExpectedType::String, other);
            None
        }
    }
}

/// A string with at least one character
pub(crate) fn non_empty_string(cx: &mut Context<'_>, value: &Value, path: &FieldPath) -> Option<String> {
    let s = string(cx, value, path)?;
    if s.is_empty() {
        cx.report(path, ViolationKind::Empty, Some(value));
        return None;
    }
    Some(s)
}

pub(crate) fn boolean(cx: &mut Context<'_>, value: &Value, path: &FieldPath) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        other => {
            cx.report_type(path, ExpectedType::Boolean, other);
            None
        }
    }
}

pub(crate) fn number(cx: &mut Context<'_>, value: &Value, path: &FieldPath) -> Option<f64> {
    match value.as_f64() {
        Some(n) if value.is_number() => Some(n),
        _ => {
            cx.report_type(path, ExpectedType::Number, value);
            None
        }
    }
}

/// A number within `[minimum, maximum]`
pub(crate) fn number_in_range(
    cx: &mut Context<'_>,
    value: &Value,
    path: &FieldPath,
    minimum: f64,
    maximum: f64,
) -> Option<f64> {
    let n = number(cx, value, path)?;
    if n < minimum || n > maximum {
        cx.report(path, ViolationKind::OutOfRange { minimum, maximum }, Some(value));
        return None;
    }
    Some(n)
}

/// A whole number `>= 0`. `3.0` counts as whole.
pub(crate) fn non_negative_integer(cx: &mut Context<'_>, value: &Value, path: &FieldPath) -> Option<u64> {
    if let Some(n) = value.as_u64() {
        return Some(n);
    }
    let n = number(cx, value, path)?;
    if n.fract() != 0.0 {
        cx.report_type(path, ExpectedType::Integer, value);
        return None;
    }
    if n < 0.0 {
        cx.report(path, ViolationKind::TooSmall { minimum: 0.0 }, Some(value));
        return None;
    }
    if n >= u64::MAX as f64 {
        cx.report_type(path, ExpectedType::Integer, value);
        return None;
    }
    Some(n as u64)
}

/// Any JSON value, including `null`
pub(crate) fn any(_cx: &mut Context<'_>, value: &Value, _path: &FieldPath) -> Option<Value> {
    Some(value.clone())
}

/// A string-keyed object of arbitrary values
pub(crate) fn record(cx: &mut Context<'_>, value: &Value, path: &FieldPath) -> Option<Map<String, Value>> {
    object(cx, value, path).map(|obj| obj.map.clone())
}

/// An ISO-8601 date-time string, normalized to UTC
pub(crate) fn date_time(cx: &mut Context<'_>, value: &Value, path: &FieldPath) -> Option<DateTime<Utc>> {
    let s = string(cx, value, path)?;
    match DateTime::parse_from_rfc3339(&s) {
        Ok(parsed) => Some(parsed.with_timezone(&Utc)),
        Err(_) => {
            cx.report(
                path,
                ViolationKind::InvalidFormat {
                    format: StringFormat::DateTime,
                },
                Some(value),
            );
            None
        }
    }
}

/// An array whose every element passes `element`. All elements are
/// visited even after a failure.
pub(crate) fn array<'o, 'v, T>(
    cx: &mut Context<'o>,
    value: &'v Value,
    path: &FieldPath,
    element: impl Fn(&mut Context<'o>, &'v Value, &FieldPath) -> Option<T>,
) -> Option<Vec<T>> {
    let items = match value {
        Value::Array(items) => items,
        other => {
            cx.report_type(path, ExpectedType::Array, other);
            return None;
        }
    };

    let mut parsed = Vec::with_capacity(items.len());
    let mut failed = false;
    for (index, item) in items.iter().enumerate() {
        if cx.halted() {
            return None;
        }
        match element(&mut *cx, item, &path.index(index)) {
            Some(value) => parsed.push(value),
            None => failed = true,
        }
    }
    if failed {
        None
    } else {
        Some(parsed)
    }
}

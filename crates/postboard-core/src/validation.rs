//! Field-level validation of post payloads.
//!
//! Payloads arrive as a loose JSON object (or a form flattened into one).
//! Every problem is collected per field so the client gets them all at once.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::domain::{Post, PostChanges};

pub const DEFAULT_NAME_MAX_LENGTH: usize = 255;

pub const NON_FIELD_ERRORS: &str = "non_field_errors";

pub const MSG_REQUIRED: &str = "This field is required.";
pub const MSG_NULL: &str = "This field may not be null.";
pub const MSG_BLANK: &str = "This field may not be blank.";
pub const MSG_INVALID_STRING: &str = "Not a valid string.";
pub const MSG_INVALID_BOOLEAN: &str = "Must be a valid boolean.";
pub const MSG_DUPLICATE_NAME: &str = "The author already has a post with this name.";

/// Limits applied to post fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PostLimits {
    pub name_max_length: usize,
}

impl Default for PostLimits {
    fn default() -> Self {
        Self {
            name_max_length: DEFAULT_NAME_MAX_LENGTH,
        }
    }
}

/// Validated fields for a post about to be created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostDraft {
    pub name: String,
    pub text: String,
    pub is_published: bool,
}

/// Per-field error messages, serialized as `{"field": ["message", ...]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, Vec<String>>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shorthand for a single error on a single field.
    pub fn single(field: &str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn has(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn messages(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn into_inner(self) -> BTreeMap<String, Vec<String>> {
        self.0
    }

    fn into_result<T>(self, value: T) -> Result<T, Self> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            for message in messages {
                if !first {
                    f.write_str("; ")?;
                }
                write!(f, "{field}: {message}")?;
                first = false;
            }
        }
        Ok(())
    }
}

/// Validate a create payload. `name` and `text` are required.
pub fn validate_create(
    fields: &Map<String, Value>,
    limits: &PostLimits,
) -> Result<PostDraft, ValidationErrors> {
    let mut errors = ValidationErrors::new();
    let changes = parse_changes(fields, &mut errors);

    for required in ["name", "text"] {
        if !fields.contains_key(required) {
            errors.add(required, MSG_REQUIRED);
        }
    }

    if let Some(name) = &changes.name {
        check_name(name, limits, &mut errors);
    }
    if let Some(text) = &changes.text {
        check_text(text, &mut errors);
    }

    match (changes.name, changes.text) {
        (Some(name), Some(text)) => errors.into_result(PostDraft {
            name,
            text,
            is_published: changes.is_published.unwrap_or(false),
        }),
        _ => Err(errors),
    }
}

/// Validate an update payload against the stored post and return the merged post.
///
/// Fields missing from the payload keep their stored values; the merged result
/// is checked with the same rules as creation.
pub fn validate_update(
    current: &Post,
    fields: &Map<String, Value>,
    limits: &PostLimits,
) -> Result<Post, ValidationErrors> {
    let mut errors = ValidationErrors::new();
    let changes = parse_changes(fields, &mut errors);

    let mut merged = current.clone();
    merged.apply(changes);

    if !errors.has("name") {
        check_name(&merged.name, limits, &mut errors);
    }
    if !errors.has("text") {
        check_text(&merged.text, &mut errors);
    }

    errors.into_result(merged)
}

/// Read the writable fields. Type problems go into `errors`; read-only and
/// unknown keys are ignored.
fn parse_changes(fields: &Map<String, Value>, errors: &mut ValidationErrors) -> PostChanges {
    PostChanges {
        name: fields
            .get("name")
            .and_then(|value| string_value("name", value, errors)),
        text: fields
            .get("text")
            .and_then(|value| string_value("text", value, errors)),
        is_published: fields
            .get("is_published")
            .and_then(|value| bool_value("is_published", value, errors)),
    }
}

fn string_value(field: &str, value: &Value, errors: &mut ValidationErrors) -> Option<String> {
    match value {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Null => {
            errors.add(field, MSG_NULL);
            None
        }
        Value::Bool(_) | Value::Array(_) | Value::Object(_) => {
            errors.add(field, MSG_INVALID_STRING);
            None
        }
    }
}

fn bool_value(field: &str, value: &Value, errors: &mut ValidationErrors) -> Option<bool> {
    let parsed = match value {
        Value::Bool(b) => Some(*b),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Some(true),
            "false" | "0" | "no" | "off" => Some(false),
            _ => None,
        },
        Value::Number(n) => match n.as_i64() {
            Some(1) => Some(true),
            Some(0) => Some(false),
            _ => None,
        },
        Value::Null => {
            errors.add(field, MSG_NULL);
            return None;
        }
        Value::Array(_) | Value::Object(_) => None,
    };

    if parsed.is_none() {
        errors.add(field, MSG_INVALID_BOOLEAN);
    }
    parsed
}

fn check_name(name: &str, limits: &PostLimits, errors: &mut ValidationErrors) {
    if name.is_empty() {
        errors.add("name", MSG_BLANK);
    } else if name.chars().count() > limits.name_max_length {
        errors.add(
            "name",
            format!(
                "Ensure this field has no more than {} characters.",
                limits.name_max_length
            ),
        );
    }
}

fn check_text(text: &str, errors: &mut ValidationErrors) {
    if text.is_empty() {
        errors.add("text", MSG_BLANK);
    }
}

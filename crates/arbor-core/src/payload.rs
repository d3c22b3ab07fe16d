//! Payload types attached to file nodes by loaders.

use std::any::Any;
use std::fmt;

use serde_json::Value;

/// Open extension point for caller-defined payload kinds.
///
/// Implementors supply a `kind` discriminant and `Any` access so consumers can
/// downcast back to the concrete type.
pub trait PayloadData: fmt::Debug + Send + Sync {
    /// Discriminant for this payload kind, e.g. `"javascript"`.
    fn kind(&self) -> &str;

    /// Borrow as `Any` for downcasting.
    fn as_any(&self) -> &dyn Any;

    /// Borrow as mutable `Any` for downcasting.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Plain-text file contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextPayload {
    /// UTF-8 contents of the file.
    pub content: String,
}

/// Parsed JSON document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonPayload {
    /// The parsed JSON value.
    pub value: Value,
}

/// Data a loader attached to a file node.
///
/// The tree engine stores whatever a loader returns and never inspects the
/// contents; consumers dispatch on [`Payload::kind`].
#[derive(Debug)]
pub enum Payload {
    /// Plain text, kind `"text"`.
    Text(TextPayload),
    /// Parsed JSON, kind `"json"`.
    Json(JsonPayload),
    /// Caller-defined payload, kind given by the implementation.
    Custom(Box<dyn PayloadData>),
}

impl Payload {
    /// Build a text payload.
    pub fn text(content: impl Into<String>) -> Self {
        Payload::Text(TextPayload {
            content: content.into(),
        })
    }

    /// Build a JSON payload.
    pub fn json(value: Value) -> Self {
        Payload::Json(JsonPayload { value })
    }

    /// The payload's discriminant: `"text"`, `"json"`, or the custom kind.
    pub fn kind(&self) -> &str {
        match self {
            Payload::Text(_) => "text",
            Payload::Json(_) => "json",
            Payload::Custom(data) => data.kind(),
        }
    }

    /// Borrow as a text payload.
    pub fn as_text(&self) -> Option<&TextPayload> {
        match self {
            Payload::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Borrow as a JSON payload.
    pub fn as_json(&self) -> Option<&JsonPayload> {
        match self {
            Payload::Json(json) => Some(json),
            _ => None,
        }
    }

    /// Borrow as a caller-defined payload.
    pub fn as_custom(&self) -> Option<&dyn PayloadData> {
        match self {
            Payload::Custom(data) => Some(data.as_ref()),
            _ => None,
        }
    }
}

impl From<TextPayload> for Payload {
    fn from(text: TextPayload) -> Self {
        Payload::Text(text)
    }
}

impl From<JsonPayload> for Payload {
    fn from(json: JsonPayload) -> Self {
        Payload::Json(json)
    }
}

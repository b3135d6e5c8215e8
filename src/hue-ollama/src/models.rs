//! Wire types for the Ollama API

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Generation request body for `POST /api/generate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub model: String,
    pub prompt: String,
    /// Always `false`; the client reads a single response body.
    pub stream: bool,
}

impl GenerateRequest {
    pub fn new(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
            stream: false,
        }
    }
}

/// Response of `GET /api/tags`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TagsResponse {
    #[serde(default)]
    pub models: Vec<ModelTag>,
}

/// An installed model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelTag {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified_at: Option<String>,
}

/// Field names that carry the whole generated text in non-Ollama servers.
const ALTERNATE_TEXT_FIELDS: [&str; 4] = ["text", "output_text", "completion", "content"];

/// Field names that carry a list of output fragments.
const FRAGMENT_FIELDS: [&str; 2] = ["output", "choices"];

/// A recognized generation response body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseShape {
    /// Ollama's own `response` field.
    Text(String),
    /// Full text under another known field.
    AlternateText { field: &'static str, text: String },
    /// Text pieces collected from a fragment list.
    Fragments(Vec<String>),
    /// Unrecognized body, used verbatim.
    Plain(String),
}

impl ResponseShape {
    /// Decode a response body. Returns `None` when the body holds no usable
    /// text: empty or whitespace only, or an Ollama body whose `response` is
    /// blank and that carries no other known text field.
    pub fn decode(body: &str) -> Option<Self> {
        if body.trim().is_empty() {
            return None;
        }

        let shape = match serde_json::from_str::<Value>(body) {
            Ok(Value::Object(map)) => match Self::from_object(&map) {
                Some(shape) => Some(shape),
                None if matches!(map.get("response"), Some(Value::String(_))) => return None,
                None => None,
            },
            _ => None,
        };
        Some(shape.unwrap_or_else(|| ResponseShape::Plain(body.to_string())))
    }

    fn from_object(map: &serde_json::Map<String, Value>) -> Option<Self> {
        if let Some(text) = non_empty_str(map.get("response")) {
            return Some(ResponseShape::Text(text));
        }

        for field in ALTERNATE_TEXT_FIELDS {
            if let Some(text) = non_empty_str(map.get(field)) {
                return Some(ResponseShape::AlternateText { field, text });
            }
        }
        if let Some(text) = non_empty_str(map.get("message").and_then(|m| m.get("content"))) {
            return Some(ResponseShape::AlternateText {
                field: "message.content",
                text,
            });
        }

        for field in FRAGMENT_FIELDS {
            if let Some(Value::Array(items)) = map.get(field) {
                let fragments: Vec<String> = items.iter().filter_map(fragment_text).collect();
                if !fragments.is_empty() {
                    return Some(ResponseShape::Fragments(fragments));
                }
            }
        }

        None
    }

    /// Short label for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            ResponseShape::Text(_) => "text",
            ResponseShape::AlternateText { .. } => "alternate-text",
            ResponseShape::Fragments(_) => "fragments",
            ResponseShape::Plain(_) => "plain",
        }
    }

    /// The generated text. Fragments are joined with newlines.
    pub fn into_text(self) -> String {
        match self {
            ResponseShape::Text(text)
            | ResponseShape::AlternateText { text, .. }
            | ResponseShape::Plain(text) => text,
            ResponseShape::Fragments(fragments) => fragments.join("\n"),
        }
    }
}

fn non_empty_str(value: Option<&Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.clone()),
        _ => None,
    }
}

/// Text carried by a single fragment, if any.
fn fragment_text(item: &Value) -> Option<String> {
    match item {
        Value::String(s) => Some(s.clone()).filter(|s| !s.trim().is_empty()),
        Value::Object(obj) => {
            let text = match obj.get("content") {
                Some(Value::Array(parts)) => {
                    let joined: Vec<String> = parts
                        .iter()
                        .filter_map(|part| match part {
                            Value::String(s) => Some(s.clone()),
                            _ => non_empty_str(part.get("text")),
                        })
                        .filter(|s| !s.trim().is_empty())
                        .collect();
                    Some(joined.join("\n")).filter(|s| !s.is_empty())
                }
                content => non_empty_str(content),
            };
            text.or_else(|| non_empty_str(obj.get("text")))
                .or_else(|| non_empty_str(obj.get("message").and_then(|m| m.get("content"))))
        }
        _ => None,
    }
}

//! Section values - the content held by one section of the document.
//!
//! Model output is untrusted, so conversion from JSON is total: strings
//! become text, arrays become item lists, and anything else is kept as its
//! JSON text rather than rejected.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Placeholder stored in sections that have no content yet.
pub const PLACEHOLDER: &str = "TBD";

/// Content of a single section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub enum SectionValue {
    /// Free text (including the `"TBD"` placeholder).
    Text(String),
    /// Structured list of items.
    List(Vec<SectionItem>),
}

/// One entry of a list-valued section.
#[derive(Debug, Clone, PartialEq)]
pub enum SectionItem {
    /// A bare string item.
    Plain(String),
    /// An object item, usually `{label, description}`.
    Entry(ItemEntry),
}

/// Object-shaped list item.
///
/// Keys other than `label` and `description` are preserved so the item
/// serializes back to what the model produced.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ItemEntry {
    pub label: Option<String>,
    pub description: Option<String>,
    pub other: Map<String, Value>,
}

impl SectionValue {
    /// The `"TBD"` placeholder value.
    pub fn placeholder() -> Self {
        SectionValue::Text(PLACEHOLDER.to_string())
    }

    /// Creates a text value.
    pub fn text(content: impl Into<String>) -> Self {
        SectionValue::Text(content.into())
    }

    /// Returns true if the section is empty or still holds the placeholder.
    ///
    /// Only unset sections may be overwritten by synthesized content.
    pub fn is_unset(&self) -> bool {
        match self {
            SectionValue::Text(text) => {
                let trimmed = text.trim();
                trimmed.is_empty() || trimmed == PLACEHOLDER
            }
            SectionValue::List(items) => items.is_empty(),
        }
    }

    /// Parses text typed into the section editor.
    ///
    /// Text that parses as a JSON array is stored as a list; everything else
    /// is stored as trimmed text.
    pub fn from_edit(raw: &str) -> Self {
        let trimmed = raw.trim();
        match serde_json::from_str::<Value>(trimmed) {
            Ok(Value::Array(items)) => {
                SectionValue::List(items.into_iter().map(SectionItem::from).collect())
            }
            _ => SectionValue::Text(trimmed.to_string()),
        }
    }

    /// Renders the value on a single line for model context.
    ///
    /// List items are joined with `"; "`.
    pub fn render_inline(&self) -> String {
        match self {
            SectionValue::Text(text) => text.clone(),
            SectionValue::List(items) => items
                .iter()
                .map(SectionItem::render_inline)
                .collect::<Vec<_>>()
                .join("; "),
        }
    }

    /// Renders the value as multi-line plain text (one item per line).
    pub fn render_block(&self) -> String {
        match self {
            SectionValue::Text(text) => text.trim().to_string(),
            SectionValue::List(items) => items
                .iter()
                .map(|item| format!("- {}", item.render_inline()))
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }
}

impl Default for SectionValue {
    fn default() -> Self {
        Self::placeholder()
    }
}

impl SectionItem {
    /// Renders a list item the way the preview lists it.
    pub fn render_inline(&self) -> String {
        match self {
            SectionItem::Plain(text) => text.clone(),
            SectionItem::Entry(entry) => entry.render_inline(),
        }
    }
}

impl ItemEntry {
    fn render_inline(&self) -> String {
        match (&self.label, &self.description) {
            (Some(label), Some(description)) => format!("{}: {}", label, description),
            (Some(label), None) => label.clone(),
            (None, Some(description)) => description.clone(),
            (None, None) => self.other.keys().cloned().collect::<Vec<_>>().join(", "),
        }
    }
}

impl From<Value> for SectionValue {
    fn from(value: Value) -> Self {
        match value {
            Value::String(text) => SectionValue::Text(text),
            Value::Array(items) => {
                SectionValue::List(items.into_iter().map(SectionItem::from).collect())
            }
            Value::Null => SectionValue::Text(String::new()),
            other => SectionValue::Text(other.to_string()),
        }
    }
}

impl From<SectionValue> for Value {
    fn from(value: SectionValue) -> Self {
        match value {
            SectionValue::Text(text) => Value::String(text),
            SectionValue::List(items) => Value::Array(items.into_iter().map(Value::from).collect()),
        }
    }
}

impl From<Value> for SectionItem {
    fn from(value: Value) -> Self {
        match value {
            Value::String(text) => SectionItem::Plain(text),
            Value::Object(mut map) => {
                let label = take_string(&mut map, "label");
                let description = take_string(&mut map, "description");
                SectionItem::Entry(ItemEntry {
                    label,
                    description,
                    other: map,
                })
            }
            other => SectionItem::Plain(other.to_string()),
        }
    }
}

impl From<SectionItem> for Value {
    fn from(item: SectionItem) -> Self {
        match item {
            SectionItem::Plain(text) => Value::String(text),
            SectionItem::Entry(entry) => {
                let mut map = Map::new();
                if let Some(label) = entry.label {
                    map.insert("label".to_string(), Value::String(label));
                }
                if let Some(description) = entry.description {
                    map.insert("description".to_string(), Value::String(description));
                }
                map.extend(entry.other);
                Value::Object(map)
            }
        }
    }
}

/// Removes `key` from the map only when it holds a string.
fn take_string(map: &mut Map<String, Value>, key: &str) -> Option<String> {
    match map.get(key) {
        Some(Value::String(_)) => match map.remove(key) {
            Some(Value::String(text)) => Some(text),
            _ => None,
        },
        _ => None,
    }
}

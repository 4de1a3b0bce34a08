//! Content blocks returned by text providers.

use serde::{Deserialize, Serialize};

/// A content block from a text provider, in the order the provider returned it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Output {
    /// Plain text
    Text(String),
    /// Tool calls requested by the model
    ToolCalls(Vec<ToolCall>),
    /// Any other block, preserved as raw JSON
    Json(serde_json::Value),
}

impl Output {
    /// Short name of the block kind, used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Output::Text(_) => "text",
            Output::ToolCalls(_) => "tool_calls",
            Output::Json(_) => "json",
        }
    }
}

/// A tool call made by the model.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ToolCall {
    /// Provider-assigned identifier
    pub id: String,
    /// Tool name
    pub name: String,
    /// Arguments as JSON
    pub arguments: serde_json::Value,
}

//! Conversation turn types shared by the loop, the provider, and the tool transport.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Prefix put in front of tool output when it is fed back to the model.
pub const TOOL_RESULT_PREFIX: &str = "Tool result : ";

/// One entry in the conversation history.
///
/// A turn always carries at least one part.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Turn {
    role: Role,
    parts: Vec<Part>,
}

impl Turn {
    /// Create a user turn holding a single text part.
    pub fn user(text: impl Into<String>) -> Self {
        Self::single(Role::User, Part::text(text))
    }

    /// Create a model turn holding a single text part.
    pub fn model(text: impl Into<String>) -> Self {
        Self::single(Role::Model, Part::text(text))
    }

    /// Model turn announcing that `request` is about to be executed.
    pub fn tool_announcement(request: &ToolInvocationRequest) -> Self {
        Self::single(Role::Model, Part::tool_call(request.clone()))
    }

    /// User turn feeding tool output back to the model.
    pub fn tool_result(text: &str) -> Self {
        Self::user(format!("{TOOL_RESULT_PREFIX}{text}"))
    }

    fn single(role: Role, part: Part) -> Self {
        Self {
            role,
            parts: vec![part],
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    /// Concatenated text of all parts.
    pub fn text(&self) -> String {
        self.parts
            .iter()
            .map(|part| part.text.as_str())
            .collect::<Vec<_>>()
            .join("")
    }
}

/// Author of a turn.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

/// Kind tag carried by every part.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PartKind {
    #[default]
    Text,
}

/// A content fragment within a turn.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Part {
    pub text: String,
    #[serde(rename = "type", default)]
    pub kind: PartKind,
    /// Present only on model parts that stand for a function call.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function_call: Option<ToolInvocationRequest>,
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: PartKind::Text,
            function_call: None,
        }
    }

    /// Part recording a tool call, with a readable announcement as its text.
    pub fn tool_call(request: ToolInvocationRequest) -> Self {
        Self {
            text: format!("calling tool {}", request.name),
            kind: PartKind::Text,
            function_call: Some(request),
        }
    }
}

/// The model's structured request to call a named tool.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolInvocationRequest {
    pub name: String,
    #[serde(default)]
    pub arguments: serde_json::Map<String, serde_json::Value>,
}

impl ToolInvocationRequest {
    pub fn new(name: impl Into<String>, arguments: serde_json::Value) -> Self {
        let arguments = match arguments {
            serde_json::Value::Object(map) => map,
            _ => serde_json::Map::new(),
        };
        Self {
            name: name.into(),
            arguments,
        }
    }
}

/// Output returned by executing a tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ToolExecutionResult {
    pub content: Vec<ResultContent>,
}

/// One entry of a tool result.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResultContent {
    pub text: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl ToolExecutionResult {
    /// Result with a single text entry.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![ResultContent {
                text: text.into(),
                kind: Some("text".into()),
            }],
        }
    }

    /// Text of the first entry, if it is non-empty.
    ///
    /// Later entries are ignored.
    pub fn first_text(&self) -> Option<&str> {
        self.content
            .first()
            .map(|entry| entry.text.as_str())
            .filter(|text| !text.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn constructors_always_carry_one_part() {
        for turn in [Turn::user("hi"), Turn::model("hello"), Turn::tool_result("ok")] {
            assert_eq!(turn.parts().len(), 1);
        }
    }

    #[test]
    fn tool_announcement_keeps_the_request() {
        let request = ToolInvocationRequest::new("createPost", json!({"status": "hi"}));
        let turn = Turn::tool_announcement(&request);
        assert_eq!(turn.role(), Role::Model);
        assert_eq!(turn.text(), "calling tool createPost");
        assert_eq!(turn.parts()[0].function_call.as_ref(), Some(&request));
    }

    #[test]
    fn tool_result_turn_is_prefixed() {
        let turn = Turn::tool_result("Tweeted: hello");
        assert_eq!(turn.role(), Role::User);
        assert_eq!(turn.text(), "Tool result : Tweeted: hello");
    }

    #[test]
    fn first_text_ignores_later_entries_and_empty_text() {
        let result = ToolExecutionResult {
            content: vec![
                ResultContent {
                    text: "first".into(),
                    kind: None,
                },
                ResultContent {
                    text: "second".into(),
                    kind: Some("text".into()),
                },
            ],
        };
        assert_eq!(result.first_text(), Some("first"));
        assert_eq!(ToolExecutionResult::text("").first_text(), None);
        assert_eq!(ToolExecutionResult::default().first_text(), None);
    }

    #[test]
    fn non_object_arguments_become_empty() {
        let request = ToolInvocationRequest::new("createPost", json!("oops"));
        assert!(request.arguments.is_empty());
    }

    #[test]
    fn part_serializes_kind_as_type() {
        let value = serde_json::to_value(Part::text("hello")).expect("serialize");
        assert_eq!(value, json!({"text": "hello", "type": "text"}));
    }
}

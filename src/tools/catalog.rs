//! Tool catalog adapter: turns tool-server schemas into function declarations.

use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::CatalogError;

/// A tool as the tool server describes itself.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RawToolDescriptor {
    pub name: String,
    pub description: Option<String>,
    pub input_schema: serde_json::Value,
}

/// A callable function as the model sees it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolDescriptor {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub parameters: ToolParameters,
}

/// JSON-Schema-like parameter object of a tool.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolParameters {
    #[serde(rename = "type")]
    pub kind: String,
    pub properties: serde_json::Map<String, serde_json::Value>,
    pub required: BTreeSet<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<serde_json::Value>,
}

/// The tools known to a session, fetched once at startup.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToolCatalog {
    tools: Vec<ToolDescriptor>,
}

impl ToolCatalog {
    pub fn descriptors(&self) -> &[ToolDescriptor] {
        &self.tools
    }

    pub fn get(&self, name: &str) -> Option<&ToolDescriptor> {
        self.tools.iter().find(|tool| tool.name == name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.tools.iter().map(|tool| tool.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

/// Adapt every raw descriptor, failing on the first one that cannot be exposed.
pub fn adapt(raw: &[RawToolDescriptor]) -> Result<ToolCatalog, CatalogError> {
    let mut seen = HashSet::new();
    let mut tools = Vec::with_capacity(raw.len());

    for descriptor in raw {
        if !seen.insert(descriptor.name.as_str()) {
            return Err(CatalogError::DuplicateTool {
                tool: descriptor.name.clone(),
            });
        }
        tools.push(adapt_one(descriptor)?);
    }

    debug!(count = tools.len(), "adapted tool catalog");
    Ok(ToolCatalog { tools })
}

fn adapt_one(raw: &RawToolDescriptor) -> Result<ToolDescriptor, CatalogError> {
    let schema = &raw.input_schema;

    let properties = schema
        .get("properties")
        .and_then(|value| value.as_object())
        .cloned()
        .ok_or_else(|| CatalogError::MissingProperties {
            tool: raw.name.clone(),
        })?;

    // Lenient: a malformed `required` is treated as "nothing required".
    let required: BTreeSet<String> = schema
        .get("required")
        .and_then(|value| value.as_array())
        .map(|names| {
            names
                .iter()
                .filter_map(|name| name.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default();

    let kind = schema
        .get("type")
        .and_then(|value| value.as_str())
        .unwrap_or("object")
        .to_string();

    Ok(ToolDescriptor {
        name: raw.name.clone(),
        description: raw.description.clone(),
        parameters: ToolParameters {
            kind,
            properties,
            required,
            default: schema.get("default").cloned(),
        },
    })
}

//! Field descriptions for the source and target schemas

use serde::{Deserialize, Serialize};

/// One field of the external (source) schema
///
/// Created per request from the inbound payload and never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceField {
    /// Field name in whatever casing convention the source uses
    pub name: String,

    /// Declared type (e.g. "string", "number", "datetime")
    #[serde(rename = "type")]
    pub field_type: String,

    /// Dotted path of the field inside the source document
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// Free-text description, forwarded to the AI prompt only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Domain classification labels (e.g. "monetary", "identifier")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub semantic_tags: Option<Vec<String>>,
}

impl SourceField {
    /// Create a source field with only a name and a type
    pub fn new(name: impl Into<String>, field_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            field_type: field_type.into(),
            path: None,
            description: None,
            semantic_tags: None,
        }
    }

    /// Set the dotted path
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Set the semantic tags
    pub fn with_tags<I, T>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.semantic_tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    /// Path used for depth computation: the declared path, else the name
    pub fn structural_path(&self) -> &str {
        self.path.as_deref().unwrap_or(&self.name)
    }

    /// Semantic tags, empty when none were supplied
    pub fn tags(&self) -> &[String] {
        self.semantic_tags.as_deref().unwrap_or(&[])
    }
}

/// One field of the destination schema
///
/// `path` is authoritative for identity and depth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetField {
    /// Short field name
    pub name: String,

    /// Dotted path inside the target document (e.g. "billTo.email")
    pub path: String,

    /// Declared type
    #[serde(rename = "type")]
    pub field_type: String,

    /// Document type the field belongs to (e.g. "order")
    pub document_type: String,

    /// Domain classification labels
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub semantic_tags: Option<Vec<String>>,

    /// Explicit nesting depth; defaults to the segment count of `path`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depth: Option<u32>,
}

impl TargetField {
    /// Create a target field
    pub fn new(
        name: impl Into<String>,
        path: impl Into<String>,
        field_type: impl Into<String>,
        document_type: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            field_type: field_type.into(),
            document_type: document_type.into(),
            semantic_tags: None,
            depth: None,
        }
    }

    /// Set the semantic tags
    pub fn with_tags<I, T>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.semantic_tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    /// Set an explicit depth
    pub fn with_depth(mut self, depth: u32) -> Self {
        self.depth = Some(depth);
        self
    }

    /// Semantic tags, empty when none were supplied
    pub fn tags(&self) -> &[String] {
        self.semantic_tags.as_deref().unwrap_or(&[])
    }
}

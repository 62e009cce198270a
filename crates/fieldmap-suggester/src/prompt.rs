//! Prompt construction for AI mapping suggestions

use fieldmap_domain::{SourceField, TargetField};
use std::collections::BTreeMap;
use std::fmt::Write;

/// System message: role and output contract
pub const SYSTEM_PROMPT: &str = r#"You are a data integration assistant that maps fields from a source schema onto a target content schema.
Respond with a single JSON object and nothing else, in this shape:
{"mappings": [{"source": "<source field name>", "target": "<target field path>", "confidence": 0-100, "rationale": ["<short reason>"]}]}
Rules:
- Use source names exactly as given and target paths exactly as listed
- Only propose mappings you consider plausible; omit source fields with no sensible target
- A source field may map to more than one target
- confidence is an integer from 0 (guess) to 100 (certain)"#;

/// Builds the user message listing the fields to map
pub struct PromptBuilder<'a> {
    sources: &'a [SourceField],
    targets: &'a [TargetField],
    existing_mappings: Option<&'a BTreeMap<String, String>>,
}

impl<'a> PromptBuilder<'a> {
    /// Create a prompt builder
    pub fn new(sources: &'a [SourceField], targets: &'a [TargetField]) -> Self {
        Self {
            sources,
            targets,
            existing_mappings: None,
        }
    }

    /// Add known mappings as context for the model
    pub fn with_existing_mappings(mut self, mappings: &'a BTreeMap<String, String>) -> Self {
        self.existing_mappings = Some(mappings);
        self
    }

    /// Build the user message
    pub fn build(&self) -> String {
        let mut prompt = String::from("Suggest mappings from the source fields to the target fields.\n\n");

        prompt.push_str("Source fields:\n");
        for source in self.sources {
            let _ = write!(prompt, "- {} ({})", source.name, source.field_type);
            if let Some(path) = source.path.as_deref().filter(|p| !p.is_empty()) {
                let _ = write!(prompt, " path={}", path);
            }
            if !source.tags().is_empty() {
                let _ = write!(prompt, " tags=[{}]", source.tags().join(", "));
            }
            if let Some(description) = source.description.as_deref().filter(|d| !d.is_empty()) {
                let _ = write!(prompt, ": {}", description);
            }
            prompt.push('\n');
        }

        prompt.push_str("\nTarget fields:\n");
        for target in self.targets {
            let _ = write!(
                prompt,
                "- {} ({}) document={}",
                target.path, target.field_type, target.document_type
            );
            if !target.tags().is_empty() {
                let _ = write!(prompt, " tags=[{}]", target.tags().join(", "));
            }
            prompt.push('\n');
        }

        if let Some(mappings) = self.existing_mappings.filter(|m| !m.is_empty()) {
            prompt.push_str("\nExisting mappings (context only):\n");
            for (source, target) in mappings {
                let _ = writeln!(prompt, "- {} -> {}", source, target);
            }
        }

        prompt
    }
}

//! Parse model output into AI mappings

use crate::fallback::FallbackReason;
use fieldmap_domain::AiMapping;
use serde_json::Value;
use tracing::warn;

/// Parse a completion into AI mappings
///
/// The completion must be a JSON object with a `mappings` array. Entries
/// inside the array that cannot be read are skipped with a warning; an
/// empty array is a valid answer.
pub fn parse_ai_response(response: &str) -> Result<Vec<AiMapping>, FallbackReason> {
    let json_str = extract_json(response);

    let json: Value = serde_json::from_str(json_str)
        .map_err(|e| FallbackReason::MalformedJson(e.to_string()))?;

    let entries = json
        .get("mappings")
        .and_then(Value::as_array)
        .ok_or(FallbackReason::MissingMappings)?;

    let mut mappings = Vec::with_capacity(entries.len());
    for (idx, entry) in entries.iter().enumerate() {
        match parse_mapping_json(entry) {
            Ok(mapping) => mappings.push(mapping),
            Err(e) => warn!("Skipping AI mapping {}: {}", idx, e),
        }
    }

    Ok(mappings)
}

/// Strip a surrounding markdown code fence, if any
fn extract_json(response: &str) -> &str {
    let trimmed = response.trim();
    let Some(fenced) = trimmed.strip_prefix("```") else {
        return trimmed;
    };

    // Drop the info string (e.g. "json") on the opening line
    let body = match fenced.find('\n') {
        Some(newline) => &fenced[newline + 1..],
        None => fenced,
    };
    body.trim_end().strip_suffix("```").unwrap_or(body).trim()
}

/// Read one entry leniently: numbers may arrive as strings and rationale as
/// a bare string
fn parse_mapping_json(json: &Value) -> Result<AiMapping, String> {
    let obj = json
        .as_object()
        .ok_or_else(|| "Mapping is not a JSON object".to_string())?;

    let source = obj
        .get("source")
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| "Missing or invalid 'source'".to_string())?
        .to_string();

    let target = obj
        .get("target")
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| "Missing or invalid 'target'".to_string())?
        .to_string();

    let confidence = obj.get("confidence").and_then(|v| match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().trim_end_matches('%').parse().ok(),
        _ => None,
    });

    let rationale = match obj.get("rationale") {
        Some(Value::Array(items)) => Some(
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect::<Vec<_>>(),
        ),
        Some(Value::String(s)) => Some(vec![s.clone()]),
        _ => None,
    };

    Ok(AiMapping {
        source,
        target,
        confidence,
        rationale,
    })
}

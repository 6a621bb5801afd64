// src/extract.rs
// Best-effort recovery of a palette from whatever text the model actually
// returned, markdown fences and all.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;
use tracing::debug;

use crate::palette::{is_valid_hex, ColorEntry, Palette};

/// Opening fence marker, optionally with a language tag ("```json").
static FENCE_OPEN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^```[a-zA-Z]*").unwrap());
/// Closing fence marker at the end of the reply.
static FENCE_CLOSE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"```$").unwrap());

#[derive(Debug, Error)]
pub enum ExtractError {
    /// The reply is not syntactically valid JSON once the fence is gone.
    /// Carries the offending text so a misbehaving model can be diagnosed.
    #[error("failed to parse reply as JSON: {source}. Reply: {raw}")]
    Parse {
        #[source]
        source: serde_json::Error,
        raw: String,
    },
    /// The reply parsed as JSON but is not a palette. `issue` is a short
    /// machine-readable code naming the first mismatch found.
    #[error("reply is not a palette ({issue}). Reply: {raw}")]
    Shape { issue: String, raw: String },
}

impl ExtractError {
    fn shape(issue: String, raw: &str) -> Self {
        ExtractError::Shape {
            issue,
            raw: raw.to_string(),
        }
    }
}

/// Strip a wrapping markdown code fence, if any, and trim whitespace.
/// Models wrap JSON in ``` blocks despite being told not to; everything
/// else passes through untouched.
fn strip_code_fence(text: &str) -> String {
    let trimmed = text.trim();
    if !trimmed.starts_with("```") {
        return trimmed.to_string();
    }
    debug!("stripping code fence from reply");
    let inner = FENCE_OPEN_RE.replace(trimmed, "");
    let inner = FENCE_CLOSE_RE.replace(inner.as_ref(), "");
    inner.trim().to_string()
}

/// Extract validated color entries from a raw model reply.
///
/// Fence stripping, then a structural JSON parse, then shape validation of
/// every element. Deliberately count-agnostic: callers that require a full
/// palette go through [`extract_palette`], which owns the exactly-five
/// policy. Pure function of its input.
pub fn extract_entries(raw_text: &str) -> Result<Vec<ColorEntry>, ExtractError> {
    let clean_text = strip_code_fence(raw_text);

    let value: serde_json::Value =
        serde_json::from_str(&clean_text).map_err(|source| ExtractError::Parse {
            source,
            raw: raw_text.to_string(),
        })?;

    if !value.is_array() {
        return Err(ExtractError::shape(
            format!("top_level_not_an_array: {}", json_type_name(&value)),
            raw_text,
        ));
    }

    // Typed deserialization of the whole array; anything that is not an
    // object with string name/hex keys fails here.
    let entries: Vec<ColorEntry> = serde_json::from_value(value).map_err(|e| {
        ExtractError::shape(format!("element_shape_mismatch: {e}"), raw_text)
    })?;

    for (index, entry) in entries.iter().enumerate() {
        if entry.name.trim().is_empty() {
            return Err(ExtractError::shape(
                format!("empty_color_name: index {index}"),
                raw_text,
            ));
        }
        if !is_valid_hex(&entry.hex) {
            return Err(ExtractError::shape(
                format!("malformed_hex: {}", entry.hex),
                raw_text,
            ));
        }
    }

    Ok(entries)
}

/// Full extraction: [`extract_entries`] plus the exact-count check.
pub fn extract_palette(raw_text: &str) -> Result<Palette, ExtractError> {
    let entries = extract_entries(raw_text)?;
    Palette::from_entries(entries)
        .map_err(|e| ExtractError::shape(format!("unexpected_color_count: {}", e.0), raw_text))
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

// crates/llm/src/normalize.rs

use nameforge_core::{FinalName, NameConversion, NameforgeError, NameforgeResult};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use tracing::warn;

static UNQUOTED_KEY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"([{,]\s*)([A-Za-z_][A-Za-z0-9_]*)\s*:"#).expect("valid key regex"));

/// Turn the model's raw reply into the fixed result shape.
///
/// Strict JSON parsing comes first; a single bounded repair pass runs only
/// when that fails, and unparseable text is the one hard failure. Missing
/// fields never fail; they are filled with fallback defaults.
pub fn normalize(raw: &str, fallback_name: &str) -> NameforgeResult<NameConversion> {
    let cleaned = clean(raw);

    let value = match serde_json::from_str::<Value>(&cleaned) {
        Ok(value) => value,
        Err(parse_err) => {
            warn!(raw, "Model reply is not strict JSON ({}), attempting repair", parse_err);
            let repaired = repair(&cleaned);
            serde_json::from_str::<Value>(&repaired).map_err(|err| {
                NameforgeError::InvalidResponse(format!(
                    "Model did not return parseable JSON: {err}"
                ))
            })?
        }
    };

    if !value.is_object() {
        return Err(NameforgeError::InvalidResponse(
            "Model returned JSON that is not an object".to_string(),
        ));
    }

    Ok(project(&value, fallback_name))
}

/// Strip markdown fencing, a BOM, and control characters, and reduce to the
/// outermost brace span when one exists.
fn clean(raw: &str) -> String {
    let unfenced = raw
        .replace("```json", "")
        .replace("```", "")
        .replace('\u{feff}', "");
    let trimmed = unfenced.trim();

    let candidate = match (trimmed.find('{'), trimmed.rfind('}')) {
        (Some(start), Some(end)) if start < end => &trimmed[start..=end],
        _ => trimmed,
    };

    candidate
        .chars()
        .filter(|c| !c.is_control() || matches!(c, '\n' | '\r' | '\t'))
        .collect()
}

/// One bounded repair pass: collapse raw newlines/tabs inside the payload,
/// quote bare object keys, coerce single quotes to double quotes. Heuristic
/// and intentionally narrow; it runs at most once per reply.
fn repair(text: &str) -> String {
    let collapsed = text.replace(['\n', '\r', '\t'], " ");
    let keyed = UNQUOTED_KEY.replace_all(&collapsed, "${1}\"${2}\":");
    keyed.replace('\'', "\"")
}

/// Project the loosely-typed value into the fixed shape field by field.
/// Unknown extra fields are dropped; missing ones get defaults.
fn project(value: &Value, fallback_name: &str) -> NameConversion {
    let final_name = value.get("final_name").cloned().unwrap_or(Value::Null);

    NameConversion {
        original_name: string_field(value, "original_name")
            .unwrap_or_else(|| fallback_name.to_string()),
        name_meaning: string_field(value, "name_meaning").unwrap_or_else(|| "Unknown".to_string()),
        cultural_translation: string_field(value, "cultural_translation").unwrap_or_default(),
        final_name: FinalName {
            native_script: string_field(&final_name, "native_script").unwrap_or_default(),
            romanized: string_field(&final_name, "romanized").unwrap_or_default(),
            pronunciation: string_field(&final_name, "pronunciation").unwrap_or_default(),
            meaning_in_english: string_field(&final_name, "meaning_in_english").unwrap_or_default(),
        },
    }
}

fn string_field(value: &Value, key: &str) -> Option<String> {
    value.get(key).and_then(Value::as_str).map(str::to_string)
}

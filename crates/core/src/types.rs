// crates/core/src/types.rs
use serde::{Deserialize, Serialize};

/// Inbound conversion request. Missing fields deserialize to empty strings
/// so the HTTP layer can reject them with a 400 instead of a decode error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConvertRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub culture: String,
}

/// The fixed result shape returned to the caller. Every field is always
/// present, with fallback defaults substituted for anything the model omitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameConversion {
    pub original_name: String,
    pub name_meaning: String,
    pub cultural_translation: String,
    pub final_name: FinalName,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalName {
    pub native_script: String,
    pub romanized: String,
    pub pronunciation: String,
    pub meaning_in_english: String,
}

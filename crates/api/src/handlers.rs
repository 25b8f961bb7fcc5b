// crates/api/src/handlers.rs

use std::sync::Arc;

use nameforge_core::{ConvertRequest, NameConversion, NameforgeError, NameforgeResult};
use nameforge_llm::NameConverter;

pub struct ApiHandlers {
    converter: Option<Arc<NameConverter>>,
}

impl ApiHandlers {
    /// `converter` is `None` when no API credential could be resolved at
    /// startup; conversion requests then fail with a configuration error
    /// while the rest of the API stays up.
    pub fn new(converter: Option<Arc<NameConverter>>) -> Self {
        Self { converter }
    }

    pub fn converter_available(&self) -> bool {
        self.converter.is_some()
    }

    pub async fn convert(&self, request: ConvertRequest) -> NameforgeResult<NameConversion> {
        let name = request.name.trim();
        if name.is_empty() {
            return Err(NameforgeError::BadRequest("Name is required".to_string()));
        }
        let culture = request.culture.trim();
        if culture.is_empty() {
            return Err(NameforgeError::BadRequest("Culture is required".to_string()));
        }

        let converter = self
            .converter
            .as_ref()
            .ok_or_else(|| NameforgeError::Config("LLM API key is not configured".to_string()))?;

        converter.convert(name, culture).await
    }
}

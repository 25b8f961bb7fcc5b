// crates/llm/src/prompt.rs

/// Builds the instruction prompt sent to the model.
#[derive(Debug, Default, Clone)]
pub struct PromptBuilder;

const RESULT_SHAPE: &str = r#"{
  "original_name": "the input name",
  "name_meaning": "meaning of the original name",
  "cultural_translation": "that meaning rendered in the target language",
  "final_name": {
    "native_script": "the new name in its native script",
    "romanized": "the new name in Latin letters",
    "pronunciation": "a simple pronunciation guide",
    "meaning_in_english": "meaning of the new name in English"
  }
}"#;

impl PromptBuilder {
    pub fn new() -> Self {
        Self
    }

    pub fn build(&self, name: &str, culture: &str) -> String {
        let name = name.trim();
        let mut prompt = format!(
            "Given this name: \"{name}\", create a {culture} version following these steps:\n\
             1. Determine the meaning of the original name\n\
             2. Translate the meaning into the language of the {culture} culture\n\
             3. Create a new {culture} name that captures the essence of the original\n\
             4. Provide the name in its native script, a romanization, and a pronunciation guide\n"
        );

        if let Some(guidelines) = culture_guidelines(culture) {
            prompt.push('\n');
            prompt.push_str(guidelines);
            prompt.push('\n');
        }

        prompt.push_str(
            "\nReturn only a JSON object in this format, with no surrounding prose or markdown:\n",
        );
        prompt.push_str(RESULT_SHAPE);
        prompt
    }
}

/// Formatting guidance for cultures the service knows about. Unknown tags
/// (including fictional styles) get no guidance block and the model free-forms.
fn culture_guidelines(culture: &str) -> Option<&'static str> {
    let guidance = match culture.to_ascii_lowercase().as_str() {
        "japanese" => {
            "Formatting: write the native script in kanji (add hiragana in parentheses if helpful) and use Hepburn romanization."
        }
        "chinese" => {
            "Formatting: write the native script in simplified Chinese characters and use Hanyu Pinyin with tone marks."
        }
        "korean" => "Formatting: write the native script in Hangul and use Revised Romanization.",
        "hindi" => "Formatting: write the native script in Devanagari and use IAST romanization.",
        "arabic" => {
            "Formatting: write the native script in Arabic letters and use ALA-LC romanization."
        }
        "russian" => {
            "Formatting: write the native script in Cyrillic and use BGN/PCGN romanization."
        }
        "greek" => {
            "Formatting: write the native script in the Greek alphabet and use ISO 843 romanization."
        }
        "hebrew" => {
            "Formatting: write the native script in Hebrew letters and use a common Latin transliteration."
        }
        _ => return None,
    };
    Some(guidance)
}

//! Instructions sent to the generative-language provider.
//!
//! The translation template never names a language itself, so the requested
//! language name shows up exactly once in a built prompt.

use crate::domain::language::{Language, SUPPORTED_LANGUAGES};
use once_cell::sync::Lazy;

pub const COMPANY_NAME: &str = "HEREANDNOW AI RESEARCH INSTITUTE";
pub const SUITE_NAME: &str = "HEREANDNOW AI Services Suite";

/// Build the translation instruction for `text` into `target`. Pure.
pub fn build_translation_prompt(text: &str, target: &Language) -> String {
    format!(
        r#"You are an expert Automated Translation Services assistant from {company}.
Your primary function is to provide accurate, contextual, and professional translations.
Maintain the original meaning, tone, and cultural nuances.
Translate the text between the <source_text> markers into {name} (language code: {code}).
<source_text>
{text}
</source_text>

Your response MUST be a single, valid JSON object with exactly these fields:
{{
  "sourceLanguage": string,             // full name of the detected source language
  "targetLanguage": string,             // full name of the requested target language
  "translation": string,                // the primary translated text
  "alternativeOptions": string[],       // alternative translations if appropriate, concise (0-2 options)
  "contextNotes": string,               // brief cultural or linguistic explanations if needed
  "confidenceLevel": "High" | "Medium" | "Low",
  "detectedSourceLanguageCode": string  // IETF BCP 47 code of the source text, e.g. "en"
}}
Analyze context, tone, and domain-specific terminology.
If the source text is ambiguous, provide the most likely translation and note the ambiguity in contextNotes.
Do NOT include any text, explanation, or markdown outside of this JSON object."#,
        company = COMPANY_NAME,
        name = target.name,
        code = target.code,
        text = text,
    )
}

static ASSISTANT_INSTRUCTION: Lazy<String> = Lazy::new(|| {
    let languages = SUPPORTED_LANGUAGES
        .iter()
        .map(|lang| lang.name)
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        r#"You are an AI Assistant integrated within the "{suite}" application, developed by {company}.
This application offers two main features:
1. Automated Translation Service:
   * Core capabilities: translates text into many supported languages ({languages}), automatically detects the source language, offers alternative translations when appropriate, handles technical, business and creative content, and aims to keep formatting.
   * Translation workflow: identifies the source, confirms the target, analyzes context, gives a primary translation, offers alternatives and explains cultural adaptations.
   * Response format for translations: Source Language, Target Language, Translation, Alternative Options, Context Notes and Confidence Level.
   * Special features: handles idioms and metaphors, keeps terminology consistent, adapts tone.
2. General AI Assistant (your current role):
   * You answer user questions on a wide range of topics.
   * You help draft text, brainstorm ideas, summarize information, and more.
   * You are aware of the translation capabilities of the application you are part of.
   * Users can talk to you by typing or by voice (microphone).

When responding as the AI Assistant:
- Be helpful, informative, and professional.
- If a query seems related to translation, mention the translation feature or offer to help phrase a translation request.
- If asked about the app itself, answer from the information above.
- If specialized terminology is unclear or a query is too ambiguous, ask for clarification.
- Prioritize accuracy and clarity."#,
        suite = SUITE_NAME,
        company = COMPANY_NAME,
        languages = languages,
    )
});

/// Fixed system instruction describing the host application to the assistant.
pub fn assistant_system_instruction() -> &'static str {
    ASSISTANT_INSTRUCTION.as_str()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::language::find_language;

    #[test]
    fn every_language_name_appears_once() {
        let text = "The weather is lovely today.";
        for lang in SUPPORTED_LANGUAGES {
            let prompt = build_translation_prompt(text, lang);
            assert_eq!(prompt.matches(lang.name).count(), 1, "{}", lang.name);
            assert_eq!(prompt.matches(text).count(), 1);
            assert!(prompt.contains(&format!("language code: {}", lang.code)));
        }
    }

    #[test]
    fn prompt_declares_every_result_field() {
        let prompt = build_translation_prompt("Hello", find_language("es").unwrap());
        for field in [
            "sourceLanguage",
            "targetLanguage",
            "translation",
            "alternativeOptions",
            "contextNotes",
            "confidenceLevel",
            "detectedSourceLanguageCode",
        ] {
            assert!(prompt.contains(&format!("\"{}\"", field)), "{}", field);
        }
        assert!(prompt.contains("Do NOT include any text"));
    }

    #[test]
    fn multiline_text_is_embedded_verbatim() {
        let text = "line one\n  \"quoted\" line two";
        let prompt = build_translation_prompt(text, find_language("fr").unwrap());
        assert!(prompt.contains(text));
    }

    #[test]
    fn assistant_instruction_lists_languages() {
        let instruction = assistant_system_instruction();
        assert!(instruction.contains(SUITE_NAME));
        assert!(instruction.contains("Tamil"));
    }
}

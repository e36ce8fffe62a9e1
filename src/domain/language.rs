use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Language {
    pub code: &'static str,
    pub name: &'static str,
}

/// Target languages offered by the translator. The first entry is the default target.
pub const SUPPORTED_LANGUAGES: &[Language] = &[
    Language { code: "es", name: "Spanish" },
    Language { code: "fr", name: "French" },
    Language { code: "de", name: "German" },
    Language { code: "ja", name: "Japanese" },
    Language { code: "ko", name: "Korean" },
    Language { code: "zh", name: "Chinese (Simplified)" },
    Language { code: "pt", name: "Portuguese" },
    Language { code: "it", name: "Italian" },
    Language { code: "ru", name: "Russian" },
    Language { code: "ar", name: "Arabic" },
    Language { code: "hi", name: "Hindi" },
    Language { code: "ta", name: "Tamil" },
    Language { code: "en", name: "English" },
];

pub fn find_language(code: &str) -> Option<&'static Language> {
    let code = code.trim();
    SUPPORTED_LANGUAGES
        .iter()
        .find(|lang| lang.code.eq_ignore_ascii_case(code))
}

pub fn default_language() -> &'static Language {
    &SUPPORTED_LANGUAGES[0]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_ignores_case_and_padding() {
        assert_eq!(find_language(" ES ").map(|l| l.name), Some("Spanish"));
        assert!(find_language("klingon").is_none());
    }

    #[test]
    fn codes_are_unique() {
        for (i, a) in SUPPORTED_LANGUAGES.iter().enumerate() {
            for b in &SUPPORTED_LANGUAGES[i + 1..] {
                assert_ne!(a.code, b.code);
            }
        }
    }
}

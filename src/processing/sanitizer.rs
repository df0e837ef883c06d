//! Text sanitization: PII masking and whitespace normalization

use crate::config::SanitizeMode;
use regex::Regex;

pub struct TextSanitizer {
    mode: SanitizeMode,
    phone_regex: Regex,
    email_regex: Regex,
    url_regex: Regex,
    whitespace_regex: Regex,
}

impl TextSanitizer {
    pub fn new(mode: SanitizeMode) -> Self {
        let phone_regex =
            Regex::new(r"[\+\(]?[1-9][0-9 .\-\(\)]{8,}[0-9]").expect("Invalid phone regex");

        let email_regex = Regex::new(r"\S+@\S+\.\S+").expect("Invalid email regex");

        let url_regex = Regex::new(r"http\S+|www\.\S+").expect("Invalid URL regex");

        let whitespace_regex = Regex::new(r"\s+").expect("Invalid whitespace regex");

        Self {
            mode,
            phone_regex,
            email_regex,
            url_regex,
            whitespace_regex,
        }
    }

    /// Sanitize text: replace or delete phone numbers, emails and URLs,
    /// then collapse whitespace runs to single spaces. Idempotent.
    pub fn sanitize(&self, text: &str) -> String {
        let (phone, email, url) = match self.mode {
            SanitizeMode::Mask => ("[PHONE]", "[EMAIL]", "[URL]"),
            SanitizeMode::Strip => ("", "", ""),
        };

        let mut cleaned = self.whitespace_regex.replace_all(text, " ").to_string();
        cleaned = self.phone_regex.replace_all(&cleaned, phone).to_string();
        cleaned = self.email_regex.replace_all(&cleaned, email).to_string();
        cleaned = self.url_regex.replace_all(&cleaned, url).to_string();

        // Deletions can leave double spaces behind, so collapse once more
        self.whitespace_regex
            .replace_all(&cleaned, " ")
            .trim()
            .to_string()
    }
}

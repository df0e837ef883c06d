//! Fallback extraction used when the prompted strategy fails

use crate::config::{FallbackConfig, FieldCategory};
use crate::error::{CvExtractError, Result};
use crate::processing::record::RawFields;
use aho_corasick::AhoCorasick;
use log::info;
use std::collections::HashSet;

/// A narrow, literal-match safety net. Each configured trigger phrase is
/// emitted into its category only when the sanitized text contains it
/// case-insensitively; education and the profile summary are fixed values.
pub struct FallbackSupplier {
    config: FallbackConfig,
    matcher: AhoCorasick,
}

impl FallbackSupplier {
    pub fn new(config: FallbackConfig) -> Result<Self> {
        let phrases: Vec<&str> = config.rules.iter().map(|r| r.phrase.as_str()).collect();
        let matcher = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .build(&phrases)
            .map_err(|e| {
                CvExtractError::Configuration(format!("Failed to build fallback matcher: {}", e))
            })?;

        Ok(Self { config, matcher })
    }

    pub fn supply(&self, text: &str) -> RawFields {
        info!("Using fallback extraction");

        let matched: HashSet<usize> = self
            .matcher
            .find_iter(text)
            .map(|m| m.pattern().as_usize())
            .collect();

        let mut experience = Vec::new();
        let mut leadership = Vec::new();

        for (idx, rule) in self.config.rules.iter().enumerate() {
            if !matched.contains(&idx) {
                continue;
            }
            match rule.category {
                FieldCategory::Experience => experience.push(rule.phrase.clone()),
                FieldCategory::Leadership => leadership.push(rule.phrase.clone()),
            }
        }

        RawFields::from_lists(
            experience,
            leadership,
            self.config.profile_summary.clone(),
            self.config.education.clone(),
        )
    }
}

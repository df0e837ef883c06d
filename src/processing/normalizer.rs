//! Post-processing of raw extraction payloads into a `CvRecord`

use crate::config::KeywordConfig;
use crate::error::{CvExtractError, Result};
use crate::processing::record::{CvRecord, RawFields};
use aho_corasick::AhoCorasick;
use regex::{Regex, RegexBuilder};
use serde_json::Value;
use std::collections::HashSet;

pub struct Normalizer {
    marker_regex: Regex,
    whitespace_regex: Regex,
    degree_regexes: Vec<Regex>,
    leadership_matcher: AhoCorasick,
    summary_limit: usize,
}

impl Normalizer {
    pub fn new(keywords: &KeywordConfig, summary_limit: usize) -> Result<Self> {
        let marker_regex = Regex::new(r"^(?:-|\*|\d+\.)\s*").expect("Invalid marker regex");
        let whitespace_regex = Regex::new(r"\s+").expect("Invalid whitespace regex");

        let degree_regexes = keywords
            .degree_patterns
            .iter()
            .map(|pattern| {
                RegexBuilder::new(pattern)
                    .case_insensitive(true)
                    .build()
                    .map_err(|e| {
                        CvExtractError::Configuration(format!(
                            "Invalid degree pattern '{}': {}",
                            pattern, e
                        ))
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        let leadership_matcher = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .build(&keywords.leadership_keywords)
            .map_err(|e| {
                CvExtractError::Configuration(format!("Failed to build leadership matcher: {}", e))
            })?;

        Ok(Self {
            marker_regex,
            whitespace_regex,
            degree_regexes,
            leadership_matcher,
            summary_limit,
        })
    }

    /// Coerce a raw payload of any tolerated shape into a strict `CvRecord`
    pub fn normalize(&self, raw: &RawFields) -> CvRecord {
        let experience = self.clean_and_deduplicate(coerce_list(&raw.experience));
        let leadership = self.clean_and_deduplicate(coerce_list(&raw.leadership));

        let mut education = self.clean_and_deduplicate(coerce_list(&raw.education));
        education = self.extract_degree_names(education);
        education = self.clean_and_deduplicate(education);

        let (experience, leadership) = self.separate_experience_leadership(experience, leadership);
        let experience = self.clean_and_deduplicate(experience);
        let leadership = self.clean_and_deduplicate(leadership);

        let profile_summary = coerce_string(&raw.profile_summary)
            .chars()
            .take(self.summary_limit)
            .collect();

        CvRecord {
            experience,
            leadership,
            profile_summary,
            education,
        }
    }

    /// Strip list markers, collapse whitespace and keep the first occurrence
    /// of each item case-insensitively, preserving input order
    pub fn clean_and_deduplicate(&self, items: Vec<String>) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut cleaned = Vec::new();

        for item in items {
            let stripped = self.marker_regex.replace(item.trim(), "");
            let collapsed = self
                .whitespace_regex
                .replace_all(&stripped, " ")
                .trim()
                .to_string();

            if collapsed.is_empty() {
                continue;
            }

            if seen.insert(collapsed.to_lowercase()) {
                cleaned.push(collapsed);
            }
        }

        cleaned
    }

    /// Reduce free-text education mentions to canonical degree phrases.
    /// Items with no matching pattern pass through unchanged.
    pub fn extract_degree_names(&self, items: Vec<String>) -> Vec<String> {
        items
            .into_iter()
            .map(|item| {
                for regex in &self.degree_regexes {
                    if let Some(caps) = regex.captures(&item) {
                        let matched = caps.get(1).map_or_else(
                            || caps.get(0).map_or("", |m| m.as_str()),
                            |m| m.as_str(),
                        );
                        return matched.trim().to_string();
                    }
                }
                item
            })
            .collect()
    }

    /// Relocate misclassified leadership titles out of the experience list.
    /// An experience item containing a leadership keyword moves to the
    /// leadership list unless an equal entry is already there.
    pub fn separate_experience_leadership(
        &self,
        experience: Vec<String>,
        leadership: Vec<String>,
    ) -> (Vec<String>, Vec<String>) {
        let mut lead_lower: HashSet<String> =
            leadership.iter().map(|item| item.to_lowercase()).collect();

        let mut new_experience = Vec::new();
        let mut new_leadership = leadership;

        for item in experience {
            if self.leadership_matcher.is_match(&item) {
                if lead_lower.insert(item.to_lowercase()) {
                    new_leadership.push(item);
                }
            } else {
                new_experience.push(item);
            }
        }

        (new_experience, new_leadership)
    }
}

fn coerce_list(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items
            .iter()
            .filter_map(|item| item.as_str().map(|s| s.to_string()))
            .collect(),
        _ => Vec::new(),
    }
}

fn coerce_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use serde_json::json;

    fn normalizer() -> Normalizer {
        let config = Config::default();
        Normalizer::new(&config.keywords, config.extraction.summary_limit).unwrap()
    }

    #[test]
    fn test_clean_and_deduplicate_markers_and_case() {
        let n = normalizer();
        let items = vec![
            "- Intern".to_string(),
            "* intern".to_string(),
            "1. Junior   Engineer".to_string(),
            "  ".to_string(),
        ];

        let cleaned = n.clean_and_deduplicate(items);

        assert_eq!(cleaned, vec!["Intern", "Junior Engineer"]);
    }

    #[test]
    fn test_dedup_preserves_first_occurrence_order() {
        let n = normalizer();
        let items = vec![
            "Tutor".to_string(),
            "Head Mentor".to_string(),
            "TUTOR".to_string(),
            "Head Mentor".to_string(),
        ];

        let cleaned = n.clean_and_deduplicate(items);

        assert_eq!(cleaned, vec!["Tutor", "Head Mentor"]);
    }

    #[test]
    fn test_degree_extraction() {
        let n = normalizer();
        let items = vec![
            "2021-2024, BSc in Mechatronics".to_string(),
            "Completed Bachelor of Science, cum laude".to_string(),
            "Diploma in Welding".to_string(),
        ];

        let extracted = n.extract_degree_names(items);

        assert_eq!(extracted[0], "BSc in Mechatronics");
        assert_eq!(extracted[1], "Bachelor of Science");
        // No pattern matched, item passes through unchanged
        assert_eq!(extracted[2], "Diploma in Welding");
    }

    #[test]
    fn test_separation_moves_leadership_titles() {
        let n = normalizer();
        let experience = vec!["Head Mentor".to_string(), "Junior Engineer".to_string()];

        let (experience, leadership) = n.separate_experience_leadership(experience, vec![]);

        assert_eq!(experience, vec!["Junior Engineer"]);
        assert_eq!(leadership, vec!["Head Mentor"]);
    }

    #[test]
    fn test_separation_skips_existing_leadership_entries() {
        let n = normalizer();
        let experience = vec!["Head Mentor".to_string()];
        let leadership = vec!["head mentor".to_string()];

        let (experience, leadership) = n.separate_experience_leadership(experience, leadership);

        assert!(experience.is_empty());
        assert_eq!(leadership, vec!["head mentor"]);
    }

    #[test]
    fn test_disjointness_invariant() {
        let n = normalizer();
        let raw = RawFields {
            experience: json!(["Class Representative", "Chair of Robotics", "Data Analyst"]),
            leadership: json!([]),
            profile_summary: json!("x"),
            education: json!([]),
        };

        let record = n.normalize(&raw);

        let keywords = [
            "mentor",
            "tutor",
            "warden",
            "representative",
            "chair",
            "president",
            "sub-warden",
        ];
        for item in &record.experience {
            let lower = item.to_lowercase();
            assert!(!keywords.iter().any(|k| lower.contains(k)), "{}", item);
        }
        assert_eq!(record.experience, vec!["Data Analyst"]);
        assert_eq!(
            record.leadership,
            vec!["Class Representative", "Chair of Robotics"]
        );
    }

    #[test]
    fn test_summary_truncated_to_limit() {
        let n = normalizer();
        let raw = RawFields {
            experience: json!([]),
            leadership: json!([]),
            profile_summary: json!("x".repeat(300)),
            education: json!([]),
        };

        let record = n.normalize(&raw);

        assert_eq!(record.profile_summary.chars().count(), 250);
    }

    #[test]
    fn test_normalize_model_reply_scenario() {
        // Marker stripped, case-insensitive dedup, summary truncated
        let n = normalizer();
        let raw = RawFields {
            experience: json!(["- Intern", "- intern"]),
            leadership: json!([]),
            profile_summary: json!("x".repeat(300)),
            education: json!([]),
        };

        let record = n.normalize(&raw);

        assert_eq!(record.experience, vec!["Intern"]);
        assert_eq!(record.profile_summary.len(), 250);
    }

    #[test]
    fn test_malformed_shapes_coerced_to_defaults() {
        let n = normalizer();
        let raw = RawFields {
            experience: json!("a bare string"),
            leadership: json!(42),
            profile_summary: Value::Null,
            education: json!([1, 2, "BSc in Mechatronics"]),
        };

        let record = n.normalize(&raw);

        assert!(record.experience.is_empty());
        assert!(record.leadership.is_empty());
        assert_eq!(record.profile_summary, "");
        // Non-string list entries are skipped, strings survive
        assert_eq!(record.education, vec!["BSc in Mechatronics"]);
    }
}

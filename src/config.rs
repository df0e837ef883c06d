//! Configuration management for the CV extractor

use crate::error::{CvExtractError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub llm: LlmConfig,
    pub sanitizer: SanitizerConfig,
    pub extraction: ExtractionConfig,
    pub keywords: KeywordConfig,
    pub fallback: FallbackConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    pub endpoint: String,
    pub model: String,
    pub temperature: f32,
    pub num_predict: usize,
    pub timeout_secs: u64,
    pub max_retries: usize,
    pub prompt_budget: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SanitizeMode {
    /// Substitute visible [PHONE]/[EMAIL]/[URL] markers
    Mask,
    /// Delete the matched span entirely
    Strip,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SanitizerConfig {
    pub mode: SanitizeMode,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Strategy {
    Llm,
    Pattern,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionConfig {
    pub strategy: Strategy,
    pub summary_limit: usize,
}

/// Keyword and pattern data driving the Pattern Extractor and Normalizer.
/// Kept as configuration so both stay testable against synthetic sets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordConfig {
    pub leadership_keywords: Vec<String>,
    pub role_nouns: Vec<String>,
    pub seniority_adjectives: Vec<String>,
    pub domain_adjectives: Vec<String>,
    pub degree_patterns: Vec<String>,
    pub experience_headings: Vec<String>,
    pub leadership_headings: Vec<String>,
    pub education_headings: Vec<String>,
    pub summary_headings: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum FieldCategory {
    Experience,
    Leadership,
}

/// A literal trigger phrase emitted into its category when the sanitized
/// text contains it case-insensitively.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FallbackRule {
    pub phrase: String,
    pub category: FieldCategory,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FallbackConfig {
    pub rules: Vec<FallbackRule>,
    pub education: Vec<String>,
    pub profile_summary: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            llm: LlmConfig {
                endpoint: "http://localhost:11434/api/chat".to_string(),
                model: "llama3.2".to_string(),
                temperature: 0.1,
                num_predict: 600,
                timeout_secs: 60,
                max_retries: 1,
                prompt_budget: 4000,
            },
            sanitizer: SanitizerConfig {
                mode: SanitizeMode::Mask,
            },
            extraction: ExtractionConfig {
                strategy: Strategy::Llm,
                summary_limit: 250,
            },
            keywords: KeywordConfig {
                leadership_keywords: string_vec(&[
                    "mentor",
                    "tutor",
                    "warden",
                    "representative",
                    "chair",
                    "president",
                    "sub-warden",
                ]),
                role_nouns: string_vec(&[
                    "Engineer",
                    "Developer",
                    "Analyst",
                    "Manager",
                    "Director",
                    "Specialist",
                    "Consultant",
                ]),
                seniority_adjectives: string_vec(&[
                    "Senior", "Junior", "Lead", "Head", "Chief", "Principal",
                ]),
                domain_adjectives: string_vec(&[
                    "AI",
                    "ML",
                    "Data",
                    "Software",
                    "Hardware",
                    "Electrical",
                    "Mechatronics",
                ]),
                degree_patterns: string_vec(&[
                    r"(BSc\s+in\s+[A-Za-z][A-Za-z ]*)",
                    r"(B\.?Eng\s+in\s+[A-Za-z][A-Za-z ]*)",
                    r"(Bachelor\s+of\s+[A-Za-z][A-Za-z ]*)",
                    r"(Honors?\s+in\s+[A-Za-z][A-Za-z ]*)",
                    r"([A-Za-z]+\s+Degree\s+in\s+[A-Za-z][A-Za-z ]*)",
                    r"(Mechatronics\s+Engineering)",
                    r"(Final\s+year\s+\(Honors\)\s+in\s+[A-Za-z][A-Za-z ]*)",
                ]),
                experience_headings: string_vec(&[
                    "work experience",
                    "professional experience",
                    "work history",
                    "employment",
                    "experience",
                ]),
                leadership_headings: string_vec(&[
                    "leadership",
                    "volunteer",
                    "activities",
                ]),
                education_headings: string_vec(&[
                    "education",
                    "qualifications",
                    "academic background",
                ]),
                summary_headings: string_vec(&[
                    "profile summary",
                    "summary",
                    "profile",
                    "objective",
                ]),
            },
            fallback: FallbackConfig {
                rules: vec![
                    FallbackRule {
                        phrase: "AI and Embedded Systems Intern".to_string(),
                        category: FieldCategory::Experience,
                    },
                    FallbackRule {
                        phrase: "Junior Electrical Engineer".to_string(),
                        category: FieldCategory::Experience,
                    },
                    FallbackRule {
                        phrase: "Senior Administrative Sub-Warden".to_string(),
                        category: FieldCategory::Leadership,
                    },
                    FallbackRule {
                        phrase: "Head Mentor".to_string(),
                        category: FieldCategory::Leadership,
                    },
                    FallbackRule {
                        phrase: "Faculty Mentor".to_string(),
                        category: FieldCategory::Leadership,
                    },
                    FallbackRule {
                        phrase: "Tutor".to_string(),
                        category: FieldCategory::Leadership,
                    },
                ],
                education: string_vec(&[
                    "BSc in Mechatronics",
                    "Honors in Mechatronics Engineering",
                ]),
                profile_summary: "Mechatronics Engineering student with expertise in AI, \
                                  embedded systems, and leadership. Currently interning at \
                                  a cutting-edge R&D firm."
                    .to_string(),
            },
        }
    }
}

fn string_vec(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            let config = Self::default();
            config.save()?;
            Ok(config)
        }
    }

    pub fn load_from(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| CvExtractError::Configuration(format!("Failed to parse config: {}", e)))?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| {
            CvExtractError::Configuration(format!("Failed to serialize config: {}", e))
        })?;

        std::fs::write(&config_path, content)?;
        Ok(())
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("cv-extractor")
            .join("config.toml")
    }
}

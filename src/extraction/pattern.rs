//! Rule-based extraction: regex families, section splitting and
//! named-entity routing

use crate::config::KeywordConfig;
use crate::error::{CvExtractError, Result};
use crate::extraction::{ExtractionOutcome, Extractor};
use crate::processing::record::RawFields;
use regex::{Regex, RegexBuilder};
use std::collections::HashSet;

/// A labeled span returned by an entity-recognition capability
#[derive(Debug, Clone)]
pub struct Entity {
    pub text: String,
    pub label: EntityLabel,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EntityLabel {
    Organization,
    WorkOfArt,
    Other,
}

impl EntityLabel {
    /// Map a spaCy-style entity tag onto the labels this extractor routes
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "ORG" => EntityLabel::Organization,
            "WORK_OF_ART" => EntityLabel::WorkOfArt,
            _ => EntityLabel::Other,
        }
    }
}

/// Named-entity recognition as an injected capability, so the extractor
/// can run against a stub in tests
pub trait EntityRecognizer: Send + Sync {
    fn entities(&self, text: &str) -> Vec<Entity>;
}

/// Recognizer that yields no entities; the regex families still apply
pub struct NoopRecognizer;

impl EntityRecognizer for NoopRecognizer {
    fn entities(&self, _text: &str) -> Vec<Entity> {
        Vec::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Field {
    Experience,
    Leadership,
    Education,
    Summary,
}

pub struct PatternExtractor {
    title_families: Vec<Regex>,
    education_families: Vec<Regex>,
    heading_regexes: Vec<(Field, Regex)>,
    all_headings: Regex,
    role_nouns_lower: Vec<String>,
    leadership_keywords_lower: Vec<String>,
    recognizer: Box<dyn EntityRecognizer>,
}

impl PatternExtractor {
    pub fn new(keywords: &KeywordConfig, recognizer: Box<dyn EntityRecognizer>) -> Result<Self> {
        let seniority = alternation(&keywords.seniority_adjectives);
        let role_nouns = alternation(&keywords.role_nouns);
        let domains = alternation(&keywords.domain_adjectives);

        // Ordered job-title families: seniority-adjective + two words,
        // capitalized word + role noun, domain adjective + one word
        let title_families = vec![
            compile(&format!(
                r"\b(?:{})\s+[A-Za-z]+\s+[A-Za-z]+",
                seniority
            ))?,
            compile(&format!(r"\b[A-Z][a-z]+\s+(?:{})\b", role_nouns))?,
            compile(&format!(r"\b(?:{})\s+[A-Za-z]+", domains))?,
        ];

        let education_families = vec![
            compile(r"\b(?:BSc|B\.?Eng|Bachelors?|Hono(?:u)?rs?|Masters?|MSc|PhD)\s+(?:in|of)\s+[A-Za-z][A-Za-z ]*")?,
            compile(r"\b[A-Z][A-Za-z]*(?:\s+[A-Z][A-Za-z]*)*\s+(?:University|College|Institute)\b")?,
            compile(r"Degree:\s*([A-Za-z][A-Za-z ]*)")?,
        ];

        let heading_regexes = vec![
            (Field::Experience, headings_regex(&keywords.experience_headings)?),
            (Field::Leadership, headings_regex(&keywords.leadership_headings)?),
            (Field::Education, headings_regex(&keywords.education_headings)?),
            (Field::Summary, headings_regex(&keywords.summary_headings)?),
        ];

        // Longest heading first, so a run like "work experience" is not
        // split by its own "experience" suffix
        let mut every_heading: Vec<String> = keywords
            .experience_headings
            .iter()
            .chain(&keywords.leadership_headings)
            .chain(&keywords.education_headings)
            .chain(&keywords.summary_headings)
            .cloned()
            .collect();
        every_heading.sort_by_key(|h| std::cmp::Reverse(h.len()));
        let all_headings = headings_regex(&every_heading)?;

        Ok(Self {
            title_families,
            education_families,
            heading_regexes,
            all_headings,
            role_nouns_lower: lowercased(&keywords.role_nouns),
            leadership_keywords_lower: lowercased(&keywords.leadership_keywords),
            recognizer,
        })
    }

    /// Run the ordered job-title families, deduplicating case-sensitively
    fn titles_in(&self, text: &str) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut titles = Vec::new();

        for family in &self.title_families {
            for m in family.find_iter(text) {
                let title = m.as_str().trim().to_string();
                if seen.insert(title.clone()) {
                    titles.push(title);
                }
            }
        }

        titles
    }

    fn degrees_in(&self, text: &str) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut degrees = Vec::new();

        for family in &self.education_families {
            for caps in family.captures_iter(text) {
                let hit = caps
                    .get(1)
                    .or_else(|| caps.get(0))
                    .map_or("", |m| m.as_str())
                    .trim()
                    .to_string();
                if !hit.is_empty() && seen.insert(hit.clone()) {
                    degrees.push(hit);
                }
            }
        }

        degrees
    }

    /// Capture the span between a field's first heading and the next
    /// recognized heading (or end of text)
    fn section_text(&self, text: &str, field: Field) -> Option<String> {
        let regex = self
            .heading_regexes
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, r)| r)?;

        let heading = regex.find(text)?;
        let content_start = heading.end();

        let end = self
            .all_headings
            .find_iter(text)
            .map(|m| m.start())
            .find(|&start| start >= content_start)
            .unwrap_or(text.len());

        let span = text[content_start..end]
            .trim_start_matches([':', '-', ' '])
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ");

        if span.is_empty() {
            None
        } else {
            Some(span)
        }
    }

    /// Route ORG / WORK_OF_ART entity spans: leadership when a leadership
    /// keyword is present, experience when a role noun is
    fn route_entities(&self, text: &str) -> (Vec<String>, Vec<String>) {
        let mut to_experience = Vec::new();
        let mut to_leadership = Vec::new();

        for entity in self.recognizer.entities(text) {
            if !matches!(
                entity.label,
                EntityLabel::Organization | EntityLabel::WorkOfArt
            ) {
                continue;
            }

            let lower = entity.text.to_lowercase();
            if self
                .leadership_keywords_lower
                .iter()
                .any(|k| lower.contains(k))
            {
                to_leadership.push(entity.text);
            } else if self.role_nouns_lower.iter().any(|k| lower.contains(k)) {
                to_experience.push(entity.text);
            }
        }

        (to_experience, to_leadership)
    }

    /// Per-field combination: pattern/entity hits when non-empty, else the
    /// section text re-run through the matching families, else the section
    /// text verbatim as a single item
    fn combine(&self, hits: Vec<String>, section: Option<String>, titles: bool) -> Vec<String> {
        if !hits.is_empty() {
            return hits;
        }

        let Some(section) = section else {
            return Vec::new();
        };

        let rerun = if titles {
            self.titles_in(&section)
        } else {
            self.degrees_in(&section)
        };

        if rerun.is_empty() {
            vec![section]
        } else {
            rerun
        }
    }
}

impl Extractor for PatternExtractor {
    async fn extract(&self, text: &str) -> ExtractionOutcome {
        let mut titles = self.titles_in(text);
        let degrees = self.degrees_in(text);

        let (entity_experience, entity_leadership) = self.route_entities(text);
        for title in entity_experience {
            if !titles.contains(&title) {
                titles.push(title);
            }
        }

        let experience = self.combine(titles, self.section_text(text, Field::Experience), true);
        let leadership = self.combine(
            entity_leadership,
            self.section_text(text, Field::Leadership),
            true,
        );
        let education = self.combine(degrees, self.section_text(text, Field::Education), false);
        let profile_summary = self.section_text(text, Field::Summary).unwrap_or_default();

        ExtractionOutcome::Success(RawFields::from_lists(
            experience,
            leadership,
            profile_summary,
            education,
        ))
    }
}

fn alternation(keywords: &[String]) -> String {
    keywords
        .iter()
        .map(|k| regex::escape(k))
        .collect::<Vec<_>>()
        .join("|")
}

fn lowercased(keywords: &[String]) -> Vec<String> {
    keywords.iter().map(|k| k.to_lowercase()).collect()
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern)
        .map_err(|e| CvExtractError::Configuration(format!("Invalid pattern '{}': {}", pattern, e)))
}

fn headings_regex(headings: &[String]) -> Result<Regex> {
    RegexBuilder::new(&format!(r"\b(?:{})\b", alternation(headings)))
        .case_insensitive(true)
        .build()
        .map_err(|e| CvExtractError::Configuration(format!("Invalid heading pattern: {}", e)))
}

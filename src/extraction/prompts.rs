//! Fixed instruction prompt for the prompted extraction strategy

/// Prompt templates for CV field extraction
#[derive(Debug, Clone)]
pub struct PromptTemplates {
    pub system: String,
    pub extraction: String,
}

impl Default for PromptTemplates {
    fn default() -> Self {
        Self {
            system: SYSTEM_PROMPT.to_string(),
            extraction: EXTRACTION_TEMPLATE.to_string(),
        }
    }
}

impl PromptTemplates {
    /// Render the extraction prompt around the (already truncated) CV text
    pub fn render_extraction(&self, cv_text: &str) -> String {
        self.extraction.replace("{cv}", cv_text)
    }
}

const SYSTEM_PROMPT: &str = "You are an expert ATS system. Extract structured information \
from CVs. Return ONLY valid JSON without any additional text.";

const EXTRACTION_TEMPLATE: &str = r#"ANALYZE THIS CV AND EXTRACT THE FOLLOWING INFORMATION IN JSON FORMAT:

CV CONTENT:
{cv}

EXTRACTION REQUIREMENTS:

1. experience: Extract ONLY professional job titles from WORK EXPERIENCE section

2. leadership: Extract ONLY formal leadership positions and roles

3. profile_summary: Create a concise 2-3 sentence professional summary

4. education: Extract ONLY the names of degrees and qualifications (e.g., "BSc in Mechatronics", "Honors in Mechatronics Engineering")

RETURN FORMAT:
{
    "experience": ["job_title_1", "job_title_2", ...],
    "leadership": ["leadership_role_1", "leadership_role_2", ...],
    "profile_summary": "concise summary here",
    "education": ["degree_name_1", "degree_name_2", ...]
}

Return ONLY valid JSON, no additional text."#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extraction_rendering() {
        let templates = PromptTemplates::default();
        let prompt = templates.render_extraction("Jane Doe, Junior Engineer at Acme.");

        assert!(prompt.contains("Jane Doe, Junior Engineer at Acme."));
        assert!(prompt.contains("RETURN FORMAT:"));
        assert!(!prompt.contains("{cv}"));
    }

    #[test]
    fn test_template_names_all_four_fields() {
        let templates = PromptTemplates::default();

        assert!(templates.extraction.contains("experience"));
        assert!(templates.extraction.contains("leadership"));
        assert!(templates.extraction.contains("profile_summary"));
        assert!(templates.extraction.contains("education"));
    }
}

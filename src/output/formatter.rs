//! Rendering of extraction results

use crate::error::Result;
use crate::processing::record::CvRecord;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputFormat {
    Json,
    Console,
}

pub struct OutputFormatter;

impl OutputFormatter {
    pub fn render(record: &CvRecord, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(record)?),
            OutputFormat::Console => Ok(Self::render_console(record)),
        }
    }

    fn render_console(record: &CvRecord) -> String {
        let mut out = String::new();

        out.push_str("Profile Summary\n");
        if record.profile_summary.is_empty() {
            out.push_str("  (none)\n");
        } else {
            out.push_str(&format!("  {}\n", record.profile_summary));
        }

        Self::render_list(&mut out, "Experience", &record.experience);
        Self::render_list(&mut out, "Leadership", &record.leadership);
        Self::render_list(&mut out, "Education", &record.education);

        out
    }

    fn render_list(out: &mut String, title: &str, items: &[String]) {
        out.push_str(&format!("\n{}\n", title));
        if items.is_empty() {
            out.push_str("  (none)\n");
        }
        for item in items {
            out.push_str(&format!("  - {}\n", item));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> CvRecord {
        CvRecord {
            experience: vec!["Junior Engineer".to_string()],
            leadership: vec![],
            profile_summary: "An engineer.".to_string(),
            education: vec!["BSc in Mechatronics".to_string()],
        }
    }

    #[test]
    fn test_json_output_is_indented() {
        let rendered = OutputFormatter::render(&record(), OutputFormat::Json).unwrap();

        assert!(rendered.contains("\n  \"experience\""));
        let parsed: CvRecord = serde_json::from_str(&rendered).unwrap();
        assert_eq!(parsed, record());
    }

    #[test]
    fn test_console_output_lists_fields() {
        let rendered = OutputFormatter::render(&record(), OutputFormat::Console).unwrap();

        assert!(rendered.contains("An engineer."));
        assert!(rendered.contains("- Junior Engineer"));
        assert!(rendered.contains("Leadership\n  (none)"));
        assert!(rendered.contains("- BSc in Mechatronics"));
    }
}

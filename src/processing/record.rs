//! Extraction result records

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Normalized four-field extraction result.
///
/// Invariants (enforced by the Normalizer): `experience` and `leadership`
/// hold case-insensitively distinct entries in first-occurrence order, no
/// `experience` entry contains a leadership keyword, and `profile_summary`
/// is at most the configured character limit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CvRecord {
    pub experience: Vec<String>,
    pub leadership: Vec<String>,
    pub profile_summary: String,
    pub education: Vec<String>,
}

/// Raw field payload as produced by an extraction strategy, before
/// normalization. Field values may be absent, a string, or a list; the
/// Normalizer coerces every shape to the strict `CvRecord` form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawFields {
    #[serde(default)]
    pub experience: Value,
    #[serde(default)]
    pub leadership: Value,
    #[serde(default)]
    pub profile_summary: Value,
    #[serde(default)]
    pub education: Value,
}

impl RawFields {
    /// Build a payload from already-listed fields (pattern and fallback paths)
    pub fn from_lists(
        experience: Vec<String>,
        leadership: Vec<String>,
        profile_summary: String,
        education: Vec<String>,
    ) -> Self {
        Self {
            experience: Value::from(experience),
            leadership: Value::from(leadership),
            profile_summary: Value::from(profile_summary),
            education: Value::from(education),
        }
    }
}

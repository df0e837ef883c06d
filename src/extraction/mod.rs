//! Extraction strategies and their shared outcome type

pub mod llm;
pub mod pattern;
pub mod prompts;

use crate::processing::record::RawFields;

/// Tagged result of an extraction strategy, prior to normalization.
/// Callers must branch on the variant before proceeding.
#[derive(Debug, Clone)]
pub enum ExtractionOutcome {
    Success(RawFields),
    Failure { reason: String },
}

impl ExtractionOutcome {
    pub fn failure(reason: impl Into<String>) -> Self {
        ExtractionOutcome::Failure {
            reason: reason.into(),
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, ExtractionOutcome::Failure { .. })
    }
}

/// A field-extraction strategy. Strategies never return `Err`; every
/// failure mode is folded into `ExtractionOutcome::Failure`.
pub trait Extractor {
    fn extract(
        &self,
        text: &str,
    ) -> impl std::future::Future<Output = ExtractionOutcome> + Send;
}

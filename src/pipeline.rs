//! End-to-end extraction pipeline: load, sanitize, extract, normalize

use crate::config::{Config, Strategy};
use crate::error::Result;
use crate::extraction::llm::PromptedExtractor;
use crate::extraction::pattern::{NoopRecognizer, PatternExtractor};
use crate::extraction::{ExtractionOutcome, Extractor};
use crate::input::InputManager;
use crate::output::formatter::OutputFormat;
use crate::output::formatter::OutputFormatter;
use crate::processing::fallback::FallbackSupplier;
use crate::processing::normalizer::Normalizer;
use crate::processing::record::CvRecord;
use crate::processing::sanitizer::TextSanitizer;
use log::{info, warn};
use std::path::Path;

pub struct PipelineResult {
    pub record: CvRecord,
    pub used_fallback: bool,
}

pub struct Pipeline {
    config: Config,
}

impl Pipeline {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Run the full pipeline on one CV file. Only a missing or unreadable
    /// input is fatal; extraction failures degrade to the fallback supplier.
    pub async fn run(&self, path: &Path, strategy: Option<Strategy>) -> Result<PipelineResult> {
        let mut input_manager = InputManager::new();
        let raw_text = input_manager.extract_text(path).await?;

        let sanitizer = TextSanitizer::new(self.config.sanitizer.mode);
        let clean_text = sanitizer.sanitize(&raw_text);
        info!("Sanitized text length: {} characters", clean_text.len());

        let strategy = strategy.unwrap_or(self.config.extraction.strategy);
        let outcome = match strategy {
            Strategy::Llm => {
                let extractor = PromptedExtractor::new(self.config.llm.clone());
                if !extractor.probe().await {
                    warn!(
                        "Model '{}' not reachable at {}; expecting fallback extraction",
                        self.config.llm.model, self.config.llm.endpoint
                    );
                }
                extractor.extract(&clean_text).await
            }
            Strategy::Pattern => {
                let extractor =
                    PatternExtractor::new(&self.config.keywords, Box::new(NoopRecognizer))?;
                extractor.extract(&clean_text).await
            }
        };

        let normalizer = Normalizer::new(
            &self.config.keywords,
            self.config.extraction.summary_limit,
        )?;

        let (raw_fields, used_fallback) = match outcome {
            ExtractionOutcome::Success(raw) => (raw, false),
            ExtractionOutcome::Failure { reason } => {
                warn!("Extraction failed: {}", reason);
                let fallback = FallbackSupplier::new(self.config.fallback.clone())?;
                (fallback.supply(&clean_text), true)
            }
        };

        Ok(PipelineResult {
            record: normalizer.normalize(&raw_fields),
            used_fallback,
        })
    }

    /// Convenience wrapper returning the rendered output directly
    pub async fn run_rendered(
        &self,
        path: &Path,
        strategy: Option<Strategy>,
        format: OutputFormat,
    ) -> Result<(String, bool)> {
        let result = self.run(path, strategy).await?;
        let rendered = OutputFormatter::render(&result.record, format)?;
        Ok((rendered, result.used_fallback))
    }
}

use tracing::{debug, info, warn};

use crate::adapters::llm::ModelClient;
use crate::core::feedback::{FeedbackRecord, Report};
use crate::core::language::LanguageDetector;
use crate::core::parser::ResponseParser;
use crate::core::prompt::PromptBuilder;
use crate::core::severity::SeverityClassifier;

const FALLBACK_SUMMARY: &str = "Great work on this implementation! The feedback above provides some excellent opportunities to enhance your code's performance, readability, and adherence to best practices. Keep iterating and learning!";

// The client is chosen once, at construction; the pipeline itself holds no
// ambient state and cannot fail: model errors degrade to fallback records.
pub struct TransformationPipeline {
    client: Box<dyn ModelClient>,
    prompt_builder: PromptBuilder,
}

impl TransformationPipeline {
    pub fn new(client: Box<dyn ModelClient>, prompt_builder: PromptBuilder) -> Self {
        Self {
            client,
            prompt_builder,
        }
    }

    pub async fn run(&self, code: &str, comments: &[String], language_hint: Option<&str>) -> Report {
        let language = LanguageDetector::detect(code, language_hint);
        info!(
            model = %self.client.model_name(),
            %language,
            comments = comments.len(),
            "starting review transformation"
        );

        let mut records = Vec::with_capacity(comments.len());
        for (index, comment) in comments.iter().enumerate() {
            let severity = SeverityClassifier::classify(comment);
            debug!(index, severity = severity.as_str(), "processing comment");

            let prompt = self.prompt_builder.build(code, comment, severity, &language);
            let record = match self.client.generate(&prompt).await {
                Ok(raw) => ResponseParser::parse(&raw, comment, severity, &language),
                Err(err) => {
                    warn!(index, %err, "model call failed, substituting fallback feedback");
                    ResponseParser::fallback_record(comment, severity, &language)
                }
            };
            records.push(record);
        }

        let summary = self.summarize(code, &records, &language).await;

        Report {
            language,
            code: code.to_string(),
            records,
            summary,
        }
    }

    async fn summarize(&self, code: &str, records: &[FeedbackRecord], language: &str) -> String {
        let prompt = self
            .prompt_builder
            .build_summary(code, records.len(), language);

        match self.client.generate(&prompt).await {
            Ok(text) if !text.trim().is_empty() => text.trim().to_string(),
            Ok(_) => FALLBACK_SUMMARY.to_string(),
            Err(err) => {
                warn!(%err, "summary generation failed, using fallback");
                FALLBACK_SUMMARY.to_string()
            }
        }
    }
}

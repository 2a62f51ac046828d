pub mod feedback;
pub mod language;
pub mod parser;
pub mod pipeline;
pub mod prompt;
pub mod severity;

pub use feedback::{FeedbackRecord, Report};
pub use language::LanguageDetector;
pub use parser::ResponseParser;
pub use pipeline::TransformationPipeline;
pub use prompt::{PromptBuilder, PromptConfig};
pub use severity::{Severity, SeverityClassifier};

use crate::adapters::llm::{ModelClient, ModelError, Prompt, PromptKind};
use async_trait::async_trait;
use serde_json::json;

use crate::core::Severity;

// Offline stand-in selected when no API credential is configured. Output is
// a pure function of (comment, severity, language) so the pipeline stays
// testable without network access.
pub struct MockClient;

const MOCK_SUMMARY: &str = "Great work! You've implemented functional logic and with a few changes (readability, naming, and idiomatic constructs) the code will be more maintainable and efficient. Keep iterating!";

struct Theme {
    phrase: &'static str,
    rationale: &'static str,
    improvement: &'static str,
}

static NAMING_THEME: Theme = Theme {
    phrase: "choosing a more descriptive name here will make the intent obvious at a glance.",
    rationale: "Descriptive naming is one of the cheapest ways to improve readability: future readers should understand what a value holds without tracing every use of it.",
    improvement: "Rename the short identifier to a more descriptive one, for example `user` instead of `u`.",
};

static PERFORMANCE_THEME: Theme = Theme {
    phrase: "there's an opportunity to simplify this into a single pass.",
    rationale: "Collapsing repeated iteration keeps the work linear and makes the code easier to reason about as the input grows.",
    improvement: "Combine the checks into one filtering expression so the collection is traversed only once.",
};

static IDIOM_THEME: Theme = Theme {
    phrase: "leaning on the language's idioms will tighten this up nicely.",
    rationale: "Comparing booleans against literals is redundant; using the value directly reads better and avoids subtle truthiness bugs.",
    improvement: "Use the boolean value directly in the condition instead of comparing it to a literal.",
};

static GENERAL_THEME: Theme = Theme {
    phrase: "a small refinement here will make this section easier to maintain.",
    rationale: "Consistent structure and clear intent keep the codebase readable and approachable for every contributor.",
    improvement: "Refactor this section into a small, well-named helper that states its intent.",
};

impl MockClient {
    pub fn new() -> Self {
        Self
    }

    fn feedback_payload(&self, prompt: &Prompt) -> String {
        let theme = select_theme(&prompt.comment);
        let opening = match prompt.severity {
            Severity::Harsh => {
                "You've clearly put real work into this and the core logic already does its job; \
                 the original note comes across more bluntly than the change it asks for"
            }
            Severity::Neutral => "Good progress here; this is a solid place to polish",
            Severity::Constructive => "Nice catch to build on",
        };

        let rephrasing = format!(
            "{} — regarding \"{}\": {}",
            opening,
            prompt.comment.trim(),
            theme.phrase
        );

        json!({
            "positive_rephrasing": rephrasing,
            "rationale": theme.rationale,
            "suggested_improvement": theme.improvement,
            "resource_link": resource_for(&prompt.language),
        })
        .to_string()
    }
}

impl Default for MockClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ModelClient for MockClient {
    async fn generate(&self, prompt: &Prompt) -> Result<String, ModelError> {
        match prompt.kind {
            PromptKind::Summary => Ok(MOCK_SUMMARY.to_string()),
            PromptKind::Feedback => Ok(self.feedback_payload(prompt)),
        }
    }

    fn model_name(&self) -> &str {
        "mock"
    }
}

fn select_theme(comment: &str) -> &'static Theme {
    let lower = comment.to_lowercase();
    if ["name", "naming", "identifier", "variable"]
        .iter()
        .any(|kw| lower.contains(kw))
    {
        &NAMING_THEME
    } else if ["== true", "boolean", "redundant", "idiomatic"]
        .iter()
        .any(|kw| lower.contains(kw))
    {
        &IDIOM_THEME
    } else if ["inefficien", "slow", "performance", "loop", "o(n"]
        .iter()
        .any(|kw| lower.contains(kw))
    {
        &PERFORMANCE_THEME
    } else {
        &GENERAL_THEME
    }
}

fn resource_for(language: &str) -> &'static str {
    match language {
        "python" => "https://peps.python.org/pep-0008/",
        "javascript" => "https://developer.mozilla.org/en-US/docs/Web/JavaScript",
        "java" => "https://docs.oracle.com/javase/tutorial/",
        "cpp" | "c" => "https://en.cppreference.com/",
        "go" => "https://go.dev/doc/effective_go",
        "rust" => "https://doc.rust-lang.org/book/",
        "php" => "https://www.php.net/manual/en/",
        _ => "https://developer.mozilla.org/",
    }
}

use serde::{Deserialize, Serialize};

use crate::adapters::llm::{Prompt, PromptKind};
use crate::core::Severity;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptConfig {
    pub system_prompt: String,
    pub summary_system_prompt: String,
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            system_prompt: "You are an expert code reviewer and mentor. Always respond with valid JSON containing the requested fields.".to_string(),
            summary_system_prompt: "You are a supportive senior developer providing encouraging feedback. Write in a warm, mentoring tone.".to_string(),
        }
    }
}

const FEEDBACK_TEMPLATE: &str = r#"You are an experienced senior developer and mentor who excels at giving constructive, empathetic code reviews. Your goal is to transform direct criticism into supportive, educational guidance.

**Code Snippet ({language}):**
```{language}
{code}
```

**Original Comment:** "{comment}"

Please provide a response in the following JSON format:
{
    "positive_rephrasing": "A gentle, encouraging version of the feedback that maintains technical accuracy but uses supportive language",
    "rationale": "A clear explanation of the underlying software engineering principle, performance concern, or best practice",
    "suggested_improvement": "A concrete code example showing the recommended fix",
    "resource_link": "A real, helpful documentation link relevant to {resources}"
}

**Important Guidelines:**
- Be {tone}
- Focus on growth and learning opportunities
- Explain the reasoning behind best practices
- Provide specific, actionable improvements
- Use collaborative language ("we", "let's") when appropriate
- Acknowledge what's working well before suggesting improvements
- Make sure the code example is syntactically correct {language} and directly addresses the issue
- Keep explanations concise but comprehensive

Respond only with valid JSON."#;

const SUMMARY_TEMPLATE: &str = r#"Based on the code review feedback provided for this {language} code snippet, write an encouraging and supportive concluding paragraph that:

1. Acknowledges the developer's effort and current implementation
2. Highlights the main themes from the feedback (e.g., performance, readability, conventions)
3. Frames the suggestions as opportunities for growth
4. Maintains an encouraging, mentor-like tone
5. Ends with motivation for continued learning

**Code Snippet:**
```{language}
{code}
```

**Number of feedback items:** {count}

Write a warm, encouraging paragraph (3-5 sentences) that would make a developer feel supported and motivated to implement the suggestions."#;

pub struct PromptBuilder {
    config: PromptConfig,
}

impl PromptBuilder {
    pub fn new(config: PromptConfig) -> Self {
        Self { config }
    }

    pub fn build(&self, code: &str, comment: &str, severity: Severity, language: &str) -> Prompt {
        let user = FEEDBACK_TEMPLATE
            .replace("{language}", language)
            .replace("{code}", &sanitize_fences(code))
            .replace("{comment}", comment)
            .replace("{tone}", tone_instruction(severity))
            .replace("{resources}", resource_examples(language));

        Prompt {
            kind: PromptKind::Feedback,
            system: self.config.system_prompt.clone(),
            user,
            comment: comment.to_string(),
            severity,
            language: language.to_string(),
        }
    }

    pub fn build_summary(&self, code: &str, feedback_count: usize, language: &str) -> Prompt {
        let user = SUMMARY_TEMPLATE
            .replace("{language}", language)
            .replace("{code}", &sanitize_fences(code))
            .replace("{count}", &feedback_count.to_string());

        Prompt {
            kind: PromptKind::Summary,
            system: self.config.summary_system_prompt.clone(),
            user,
            comment: String::new(),
            severity: Severity::Neutral,
            language: language.to_string(),
        }
    }
}

fn tone_instruction(severity: Severity) -> &'static str {
    match severity {
        Severity::Harsh => {
            "extra gentle and encouraging, as the original comment was quite direct and potentially discouraging"
        }
        Severity::Neutral => "supportive and educational with a collaborative tone",
        Severity::Constructive => "warm, collaborative, and appreciative of the existing effort",
    }
}

fn resource_examples(language: &str) -> &'static str {
    match language {
        "python" => "Python documentation (docs.python.org), PEP 8 style guide",
        "javascript" => "MDN Web Docs, JavaScript.info, ECMAScript specifications",
        "java" => "Oracle Java documentation, Java Code Conventions",
        "cpp" => "cppreference.com, ISO C++ guidelines",
        "c" => "C standard documentation, K&R C book references",
        "go" => "Go documentation (golang.org), Effective Go",
        "rust" => "The Rust Book, Rust by Example",
        "php" => "PHP Manual, PSR standards",
        _ => "relevant language documentation",
    }
}

// A stray ``` inside the snippet would close the fenced block early; break
// the run with a zero-width space.
fn sanitize_fences(code: &str) -> String {
    code.replace("```", "`\u{200b}``")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder() -> PromptBuilder {
        PromptBuilder::new(PromptConfig::default())
    }

    #[test]
    fn test_prompt_embeds_code_and_comment_verbatim() {
        let code = "def f(x):\n    return x + 1";
        let comment = "Variable 'x' is a bad name.";
        let prompt = builder().build(code, comment, Severity::Harsh, "python");

        assert!(prompt.user.contains(code));
        assert!(prompt.user.contains(comment));
        assert!(prompt.user.contains("```python"));
        assert_eq!(prompt.comment, comment);
        assert_eq!(prompt.kind, PromptKind::Feedback);
    }

    #[test]
    fn test_prompt_requests_the_four_fields_as_json() {
        let prompt = builder().build("code", "comment", Severity::Neutral, "rust");

        assert!(prompt.user.contains("positive_rephrasing"));
        assert!(prompt.user.contains("rationale"));
        assert!(prompt.user.contains("suggested_improvement"));
        assert!(prompt.user.contains("resource_link"));
        assert!(prompt.user.contains("Respond only with valid JSON."));
    }

    #[test]
    fn test_tone_varies_by_severity() {
        let harsh = builder().build("code", "c", Severity::Harsh, "python");
        let neutral = builder().build("code", "c", Severity::Neutral, "python");
        let constructive = builder().build("code", "c", Severity::Constructive, "python");

        assert!(harsh.user.contains("extra gentle"));
        assert!(neutral.user.contains("supportive and educational"));
        assert!(constructive.user.contains("appreciative of the existing effort"));
    }

    #[test]
    fn test_fences_inside_code_are_sanitized() {
        let code = "print('```')";
        let prompt = builder().build(code, "comment", Severity::Neutral, "python");

        // The snippet's own fence run must not survive intact.
        assert!(!prompt.user.contains("print('```')"));
        assert!(prompt.user.contains('\u{200b}'));
    }

    #[test]
    fn test_summary_prompt_carries_count_and_language() {
        let prompt = builder().build_summary("code", 3, "go");

        assert_eq!(prompt.kind, PromptKind::Summary);
        assert!(prompt.user.contains("**Number of feedback items:** 3"));
        assert!(prompt.user.contains("```go"));
    }
}

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::core::Severity;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackRecord {
    pub positive_rephrasing: String,
    pub rationale: String,
    pub suggested_improvement: String,
    pub resource_link: String,
    pub raw_comment: String,
    pub severity: Severity,
}

// One record per input comment, same order. Records are never dropped,
// deduplicated, or reordered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub language: String,
    pub code: String,
    pub records: Vec<FeedbackRecord>,
    pub summary: String,
}

impl Report {
    pub fn harsh_count(&self) -> usize {
        self.records
            .iter()
            .filter(|record| record.severity == Severity::Harsh)
            .count()
    }

    pub fn to_markdown(&self) -> String {
        let mut output = String::new();

        output.push_str("# Empathetic Code Review Report\n\n");
        output.push_str(&format!(
            "Generated on: {}\n\n",
            Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
        ));
        output.push_str(&format!(
            "{} comments reviewed, {} flagged as harsh.\n\n",
            self.records.len(),
            self.harsh_count()
        ));

        output.push_str(&format!("## Original Code ({})\n\n", title_case(&self.language)));
        output.push_str(&format!("```{}\n{}\n```\n\n", self.language, self.code.trim_end()));

        output.push_str("## Constructive Feedback\n\n");
        for (index, record) in self.records.iter().enumerate() {
            output.push_str(&format!(
                "### Analysis of Comment {}: \"{}\"\n\n",
                index + 1,
                record.raw_comment
            ));
            output.push_str(&format!(
                "**Positive Rephrasing:** {}\n\n",
                record.positive_rephrasing
            ));
            output.push_str(&format!("**The 'Why':** {}\n\n", record.rationale));
            output.push_str("**Suggested Improvement:**\n");
            output.push_str(&format!(
                "```{}\n{}\n```\n\n",
                self.language, record.suggested_improvement
            ));
            output.push_str(&format!("**Resource Link:** {}\n\n", record.resource_link));
            output.push_str("---\n\n");
        }

        output.push_str("## Summary\n\n");
        output.push_str(&self.summary);
        output.push('\n');

        output
    }
}

fn title_case(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

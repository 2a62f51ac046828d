use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Harsh,
    Neutral,
    Constructive,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Harsh => "harsh",
            Severity::Neutral => "neutral",
            Severity::Constructive => "constructive",
        }
    }
}

// Blunt, absolute, or insulting wording. Any hit wins over the hedging list.
const HARSH_INDICATORS: &[&str] = &[
    "bad",
    "wrong",
    "terrible",
    "awful",
    "stupid",
    "horrible",
    "garbage",
    "useless",
    "unreadable",
    "sloppy",
    "lazy",
    "inefficient",
    "don't",
    "never",
];

// Hedging and suggestion phrasing.
const CONSTRUCTIVE_INDICATORS: &[&str] = &[
    "consider",
    "might",
    "could",
    "suggest",
    "perhaps",
    "maybe",
    "what if",
    "how about",
];

pub struct SeverityClassifier;

impl SeverityClassifier {
    pub fn classify(comment: &str) -> Severity {
        let lower = comment.to_lowercase();

        if HARSH_INDICATORS.iter().any(|word| lower.contains(word)) {
            return Severity::Harsh;
        }
        if CONSTRUCTIVE_INDICATORS
            .iter()
            .any(|word| lower.contains(word))
        {
            return Severity::Constructive;
        }

        Severity::Neutral
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insulting_comment_is_harsh() {
        let severity = SeverityClassifier::classify("This is garbage code, totally unreadable.");
        assert_eq!(severity, Severity::Harsh);
    }

    #[test]
    fn test_hedged_comment_is_constructive() {
        let severity = SeverityClassifier::classify("Consider renaming this for clarity.");
        assert_eq!(severity, Severity::Constructive);
    }

    #[test]
    fn test_plain_statement_is_neutral() {
        let severity = SeverityClassifier::classify("The function returns a list of users.");
        assert_eq!(severity, Severity::Neutral);
    }

    #[test]
    fn test_empty_comment_is_neutral() {
        assert_eq!(SeverityClassifier::classify(""), Severity::Neutral);
    }

    #[test]
    fn test_harsh_wins_over_hedging() {
        // "could" hedges, "terrible" is blunt: blunt wording dominates.
        let severity = SeverityClassifier::classify("This is terrible, you could do better.");
        assert_eq!(severity, Severity::Harsh);
    }

    #[test]
    fn test_classification_is_deterministic() {
        let comment = "Variable 'u' is a bad name.";
        let first = SeverityClassifier::classify(comment);
        let second = SeverityClassifier::classify(comment);
        assert_eq!(first, second);
        assert_eq!(first, Severity::Harsh);
    }
}

use once_cell::sync::Lazy;
use regex::Regex;

pub const DEFAULT_LANGUAGE: &str = "plaintext";

// Ordered signature table; first language with a matching pattern wins, so
// the more specific entries (cpp before c) come first.
static LANGUAGE_SIGNATURES: Lazy<Vec<(&'static str, Vec<Regex>)>> = Lazy::new(|| {
    let table: &[(&str, &[&str])] = &[
        (
            "python",
            &[
                r"(?m)^\s*def\s+\w+\s*\(",
                r"(?m)^\s*import\s+\w+",
                r"(?m)^\s*from\s+\w+\s+import\b",
            ],
        ),
        (
            "javascript",
            &[
                r"function\s+\w+\s*\(",
                r"=>\s*\{",
                r"\b(?:var|let|const)\s+\w+\s*=",
            ],
        ),
        (
            "java",
            &[
                r"public\s+class\s+\w+",
                r"private\s+\w+\s+\w+",
                r"public\s+static\s+void\s+main",
            ],
        ),
        ("cpp", &[r"std::", r"cout\s*<<", r"#include\s*<\w+>"]),
        ("c", &[r"#include\s*<\w+\.h>", r"printf\s*\(", r"int\s+main\s*\("]),
        ("go", &[r"(?m)^package\s+\w+", r"func\s+\w+\s*\(", r"import\s*\("]),
        ("rust", &[r"fn\s+\w+\s*\(", r"let\s+mut\s+\w+", r"(?m)^\s*use\s+\w+::"]),
        ("php", &[r"<\?php", r"\$\w+\s*="]),
    ];

    table
        .iter()
        .map(|(lang, patterns)| {
            let compiled = patterns
                .iter()
                .map(|pattern| Regex::new(pattern).unwrap())
                .collect();
            (*lang, compiled)
        })
        .collect()
});

pub struct LanguageDetector;

impl LanguageDetector {
    // Manual override always wins; heuristics are only consulted without one.
    pub fn detect(code: &str, manual_override: Option<&str>) -> String {
        if let Some(language) = manual_override {
            if !language.trim().is_empty() {
                return language.to_string();
            }
        }

        for (language, patterns) in LANGUAGE_SIGNATURES.iter() {
            if patterns.iter().any(|pattern| pattern.is_match(code)) {
                return (*language).to_string();
            }
        }

        DEFAULT_LANGUAGE.to_string()
    }
}

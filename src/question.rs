use anyhow::{Context, Result};
use regex::Regex;

/// Question shapes that carry a game title, in evaluation order. Each has one
/// capture group for the title. The order is part of the contract: when
/// shapes overlap, the earlier pattern decides the captured span.
const TITLE_PATTERNS: [&str; 7] = [
    r"(?i)when\s+(?:was|did)\s+(.+?)\s+(?:released|come\s+out)\??",
    r"(?i)when\s+did\s+(.+?)\s+release\??",
    r"(?i)what\s+year\s+(?:did|was)\s+(.+?)\s+(?:release|released)\??",
    r"(?i)who\s+(?:developed|made|created)\s+(.+?)\s*\??$",
    r"(?i)who\s+published\s+(.+?)\s*\??$",
    r"(?i)what\s+genre\s+is\s+(.+?)\s*\??$",
    r"(?i)what\s+(?:console|platform|system)\s+(?:is|was)\s+(.+?)\s+(?:on|for)\??",
];

pub struct TitleExtractor {
    patterns: Vec<Regex>,
}

impl TitleExtractor {
    pub fn new() -> Result<Self> {
        let patterns = TITLE_PATTERNS
            .iter()
            .map(|pattern| {
                Regex::new(pattern).with_context(|| format!("invalid title pattern: {pattern}"))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { patterns })
    }

    /// First non-empty title captured by the patterns, tried in order.
    pub fn extract(&self, question: &str) -> Option<String> {
        let trimmed = question.trim();
        self.patterns.iter().find_map(|re| {
            let title = re.captures(trimmed)?.get(1)?.as_str().trim();
            (!title.is_empty()).then(|| title.to_string())
        })
    }
}

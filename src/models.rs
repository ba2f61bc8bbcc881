use serde::{Deserialize, Serialize};

/// One dataset row. `None` on a free-text field means the column is missing
/// from the header; `Some("")` means the column exists but the cell was blank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub title: String,
    pub platform: Option<String>,
    pub genre: Option<String>,
    pub publisher: Option<String>,
    pub developer: Option<String>,
    pub release_date: Option<String>,
    /// Only set when the column exists and the cell is non-empty.
    pub critic_score: Option<String>,
    /// Only set when the column exists and the cell is non-empty.
    pub total_sales: Option<String>,
}

impl GameRecord {
    pub fn platform_str(&self) -> &str {
        self.platform.as_deref().unwrap_or("")
    }

    pub fn release_date_str(&self) -> &str {
        self.release_date.as_deref().unwrap_or("")
    }
}

/// Display and grounding view of the canonical record for a title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameFact {
    pub title: String,
    pub platform: String,
    pub genre: String,
    pub publisher: String,
    pub developer: String,
    pub release_date_display: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub critic_score: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_sales: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub other_platforms: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AskRequest {
    pub question: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AskResponse {
    pub answer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fact: Option<GameFact>,
}

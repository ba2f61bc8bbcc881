use crate::models::GameRecord;

pub const FIELD_DELIMITER: char = ',';

/// Split one line into trimmed fields. A `"` toggles quoted mode and is never
/// emitted; inside quotes the delimiter is literal. Escaped quotes (`""`) are
/// not supported, and an unbalanced quote simply leaves the rest of the line
/// in one field.
pub fn split_fields(line: &str, delimiter: char) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for c in line.chars() {
        if c == '"' {
            in_quotes = !in_quotes;
        } else if c == delimiter && !in_quotes {
            fields.push(current.trim().to_string());
            current.clear();
        } else {
            current.push(c);
        }
    }
    fields.push(current.trim().to_string());
    fields
}

fn normalize_header(cell: &str) -> String {
    cell.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
}

#[derive(Debug, Clone, Copy)]
struct ColumnMap {
    title: usize,
    platform: Option<usize>,
    genre: Option<usize>,
    publisher: Option<usize>,
    developer: Option<usize>,
    release_date: Option<usize>,
    critic_score: Option<usize>,
    total_sales: Option<usize>,
}

impl ColumnMap {
    fn from_header(header: &[String]) -> Option<Self> {
        let find = |name: &str| header.iter().position(|h| h == name);

        Some(Self {
            title: find("title")?,
            platform: find("console").or_else(|| find("platform")),
            genre: find("genre"),
            publisher: find("publisher"),
            developer: find("developer"),
            release_date: find("release_date"),
            critic_score: find("critic_score"),
            total_sales: find("total_sales"),
        })
    }
}

fn cell(cols: &[String], idx: usize) -> String {
    cols.get(idx).cloned().unwrap_or_default()
}

/// Parse CSV text into records. The first non-blank line is the header and
/// must contain a `title` column; anything else yields an empty set.
pub fn parse_games(text: &str) -> Vec<GameRecord> {
    let lines: Vec<&str> = text.lines().filter(|line| !line.trim().is_empty()).collect();
    if lines.len() < 2 {
        return vec![];
    }

    let header: Vec<String> = split_fields(lines[0], FIELD_DELIMITER)
        .iter()
        .map(|h| normalize_header(h))
        .collect();
    let Some(columns) = ColumnMap::from_header(&header) else {
        tracing::debug!("dataset header has no title column");
        return vec![];
    };

    let mut records = Vec::with_capacity(lines.len() - 1);
    for line in &lines[1..] {
        let cols = split_fields(line, FIELD_DELIMITER);
        let title = cell(&cols, columns.title);
        if title.trim().is_empty() {
            continue;
        }

        let text_field = |idx: Option<usize>| idx.map(|idx| cell(&cols, idx));
        let present_field = |idx: Option<usize>| {
            idx.map(|idx| cell(&cols, idx))
                .filter(|value| !value.is_empty())
        };

        records.push(GameRecord {
            title,
            platform: text_field(columns.platform),
            genre: text_field(columns.genre),
            publisher: text_field(columns.publisher),
            developer: text_field(columns.developer),
            release_date: text_field(columns.release_date),
            critic_score: present_field(columns.critic_score),
            total_sales: present_field(columns.total_sales),
        });
    }
    records
}

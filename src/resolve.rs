use crate::facts::to_fact;
use crate::models::{GameFact, GameRecord};

pub fn normalize_title(title: &str) -> String {
    title.trim().to_lowercase()
}

pub fn find_matches<'a>(records: &'a [GameRecord], title: &str) -> Vec<&'a GameRecord> {
    let target = normalize_title(title);
    records
        .iter()
        .filter(|record| normalize_title(&record.title) == target)
        .collect()
}

/// Split a `D-M-YYYY` date (one or two digit day and month) into its groups.
pub(crate) fn split_release_date(raw: &str) -> Option<(&str, &str, &str)> {
    let mut parts = raw.split('-');
    let day = parts.next()?;
    let month = parts.next()?;
    let year = parts.next()?;
    if parts.next().is_some() {
        return None;
    }

    let digits = |s: &str, min: usize, max: usize| {
        (min..=max).contains(&s.len()) && s.bytes().all(|b| b.is_ascii_digit())
    };
    if digits(day, 1, 2) && digits(month, 1, 2) && digits(year, 4, 4) {
        Some((day, month, year))
    } else {
        None
    }
}

/// `YYYY-MM-DD` for a valid release date, otherwise the empty string.
/// The empty key sorts before every real date.
pub fn release_sort_key(raw: &str) -> String {
    match split_release_date(raw) {
        Some((day, month, year)) => format!("{year}-{month:0>2}-{day:0>2}"),
        None => String::new(),
    }
}

/// Earliest release among the matches; equal keys keep source order.
pub fn pick_earliest<'a>(matches: &[&'a GameRecord]) -> Option<&'a GameRecord> {
    match matches {
        [] => None,
        [only] => Some(*only),
        _ => {
            let mut sorted = matches.to_vec();
            sorted.sort_by_cached_key(|record| release_sort_key(record.release_date_str()));
            sorted.first().copied()
        }
    }
}

/// Distinct non-empty platforms other than the canonical one, first seen order.
pub fn other_platforms(matches: &[&GameRecord], canonical_platform: &str) -> Vec<String> {
    let mut platforms: Vec<String> = Vec::new();
    for record in matches {
        let platform = record.platform_str();
        if platform.is_empty() || platform == canonical_platform {
            continue;
        }
        if !platforms.iter().any(|seen| seen == platform) {
            platforms.push(platform.to_string());
        }
    }
    platforms
}

pub fn build_fact(records: &[GameRecord], title: &str) -> Option<GameFact> {
    let matches = find_matches(records, title);
    let canonical = pick_earliest(&matches)?;
    let others = other_platforms(&matches, canonical.platform_str());
    Some(to_fact(canonical, others))
}

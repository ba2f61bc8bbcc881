use crate::models::{GameFact, GameRecord};
use crate::resolve::split_release_date;

/// Reformat `DD-MM-YYYY` as `MM/DD/YYYY`, keeping the original digit groups.
/// Anything else is returned unchanged.
pub fn format_release_date(raw: &str) -> String {
    match split_release_date(raw) {
        Some((day, month, year)) => format!("{month}/{day}/{year}"),
        None => raw.to_string(),
    }
}

pub fn to_fact(record: &GameRecord, other_platforms: Vec<String>) -> GameFact {
    let text = |value: &Option<String>| value.clone().unwrap_or_default();

    GameFact {
        title: record.title.clone(),
        platform: text(&record.platform),
        genre: text(&record.genre),
        publisher: text(&record.publisher),
        developer: text(&record.developer),
        release_date_display: format_release_date(record.release_date_str()),
        critic_score: record.critic_score.clone(),
        total_sales: record.total_sales.clone(),
        other_platforms: (!other_platforms.is_empty()).then_some(other_platforms),
    }
}

/// Render a fact as the grounding sentences handed to the generator.
/// Empty or unknown values are left out.
pub fn render_fact(fact: &GameFact) -> String {
    let mut sentences = Vec::new();

    let date = fact.release_date_display.as_str();
    let platform = fact.platform.as_str();
    sentences.push(match (date.is_empty(), platform.is_empty()) {
        (false, false) => format!("{} was released on {} for {}.", fact.title, date, platform),
        (false, true) => format!("{} was released on {}.", fact.title, date),
        (true, false) => format!("{} was released for {}.", fact.title, platform),
        (true, true) => format!("Title: {}.", fact.title),
    });

    for (label, value) in [
        ("Genre", &fact.genre),
        ("Developer", &fact.developer),
        ("Publisher", &fact.publisher),
    ] {
        if !value.is_empty() {
            sentences.push(format!("{label}: {value}."));
        }
    }

    if let Some(score) = &fact.critic_score {
        sentences.push(format!("Critic score: {score}."));
    }
    if let Some(sales) = &fact.total_sales {
        sentences.push(format!("Total sales: {sales} million."));
    }
    if let Some(platforms) = &fact.other_platforms {
        sentences.push(format!("Also released on: {}.", platforms.join(", ")));
    }

    sentences.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gta_ps3() -> GameRecord {
        GameRecord {
            title: "GTA V".to_string(),
            platform: Some("PS3".to_string()),
            genre: Some("Action".to_string()),
            publisher: Some("Rockstar".to_string()),
            developer: Some("Rockstar North".to_string()),
            release_date: Some("17-09-2013".to_string()),
            critic_score: Some("9.4".to_string()),
            total_sales: Some("20.32".to_string()),
        }
    }

    #[test]
    fn formats_day_month_year() {
        assert_eq!(format_release_date("18-11-2014"), "11/18/2014");
        assert_eq!(format_release_date("26-10-2018"), "10/26/2018");
        assert_eq!(format_release_date("7-9-2013"), "9/7/2013");
    }

    #[test]
    fn non_matching_dates_pass_through() {
        assert_eq!(format_release_date(""), "");
        assert_eq!(format_release_date("2013-09-17"), "2013-09-17");
        assert_eq!(format_release_date("18-11-14"), "18-11-14");
        assert_eq!(format_release_date("18-11-2014 "), "18-11-2014 ");
        assert_eq!(format_release_date("Q3 2020"), "Q3 2020");
    }

    #[test]
    fn fact_keeps_optional_fields_when_present() {
        let others = vec!["PS4".to_string(), "XOne".to_string(), "X360".to_string()];
        let fact = to_fact(&gta_ps3(), others.clone());
        assert_eq!(fact.release_date_display, "09/17/2013");
        assert_eq!(fact.critic_score.as_deref(), Some("9.4"));
        assert_eq!(fact.total_sales.as_deref(), Some("20.32"));
        assert_eq!(fact.other_platforms, Some(others));
    }

    #[test]
    fn fact_omits_absent_fields() {
        let mut record = gta_ps3();
        record.critic_score = None;
        record.total_sales = None;
        record.publisher = None;
        let fact = to_fact(&record, vec![]);
        assert_eq!(fact.publisher, "");
        assert_eq!(fact.critic_score, None);
        assert_eq!(fact.total_sales, None);
        assert_eq!(fact.other_platforms, None);
    }

    #[test]
    fn renders_full_grounding_sentence() {
        let fact = to_fact(&gta_ps3(), vec!["PS4".to_string(), "XOne".to_string()]);
        assert_eq!(
            render_fact(&fact),
            "GTA V was released on 09/17/2013 for PS3. Genre: Action. \
             Developer: Rockstar North. Publisher: Rockstar. Critic score: 9.4. \
             Total sales: 20.32 million. Also released on: PS4, XOne."
        );
    }

    #[test]
    fn renders_sparse_record() {
        let record = GameRecord {
            title: "Untitled Goose Game".to_string(),
            platform: None,
            genre: Some(String::new()),
            publisher: None,
            developer: Some("House House".to_string()),
            release_date: None,
            critic_score: None,
            total_sales: None,
        };
        let fact = to_fact(&record, vec![]);
        assert_eq!(
            render_fact(&fact),
            "Title: Untitled Goose Game. Developer: House House."
        );
    }
}

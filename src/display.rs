use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone};

use crate::models::PlayerData;

const LONG_DATE: &str = "%B %-d, %Y";
const LONG_DATE_TIME: &str = "%B %-d, %Y, %H:%M";
const SHORT_DATE_TIME: &str = "%b %-d, %Y, %H:%M";

/// Up to two upper-cased initials, one per space-separated word.
pub fn initials(name: &str) -> String {
    name.split(' ')
        .filter_map(|word| word.chars().next())
        .take(2)
        .flat_map(char::to_uppercase)
        .collect()
}

pub fn player_initials(player: &PlayerData) -> String {
    player
        .first_name
        .chars()
        .take(1)
        .chain(player.last_name.chars().take(1))
        .flat_map(char::to_uppercase)
        .collect()
}

pub fn player_display_name(player: &PlayerData) -> String {
    match player.nickname.as_deref().map(str::trim) {
        Some(nick) if !nick.is_empty() => nick.to_string(),
        _ => format!("{} {}", player.first_name, player.last_name)
            .trim()
            .to_string(),
    }
}

/// "Team A vs Team B (Cup - 2026-06-11)" -> "Team A vs Team B".
pub fn match_title(name: &str) -> &str {
    name.split('(').next().unwrap_or("").trim()
}

pub fn team_label(name: &str) -> &str {
    if name.trim().is_empty() { "TBD" } else { name }
}

pub fn points_label(points: i64) -> String {
    format!("{points} pts")
}

pub fn format_long_date(raw: &str) -> String {
    let cleaned = raw.trim();
    if cleaned.is_empty() {
        return String::new();
    }
    if let Ok(date) = NaiveDate::parse_from_str(cleaned, "%Y-%m-%d") {
        return date.format(LONG_DATE).to_string();
    }
    match parse_datetime_in(cleaned, &Local) {
        Some(dt) => dt.format(LONG_DATE).to_string(),
        None => cleaned.to_string(),
    }
}

pub fn format_match_datetime(raw: &str) -> String {
    format_datetime_in(raw, &Local, LONG_DATE_TIME)
}

pub fn format_list_datetime(raw: &str) -> String {
    format_datetime_in(raw, &Local, SHORT_DATE_TIME)
}

pub fn format_match_datetime_in<Tz: TimeZone>(raw: &str, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format_datetime_in(raw, tz, LONG_DATE_TIME)
}

pub fn format_list_datetime_in<Tz: TimeZone>(raw: &str, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format_datetime_in(raw, tz, SHORT_DATE_TIME)
}

fn format_datetime_in<Tz: TimeZone>(raw: &str, tz: &Tz, fmt: &str) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let cleaned = raw.trim();
    if cleaned.is_empty() {
        return String::new();
    }
    match parse_datetime_in(cleaned, tz) {
        Some(dt) => dt.format(fmt).to_string(),
        None => cleaned.to_string(),
    }
}

/// ISO strings with an offset are converted to `tz`; naive ones are taken
/// as already being wall-clock time in `tz`.
fn parse_datetime_in<Tz: TimeZone>(raw: &str, tz: &Tz) -> Option<DateTime<Tz>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(tz));
    }
    const NAIVE_FORMATS: [&str; 4] = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S",
    ];
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .and_then(|naive| tz.from_local_datetime(&naive).earliest())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn player(first: &str, last: &str, nickname: Option<&str>) -> PlayerData {
        PlayerData {
            id: 1,
            first_name: first.to_string(),
            last_name: last.to_string(),
            nickname: nickname.map(str::to_string),
            role: None,
            photo_url: None,
        }
    }

    #[test]
    fn initials_take_two_words_and_skip_gaps() {
        assert_eq!(initials("real  madrid club"), "RM");
        assert_eq!(initials("Arsenal"), "A");
        assert_eq!(initials(""), "");
    }

    #[test]
    fn player_name_prefers_nickname() {
        assert_eq!(player_display_name(&player("Edson", "Nascimento", Some("Pelé"))), "Pelé");
        assert_eq!(player_display_name(&player("Ada", "Stone", Some("  "))), "Ada Stone");
        assert_eq!(player_initials(&player("ada", "stone", None)), "AS");
    }

    #[test]
    fn match_title_drops_parenthetical() {
        assert_eq!(match_title("Lions vs Hawks (Cup - 2026-06-11)"), "Lions vs Hawks");
        assert_eq!(match_title("Lions vs Hawks"), "Lions vs Hawks");
    }

    #[test]
    fn dates_format_in_given_zone() {
        assert_eq!(format_long_date("2026-06-11"), "June 11, 2026");
        assert_eq!(
            format_match_datetime_in("2026-06-11T18:00:00+00:00", &Utc),
            "June 11, 2026, 18:00"
        );
        assert_eq!(
            format_list_datetime_in("2026-06-11T18:00:00+02:00", &Utc),
            "Jun 11, 2026, 16:00"
        );
        assert_eq!(format_list_datetime_in("soon", &Utc), "soon");
        assert_eq!(format_long_date(""), "");
    }
}

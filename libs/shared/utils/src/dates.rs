//! Date rendering in the Brazilian Portuguese forms the app displays.

use chrono::{Datelike, NaiveDate, SecondsFormat, DateTime, Utc, Weekday};

const MONTHS: [&str; 12] = [
    "janeiro", "fevereiro", "março", "abril", "maio", "junho",
    "julho", "agosto", "setembro", "outubro", "novembro", "dezembro",
];

fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "segunda-feira",
        Weekday::Tue => "terça-feira",
        Weekday::Wed => "quarta-feira",
        Weekday::Thu => "quinta-feira",
        Weekday::Fri => "sexta-feira",
        Weekday::Sat => "sábado",
        Weekday::Sun => "domingo",
    }
}

/// `"sábado, 01 de março de 2025"`
pub fn format_long_pt_br(date: NaiveDate) -> String {
    format!(
        "{}, {:02} de {} de {}",
        weekday_name(date.weekday()),
        date.day(),
        MONTHS[date.month0() as usize],
        date.year()
    )
}

/// `"01/03/2025"`
pub fn format_short_pt_br(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// ISO-8601 in UTC with millisecond precision and a `Z` suffix,
/// e.g. `"2025-03-01T00:00:00.000Z"`.
pub fn to_iso_millis(instant: &DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

//! Calendar helpers: season mapping, weekday and month names, canonical
//! display orders and the default holiday anchors.

use chrono::{NaiveDate, Weekday};

use crate::models::{Category, Season};

/// The one accepted release-date format.
pub const RELEASE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Monday-first weekday order used by weekly views.
pub const WEEKDAY_ORDER: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Winter-first season order used by seasonal views.
pub const SEASON_ORDER: [Season; 4] = [Season::Winter, Season::Spring, Season::Summer, Season::Fall];

const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

// ── Mapping ───────────────────────────────────────────────────────────────────

/// Map a calendar month to its season.
///
/// Winter = Dec/Jan/Feb, Spring = Mar–May, Summer = Jun–Aug, anything else
/// is Fall. Callers only ever pass months taken from a parsed date.
pub fn season_for_month(month: u32) -> Season {
    match month {
        12 | 1 | 2 => Season::Winter,
        3..=5 => Season::Spring,
        6..=8 => Season::Summer,
        _ => Season::Fall,
    }
}

/// Full English weekday name, e.g. `"Monday"`.
pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Three-letter month label for 1–12; `"?"` outside that range.
pub fn month_abbrev(month: u32) -> &'static str {
    month
        .checked_sub(1)
        .and_then(|i| MONTH_ABBREVIATIONS.get(i as usize))
        .copied()
        .unwrap_or("?")
}

/// Parse a `YYYY-MM-DD` calendar date.
pub fn parse_release_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), RELEASE_DATE_FORMAT).ok()
}

/// Absolute distance in whole days between two dates.
pub fn days_apart(a: NaiveDate, b: NaiveDate) -> i64 {
    (a - b).num_days().abs()
}

// ── Canonical orders as categories ────────────────────────────────────────────

pub fn weekday_categories() -> Vec<Category> {
    WEEKDAY_ORDER.iter().copied().map(Category::Weekday).collect()
}

pub fn season_categories() -> Vec<Category> {
    SEASON_ORDER.iter().copied().map(Category::Season).collect()
}

pub fn month_categories() -> Vec<Category> {
    (1..=12).map(Category::Month).collect()
}

// ── Holidays ──────────────────────────────────────────────────────────────────

/// A named anchor date for the "releases near holidays" view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Holiday {
    pub name: String,
    pub date: NaiveDate,
}

impl Holiday {
    pub fn new(name: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            name: name.into(),
            date,
        }
    }

    /// An anchor supplied without a name is labelled by its date.
    pub fn unnamed(date: NaiveDate) -> Self {
        Self::new(date.format(RELEASE_DATE_FORMAT).to_string(), date)
    }
}

/// New Year's Day, Valentine's Day, Independence Day (US), Halloween and
/// Christmas Day of 2023.
pub fn default_holidays() -> Vec<Holiday> {
    [
        ("New Year's Day", 1, 1),
        ("Valentine's Day", 2, 14),
        ("Independence Day", 7, 4),
        ("Halloween", 10, 31),
        ("Christmas Day", 12, 25),
    ]
    .into_iter()
    .filter_map(|(name, month, day)| {
        NaiveDate::from_ymd_opt(2023, month, day).map(|date| Holiday::new(name, date))
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_season_partition_covers_all_months() {
        let mut seen = std::collections::HashMap::new();
        for month in 1..=12 {
            *seen.entry(season_for_month(month)).or_insert(0) += 1;
        }
        assert_eq!(seen.len(), 4);
        assert!(seen.values().all(|&n| n == 3));
    }

    #[test]
    fn test_season_boundaries() {
        assert_eq!(season_for_month(12), Season::Winter);
        assert_eq!(season_for_month(2), Season::Winter);
        assert_eq!(season_for_month(3), Season::Spring);
        assert_eq!(season_for_month(5), Season::Spring);
        assert_eq!(season_for_month(6), Season::Summer);
        assert_eq!(season_for_month(8), Season::Summer);
        assert_eq!(season_for_month(9), Season::Fall);
        assert_eq!(season_for_month(11), Season::Fall);
    }

    #[test]
    fn test_weekday_names() {
        assert_eq!(weekday_name(Weekday::Mon), "Monday");
        assert_eq!(weekday_name(Weekday::Sun), "Sunday");
        let names: Vec<&str> = WEEKDAY_ORDER.iter().map(|d| weekday_name(*d)).collect();
        assert_eq!(names.first(), Some(&"Monday"));
        assert_eq!(names.len(), 7);
    }

    #[test]
    fn test_month_abbrev() {
        assert_eq!(month_abbrev(1), "Jan");
        assert_eq!(month_abbrev(12), "Dec");
        assert_eq!(month_abbrev(0), "?");
        assert_eq!(month_abbrev(13), "?");
    }

    #[test]
    fn test_parse_release_date() {
        assert_eq!(
            parse_release_date("2023-12-01"),
            NaiveDate::from_ymd_opt(2023, 12, 1)
        );
        assert_eq!(
            parse_release_date(" 2023-06-15 "),
            NaiveDate::from_ymd_opt(2023, 6, 15)
        );
        assert!(parse_release_date("2023-02-30").is_none());
        assert!(parse_release_date("12/01/2023").is_none());
        assert!(parse_release_date("").is_none());
    }

    #[test]
    fn test_days_apart_is_symmetric() {
        let a = NaiveDate::from_ymd_opt(2023, 12, 25).unwrap();
        let b = NaiveDate::from_ymd_opt(2023, 12, 22).unwrap();
        assert_eq!(days_apart(a, b), 3);
        assert_eq!(days_apart(b, a), 3);
        assert_eq!(days_apart(a, a), 0);
    }

    #[test]
    fn test_canonical_categories() {
        assert_eq!(weekday_categories().len(), 7);
        assert_eq!(
            season_categories(),
            vec![
                Category::Season(Season::Winter),
                Category::Season(Season::Spring),
                Category::Season(Season::Summer),
                Category::Season(Season::Fall),
            ]
        );
        assert_eq!(month_categories().first(), Some(&Category::Month(1)));
        assert_eq!(month_categories().last(), Some(&Category::Month(12)));
    }

    #[test]
    fn test_default_holidays() {
        let holidays = default_holidays();
        assert_eq!(holidays.len(), 5);
        assert_eq!(holidays[0].name, "New Year's Day");
        assert_eq!(
            holidays[4].date,
            NaiveDate::from_ymd_opt(2023, 12, 25).unwrap()
        );
    }

    #[test]
    fn test_unnamed_holiday_uses_date_label() {
        let d = NaiveDate::from_ymd_opt(2023, 3, 17).unwrap();
        assert_eq!(Holiday::unnamed(d).name, "2023-03-17");
    }
}

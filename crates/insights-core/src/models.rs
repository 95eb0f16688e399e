use std::cmp::Ordering;
use std::fmt;

use chrono::{NaiveDate, Weekday};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::calendar;

/// Meteorological season a release month falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Season {
    Winter,
    Spring,
    Summer,
    Fall,
}

impl Season {
    /// Display name, e.g. `"Winter"`.
    pub fn name(self) -> &'static str {
        match self {
            Season::Winter => "Winter",
            Season::Spring => "Spring",
            Season::Summer => "Summer",
            Season::Fall => "Fall",
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Calendar attributes computed from a record's release date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivedFields {
    /// Calendar month, 1–12.
    pub release_month: u32,
    /// Day of the week the title was released on.
    pub release_day: Weekday,
    pub release_season: Season,
}

/// One content-release row of the source table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub title: String,
    /// Open categorical value such as `"Show"` or `"Movie"`.
    pub content_type: String,
    /// Open categorical value such as `"English"` or `"Korean"`.
    pub language_indicator: String,
    pub release_date: NaiveDate,
    /// Non-negative viewing hours after separator normalization.
    pub hours_viewed: f64,
    /// Present once the table has gone through the deriver.
    #[serde(default)]
    pub derived: Option<DerivedFields>,
}

impl Record {
    /// Build an un-derived record.
    pub fn new(
        title: impl Into<String>,
        content_type: impl Into<String>,
        language_indicator: impl Into<String>,
        release_date: NaiveDate,
        hours_viewed: f64,
    ) -> Self {
        Self {
            title: title.into(),
            content_type: content_type.into(),
            language_indicator: language_indicator.into(),
            release_date,
            hours_viewed,
            derived: None,
        }
    }
}

// ── Category / Value ──────────────────────────────────────────────────────────

/// A grouping key produced by a categorical column.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Category {
    Text(String),
    Month(u32),
    Weekday(Weekday),
    Season(Season),
    Date(NaiveDate),
}

impl Category {
    pub fn text(value: impl Into<String>) -> Self {
        Category::Text(value.into())
    }

    fn variant_rank(&self) -> u8 {
        match self {
            Category::Text(_) => 0,
            Category::Month(_) => 1,
            Category::Weekday(_) => 2,
            Category::Season(_) => 3,
            Category::Date(_) => 4,
        }
    }
}

/// Natural order: text lexically, months numerically, weekdays from Monday,
/// seasons from Winter, dates chronologically.
impl Ord for Category {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Category::Text(a), Category::Text(b)) => a.cmp(b),
            (Category::Month(a), Category::Month(b)) => a.cmp(b),
            (Category::Weekday(a), Category::Weekday(b)) => a
                .num_days_from_monday()
                .cmp(&b.num_days_from_monday()),
            (Category::Season(a), Category::Season(b)) => a.cmp(b),
            (Category::Date(a), Category::Date(b)) => a.cmp(b),
            _ => self.variant_rank().cmp(&other.variant_rank()),
        }
    }
}

impl PartialOrd for Category {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Text(s) => f.write_str(s),
            Category::Month(m) => write!(f, "{}", m),
            Category::Weekday(d) => f.write_str(calendar::weekday_name(*d)),
            Category::Season(s) => f.write_str(s.name()),
            Category::Date(d) => write!(f, "{}", d.format(calendar::RELEASE_DATE_FORMAT)),
        }
    }
}

/// A single projected cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Category(Category),
    Number(f64),
}

impl Value {
    /// Numeric content, if this cell holds a number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            Value::Category(Category::Month(m)) => Some(f64::from(*m)),
            Value::Category(_) => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Category(c) => c.fmt(f),
            Value::Number(n) => write!(f, "{}", n),
        }
    }
}

/// Insertion-ordered category → value mapping.
///
/// Iteration follows first-seen order, which is what stable tie-breaking in
/// descending sorts relies on.
pub type CategoryMap<V> = IndexMap<Category, V>;

// ── Column ────────────────────────────────────────────────────────────────────

/// Every column of the table, source and derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Title,
    ContentType,
    LanguageIndicator,
    ReleaseDate,
    HoursViewed,
    ReleaseMonth,
    ReleaseDay,
    ReleaseSeason,
}

impl Column {
    /// Columns the source file must provide, in reporting order.
    pub const REQUIRED: [Column; 5] = [
        Column::Title,
        Column::ContentType,
        Column::LanguageIndicator,
        Column::ReleaseDate,
        Column::HoursViewed,
    ];

    /// Header text as it appears in the source file.
    pub fn header(self) -> &'static str {
        match self {
            Column::Title => "Title",
            Column::ContentType => "Content Type",
            Column::LanguageIndicator => "Language Indicator",
            Column::ReleaseDate => "Release Date",
            Column::HoursViewed => "Hours Viewed",
            Column::ReleaseMonth => "Release Month",
            Column::ReleaseDay => "Release Day",
            Column::ReleaseSeason => "Release Season",
        }
    }

    /// Whether the column is computed by the deriver rather than read.
    pub fn is_derived(self) -> bool {
        matches!(
            self,
            Column::ReleaseMonth | Column::ReleaseDay | Column::ReleaseSeason
        )
    }

    /// Grouping key for `record`, or `None` when the column is numeric or
    /// the record has not been derived yet.
    pub fn category(self, record: &Record) -> Option<Category> {
        match self {
            Column::Title => Some(Category::text(record.title.as_str())),
            Column::ContentType => Some(Category::text(record.content_type.as_str())),
            Column::LanguageIndicator => {
                Some(Category::text(record.language_indicator.as_str()))
            }
            Column::ReleaseDate => Some(Category::Date(record.release_date)),
            Column::HoursViewed => None,
            Column::ReleaseMonth => record.derived.map(|d| Category::Month(d.release_month)),
            Column::ReleaseDay => record.derived.map(|d| Category::Weekday(d.release_day)),
            Column::ReleaseSeason => record.derived.map(|d| Category::Season(d.release_season)),
        }
    }

    /// Numeric value for `record`, or `None` for non-numeric columns.
    pub fn numeric(self, record: &Record) -> Option<f64> {
        match self {
            Column::HoursViewed => Some(record.hours_viewed),
            Column::ReleaseMonth => record.derived.map(|d| f64::from(d.release_month)),
            _ => None,
        }
    }

    /// Projected cell for `record`.
    pub fn value(self, record: &Record) -> Option<Value> {
        match self {
            Column::HoursViewed => Some(Value::Number(record.hours_viewed)),
            other => other.category(record).map(Value::Category),
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header())
    }
}

// ── ContentTable ──────────────────────────────────────────────────────────────

/// The immutable in-memory table every aggregation reads from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContentTable {
    records: Vec<Record>,
}

impl ContentTable {
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// `true` when every record carries derived fields (vacuously for an
    /// empty table).
    pub fn is_derived(&self) -> bool {
        self.records.iter().all(|r| r.derived.is_some())
    }

    /// Sum of `metric` over all rows; rows without a numeric value count as 0.
    pub fn total(&self, metric: Column) -> f64 {
        self.records
            .iter()
            .filter_map(|r| metric.numeric(r))
            .sum()
    }
}

impl From<Vec<Record>> for ContentTable {
    fn from(records: Vec<Record>) -> Self {
        Self::new(records)
    }
}

impl<'a> IntoIterator for &'a ContentTable {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

//! Grouping, ranking and filtering over a [`ContentTable`].
//!
//! Every operation is a pure function of its inputs. None of them fail: rows
//! that cannot contribute (no key value, no numeric metric) are skipped, and
//! an empty input gives an empty output.

use chrono::NaiveDate;
use indexmap::IndexMap;

use insights_core::calendar::days_apart;
use insights_core::models::{Category, CategoryMap, Column, ContentTable, Record, Value};

// ── ProjectedRow ──────────────────────────────────────────────────────────────

/// A table row reduced to a chosen set of columns.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectedRow {
    /// Position of the row in the source table.
    pub row_index: usize,
    /// One cell per projected column, in projection order. `None` when the
    /// column has no value for this row (a derived column before derivation).
    pub values: Vec<Option<Value>>,
}

impl ProjectedRow {
    fn from_record(row_index: usize, record: &Record, columns: &[Column]) -> Self {
        Self {
            row_index,
            values: columns.iter().map(|c| c.value(record)).collect(),
        }
    }
}

// ── PivotTable ────────────────────────────────────────────────────────────────

/// Two-way sum: row category → column category → total.
///
/// Every row holds every column category, so a combination with no rows
/// reads as `0.0`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PivotTable {
    columns: Vec<Category>,
    rows: IndexMap<Category, CategoryMap<f64>>,
}

impl PivotTable {
    /// Column categories in first-seen order.
    pub fn column_keys(&self) -> &[Category] {
        &self.columns
    }

    /// Row categories in current order.
    pub fn row_keys(&self) -> impl Iterator<Item = &Category> {
        self.rows.keys()
    }

    pub fn row(&self, key: &Category) -> Option<&CategoryMap<f64>> {
        self.rows.get(key)
    }

    /// Total for one cell; `0.0` when either key is unknown.
    pub fn get(&self, row: &Category, column: &Category) -> f64 {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .copied()
            .unwrap_or(0.0)
    }

    /// The values of one column across all rows, in row order.
    pub fn column_series(&self, column: &Category) -> Vec<(Category, f64)> {
        self.rows
            .iter()
            .map(|(row, cells)| (row.clone(), cells.get(column).copied().unwrap_or(0.0)))
            .collect()
    }

    /// Reorder rows to `order`, adding zero rows for missing categories.
    /// Rows not named in `order` follow afterwards in their existing order.
    pub fn reindex_rows(&self, order: &[Category]) -> PivotTable {
        let zero_row = || -> CategoryMap<f64> {
            self.columns.iter().map(|c| (c.clone(), 0.0)).collect()
        };

        let mut rows: IndexMap<Category, CategoryMap<f64>> = order
            .iter()
            .map(|key| (key.clone(), self.rows.get(key).cloned().unwrap_or_else(zero_row)))
            .collect();
        for (key, cells) in &self.rows {
            if !rows.contains_key(key) {
                rows.insert(key.clone(), cells.clone());
            }
        }

        PivotTable {
            columns: self.columns.clone(),
            rows,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

// ── ContentAggregator ─────────────────────────────────────────────────────────

/// Stateless helper that groups, ranks and filters content records.
pub struct ContentAggregator;

impl ContentAggregator {
    /// Sum `metric` per distinct value of `key`, in first-seen order.
    pub fn sum_by(table: &ContentTable, key: Column, metric: Column) -> CategoryMap<f64> {
        let mut sums = CategoryMap::new();
        for record in table {
            if let Some(category) = key.category(record) {
                *sums.entry(category).or_insert(0.0) += metric.numeric(record).unwrap_or(0.0);
            }
        }
        sums
    }

    /// Number of rows per distinct value of `key`, in first-seen order.
    pub fn count_by(table: &ContentTable, key: Column) -> CategoryMap<usize> {
        let mut counts = CategoryMap::new();
        for record in table {
            if let Some(category) = key.category(record) {
                *counts.entry(category).or_insert(0) += 1;
            }
        }
        counts
    }

    /// Entries ordered by value, largest first. Ties keep first-seen order.
    pub fn sort_desc<V>(map: &CategoryMap<V>) -> Vec<(Category, V)>
    where
        V: PartialOrd + Clone,
    {
        let mut entries: Vec<(Category, V)> =
            map.iter().map(|(k, v)| (k.clone(), v.clone())).collect();
        entries.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        entries
    }

    /// Entries ordered by category (months and dates ascending).
    pub fn sort_by_category<V: Clone>(map: &CategoryMap<V>) -> Vec<(Category, V)> {
        let mut entries: Vec<(Category, V)> =
            map.iter().map(|(k, v)| (k.clone(), v.clone())).collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        entries
    }

    /// Lay `map` out in the caller's canonical `order`.
    ///
    /// Categories with no rows get `V::default()` (zero). Categories present
    /// in `map` but absent from `order` are appended in first-seen order.
    pub fn reindex<V>(map: &CategoryMap<V>, order: &[Category]) -> Vec<(Category, V)>
    where
        V: Default + Clone,
    {
        let mut out: Vec<(Category, V)> = order
            .iter()
            .map(|key| (key.clone(), map.get(key).cloned().unwrap_or_default()))
            .collect();
        for (key, value) in map {
            if !order.contains(key) {
                out.push((key.clone(), value.clone()));
            }
        }
        out
    }

    /// The `n` rows with the largest `metric`, projected to `columns`.
    ///
    /// Ties keep table order. Rows without a numeric metric rank last.
    /// Asking for more rows than exist returns all of them.
    pub fn top_n(
        table: &ContentTable,
        n: usize,
        metric: Column,
        columns: &[Column],
    ) -> Vec<ProjectedRow> {
        if n == 0 {
            return Vec::new();
        }

        let records = table.records();
        let mut ranked: Vec<(usize, f64)> = records
            .iter()
            .enumerate()
            .map(|(i, r)| (i, metric.numeric(r).unwrap_or(f64::NEG_INFINITY)))
            .collect();
        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        ranked.truncate(n);

        ranked
            .into_iter()
            .map(|(i, _)| ProjectedRow::from_record(i, &records[i], columns))
            .collect()
    }

    /// Every row projected to `columns`, in table order.
    pub fn project(table: &ContentTable, columns: &[Column]) -> Vec<ProjectedRow> {
        table
            .records()
            .iter()
            .enumerate()
            .map(|(i, r)| ProjectedRow::from_record(i, r, columns))
            .collect()
    }

    /// Sum `metric` over the cross product of `row_key` × `column_key`.
    pub fn pivot_sum(
        table: &ContentTable,
        row_key: Column,
        column_key: Column,
        metric: Column,
    ) -> PivotTable {
        let mut columns: Vec<Category> = Vec::new();
        let mut sparse: IndexMap<Category, CategoryMap<f64>> = IndexMap::new();

        for record in table {
            let (Some(row), Some(column)) = (row_key.category(record), column_key.category(record))
            else {
                continue;
            };
            if !columns.contains(&column) {
                columns.push(column.clone());
            }
            *sparse
                .entry(row)
                .or_default()
                .entry(column)
                .or_insert(0.0) += metric.numeric(record).unwrap_or(0.0);
        }

        let rows = sparse
            .into_iter()
            .map(|(row, cells)| {
                let dense: CategoryMap<f64> = columns
                    .iter()
                    .map(|c| (c.clone(), cells.get(c).copied().unwrap_or(0.0)))
                    .collect();
                (row, dense)
            })
            .collect();

        PivotTable { columns, rows }
    }

    /// Rows released within `window_days` days (inclusive, either side) of
    /// any anchor. A row close to several anchors appears once.
    pub fn filter_near_dates(
        table: &ContentTable,
        anchors: &[NaiveDate],
        window_days: u32,
    ) -> ContentTable {
        let window = i64::from(window_days);
        table
            .records()
            .iter()
            .filter(|r| {
                anchors
                    .iter()
                    .any(|anchor| days_apart(r.release_date, *anchor) <= window)
            })
            .cloned()
            .collect::<Vec<_>>()
            .into()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deriver::derive;
    use chrono::Weekday;
    use insights_core::calendar::{month_categories, season_categories, weekday_categories};
    use insights_core::models::Season;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn make_record(title: &str, kind: &str, lang: &str, released: &str, hours: f64) -> Record {
        Record::new(title, kind, lang, date(released), hours)
    }

    fn scenario_table() -> ContentTable {
        derive(&ContentTable::new(vec![
            make_record("A", "Show", "English", "2023-12-01", 1000.5),
            make_record("B", "Movie", "English", "2023-06-15", 500.0),
        ]))
    }

    fn wider_table() -> ContentTable {
        derive(&ContentTable::new(vec![
            make_record("Night Agent", "Show", "English", "2023-03-23", 812.0),
            make_record("The Glory", "Show", "Korean", "2023-12-30", 622.0),
            make_record("Extraction 2", "Movie", "English", "2023-06-16", 201.0),
            make_record("Lupin", "Show", "French", "2023-10-05", 100.0),
            make_record("Society of the Snow", "Movie", "Spanish", "2023-12-22", 98.0),
            make_record("Kaleidoscope", "Show", "English", "2023-01-01", 201.0),
        ]))
    }

    // ── sum_by ────────────────────────────────────────────────────────────────

    #[test]
    fn test_sum_by_content_type_scenario() {
        let sums = ContentAggregator::sum_by(&scenario_table(), Column::ContentType, Column::HoursViewed);
        assert_eq!(sums.len(), 2);
        assert_eq!(sums[&Category::text("Show")], 1000.5);
        assert_eq!(sums[&Category::text("Movie")], 500.0);
    }

    #[test]
    fn test_sum_by_conserves_total() {
        let table = wider_table();
        for key in [
            Column::ContentType,
            Column::LanguageIndicator,
            Column::ReleaseMonth,
            Column::ReleaseDay,
            Column::ReleaseSeason,
        ] {
            let sums = ContentAggregator::sum_by(&table, key, Column::HoursViewed);
            let total: f64 = sums.values().sum();
            assert!((total - table.total(Column::HoursViewed)).abs() < 1e-9, "{key}");
        }
    }

    #[test]
    fn test_sum_by_first_seen_order() {
        let sums = ContentAggregator::sum_by(&wider_table(), Column::LanguageIndicator, Column::HoursViewed);
        let keys: Vec<String> = sums.keys().map(|k| k.to_string()).collect();
        assert_eq!(keys, vec!["English", "Korean", "French", "Spanish"]);
    }

    #[test]
    fn test_sum_by_underived_column_is_empty() {
        let table = ContentTable::new(vec![make_record("A", "Show", "English", "2023-01-01", 1.0)]);
        assert!(ContentAggregator::sum_by(&table, Column::ReleaseMonth, Column::HoursViewed).is_empty());
    }

    #[test]
    fn test_sum_by_empty_table() {
        let sums = ContentAggregator::sum_by(&ContentTable::default(), Column::ContentType, Column::HoursViewed);
        assert!(sums.is_empty());
    }

    // ── sort_desc ─────────────────────────────────────────────────────────────

    #[test]
    fn test_sort_desc_scenario() {
        let sums = ContentAggregator::sum_by(&scenario_table(), Column::ContentType, Column::HoursViewed);
        let sorted = ContentAggregator::sort_desc(&sums);
        assert_eq!(
            sorted,
            vec![(Category::text("Show"), 1000.5), (Category::text("Movie"), 500.0)]
        );
    }

    #[test]
    fn test_sort_desc_ties_keep_first_seen_order() {
        let mut map = CategoryMap::new();
        map.insert(Category::text("b"), 5.0);
        map.insert(Category::text("a"), 9.0);
        map.insert(Category::text("c"), 5.0);
        let sorted = ContentAggregator::sort_desc(&map);
        let keys: Vec<String> = sorted.iter().map(|(k, _)| k.to_string()).collect();
        assert_eq!(keys, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_sort_by_category_dates_ascending() {
        let sums = ContentAggregator::sum_by(&wider_table(), Column::ReleaseDate, Column::HoursViewed);
        let sorted = ContentAggregator::sort_by_category(&sums);
        assert_eq!(sorted.first().map(|e| e.0.clone()), Some(Category::Date(date("2023-01-01"))));
        assert_eq!(sorted.last().map(|e| e.0.clone()), Some(Category::Date(date("2023-12-30"))));
    }

    // ── count_by / reindex ────────────────────────────────────────────────────

    #[test]
    fn test_count_by_weekday_reindexed_scenario() {
        let counts = ContentAggregator::count_by(&scenario_table(), Column::ReleaseDay);
        assert_eq!(counts.len(), 2);

        let weekly = ContentAggregator::reindex(&counts, &weekday_categories());
        let expected: Vec<(Category, usize)> = vec![
            (Category::Weekday(Weekday::Mon), 0),
            (Category::Weekday(Weekday::Tue), 0),
            (Category::Weekday(Weekday::Wed), 0),
            (Category::Weekday(Weekday::Thu), 1),
            (Category::Weekday(Weekday::Fri), 1),
            (Category::Weekday(Weekday::Sat), 0),
            (Category::Weekday(Weekday::Sun), 0),
        ];
        assert_eq!(weekly, expected);
    }

    #[test]
    fn test_reindex_seasons_fills_zero() {
        let sums = ContentAggregator::sum_by(&scenario_table(), Column::ReleaseSeason, Column::HoursViewed);
        let seasonal = ContentAggregator::reindex(&sums, &season_categories());
        assert_eq!(
            seasonal,
            vec![
                (Category::Season(Season::Winter), 1000.5),
                (Category::Season(Season::Spring), 0.0),
                (Category::Season(Season::Summer), 500.0),
                (Category::Season(Season::Fall), 0.0),
            ]
        );
    }

    #[test]
    fn test_reindex_appends_unlisted_categories() {
        let mut map = CategoryMap::new();
        map.insert(Category::text("Other"), 3usize);
        map.insert(Category::Month(2), 1usize);
        let out = ContentAggregator::reindex(&map, &month_categories());
        assert_eq!(out.len(), 13);
        assert_eq!(out[1], (Category::Month(2), 1));
        assert_eq!(out[12], (Category::text("Other"), 3));
    }

    // ── top_n ─────────────────────────────────────────────────────────────────

    #[test]
    fn test_top_n_descending_with_stable_ties() {
        let table = wider_table();
        let top = ContentAggregator::top_n(&table, 4, Column::HoursViewed, &[Column::Title]);
        let titles: Vec<String> = top
            .iter()
            .map(|r| r.values[0].as_ref().unwrap().to_string())
            .collect();
        // Extraction 2 and Kaleidoscope tie at 201; table order wins.
        assert_eq!(titles, vec!["Night Agent", "The Glory", "Extraction 2", "Kaleidoscope"]);
    }

    #[test]
    fn test_top_n_zero_is_empty() {
        assert!(ContentAggregator::top_n(&wider_table(), 0, Column::HoursViewed, &[Column::Title]).is_empty());
    }

    #[test]
    fn test_top_n_larger_than_table_returns_all_sorted() {
        let table = wider_table();
        let top = ContentAggregator::top_n(&table, 50, Column::HoursViewed, &[Column::HoursViewed]);
        assert_eq!(top.len(), table.len());
        let hours: Vec<f64> = top
            .iter()
            .map(|r| r.values[0].as_ref().and_then(Value::as_number).unwrap())
            .collect();
        assert!(hours.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn test_top_n_projection_order() {
        let top = ContentAggregator::top_n(
            &scenario_table(),
            1,
            Column::HoursViewed,
            &[Column::Title, Column::ReleaseDate, Column::HoursViewed],
        );
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].row_index, 0);
        assert_eq!(
            top[0].values,
            vec![
                Some(Value::Category(Category::text("A"))),
                Some(Value::Category(Category::Date(date("2023-12-01")))),
                Some(Value::Number(1000.5)),
            ]
        );
    }

    // ── pivot_sum ─────────────────────────────────────────────────────────────

    #[test]
    fn test_pivot_sum_fills_missing_with_zero() {
        let pivot = ContentAggregator::pivot_sum(
            &wider_table(),
            Column::ReleaseMonth,
            Column::ContentType,
            Column::HoursViewed,
        );
        let show = Category::text("Show");
        let movie = Category::text("Movie");
        assert_eq!(pivot.column_keys(), &[show.clone(), movie.clone()]);
        assert_eq!(pivot.get(&Category::Month(12), &show), 622.0);
        assert_eq!(pivot.get(&Category::Month(12), &movie), 98.0);
        assert_eq!(pivot.get(&Category::Month(3), &movie), 0.0);
        assert_eq!(pivot.row(&Category::Month(3)).map(|r| r.len()), Some(2));
        assert_eq!(pivot.get(&Category::Month(2), &show), 0.0);
    }

    #[test]
    fn test_pivot_reindex_rows_to_all_months() {
        let pivot = ContentAggregator::pivot_sum(
            &wider_table(),
            Column::ReleaseMonth,
            Column::ContentType,
            Column::HoursViewed,
        )
        .reindex_rows(&month_categories());
        assert_eq!(pivot.row_count(), 12);
        let shows = pivot.column_series(&Category::text("Show"));
        assert_eq!(shows[0], (Category::Month(1), 201.0));
        assert_eq!(shows[1], (Category::Month(2), 0.0));
        assert_eq!(shows[11], (Category::Month(12), 622.0));
    }

    #[test]
    fn test_pivot_empty_table() {
        let pivot = ContentAggregator::pivot_sum(
            &ContentTable::default(),
            Column::ReleaseMonth,
            Column::ContentType,
            Column::HoursViewed,
        );
        assert!(pivot.is_empty());
        assert!(pivot.column_keys().is_empty());
    }

    // ── filter_near_dates ─────────────────────────────────────────────────────

    #[test]
    fn test_filter_near_dates_inclusive_boundary() {
        let table = ContentTable::new(vec![
            make_record("in", "Show", "English", "2023-12-22", 1.0),
            make_record("out", "Show", "English", "2023-12-21", 1.0),
            make_record("after", "Show", "English", "2023-12-28", 1.0),
        ]);
        let near = ContentAggregator::filter_near_dates(&table, &[date("2023-12-25")], 3);
        let titles: Vec<&str> = near.records().iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["in", "after"]);
    }

    #[test]
    fn test_filter_near_dates_multiple_anchors_no_duplicates() {
        let table = ContentTable::new(vec![make_record("both", "Show", "English", "2023-01-03", 1.0)]);
        let near = ContentAggregator::filter_near_dates(
            &table,
            &[date("2023-01-01"), date("2023-01-05")],
            3,
        );
        assert_eq!(near.len(), 1);
    }

    #[test]
    fn test_filter_near_dates_zero_window_exact_day_only() {
        let table = wider_table();
        let near = ContentAggregator::filter_near_dates(&table, &[date("2023-01-01")], 0);
        assert_eq!(near.len(), 1);
        assert_eq!(near.records()[0].title, "Kaleidoscope");
    }

    #[test]
    fn test_filter_near_dates_no_anchors_or_no_match_is_empty() {
        let table = wider_table();
        assert!(ContentAggregator::filter_near_dates(&table, &[], 3).is_empty());
        assert!(ContentAggregator::filter_near_dates(&table, &[date("2023-08-01")], 3).is_empty());
    }

    #[test]
    fn test_filter_keeps_derived_fields() {
        let near = ContentAggregator::filter_near_dates(&wider_table(), &[date("2023-12-25")], 7);
        assert_eq!(near.len(), 2);
        assert!(near.is_derived());
    }

    // ── project ───────────────────────────────────────────────────────────────

    #[test]
    fn test_project_keeps_table_order() {
        let rows = ContentAggregator::project(&scenario_table(), &[Column::Title, Column::ReleaseSeason]);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].row_index, 1);
        assert_eq!(
            rows[1].values[1],
            Some(Value::Category(Category::Season(Season::Summer)))
        );
    }
}

//! Dashboard report assembly.
//!
//! Runs every aggregation the dashboard tabs need against one derived table
//! and collects the results into a [`DashboardReport`]. The UI only ever
//! reads from the report; it never touches the table itself.

use chrono::NaiveDate;

use insights_core::calendar::{self, Holiday};
use insights_core::models::{Category, Column, ContentTable};
use insights_data::aggregator::{ContentAggregator, PivotTable, ProjectedRow};

/// Default size of the top-content ranking.
pub const DEFAULT_TOP_N: usize = 5;

/// Default days either side of a holiday that count as near it.
pub const DEFAULT_HOLIDAY_WINDOW: u32 = 3;

/// Columns shown in the top-content table.
pub const TOP_TITLE_COLUMNS: [Column; 5] = [
    Column::Title,
    Column::ContentType,
    Column::LanguageIndicator,
    Column::ReleaseDate,
    Column::HoursViewed,
];

/// Columns shown in the holiday-release table.
pub const HOLIDAY_COLUMNS: [Column; 3] = [Column::Title, Column::ReleaseDate, Column::HoursViewed];

// ── ReportOptions ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct ReportOptions {
    pub top_n: usize,
    pub holiday_window: u32,
    pub holidays: Vec<Holiday>,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
            holiday_window: DEFAULT_HOLIDAY_WINDOW,
            holidays: calendar::default_holidays(),
        }
    }
}

impl ReportOptions {
    fn anchor_dates(&self) -> Vec<NaiveDate> {
        self.holidays.iter().map(|h| h.date).collect()
    }
}

// ── DashboardReport ───────────────────────────────────────────────────────────

/// Every series the dashboard displays, computed once per table.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardReport {
    pub record_count: usize,
    pub total_hours: f64,

    /// Hours by content type, largest first.
    pub views_by_type: Vec<(Category, f64)>,
    /// Hours by language, largest first.
    pub views_by_language: Vec<(Category, f64)>,

    /// Hours by release month, January to December.
    pub views_by_month: Vec<(Category, f64)>,
    /// Release count by month, January to December.
    pub releases_by_month: Vec<(Category, usize)>,
    /// Hours by season, Winter to Fall.
    pub views_by_season: Vec<(Category, f64)>,

    pub top_titles: Vec<ProjectedRow>,

    /// Release count by weekday, Monday to Sunday.
    pub releases_by_weekday: Vec<(Category, usize)>,
    /// Hours by weekday, Monday to Sunday.
    pub views_by_weekday: Vec<(Category, f64)>,

    /// Release month × content type, rows January to December.
    pub monthly_views_by_type: PivotTable,

    pub holidays: Vec<Holiday>,
    pub holiday_window: u32,
    /// Releases near a holiday, projected to [`HOLIDAY_COLUMNS`].
    pub holiday_releases: Vec<ProjectedRow>,
    /// Hours of holiday releases by release date, oldest first.
    pub holiday_views_by_date: Vec<(Category, f64)>,
}

impl DashboardReport {
    /// Build the report from a derived table.
    ///
    /// An empty table produces zero totals, empty rankings and canonical
    /// series filled with zeros.
    pub fn build(table: &ContentTable, options: &ReportOptions) -> Self {
        let month_order = calendar::month_categories();
        let weekday_order = calendar::weekday_categories();
        let season_order = calendar::season_categories();
        let hours = Column::HoursViewed;

        let views_by_type =
            ContentAggregator::sort_desc(&ContentAggregator::sum_by(table, Column::ContentType, hours));
        let views_by_language = ContentAggregator::sort_desc(&ContentAggregator::sum_by(
            table,
            Column::LanguageIndicator,
            hours,
        ));

        let views_by_month = ContentAggregator::reindex(
            &ContentAggregator::sum_by(table, Column::ReleaseMonth, hours),
            &month_order,
        );
        let releases_by_month = ContentAggregator::reindex(
            &ContentAggregator::count_by(table, Column::ReleaseMonth),
            &month_order,
        );
        let views_by_season = ContentAggregator::reindex(
            &ContentAggregator::sum_by(table, Column::ReleaseSeason, hours),
            &season_order,
        );

        let top_titles = ContentAggregator::top_n(table, options.top_n, hours, &TOP_TITLE_COLUMNS);

        let releases_by_weekday = ContentAggregator::reindex(
            &ContentAggregator::count_by(table, Column::ReleaseDay),
            &weekday_order,
        );
        let views_by_weekday = ContentAggregator::reindex(
            &ContentAggregator::sum_by(table, Column::ReleaseDay, hours),
            &weekday_order,
        );

        let monthly_views_by_type =
            ContentAggregator::pivot_sum(table, Column::ReleaseMonth, Column::ContentType, hours)
                .reindex_rows(&month_order);

        let near_holidays = ContentAggregator::filter_near_dates(
            table,
            &options.anchor_dates(),
            options.holiday_window,
        );
        let holiday_releases = ContentAggregator::project(&near_holidays, &HOLIDAY_COLUMNS);
        let holiday_views_by_date = ContentAggregator::sort_by_category(
            &ContentAggregator::sum_by(&near_holidays, Column::ReleaseDate, hours),
        );

        tracing::debug!(
            records = table.len(),
            holiday_releases = holiday_releases.len(),
            "dashboard report built"
        );

        Self {
            record_count: table.len(),
            total_hours: table.total(hours),
            views_by_type,
            views_by_language,
            views_by_month,
            releases_by_month,
            views_by_season,
            top_titles,
            releases_by_weekday,
            views_by_weekday,
            monthly_views_by_type,
            holidays: options.holidays.clone(),
            holiday_window: options.holiday_window,
            holiday_releases,
            holiday_views_by_date,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

//! Calendar attribute derivation.

use chrono::{Datelike, NaiveDate};
use insights_core::calendar::season_for_month;
use insights_core::models::{ContentTable, DerivedFields, Record};
use tracing::debug;

/// Month, weekday and season of `date`.
pub fn derive_fields(date: NaiveDate) -> DerivedFields {
    let release_month = date.month();
    DerivedFields {
        release_month,
        release_day: date.weekday(),
        release_season: season_for_month(release_month),
    }
}

/// Return a copy of `table` with derived fields attached to every record.
///
/// Fields are recomputed from `release_date` each time, so deriving an
/// already-derived table yields an identical table.
pub fn derive(table: &ContentTable) -> ContentTable {
    let records: Vec<Record> = table
        .records()
        .iter()
        .map(|record| Record {
            derived: Some(derive_fields(record.release_date)),
            ..record.clone()
        })
        .collect();

    debug!("Derived calendar fields for {} records", records.len());
    ContentTable::new(records)
}

use std::path::{Path, PathBuf};

use chrono::{Datelike, NaiveDate};

use crate::model::TableRole;

/// Default prefix for the men's college basketball season pages.
pub const DEFAULT_BASE_URL: &str = "https://www.sports-reference.com/cbb/seasons/men";
/// First month that belongs to the next season.
pub const SEASON_ROLLOVER_MONTH: u32 = 11;

/// End year of the season in progress on `today`. A season that tips off in
/// November is named after the calendar year it finishes in.
pub fn season_end_year(today: NaiveDate) -> i32 {
    if today.month() >= SEASON_ROLLOVER_MONTH {
        today.year() + 1
    } else {
        today.year()
    }
}

/// `"2025-2026"` style label for logs.
pub fn season_label(end_year: i32) -> String {
    format!("{}-{}", end_year - 1, end_year)
}

/// File name of the season page for `role`, e.g. `2026-school-stats.html`.
pub fn page_file_name(end_year: i32, role: TableRole) -> String {
    format!("{end_year}-{}.html", role.page())
}

/// Absolute URL of the season page for `role`.
pub fn source_url(base_url: &str, end_year: i32, role: TableRole) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        page_file_name(end_year, role)
    )
}

/// Dated output file, `<data_dir>/<run-date>-team_stats.csv`.
pub fn output_path(data_dir: &Path, run_date: NaiveDate) -> PathBuf {
    data_dir.join(format!("{}-team_stats.csv", run_date.format("%Y-%m-%d")))
}

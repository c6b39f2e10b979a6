use std::path::PathBuf;
use std::time::Duration;

use chrono::NaiveDate;

use crate::season::DEFAULT_BASE_URL;

/// Team count of the current Division I field.
pub const EXPECTED_TEAMS: usize = 365;
/// Identity column, date column, and every semantic column of the five sources.
pub const EXPECTED_COLUMNS: usize = 84;

/// What to do when the merged table does not have the expected shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShapePolicy {
    /// Log the mismatch and keep going.
    #[default]
    Advisory,
    /// Fail the run before anything is written.
    Strict,
}

/// Fully resolved parameters for one run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub run_date: NaiveDate,
    pub data_dir: PathBuf,
    pub base_url: String,
    pub timeout: Duration,
    pub shape_policy: ShapePolicy,
    pub expected_shape: (usize, usize),
}

impl RunConfig {
    /// Defaults for a run on `run_date`.
    pub fn new(run_date: NaiveDate) -> Self {
        Self {
            run_date,
            data_dir: PathBuf::from("data"),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
            shape_policy: ShapePolicy::Advisory,
            expected_shape: (EXPECTED_TEAMS, EXPECTED_COLUMNS),
        }
    }

    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = data_dir.into();
        self
    }

    pub fn with_shape_policy(mut self, policy: ShapePolicy) -> Self {
        self.shape_policy = policy;
        self
    }

    pub fn with_expected_shape(mut self, rows: usize, columns: usize) -> Self {
        self.expected_shape = (rows, columns);
        self
    }
}

//! Statistics of the last successful scan.

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

/// Last-run statistics. Fields are unset until the first successful scan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunStats {
    #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
    pub last_run: Option<DateTime<Utc>>,
    #[serde(default)]
    pub checkboxes_found: Option<usize>,
    #[serde(default)]
    pub matches_selected: Option<usize>,
}

impl RunStats {
    /// Stats for a scan that finished now.
    pub fn record(checkboxes_found: usize, matches_selected: usize) -> Self {
        Self::record_at(Utc::now(), checkboxes_found, matches_selected)
    }

    pub fn record_at(at: DateTime<Utc>, checkboxes_found: usize, matches_selected: usize) -> Self {
        Self {
            last_run: Some(at),
            checkboxes_found: Some(checkboxes_found),
            matches_selected: Some(matches_selected),
        }
    }

    /// Last run in local time, `None` before the first run.
    pub fn last_run_local(&self) -> Option<DateTime<Local>> {
        self.last_run.map(|at| at.with_timezone(&Local))
    }
}

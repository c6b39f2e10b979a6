use std::fs;
use std::path::Path;

use crate::error::{Result, StatsError};
use crate::model::MergedTable;

/// Writes the merged table as CSV with a header row and no index column.
///
/// The file is assembled next to `path` and renamed into place, so a failed
/// write never leaves a truncated file under the final name.
pub fn write_merged(path: &Path, table: &MergedTable) -> Result<()> {
    let sink_error = |reason: String| StatsError::SinkWrite {
        path: path.to_path_buf(),
        reason,
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|err| sink_error(err.to_string()))?;
        }
    }

    let staging = path.with_extension("csv.tmp");
    let written = write_records(&staging, table);
    if let Err(reason) = written {
        let _ = fs::remove_file(&staging);
        return Err(sink_error(reason));
    }

    fs::rename(&staging, path).map_err(|err| sink_error(err.to_string()))
}

fn write_records(path: &Path, table: &MergedTable) -> std::result::Result<(), String> {
    let mut writer = csv::Writer::from_path(path).map_err(|err| err.to_string())?;
    writer
        .write_record(&table.columns)
        .map_err(|err| err.to_string())?;
    for row in &table.rows {
        writer
            .write_record(row.iter().map(|cell| cell.to_string()))
            .map_err(|err| err.to_string())?;
    }
    writer.flush().map_err(|err| err.to_string())
}

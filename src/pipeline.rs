use std::path::PathBuf;

use tracing::{info, instrument, warn};

use crate::config::{RunConfig, ShapePolicy};
use crate::error::{Result, StatsError};
use crate::flatten::extract_table;
use crate::io::csv_write;
use crate::io::fetch::PageSource;
use crate::mapping::map_columns;
use crate::merge::merge_sources;
use crate::model::{MergedTable, NormalizedTable, TableRole};
use crate::sanitize::sanitize_rows;
use crate::season;

/// Summary of a completed run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    pub season_end_year: i32,
    pub output: PathBuf,
    pub source_shapes: Vec<(TableRole, (usize, usize))>,
    pub shape: (usize, usize),
}

/// Fetches, extracts, maps, and sanitizes the table for one role.
#[instrument(level = "info", skip(source, base_url), fields(%role))]
pub fn load_source(
    source: &dyn PageSource,
    base_url: &str,
    end_year: i32,
    role: TableRole,
) -> Result<NormalizedTable> {
    let url = season::source_url(base_url, end_year, role);
    let markup = source.fetch_page(&url, &season::page_file_name(end_year, role))?;
    let raw = extract_table(&markup, role.table_id())?;
    let mapped = map_columns(&raw, role)?;
    Ok(sanitize_rows(mapped))
}

/// Loads every source in merge order.
pub fn collect_sources(
    config: &RunConfig,
    source: &dyn PageSource,
    end_year: i32,
) -> Result<Vec<NormalizedTable>> {
    let mut tables = Vec::with_capacity(TableRole::MERGE_ORDER.len());
    for role in TableRole::MERGE_ORDER {
        let table = load_source(source, &config.base_url, end_year, role)?;
        let (rows, columns) = table.shape();
        info!(%role, rows, columns, "source table ready");
        tables.push(table);
    }
    Ok(tables)
}

/// Compares the merged shape with the expected one according to the policy.
pub fn check_shape(merged: &MergedTable, config: &RunConfig) -> Result<()> {
    let actual = merged.shape();
    if actual == config.expected_shape {
        return Ok(());
    }
    match config.shape_policy {
        ShapePolicy::Advisory => {
            warn!(
                expected = ?config.expected_shape,
                actual = ?actual,
                "merged table shape differs from the expected shape"
            );
            Ok(())
        }
        ShapePolicy::Strict => Err(StatsError::ShapeMismatch {
            expected: config.expected_shape,
            actual,
        }),
    }
}

/// Runs the whole pipeline. The output file is written only after every
/// source loaded and merged cleanly.
#[instrument(level = "info", skip_all, fields(run_date = %config.run_date))]
pub fn run(config: &RunConfig, source: &dyn PageSource) -> Result<RunReport> {
    let end_year = season::season_end_year(config.run_date);
    info!(season = %season::season_label(end_year), "scraping season tables");

    let tables = collect_sources(config, source, end_year)?;
    let source_shapes = tables.iter().map(|table| (table.role, table.shape())).collect();

    let merged = merge_sources(&tables, config.run_date)?;
    let shape = merged.shape();
    info!(rows = shape.0, columns = shape.1, "merged all source tables");
    check_shape(&merged, config)?;

    let output = season::output_path(&config.data_dir, config.run_date);
    csv_write::write_merged(&output, &merged)?;
    info!(output = %output.display(), "team stats written");

    Ok(RunReport {
        season_end_year: end_year,
        output,
        source_shapes,
        shape,
    })
}

//! Reconciles the five source tables into one row per team.
//!
//! The merge runs in two independent passes. [`outer_join`] unions the sources
//! on the raw team label, keeping every label seen anywhere. [`collapse`] then
//! groups the joined rows by canonical key and coalesces each group with
//! [`prioritized_merge`], so a bare listing beats a qualified one and the
//! qualified listing only fills gaps.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use chrono::NaiveDate;
use tracing::{info, instrument, warn};

use crate::error::{Result, StatsError};
use crate::identity::canonicalize;
use crate::model::{
    CellValue, DATE_COLUMN, JoinedTable, MergedTable, NormalizedTable, TEAM_COLUMN,
};

/// Full outer join of the sources on the raw team label.
///
/// Output keys are sorted. A label repeated inside one source yields one joined
/// row per combination, exactly like a relational outer join.
pub fn outer_join(tables: &[NormalizedTable]) -> Result<JoinedTable> {
    let mut columns = vec![TEAM_COLUMN.to_string()];
    let mut seen: HashSet<&str> = HashSet::new();
    for table in tables {
        for column in table.semantic_columns() {
            if column == TEAM_COLUMN || !seen.insert(column.as_str()) {
                return Err(StatsError::DuplicateColumn(column.clone()));
            }
            columns.push(column.clone());
        }
    }

    let indexed: Vec<BTreeMap<String, Vec<&[CellValue]>>> =
        tables.iter().map(index_by_team).collect();
    let keys: BTreeSet<&String> = indexed.iter().flat_map(|index| index.keys()).collect();
    let blanks: Vec<Vec<CellValue>> = tables
        .iter()
        .map(|table| vec![CellValue::Null; table.semantic_columns().len()])
        .collect();

    let mut rows = Vec::with_capacity(keys.len());
    for key in keys {
        let mut combos: Vec<Vec<CellValue>> = vec![vec![CellValue::Text(key.clone())]];
        for (index, blank) in indexed.iter().zip(&blanks) {
            let candidates: Vec<&[CellValue]> = match index.get(key) {
                Some(found) => found.clone(),
                None => vec![blank.as_slice()],
            };
            combos = combos
                .iter()
                .flat_map(|prefix| {
                    candidates.iter().map(move |cells| {
                        let mut row = prefix.clone();
                        row.extend_from_slice(cells);
                        row
                    })
                })
                .collect();
        }
        rows.extend(combos);
    }

    Ok(JoinedTable { columns, rows })
}

fn index_by_team(table: &NormalizedTable) -> BTreeMap<String, Vec<&[CellValue]>> {
    let mut index: BTreeMap<String, Vec<&[CellValue]>> = BTreeMap::new();
    for row in &table.rows {
        if let Some(team) = row.first().and_then(CellValue::as_text) {
            index.entry(team).or_default().push(&row[1..]);
        }
    }
    index
}

/// Coalesces candidate rows into one: candidates are stably sorted by
/// `priority` (lowest first) and each column takes the first non-null value.
pub fn prioritized_merge<R, K, F>(mut candidates: Vec<R>, priority: F) -> Vec<CellValue>
where
    R: AsRef<[CellValue]>,
    K: Ord,
    F: FnMut(&R) -> K,
{
    candidates.sort_by_key(priority);
    let width = candidates
        .iter()
        .map(|row| row.as_ref().len())
        .max()
        .unwrap_or(0);

    (0..width)
        .map(|col| {
            candidates
                .iter()
                .find_map(|row| row.as_ref().get(col).filter(|cell| !cell.is_null()))
                .cloned()
                .unwrap_or(CellValue::Null)
        })
        .collect()
}

/// A joined row's metric cells tagged with whether its label was qualified.
#[derive(Debug, Clone, Copy)]
struct Candidate<'a> {
    qualified: bool,
    cells: &'a [CellValue],
}

impl AsRef<[CellValue]> for Candidate<'_> {
    fn as_ref(&self) -> &[CellValue] {
        self.cells
    }
}

/// Groups joined rows by canonical key, one output row per key in key order.
pub fn collapse(joined: &JoinedTable) -> JoinedTable {
    let mut groups: BTreeMap<String, Vec<Candidate<'_>>> = BTreeMap::new();
    for row in &joined.rows {
        let Some(label) = row.first().and_then(CellValue::as_text) else {
            continue;
        };
        let team = canonicalize(&label);
        if team.key.is_empty() {
            warn!(label = %label, "team label is empty once the qualifier is removed");
            continue;
        }
        groups.entry(team.key).or_default().push(Candidate {
            qualified: team.qualified,
            cells: &row[1..],
        });
    }

    let rows = groups
        .into_iter()
        .map(|(key, candidates)| {
            let mut row = vec![CellValue::Text(key)];
            row.extend(prioritized_merge(candidates, |candidate| candidate.qualified));
            row
        })
        .collect();

    JoinedTable {
        columns: joined.columns.clone(),
        rows,
    }
}

/// Stamps every row with the run date. An empty table is a domain failure.
pub fn finalize(collapsed: JoinedTable, run_date: NaiveDate) -> Result<MergedTable> {
    if collapsed.rows.is_empty() {
        return Err(StatsError::EmptyResult);
    }

    let stamp = CellValue::Text(run_date.format("%Y-%m-%d").to_string());
    let mut columns = collapsed.columns;
    columns.push(DATE_COLUMN.to_string());
    let rows = collapsed
        .rows
        .into_iter()
        .map(|mut row| {
            row.push(stamp.clone());
            row
        })
        .collect();

    Ok(MergedTable { columns, rows })
}

/// Outer join, collapse, and date stamp in one step.
#[instrument(level = "info", skip_all, fields(%run_date, sources = tables.len()))]
pub fn merge_sources(tables: &[NormalizedTable], run_date: NaiveDate) -> Result<MergedTable> {
    let joined = outer_join(tables)?;
    info!(rows = joined.rows.len(), columns = joined.columns.len(), "outer join complete");
    let collapsed = collapse(&joined);
    info!(teams = collapsed.rows.len(), "collapsed rows by canonical team key");
    finalize(collapsed, run_date)
}

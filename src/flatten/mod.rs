use std::collections::HashSet;

use tracing::{debug, instrument, warn};

use crate::error::Result;
use crate::io::html::{self, TableGrid};
use crate::model::{CellValue, RawTable};

/// Prefix of the synthetic names given to blank header cells.
pub const PLACEHOLDER_PREFIX: &str = "Unnamed";

/// `(group, sub-label) -> flat name` for the win/loss columns that repeat under
/// several header groups. Every other two-level header keeps its sub-label.
pub const DISAMBIGUATED_HEADERS: &[(&str, &str, &str)] = &[
    ("Overall", "W", "O. W"),
    ("Overall", "L", "O. L"),
    ("Conf.", "W", "C. W"),
    ("Conf.", "L", "C. L"),
    ("Home", "W", "H. W"),
    ("Home", "L", "H. L"),
    ("Away", "W", "A. W"),
    ("Away", "L", "A. L"),
];

/// A leaf header with the group label sitting above it, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderLabel {
    pub group: Option<String>,
    pub label: String,
}

impl HeaderLabel {
    /// Single flat column name for this header.
    pub fn flatten(&self) -> String {
        if let Some(group) = &self.group {
            let hit = DISAMBIGUATED_HEADERS
                .iter()
                .find(|(grp, sub, _)| *grp == group.as_str() && *sub == self.label.as_str());
            if let Some((_, _, flat)) = hit {
                return (*flat).to_string();
            }
        }
        self.label.clone()
    }
}

/// Returns true for names generated for blank header cells.
pub fn is_placeholder(name: &str) -> bool {
    name.starts_with(PLACEHOLDER_PREFIX)
}

/// Locates `table_id` in the markup and returns it with flattened headers.
#[instrument(level = "debug", skip(markup))]
pub fn extract_table(markup: &str, table_id: &str) -> Result<RawTable> {
    let grid = html::read_table(markup, table_id)?;
    Ok(flatten_grid(table_id, &grid))
}

/// Builds the leaf header labels, naming blank cells with placeholders.
pub fn header_labels(grid: &TableGrid) -> Vec<HeaderLabel> {
    let width = grid.width();
    let depth = grid.header_rows.len();

    (0..width)
        .map(|col| {
            let label = match grid.header_rows.last() {
                Some(row) => cell_or_placeholder(row, col, depth.saturating_sub(1), depth),
                None => placeholder(col, 0, 1),
            };
            let group = (depth >= 2)
                .then(|| cell_or_placeholder(&grid.header_rows[depth - 2], col, depth - 2, depth));
            HeaderLabel { group, label }
        })
        .collect()
}

/// Flattens the grid: headers collapse to single names, placeholder columns
/// are dropped, and rows with no values at all are skipped.
pub fn flatten_grid(table_id: &str, grid: &TableGrid) -> RawTable {
    let flat: Vec<String> = header_labels(grid).iter().map(HeaderLabel::flatten).collect();
    let keep: Vec<usize> = (0..flat.len()).filter(|idx| !is_placeholder(&flat[*idx])).collect();

    let mut seen = HashSet::new();
    for idx in &keep {
        if !seen.insert(flat[*idx].as_str()) {
            warn!(table_id, column = %flat[*idx], "duplicate column name after flattening");
        }
    }

    let columns: Vec<String> = keep.iter().map(|idx| flat[*idx].clone()).collect();
    let mut rows = Vec::with_capacity(grid.body_rows.len());
    let mut empty = 0usize;
    for body_row in &grid.body_rows {
        let row: Vec<CellValue> = keep
            .iter()
            .map(|idx| {
                body_row
                    .get(*idx)
                    .map(|text| CellValue::parse(text))
                    .unwrap_or(CellValue::Null)
            })
            .collect();
        if row.iter().all(CellValue::is_null) {
            empty += 1;
            continue;
        }
        rows.push(row);
    }
    debug!(table_id, rows = rows.len(), empty, "flattened table");

    RawTable {
        table_id: table_id.to_string(),
        columns,
        rows,
    }
}

fn cell_or_placeholder(row: &[String], col: usize, level: usize, depth: usize) -> String {
    match row.get(col) {
        Some(text) if !text.is_empty() => text.clone(),
        _ => placeholder(col, level, depth),
    }
}

fn placeholder(col: usize, level: usize, depth: usize) -> String {
    if depth > 1 {
        format!("{PLACEHOLDER_PREFIX}: {col}_level_{level}")
    } else {
        format!("{PLACEHOLDER_PREFIX}: {col}")
    }
}

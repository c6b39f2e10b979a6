use tracing::debug;

use crate::model::{CellValue, NormalizedTable};

/// Textual tokens the markup uses for a missing team label.
pub const NULL_TOKENS: &[&str] = &["", "nan", "NaN"];

/// Drops repeated header rows and rows without a usable team label, trims the
/// team column, and rebuilds the row list so positions are dense from zero.
pub fn sanitize_rows(table: NormalizedTable) -> NormalizedTable {
    let NormalizedTable {
        role,
        header_token,
        columns,
        rows,
    } = table;

    let before = rows.len();
    let rows: Vec<Vec<CellValue>> = rows
        .into_iter()
        .filter_map(|mut row| {
            let team = clean_team(row.first()?, &header_token)?;
            row[0] = CellValue::Text(team);
            Some(row)
        })
        .collect();
    debug!(%role, dropped = before - rows.len(), kept = rows.len(), "sanitized rows");

    NormalizedTable {
        role,
        header_token,
        columns,
        rows,
    }
}

/// Trimmed team label, or `None` when the cell is a header repeat or null.
pub fn clean_team(cell: &CellValue, header_token: &str) -> Option<String> {
    let text = cell.as_text()?;
    if text == header_token {
        return None;
    }
    let trimmed = text.trim();
    if NULL_TOKENS.contains(&trimmed) || trimmed == header_token {
        return None;
    }
    Some(trimmed.to_string())
}

//! Markup access for the season pages.
//!
//! Locates a single `<table>` by its `id` and reads it into a rectangular grid
//! of header rows and body rows. `colspan` is expanded so every row lines up
//! with the leaf header columns.

use scraper::{ElementRef, Html, Selector};

use crate::error::{Result, StatsError};

/// Largest `colspan` the HTML standard allows; wider spans are malformed.
pub const MAX_COLSPAN: usize = 1000;

/// Header and body text of one table, colspans expanded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableGrid {
    /// Header rows from outermost (group) to innermost (leaf label).
    pub header_rows: Vec<Vec<String>>,
    pub body_rows: Vec<Vec<String>>,
}

impl TableGrid {
    /// Number of leaf columns, taken from the widest header row.
    pub fn width(&self) -> usize {
        self.header_rows.iter().map(Vec::len).max().unwrap_or_else(|| {
            self.body_rows.iter().map(Vec::len).max().unwrap_or(0)
        })
    }
}

/// Finds the table with the given `id` and reads its grid.
pub fn read_table(markup: &str, table_id: &str) -> Result<TableGrid> {
    let document = Html::parse_document(markup);
    let table_selector = selector(&format!("table[id=\"{table_id}\"]"))?;

    let table = document
        .select(&table_selector)
        .next()
        .ok_or_else(|| StatsError::Extraction {
            location: format!("table '{table_id}'"),
            reason: "table not present in markup".to_string(),
        })?;

    let head_rows: Vec<ElementRef> = table.select(&selector("thead > tr")?).collect();
    let body_rows: Vec<ElementRef> = table.select(&selector("tbody > tr")?).collect();

    let mut grid = TableGrid::default();
    if head_rows.is_empty() {
        // Without a <thead>, leading rows made only of <th> cells are the header.
        let mut in_header = true;
        for row in body_rows {
            let cells = row_cells(row);
            let all_th = cells.iter().all(|cell| cell.value().name() == "th");
            if in_header && !cells.is_empty() && all_th {
                grid.header_rows.push(expand_cells(&cells, table_id)?);
            } else {
                in_header = false;
                grid.body_rows.push(expand_cells(&cells, table_id)?);
            }
        }
    } else {
        grid.header_rows = head_rows
            .into_iter()
            .map(|row| expand_cells(&row_cells(row), table_id))
            .collect::<Result<_>>()?;
        grid.body_rows = body_rows
            .into_iter()
            .map(|row| expand_cells(&row_cells(row), table_id))
            .collect::<Result<_>>()?;
    }

    Ok(grid)
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|err| StatsError::InvalidSelector(format!("{css}: {err}")))
}

fn row_cells(row: ElementRef<'_>) -> Vec<ElementRef<'_>> {
    row.children()
        .filter_map(ElementRef::wrap)
        .filter(|cell| matches!(cell.value().name(), "th" | "td"))
        .collect()
}

fn expand_cells(cells: &[ElementRef<'_>], table_id: &str) -> Result<Vec<String>> {
    let mut expanded = Vec::with_capacity(cells.len());
    for cell in cells {
        let span = cell
            .value()
            .attr("colspan")
            .and_then(|value| value.trim().parse::<usize>().ok())
            .filter(|span| *span > 0)
            .unwrap_or(1);
        if span > MAX_COLSPAN {
            return Err(StatsError::Extraction {
                location: format!("table '{table_id}'"),
                reason: format!("colspan {span} exceeds {MAX_COLSPAN}"),
            });
        }
        let text = normalize_ws(&cell.text().collect::<String>());
        expanded.extend(std::iter::repeat_n(text, span));
    }
    Ok(expanded)
}

/// Collapses whitespace runs (including non-breaking spaces) to single spaces
/// and trims the ends.
pub fn normalize_ws(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

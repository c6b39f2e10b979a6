use std::fmt;

/// Name of the identity column every normalized table leads with.
pub const TEAM_COLUMN: &str = "team_name";
/// Name of the run-date column appended to the merged table.
pub const DATE_COLUMN: &str = "date";

/// A single table cell after parsing the markup.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// Non-numeric text.
    Text(String),
    /// Finite numeric literal.
    Number(f64),
    /// Missing value.
    Null,
}

impl CellValue {
    /// Parses trimmed cell text. Thousands separators are ignored when deciding
    /// whether the text is numeric; non-finite parses (`nan`, `inf`) stay text.
    pub fn parse(text: &str) -> Self {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return CellValue::Null;
        }
        match trimmed.replace(',', "").parse::<f64>() {
            Ok(number) if number.is_finite() => CellValue::Number(number),
            _ => CellValue::Text(trimmed.to_string()),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Renders the cell as it appears in the team column or the CSV output.
    pub fn as_text(&self) -> Option<String> {
        match self {
            CellValue::Null => None,
            other => Some(other.to_string()),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(value) => f.write_str(value),
            CellValue::Number(value) => write!(f, "{value}"),
            CellValue::Null => Ok(()),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

/// The five source tables a season is assembled from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TableRole {
    Ratings,
    Basic,
    BasicOpponent,
    Advanced,
    AdvancedOpponent,
}

impl TableRole {
    /// All roles in merge order. The order fixes the column order of the output.
    pub const MERGE_ORDER: [TableRole; 5] = [
        TableRole::AdvancedOpponent,
        TableRole::Advanced,
        TableRole::BasicOpponent,
        TableRole::Basic,
        TableRole::Ratings,
    ];

    /// `id` attribute of the table element on the source page.
    pub fn table_id(self) -> &'static str {
        match self {
            TableRole::Ratings => "ratings",
            TableRole::Basic => "basic_school_stats",
            TableRole::BasicOpponent => "basic_opp_stats",
            TableRole::Advanced => "adv_school_stats",
            TableRole::AdvancedOpponent => "adv_opp_stats",
        }
    }

    /// Page slug appended to the season year in the source URL.
    pub fn page(self) -> &'static str {
        match self {
            TableRole::Ratings => "ratings",
            TableRole::Basic => "school-stats",
            TableRole::BasicOpponent => "opponent-stats",
            TableRole::Advanced => "advanced-school-stats",
            TableRole::AdvancedOpponent => "advanced-opponent-stats",
        }
    }
}

impl fmt::Display for TableRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TableRole::Ratings => "ratings",
            TableRole::Basic => "basic",
            TableRole::BasicOpponent => "basic-opponent",
            TableRole::Advanced => "advanced",
            TableRole::AdvancedOpponent => "advanced-opponent",
        };
        f.write_str(name)
    }
}

/// A table read from markup with its headers flattened to single names.
#[derive(Debug, Clone, PartialEq)]
pub struct RawTable {
    pub table_id: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

impl RawTable {
    /// Position of the first column carrying `name`.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }
}

/// A single-source table with canonical column names. The team column is
/// always at position 0.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedTable {
    pub role: TableRole,
    /// Source label of the team column, used to spot repeated header rows.
    pub header_token: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

impl NormalizedTable {
    /// `(rows, columns)` of the table.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows.len(), self.columns.len())
    }

    /// Row at dense position `index`.
    pub fn row(&self, index: usize) -> Option<&[CellValue]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    /// Metric columns, i.e. everything except the team column.
    pub fn semantic_columns(&self) -> &[String] {
        &self.columns[1..]
    }
}

/// Result of the outer join: one row per raw team label combination, not yet
/// reconciled by canonical key.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinedTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

/// Final artifact: one row per canonical team key plus the run date.
#[derive(Debug, Clone, PartialEq)]
pub struct MergedTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

impl MergedTable {
    /// `(rows, columns)` of the table.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows.len(), self.columns.len())
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    /// Looks up the cell in `column` for the row whose team column is `team`.
    pub fn value(&self, team: &str, column: &str) -> Option<&CellValue> {
        let column_idx = self.column_index(column)?;
        self.rows
            .iter()
            .find(|row| matches!(&row[0], CellValue::Text(name) if name == team))
            .and_then(|row| row.get(column_idx))
    }
}

use std::collections::HashSet;

use tracing::{instrument, warn};

use crate::error::{Result, StatsError};
use crate::model::{CellValue, NormalizedTable, RawTable, TableRole, TEAM_COLUMN};

/// Source label of the team column in every season table.
pub const TEAM_SOURCE_LABEL: &str = "School";
/// Prefix applied to every metric of the opponent tables.
pub const OPPONENT_PREFIX: &str = "opponent_";

const RATINGS: &[(&str, &str)] = &[
    ("Conf", "conference"),
    ("Pts", "points_per_game"),
    ("Opp", "opponent_points_per_game"),
    ("MOV", "margin_of_victory"),
    ("OSRS", "offensive_srs"),
    ("DSRS", "defensive_srs"),
    ("ORtg", "offensive_rating_adjusted"),
    ("DRtg", "defensive_rating_adjusted"),
    ("NRtg", "net_rating_adjusted"),
];

const SEASON_RECORD: &[(&str, &str)] = &[
    ("G", "games"),
    ("O. W", "wins"),
    ("O. L", "losses"),
    ("W-L%", "win_percentage"),
    ("SRS", "simple_rating_system"),
    ("SOS", "strength_of_schedule"),
    ("C. W", "wins_conf"),
    ("C. L", "losses_conf"),
    ("H. W", "home_wins"),
    ("H. L", "home_losses"),
    ("A. W", "wins_visitor"),
    ("A. L", "losses_visitor"),
    ("Tm.", "team_points"),
    ("Opp.", "opponent_points"),
    ("MP", "minutes_played"),
];

const BOX_SCORE: &[(&str, &str)] = &[
    ("FG", "field_goals"),
    ("FGA", "field_goals_attempted"),
    ("FG%", "field_goal_percentage"),
    ("3P", "three_point_field_goals"),
    ("3PA", "three_point_field_goals_attempted"),
    ("3P%", "three_point_percentage"),
    ("FT", "free_throws"),
    ("FTA", "free_throws_attempted"),
    ("FT%", "free_throw_percentage"),
    ("ORB", "offensive_rebounds"),
    ("TRB", "team_rebounds"),
    ("AST", "assists"),
    ("STL", "steals"),
    ("BLK", "blocks"),
    ("TOV", "turnovers"),
    ("PF", "personal_fouls"),
];

const ADVANCED: &[(&str, &str)] = &[
    ("Pace", "pace"),
    ("ORtg", "offensive_rating"),
    ("FTr", "free_throw_attempt_rate"),
    ("3PAr", "three_point_attempt_rate"),
    ("TS%", "true_shooting_percentage"),
    ("TRB%", "team_rebound_percentage"),
    ("AST%", "assist_percentage"),
    ("STL%", "steal_percentage"),
    ("BLK%", "block_percentage"),
    ("eFG%", "effective_field_goal_percentage"),
    ("TOV%", "turnover_percentage"),
    ("ORB%", "offensive_rebound_percentage"),
    ("FT/FGA", "free_throws_per_field_goal_attempt"),
];

const RATINGS_BLOCKS: &[&[(&str, &str)]] = &[RATINGS];
const BASIC_BLOCKS: &[&[(&str, &str)]] = &[SEASON_RECORD, BOX_SCORE];
const BOX_SCORE_BLOCKS: &[&[(&str, &str)]] = &[BOX_SCORE];
const ADVANCED_BLOCKS: &[&[(&str, &str)]] = &[ADVANCED];
const BASIC_DROPPED: &[&str] = &["Rk"];

/// Which source columns a role keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// Exactly the renamed columns, all of them required.
    AllowList,
    /// Every column except the listed ones; unknown columns pass through.
    AllExcept(&'static [&'static str]),
}

/// Static column policy for one source role.
#[derive(Debug, Clone, Copy)]
pub struct RoleMapping {
    pub role: TableRole,
    pub selection: Selection,
    blocks: &'static [&'static [(&'static str, &'static str)]],
    prefix: &'static str,
}

impl RoleMapping {
    /// `(source, target)` pairs for the metric columns, in output order.
    pub fn renames(&self) -> Vec<(&'static str, String)> {
        self.blocks
            .iter()
            .flat_map(|block| block.iter())
            .map(|(source, target)| (*source, format!("{}{target}", self.prefix)))
            .collect()
    }
}

/// Column policy for the given role.
pub fn role_mapping(role: TableRole) -> RoleMapping {
    let (selection, blocks, prefix) = match role {
        TableRole::Ratings => (Selection::AllowList, RATINGS_BLOCKS, ""),
        TableRole::Basic => (Selection::AllExcept(BASIC_DROPPED), BASIC_BLOCKS, ""),
        TableRole::BasicOpponent => (Selection::AllowList, BOX_SCORE_BLOCKS, OPPONENT_PREFIX),
        TableRole::Advanced => (Selection::AllowList, ADVANCED_BLOCKS, ""),
        TableRole::AdvancedOpponent => (Selection::AllowList, ADVANCED_BLOCKS, OPPONENT_PREFIX),
    };
    RoleMapping {
        role,
        selection,
        blocks,
        prefix,
    }
}

/// Selects the role's columns from a flattened table and renames them to
/// their semantic names. The team column comes first as `team_name`.
#[instrument(level = "debug", skip(raw), fields(table_id = %raw.table_id))]
pub fn map_columns(raw: &RawTable, role: TableRole) -> Result<NormalizedTable> {
    let mapping = role_mapping(role);
    let team_idx = require(raw, role, TEAM_SOURCE_LABEL)?;

    let mut picks: Vec<(usize, String)> = vec![(team_idx, TEAM_COLUMN.to_string())];
    match mapping.selection {
        Selection::AllowList => {
            for (source, target) in mapping.renames() {
                picks.push((require(raw, role, source)?, target));
            }
        }
        Selection::AllExcept(dropped) => {
            for column in dropped {
                require(raw, role, column)?;
            }
            let renames = mapping.renames();
            for (source, _) in &renames {
                if raw.column_index(source).is_none() {
                    warn!(%role, column = *source, "mapped column missing from source table");
                }
            }

            let mut taken: HashSet<&str> = HashSet::new();
            for (idx, column) in raw.columns.iter().enumerate() {
                if idx == team_idx || dropped.iter().any(|name| *name == column.as_str()) {
                    continue;
                }
                if !taken.insert(column.as_str()) {
                    continue;
                }
                let target = match renames.iter().find(|(source, _)| *source == column.as_str()) {
                    Some((_, target)) => target.clone(),
                    None => {
                        warn!(%role, column = %column, "passing through unmapped column");
                        column.clone()
                    }
                };
                picks.push((idx, target));
            }
        }
    }

    let rows = raw
        .rows
        .iter()
        .map(|row| {
            picks
                .iter()
                .map(|(idx, _)| row.get(*idx).cloned().unwrap_or(CellValue::Null))
                .collect()
        })
        .collect();

    Ok(NormalizedTable {
        role,
        header_token: TEAM_SOURCE_LABEL.to_string(),
        columns: picks.into_iter().map(|(_, name)| name).collect(),
        rows,
    })
}

fn require(raw: &RawTable, role: TableRole, column: &str) -> Result<usize> {
    raw.column_index(column).ok_or_else(|| StatsError::Mapping {
        role: role.to_string(),
        column: column.to_string(),
    })
}

#![allow(dead_code)]

use std::fs;
use std::path::Path;

use season_stats::model::{CellValue, NormalizedTable, TableRole};
use season_stats::season::page_file_name;

/// Header group label paired with the leaf labels underneath it.
pub type Group = (&'static str, &'static [&'static str]);

const SEPARATOR: Group = ("", &[""]);
const RANK_SCHOOL: Group = ("", &["Rk", "School"]);
const OVERALL: Group = ("Overall", &["G", "W", "L", "W-L%", "SRS", "SOS"]);
const BOX_SCORE: &[&str] = &[
    "FG", "FGA", "FG%", "3P", "3PA", "3P%", "FT", "FTA", "FT%", "ORB", "TRB", "AST", "STL", "BLK",
    "TOV", "PF",
];
const ADVANCED: &[&str] = &[
    "Pace", "ORtg", "FTr", "3PAr", "TS%", "TRB%", "AST%", "STL%", "BLK%", "eFG%", "TOV%", "ORB%",
    "FT/FGA",
];

/// Two-level header layout of the page behind each role.
pub fn layout(role: TableRole) -> Vec<(String, Vec<String>)> {
    let totals: Vec<&str> = std::iter::once("MP").chain(BOX_SCORE.iter().copied()).collect();
    let groups: Vec<(&str, Vec<&str>)> = match role {
        TableRole::Ratings => vec![
            ("", vec!["Rk", "School", "Conf"]),
            ("", vec!["W", "L"]),
            ("", vec!["Pts", "Opp", "MOV"]),
            to_owned_group(SEPARATOR),
            ("SRS", vec!["OSRS", "DSRS", "SRS"]),
            ("Adjusted", vec!["ORtg", "DRtg", "NRtg"]),
        ],
        TableRole::Basic => vec![
            to_owned_group(RANK_SCHOOL),
            to_owned_group(OVERALL),
            to_owned_group(SEPARATOR),
            ("Conf.", vec!["W", "L"]),
            to_owned_group(SEPARATOR),
            ("Home", vec!["W", "L"]),
            to_owned_group(SEPARATOR),
            ("Away", vec!["W", "L"]),
            to_owned_group(SEPARATOR),
            ("Points", vec!["Tm.", "Opp."]),
            to_owned_group(SEPARATOR),
            ("Totals", totals),
        ],
        TableRole::BasicOpponent => vec![
            to_owned_group(RANK_SCHOOL),
            to_owned_group(OVERALL),
            to_owned_group(SEPARATOR),
            ("Opponent", totals),
        ],
        TableRole::Advanced => vec![
            to_owned_group(RANK_SCHOOL),
            ("School Advanced", ADVANCED.to_vec()),
        ],
        TableRole::AdvancedOpponent => vec![
            to_owned_group(RANK_SCHOOL),
            ("Opponent Advanced", ADVANCED.to_vec()),
        ],
    };
    groups
        .into_iter()
        .map(|(name, labels)| {
            (
                name.to_string(),
                labels.into_iter().map(str::to_string).collect(),
            )
        })
        .collect()
}

fn to_owned_group(group: Group) -> (&'static str, Vec<&'static str>) {
    (group.0, group.1.to_vec())
}

/// Renders a table with a grouped header row above the leaf header row.
pub fn grouped_table(id: &str, groups: &[(String, Vec<String>)], rows: &[Vec<String>]) -> String {
    let mut html = format!("<table id=\"{id}\"><thead><tr class=\"over_header\">");
    for (name, labels) in groups {
        html.push_str(&format!("<th colspan=\"{}\">{name}</th>", labels.len()));
    }
    html.push_str("</tr><tr>");
    for (_, labels) in groups {
        for label in labels {
            html.push_str(&format!("<th>{label}</th>"));
        }
    }
    html.push_str("</tr></thead>");
    html.push_str(&body(rows));
    html.push_str("</table>");
    html
}

/// Renders a table with a single header row.
pub fn flat_table(id: &str, labels: &[&str], rows: &[Vec<String>]) -> String {
    let mut html = format!("<table id=\"{id}\"><thead><tr>");
    for label in labels {
        html.push_str(&format!("<th>{label}</th>"));
    }
    html.push_str("</tr></thead>");
    html.push_str(&body(rows));
    html.push_str("</table>");
    html
}

fn body(rows: &[Vec<String>]) -> String {
    let mut html = String::from("<tbody>");
    for row in rows {
        html.push_str("<tr>");
        for (idx, cell) in row.iter().enumerate() {
            let tag = if idx == 0 { "th" } else { "td" };
            html.push_str(&format!("<{tag}>{cell}</{tag}>"));
        }
        html.push_str("</tr>");
    }
    html.push_str("</tbody>");
    html
}

/// Wraps a fragment in a minimal page.
pub fn page(fragment: &str) -> String {
    format!(
        "<!DOCTYPE html><html><head><title>Season</title></head>\
         <body><div>{fragment}</div></body></html>"
    )
}

/// Full page for `role` listing `teams`, every metric cell filled with a number.
/// A repeated header row is inserted after the first team, as the site does.
pub fn role_page(role: TableRole, teams: &[&str]) -> String {
    let groups = layout(role);
    let labels: Vec<String> = groups.iter().flat_map(|(_, labels)| labels.clone()).collect();

    let mut rows = Vec::new();
    for (row_idx, team) in teams.iter().enumerate() {
        let row = labels
            .iter()
            .enumerate()
            .map(|(col_idx, label)| match label.as_str() {
                "Rk" => (row_idx + 1).to_string(),
                "School" => team.to_string(),
                "" => String::new(),
                _ => format!("{}.{}", row_idx + 1, col_idx),
            })
            .collect();
        rows.push(row);
        if row_idx == 0 {
            rows.push(labels.clone());
        }
    }

    page(&grouped_table(role.table_id(), &groups, &rows))
}

/// Saves every role's page for `end_year` into `dir`.
pub fn write_season(dir: &Path, end_year: i32, teams: &[&str]) {
    for role in TableRole::MERGE_ORDER {
        fs::write(dir.join(page_file_name(end_year, role)), role_page(role, teams))
            .expect("fixture page written");
    }
}

/// Hand-built normalized table; `None` cells become nulls.
pub fn normalized(
    role: TableRole,
    columns: &[&str],
    rows: &[(&str, Vec<Option<f64>>)],
) -> NormalizedTable {
    NormalizedTable {
        role,
        header_token: "School".to_string(),
        columns: columns.iter().map(|column| column.to_string()).collect(),
        rows: rows
            .iter()
            .map(|(team, values)| {
                std::iter::once(CellValue::from(*team))
                    .chain(values.iter().map(|value| match value {
                        Some(number) => CellValue::Number(*number),
                        None => CellValue::Null,
                    }))
                    .collect()
            })
            .collect(),
    }
}

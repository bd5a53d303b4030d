//! XLSX export of a computed table, one sheet for the standings and one for
//! the underlying match log.

use std::path::Path;

use anyhow::{Context, Result};
use rust_xlsxwriter::{Workbook, Worksheet};

use crate::match_log::MatchRecord;
use crate::standings::StandingsRow;

pub struct ExportReport {
    pub teams: usize,
    pub matches: usize,
}

pub fn export_table(
    path: &Path,
    table: &[StandingsRow],
    log: &[MatchRecord],
) -> Result<ExportReport> {
    let mut workbook = Workbook::new();

    let standings = workbook.add_worksheet();
    standings.set_name("Standings").context("name sheet")?;
    write_rows(standings, &standings_rows(table))?;

    let matches = workbook.add_worksheet();
    matches.set_name("Matches").context("name sheet")?;
    write_rows(matches, &match_rows(log))?;

    workbook
        .save(path)
        .with_context(|| format!("save workbook {}", path.display()))?;

    Ok(ExportReport {
        teams: table.len(),
        matches: log.len(),
    })
}

fn standings_rows(table: &[StandingsRow]) -> Vec<Vec<String>> {
    let mut rows = vec![vec![
        "Rank".to_string(),
        "Team".to_string(),
        "GP".to_string(),
        "Record".to_string(),
        "Home".to_string(),
        "Away".to_string(),
        "Last 10".to_string(),
        "Points".to_string(),
        "PPM".to_string(),
        "Point %".to_string(),
        "GF".to_string(),
        "GA".to_string(),
        "GF/M".to_string(),
        "GA/M".to_string(),
        "Streak".to_string(),
    ]];
    rows.extend(table.iter().map(|row| {
        vec![
            row.rank.to_string(),
            row.team.clone(),
            row.played.to_string(),
            row.record.clone(),
            row.home_record.clone(),
            row.away_record.clone(),
            row.last10_record.clone(),
            row.points.to_string(),
            format!("{:.2}", row.points_per_match),
            format!("{:.3}", row.point_pct),
            row.goals_scored.to_string(),
            row.goals_allowed.to_string(),
            format!("{:.2}", row.goals_scored_per_match),
            format!("{:.2}", row.goals_allowed_per_match),
            row.streak_label(),
        ]
    }));
    rows
}

fn match_rows(log: &[MatchRecord]) -> Vec<Vec<String>> {
    let mut rows = vec![vec![
        "Date".to_string(),
        "Home".to_string(),
        "Away".to_string(),
        "Home Goals".to_string(),
        "Away Goals".to_string(),
        "Result".to_string(),
    ]];
    rows.extend(log.iter().map(|m| {
        vec![
            m.date.to_string(),
            m.home_team.clone(),
            m.away_team.clone(),
            m.home_goals.to_string(),
            m.away_goals.to_string(),
            m.result.code().to_string(),
        ]
    }));
    rows
}

fn write_rows(worksheet: &mut Worksheet, rows: &[Vec<String>]) -> Result<()> {
    for (row_idx, row) in rows.iter().enumerate() {
        for (col_idx, value) in row.iter().enumerate() {
            worksheet
                .write_string(row_idx as u32, col_idx as u16, value)
                .with_context(|| format!("write cell ({row_idx},{col_idx})"))?;
        }
    }
    Ok(())
}

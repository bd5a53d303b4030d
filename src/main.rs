use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Result, bail};
use chrono::NaiveDate;

use league_table::feed::{self, SeasonLog};
use league_table::season::{SeasonKey, parse_cutoff};
use league_table::standings::{StandingsRow, compute_standings};
use league_table::table_export;

fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();
    let [cutoff_raw, season_raw, rest @ ..] = args.as_slice() else {
        eprintln!(
            "usage: league_table <cutoff YYYY-MM-DD> <season, e.g. 2023-24> [--export table.xlsx]"
        );
        bail!("expected a cutoff date and a season key");
    };

    let cutoff = parse_cutoff(cutoff_raw)?;
    let season = SeasonKey::parse(season_raw)?;
    let export = export_path(rest)?;
    let division =
        env::var("TABLE_DIVISION").unwrap_or_else(|_| feed::DEFAULT_DIVISION.to_string());

    let log = feed::fetch_season_log(&season, &division)?;
    if log.skipped_rows > 0 {
        eprintln!("[WARN] Skipped {} unusable feed rows", log.skipped_rows);
    }

    let table = compute_standings(&log.matches, cutoff)?;
    print_table(&log, cutoff, &table);

    if let Some(path) = export {
        let report = table_export::export_table(&path, &table, &log.matches)?;
        eprintln!(
            "[INFO] Exported {} teams and {} matches to {}",
            report.teams,
            report.matches,
            path.display()
        );
    }
    Ok(())
}

fn export_path(rest: &[String]) -> Result<Option<PathBuf>> {
    match rest {
        [] => Ok(env::var("TABLE_EXPORT").ok().map(PathBuf::from)),
        [flag, path] if flag == "--export" => Ok(Some(PathBuf::from(path))),
        _ => bail!("unrecognized trailing arguments {rest:?}"),
    }
}

fn print_table(log: &SeasonLog, cutoff: NaiveDate, table: &[StandingsRow]) {
    println!("{} {} standings through {cutoff}", log.season, log.division);

    let team_width = table
        .iter()
        .map(|row| row.team.len())
        .max()
        .unwrap_or(4)
        .max(4);
    println!(
        "{:>4} {:<team_width$} {:>3} {:>8} {:>8} {:>8} {:>8} {:>4} {:>5} {:>6} {:>5} {:>5} {:>6}",
        "Rank",
        "Team",
        "GP",
        "Record",
        "Home",
        "Away",
        "Last10",
        "Pts",
        "PPM",
        "Pct",
        "GF/M",
        "GA/M",
        "Streak"
    );
    for row in table {
        println!(
            "{:>4} {:<team_width$} {:>3} {:>8} {:>8} {:>8} {:>8} {:>4} {:>5.2} {:>6.3} {:>5.2} {:>5.2} {:>6}",
            row.rank,
            row.team,
            row.played,
            row.record,
            row.home_record,
            row.away_record,
            row.last10_record,
            row.points,
            row.points_per_match,
            row.point_pct,
            row.goals_scored_per_match,
            row.goals_allowed_per_match,
            row.streak_label(),
        );
    }
}

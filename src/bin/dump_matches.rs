use std::env;

use anyhow::{Result, bail};

use league_table::feed::{self, DEFAULT_DIVISION};
use league_table::season::{SeasonKey, parse_cutoff};
use league_table::standings::filter_to_cutoff;

/// Prints the filtered match log a standings run would aggregate, optionally
/// restricted to one team. Handy for eyeballing feed quality.
fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let args: Vec<String> = env::args().skip(1).collect();
    let [cutoff_raw, season_raw, rest @ ..] = args.as_slice() else {
        bail!("usage: dump_matches <cutoff YYYY-MM-DD> <season, e.g. 2023-24> [team]");
    };
    let team_filter = match rest {
        [] => None,
        [team] => Some(team.as_str()),
        _ => bail!("expected at most one team filter"),
    };

    let cutoff = parse_cutoff(cutoff_raw)?;
    let season = SeasonKey::parse(season_raw)?;
    let division = env::var("TABLE_DIVISION").unwrap_or_else(|_| DEFAULT_DIVISION.to_string());

    let log = feed::fetch_season_log(&season, &division)?;
    let filtered = filter_to_cutoff(&log.matches, cutoff);

    let mut shown = 0usize;
    for m in &filtered {
        if let Some(team) = team_filter {
            if m.home_team != team && m.away_team != team {
                continue;
            }
        }
        println!(
            "{}  {} {}-{} {}  ({})",
            m.date, m.home_team, m.home_goals, m.away_goals, m.away_team,
            m.result.code()
        );
        shown += 1;
    }
    eprintln!(
        "[INFO] {shown} of {} matches on or before {cutoff} ({} skipped feed rows)",
        filtered.len(),
        log.skipped_rows
    );
    Ok(())
}

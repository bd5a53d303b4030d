use std::collections::HashMap;

use chrono::NaiveDate;

use league_table::match_log::{FullTimeResult, MatchRecord};
use league_table::standings::{StandingsError, StandingsRow, compute_standings};

fn day(n: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 8, 1).unwrap() + chrono::Days::new(u64::from(n))
}

fn mk(n: u32, home: &str, away: &str, hg: u32, ag: u32) -> MatchRecord {
    MatchRecord {
        date: day(n),
        home_team: home.to_string(),
        away_team: away.to_string(),
        home_goals: hg,
        away_goals: ag,
        result: FullTimeResult::from_score(hg, ag),
    }
}

fn row<'a>(table: &'a [StandingsRow], team: &str) -> &'a StandingsRow {
    table
        .iter()
        .find(|r| r.team == team)
        .unwrap_or_else(|| panic!("{team} missing from table"))
}

fn rank_of(table: &[StandingsRow], team: &str) -> usize {
    row(table, team).rank
}

/// Six teams, full double round robin, deterministic scores, one match per
/// day so date ordering is unambiguous.
fn round_robin_season() -> Vec<MatchRecord> {
    let teams = ["Arsenal", "Brentford", "Chelsea", "Derby", "Everton", "Fulham"];
    let mut matches = Vec::new();
    let mut n = 0u32;
    for (i, home) in teams.iter().enumerate() {
        for (j, away) in teams.iter().enumerate() {
            if i == j {
                continue;
            }
            let hg = ((i * 7 + j * 3) % 4) as u32;
            let ag = ((i * 2 + j * 5) % 3) as u32;
            matches.push(mk(n, home, away, hg, ag));
            n += 1;
        }
    }
    matches
}

#[test]
fn single_match_scenario() {
    let matches = vec![mk(0, "Arsenal", "Brentford", 2, 1)];
    let table = compute_standings(&matches, day(3)).expect("one match is enough");
    assert_eq!(table.len(), 2);

    let winner = &table[0];
    assert_eq!(winner.team, "Arsenal");
    assert_eq!(winner.rank, 1);
    assert_eq!(winner.record, "1-0-0");
    assert_eq!(winner.home_record, "1-0-0");
    assert_eq!(winner.away_record, "0-0-0");
    assert_eq!(winner.points, 3);
    assert_eq!(winner.points_per_match, 3.0);
    assert_eq!(winner.point_pct, 1.0);
    assert_eq!(winner.streak_label(), "W1");

    let loser = &table[1];
    assert_eq!(loser.team, "Brentford");
    assert_eq!(loser.rank, 2);
    assert_eq!(loser.record, "0-1-0");
    assert_eq!(loser.points, 0);
    assert_eq!(loser.points_per_match, 0.0);
    assert_eq!(loser.streak_label(), "L1");
}

#[test]
fn cutoff_before_any_match_is_an_empty_log() {
    let matches = vec![mk(10, "Arsenal", "Brentford", 2, 1)];
    let err = compute_standings(&matches, day(9)).expect_err("nothing played yet");
    assert!(matches!(err, StandingsError::EmptyMatchLog { .. }));
}

#[test]
fn cutoff_on_match_day_is_inclusive() {
    let matches = vec![mk(10, "Arsenal", "Brentford", 2, 1)];
    let table = compute_standings(&matches, day(10)).expect("match day counts");
    assert_eq!(table.len(), 2);
}

#[test]
fn cutoff_hides_later_matches() {
    let matches = vec![
        mk(0, "Arsenal", "Brentford", 2, 1),
        mk(20, "Brentford", "Arsenal", 5, 0),
    ];
    let table = compute_standings(&matches, day(5)).expect("first match included");
    assert_eq!(row(&table, "Arsenal").record, "1-0-0");
    assert_eq!(row(&table, "Brentford").record, "0-1-0");
}

#[test]
fn two_draws_then_a_win_streaks_w1() {
    let matches = vec![
        mk(0, "Chelsea", "Arsenal", 1, 1),
        mk(7, "Brentford", "Chelsea", 0, 0),
        mk(14, "Chelsea", "Derby", 2, 0),
    ];
    let table = compute_standings(&matches, day(30)).expect("three matches");
    let chelsea = row(&table, "Chelsea");
    assert_eq!(chelsea.streak_label(), "W1");
    assert_eq!(chelsea.record, "1-0-2");
    assert_eq!(chelsea.last10_record, "1-0-2");
}

#[test]
fn ranking_applies_the_key_chain_in_order() {
    // P and Q both win their only match; P scores more per match. Their
    // beaten opponents differ only in goals allowed.
    let matches = vec![
        mk(0, "Preston", "Exeter", 3, 0),
        mk(1, "Quins", "Yeovil", 1, 0),
    ];
    let table = compute_standings(&matches, day(10)).expect("two matches");

    assert!(rank_of(&table, "Preston") < rank_of(&table, "Quins"));
    assert!(rank_of(&table, "Quins") < rank_of(&table, "Yeovil"));
    assert!(rank_of(&table, "Yeovil") < rank_of(&table, "Exeter"));
}

#[test]
fn equal_ppm_breaks_on_wins_before_goals() {
    // Carlisle draws three times (3 pts, heavy scoring); Dover wins once and
    // loses twice (3 pts, barely scores). Same PPM; wins decide, not goals.
    let matches = vec![
        mk(0, "Carlisle", "Filler A", 2, 2),
        mk(1, "Filler B", "Carlisle", 2, 2),
        mk(2, "Carlisle", "Filler C", 2, 2),
        mk(3, "Dover", "Filler D", 1, 0),
        mk(4, "Filler E", "Dover", 1, 0),
        mk(5, "Dover", "Filler F", 0, 1),
    ];
    let table = compute_standings(&matches, day(10)).expect("six matches");

    let carlisle = row(&table, "Carlisle");
    let dover = row(&table, "Dover");
    assert_eq!(carlisle.points_per_match, dover.points_per_match);
    assert!(carlisle.goals_scored_per_match > dover.goals_scored_per_match);
    assert!(dover.rank < carlisle.rank, "one win outranks three draws");
}

#[test]
fn totals_balance_across_the_table() {
    let matches = round_robin_season();
    let table = compute_standings(&matches, day(1000)).expect("full season");
    assert_eq!(table.len(), 6);

    let mut played_total = 0u32;
    for r in &table {
        let parts: Vec<u32> = r
            .record
            .split('-')
            .map(|p| p.parse().expect("record piece"))
            .collect();
        let [wins, losses, ties] = parts.as_slice() else {
            panic!("record {:?} is not W-L-T", r.record);
        };
        assert_eq!(wins + losses + ties, r.played);
        assert_eq!(r.points, wins * 3 + ties);
        played_total += r.played;

        let last10: u32 = r
            .last10_record
            .split('-')
            .map(|p| p.parse::<u32>().expect("last10 piece"))
            .sum();
        assert_eq!(last10, r.played.min(10));
    }
    assert_eq!(played_total as usize, 2 * matches.len());
}

#[test]
fn streak_matches_each_teams_latest_result() {
    let matches = round_robin_season();
    let table = compute_standings(&matches, day(1000)).expect("full season");

    let mut latest: HashMap<&str, (NaiveDate, char)> = HashMap::new();
    for m in &matches {
        let home_letter = match m.result {
            FullTimeResult::Home => 'W',
            FullTimeResult::Away => 'L',
            FullTimeResult::Draw => 'D',
        };
        let away_letter = match home_letter {
            'W' => 'L',
            'L' => 'W',
            _ => 'D',
        };
        for (team, letter) in [
            (m.home_team.as_str(), home_letter),
            (m.away_team.as_str(), away_letter),
        ] {
            let entry = latest.entry(team).or_insert((m.date, letter));
            if m.date >= entry.0 {
                *entry = (m.date, letter);
            }
        }
    }

    for r in &table {
        let streak = r.streak.expect("every team played");
        assert!(streak.length >= 1);
        let (_, expected_letter) = latest[r.team.as_str()];
        assert_eq!(
            streak.outcome.letter(),
            expected_letter,
            "{} streak should end on its latest result",
            r.team
        );
    }
}

#[test]
fn input_order_never_changes_the_table() {
    let matches = round_robin_season();
    let baseline = compute_standings(&matches, day(1000)).expect("full season");

    let mut reversed = matches.clone();
    reversed.reverse();
    assert_eq!(
        compute_standings(&reversed, day(1000)).expect("reversed"),
        baseline
    );

    let mut rotated = matches.clone();
    rotated.rotate_left(7);
    assert_eq!(
        compute_standings(&rotated, day(1000)).expect("rotated"),
        baseline
    );
}

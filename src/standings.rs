//! Point-in-time standings: filter a season's match log to a cutoff date,
//! expand every match into two team-perspective views, and aggregate those
//! into a ranked table.

use std::cmp::Ordering;
use std::collections::HashMap;

use chrono::NaiveDate;
use rayon::prelude::*;
use thiserror::Error;

use crate::match_log::{FullTimeResult, MatchRecord};

/// How many most-recent matches the form breakdown covers.
pub const FORM_WINDOW: usize = 10;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StandingsError {
    #[error("no matches played on or before {cutoff}")]
    EmptyMatchLog { cutoff: NaiveDate },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Win,
    Loss,
    Draw,
}

impl Outcome {
    pub fn letter(self) -> char {
        match self {
            Self::Win => 'W',
            Self::Loss => 'L',
            Self::Draw => 'D',
        }
    }
}

/// One match seen from one team's side. Two of these exist per match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamMatchView {
    pub team: String,
    pub date: NaiveDate,
    pub is_home: bool,
    pub goals_for: u32,
    pub goals_against: u32,
    pub outcome: Outcome,
}

/// Keep matches played on or before the cutoff. Pure; record fields pass
/// through untouched.
pub fn filter_to_cutoff<'a>(
    matches: &'a [MatchRecord],
    cutoff: NaiveDate,
) -> Vec<&'a MatchRecord> {
    matches.iter().filter(|m| m.date <= cutoff).collect()
}

/// Expand each match into a home-perspective and an away-perspective view.
/// Every downstream number comes out of this mirroring, so the outcome and
/// goal columns must never be swapped here.
pub fn expand_team_views(matches: &[&MatchRecord]) -> Vec<TeamMatchView> {
    let mut views = Vec::with_capacity(matches.len() * 2);
    for m in matches {
        views.push(perspective_view(m, true));
        views.push(perspective_view(m, false));
    }
    views
}

fn perspective_view(m: &MatchRecord, is_home: bool) -> TeamMatchView {
    let outcome = match (m.result, is_home) {
        (FullTimeResult::Draw, _) => Outcome::Draw,
        (FullTimeResult::Home, true) | (FullTimeResult::Away, false) => Outcome::Win,
        (FullTimeResult::Home, false) | (FullTimeResult::Away, true) => Outcome::Loss,
    };
    let (team, goals_for, goals_against) = if is_home {
        (m.home_team.clone(), m.home_goals, m.away_goals)
    } else {
        (m.away_team.clone(), m.away_goals, m.home_goals)
    };
    TeamMatchView {
        team,
        date: m.date,
        is_home,
        goals_for,
        goals_against,
        outcome,
    }
}

/// Win/loss/tie counter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
}

impl Tally {
    fn add(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Win => self.wins += 1,
            Outcome::Loss => self.losses += 1,
            Outcome::Draw => self.ties += 1,
        }
    }

    pub fn played(&self) -> u32 {
        self.wins + self.losses + self.ties
    }

    pub fn record(&self) -> String {
        format!("{}-{}-{}", self.wins, self.losses, self.ties)
    }

    fn merged(self, other: Tally) -> Tally {
        Tally {
            wins: self.wins + other.wins,
            losses: self.losses + other.losses,
            ties: self.ties + other.ties,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GoalTotals {
    pub scored: u32,
    pub allowed: u32,
}

/// Unbroken run of identical outcomes ending at the most recent match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Streak {
    pub outcome: Outcome,
    pub length: u32,
}

impl Streak {
    pub fn label(&self) -> String {
        format!("{}{}", self.outcome.letter(), self.length)
    }
}

/// Everything known about one team at the cutoff. Home/away splits are the
/// stored form; overall values are derived so the two can never disagree.
#[derive(Debug, Clone)]
pub struct TeamSeasonStats {
    pub team: String,
    pub home: Tally,
    pub away: Tally,
    pub home_goals: GoalTotals,
    pub away_goals: GoalTotals,
    pub last10_home: Tally,
    pub last10_away: Tally,
    /// `None` only for a team with no matches before the cutoff.
    pub streak: Option<Streak>,
}

impl TeamSeasonStats {
    fn empty(team: String) -> Self {
        Self {
            team,
            home: Tally::default(),
            away: Tally::default(),
            home_goals: GoalTotals::default(),
            away_goals: GoalTotals::default(),
            last10_home: Tally::default(),
            last10_away: Tally::default(),
            streak: None,
        }
    }

    pub fn overall(&self) -> Tally {
        self.home.merged(self.away)
    }

    pub fn last10(&self) -> Tally {
        self.last10_home.merged(self.last10_away)
    }

    pub fn matches_played(&self) -> u32 {
        self.overall().played()
    }

    pub fn points(&self) -> u32 {
        let overall = self.overall();
        overall.wins * 3 + overall.ties
    }

    pub fn points_per_match(&self) -> f64 {
        per_match(self.points(), self.matches_played())
    }

    /// Points as a share of the maximum available.
    pub fn point_pct(&self) -> f64 {
        per_match(self.points(), 3 * self.matches_played())
    }

    pub fn goals_scored(&self) -> u32 {
        self.home_goals.scored + self.away_goals.scored
    }

    pub fn goals_allowed(&self) -> u32 {
        self.home_goals.allowed + self.away_goals.allowed
    }

    pub fn goals_scored_per_match(&self) -> f64 {
        per_match(self.goals_scored(), self.matches_played())
    }

    pub fn goals_allowed_per_match(&self) -> f64 {
        per_match(self.goals_allowed(), self.matches_played())
    }
}

/// Zero matches yields 0.0; a division artifact must never reach a rendered
/// row.
fn per_match(total: u32, denom: u32) -> f64 {
    if denom == 0 {
        0.0
    } else {
        f64::from(total) / f64::from(denom)
    }
}

/// Fold one team's views into its season stats. The cumulative tallies are
/// order-independent; the form window and the streak need their own date
/// orderings, so the views are sorted locally. Both sorts are stable, so
/// same-date matches keep their feed order.
fn aggregate_team(team: &str, views: &[TeamMatchView]) -> TeamSeasonStats {
    let mut stats = TeamSeasonStats::empty(team.to_string());

    for v in views {
        let (tally, goals) = if v.is_home {
            (&mut stats.home, &mut stats.home_goals)
        } else {
            (&mut stats.away, &mut stats.away_goals)
        };
        tally.add(v.outcome);
        goals.scored += v.goals_for;
        goals.allowed += v.goals_against;
    }

    let mut newest_first: Vec<&TeamMatchView> = views.iter().collect();
    newest_first.sort_by(|a, b| b.date.cmp(&a.date));
    for v in newest_first.iter().take(FORM_WINDOW) {
        if v.is_home {
            stats.last10_home.add(v.outcome);
        } else {
            stats.last10_away.add(v.outcome);
        }
    }

    let mut oldest_first: Vec<&TeamMatchView> = views.iter().collect();
    oldest_first.sort_by(|a, b| a.date.cmp(&b.date));
    stats.streak = oldest_first.iter().fold(None, |run, v| match run {
        Some(Streak { outcome, length }) if outcome == v.outcome => Some(Streak {
            outcome,
            length: length + 1,
        }),
        _ => Some(Streak {
            outcome: v.outcome,
            length: 1,
        }),
    });

    stats
}

/// Group views per team, preserving feed order within each team. Sorted by
/// name so nothing downstream depends on hash iteration order.
fn group_by_team(views: Vec<TeamMatchView>) -> Vec<(String, Vec<TeamMatchView>)> {
    let mut grouped: HashMap<String, Vec<TeamMatchView>> = HashMap::new();
    for view in views {
        grouped.entry(view.team.clone()).or_default().push(view);
    }
    let mut teams: Vec<(String, Vec<TeamMatchView>)> = grouped.into_iter().collect();
    teams.sort_by(|a, b| a.0.cmp(&b.0));
    teams
}

/// Per-team season stats for every team appearing in the filtered log.
/// Teams are independent, so the per-team folds fan out across threads.
pub fn compute_team_stats(matches: &[&MatchRecord]) -> Vec<TeamSeasonStats> {
    group_by_team(expand_team_views(matches))
        .par_iter()
        .map(|(team, views)| aggregate_team(team, views))
        .collect()
}

/// One row of the final table.
#[derive(Debug, Clone, PartialEq)]
pub struct StandingsRow {
    pub rank: usize,
    pub team: String,
    pub played: u32,
    pub record: String,
    pub home_record: String,
    pub away_record: String,
    pub last10_record: String,
    pub points: u32,
    pub points_per_match: f64,
    pub point_pct: f64,
    pub goals_scored: u32,
    pub goals_allowed: u32,
    pub goals_scored_per_match: f64,
    pub goals_allowed_per_match: f64,
    pub streak: Option<Streak>,
}

impl StandingsRow {
    fn from_stats(rank: usize, stats: &TeamSeasonStats) -> Self {
        Self {
            rank,
            team: stats.team.clone(),
            played: stats.matches_played(),
            record: stats.overall().record(),
            home_record: stats.home.record(),
            away_record: stats.away.record(),
            last10_record: stats.last10().record(),
            points: stats.points(),
            points_per_match: stats.points_per_match(),
            point_pct: stats.point_pct(),
            goals_scored: stats.goals_scored(),
            goals_allowed: stats.goals_allowed(),
            goals_scored_per_match: stats.goals_scored_per_match(),
            goals_allowed_per_match: stats.goals_allowed_per_match(),
            streak: stats.streak,
        }
    }

    pub fn streak_label(&self) -> String {
        match self.streak {
            Some(streak) => streak.label(),
            None => "-".to_string(),
        }
    }
}

/// Ranking order: points per match, then total wins, then goals scored per
/// match, then goals allowed per match (fewer is better), then team name so
/// any remaining tie stays deterministic.
fn ranking_order(a: &TeamSeasonStats, b: &TeamSeasonStats) -> Ordering {
    b.points_per_match()
        .partial_cmp(&a.points_per_match())
        .unwrap_or(Ordering::Equal)
        .then_with(|| b.overall().wins.cmp(&a.overall().wins))
        .then_with(|| {
            b.goals_scored_per_match()
                .partial_cmp(&a.goals_scored_per_match())
                .unwrap_or(Ordering::Equal)
        })
        .then_with(|| {
            a.goals_allowed_per_match()
                .partial_cmp(&b.goals_allowed_per_match())
                .unwrap_or(Ordering::Equal)
        })
        .then_with(|| a.team.cmp(&b.team))
}

/// Full pipeline: filter to the cutoff, expand, aggregate per team, rank.
/// Output order is rank order.
pub fn compute_standings(
    matches: &[MatchRecord],
    cutoff: NaiveDate,
) -> Result<Vec<StandingsRow>, StandingsError> {
    let filtered = filter_to_cutoff(matches, cutoff);
    if filtered.is_empty() {
        return Err(StandingsError::EmptyMatchLog { cutoff });
    }
    let mut stats = compute_team_stats(&filtered);
    stats.sort_by(ranking_order);
    Ok(stats
        .iter()
        .enumerate()
        .map(|(idx, s)| StandingsRow::from_stats(idx + 1, s))
        .collect())
}

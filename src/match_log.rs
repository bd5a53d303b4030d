use chrono::NaiveDate;
use serde::Deserialize;

/// Full-time result code as published in the feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FullTimeResult {
    Home,
    Away,
    Draw,
}

impl FullTimeResult {
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim() {
            "H" => Some(Self::Home),
            "A" => Some(Self::Away),
            "D" => Some(Self::Draw),
            _ => None,
        }
    }

    pub fn from_score(home_goals: u32, away_goals: u32) -> Self {
        if home_goals > away_goals {
            Self::Home
        } else if home_goals < away_goals {
            Self::Away
        } else {
            Self::Draw
        }
    }

    pub fn code(self) -> char {
        match self {
            Self::Home => 'H',
            Self::Away => 'A',
            Self::Draw => 'D',
        }
    }
}

/// One completed match. Immutable once parsed out of the feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchRecord {
    pub date: NaiveDate,
    pub home_team: String,
    pub away_team: String,
    pub home_goals: u32,
    pub away_goals: u32,
    pub result: FullTimeResult,
}

/// Raw row shape of a season CSV
/// (`Div,Date,Time,HomeTeam,AwayTeam,FTHG,FTAG,FTR,...`). Columns we do not
/// use are ignored; empty numeric fields deserialize to `None`.
#[derive(Debug, Deserialize)]
struct RawMatchRow {
    #[serde(rename = "Date", default)]
    date: String,
    #[serde(rename = "HomeTeam", default)]
    home_team: String,
    #[serde(rename = "AwayTeam", default)]
    away_team: String,
    #[serde(rename = "FTHG", default)]
    home_goals: Option<u32>,
    #[serde(rename = "FTAG", default)]
    away_goals: Option<u32>,
    #[serde(rename = "FTR", default)]
    result: String,
}

#[derive(Debug, Clone)]
pub struct ParsedLog {
    pub matches: Vec<MatchRecord>,
    /// Rows dropped because they were missing a usable date, team name, or
    /// score. Dropping is preferred over guessing a result.
    pub skipped_rows: usize,
}

/// Parse a season CSV body into match records, in feed order. Bad rows are
/// counted and dropped rather than failing the whole log.
pub fn parse_match_rows(csv_text: &str) -> ParsedLog {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(csv_text.as_bytes());

    let mut matches = Vec::new();
    let mut skipped_rows = 0usize;
    for row in reader.deserialize::<RawMatchRow>() {
        let Ok(row) = row else {
            skipped_rows += 1;
            continue;
        };
        match convert_row(row) {
            Some(record) => matches.push(record),
            None => skipped_rows += 1,
        }
    }

    ParsedLog {
        matches,
        skipped_rows,
    }
}

fn convert_row(row: RawMatchRow) -> Option<MatchRecord> {
    let date = parse_feed_date(&row.date)?;
    if row.home_team.is_empty() || row.away_team.is_empty() {
        return None;
    }
    let (home_goals, away_goals) = (row.home_goals?, row.away_goals?);
    // Older archive files occasionally leave FTR blank; the goal counts
    // determine it anyway.
    let result = FullTimeResult::from_code(&row.result)
        .unwrap_or_else(|| FullTimeResult::from_score(home_goals, away_goals));
    Some(MatchRecord {
        date,
        home_team: row.home_team,
        away_team: row.away_team,
        home_goals,
        away_goals,
        result,
    })
}

/// Feed dates are day-first; files before the mid-2010s use two-digit years.
fn parse_feed_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(s, "%d/%m/%Y")
        .or_else(|_| NaiveDate::parse_from_str(s, "%d/%m/%y"))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::{FullTimeResult, parse_feed_date, parse_match_rows};

    #[test]
    fn parses_both_date_formats() {
        let modern = parse_feed_date("16/09/2023").expect("four-digit year");
        assert_eq!(modern.to_string(), "2023-09-16");
        let archive = parse_feed_date("14/08/93").expect("two-digit year");
        assert_eq!(archive.to_string(), "1993-08-14");
        assert!(parse_feed_date("2023-09-16").is_none());
        assert!(parse_feed_date("").is_none());
    }

    #[test]
    fn result_code_round_trips_and_derives() {
        assert_eq!(FullTimeResult::from_code("H"), Some(FullTimeResult::Home));
        assert_eq!(FullTimeResult::from_code(" D "), Some(FullTimeResult::Draw));
        assert_eq!(FullTimeResult::from_code("X"), None);
        assert_eq!(FullTimeResult::from_score(2, 1), FullTimeResult::Home);
        assert_eq!(FullTimeResult::from_score(0, 0), FullTimeResult::Draw);
        assert_eq!(FullTimeResult::from_score(0, 3), FullTimeResult::Away);
    }

    #[test]
    fn unusable_rows_are_dropped_not_fatal() {
        let csv = "\
Div,Date,Time,HomeTeam,AwayTeam,FTHG,FTAG,FTR
E0,12/08/2023,15:00,Arsenal,Everton,1,0,H
E0,not-a-date,15:00,Wolves,Fulham,2,2,D
E0,19/08/2023,15:00,Wolves,Fulham,,,
E0,26/08/2023,15:00,Fulham,Arsenal,0,1,A
";
        let parsed = parse_match_rows(csv);
        assert_eq!(parsed.matches.len(), 2);
        assert_eq!(parsed.skipped_rows, 2);
        assert_eq!(parsed.matches[0].home_team, "Arsenal");
        assert_eq!(parsed.matches[1].result, FullTimeResult::Away);
    }

    #[test]
    fn blank_result_code_falls_back_to_goals() {
        let csv = "\
Div,Date,Time,HomeTeam,AwayTeam,FTHG,FTAG,FTR
E0,12/08/2023,15:00,Arsenal,Everton,3,1,
";
        let parsed = parse_match_rows(csv);
        assert_eq!(parsed.matches.len(), 1);
        assert_eq!(parsed.matches[0].result, FullTimeResult::Home);
    }
}

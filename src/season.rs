use std::fmt;

use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("invalid cutoff date {0:?}, expected YYYY-MM-DD")]
    InvalidCutoff(String),
    #[error("invalid season key {0:?}, expected a form like 2023-24")]
    InvalidSeason(String),
}

/// Parse the user-supplied cutoff into a calendar date. Input that does not
/// name a real date is rejected here, before any computation runs.
pub fn parse_cutoff(raw: &str) -> Result<NaiveDate, InputError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| InputError::InvalidCutoff(raw.to_string()))
}

/// One competition year. A season spans two calendar years, so `2023-24`
/// names the season kicking off in 2023.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SeasonKey {
    start_year: u16,
}

const FIRST_ARCHIVE_YEAR: u16 = 1993;
const LAST_ARCHIVE_YEAR: u16 = 2099;

impl SeasonKey {
    /// Accepts `2023-24`, `2023/24`, `2023/2024`, the archive's compact
    /// `2324` form, and a bare start year `2023`.
    pub fn parse(raw: &str) -> Result<Self, InputError> {
        let s = raw.trim();
        let invalid = || InputError::InvalidSeason(raw.to_string());

        let (first, second) = match s.split_once(['-', '/']) {
            Some((a, b)) => (a.trim(), Some(b.trim())),
            None => (s, None),
        };
        if !first.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }

        let start_year = match (first.len(), second) {
            (4, _) => {
                let year = first.parse::<u16>().map_err(|_| invalid())?;
                // A separator-less 4-digit key reads as the compact pair form
                // when its halves are consecutive, e.g. "2324".
                if second.is_none() {
                    let head = first[..2].parse::<u16>().map_err(|_| invalid())?;
                    let tail = first[2..].parse::<u16>().map_err(|_| invalid())?;
                    if tail == (head + 1) % 100 {
                        expand_two_digit_year(head)
                    } else {
                        year
                    }
                } else {
                    year
                }
            }
            _ => return Err(invalid()),
        };
        if !(FIRST_ARCHIVE_YEAR..=LAST_ARCHIVE_YEAR).contains(&start_year) {
            return Err(invalid());
        }

        if let Some(end) = second {
            let end_year = end.parse::<u16>().map_err(|_| invalid())?;
            let matches_next = match end.len() {
                2 => end_year == (start_year + 1) % 100,
                4 => end_year == start_year + 1,
                _ => false,
            };
            if !matches_next {
                return Err(invalid());
            }
        }

        Ok(Self { start_year })
    }

    pub fn start_year(&self) -> u16 {
        self.start_year
    }

    /// Two-digit-pair form used by the feed archive paths, e.g. `2324`.
    pub fn code(&self) -> String {
        format!("{:02}{:02}", self.start_year % 100, (self.start_year + 1) % 100)
    }

    pub fn label(&self) -> String {
        format!("{}-{:02}", self.start_year, (self.start_year + 1) % 100)
    }
}

impl fmt::Display for SeasonKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

fn expand_two_digit_year(two: u16) -> u16 {
    // The archive reaches back into the nineties.
    if two >= 93 { 1900 + two } else { 2000 + two }
}

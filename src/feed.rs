//! Season match-log retrieval from the football-data.co.uk archive.

use anyhow::{Context, Result, anyhow};

use crate::http::fetch_text_cached;
use crate::match_log::{self, MatchRecord};
use crate::season::SeasonKey;

const FEED_BASE_URL: &str = "https://www.football-data.co.uk/mmz4281";
pub const DEFAULT_DIVISION: &str = "E0";

/// One season's parsed feed rows, plus how many raw rows were dropped as
/// unusable.
#[derive(Debug, Clone)]
pub struct SeasonLog {
    pub season: SeasonKey,
    pub division: String,
    pub matches: Vec<MatchRecord>,
    pub skipped_rows: usize,
}

pub fn season_url(season: &SeasonKey, division: &str) -> String {
    format!("{FEED_BASE_URL}/{}/{}.csv", season.code(), division)
}

/// Download and parse a season file. The HTTP layer revalidates any cached
/// copy, so calling this repeatedly for the same season is cheap.
pub fn fetch_season_log(season: &SeasonKey, division: &str) -> Result<SeasonLog> {
    let url = season_url(season, division);
    let body = fetch_text_cached(&url).with_context(|| format!("download season file {url}"))?;
    let parsed = match_log::parse_match_rows(&body);
    if parsed.matches.is_empty() {
        return Err(anyhow!("season file {url} contained no usable match rows"));
    }
    Ok(SeasonLog {
        season: *season,
        division: division.to_string(),
        matches: parsed.matches,
        skipped_rows: parsed.skipped_rows,
    })
}

#[cfg(test)]
mod tests {
    use super::season_url;
    use crate::season::SeasonKey;

    #[test]
    fn season_url_uses_the_compact_code() {
        let season = SeasonKey::parse("2023-24").unwrap();
        assert_eq!(
            season_url(&season, "E0"),
            "https://www.football-data.co.uk/mmz4281/2324/E0.csv"
        );
    }
}

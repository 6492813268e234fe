use crate::r#match::MatchResult;
use serde::Serialize;

/// Outcome of one regular season day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeagueResult {
    pub day: usize,
    pub match_results: Option<Vec<MatchResult>>,
}

impl LeagueResult {
    pub fn new(day: usize) -> Self {
        LeagueResult {
            day,
            match_results: None,
        }
    }

    pub fn with_match_result(day: usize, match_results: Vec<MatchResult>) -> Self {
        LeagueResult {
            day,
            match_results: Some(match_results),
        }
    }

    pub fn is_match_day(&self) -> bool {
        self.match_results.is_some()
    }

    pub fn results(&self) -> &[MatchResult] {
        self.match_results.as_deref().unwrap_or(&[])
    }
}

use crate::league::ScheduledMatchup;
use crate::r#match::MatchResult;
use serde::Serialize;
use std::collections::BTreeMap;

/// Append-only match history keyed by schedule day.
#[derive(Debug, Default, Clone, Serialize)]
pub struct MatchStorage {
    days: BTreeMap<usize, Vec<MatchResult>>,
}

impl MatchStorage {
    pub fn new() -> Self {
        MatchStorage::default()
    }

    pub fn push_day(&mut self, day: usize, results: Vec<MatchResult>) {
        self.days.entry(day).or_default().extend(results);
    }

    pub fn day(&self, day: usize) -> &[MatchResult] {
        self.days.get(&day).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = &MatchResult> {
        self.days.values().flatten()
    }

    pub fn len(&self) -> usize {
        self.days.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_played(&self, day: usize, matchup: &ScheduledMatchup) -> bool {
        self.day(day).iter().any(|r| {
            r.is_played && r.home_id == matchup.home_id && r.away_id == matchup.away_id
        })
    }
}

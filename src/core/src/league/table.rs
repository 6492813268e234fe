use crate::club::{ClubId, DivisionId};
use crate::r#match::MatchResult;
use itertools::Itertools;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LeagueTableRow {
    pub club_id: ClubId,
    pub played: u32,
    pub sets_won: u32,
    pub games_won: u32,
}

impl LeagueTableRow {
    pub fn new(club_id: ClubId) -> Self {
        LeagueTableRow {
            club_id,
            played: 0,
            sets_won: 0,
            games_won: 0,
        }
    }

    /// Sets won desc, games won desc, club id asc.
    pub fn rank_cmp(&self, other: &Self) -> Ordering {
        other
            .sets_won
            .cmp(&self.sets_won)
            .then_with(|| other.games_won.cmp(&self.games_won))
            .then_with(|| self.club_id.cmp(&other.club_id))
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct LeagueTable {
    pub rows: Vec<LeagueTableRow>,
}

impl LeagueTable {
    pub fn rows(&self) -> &[LeagueTableRow] {
        &self.rows
    }

    pub fn row(&self, club_id: ClubId) -> Option<&LeagueTableRow> {
        self.rows.iter().find(|r| r.club_id == club_id)
    }

    /// Zero-based table position.
    pub fn position(&self, club_id: ClubId) -> Option<usize> {
        self.rows.iter().position(|r| r.club_id == club_id)
    }

    pub fn leader(&self) -> Option<ClubId> {
        self.rows.first().map(|r| r.club_id)
    }

    pub fn ranking(&self) -> Vec<ClubId> {
        self.rows.iter().map(|r| r.club_id).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StandingsScope {
    League,
    Division(DivisionId),
}

/// Folds a match history into a table. Stateless: the same history always
/// yields the same table.
pub struct StandingsAggregator;

impl StandingsAggregator {
    pub fn aggregate<'r, I>(club_ids: &[ClubId], results: I) -> LeagueTable
    where
        I: IntoIterator<Item = &'r MatchResult>,
    {
        let mut rows: HashMap<ClubId, LeagueTableRow> = club_ids
            .iter()
            .map(|id| (*id, LeagueTableRow::new(*id)))
            .collect();

        for result in results.into_iter().filter(|r| r.is_played) {
            if let Some(row) = rows.get_mut(&result.home_id) {
                row.played += 1;
                row.sets_won += result.home_sets as u32;
                row.games_won += result.home_games as u32;
            }

            if let Some(row) = rows.get_mut(&result.away_id) {
                row.played += 1;
                row.sets_won += result.away_sets as u32;
                row.games_won += result.away_games as u32;
            }
        }

        LeagueTable {
            rows: rows.into_values().sorted_by(LeagueTableRow::rank_cmp).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::r#match::SetScore;

    fn history() -> Vec<MatchResult> {
        vec![
            MatchResult::from_sets(1, 2, &[SetScore::new(6, 3), SetScore::new(6, 4)]),
            MatchResult::from_sets(3, 4, &[SetScore::new(2, 6), SetScore::new(6, 2), SetScore::new(4, 6)]),
            MatchResult::from_sets(2, 3, &[SetScore::new(7, 6), SetScore::new(7, 5)]),
            MatchResult::new(1, 4),
        ]
    }

    #[test]
    fn test_aggregate_counts() {
        let table = StandingsAggregator::aggregate(&[1, 2, 3, 4], &history());

        assert_eq!(
            table.row(1),
            Some(&LeagueTableRow { club_id: 1, played: 1, sets_won: 2, games_won: 12 })
        );
        assert_eq!(
            table.row(2),
            Some(&LeagueTableRow { club_id: 2, played: 2, sets_won: 2, games_won: 21 })
        );
        assert_eq!(
            table.row(3),
            Some(&LeagueTableRow { club_id: 3, played: 2, sets_won: 1, games_won: 23 })
        );
        assert_eq!(
            table.row(4),
            Some(&LeagueTableRow { club_id: 4, played: 1, sets_won: 2, games_won: 14 })
        );

        assert_eq!(table.ranking(), vec![2, 4, 1, 3]);
        assert_eq!(table.leader(), Some(2));
        assert_eq!(table.position(3), Some(3));
    }

    #[test]
    fn test_tie_break_falls_back_to_club_id() {
        let results = vec![
            MatchResult::from_sets(5, 2, &[SetScore::new(6, 4)]),
            MatchResult::from_sets(2, 5, &[SetScore::new(6, 4)]),
        ];
        let table = StandingsAggregator::aggregate(&[5, 2], &results);

        assert_eq!(table.ranking(), vec![2, 5]);
    }

    #[test]
    fn test_unknown_clubs_are_ignored_and_idle_clubs_listed() {
        let table = StandingsAggregator::aggregate(&[1, 7], &history());

        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.row(7), Some(&LeagueTableRow::new(7)));
    }

    #[test]
    fn test_aggregate_is_repeatable() {
        let results = history();
        let first = StandingsAggregator::aggregate(&[1, 2, 3, 4], &results);
        let second = StandingsAggregator::aggregate(&[1, 2, 3, 4], &results);

        assert_eq!(first, second);
    }
}

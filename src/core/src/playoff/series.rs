use crate::club::{ClubId, ClubRegistry, DivisionId};
use crate::config::SeriesConfig;
use crate::error::{LeagueError, Result};
use crate::league::ScheduledMatchup;
use crate::r#match::{MatchResult, MatchSimulator, MatchSquad};
use log::debug;
use rand::Rng;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SeriesStatus {
    Planned,
    InProgress,
    Finished,
}

/// Best-of-N series between two seeds. The top seed hosts the odd-numbered
/// matches, the low seed the even-numbered ones.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayoffSeries {
    pub top_seed_id: ClubId,
    pub low_seed_id: ClubId,
    pub round: u32,
    /// `None` for series between division champions.
    pub division: Option<DivisionId>,
    pub top_victories: u8,
    pub low_victories: u8,
    pub status: SeriesStatus,
    pub matches: Vec<MatchResult>,
    #[serde(skip)]
    config: SeriesConfig,
}

impl PlayoffSeries {
    pub fn new(
        top_seed_id: ClubId,
        low_seed_id: ClubId,
        round: u32,
        division: Option<DivisionId>,
        config: SeriesConfig,
    ) -> Self {
        PlayoffSeries {
            top_seed_id,
            low_seed_id,
            round,
            division,
            top_victories: 0,
            low_victories: 0,
            status: SeriesStatus::Planned,
            matches: Vec::new(),
            config,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.top_victories == self.config.matches_to_win
            || self.low_victories == self.config.matches_to_win
    }

    pub fn winner(&self) -> Option<ClubId> {
        if self.top_victories == self.config.matches_to_win {
            Some(self.top_seed_id)
        } else if self.low_victories == self.config.matches_to_win {
            Some(self.low_seed_id)
        } else {
            None
        }
    }

    pub fn loser(&self) -> Option<ClubId> {
        self.winner().map(|winner| {
            if winner == self.top_seed_id {
                self.low_seed_id
            } else {
                self.top_seed_id
            }
        })
    }

    pub fn involves(&self, club_id: ClubId) -> bool {
        self.top_seed_id == club_id || self.low_seed_id == club_id
    }

    /// Matches won in this series by `club_id`.
    pub fn victories(&self, club_id: ClubId) -> Result<u8> {
        if club_id == self.top_seed_id {
            Ok(self.top_victories)
        } else if club_id == self.low_seed_id {
            Ok(self.low_victories)
        } else {
            Err(self.not_a_participant(club_id))
        }
    }

    pub fn sets_won(&self, club_id: ClubId) -> Result<u32> {
        self.ensure_participant(club_id)?;

        self.matches
            .iter()
            .map(|m| m.sets_won_by(club_id).map(u32::from))
            .sum()
    }

    pub fn games_won(&self, club_id: ClubId) -> Result<u32> {
        self.ensure_participant(club_id)?;

        self.matches
            .iter()
            .map(|m| m.games_won_by(club_id).map(u32::from))
            .sum()
    }

    pub fn next_matchup(&self) -> Result<ScheduledMatchup> {
        if self.is_finished() {
            return Err(LeagueError::state(format!("{} is finished", self.describe())));
        }

        if self.matches.len() % 2 == 0 {
            Ok(ScheduledMatchup::new(self.top_seed_id, self.low_seed_id))
        } else {
            Ok(ScheduledMatchup::new(self.low_seed_id, self.top_seed_id))
        }
    }

    /// Appends a finished match and credits the side that reached `sets_to_win`.
    pub fn record(&mut self, result: MatchResult) -> Result<()> {
        if self.is_finished() {
            return Err(LeagueError::state(format!("{} is finished", self.describe())));
        }

        for club_id in [result.home_id, result.away_id] {
            self.ensure_participant(club_id)?;
        }

        if result.home_id == result.away_id {
            return Err(LeagueError::configuration(format!(
                "club {} cannot play itself",
                result.home_id
            )));
        }

        let winner = result
            .winner(self.config.sets_to_win)
            .filter(|_| result.is_played)
            .ok_or_else(|| {
                LeagueError::state(format!(
                    "match {} vs {} has no winner",
                    result.home_id, result.away_id
                ))
            })?;

        if winner == self.top_seed_id {
            self.top_victories += 1;
        } else {
            self.low_victories += 1;
        }

        self.matches.push(result);

        self.status = if self.is_finished() {
            SeriesStatus::Finished
        } else {
            SeriesStatus::InProgress
        };

        debug!(
            "{}: {}-{}",
            self.describe(),
            self.top_victories,
            self.low_victories
        );

        Ok(())
    }

    pub fn play_next<R: Rng + ?Sized>(
        &mut self,
        registry: &ClubRegistry,
        simulator: &MatchSimulator,
        rng: &mut R,
    ) -> Result<&MatchResult> {
        let matchup = self.next_matchup()?;

        let home = registry.selected_player(matchup.home_id)?;
        let away = registry.selected_player(matchup.away_id)?;
        let surface = registry.home_surface(matchup.home_id)?;

        let result = simulator.simulate(
            MatchSquad::new(matchup.home_id, home),
            MatchSquad::new(matchup.away_id, away),
            surface,
            rng,
        );

        self.record(result)?;

        self.matches
            .last()
            .ok_or_else(|| LeagueError::state("recorded match is missing"))
    }

    fn ensure_participant(&self, club_id: ClubId) -> Result<()> {
        if self.involves(club_id) {
            Ok(())
        } else {
            Err(self.not_a_participant(club_id))
        }
    }

    fn not_a_participant(&self, club_id: ClubId) -> LeagueError {
        LeagueError::participant(club_id, self.describe())
    }

    fn describe(&self) -> String {
        format!(
            "series {} vs {} (round {})",
            self.top_seed_id, self.low_seed_id, self.round
        )
    }
}

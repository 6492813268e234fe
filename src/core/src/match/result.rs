use crate::club::{ClubId, PlayerId};
use crate::error::{LeagueError, Result};
use crate::r#match::Surface;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const GAMES_IN_SET: u8 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetScore {
    pub home: u8,
    pub away: u8,
}

impl SetScore {
    pub fn new(home: u8, away: u8) -> Self {
        SetScore { home, away }
    }

    pub fn home_won(&self) -> bool {
        self.home > self.away
    }

    /// 6-0 .. 6-4, 7-5 or a 7-6 tie-break, in either direction.
    pub fn is_valid(&self) -> bool {
        let winner = self.home.max(self.away);
        let loser = self.home.min(self.away);

        match winner {
            GAMES_IN_SET => loser <= GAMES_IN_SET - 2,
            w if w == GAMES_IN_SET + 1 => loser == GAMES_IN_SET - 1 || loser == GAMES_IN_SET,
            _ => false,
        }
    }
}

impl fmt::Display for SetScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.home, self.away)
    }
}

/// Who actually played and at what strength. Selections may change between
/// days, so the result keeps its own copy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchContext {
    pub home_player_id: PlayerId,
    pub away_player_id: PlayerId,
    /// Effective skills on `surface`.
    pub home_skill: f32,
    pub away_skill: f32,
    pub surface: Surface,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub home_id: ClubId,
    pub away_id: ClubId,
    pub home_sets: u8,
    pub away_sets: u8,
    pub home_games: u16,
    pub away_games: u16,
    pub sets: Vec<SetScore>,
    pub is_played: bool,
    /// `None` for results built outside the simulator.
    pub context: Option<MatchContext>,
}

impl MatchResult {
    pub fn new(home_id: ClubId, away_id: ClubId) -> Self {
        MatchResult {
            home_id,
            away_id,
            home_sets: 0,
            away_sets: 0,
            home_games: 0,
            away_games: 0,
            sets: Vec::new(),
            is_played: false,
            context: None,
        }
    }

    /// Builds a played result from explicit set scores. Unfinished set scores are skipped.
    pub fn from_sets(home_id: ClubId, away_id: ClubId, sets: &[SetScore]) -> Self {
        let mut result = MatchResult::new(home_id, away_id);
        for set in sets {
            result.push_set(*set);
        }
        result.is_played = true;
        result
    }

    /// Credits a finished set to its winner. Returns `false` and leaves the
    /// result untouched when `set` is not a valid final set score.
    pub fn push_set(&mut self, set: SetScore) -> bool {
        if !set.is_valid() {
            return false;
        }

        if set.home_won() {
            self.home_sets += 1;
        } else {
            self.away_sets += 1;
        }

        self.home_games += set.home as u16;
        self.away_games += set.away as u16;
        self.sets.push(set);
        true
    }

    pub fn with_context(mut self, context: MatchContext) -> Self {
        self.context = Some(context);
        self
    }

    pub fn involves(&self, club_id: ClubId) -> bool {
        self.home_id == club_id || self.away_id == club_id
    }

    pub fn sets_won_by(&self, club_id: ClubId) -> Result<u8> {
        if club_id == self.home_id {
            Ok(self.home_sets)
        } else if club_id == self.away_id {
            Ok(self.away_sets)
        } else {
            Err(LeagueError::participant(club_id, self.describe()))
        }
    }

    pub fn games_won_by(&self, club_id: ClubId) -> Result<u16> {
        if club_id == self.home_id {
            Ok(self.home_games)
        } else if club_id == self.away_id {
            Ok(self.away_games)
        } else {
            Err(LeagueError::participant(club_id, self.describe()))
        }
    }

    /// The side whose set count reached `sets_to_win`.
    pub fn winner(&self, sets_to_win: u8) -> Option<ClubId> {
        if self.home_sets == sets_to_win {
            Some(self.home_id)
        } else if self.away_sets == sets_to_win {
            Some(self.away_id)
        } else {
            None
        }
    }

    pub fn loser(&self, sets_to_win: u8) -> Option<ClubId> {
        self.winner(sets_to_win).map(|winner| {
            if winner == self.home_id {
                self.away_id
            } else {
                self.home_id
            }
        })
    }

    /// Space separated set scores from the home side's view, e.g. `6-4 3-6 7-6`.
    pub fn full_score(&self) -> String {
        self.sets
            .iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn describe(&self) -> String {
        format!("match {} vs {}", self.home_id, self.away_id)
    }
}

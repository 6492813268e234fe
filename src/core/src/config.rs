use crate::error::{LeagueError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// How the playoffs end once every division has crowned a champion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FinalFormat {
    /// Division champions keep playing series until one club remains.
    CrossDivisionFinal,
    /// Division champions stand side by side; no final is played.
    CoChampions,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompetitionConfig {
    /// Legs of the intra-division round-robin. Consecutive legs flip home and away.
    pub rounds: u32,
    /// Legs of the cross-division pairing; falls back to `rounds`.
    pub extra_division_rounds: Option<u32>,
    pub recovery_day_period: u32,
    pub sets_to_win: u8,
    pub matches_to_win: u8,
    /// Clubs per division entering the playoffs.
    pub playoff_seeds: u32,
    pub final_format: FinalFormat,
    pub season_start: NaiveDate,
}

impl Default for CompetitionConfig {
    fn default() -> Self {
        CompetitionConfig {
            rounds: 2,
            extra_division_rounds: None,
            recovery_day_period: 4,
            sets_to_win: 2,
            matches_to_win: 3,
            playoff_seeds: 4,
            final_format: FinalFormat::CrossDivisionFinal,
            season_start: NaiveDate::from_ymd_opt(2024, 9, 1).unwrap_or_default(),
        }
    }
}

impl CompetitionConfig {
    pub fn validate(&self) -> Result<()> {
        self.schedule().validate()?;

        if self.sets_to_win == 0 {
            return Err(LeagueError::configuration("sets_to_win must be at least 1"));
        }

        if self.matches_to_win == 0 {
            return Err(LeagueError::configuration("matches_to_win must be at least 1"));
        }

        if self.playoff_seeds < 2 {
            return Err(LeagueError::configuration("playoff_seeds must be at least 2"));
        }

        Ok(())
    }

    pub fn schedule(&self) -> ScheduleConfig {
        ScheduleConfig {
            rounds: self.rounds,
            extra_division_rounds: self.extra_division_rounds.unwrap_or(self.rounds),
            recovery_day_period: self.recovery_day_period,
        }
    }

    pub fn series(&self) -> SeriesConfig {
        SeriesConfig {
            sets_to_win: self.sets_to_win,
            matches_to_win: self.matches_to_win,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleConfig {
    pub rounds: u32,
    pub extra_division_rounds: u32,
    pub recovery_day_period: u32,
}

impl ScheduleConfig {
    pub fn new(rounds: u32, recovery_day_period: u32) -> Self {
        ScheduleConfig {
            rounds,
            extra_division_rounds: rounds,
            recovery_day_period,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.rounds == 0 {
            return Err(LeagueError::configuration("rounds must be at least 1"));
        }

        if self.extra_division_rounds == 0 {
            return Err(LeagueError::configuration(
                "extra_division_rounds must be at least 1",
            ));
        }

        // period 1 would make every day a rest day
        if self.recovery_day_period < 2 {
            return Err(LeagueError::configuration(
                "recovery_day_period must be at least 2",
            ));
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesConfig {
    pub sets_to_win: u8,
    pub matches_to_win: u8,
}

use crate::club::ClubId;
use crate::error::{LeagueError, Result};
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScheduledMatchup {
    pub home_id: ClubId,
    pub away_id: ClubId,
}

impl ScheduledMatchup {
    pub fn new(home_id: ClubId, away_id: ClubId) -> Self {
        ScheduledMatchup { home_id, away_id }
    }

    pub fn mirrored(&self) -> Self {
        ScheduledMatchup::new(self.away_id, self.home_id)
    }

    pub fn involves(&self, club_id: ClubId) -> bool {
        self.home_id == club_id || self.away_id == club_id
    }
}

/// `None` is a rest day.
pub type ScheduleDay = Option<Vec<ScheduledMatchup>>;

/// Regular season calendar. Fixed once built; read by a day cursor.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Schedule {
    days: Vec<ScheduleDay>,
}

impl Schedule {
    /// Rebuilds a schedule from stored days, rejecting any day that lists a club twice.
    pub fn from_days(days: Vec<ScheduleDay>) -> Result<Self> {
        for (index, day) in days.iter().enumerate() {
            let Some(matchups) = day else { continue };

            let mut playing = HashSet::new();
            for matchup in matchups {
                if matchup.home_id == matchup.away_id {
                    return Err(LeagueError::configuration(format!(
                        "club {} plays itself on day {}",
                        matchup.home_id, index
                    )));
                }

                if !playing.insert(matchup.home_id) || !playing.insert(matchup.away_id) {
                    return Err(LeagueError::configuration(format!(
                        "a club plays twice on day {index}"
                    )));
                }
            }
        }

        Ok(Schedule { days })
    }

    pub(crate) fn new(days: Vec<ScheduleDay>) -> Self {
        Schedule { days }
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn days(&self) -> &[ScheduleDay] {
        &self.days
    }

    /// Matchups of `day`; `None` for rest days and days past the end.
    pub fn matchups(&self, day: usize) -> Option<&[ScheduledMatchup]> {
        self.days.get(day).and_then(|d| d.as_deref())
    }

    pub fn is_rest_day(&self, day: usize) -> bool {
        matches!(self.days.get(day), Some(None))
    }

    pub fn match_days(&self) -> usize {
        self.days.iter().filter(|d| d.is_some()).count()
    }

    pub fn all_matchups(&self) -> impl Iterator<Item = &ScheduledMatchup> {
        self.days.iter().flatten().flatten()
    }

    pub fn club_matchups(&self, club_id: ClubId) -> Vec<(usize, ScheduledMatchup)> {
        self.days
            .iter()
            .enumerate()
            .filter_map(|(index, day)| day.as_ref().map(|matchups| (index, matchups)))
            .flat_map(|(index, matchups)| {
                matchups
                    .iter()
                    .filter(move |m| m.involves(club_id))
                    .map(move |m| (index, *m))
            })
            .collect()
    }

    pub fn date_of(&self, day: usize, season_start: NaiveDate) -> Option<NaiveDate> {
        season_start.checked_add_days(Days::new(day as u64))
    }
}

use crate::club::{ClubId, ClubRegistry, DivisionId, Player};
use crate::config::CompetitionConfig;
use crate::error::{LeagueError, Result};
use crate::league::{
    LeagueResult, LeagueTable, MatchStorage, Schedule, ScheduleGenerator, ScheduledMatchup,
    StandingsAggregator, StandingsScope,
};
use crate::r#match::{MatchResult, MatchSimulator, MatchSquad, Surface};
use crate::utils::Logging;
use log::{debug, info, warn};
use rand::Rng;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CompetitionState {
    NotStarted,
    InProgress,
    Finished,
}

/// Regular season controller: walks the schedule one day at a time and
/// owns the match history.
#[derive(Debug, Clone)]
pub struct League {
    divisions: BTreeMap<DivisionId, Vec<ClubId>>,
    schedule: Schedule,
    day: usize,
    matches: MatchStorage,
    simulator: MatchSimulator,
}

impl League {
    pub fn new<R: Rng + ?Sized>(
        registry: &ClubRegistry,
        config: &CompetitionConfig,
        rng: &mut R,
    ) -> Result<Self> {
        let divisions = registry.divisions();

        let schedule = Logging::estimate_result(
            || ScheduleGenerator::generate(&divisions, &config.schedule(), rng),
            "generate schedule",
        )?;

        League::with_schedule(divisions, schedule, config.sets_to_win)
    }

    pub fn with_schedule(
        divisions: BTreeMap<DivisionId, Vec<ClubId>>,
        schedule: Schedule,
        sets_to_win: u8,
    ) -> Result<Self> {
        Ok(League {
            divisions,
            schedule,
            day: 0,
            matches: MatchStorage::new(),
            simulator: MatchSimulator::new(sets_to_win)?,
        })
    }

    /// Plays the current day and moves the cursor forward. Rest days only
    /// move the cursor; once the season is over this is a no-op.
    ///
    /// A matchup whose club has no selected player fails the whole day with
    /// a configuration error, leaving history and cursor untouched.
    pub fn advance<R: Rng + ?Sized>(
        &mut self,
        registry: &ClubRegistry,
        rng: &mut R,
    ) -> Result<LeagueResult> {
        if self.is_over() {
            return Ok(LeagueResult::new(self.day));
        }

        let day = self.day;

        let Some(matchups) = self.schedule.matchups(day) else {
            debug!("day {}: rest day", day);
            self.day += 1;
            return Ok(LeagueResult::new(day));
        };

        let mut squads = Vec::with_capacity(matchups.len());

        for matchup in matchups {
            if self.matches.is_played(day, matchup) {
                continue;
            }

            let prepared = Self::prepare_matchup(registry, matchup);
            if let Err(error) = &prepared {
                warn!("day {} not played: {}", day, error);
            }
            squads.push(prepared?);
        }

        let results: Vec<MatchResult> = squads
            .into_iter()
            .map(|(matchup, home, away, surface)| {
                self.simulator.simulate(
                    MatchSquad::new(matchup.home_id, home),
                    MatchSquad::new(matchup.away_id, away),
                    surface,
                    rng,
                )
            })
            .collect();

        debug!("day {}: {} matches played", day, results.len());

        self.matches.push_day(day, results.clone());
        self.day += 1;

        if self.is_over() {
            info!("regular season finished after {} days", self.day);
        }

        Ok(LeagueResult::with_match_result(day, results))
    }

    fn prepare_matchup<'r>(
        registry: &'r ClubRegistry,
        matchup: &ScheduledMatchup,
    ) -> Result<(ScheduledMatchup, &'r Player, &'r Player, Surface)> {
        let home = registry.selected_player(matchup.home_id)?;
        let away = registry.selected_player(matchup.away_id)?;
        let surface = registry.home_surface(matchup.home_id)?;

        Ok((*matchup, home, away, surface))
    }

    pub fn is_over(&self) -> bool {
        self.day >= self.schedule.len()
    }

    pub fn state(&self) -> CompetitionState {
        if self.is_over() {
            CompetitionState::Finished
        } else if self.day == 0 {
            CompetitionState::NotStarted
        } else {
            CompetitionState::InProgress
        }
    }

    pub fn current_day(&self) -> usize {
        self.day
    }

    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    pub fn matches(&self) -> &MatchStorage {
        &self.matches
    }

    pub fn divisions(&self) -> &BTreeMap<DivisionId, Vec<ClubId>> {
        &self.divisions
    }

    pub fn club_ids(&self) -> Vec<ClubId> {
        self.divisions.values().flatten().copied().collect()
    }

    pub fn current_matchups(&self) -> Option<&[ScheduledMatchup]> {
        self.schedule.matchups(self.day)
    }

    pub fn club_matchup_today(&self, club_id: ClubId) -> Option<ScheduledMatchup> {
        self.current_matchups()?
            .iter()
            .find(|m| m.involves(club_id))
            .copied()
    }

    pub fn day_results(&self, day: usize) -> &[MatchResult] {
        self.matches.day(day)
    }

    pub fn is_played(&self, day: usize, matchup: &ScheduledMatchup) -> bool {
        self.matches.is_played(day, matchup)
    }

    /// Recomputed from the full match history on every call.
    pub fn standings(&self, scope: StandingsScope) -> Result<LeagueTable> {
        let club_ids = match scope {
            StandingsScope::League => self.club_ids(),
            StandingsScope::Division(division) => self
                .divisions
                .get(&division)
                .cloned()
                .ok_or_else(|| LeagueError::configuration(format!("unknown division {division}")))?,
        };

        Ok(StandingsAggregator::aggregate(&club_ids, self.matches.iter()))
    }
}

use crate::club::{ClubId, ClubRegistry, DivisionId};
use crate::config::CompetitionConfig;
use crate::error::Result;
use crate::league::{League, LeagueTable, Schedule, StandingsScope};
use crate::playoff::{PlayoffBracket, PlayoffSeries};
use crate::r#match::MatchResult;
use chrono::{Days, NaiveDate};
use log::info;
use rand::Rng;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SeasonPhase {
    RegularSeason,
    Playoffs,
    Finished,
}

/// What happened on one simulated day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationResult {
    pub phase: SeasonPhase,
    pub day: usize,
    pub date: Option<NaiveDate>,
    pub match_results: Vec<MatchResult>,
}

impl SimulationResult {
    pub fn new(phase: SeasonPhase, day: usize, date: Option<NaiveDate>) -> Self {
        SimulationResult {
            phase,
            day,
            date,
            match_results: Vec::new(),
        }
    }

    pub fn is_rest_day(&self) -> bool {
        self.match_results.is_empty()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SeasonSummary {
    pub season_start: NaiveDate,
    pub days: usize,
    pub schedule: Schedule,
    pub standings: LeagueTable,
    pub division_standings: BTreeMap<DivisionId, LeagueTable>,
    pub playoff_series: Vec<PlayoffSeries>,
    pub champions: Vec<ClubId>,
}

/// Drives one season: the regular season day by day, then the playoffs
/// seeded from its final standings.
#[derive(Debug, Clone)]
pub struct SeasonSimulator {
    config: CompetitionConfig,
    league: League,
    playoffs: Option<PlayoffBracket>,
    phase: SeasonPhase,
    day: usize,
}

impl SeasonSimulator {
    pub fn new<R: Rng + ?Sized>(
        registry: &ClubRegistry,
        config: CompetitionConfig,
        rng: &mut R,
    ) -> Result<Self> {
        config.validate()?;

        let league = League::new(registry, &config, rng)?;

        Ok(SeasonSimulator {
            config,
            league,
            playoffs: None,
            phase: SeasonPhase::RegularSeason,
            day: 0,
        })
    }

    /// Simulates one calendar day. Once the season is finished this is a no-op.
    pub fn advance<R: Rng + ?Sized>(
        &mut self,
        registry: &ClubRegistry,
        rng: &mut R,
    ) -> Result<SimulationResult> {
        let mut result = SimulationResult::new(self.phase, self.day, self.current_date());

        match self.phase {
            SeasonPhase::RegularSeason => {
                let league_result = self.league.advance(registry, rng)?;
                result.match_results = league_result.match_results.unwrap_or_default();

                if self.league.is_over() {
                    self.start_playoffs()?;
                }
            }
            SeasonPhase::Playoffs => {
                if let Some(playoffs) = self.playoffs.as_mut() {
                    result.match_results = playoffs.advance(registry, rng)?;

                    if playoffs.is_over() {
                        self.finish();
                    }
                }
            }
            SeasonPhase::Finished => return Ok(result),
        }

        self.day += 1;

        Ok(result)
    }

    /// Advances until the season is finished and returns its summary.
    pub fn run<R: Rng + ?Sized>(
        &mut self,
        registry: &ClubRegistry,
        rng: &mut R,
    ) -> Result<SeasonSummary> {
        while !self.is_over() {
            self.advance(registry, rng)?;
        }

        self.summary()
    }

    fn start_playoffs(&mut self) -> Result<()> {
        let standings = self.league.standings(StandingsScope::League)?;
        info!(
            "regular season over, leader: {:?}",
            standings.leader()
        );

        let playoffs = PlayoffBracket::from_league(&self.league, &self.config)?;
        let over = playoffs.is_over();

        self.playoffs = Some(playoffs);
        self.phase = SeasonPhase::Playoffs;

        if over {
            self.finish();
        }

        Ok(())
    }

    fn finish(&mut self) {
        self.phase = SeasonPhase::Finished;
        info!("season finished after {} days, champions: {:?}", self.day + 1, self.champions());
    }

    pub fn is_over(&self) -> bool {
        self.phase == SeasonPhase::Finished
    }

    pub fn phase(&self) -> SeasonPhase {
        self.phase
    }

    pub fn config(&self) -> &CompetitionConfig {
        &self.config
    }

    pub fn league(&self) -> &League {
        &self.league
    }

    pub fn playoffs(&self) -> Option<&PlayoffBracket> {
        self.playoffs.as_ref()
    }

    pub fn current_day(&self) -> usize {
        self.day
    }

    pub fn current_date(&self) -> Option<NaiveDate> {
        self.config
            .season_start
            .checked_add_days(Days::new(self.day as u64))
    }

    pub fn champion(&self) -> Option<ClubId> {
        self.playoffs.as_ref().and_then(PlayoffBracket::champion)
    }

    pub fn champions(&self) -> Vec<ClubId> {
        self.playoffs
            .as_ref()
            .map(|playoffs| playoffs.champions().to_vec())
            .unwrap_or_default()
    }

    pub fn summary(&self) -> Result<SeasonSummary> {
        let mut division_standings = BTreeMap::new();
        for division in self.league.divisions().keys() {
            division_standings.insert(
                *division,
                self.league.standings(StandingsScope::Division(*division))?,
            );
        }

        Ok(SeasonSummary {
            season_start: self.config.season_start,
            days: self.day,
            schedule: self.league.schedule().clone(),
            standings: self.league.standings(StandingsScope::League)?,
            division_standings,
            playoff_series: self
                .playoffs
                .as_ref()
                .map(|playoffs| playoffs.series().to_vec())
                .unwrap_or_default(),
            champions: self.champions(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::club::{Club, Player};
    use crate::config::FinalFormat;
    use crate::error::LeagueError;
    use crate::r#match::Surface;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn registry() -> ClubRegistry {
        let mut registry = ClubRegistry::new();
        for club_id in 1..=6u32 {
            let division = if club_id <= 3 { 1 } else { 2 };
            let surface = Surface::ALL[club_id as usize % Surface::ALL.len()];
            registry
                .add_club(Club::new(club_id, format!("Club {club_id}"), division, surface))
                .unwrap();
            registry
                .add_player(
                    club_id,
                    Player::builder()
                        .id(club_id)
                        .skill(8.0 + club_id as f32)
                        .build()
                        .unwrap(),
                )
                .unwrap();
        }
        registry.auto_select();
        registry
    }

    fn config() -> CompetitionConfig {
        CompetitionConfig {
            playoff_seeds: 2,
            matches_to_win: 2,
            ..Default::default()
        }
    }

    #[test]
    fn test_season_runs_through_all_phases() {
        let registry = registry();
        let mut rng = StdRng::seed_from_u64(11);
        let mut simulator = SeasonSimulator::new(&registry, config(), &mut rng).unwrap();

        assert_eq!(simulator.phase(), SeasonPhase::RegularSeason);
        assert_eq!(simulator.current_date(), NaiveDate::from_ymd_opt(2024, 9, 1));

        let summary = simulator.run(&registry, &mut rng).unwrap();

        assert!(simulator.is_over());
        assert!(simulator.league().is_over());
        assert!(simulator.playoffs().is_some_and(PlayoffBracket::is_over));
        assert_eq!(summary.champions.len(), 1);
        assert_eq!(simulator.champion(), summary.champions.first().copied());
        assert_eq!(summary.standings.rows().len(), 6);
        assert_eq!(summary.division_standings.len(), 2);
        assert!(summary.days > simulator.league().schedule().len());
        assert!(summary.playoff_series.iter().all(PlayoffSeries::is_finished));

        // every club plays every other club twice in the regular season
        for row in summary.standings.rows() {
            assert_eq!(row.played, 10);
        }
    }

    #[test]
    fn test_co_champions_without_final() {
        let registry = registry();
        let mut rng = StdRng::seed_from_u64(3);
        let config = CompetitionConfig {
            final_format: FinalFormat::CoChampions,
            ..config()
        };
        let mut simulator = SeasonSimulator::new(&registry, config, &mut rng).unwrap();

        let summary = simulator.run(&registry, &mut rng).unwrap();

        assert_eq!(summary.champions.len(), 2);
        assert_eq!(simulator.champion(), None);
    }

    #[test]
    fn test_advance_after_finish_is_noop() {
        let registry = registry();
        let mut rng = StdRng::seed_from_u64(8);
        let mut simulator = SeasonSimulator::new(&registry, config(), &mut rng).unwrap();
        simulator.run(&registry, &mut rng).unwrap();

        let day = simulator.current_day();
        let result = simulator.advance(&registry, &mut rng).unwrap();

        assert_eq!(result.phase, SeasonPhase::Finished);
        assert!(result.is_rest_day());
        assert_eq!(simulator.current_day(), day);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let registry = registry();
        let mut rng = StdRng::seed_from_u64(1);
        let config = CompetitionConfig {
            sets_to_win: 0,
            ..Default::default()
        };

        assert!(matches!(
            SeasonSimulator::new(&registry, config, &mut rng),
            Err(LeagueError::Configuration(_))
        ));
    }

    #[test]
    fn test_summary_serializes() {
        let registry = registry();
        let mut rng = StdRng::seed_from_u64(21);
        let mut simulator = SeasonSimulator::new(&registry, config(), &mut rng).unwrap();
        let summary = simulator.run(&registry, &mut rng).unwrap();

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["season_start"], "2024-09-01");
        assert!(json["schedule"].as_array().is_some_and(|days| !days.is_empty()));
        assert_eq!(json["champions"].as_array().map(Vec::len), Some(1));
    }
}

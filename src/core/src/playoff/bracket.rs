use crate::club::{ClubId, ClubRegistry, DivisionId, Player};
use crate::config::{CompetitionConfig, FinalFormat, SeriesConfig};
use crate::error::{LeagueError, Result};
use crate::league::{CompetitionState, League, LeagueTable, ScheduledMatchup, StandingsScope};
use crate::playoff::PlayoffSeries;
use crate::r#match::{MatchResult, MatchSimulator, MatchSquad, Surface};
use log::{debug, info, warn};
use rand::Rng;
use serde::Serialize;
use std::collections::BTreeMap;

/// A pool of clubs that play each other until one is left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum BracketGroup {
    Division(DivisionId),
    /// Division champions playing for the overall title.
    Final,
}

impl BracketGroup {
    pub fn division(&self) -> Option<DivisionId> {
        match self {
            BracketGroup::Division(division) => Some(*division),
            BracketGroup::Final => None,
        }
    }

    fn of(series: &PlayoffSeries) -> Self {
        match series.division {
            Some(division) => BracketGroup::Division(division),
            None => BracketGroup::Final,
        }
    }
}

/// Lower rank is the better seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlayoffSeed {
    pub club_id: ClubId,
    pub rank: u32,
}

impl PlayoffSeed {
    pub fn new(club_id: ClubId, rank: u32) -> Self {
        PlayoffSeed { club_id, rank }
    }
}

/// Single-elimination bracket of best-of-N series, one per division,
/// optionally followed by a final stage between the division champions.
///
/// Every round the surviving seeds of a group are re-sorted by their
/// original rank and paired best against worst; an odd group gives its
/// best seed a bye.
#[derive(Debug, Clone, Serialize)]
pub struct PlayoffBracket {
    series: Vec<PlayoffSeries>,
    round: u32,
    division_champions: BTreeMap<DivisionId, ClubId>,
    champions: Vec<ClubId>,
    finished: bool,
    #[serde(skip)]
    alive: BTreeMap<BracketGroup, Vec<PlayoffSeed>>,
    #[serde(skip)]
    league_ranking: Vec<ClubId>,
    #[serde(skip)]
    final_format: FinalFormat,
    #[serde(skip)]
    config: SeriesConfig,
    #[serde(skip)]
    simulator: MatchSimulator,
}

impl PlayoffBracket {
    /// Seeds the top `playoff_seeds` clubs of every division table and builds round one.
    /// `league_table` orders the division champions for the final stage.
    pub fn seed(
        division_tables: &BTreeMap<DivisionId, LeagueTable>,
        league_table: &LeagueTable,
        config: &CompetitionConfig,
    ) -> Result<Self> {
        if division_tables.is_empty() {
            return Err(LeagueError::configuration("playoffs need at least one division"));
        }

        if config.playoff_seeds == 0 {
            return Err(LeagueError::configuration("playoff_seeds must be positive"));
        }

        let mut alive = BTreeMap::new();

        for (division, table) in division_tables {
            let seeds: Vec<PlayoffSeed> = table
                .ranking()
                .into_iter()
                .take(config.playoff_seeds as usize)
                .enumerate()
                .map(|(idx, club_id)| PlayoffSeed::new(club_id, idx as u32 + 1))
                .collect();

            if seeds.is_empty() {
                return Err(LeagueError::configuration(format!(
                    "division {division} has no clubs to seed"
                )));
            }

            alive.insert(BracketGroup::Division(*division), seeds);
        }

        let series_config = config.series();

        let mut bracket = PlayoffBracket {
            series: Vec::new(),
            round: 0,
            division_champions: BTreeMap::new(),
            champions: Vec::new(),
            finished: false,
            alive,
            league_ranking: league_table.ranking(),
            final_format: config.final_format,
            config: series_config,
            simulator: MatchSimulator::new(series_config.sets_to_win)?,
        };

        bracket.build_round();

        Ok(bracket)
    }

    /// Seeds from the final regular season standings.
    pub fn from_league(league: &League, config: &CompetitionConfig) -> Result<Self> {
        if !league.is_over() {
            return Err(LeagueError::state("regular season is still in progress"));
        }

        let mut division_tables = BTreeMap::new();
        for division in league.divisions().keys() {
            division_tables.insert(
                *division,
                league.standings(StandingsScope::Division(*division))?,
            );
        }

        let league_table = league.standings(StandingsScope::League)?;

        PlayoffBracket::seed(&division_tables, &league_table, config)
    }

    /// Plays the next match of every open series in the current round. When the
    /// round completes, losers are eliminated and the next round is built.
    ///
    /// All participants are checked for a selected player before anything is
    /// simulated; on error nothing changes.
    pub fn advance<R: Rng + ?Sized>(
        &mut self,
        registry: &ClubRegistry,
        rng: &mut R,
    ) -> Result<Vec<MatchResult>> {
        if self.finished {
            return Ok(Vec::new());
        }

        let mut prepared = Vec::new();

        for (idx, series) in self.series.iter().enumerate() {
            if series.round != self.round || series.is_finished() {
                continue;
            }

            let matchup = series.next_matchup()?;

            let squads = Self::prepare_matchup(registry, &matchup);
            if let Err(error) = &squads {
                warn!("playoff round {} not played: {}", self.round, error);
            }

            let (home, away, surface) = squads?;
            prepared.push((idx, matchup, home, away, surface));
        }

        let mut results = Vec::with_capacity(prepared.len());

        for (idx, matchup, home, away, surface) in prepared {
            let result = self.simulator.simulate(
                MatchSquad::new(matchup.home_id, home),
                MatchSquad::new(matchup.away_id, away),
                surface,
                rng,
            );

            self.series[idx].record(result.clone())?;
            results.push(result);
        }

        if self.is_round_complete(self.round) {
            self.close_round();
        }

        Ok(results)
    }

    fn prepare_matchup<'r>(
        registry: &'r ClubRegistry,
        matchup: &ScheduledMatchup,
    ) -> Result<(&'r Player, &'r Player, Surface)> {
        let home = registry.selected_player(matchup.home_id)?;
        let away = registry.selected_player(matchup.away_id)?;
        let surface = registry.home_surface(matchup.home_id)?;

        Ok((home, away, surface))
    }

    fn close_round(&mut self) {
        for series in self.series.iter().filter(|s| s.round == self.round) {
            let Some(loser) = series.loser() else {
                continue;
            };

            if let Some(seeds) = self.alive.get_mut(&BracketGroup::of(series)) {
                seeds.retain(|seed| seed.club_id != loser);
            }
        }

        debug!("playoff round {} complete", self.round);

        self.build_round();
    }

    fn build_round(&mut self) {
        loop {
            self.record_division_champions();

            let pairings = self.pairings();

            if !pairings.is_empty() {
                self.round += 1;

                for (group, top, low) in &pairings {
                    self.series.push(PlayoffSeries::new(
                        top.club_id,
                        low.club_id,
                        self.round,
                        group.division(),
                        self.config,
                    ));
                }

                info!(
                    "playoff round {} built with {} series",
                    self.round,
                    pairings.len()
                );
                return;
            }

            if self.final_pending() {
                self.open_final();
                continue;
            }

            self.finish();
            return;
        }
    }

    fn record_division_champions(&mut self) {
        for (group, seeds) in &self.alive {
            if let (BracketGroup::Division(division), [seed]) = (group, seeds.as_slice()) {
                self.division_champions.insert(*division, seed.club_id);
            }
        }
    }

    fn pairings(&self) -> Vec<(BracketGroup, PlayoffSeed, PlayoffSeed)> {
        let mut pairings = Vec::new();

        for (group, seeds) in &self.alive {
            let mut seeds = seeds.clone();
            seeds.sort_by_key(|seed| (seed.rank, seed.club_id));

            // best seed sits out an odd round
            let contenders = if seeds.len() % 2 == 1 { &seeds[1..] } else { &seeds[..] };
            let count = contenders.len();

            for idx in 0..count / 2 {
                pairings.push((*group, contenders[idx], contenders[count - 1 - idx]));
            }
        }

        pairings
    }

    fn final_pending(&self) -> bool {
        self.final_format == FinalFormat::CrossDivisionFinal
            && !self.alive.contains_key(&BracketGroup::Final)
            && self.division_champions.len() > 1
    }

    fn open_final(&mut self) {
        let seeds: Vec<PlayoffSeed> = self
            .division_champions
            .values()
            .map(|club_id| {
                let rank = self
                    .league_ranking
                    .iter()
                    .position(|id| id == club_id)
                    .map_or(u32::MAX, |pos| pos as u32 + 1);

                PlayoffSeed::new(*club_id, rank)
            })
            .collect();

        info!("final stage opened for {} division champions", seeds.len());

        self.alive.insert(BracketGroup::Final, seeds);
    }

    fn finish(&mut self) {
        self.champions = match self.alive.get(&BracketGroup::Final) {
            Some(seeds) => seeds.iter().map(|seed| seed.club_id).collect(),
            None => self.division_champions.values().copied().collect(),
        };

        self.finished = true;

        info!("playoffs finished, champions: {:?}", self.champions);
    }

    pub fn is_over(&self) -> bool {
        self.finished
    }

    pub fn state(&self) -> CompetitionState {
        if self.finished {
            CompetitionState::Finished
        } else if self.series.iter().all(|s| s.matches.is_empty()) {
            CompetitionState::NotStarted
        } else {
            CompetitionState::InProgress
        }
    }

    pub fn current_round(&self) -> u32 {
        self.round
    }

    /// Highest round built so far.
    pub fn max_round(&self) -> u32 {
        self.series.iter().map(|s| s.round).max().unwrap_or(0)
    }

    pub fn is_round_complete(&self, round: u32) -> bool {
        self.series
            .iter()
            .filter(|s| s.round == round)
            .all(PlayoffSeries::is_finished)
    }

    pub fn series(&self) -> &[PlayoffSeries] {
        &self.series
    }

    pub fn series_in_round(&self, round: u32) -> Vec<&PlayoffSeries> {
        self.series.iter().filter(|s| s.round == round).collect()
    }

    /// `division` of `None` selects the final stage.
    pub fn series_by_round_and_division(
        &self,
        round: u32,
        division: Option<DivisionId>,
    ) -> Vec<&PlayoffSeries> {
        self.series
            .iter()
            .filter(|s| s.round == round && s.division == division)
            .collect()
    }

    pub fn series_of(&self, club_id: ClubId) -> Vec<&PlayoffSeries> {
        self.series.iter().filter(|s| s.involves(club_id)).collect()
    }

    pub fn division_champion(&self, division: DivisionId) -> Option<ClubId> {
        self.division_champions.get(&division).copied()
    }

    pub fn division_champions(&self) -> &BTreeMap<DivisionId, ClubId> {
        &self.division_champions
    }

    /// The single overall champion; `None` while running or when the title is shared.
    pub fn champion(&self) -> Option<ClubId> {
        match self.champions.as_slice() {
            [champion] => Some(*champion),
            _ => None,
        }
    }

    pub fn champions(&self) -> &[ClubId] {
        &self.champions
    }
}

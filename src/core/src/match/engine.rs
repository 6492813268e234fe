use crate::club::{ClubId, Player};
use crate::error::{LeagueError, Result};
use crate::r#match::{GAMES_IN_SET, MatchContext, MatchResult, SetScore, Surface};
use log::debug;
use rand::{Rng, RngExt};

/// Skill points that shift the game-win chance by roughly one logistic unit on a hard court.
const SKILL_SCALE: f32 = 4.0;

const MIN_GAME_CHANCE: f64 = 0.05;
const MAX_GAME_CHANCE: f64 = 0.95;

pub struct MatchSquad<'p> {
    pub club_id: ClubId,
    pub player: &'p Player,
}

impl<'p> MatchSquad<'p> {
    pub fn new(club_id: ClubId, player: &'p Player) -> Self {
        MatchSquad { club_id, player }
    }
}

/// Plays a match game by game. The only source of randomness is the injected `rng`.
#[derive(Debug, Clone, Copy)]
pub struct MatchSimulator {
    sets_to_win: u8,
}

impl MatchSimulator {
    pub fn new(sets_to_win: u8) -> Result<Self> {
        if sets_to_win == 0 {
            return Err(LeagueError::configuration("sets_to_win must be at least 1"));
        }

        Ok(MatchSimulator { sets_to_win })
    }

    pub fn sets_to_win(&self) -> u8 {
        self.sets_to_win
    }

    pub fn simulate<R: Rng + ?Sized>(
        &self,
        home: MatchSquad<'_>,
        away: MatchSquad<'_>,
        surface: Surface,
        rng: &mut R,
    ) -> MatchResult {
        let context = MatchContext {
            home_player_id: home.player.id,
            away_player_id: away.player.id,
            home_skill: home.player.effective_skill(surface),
            away_skill: away.player.effective_skill(surface),
            surface,
        };

        let chance = Self::game_win_chance(context.home_skill, context.away_skill, surface);

        let mut result = MatchResult::new(home.club_id, away.club_id).with_context(context);

        while result.home_sets < self.sets_to_win && result.away_sets < self.sets_to_win {
            result.push_set(Self::play_set(chance, rng));
        }

        result.is_played = true;

        debug!(
            "match {} vs {} on {:?}: {} (home game chance {:.2})",
            home.club_id,
            away.club_id,
            surface,
            result.full_score(),
            chance
        );

        result
    }

    /// Probability that the home player wins any single game.
    pub fn game_win_chance(home_skill: f32, away_skill: f32, surface: Surface) -> f64 {
        let gap = (home_skill - away_skill) / (SKILL_SCALE * surface.volatility());
        let chance = 1.0 / (1.0 + (-gap as f64).exp());

        chance.clamp(MIN_GAME_CHANCE, MAX_GAME_CHANCE)
    }

    fn play_set<R: Rng + ?Sized>(chance: f64, rng: &mut R) -> SetScore {
        let mut set = SetScore::new(0, 0);

        loop {
            if set.home == GAMES_IN_SET && set.away == GAMES_IN_SET {
                // tie-break decides the set 7-6
                if rng.random::<f64>() < chance {
                    set.home += 1;
                } else {
                    set.away += 1;
                }
                return set;
            }

            if rng.random::<f64>() < chance {
                set.home += 1;
            } else {
                set.away += 1;
            }

            let leader = set.home.max(set.away);
            if leader >= GAMES_IN_SET && set.home.abs_diff(set.away) >= 2 {
                return set;
            }
        }
    }
}

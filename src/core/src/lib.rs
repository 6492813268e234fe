pub mod simulator;
pub use simulator::*;

pub mod club;
pub mod config;
pub mod error;
pub mod league;
pub mod r#match;
pub mod playoff;

pub mod utils;

pub use club::{Club, ClubId, ClubRegistry, DivisionId, Player, PlayerBuilder, PlayerId, SurfaceAffinity};
pub use config::{CompetitionConfig, FinalFormat, ScheduleConfig, SeriesConfig};
pub use error::{LeagueError, Result};
pub use league::{
    CompetitionState, League, LeagueResult, LeagueTable, LeagueTableRow, Schedule, ScheduleDay,
    ScheduleGenerator, ScheduledMatchup, StandingsAggregator, StandingsScope,
};
pub use playoff::{BracketGroup, PlayoffBracket, PlayoffSeed, PlayoffSeries, SeriesStatus};
pub use r#match::{MatchContext, MatchResult, MatchSimulator, SetScore, Surface};

pub use utils::*;

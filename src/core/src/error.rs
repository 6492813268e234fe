use crate::club::ClubId;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LeagueError {
    /// Invalid input to the engine: degenerate club set, bad config value,
    /// or a club that has no selected player when its match is due.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A query addressed to a club that did not take part in the referenced match or series.
    #[error("club {club_id} did not take part in {context}")]
    Participant { club_id: ClubId, context: String },

    /// A terminal-only entity was used as if it were still open.
    #[error("invalid state: {0}")]
    State(String),
}

impl LeagueError {
    pub fn configuration(message: impl Into<String>) -> Self {
        LeagueError::Configuration(message.into())
    }

    pub fn participant(club_id: ClubId, context: impl Into<String>) -> Self {
        LeagueError::Participant {
            club_id,
            context: context.into(),
        }
    }

    pub fn state(message: impl Into<String>) -> Self {
        LeagueError::State(message.into())
    }
}

pub type Result<T> = std::result::Result<T, LeagueError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            LeagueError::configuration("need at least 2 clubs").to_string(),
            "configuration error: need at least 2 clubs"
        );
        assert_eq!(
            LeagueError::participant(7, "series 1 vs 2").to_string(),
            "club 7 did not take part in series 1 vs 2"
        );
        assert_eq!(
            LeagueError::state("series is finished").to_string(),
            "invalid state: series is finished"
        );
    }
}

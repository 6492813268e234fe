use league_core::LeagueError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("malformed seed data: {0}")]
    Json(#[from] serde_json::Error),

    #[error("seed data rejected: {0}")]
    Registry(#[from] LeagueError),
}

pub type DatabaseResult<T> = Result<T, DatabaseError>;

mod error;
mod generators;
mod loaders;

pub use error::*;
pub use generators::*;
pub use loaders::*;

use league_core::CompetitionConfig;

/// Embedded seed data standing in for the club registry.
#[derive(Debug, Clone)]
pub struct DatabaseEntity {
    pub clubs: Vec<ClubEntity>,
    pub names: NamesEntity,
    pub config: CompetitionConfig,
}

pub struct DatabaseLoader;

impl DatabaseLoader {
    pub fn load() -> DatabaseResult<DatabaseEntity> {
        Ok(DatabaseEntity {
            clubs: ClubLoader::load()?,
            names: NamesLoader::load()?,
            config: ConfigLoader::load()?,
        })
    }
}

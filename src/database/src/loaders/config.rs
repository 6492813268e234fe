use crate::DatabaseResult;
use league_core::CompetitionConfig;

const STATIC_CONFIG_JSON: &str = include_str!("../../data/config.json");

pub struct ConfigLoader;

impl ConfigLoader {
    pub fn load() -> DatabaseResult<CompetitionConfig> {
        Self::load_from_str(STATIC_CONFIG_JSON)
    }

    /// Missing fields take their defaults; the result is validated.
    pub fn load_from_str(json: &str) -> DatabaseResult<CompetitionConfig> {
        let config: CompetitionConfig = serde_json::from_str(json)?;
        config.validate()?;

        Ok(config)
    }
}

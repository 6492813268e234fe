use crate::DatabaseResult;
use serde::Deserialize;

const STATIC_NAMES_JSON: &str = include_str!("../../data/names.json");

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NamesEntity {
    pub first_names: Vec<String>,
    pub last_names: Vec<String>,
}

pub struct NamesLoader;

impl NamesLoader {
    pub fn load() -> DatabaseResult<NamesEntity> {
        Ok(serde_json::from_str(STATIC_NAMES_JSON)?)
    }
}

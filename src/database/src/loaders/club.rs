use crate::DatabaseResult;
use league_core::{ClubId, DivisionId, Surface};
use serde::Deserialize;

const STATIC_CLUBS_JSON: &str = include_str!("../../data/clubs.json");

#[derive(Debug, Clone, Deserialize)]
pub struct ClubEntity {
    pub id: ClubId,
    pub name: String,
    pub division: DivisionId,
    pub surface: Surface,
    /// 0..=10000, drives the skill range of generated players.
    pub reputation: u16,
    pub players: u8,
}

pub struct ClubLoader;

impl ClubLoader {
    pub fn load() -> DatabaseResult<Vec<ClubEntity>> {
        Self::load_from_str(STATIC_CLUBS_JSON)
    }

    pub fn load_from_str(json: &str) -> DatabaseResult<Vec<ClubEntity>> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_clubs_parse() {
        let clubs = ClubLoader::load().unwrap();
        assert_eq!(clubs.len(), 8);
        assert!(clubs.iter().all(|c| c.players > 0));
    }

    #[test]
    fn test_unknown_surface_is_rejected() {
        let json = r#"[{ "id": 1, "name": "A", "division": 1, "surface": "Sand", "reputation": 1, "players": 1 }]"#;
        assert!(ClubLoader::load_from_str(json).is_err());
    }
}

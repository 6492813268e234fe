use crate::club::PlayerId;
use crate::r#match::Surface;
use serde::{Deserialize, Serialize};

pub type ClubId = u32;
pub type DivisionId = u8;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Club {
    pub id: ClubId,
    pub name: String,
    pub division: DivisionId,
    pub surface: Surface,
    pub players: Vec<PlayerId>,
}

impl Club {
    pub fn new(id: ClubId, name: String, division: DivisionId, surface: Surface) -> Self {
        Club {
            id,
            name,
            division,
            surface,
            players: Vec::new(),
        }
    }

    pub fn has_player(&self, player_id: PlayerId) -> bool {
        self.players.contains(&player_id)
    }
}

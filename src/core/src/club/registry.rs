use crate::club::{Club, ClubId, DivisionId, Player, PlayerId};
use crate::error::{LeagueError, Result};
use crate::r#match::Surface;
use log::debug;
use std::collections::{BTreeMap, HashMap};

/// Club and player data the engine reads from, and the single owner of
/// each club's currently selected player.
#[derive(Debug, Default, Clone)]
pub struct ClubRegistry {
    clubs: Vec<Club>,
    players: HashMap<PlayerId, Player>,
    selected: HashMap<ClubId, PlayerId>,
}

impl ClubRegistry {
    pub fn new() -> Self {
        ClubRegistry::default()
    }

    pub fn add_club(&mut self, club: Club) -> Result<()> {
        if self.club(club.id).is_some() {
            return Err(LeagueError::configuration(format!(
                "club {} is registered twice",
                club.id
            )));
        }

        for player_id in &club.players {
            if !self.players.contains_key(player_id) {
                return Err(LeagueError::configuration(format!(
                    "club {} lists unknown player {}",
                    club.id, player_id
                )));
            }
        }

        self.clubs.push(club);
        Ok(())
    }

    pub fn add_player(&mut self, club_id: ClubId, player: Player) -> Result<()> {
        if self.players.contains_key(&player.id) {
            return Err(LeagueError::configuration(format!(
                "player {} is registered twice",
                player.id
            )));
        }

        let club = self
            .clubs
            .iter_mut()
            .find(|c| c.id == club_id)
            .ok_or_else(|| LeagueError::configuration(format!("unknown club {club_id}")))?;

        club.players.push(player.id);
        self.players.insert(player.id, player);

        Ok(())
    }

    pub fn clubs(&self) -> &[Club] {
        &self.clubs
    }

    pub fn club(&self, id: ClubId) -> Option<&Club> {
        self.clubs.iter().find(|c| c.id == id)
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(&id)
    }

    pub fn roster(&self, club_id: ClubId) -> Vec<&Player> {
        self.club(club_id)
            .map(|club| club.players.iter().filter_map(|id| self.players.get(id)).collect())
            .unwrap_or_default()
    }

    /// Club ids grouped by division, in registration order.
    pub fn divisions(&self) -> BTreeMap<DivisionId, Vec<ClubId>> {
        let mut divisions: BTreeMap<DivisionId, Vec<ClubId>> = BTreeMap::new();

        for club in &self.clubs {
            divisions.entry(club.division).or_default().push(club.id);
        }

        divisions
    }

    pub fn division_of(&self, club_id: ClubId) -> Option<DivisionId> {
        self.club(club_id).map(|c| c.division)
    }

    pub fn home_surface(&self, club_id: ClubId) -> Result<Surface> {
        self.club(club_id)
            .map(|c| c.surface)
            .ok_or_else(|| LeagueError::configuration(format!("unknown club {club_id}")))
    }

    pub fn select_player(&mut self, club_id: ClubId, player_id: PlayerId) -> Result<()> {
        let club = self
            .club(club_id)
            .ok_or_else(|| LeagueError::configuration(format!("unknown club {club_id}")))?;

        if !club.has_player(player_id) {
            return Err(LeagueError::configuration(format!(
                "player {player_id} is not on the roster of club {club_id}"
            )));
        }

        self.selected.insert(club_id, player_id);
        Ok(())
    }

    pub fn clear_selection(&mut self, club_id: ClubId) {
        self.selected.remove(&club_id);
    }

    pub fn selected_player(&self, club_id: ClubId) -> Result<&Player> {
        self.selected
            .get(&club_id)
            .and_then(|id| self.players.get(id))
            .ok_or_else(|| {
                LeagueError::configuration(format!("club {club_id} has no selected player"))
            })
    }

    /// Selects the strongest roster player for every club without a selection.
    /// Returns how many clubs received a new selection.
    pub fn auto_select(&mut self) -> usize {
        let mut selections = Vec::new();

        for club in &self.clubs {
            if self.selected.contains_key(&club.id) {
                continue;
            }

            let best = club
                .players
                .iter()
                .filter_map(|id| self.players.get(id))
                .max_by(|a, b| a.skill.total_cmp(&b.skill).then(b.id.cmp(&a.id)));

            if let Some(player) = best {
                selections.push((club.id, player.id));
            }
        }

        for (club_id, player_id) in &selections {
            debug!("club {} auto-selected player {}", club_id, player_id);
            self.selected.insert(*club_id, *player_id);
        }

        selections.len()
    }
}

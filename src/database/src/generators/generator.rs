use crate::generators::PlayerGenerator;
use crate::{DatabaseEntity, DatabaseResult};
use league_core::{Club, ClubRegistry};
use log::info;
use rand::Rng;

pub struct DatabaseGenerator;

impl DatabaseGenerator {
    /// Builds a registry with generated rosters; every club gets its best
    /// player selected.
    pub fn generate<R: Rng + ?Sized>(data: &DatabaseEntity, rng: &mut R) -> DatabaseResult<ClubRegistry> {
        let mut player_generator = PlayerGenerator::with_names(&data.names);
        let mut registry = ClubRegistry::new();

        for club in &data.clubs {
            registry.add_club(Club::new(
                club.id,
                club.name.clone(),
                club.division,
                club.surface,
            ))?;

            for _ in 0..club.players {
                let player = player_generator.generate(club.reputation, rng)?;
                registry.add_player(club.id, player)?;
            }
        }

        let selected = registry.auto_select();

        info!(
            "generated {} clubs, {} selected players",
            registry.clubs().len(),
            selected
        );

        Ok(registry)
    }
}

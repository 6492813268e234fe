use crate::{DatabaseResult, NamesEntity};
use league_core::club::SKILL_MAX_VALUE;
use league_core::{Player, PlayerId, SurfaceAffinity};
use rand::{Rng, RngExt};

const MAX_REPUTATION: f32 = 10000.0;
const AFFINITY_SPREAD: f32 = 1.5;

pub struct PlayerGenerator {
    first_names: Vec<String>,
    last_names: Vec<String>,
    next_id: PlayerId,
}

impl PlayerGenerator {
    pub fn with_names(names: &NamesEntity) -> Self {
        PlayerGenerator {
            first_names: names.first_names.clone(),
            last_names: names.last_names.clone(),
            next_id: 1,
        }
    }

    /// Better reputation lifts the skill band; a 10000 club draws from 12..20.
    pub fn generate<R: Rng + ?Sized>(&mut self, reputation: u16, rng: &mut R) -> DatabaseResult<Player> {
        let rep_factor = (reputation as f32 / MAX_REPUTATION).clamp(0.0, 1.0);

        let skill_min = 4.0 + rep_factor * 8.0;
        let skill_max = (skill_min + 8.0).min(SKILL_MAX_VALUE);

        let id = self.next_id;
        self.next_id += 1;

        let player = Player::builder()
            .id(id)
            .name(format!(
                "{} {}",
                Self::pick(&self.first_names, rng),
                Self::pick(&self.last_names, rng)
            ))
            .skill(rng.random_range(skill_min..=skill_max))
            .affinity(Self::generate_affinity(rng))
            .build()?;

        Ok(player)
    }

    fn generate_affinity<R: Rng + ?Sized>(rng: &mut R) -> SurfaceAffinity {
        SurfaceAffinity {
            hard: rng.random_range(-AFFINITY_SPREAD..=AFFINITY_SPREAD),
            clay: rng.random_range(-AFFINITY_SPREAD..=AFFINITY_SPREAD),
            grass: rng.random_range(-AFFINITY_SPREAD..=AFFINITY_SPREAD),
            carpet: rng.random_range(-AFFINITY_SPREAD..=AFFINITY_SPREAD),
        }
    }

    fn pick<'n, R: Rng + ?Sized>(names: &'n [String], rng: &mut R) -> &'n str {
        if names.is_empty() {
            return "Unknown";
        }

        &names[rng.random_range(0..names.len())]
    }
}

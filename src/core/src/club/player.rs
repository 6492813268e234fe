use crate::error::{LeagueError, Result};
use crate::r#match::Surface;
use serde::{Deserialize, Serialize};

pub type PlayerId = u32;

pub const SKILL_MAX_VALUE: f32 = 20.0;

/// Additive skill modifiers per court surface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SurfaceAffinity {
    pub hard: f32,
    pub clay: f32,
    pub grass: f32,
    pub carpet: f32,
}

impl SurfaceAffinity {
    pub fn for_surface(&self, surface: Surface) -> f32 {
        match surface {
            Surface::Hard => self.hard,
            Surface::Clay => self.clay,
            Surface::Grass => self.grass,
            Surface::Carpet => self.carpet,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub skill: f32,
    pub affinity: SurfaceAffinity,
}

impl Player {
    pub fn builder() -> PlayerBuilder {
        PlayerBuilder::default()
    }

    /// Skill adjusted by the player's affinity for `surface`, never below zero.
    pub fn effective_skill(&self, surface: Surface) -> f32 {
        (self.skill + self.affinity.for_surface(surface)).max(0.0)
    }
}

#[derive(Debug, Default)]
pub struct PlayerBuilder {
    id: Option<PlayerId>,
    name: Option<String>,
    skill: Option<f32>,
    affinity: SurfaceAffinity,
}

impl PlayerBuilder {
    pub fn id(mut self, id: PlayerId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn skill(mut self, skill: f32) -> Self {
        self.skill = Some(skill);
        self
    }

    pub fn affinity(mut self, affinity: SurfaceAffinity) -> Self {
        self.affinity = affinity;
        self
    }

    pub fn build(self) -> Result<Player> {
        let id = self
            .id
            .ok_or_else(|| LeagueError::configuration("player id is required"))?;

        let skill = self
            .skill
            .ok_or_else(|| LeagueError::configuration(format!("player {id} has no skill")))?;

        if !skill.is_finite() || !(0.0..=SKILL_MAX_VALUE).contains(&skill) {
            return Err(LeagueError::configuration(format!(
                "player {id} skill {skill} is outside 0..={SKILL_MAX_VALUE}"
            )));
        }

        Ok(Player {
            id,
            name: self.name.unwrap_or_else(|| format!("Player {id}")),
            skill,
            affinity: self.affinity,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_requires_skill_in_range() {
        assert!(Player::builder().id(1).skill(12.0).build().is_ok());
        assert!(Player::builder().id(1).skill(-1.0).build().is_err());
        assert!(Player::builder().id(1).skill(f32::NAN).build().is_err());
        assert!(Player::builder().id(1).build().is_err());
        assert!(Player::builder().skill(10.0).build().is_err());
    }

    #[test]
    fn test_effective_skill_applies_affinity() {
        let player = Player::builder()
            .id(3)
            .name("Clay Specialist")
            .skill(10.0)
            .affinity(SurfaceAffinity {
                clay: 2.5,
                grass: -12.0,
                ..Default::default()
            })
            .build()
            .unwrap();

        assert_eq!(player.effective_skill(Surface::Clay), 12.5);
        assert_eq!(player.effective_skill(Surface::Hard), 10.0);
        assert_eq!(player.effective_skill(Surface::Grass), 0.0);
    }
}

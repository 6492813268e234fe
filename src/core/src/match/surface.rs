use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Surface {
    Hard,
    Clay,
    Grass,
    Carpet,
}

impl Surface {
    pub const ALL: [Surface; 4] = [Surface::Hard, Surface::Clay, Surface::Grass, Surface::Carpet];

    /// Spread applied to the skill gap. Slow courts reward the better player,
    /// fast courts let serves decide games and flatten the gap.
    pub fn volatility(&self) -> f32 {
        match self {
            Surface::Clay => 0.8,
            Surface::Hard => 1.0,
            Surface::Carpet => 1.15,
            Surface::Grass => 1.3,
        }
    }
}

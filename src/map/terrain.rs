//! Terrain types and their effects on movement and fire

use serde::{Deserialize, Serialize};

/// Primary terrain type for a map hex
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Terrain {
    #[default]
    Clear,
    LightWoods,
    HeavyWoods,
    Rough,
    Water,
}

impl Terrain {
    /// Movement points spent to enter a hex of this terrain
    pub fn movement_cost(&self) -> u32 {
        match self {
            Terrain::Clear => 1,
            Terrain::LightWoods => 2,
            Terrain::HeavyWoods => 3,
            Terrain::Rough => 2,
            Terrain::Water => 2,
        }
    }

    /// Woods value used for line of sight and to-hit modifiers
    pub fn woods_value(&self) -> i32 {
        match self {
            Terrain::LightWoods => 1,
            Terrain::HeavyWoods => 2,
            _ => 0,
        }
    }
}

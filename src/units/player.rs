//! Players and their rosters

use serde::{Deserialize, Serialize};

use crate::core::types::{PlayerId, UnitId};
use crate::units::unit::Unit;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    #[serde(default)]
    pub id: PlayerId,
    pub name: String,
    #[serde(default)]
    pub units: Vec<Unit>,
}

impl Player {
    pub fn new(name: &str) -> Self {
        Self {
            id: PlayerId::new(),
            name: name.to_string(),
            units: Vec::new(),
        }
    }

    /// Add a unit, taking ownership of it
    pub fn add_unit(&mut self, mut unit: Unit) -> UnitId {
        unit.owner = self.id;
        let id = unit.id;
        self.units.push(unit);
        id
    }

    pub fn alive_units(&self) -> impl Iterator<Item = &Unit> {
        self.units.iter().filter(|u| u.is_alive())
    }

    pub fn unit(&self, id: UnitId) -> Option<&Unit> {
        self.units.iter().find(|u| u.id == id)
    }

    pub fn unit_mut(&mut self, id: UnitId) -> Option<&mut Unit> {
        self.units.iter_mut().find(|u| u.id == id)
    }
}

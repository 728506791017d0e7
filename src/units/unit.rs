//! Read-only view of a combat unit
//!
//! The rules engine owns unit state; the bots only look at positions,
//! movement allowances, weapons, heat and status flags.

use serde::{Deserialize, Serialize};

use crate::core::types::{PlayerId, UnitId};
use crate::map::hex::HexPosition;
use crate::map::path::{MovementPath, MovementType};
use crate::units::weapons::{Weapon, WeaponRef};

/// Heat carried and shed per turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeatState {
    pub current: i32,
    pub dissipation: i32,
}

impl Default for HeatState {
    fn default() -> Self {
        Self {
            current: 0,
            dissipation: 10,
        }
    }
}

/// Status flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UnitStatus {
    pub destroyed: bool,
    pub immobile: bool,
    pub shutdown: bool,
    pub pilot_conscious: bool,
}

impl Default for UnitStatus {
    fn default() -> Self {
        Self {
            destroyed: false,
            immobile: false,
            shutdown: false,
            pilot_conscious: true,
        }
    }
}

/// A combat unit on (or waiting to enter) the map
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Unit {
    #[serde(default)]
    pub id: UnitId,
    pub name: String,
    #[serde(default)]
    pub owner: PlayerId,
    #[serde(default = "default_gunnery")]
    pub gunnery: i32,
    #[serde(default = "default_piloting")]
    pub piloting: i32,
    pub walk_mp: u32,
    #[serde(default)]
    pub jump_mp: u32,
    #[serde(default = "default_true")]
    pub can_rotate_torso: bool,

    // Turn state
    #[serde(default)]
    pub position: Option<HexPosition>,
    #[serde(default)]
    pub movement_taken: Option<MovementPath>,
    #[serde(default)]
    pub has_declared_attack: bool,

    #[serde(default)]
    pub weapons: Vec<Weapon>,
    #[serde(default)]
    pub heat: HeatState,
    #[serde(default)]
    pub status: UnitStatus,
}

fn default_gunnery() -> i32 {
    4
}

fn default_piloting() -> i32 {
    5
}

fn default_true() -> bool {
    true
}

impl Unit {
    pub fn new(name: &str, owner: PlayerId) -> Self {
        Self {
            id: UnitId::new(),
            name: name.to_string(),
            owner,
            gunnery: default_gunnery(),
            piloting: default_piloting(),
            walk_mp: 4,
            jump_mp: 0,
            can_rotate_torso: true,
            position: None,
            movement_taken: None,
            has_declared_attack: false,
            weapons: Vec::new(),
            heat: HeatState::default(),
            status: UnitStatus::default(),
        }
    }

    pub fn with_movement(mut self, walk_mp: u32, jump_mp: u32) -> Self {
        self.walk_mp = walk_mp;
        self.jump_mp = jump_mp;
        self
    }

    pub fn with_weapon(mut self, weapon: Weapon) -> Self {
        self.weapons.push(weapon);
        self
    }

    pub fn with_gunnery(mut self, gunnery: i32) -> Self {
        self.gunnery = gunnery;
        self
    }

    pub fn with_heat(mut self, current: i32, dissipation: i32) -> Self {
        self.heat = HeatState {
            current,
            dissipation,
        };
        self
    }

    pub fn deployed_at(mut self, position: HexPosition) -> Self {
        self.position = Some(position);
        self
    }

    pub fn is_alive(&self) -> bool {
        !self.status.destroyed
    }

    pub fn is_deployed(&self) -> bool {
        self.position.is_some()
    }

    pub fn has_moved(&self) -> bool {
        self.movement_taken.is_some()
    }

    pub fn run_mp(&self) -> u32 {
        // 1.5x walking, rounded up
        (self.walk_mp * 3 + 1) / 2
    }

    pub fn movement_points(&self, movement_type: MovementType) -> u32 {
        match movement_type {
            MovementType::StandingStill => 0,
            MovementType::Walk => self.walk_mp,
            MovementType::Run => self.run_mp(),
            MovementType::Jump => self.jump_mp,
        }
    }

    /// Movement type committed this turn, standing still if none yet
    pub fn current_movement_type(&self) -> MovementType {
        self.movement_taken
            .as_ref()
            .map(|p| p.movement_type)
            .unwrap_or_default()
    }

    /// Hexes entered by the committed move, zero before moving
    pub fn hexes_moved(&self) -> u32 {
        self.movement_taken.as_ref().map_or(0, |p| p.hexes_moved())
    }

    /// The committed path, or a standing-still path at the current position
    pub fn current_path(&self) -> Option<MovementPath> {
        match (&self.movement_taken, self.position) {
            (Some(path), _) => Some(path.clone()),
            (None, Some(position)) => Some(MovementPath::standing_still(position)),
            (None, None) => None,
        }
    }

    pub fn available_weapons(&self) -> impl Iterator<Item = &Weapon> {
        self.weapons.iter().filter(|w| w.is_available())
    }

    pub fn weapon(&self, reference: &WeaponRef) -> Option<&Weapon> {
        self.weapons.iter().find(|w| w.matches(reference))
    }

    pub fn can_fire_weapons(&self) -> bool {
        self.is_alive()
            && self.is_deployed()
            && !self.status.shutdown
            && self.status.pilot_conscious
            && self.available_weapons().next().is_some()
    }

    pub fn missile_tubes(&self) -> u32 {
        self.available_weapons().map(|w| w.missile_tubes).sum()
    }

    pub fn total_damage(&self) -> u32 {
        self.available_weapons().map(|w| w.damage).sum()
    }

    /// Longest reach of any working weapon
    pub fn max_weapon_range(&self) -> u32 {
        self.available_weapons()
            .map(|w| w.long_range)
            .max()
            .unwrap_or(0)
    }
}

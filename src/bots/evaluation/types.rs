//! Scores produced by the tactical evaluator

use serde::{Deserialize, Serialize};

use crate::combat::configuration::WeaponConfiguration;
use crate::core::types::UnitId;
use crate::map::hex::HexPosition;
use crate::map::path::{MovementPath, MovementType};
use crate::units::unit::Unit;
use crate::units::weapons::Weapon;

/// One weapon's chance against one target under one stance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeaponEvaluationData {
    pub weapon: Weapon,
    pub hit_probability: f32,
    pub configuration: WeaponConfiguration,
}

impl WeaponEvaluationData {
    pub fn expected_damage(&self) -> f32 {
        self.weapon.damage as f32 * self.hit_probability
    }
}

/// Expected damage of every weapon under one stance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigurationScore {
    pub configuration: WeaponConfiguration,
    pub score: f32,
    pub weapons: Vec<WeaponEvaluationData>,
}

/// How attractive one target is from one destination
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetScore {
    pub target_id: UnitId,
    /// Expected damage under the best configuration
    pub score: f32,
    pub viable_weapons: Vec<WeaponEvaluationData>,
    /// Configurations scoring above zero
    pub configuration_scores: Vec<ConfigurationScore>,
    pub configuration: WeaponConfiguration,
}

/// Exposure and opportunity at the end of a path
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PathScore {
    pub defensive_index: f32,
    pub offensive_index: f32,
    pub enemies_in_rear_arc: u32,
}

impl PathScore {
    /// Offence minus exposure; higher is better
    pub fn net(&self) -> f32 {
        self.offensive_index - self.defensive_index
    }
}

/// Identity of a cached target evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TargetEvaluationKey {
    pub unit_id: UnitId,
    pub destination: HexPosition,
    pub movement_type: MovementType,
    pub target_id: UnitId,
    pub target_position: HexPosition,
    /// Target movement feeds its to-hit modifier
    pub target_movement: MovementType,
    pub target_hexes_moved: u32,
}

impl TargetEvaluationKey {
    pub fn new(
        unit: &Unit,
        path: &MovementPath,
        target: &Unit,
        target_position: HexPosition,
    ) -> Self {
        Self {
            unit_id: unit.id,
            destination: path.destination(),
            movement_type: path.movement_type,
            target_id: target.id,
            target_position,
            target_movement: target.current_movement_type(),
            target_hexes_moved: target.hexes_moved(),
        }
    }
}

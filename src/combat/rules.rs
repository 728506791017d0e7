//! Rules figures the bots need but do not own

use crate::map::path::MovementType;

pub trait RulesProvider: Send + Sync {
    /// Heat generated by moving this way
    fn movement_heat(&self, movement_type: MovementType, hexes_moved: u32) -> i32;
}

/// Classic movement heat: walking 1, running 2, jumping at least 3
#[derive(Debug, Clone, Copy, Default)]
pub struct ClassicRules;

impl RulesProvider for ClassicRules {
    fn movement_heat(&self, movement_type: MovementType, hexes_moved: u32) -> i32 {
        match movement_type {
            MovementType::StandingStill => 0,
            MovementType::Walk => 1,
            MovementType::Run => 2,
            MovementType::Jump => (hexes_moved as i32).max(3),
        }
    }
}

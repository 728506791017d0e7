//! To-hit numbers and 2d6 hit probabilities
//!
//! The to-hit calculator belongs to the rules engine; bots only ask it for
//! numbers. `ClassicToHitCalculator` covers the common modifiers so the bots
//! can be run without a full rules implementation.

use crate::map::battle_map::BattleMap;
use crate::map::hex::{FiringArc, HexDirection, HexPosition};
use crate::map::path::MovementType;
use crate::units::weapons::{RangeBracket, Weapon};

/// Target number no 2d6 roll can reach
pub const IMPOSSIBLE_ROLL: i32 = 13;

/// Everything a to-hit calculation needs about one shot
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttackScenario {
    pub attacker_gunnery: i32,
    pub attacker_movement: MovementType,
    pub attacker_position: HexPosition,
    /// Facing of the torso; differs from the unit facing when twisted
    pub torso_facing: HexDirection,
    pub target_position: HexPosition,
    pub target_movement: MovementType,
    pub target_hexes_moved: u32,
}

impl AttackScenario {
    pub fn distance(&self) -> u32 {
        self.attacker_position
            .coordinates
            .distance(&self.target_position.coordinates)
    }
}

pub trait ToHitCalculator: Send + Sync {
    /// Modified 2d6 target number for one weapon
    fn to_hit_number(&self, scenario: &AttackScenario, weapon: &Weapon, map: &dyn BattleMap) -> i32;
}

/// Probability that 2d6 meets or beats `target_number`
pub fn hit_probability(target_number: i32) -> f32 {
    if target_number <= 2 {
        return 1.0;
    }
    if target_number > 12 {
        return 0.0;
    }
    let ways: i32 = (target_number..=12).map(|sum| 6 - (sum - 7).abs()).sum();
    ways as f32 / 36.0
}

/// Gunnery, movement, range and terrain modifiers
#[derive(Debug, Clone, Copy, Default)]
pub struct ClassicToHitCalculator;

impl ClassicToHitCalculator {
    pub fn attacker_movement_modifier(movement: MovementType) -> i32 {
        match movement {
            MovementType::StandingStill => 0,
            MovementType::Walk => 1,
            MovementType::Run => 2,
            MovementType::Jump => 3,
        }
    }

    pub fn target_movement_modifier(hexes_moved: u32, jumped: bool) -> i32 {
        let base = match hexes_moved {
            0..=2 => 0,
            3..=4 => 1,
            5..=6 => 2,
            7..=9 => 3,
            10..=17 => 4,
            _ => 5,
        };
        base + i32::from(jumped)
    }

    pub fn range_modifier(bracket: RangeBracket) -> i32 {
        match bracket {
            RangeBracket::Short => 0,
            RangeBracket::Medium => 2,
            RangeBracket::Long => 4,
            RangeBracket::OutOfRange => IMPOSSIBLE_ROLL,
        }
    }

    fn minimum_range_modifier(weapon: &Weapon, distance: u32) -> i32 {
        if weapon.min_range > 0 && distance <= weapon.min_range {
            (weapon.min_range - distance + 1) as i32
        } else {
            0
        }
    }

    /// Whether the target sits in the arc the weapon points at
    pub fn in_weapon_arc(scenario: &AttackScenario, weapon: &Weapon) -> bool {
        let facing = if weapon.location.rotates_with_torso() {
            scenario.torso_facing
        } else {
            scenario.attacker_position.facing
        };
        let arc = scenario
            .attacker_position
            .with_facing(facing)
            .arc_to(scenario.target_position.coordinates);

        if weapon.rear_mounted {
            arc == FiringArc::Rear
        } else {
            arc == FiringArc::Front
        }
    }
}

impl ToHitCalculator for ClassicToHitCalculator {
    fn to_hit_number(
        &self,
        scenario: &AttackScenario,
        weapon: &Weapon,
        map: &dyn BattleMap,
    ) -> i32 {
        let distance = scenario.distance();
        let bracket = weapon.range_bracket(distance);
        if bracket == RangeBracket::OutOfRange || !Self::in_weapon_arc(scenario, weapon) {
            return IMPOSSIBLE_ROLL;
        }

        let target_jumped = scenario.target_movement == MovementType::Jump;
        scenario.attacker_gunnery
            + Self::attacker_movement_modifier(scenario.attacker_movement)
            + Self::range_modifier(bracket)
            + Self::minimum_range_modifier(weapon, distance)
            + Self::target_movement_modifier(scenario.target_hexes_moved, target_jumped)
            + map.intervening_modifier(
                scenario.attacker_position.coordinates,
                scenario.target_position.coordinates,
            )
    }
}

//! Tactical roles and the movement order they imply

use serde::{Deserialize, Serialize};

use crate::core::config::RoleConfig;
use crate::core::types::PlayerId;
use crate::game::session::ClientGame;
use crate::units::unit::Unit;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitRole {
    /// Indirect-fire platform
    Boat,
    /// Fast and lightly armed
    Scout,
    /// Short-ranged
    Brawler,
    Trooper,
}

impl UnitRole {
    /// First matching role in boat, scout, brawler order
    pub fn classify(unit: &Unit, config: &RoleConfig) -> Self {
        if unit.missile_tubes() >= config.boat_missile_tubes {
            return UnitRole::Boat;
        }
        if unit.walk_mp >= config.scout_min_walk_mp
            && unit.total_damage() <= config.scout_max_damage
        {
            return UnitRole::Scout;
        }
        let mut weapons = unit.available_weapons().peekable();
        if weapons.peek().is_some() && weapons.all(|w| w.long_range <= config.brawler_max_range) {
            return UnitRole::Brawler;
        }
        UnitRole::Trooper
    }
}

/// How urgently `unit` should move next; higher moves first
pub fn movement_priority(
    game: &ClientGame,
    player_id: PlayerId,
    unit: &Unit,
    config: &RoleConfig,
) -> i32 {
    match UnitRole::classify(unit, config) {
        UnitRole::Boat => config.boat_priority,
        UnitRole::Trooper => config.trooper_priority,
        UnitRole::Scout => {
            // Moving late lets a scout react to revealed positions
            if game.has_won_initiative(player_id) {
                config.scout_priority + config.scout_initiative_bonus
            } else {
                config.scout_priority
            }
        }
        UnitRole::Brawler => {
            let enemies_unmoved = game
                .enemy_units(player_id)
                .iter()
                .any(|enemy| !enemy.has_moved());
            if game.has_lost_initiative(player_id) && enemies_unmoved {
                config.brawler_priority - config.brawler_initiative_penalty
            } else {
                config.brawler_priority
            }
        }
    }
}

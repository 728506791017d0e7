//! Outbound commands a player submits to the game
//!
//! Commands are plain data. The rules engine validates and applies them;
//! the bots never see the result directly, only the next game state.

use serde::{Deserialize, Serialize};

use crate::combat::configuration::WeaponConfiguration;
use crate::core::types::{GameId, PlayerId, UnitId};
use crate::map::hex::{HexCoordinates, HexDirection};
use crate::map::path::{MovementType, PathSegment};
use crate::units::weapons::WeaponRef;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeployUnitCommand {
    pub game_id: GameId,
    pub player_id: PlayerId,
    pub unit_id: UnitId,
    pub position: HexCoordinates,
    pub direction: HexDirection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveUnitCommand {
    pub game_id: GameId,
    pub player_id: PlayerId,
    pub unit_id: UnitId,
    pub movement_type: MovementType,
    pub movement_path: Vec<PathSegment>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeaponConfigurationCommand {
    pub game_id: GameId,
    pub player_id: PlayerId,
    pub unit_id: UnitId,
    pub configuration: WeaponConfiguration,
}

/// One weapon assigned to one target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeaponTargetData {
    pub weapon: WeaponRef,
    pub target_id: UnitId,
    pub is_primary_target: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeaponAttackDeclarationCommand {
    pub game_id: GameId,
    pub player_id: PlayerId,
    pub attacker_id: UnitId,
    pub weapon_targets: Vec<WeaponTargetData>,
}

impl WeaponAttackDeclarationCommand {
    /// Declaration that fires nothing; marks the unit as done for the phase
    pub fn empty(game_id: GameId, player_id: PlayerId, attacker_id: UnitId) -> Self {
        Self {
            game_id,
            player_id,
            attacker_id,
            weapon_targets: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShutdownUnitCommand {
    pub game_id: GameId,
    pub player_id: PlayerId,
    pub unit_id: UnitId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StartupUnitCommand {
    pub game_id: GameId,
    pub player_id: PlayerId,
    pub unit_id: UnitId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnEndedCommand {
    pub game_id: GameId,
    pub player_id: PlayerId,
}

/// Everything a client can put on the command bus
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command")]
pub enum ClientCommand {
    DeployUnit(DeployUnitCommand),
    MoveUnit(MoveUnitCommand),
    WeaponConfiguration(WeaponConfigurationCommand),
    WeaponAttackDeclaration(WeaponAttackDeclarationCommand),
    ShutdownUnit(ShutdownUnitCommand),
    StartupUnit(StartupUnitCommand),
    TurnEnded(TurnEndedCommand),
}

impl ClientCommand {
    pub fn name(&self) -> &'static str {
        match self {
            ClientCommand::DeployUnit(_) => "DeployUnit",
            ClientCommand::MoveUnit(_) => "MoveUnit",
            ClientCommand::WeaponConfiguration(_) => "WeaponConfiguration",
            ClientCommand::WeaponAttackDeclaration(_) => "WeaponAttackDeclaration",
            ClientCommand::ShutdownUnit(_) => "ShutdownUnit",
            ClientCommand::StartupUnit(_) => "StartupUnit",
            ClientCommand::TurnEnded(_) => "TurnEnded",
        }
    }

    pub fn player_id(&self) -> PlayerId {
        match self {
            ClientCommand::DeployUnit(c) => c.player_id,
            ClientCommand::MoveUnit(c) => c.player_id,
            ClientCommand::WeaponConfiguration(c) => c.player_id,
            ClientCommand::WeaponAttackDeclaration(c) => c.player_id,
            ClientCommand::ShutdownUnit(c) => c.player_id,
            ClientCommand::StartupUnit(c) => c.player_id,
            ClientCommand::TurnEnded(c) => c.player_id,
        }
    }
}

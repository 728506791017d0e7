//! Deployment: one unit per call onto the first free border hex

use crate::bots::turn_state::TurnState;
use crate::core::error::Result;
use crate::core::types::PlayerId;
use crate::game::commands::DeployUnitCommand;
use crate::game::session::ClientGame;
use crate::map::battle_map::BattleMap;
use crate::map::hex::{HexCoordinates, HexDirection};

#[derive(Debug, Clone, Default)]
pub struct DeploymentEngine;

impl DeploymentEngine {
    pub const NAME: &'static str = "DeploymentEngine";

    pub fn new() -> Self {
        Self
    }

    /// Deploy the next waiting unit; failures are logged, never raised
    pub async fn make_decision(
        &self,
        game: &ClientGame,
        player_id: PlayerId,
        _turn_state: &mut TurnState,
    ) -> Result<()> {
        if let Err(e) = self.deploy_next(game, player_id).await {
            tracing::warn!(player = %player_id, error = %e, "Deployment failed");
        }
        Ok(())
    }

    async fn deploy_next(&self, game: &ClientGame, player_id: PlayerId) -> Result<()> {
        let player = game.player(player_id)?;
        let Some(unit) = player.alive_units().find(|u| !u.is_deployed()) else {
            tracing::debug!(player = %player_id, "Nothing left to deploy");
            return Ok(());
        };
        let Some(map) = game.battle_map() else {
            tracing::debug!(player = %player_id, "No map to deploy on");
            return Ok(());
        };

        let occupied: Vec<HexCoordinates> = game
            .deployed_units()
            .filter_map(|u| u.position.map(|p| p.coordinates))
            .collect();
        let Some(hex) = deployment_area(map)
            .into_iter()
            .find(|hex| !occupied.contains(hex))
        else {
            tracing::debug!(player = %player_id, unit = %unit.id, "Deployment area is full");
            return Ok(());
        };

        let direction = facing_toward_center(map, hex);
        game.deploy_unit(DeployUnitCommand {
            game_id: game.id(),
            player_id,
            unit_id: unit.id,
            position: hex,
            direction,
        })
        .await?;

        tracing::info!(
            player = %player_id,
            unit = %unit.name,
            q = hex.q,
            r = hex.r,
            facing = ?direction,
            "Deployed unit"
        );
        Ok(())
    }
}

/// Border hexes in map scan order
pub fn deployment_area(map: &dyn BattleMap) -> Vec<HexCoordinates> {
    let (width, height) = (map.width(), map.height());
    map.hexes()
        .into_iter()
        .filter(|h| h.q == 1 || h.q == width || h.r == 1 || h.r == height)
        .collect()
}

fn facing_toward_center(map: &dyn BattleMap, hex: HexCoordinates) -> HexDirection {
    let center = HexCoordinates::new((map.width() + 1) / 2, (map.height() + 1) / 2);
    if hex == center {
        HexDirection::Top
    } else {
        HexDirection::closest_to_bearing(hex.bearing_to(&center))
    }
}

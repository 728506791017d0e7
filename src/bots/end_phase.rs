//! End phase: heat housekeeping, then end the turn

use crate::bots::turn_state::TurnState;
use crate::core::config::{BotConfig, HeatConfig};
use crate::core::error::Result;
use crate::core::types::PlayerId;
use crate::game::commands::{ShutdownUnitCommand, StartupUnitCommand, TurnEndedCommand};
use crate::game::session::ClientGame;
use crate::units::unit::Unit;

/// Heat action for one unit at the end of a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeatAction {
    Startup,
    Shutdown,
}

#[derive(Debug, Clone, Default)]
pub struct EndPhaseEngine {
    config: HeatConfig,
}

impl EndPhaseEngine {
    pub const NAME: &'static str = "EndPhaseEngine";

    pub fn new(config: &BotConfig) -> Self {
        Self {
            config: config.heat.clone(),
        }
    }

    /// Always finishes with a turn-ended command; per-unit failures are logged
    pub async fn make_decision(
        &self,
        game: &ClientGame,
        player_id: PlayerId,
        _turn_state: &mut TurnState,
    ) -> Result<()> {
        match game.alive_units(player_id) {
            Ok(units) => {
                for unit in units {
                    if let Err(e) = self.manage_heat(game, player_id, unit).await {
                        tracing::warn!(unit = %unit.id, error = %e, "Heat management failed");
                    }
                }
            }
            Err(e) => tracing::warn!(player = %player_id, error = %e, "Could not read roster"),
        }

        tracing::info!(player = %player_id, turn = game.turn(), "Ending turn");
        game.end_turn(TurnEndedCommand {
            game_id: game.id(),
            player_id,
        })
        .await
    }

    /// Restart anything shut down with a conscious pilot, shut down anything overheating
    pub fn heat_action(&self, unit: &Unit) -> Option<HeatAction> {
        if unit.status.shutdown {
            unit.status.pilot_conscious.then_some(HeatAction::Startup)
        } else if unit.heat.current > self.config.overheat_threshold {
            Some(HeatAction::Shutdown)
        } else {
            None
        }
    }

    async fn manage_heat(&self, game: &ClientGame, player_id: PlayerId, unit: &Unit) -> Result<()> {
        match self.heat_action(unit) {
            Some(HeatAction::Startup) => {
                tracing::info!(unit = %unit.name, "Starting up unit");
                game.startup_unit(StartupUnitCommand {
                    game_id: game.id(),
                    player_id,
                    unit_id: unit.id,
                })
                .await
            }
            Some(HeatAction::Shutdown) => {
                tracing::info!(
                    unit = %unit.name,
                    heat = unit.heat.current,
                    "Shutting down overheated unit"
                );
                game.shutdown_unit(ShutdownUnitCommand {
                    game_id: game.id(),
                    player_id,
                    unit_id: unit.id,
                })
                .await
            }
            None => Ok(()),
        }
    }
}

//! Computer players
//!
//! A `Bot` owns one player's decision engines and turn cache. The hosting
//! game calls `on_phase` whenever the bot is expected to act; each call
//! publishes at least one command through the game session.

pub mod deployment;
pub mod end_phase;
pub mod evaluation;
pub mod movement;
pub mod provider;
pub mod roles;
pub mod turn_state;
pub mod weapons;

pub use deployment::DeploymentEngine;
pub use end_phase::{EndPhaseEngine, HeatAction};
pub use evaluation::{PathScore, TacticalEvaluator, TargetScore};
pub use movement::MovementEngine;
pub use provider::{DecisionEngine, DecisionEngineProvider};
pub use roles::UnitRole;
pub use turn_state::TurnState;
pub use weapons::{FireSelection, WeaponsEngine};

use crate::core::config::BotConfig;
use crate::core::error::Result;
use crate::core::types::PlayerId;
use crate::game::session::ClientGame;

/// Turn controller for one computer-controlled player
#[derive(Debug)]
pub struct Bot {
    player_id: PlayerId,
    provider: DecisionEngineProvider,
    turn_state: TurnState,
}

impl Bot {
    pub fn new(player_id: PlayerId, config: &BotConfig) -> Self {
        Self {
            player_id,
            provider: DecisionEngineProvider::new(config),
            turn_state: TurnState::new(),
        }
    }

    pub fn player_id(&self) -> PlayerId {
        self.player_id
    }

    pub fn turn_state(&self) -> &TurnState {
        &self.turn_state
    }

    /// Act in the game's current phase
    ///
    /// Returns false when the phase needs no decision from a bot.
    pub async fn on_phase(&mut self, game: &ClientGame) -> Result<bool> {
        if !self.turn_state.is_bound_to(game.id(), game.turn()) {
            tracing::debug!(
                player = %self.player_id,
                turn = game.turn(),
                "New turn, clearing evaluation cache"
            );
            self.turn_state.reset(game.id(), game.turn());
        }

        let Some(engine) = self.provider.engine_for(game.phase()) else {
            return Ok(false);
        };
        tracing::debug!(player = %self.player_id, engine = engine.name(), "Making decision");
        engine
            .make_decision(game, self.player_id, &mut self.turn_state)
            .await?;
        Ok(true)
    }
}

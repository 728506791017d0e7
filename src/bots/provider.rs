//! Phase to engine dispatch

use crate::bots::deployment::DeploymentEngine;
use crate::bots::end_phase::EndPhaseEngine;
use crate::bots::movement::MovementEngine;
use crate::bots::turn_state::TurnState;
use crate::bots::weapons::WeaponsEngine;
use crate::core::config::BotConfig;
use crate::core::error::Result;
use crate::core::types::PlayerId;
use crate::game::phase::PhaseName;
use crate::game::session::ClientGame;

#[derive(Debug, Clone)]
pub enum DecisionEngine {
    Deployment(DeploymentEngine),
    Movement(MovementEngine),
    WeaponsAttack(WeaponsEngine),
    End(EndPhaseEngine),
}

impl DecisionEngine {
    pub fn name(&self) -> &'static str {
        match self {
            DecisionEngine::Deployment(_) => DeploymentEngine::NAME,
            DecisionEngine::Movement(_) => MovementEngine::NAME,
            DecisionEngine::WeaponsAttack(_) => WeaponsEngine::NAME,
            DecisionEngine::End(_) => EndPhaseEngine::NAME,
        }
    }

    pub async fn make_decision(
        &self,
        game: &ClientGame,
        player_id: PlayerId,
        turn_state: &mut TurnState,
    ) -> Result<()> {
        match self {
            DecisionEngine::Deployment(engine) => {
                engine.make_decision(game, player_id, turn_state).await
            }
            DecisionEngine::Movement(engine) => {
                engine.make_decision(game, player_id, turn_state).await
            }
            DecisionEngine::WeaponsAttack(engine) => {
                engine.make_decision(game, player_id, turn_state).await
            }
            DecisionEngine::End(engine) => engine.make_decision(game, player_id, turn_state).await,
        }
    }
}

/// One engine per phase the bot acts in
#[derive(Debug, Clone)]
pub struct DecisionEngineProvider {
    deployment: DecisionEngine,
    movement: DecisionEngine,
    weapons_attack: DecisionEngine,
    end: DecisionEngine,
}

impl DecisionEngineProvider {
    pub fn new(config: &BotConfig) -> Self {
        Self {
            deployment: DecisionEngine::Deployment(DeploymentEngine::new()),
            movement: DecisionEngine::Movement(MovementEngine::new(config)),
            weapons_attack: DecisionEngine::WeaponsAttack(WeaponsEngine::new(config)),
            end: DecisionEngine::End(EndPhaseEngine::new(config)),
        }
    }

    /// Engine for a phase, None where the bot has nothing to decide
    pub fn engine_for(&self, phase: PhaseName) -> Option<&DecisionEngine> {
        match phase {
            PhaseName::Deployment => Some(&self.deployment),
            PhaseName::Movement => Some(&self.movement),
            PhaseName::WeaponsAttack => Some(&self.weapons_attack),
            PhaseName::End => Some(&self.end),
            PhaseName::Start
            | PhaseName::Initiative
            | PhaseName::PhysicalAttack
            | PhaseName::Heat => None,
        }
    }
}

impl Default for DecisionEngineProvider {
    fn default() -> Self {
        Self::new(&BotConfig::default())
    }
}

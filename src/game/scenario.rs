//! JSON scenario files: a board snapshot a bot can be asked to act on

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::{BotError, Result};
use crate::core::types::Turn;
use crate::game::phase::PhaseName;
use crate::game::session::{ClientGame, CommandPublisher};
use crate::map::battle_map::MapDefinition;
use crate::units::player::Player;

fn default_turn() -> Turn {
    1
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default = "default_turn")]
    pub turn: Turn,
    pub phase: PhaseName,
    #[serde(default)]
    pub map: Option<MapDefinition>,
    pub players: Vec<Player>,
    /// Player indices from lowest to highest initiative
    #[serde(default)]
    pub initiative: Vec<usize>,
}

impl Scenario {
    pub fn from_json(contents: &str) -> Result<Self> {
        Ok(serde_json::from_str(contents)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    pub fn into_game(self, publisher: CommandPublisher) -> Result<ClientGame> {
        let initiative = self
            .initiative
            .iter()
            .map(|&index| {
                self.players.get(index).map(|p| p.id).ok_or_else(|| {
                    BotError::InvalidScenario(format!(
                        "initiative refers to missing player {}",
                        index
                    ))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let mut players = self.players;
        for player in &mut players {
            let owner = player.id;
            for unit in &mut player.units {
                unit.owner = owner;
            }
        }

        let mut game = ClientGame::new(players, publisher)
            .with_turn(self.turn)
            .with_phase(self.phase)
            .with_initiative_order(initiative);
        if let Some(map) = self.map {
            if map.width < 1 || map.height < 1 {
                return Err(BotError::InvalidScenario(format!(
                    "map must be at least 1x1, got {}x{}",
                    map.width, map.height
                )));
            }
            game = game.with_battle_map(map.build());
        }
        Ok(game)
    }
}

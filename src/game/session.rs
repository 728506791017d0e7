//! Client-side view of one game session
//!
//! `ClientGame` is what a bot sees: the rosters, the map and the rules
//! collaborators, read through plain accessors. Commands leave through the
//! session's `CommandPublisher`; nothing here mutates game state in response.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::combat::rules::{ClassicRules, RulesProvider};
use crate::combat::to_hit::{ClassicToHitCalculator, ToHitCalculator};
use crate::core::error::{BotError, Result};
use crate::core::types::{GameId, PlayerId, Turn};
use crate::game::commands::{
    ClientCommand, DeployUnitCommand, MoveUnitCommand, ShutdownUnitCommand, StartupUnitCommand,
    TurnEndedCommand, WeaponAttackDeclarationCommand, WeaponConfigurationCommand,
};
use crate::game::phase::PhaseName;
use crate::map::battle_map::BattleMap;
use crate::units::player::Player;
use crate::units::unit::Unit;

/// Sending half of the command bus
#[derive(Debug, Clone)]
pub struct CommandPublisher {
    sender: mpsc::Sender<ClientCommand>,
}

impl CommandPublisher {
    /// Bounded command channel; the receiver belongs to whoever applies commands
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<ClientCommand>) {
        let (sender, receiver) = mpsc::channel(capacity);
        (Self { sender }, receiver)
    }

    pub async fn publish(&self, command: ClientCommand) -> Result<()> {
        tracing::debug!(
            command = command.name(),
            player = %command.player_id(),
            "Publishing command"
        );
        self.sender
            .send(command)
            .await
            .map_err(|e| BotError::CommandChannelClosed(e.to_string()))
    }
}

pub struct ClientGame {
    id: GameId,
    turn: Turn,
    phase: PhaseName,
    players: Vec<Player>,
    /// Players from lowest to highest initiative; lower moves first
    initiative_order: Vec<PlayerId>,
    battle_map: Option<Arc<dyn BattleMap>>,
    to_hit: Arc<dyn ToHitCalculator>,
    rules: Arc<dyn RulesProvider>,
    publisher: CommandPublisher,
}

impl ClientGame {
    pub fn new(players: Vec<Player>, publisher: CommandPublisher) -> Self {
        Self {
            id: GameId::new(),
            turn: 1,
            phase: PhaseName::Start,
            players,
            initiative_order: Vec::new(),
            battle_map: None,
            to_hit: Arc::new(ClassicToHitCalculator),
            rules: Arc::new(ClassicRules),
            publisher,
        }
    }

    pub fn with_id(mut self, id: GameId) -> Self {
        self.id = id;
        self
    }

    pub fn with_battle_map(mut self, map: impl BattleMap + 'static) -> Self {
        self.battle_map = Some(Arc::new(map));
        self
    }

    pub fn with_shared_map(mut self, map: Arc<dyn BattleMap>) -> Self {
        self.battle_map = Some(map);
        self
    }

    pub fn with_to_hit_calculator(mut self, calculator: Arc<dyn ToHitCalculator>) -> Self {
        self.to_hit = calculator;
        self
    }

    pub fn with_rules(mut self, rules: Arc<dyn RulesProvider>) -> Self {
        self.rules = rules;
        self
    }

    pub fn with_turn(mut self, turn: Turn) -> Self {
        self.turn = turn;
        self
    }

    pub fn with_phase(mut self, phase: PhaseName) -> Self {
        self.phase = phase;
        self
    }

    pub fn with_initiative_order(mut self, order: Vec<PlayerId>) -> Self {
        self.initiative_order = order;
        self
    }

    pub fn id(&self) -> GameId {
        self.id
    }

    pub fn turn(&self) -> Turn {
        self.turn
    }

    pub fn phase(&self) -> PhaseName {
        self.phase
    }

    pub fn set_turn(&mut self, turn: Turn) {
        self.turn = turn;
    }

    pub fn set_phase(&mut self, phase: PhaseName) {
        self.phase = phase;
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn battle_map(&self) -> Option<&dyn BattleMap> {
        self.battle_map.as_deref()
    }

    pub fn to_hit_calculator(&self) -> &dyn ToHitCalculator {
        self.to_hit.as_ref()
    }

    pub fn rules(&self) -> &dyn RulesProvider {
        self.rules.as_ref()
    }

    pub fn player(&self, player_id: PlayerId) -> Result<&Player> {
        self.players
            .iter()
            .find(|p| p.id == player_id)
            .ok_or(BotError::PlayerNotFound(player_id))
    }

    pub fn player_mut(&mut self, player_id: PlayerId) -> Result<&mut Player> {
        self.players
            .iter_mut()
            .find(|p| p.id == player_id)
            .ok_or(BotError::PlayerNotFound(player_id))
    }

    pub fn alive_units(&self, player_id: PlayerId) -> Result<Vec<&Unit>> {
        Ok(self.player(player_id)?.alive_units().collect())
    }

    /// Alive, deployed units belonging to anyone else
    pub fn enemy_units(&self, player_id: PlayerId) -> Vec<&Unit> {
        self.players
            .iter()
            .filter(|p| p.id != player_id)
            .flat_map(|p| p.alive_units())
            .filter(|u| u.is_deployed())
            .collect()
    }

    /// Every unit on the board, friend or foe
    pub fn deployed_units(&self) -> impl Iterator<Item = &Unit> {
        self.players
            .iter()
            .flat_map(|p| p.alive_units())
            .filter(|u| u.is_deployed())
    }

    /// Moves after every other player this turn
    pub fn has_won_initiative(&self, player_id: PlayerId) -> bool {
        self.initiative_order.len() > 1 && self.initiative_order.last() == Some(&player_id)
    }

    /// Moves before at least one other player this turn
    pub fn has_lost_initiative(&self, player_id: PlayerId) -> bool {
        self.initiative_order.contains(&player_id) && !self.has_won_initiative(player_id)
    }

    pub async fn deploy_unit(&self, command: DeployUnitCommand) -> Result<()> {
        self.publisher.publish(ClientCommand::DeployUnit(command)).await
    }

    pub async fn move_unit(&self, command: MoveUnitCommand) -> Result<()> {
        self.publisher.publish(ClientCommand::MoveUnit(command)).await
    }

    pub async fn configure_weapons(&self, command: WeaponConfigurationCommand) -> Result<()> {
        self.publisher
            .publish(ClientCommand::WeaponConfiguration(command))
            .await
    }

    pub async fn declare_weapon_attack(
        &self,
        command: WeaponAttackDeclarationCommand,
    ) -> Result<()> {
        self.publisher
            .publish(ClientCommand::WeaponAttackDeclaration(command))
            .await
    }

    pub async fn shutdown_unit(&self, command: ShutdownUnitCommand) -> Result<()> {
        self.publisher.publish(ClientCommand::ShutdownUnit(command)).await
    }

    pub async fn startup_unit(&self, command: StartupUnitCommand) -> Result<()> {
        self.publisher.publish(ClientCommand::StartupUnit(command)).await
    }

    pub async fn end_turn(&self, command: TurnEndedCommand) -> Result<()> {
        self.publisher.publish(ClientCommand::TurnEnded(command)).await
    }
}

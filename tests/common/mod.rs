//! Shared fixtures for the bot integration tests
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use mech_bots::combat::{AttackScenario, ClassicToHitCalculator, ToHitCalculator};
use mech_bots::core::types::PlayerId;
use mech_bots::game::{ClientCommand, ClientGame, CommandPublisher, PhaseName};
use mech_bots::map::{BattleMap, HexCoordinates, HexDirection, HexGridMap, HexPosition, Terrain};
use mech_bots::units::{Player, Unit, Weapon};
use tokio::sync::mpsc::Receiver;

pub fn at(q: i32, r: i32, facing: HexDirection) -> HexPosition {
    HexPosition::new(HexCoordinates::new(q, r), facing)
}

/// A two-player game with the bot as player 0
pub struct Table {
    pub game: ClientGame,
    pub commands: Receiver<ClientCommand>,
    pub bot: PlayerId,
    pub foe: PlayerId,
}

impl Table {
    pub fn new(bot_units: Vec<Unit>, foe_units: Vec<Unit>) -> Self {
        let (publisher, commands) = CommandPublisher::channel(64);
        let mut bot = Player::new("bot");
        let mut foe = Player::new("foe");
        for unit in bot_units {
            bot.add_unit(unit);
        }
        for unit in foe_units {
            foe.add_unit(unit);
        }
        let (bot_id, foe_id) = (bot.id, foe.id);
        Self {
            game: ClientGame::new(vec![bot, foe], publisher),
            commands,
            bot: bot_id,
            foe: foe_id,
        }
    }

    pub fn with_map(mut self, map: impl BattleMap + 'static) -> Self {
        self.game = self.game.with_battle_map(map);
        self
    }

    pub fn with_open_map(self, width: i32, height: i32) -> Self {
        self.with_map(HexGridMap::new(width, height))
    }

    pub fn with_to_hit(mut self, calculator: Arc<dyn ToHitCalculator>) -> Self {
        self.game = self.game.with_to_hit_calculator(calculator);
        self
    }

    pub fn with_phase(mut self, phase: PhaseName) -> Self {
        self.game = self.game.with_phase(phase);
        self
    }

    pub fn bot_unit(&self, index: usize) -> &Unit {
        &self.game.players()[0].units[index]
    }

    pub fn foe_unit(&self, index: usize) -> &Unit {
        &self.game.players()[1].units[index]
    }

    /// Everything published so far
    pub fn drain(&mut self) -> Vec<ClientCommand> {
        let mut commands = Vec::new();
        while let Ok(command) = self.commands.try_recv() {
            commands.push(command);
        }
        commands
    }
}

pub fn mech(name: &str, walk_mp: u32, weapons: Vec<Weapon>) -> Unit {
    weapons.into_iter().fold(
        Unit::new(name, PlayerId::new()).with_movement(walk_mp, 0),
        |unit, weapon| unit.with_weapon(weapon),
    )
}

/// Classic to-hit numbers, counting every call
#[derive(Debug, Default)]
pub struct CountingToHit {
    calls: AtomicUsize,
}

impl CountingToHit {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ToHitCalculator for CountingToHit {
    fn to_hit_number(
        &self,
        scenario: &AttackScenario,
        weapon: &Weapon,
        map: &dyn BattleMap,
    ) -> i32 {
        self.calls.fetch_add(1, Ordering::SeqCst);
        ClassicToHitCalculator.to_hit_number(scenario, weapon, map)
    }
}

/// Same target number for every shot
#[derive(Debug, Clone, Copy)]
pub struct FixedToHit(pub i32);

impl ToHitCalculator for FixedToHit {
    fn to_hit_number(
        &self,
        _scenario: &AttackScenario,
        _weapon: &Weapon,
        _map: &dyn BattleMap,
    ) -> i32 {
        self.0
    }
}

/// Open terrain where nothing can see anything
#[derive(Debug, Clone)]
pub struct BlindMap {
    pub width: i32,
    pub height: i32,
}

impl BattleMap for BlindMap {
    fn width(&self) -> i32 {
        self.width
    }

    fn height(&self) -> i32 {
        self.height
    }

    fn terrain_at(&self, coordinates: HexCoordinates) -> Option<Terrain> {
        self.contains(coordinates).then_some(Terrain::Clear)
    }

    fn has_line_of_sight(&self, _from: HexCoordinates, _to: HexCoordinates) -> bool {
        false
    }
}

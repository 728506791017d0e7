//! Movement: pick the unit that should move next, then the best path for it

use ordered_float::OrderedFloat;
use std::cmp::Ordering;

use crate::bots::evaluation::TacticalEvaluator;
use crate::bots::roles::movement_priority;
use crate::bots::turn_state::TurnState;
use crate::core::config::{BotConfig, RoleConfig};
use crate::core::error::{BotError, Result};
use crate::core::types::PlayerId;
use crate::game::commands::MoveUnitCommand;
use crate::game::session::ClientGame;
use crate::map::battle_map::BattleMap;
use crate::map::hex::{HexCoordinates, HexDirection, HexPosition};
use crate::map::path::{MovementPath, MovementType};
use crate::units::unit::Unit;

#[derive(Debug, Clone, Default)]
pub struct MovementEngine {
    roles: RoleConfig,
    evaluator: TacticalEvaluator,
}

impl MovementEngine {
    pub const NAME: &'static str = "MovementEngine";

    pub fn new(config: &BotConfig) -> Self {
        Self {
            roles: config.roles.clone(),
            evaluator: TacticalEvaluator::new(config.evaluation.clone()),
        }
    }

    /// Move one unit
    ///
    /// Fails when the player has no deployed unit left to move; that is a
    /// sequencing error on the caller's side.
    pub async fn make_decision(
        &self,
        game: &ClientGame,
        player_id: PlayerId,
        turn_state: &mut TurnState,
    ) -> Result<()> {
        let unit = self.select_unit(game, player_id)?;
        let enemies = game.enemy_units(player_id);
        let path = self.select_path(game, unit, &enemies);

        if unit.position.is_some() {
            if let Err(e) = self
                .evaluator
                .evaluate_targets(game, unit, &path, &enemies, Some(turn_state))
            {
                tracing::warn!(unit = %unit.id, error = %e, "Could not pre-score targets");
            }
        }

        let destination = path.destination();
        tracing::info!(
            player = %player_id,
            unit = %unit.name,
            movement = ?path.movement_type,
            q = destination.coordinates.q,
            r = destination.coordinates.r,
            facing = ?destination.facing,
            "Moving unit"
        );
        game.move_unit(MoveUnitCommand {
            game_id: game.id(),
            player_id,
            unit_id: unit.id,
            movement_type: path.movement_type,
            movement_path: path.segments,
        })
        .await
    }

    /// Highest-priority unit still waiting to move; ties go to roster order
    pub fn select_unit<'a>(&self, game: &'a ClientGame, player_id: PlayerId) -> Result<&'a Unit> {
        let mut best: Option<(&Unit, i32)> = None;
        for unit in game.alive_units(player_id)? {
            if !unit.is_deployed() || unit.has_moved() {
                continue;
            }
            let priority = movement_priority(game, player_id, unit, &self.roles);
            if best.map_or(true, |(_, p)| priority > p) {
                best = Some((unit, priority));
            }
        }
        best.map(|(unit, _)| unit)
            .ok_or_else(|| {
                BotError::decision(Self::NAME, player_id, "no deployed unit left to move")
            })
    }

    /// Best-scoring candidate path, or standing still when there is none
    pub fn select_path(&self, game: &ClientGame, unit: &Unit, enemies: &[&Unit]) -> MovementPath {
        let Some(position) = unit.position else {
            return MovementPath::standing_still(HexPosition::default());
        };
        let standing_still = MovementPath::standing_still(position);
        if unit.status.immobile || (unit.walk_mp == 0 && unit.jump_mp == 0) {
            return standing_still;
        }
        let Some(map) = game.battle_map() else {
            return standing_still;
        };

        let blocked: Vec<HexCoordinates> = game
            .deployed_units()
            .filter(|u| u.id != unit.id)
            .filter_map(|u| u.position.map(|p| p.coordinates))
            .collect();

        let mut best: Option<(MovementPath, f32)> = None;
        for path in self.candidate_paths(map, unit, position, &blocked) {
            let net = self.evaluator.evaluate_path(game, unit, &path, enemies).net();
            let better = match &best {
                None => true,
                Some((current, current_net)) => {
                    match OrderedFloat(net).cmp(&OrderedFloat(*current_net)) {
                        Ordering::Greater => true,
                        Ordering::Equal => path.total_cost() < current.total_cost(),
                        Ordering::Less => false,
                    }
                }
            };
            if better {
                best = Some((path, net));
            }
        }

        match best {
            Some((path, net)) => {
                tracing::debug!(unit = %unit.id, net, cost = path.total_cost(), "Selected path");
                path
            }
            None => standing_still,
        }
    }

    /// Walk, run and jump paths to every reachable hex in every facing
    pub fn candidate_paths(
        &self,
        map: &dyn BattleMap,
        unit: &Unit,
        start: HexPosition,
        blocked: &[HexCoordinates],
    ) -> Vec<MovementPath> {
        let mut paths = Vec::new();

        let walk_mp = unit.movement_points(MovementType::Walk);
        let walk_hexes: Vec<HexCoordinates> = map
            .reachable_hexes(start, walk_mp, blocked)
            .into_iter()
            .map(|(hex, _)| hex)
            .collect();
        for &hex in &walk_hexes {
            for facing in HexDirection::all() {
                let goal = HexPosition::new(hex, facing);
                if let Some(segments) = map.find_path(start, goal, walk_mp, blocked) {
                    paths.push(MovementPath::new(start, segments, MovementType::Walk));
                }
            }
        }

        let run_mp = unit.movement_points(MovementType::Run);
        if self.evaluator.config().consider_running && run_mp > walk_mp {
            for (hex, _) in map.reachable_hexes(start, run_mp, blocked) {
                if walk_hexes.contains(&hex) {
                    continue;
                }
                for facing in HexDirection::all() {
                    let goal = HexPosition::new(hex, facing);
                    if let Some(segments) = map.find_path(start, goal, run_mp, blocked) {
                        paths.push(MovementPath::new(start, segments, MovementType::Run));
                    }
                }
            }
        }

        let jump_mp = unit.movement_points(MovementType::Jump);
        if self.evaluator.config().consider_jumping && jump_mp > 0 {
            for hex in start.coordinates.hexes_in_range(jump_mp) {
                if !map.contains(hex) || hex == start.coordinates {
                    continue;
                }
                for facing in HexDirection::all() {
                    let goal = HexPosition::new(hex, facing);
                    if let Some(segments) = map.find_jump_path(start, goal, jump_mp, blocked) {
                        paths.push(MovementPath::new(start, segments, MovementType::Jump));
                    }
                }
            }
        }

        paths
    }
}

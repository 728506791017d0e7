//! Path and target scoring
//!
//! Both halves work in expected damage: hit probability from the to-hit
//! calculator times weapon damage. Path scores compare the damage a unit could
//! deal from a destination against the damage it could take there; target
//! scores rank everything the unit can shoot at from where it stands.

use ordered_float::OrderedFloat;

use crate::bots::evaluation::types::{
    ConfigurationScore, PathScore, TargetEvaluationKey, TargetScore, WeaponEvaluationData,
};
use crate::bots::turn_state::TurnState;
use crate::combat::configuration::WeaponConfiguration;
use crate::combat::to_hit::{hit_probability, AttackScenario, ToHitCalculator};
use crate::core::config::EvaluationConfig;
use crate::core::error::{BotError, Result};
use crate::game::session::ClientGame;
use crate::map::battle_map::BattleMap;
use crate::map::hex::{FiringArc, HexDirection, HexPosition};
use crate::map::path::{MovementPath, MovementType};
use crate::units::unit::Unit;
use crate::units::weapons::Weapon;

#[derive(Debug, Clone, Default)]
pub struct TacticalEvaluator {
    config: EvaluationConfig,
}

impl TacticalEvaluator {
    pub fn new(config: EvaluationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EvaluationConfig {
        &self.config
    }

    pub fn arc_multiplier(&self, arc: FiringArc) -> f32 {
        match arc {
            FiringArc::Front => self.config.front_arc_multiplier,
            FiringArc::Left | FiringArc::Right => self.config.side_arc_multiplier,
            FiringArc::Rear => self.config.rear_arc_multiplier,
        }
    }

    /// Score the position at the end of `path` against visible enemies
    ///
    /// Threat in both directions is measured as if the shooter turned to face
    /// its target, then discounted by the arc it actually has to turn through.
    pub fn evaluate_path(
        &self,
        game: &ClientGame,
        unit: &Unit,
        path: &MovementPath,
        enemies: &[&Unit],
    ) -> PathScore {
        let destination = path.destination();
        let enemies_in_rear_arc = enemies
            .iter()
            .filter_map(|e| e.position)
            .filter(|p| destination.arc_to(p.coordinates) == FiringArc::Rear)
            .count() as u32;

        let mut score = PathScore {
            enemies_in_rear_arc,
            ..PathScore::default()
        };
        let Some(map) = game.battle_map() else {
            return score;
        };
        let calculator = game.to_hit_calculator();

        for enemy in enemies {
            let Some(enemy_position) = enemy.position else {
                continue;
            };
            if !map.has_line_of_sight(destination.coordinates, enemy_position.coordinates) {
                continue;
            }

            let incoming = best_expected_damage(
                calculator,
                map,
                enemy,
                enemy_position,
                enemy.current_movement_type(),
                destination,
                path.movement_type,
                path.hexes_moved(),
            );
            if let Some(damage) = incoming {
                score.defensive_index +=
                    damage * self.arc_multiplier(enemy_position.arc_to(destination.coordinates));
            }

            let outgoing = best_expected_damage(
                calculator,
                map,
                unit,
                destination,
                path.movement_type,
                enemy_position,
                enemy.current_movement_type(),
                enemy.hexes_moved(),
            );
            if let Some(damage) = outgoing {
                score.offensive_index +=
                    damage * self.arc_multiplier(destination.arc_to(enemy_position.coordinates));
            }
        }

        tracing::trace!(
            unit = %unit.id,
            q = destination.coordinates.q,
            r = destination.coordinates.r,
            facing = ?destination.facing,
            offensive = score.offensive_index,
            defensive = score.defensive_index,
            "Scored path"
        );
        score
    }

    /// Rank the targets `unit` can engage from the end of `path`
    ///
    /// Only targets with line of sight and inside at least one weapon's long
    /// range appear in the result, best first. With a cache, lookups happen
    /// before any to-hit calculation and fresh scores are stored.
    pub fn evaluate_targets(
        &self,
        game: &ClientGame,
        unit: &Unit,
        path: &MovementPath,
        targets: &[&Unit],
        mut turn_state: Option<&mut TurnState>,
    ) -> Result<Vec<TargetScore>> {
        if unit.position.is_none() {
            return Err(BotError::Evaluation(format!(
                "unit {} ({}) has no position",
                unit.name, unit.id
            )));
        }
        let Some(map) = game.battle_map() else {
            return Ok(Vec::new());
        };

        let mut scores = Vec::new();
        for target in targets {
            let Some(target_position) = target.position else {
                continue;
            };
            let key = TargetEvaluationKey::new(unit, path, target, target_position);

            if let Some(state) = turn_state.as_deref_mut() {
                if let Some(cached) = state.try_get(&key) {
                    scores.push(cached.clone());
                    continue;
                }
            }

            let Some(score) = self.score_target(game, map, unit, path, target, target_position)
            else {
                continue;
            };
            if let Some(state) = turn_state.as_deref_mut() {
                state.add(key, score.clone());
            }
            scores.push(score);
        }

        scores.sort_by(|a, b| b.score.total_cmp(&a.score));
        Ok(scores)
    }

    fn score_target(
        &self,
        game: &ClientGame,
        map: &dyn BattleMap,
        unit: &Unit,
        path: &MovementPath,
        target: &Unit,
        target_position: HexPosition,
    ) -> Option<TargetScore> {
        let destination = path.destination();
        if !map.has_line_of_sight(destination.coordinates, target_position.coordinates) {
            return None;
        }

        let distance = destination.coordinates.distance(&target_position.coordinates);
        let in_range: Vec<&Weapon> = unit
            .available_weapons()
            .filter(|w| w.in_range(distance))
            .collect();
        if in_range.is_empty() {
            return None;
        }

        let mut configurations = vec![WeaponConfiguration::none()];
        if unit.can_rotate_torso && in_range.iter().any(|w| w.location.rotates_with_torso()) {
            configurations.push(WeaponConfiguration::torso_rotation(destination.facing.rotate(-1)));
            configurations.push(WeaponConfiguration::torso_rotation(destination.facing.rotate(1)));
        }

        let calculator = game.to_hit_calculator();
        let evaluated: Vec<ConfigurationScore> = configurations
            .into_iter()
            .map(|configuration| {
                let scenario = AttackScenario {
                    attacker_gunnery: unit.gunnery,
                    attacker_movement: path.movement_type,
                    attacker_position: destination,
                    torso_facing: configuration.torso_facing(destination.facing),
                    target_position,
                    target_movement: target.current_movement_type(),
                    target_hexes_moved: target.hexes_moved(),
                };
                let weapons: Vec<WeaponEvaluationData> = in_range
                    .iter()
                    .map(|weapon| WeaponEvaluationData {
                        weapon: (*weapon).clone(),
                        hit_probability: hit_probability(
                            calculator.to_hit_number(&scenario, weapon, map),
                        ),
                        // Leg mounts never twist
                        configuration: if weapon.location.rotates_with_torso() {
                            configuration
                        } else {
                            WeaponConfiguration::none()
                        },
                    })
                    .collect();
                ConfigurationScore {
                    configuration,
                    score: weapons.iter().map(|w| w.expected_damage()).sum(),
                    weapons,
                }
            })
            .collect();

        // First strictly greater wins so the untwisted stance takes ties
        let mut best = &evaluated[0];
        for candidate in &evaluated[1..] {
            if OrderedFloat(candidate.score) > OrderedFloat(best.score) {
                best = candidate;
            }
        }
        let score = TargetScore {
            target_id: target.id,
            score: best.score,
            viable_weapons: best.weapons.clone(),
            configuration: best.configuration,
            configuration_scores: evaluated.iter().filter(|c| c.score > 0.0).cloned().collect(),
        };

        tracing::debug!(
            unit = %unit.id,
            target = %target.id,
            score = score.score,
            configuration = ?score.configuration.config_type,
            "Scored target"
        );
        Some(score)
    }
}

/// Best single-weapon expected damage `shooter` could deal if it faced the target
#[allow(clippy::too_many_arguments)]
fn best_expected_damage(
    calculator: &dyn ToHitCalculator,
    map: &dyn BattleMap,
    shooter: &Unit,
    from: HexPosition,
    shooter_movement: MovementType,
    target_position: HexPosition,
    target_movement: MovementType,
    target_hexes_moved: u32,
) -> Option<f32> {
    let distance = from.coordinates.distance(&target_position.coordinates);
    let facing = if from.coordinates == target_position.coordinates {
        from.facing
    } else {
        HexDirection::closest_to_bearing(from.coordinates.bearing_to(&target_position.coordinates))
    };
    let scenario = AttackScenario {
        attacker_gunnery: shooter.gunnery,
        attacker_movement: shooter_movement,
        attacker_position: from.with_facing(facing),
        torso_facing: facing,
        target_position,
        target_movement,
        target_hexes_moved,
    };

    shooter
        .available_weapons()
        .filter(|w| w.in_range(distance))
        .map(|w| hit_probability(calculator.to_hit_number(&scenario, w, map)) * w.damage as f32)
        .max_by_key(|&damage| OrderedFloat(damage))
}

//! Weapons attack: fire the best affordable weapons at the best target

use crate::bots::evaluation::{TacticalEvaluator, WeaponEvaluationData};
use crate::bots::turn_state::TurnState;
use crate::combat::configuration::WeaponConfiguration;
use crate::core::config::{BotConfig, WeaponSelectionConfig};
use crate::core::error::{BotError, Result};
use crate::core::types::PlayerId;
use crate::game::commands::{
    WeaponAttackDeclarationCommand, WeaponConfigurationCommand, WeaponTargetData,
};
use crate::game::session::ClientGame;
use crate::units::unit::Unit;

/// What one attacker ends up doing this phase
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FireSelection {
    /// Stance to adopt before firing, if any
    pub configuration: Option<WeaponConfiguration>,
    pub weapon_targets: Vec<WeaponTargetData>,
}

#[derive(Debug, Clone, Default)]
pub struct WeaponsEngine {
    config: WeaponSelectionConfig,
    evaluator: TacticalEvaluator,
}

impl WeaponsEngine {
    pub const NAME: &'static str = "WeaponsEngine";

    pub fn new(config: &BotConfig) -> Self {
        Self {
            config: config.weapons.clone(),
            evaluator: TacticalEvaluator::new(config.evaluation.clone()),
        }
    }

    /// Declare one unit's attack
    ///
    /// A unit that cannot or should not fire still gets an empty declaration so
    /// the phase can advance.
    pub async fn make_decision(
        &self,
        game: &ClientGame,
        player_id: PlayerId,
        turn_state: &mut TurnState,
    ) -> Result<()> {
        let units = game
            .alive_units(player_id)
            .map_err(|e| BotError::decision(Self::NAME, player_id, e.to_string()))?;
        let ready = units
            .iter()
            .find(|u| u.can_fire_weapons() && !u.has_declared_attack && u.position.is_some());

        let Some(&attacker) = ready else {
            let fallback = match units.iter().find(|u| !u.has_declared_attack) {
                Some(&unit) => unit,
                None => game
                    .player(player_id)?
                    .units
                    .first()
                    .ok_or_else(|| {
                        BotError::decision(Self::NAME, player_id, "player has no units")
                    })?,
            };
            tracing::debug!(player = %player_id, unit = %fallback.name, "No unit able to fire");
            return game
                .declare_weapon_attack(WeaponAttackDeclarationCommand::empty(
                    game.id(),
                    player_id,
                    fallback.id,
                ))
                .await;
        };

        let selection = match self.select_fire(game, player_id, attacker, turn_state) {
            Ok(selection) => selection,
            Err(e) => {
                tracing::warn!(
                    unit = %attacker.id,
                    error = %e,
                    "Weapon selection failed, holding fire"
                );
                FireSelection::default()
            }
        };

        if let Some(configuration) = selection.configuration {
            game.configure_weapons(WeaponConfigurationCommand {
                game_id: game.id(),
                player_id,
                unit_id: attacker.id,
                configuration,
            })
            .await?;
        }

        tracing::info!(
            player = %player_id,
            unit = %attacker.name,
            weapons = selection.weapon_targets.len(),
            "Declaring weapon attack"
        );
        game.declare_weapon_attack(WeaponAttackDeclarationCommand {
            game_id: game.id(),
            player_id,
            attacker_id: attacker.id,
            weapon_targets: selection.weapon_targets,
        })
        .await
    }

    /// Weapons and stance for `attacker` against its best target
    pub fn select_fire(
        &self,
        game: &ClientGame,
        player_id: PlayerId,
        attacker: &Unit,
        turn_state: &mut TurnState,
    ) -> Result<FireSelection> {
        let path = attacker.current_path().ok_or_else(|| {
            BotError::Evaluation(format!("unit {} has no position", attacker.id))
        })?;
        let enemies = game.enemy_units(player_id);
        let scores = self
            .evaluator
            .evaluate_targets(game, attacker, &path, &enemies, Some(turn_state))?;

        let Some(top) = scores.first() else {
            return Ok(FireSelection::default());
        };
        if !enemies.iter().any(|e| e.id == top.target_id) {
            return Ok(FireSelection::default());
        }

        let movement_heat = game.rules().movement_heat(path.movement_type, path.hexes_moved());
        let budget = heat_budget(attacker, movement_heat, self.config.safe_heat_margin);
        let selected = self.select_weapons(&top.viable_weapons, budget);

        let configuration = if !selected.is_empty() && !top.configuration.is_none() {
            Some(top.configuration)
        } else {
            None
        };
        let weapon_targets = selected
            .iter()
            .map(|w| WeaponTargetData {
                weapon: w.weapon.reference(),
                target_id: top.target_id,
                is_primary_target: true,
            })
            .collect();

        Ok(FireSelection {
            configuration,
            weapon_targets,
        })
    }

    /// Greedy pick under `heat_budget`, best chance first
    pub fn select_weapons<'a>(
        &self,
        candidates: &'a [WeaponEvaluationData],
        heat_budget: i32,
    ) -> Vec<&'a WeaponEvaluationData> {
        let mut eligible: Vec<&WeaponEvaluationData> = candidates
            .iter()
            .filter(|w| w.hit_probability > 0.0 && self.ammo_allows(w))
            .collect();
        eligible.sort_by(|a, b| {
            b.hit_probability
                .total_cmp(&a.hit_probability)
                .then(b.weapon.damage.cmp(&a.weapon.damage))
                .then(shots_left(b).cmp(&shots_left(a)))
        });
        prefer_deeper_magazines(&mut eligible);

        let mut heat = 0;
        eligible
            .into_iter()
            .filter(|w| {
                let weapon_heat = w.weapon.heat as i32;
                if heat + weapon_heat <= heat_budget {
                    heat += weapon_heat;
                    true
                } else {
                    false
                }
            })
            .collect()
    }

    fn ammo_allows(&self, candidate: &WeaponEvaluationData) -> bool {
        match candidate.weapon.ammo_shots {
            None => true,
            Some(0) => false,
            Some(shots) if shots <= self.config.low_ammo_cutoff => {
                candidate.hit_probability >= self.config.low_ammo_min_probability
            }
            Some(_) => true,
        }
    }
}

/// Heat a unit can add this phase without passing its safe ceiling
pub fn heat_budget(unit: &Unit, movement_heat: i32, safe_heat_margin: i32) -> i32 {
    (unit.heat.dissipation + safe_heat_margin - (unit.heat.current + movement_heat)).max(0)
}

fn shots_left(candidate: &WeaponEvaluationData) -> u32 {
    candidate.weapon.ammo_shots.unwrap_or(u32::MAX)
}

/// Within each run of equal hit probability, reorder the ammo weapons by
/// remaining shots so the scarcer magazine is the one left out under heat
fn prefer_deeper_magazines(sorted: &mut [&WeaponEvaluationData]) {
    let mut start = 0;
    while start < sorted.len() {
        let probability = sorted[start].hit_probability;
        let end = sorted[start..]
            .iter()
            .position(|w| w.hit_probability.total_cmp(&probability).is_ne())
            .map_or(sorted.len(), |offset| start + offset);

        let slots: Vec<usize> = (start..end)
            .filter(|&i| sorted[i].weapon.uses_ammo())
            .collect();
        let mut limited: Vec<&WeaponEvaluationData> = slots.iter().map(|&i| sorted[i]).collect();
        limited.sort_by(|a, b| {
            shots_left(b)
                .cmp(&shots_left(a))
                .then(b.weapon.damage.cmp(&a.weapon.damage))
        });
        for (slot, weapon) in slots.into_iter().zip(limited) {
            sorted[slot] = weapon;
        }
        start = end;
    }
}

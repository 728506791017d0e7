//! Bot configuration with documented constants
//!
//! All tuning numbers used by the decision engines live here. The defaults
//! match `data/bots/default.toml`; a bot can be given a different TOML file
//! to change its temperament without touching code.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::core::error::{BotError, Result};

/// Movement-order priorities per tactical role
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RoleConfig {
    /// Priority of indirect-fire units (moves them before anything else)
    pub boat_priority: i32,
    /// Priority of generalist units
    pub trooper_priority: i32,
    /// Base priority of fast, lightly armed units
    pub scout_priority: i32,
    /// Base priority of short-ranged units
    pub brawler_priority: i32,

    /// Added to a scout's priority when our side won initiative
    pub scout_initiative_bonus: i32,
    /// Subtracted from a brawler's priority when our side moves first
    /// while enemy units are still unmoved
    pub brawler_initiative_penalty: i32,

    /// Total missile tubes at which a unit counts as a boat
    pub boat_missile_tubes: u32,
    /// Walking MP at which a unit is fast enough to scout
    pub scout_min_walk_mp: u32,
    /// Summed weapon damage at or below which a fast unit counts as a scout
    pub scout_max_damage: u32,
    /// Long range at or below which every weapon makes a unit a brawler
    pub brawler_max_range: u32,
}

impl Default for RoleConfig {
    fn default() -> Self {
        Self {
            boat_priority: 90,
            trooper_priority: 50,
            scout_priority: 20,
            brawler_priority: 30,
            scout_initiative_bonus: 15,
            brawler_initiative_penalty: 30,
            boat_missile_tubes: 20,
            scout_min_walk_mp: 6,
            scout_max_damage: 15,
            brawler_max_range: 6,
        }
    }
}

/// Position scoring knobs
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluationConfig {
    /// Threat multiplier when standing in an enemy's front arc
    pub front_arc_multiplier: f32,
    /// Threat multiplier when standing in an enemy's side arc
    ///
    /// The enemy has to twist or turn to bring weapons to bear, so the
    /// threat is discounted.
    pub side_arc_multiplier: f32,
    /// Threat multiplier when standing behind an enemy
    pub rear_arc_multiplier: f32,
    pub consider_running: bool,
    pub consider_jumping: bool,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            front_arc_multiplier: 1.0,
            side_arc_multiplier: 0.5,
            rear_arc_multiplier: 0.25,
            consider_running: true,
            consider_jumping: true,
        }
    }
}

/// Weapon selection policy
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WeaponSelectionConfig {
    /// Remaining shots at or below which ammo counts as scarce
    pub low_ammo_cutoff: u32,
    /// Hit probability that justifies firing a scarce-ammo weapon anyway
    pub low_ammo_min_probability: f32,
    /// Heat the bot accepts above its dissipation in a single turn
    ///
    /// At 4, a unit ends the turn just below the first movement penalty
    /// on the classic heat scale.
    pub safe_heat_margin: i32,
}

impl Default for WeaponSelectionConfig {
    fn default() -> Self {
        Self {
            low_ammo_cutoff: 3,
            low_ammo_min_probability: 0.6,
            safe_heat_margin: 4,
        }
    }
}

/// End-phase heat management
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HeatConfig {
    /// Heat above which an active unit is shut down voluntarily
    pub overheat_threshold: i32,
}

impl Default for HeatConfig {
    fn default() -> Self {
        Self {
            overheat_threshold: 14,
        }
    }
}

/// Complete bot configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BotConfig {
    /// Name of this configuration (set from filename)
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub roles: RoleConfig,
    #[serde(default)]
    pub evaluation: EvaluationConfig,
    #[serde(default)]
    pub weapons: WeaponSelectionConfig,
    #[serde(default)]
    pub heat: HeatConfig,
}

impl BotConfig {
    /// Parse a configuration from TOML text
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: BotConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file; the name is taken from the file stem
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        let mut config = Self::from_toml_str(&contents)?;
        if config.name.is_empty() {
            config.name = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
        }
        Ok(config)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        let p = self.weapons.low_ammo_min_probability;
        if !(0.0..=1.0).contains(&p) {
            return Err(BotError::InvalidConfig(format!(
                "low_ammo_min_probability ({}) must be within [0, 1]",
                p
            )));
        }

        let e = &self.evaluation;
        for (label, value) in [
            ("front_arc_multiplier", e.front_arc_multiplier),
            ("side_arc_multiplier", e.side_arc_multiplier),
            ("rear_arc_multiplier", e.rear_arc_multiplier),
        ] {
            if value < 0.0 {
                return Err(BotError::InvalidConfig(format!(
                    "{} ({}) must not be negative",
                    label, value
                )));
            }
        }

        if self.weapons.safe_heat_margin < 0 {
            return Err(BotError::InvalidConfig(format!(
                "safe_heat_margin ({}) must not be negative",
                self.weapons.safe_heat_margin
            )));
        }

        Ok(())
    }
}

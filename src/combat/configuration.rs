//! Non-default stances a unit can adopt before firing

use serde::{Deserialize, Serialize};

use crate::map::hex::HexDirection;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum WeaponConfigurationType {
    #[default]
    None,
    TorsoRotation,
}

/// A firing stance; for torso rotation `value` is the torso facing index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct WeaponConfiguration {
    pub config_type: WeaponConfigurationType,
    pub value: i32,
}

impl WeaponConfiguration {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn torso_rotation(facing: HexDirection) -> Self {
        Self {
            config_type: WeaponConfigurationType::TorsoRotation,
            value: facing.index(),
        }
    }

    pub fn is_none(&self) -> bool {
        self.config_type == WeaponConfigurationType::None
    }

    /// Torso facing under this stance for a unit facing `unit_facing`
    pub fn torso_facing(&self, unit_facing: HexDirection) -> HexDirection {
        match self.config_type {
            WeaponConfigurationType::None => unit_facing,
            WeaponConfigurationType::TorsoRotation => HexDirection::from_index(self.value),
        }
    }
}

//! Mounted weapons and the body parts that carry them
//!
//! Damage figures are expected damage per attack; cluster weapons already
//! fold the average number of missiles that hit into `damage`.

use serde::{Deserialize, Serialize};

/// Body part a weapon is mounted in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PartLocation {
    Head,
    CenterTorso,
    LeftTorso,
    RightTorso,
    LeftArm,
    RightArm,
    LeftLeg,
    RightLeg,
}

impl PartLocation {
    /// Parts that turn with a torso twist; legs keep the unit facing
    pub fn rotates_with_torso(&self) -> bool {
        !matches!(self, PartLocation::LeftLeg | PartLocation::RightLeg)
    }
}

/// Range band of a target relative to a weapon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RangeBracket {
    Short,
    Medium,
    Long,
    OutOfRange,
}

/// Identifies one mounted weapon in commands
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WeaponRef {
    pub name: String,
    pub location: PartLocation,
    pub slot: u8,
}

/// A weapon mounted on a unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Weapon {
    pub name: String,
    pub location: PartLocation,
    #[serde(default)]
    pub slot: u8,
    pub damage: u32,
    pub heat: u32,
    #[serde(default)]
    pub min_range: u32,
    pub short_range: u32,
    pub medium_range: u32,
    pub long_range: u32,
    /// Launch tubes for missile weapons, 0 otherwise
    #[serde(default)]
    pub missile_tubes: u32,
    /// Remaining shots; None for weapons without ammo
    #[serde(default)]
    pub ammo_shots: Option<u32>,
    #[serde(default)]
    pub rear_mounted: bool,
    #[serde(default)]
    pub destroyed: bool,
}

impl Weapon {
    pub fn new(
        name: &str,
        location: PartLocation,
        damage: u32,
        heat: u32,
        (short_range, medium_range, long_range): (u32, u32, u32),
    ) -> Self {
        Self {
            name: name.to_string(),
            location,
            slot: 0,
            damage,
            heat,
            min_range: 0,
            short_range,
            medium_range,
            long_range,
            missile_tubes: 0,
            ammo_shots: None,
            rear_mounted: false,
            destroyed: false,
        }
    }

    pub fn with_slot(mut self, slot: u8) -> Self {
        self.slot = slot;
        self
    }

    pub fn with_ammo(mut self, shots: u32) -> Self {
        self.ammo_shots = Some(shots);
        self
    }

    pub fn with_min_range(mut self, min_range: u32) -> Self {
        self.min_range = min_range;
        self
    }

    pub fn with_missile_tubes(mut self, tubes: u32) -> Self {
        self.missile_tubes = tubes;
        self
    }

    pub fn rear_facing(mut self) -> Self {
        self.rear_mounted = true;
        self
    }

    // === Stock weapons ===

    pub fn small_laser(location: PartLocation) -> Self {
        Self::new("Small Laser", location, 3, 1, (1, 2, 3))
    }

    pub fn medium_laser(location: PartLocation) -> Self {
        Self::new("Medium Laser", location, 5, 3, (3, 6, 9))
    }

    pub fn large_laser(location: PartLocation) -> Self {
        Self::new("Large Laser", location, 8, 8, (5, 10, 15))
    }

    pub fn ppc(location: PartLocation) -> Self {
        Self::new("PPC", location, 10, 10, (6, 12, 18)).with_min_range(3)
    }

    pub fn machine_gun(location: PartLocation) -> Self {
        Self::new("Machine Gun", location, 2, 0, (1, 2, 3)).with_ammo(200)
    }

    pub fn autocannon5(location: PartLocation) -> Self {
        Self::new("AC/5", location, 5, 1, (6, 12, 18))
            .with_min_range(3)
            .with_ammo(20)
    }

    pub fn autocannon20(location: PartLocation) -> Self {
        Self::new("AC/20", location, 20, 7, (3, 6, 9)).with_ammo(5)
    }

    pub fn srm6(location: PartLocation) -> Self {
        Self::new("SRM-6", location, 8, 4, (3, 6, 9))
            .with_missile_tubes(6)
            .with_ammo(15)
    }

    pub fn lrm10(location: PartLocation) -> Self {
        Self::new("LRM-10", location, 6, 4, (7, 14, 21))
            .with_min_range(6)
            .with_missile_tubes(10)
            .with_ammo(12)
    }

    pub fn lrm20(location: PartLocation) -> Self {
        Self::new("LRM-20", location, 12, 6, (7, 14, 21))
            .with_min_range(6)
            .with_missile_tubes(20)
            .with_ammo(6)
    }

    pub fn reference(&self) -> WeaponRef {
        WeaponRef {
            name: self.name.clone(),
            location: self.location,
            slot: self.slot,
        }
    }

    pub fn matches(&self, weapon: &WeaponRef) -> bool {
        self.name == weapon.name && self.location == weapon.location && self.slot == weapon.slot
    }

    pub fn is_available(&self) -> bool {
        !self.destroyed
    }

    pub fn uses_ammo(&self) -> bool {
        self.ammo_shots.is_some()
    }

    pub fn in_range(&self, distance: u32) -> bool {
        distance <= self.long_range
    }

    pub fn range_bracket(&self, distance: u32) -> RangeBracket {
        if distance <= self.short_range {
            RangeBracket::Short
        } else if distance <= self.medium_range {
            RangeBracket::Medium
        } else if distance <= self.long_range {
            RangeBracket::Long
        } else {
            RangeBracket::OutOfRange
        }
    }
}

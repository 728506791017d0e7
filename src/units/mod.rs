//! Unit hierarchy: Weapon → Unit → Player

pub mod player;
pub mod unit;
pub mod weapons;

pub use player::Player;
pub use unit::{HeatState, Unit, UnitStatus};
pub use weapons::{PartLocation, RangeBracket, Weapon, WeaponRef};

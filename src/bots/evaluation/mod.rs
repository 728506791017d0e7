//! Position and target evaluation shared by the movement and weapons engines

pub mod tactical;
pub mod types;

pub use tactical::TacticalEvaluator;
pub use types::{
    ConfigurationScore, PathScore, TargetEvaluationKey, TargetScore, WeaponEvaluationData,
};

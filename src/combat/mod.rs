//! Combat rules consumed by the bots: to-hit numbers, firing stances and heat figures

pub mod configuration;
pub mod rules;
pub mod to_hit;

pub use configuration::{WeaponConfiguration, WeaponConfigurationType};
pub use rules::{ClassicRules, RulesProvider};
pub use to_hit::{
    hit_probability, AttackScenario, ClassicToHitCalculator, ToHitCalculator, IMPOSSIBLE_ROLL,
};

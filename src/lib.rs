//! Mech Bots - decision engines for computer players in hex mech combat

pub mod bots;
pub mod combat;
pub mod core;
pub mod game;
pub mod map;
pub mod units;

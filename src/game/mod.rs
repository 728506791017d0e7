//! Game session: phases, outbound commands and the client view bots act on

pub mod commands;
pub mod phase;
pub mod scenario;
pub mod session;

pub use commands::{
    ClientCommand, DeployUnitCommand, MoveUnitCommand, ShutdownUnitCommand, StartupUnitCommand,
    TurnEndedCommand, WeaponAttackDeclarationCommand, WeaponConfigurationCommand, WeaponTargetData,
};
pub use phase::PhaseName;
pub use scenario::Scenario;
pub use session::{ClientGame, CommandPublisher};

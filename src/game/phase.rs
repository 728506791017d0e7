//! Turn phases

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PhaseName {
    #[default]
    Start,
    Deployment,
    Initiative,
    Movement,
    WeaponsAttack,
    PhysicalAttack,
    Heat,
    End,
}

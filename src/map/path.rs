//! Movement paths as submitted in move commands

use serde::{Deserialize, Serialize};

use crate::map::hex::HexPosition;

/// How a unit moves this turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum MovementType {
    #[default]
    StandingStill,
    Walk,
    Run,
    Jump,
}

/// One step of a path: a hexside turn or a move into the next hex
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathSegment {
    pub from: HexPosition,
    pub to: HexPosition,
    pub cost: u32,
}

impl PathSegment {
    pub fn new(from: HexPosition, to: HexPosition, cost: u32) -> Self {
        Self { from, to, cost }
    }

    /// True for segments that change hex rather than facing
    pub fn changes_hex(&self) -> bool {
        self.from.coordinates != self.to.coordinates
    }
}

/// Ordered segments rooted at a start position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovementPath {
    pub start: HexPosition,
    pub segments: Vec<PathSegment>,
    pub movement_type: MovementType,
}

impl MovementPath {
    pub fn new(
        start: HexPosition,
        segments: Vec<PathSegment>,
        movement_type: MovementType,
    ) -> Self {
        Self {
            start,
            segments,
            movement_type,
        }
    }

    /// Zero-length path for a unit that stays where it is
    pub fn standing_still(position: HexPosition) -> Self {
        Self::new(position, Vec::new(), MovementType::StandingStill)
    }

    pub fn destination(&self) -> HexPosition {
        self.segments.last().map(|s| s.to).unwrap_or(self.start)
    }

    pub fn total_cost(&self) -> u32 {
        self.segments.iter().map(|s| s.cost).sum()
    }

    /// Hexes entered, ignoring in-place turns
    pub fn hexes_moved(&self) -> u32 {
        self.segments.iter().filter(|s| s.changes_hex()).count() as u32
    }

    pub fn is_standing_still(&self) -> bool {
        self.movement_type == MovementType::StandingStill
    }
}
